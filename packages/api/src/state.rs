use std::sync::Arc;

use shared::services::matchmaking_service::MatchmakingService;
use shared::services::queue_service::QueueService;
use shared::services::settlement_service::SettlementService;

#[derive(Clone)]
pub struct AppState {
    pub queue_service: Arc<QueueService>,
    pub matchmaking_service: Arc<MatchmakingService>,
    pub settlement_service: Arc<SettlementService>,
}
