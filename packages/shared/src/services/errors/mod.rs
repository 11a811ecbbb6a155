pub mod chess_service_errors;
pub mod matchmaking_service_errors;
pub mod queue_service_errors;
pub mod settlement_service_errors;
