pub mod chess_service;
pub mod errors;
pub mod matchmaking_service;
pub mod queue_service;
pub mod settlement_service;
