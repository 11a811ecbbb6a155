pub mod errors;
pub mod game_repository;
pub mod queue_repository;
pub mod rating_repository;
