pub mod game_session;
pub mod matchmaking;
pub mod queue;
