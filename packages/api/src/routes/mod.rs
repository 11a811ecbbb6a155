pub mod game;
pub mod health;
pub mod matchmaking;
pub mod queue;
