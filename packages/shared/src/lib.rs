pub mod models;
pub mod rating;
pub mod repositories;
pub mod services;
