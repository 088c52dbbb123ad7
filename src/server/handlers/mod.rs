pub mod config;
pub mod feedback;
pub mod health;
pub mod logs;
pub mod query;
