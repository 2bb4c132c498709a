pub mod health;
pub mod webhook;

pub use health::{HealthResponse, health_check};
pub use webhook::receive_webhook;
