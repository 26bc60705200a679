mod health;
mod webhook;

pub use health::health_handler;
pub use webhook::{invalid_method_handler, webhook_handler, ErrorResponse, MessageResponse};
