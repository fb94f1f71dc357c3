pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export for convenience
pub use crate::infrastructure::app_state::AppState;
pub use crate::infrastructure::config::AppConfig;
