mod jwt_service;
mod service_token;

pub use jwt_service::{Claims, JwtError, JwtService};
pub use service_token::ServiceTokenValidator;
