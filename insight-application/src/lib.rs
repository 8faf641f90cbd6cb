// Insight Application Layer

pub mod commands;
pub mod crypto;
pub mod dtos;
pub mod error;
pub mod metrics;
pub mod queries;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::AppError;
pub use metrics::Metrics;
pub use session::SessionContext;
pub use state::AppState;
