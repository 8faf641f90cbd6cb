pub mod auth_handlers;
pub mod control_handlers;
pub mod dashboard_handlers;
pub mod ops_handlers;

pub use auth_handlers::*;
pub use control_handlers::*;
pub use dashboard_handlers::*;
pub use ops_handlers::*;
