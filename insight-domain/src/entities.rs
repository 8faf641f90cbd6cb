// Domain entities

pub mod event;
pub mod runtime_config;
pub mod summary;
pub mod user;

pub use event::*;
pub use runtime_config::*;
pub use summary::*;
pub use user::*;
