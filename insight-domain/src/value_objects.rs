// Domain value objects
pub mod device_status;
pub mod identifiers;
pub mod visitor_kind;

pub use device_status::*;
pub use identifiers::*;
pub use visitor_kind::*;
