pub mod memory;
pub mod postgrest;

pub use memory::*;
pub use postgrest::*;
