// Pure pipeline services: classify, aggregate, select

pub mod aggregator;
pub mod classifier;
pub mod selection;

pub use aggregator::*;
pub use classifier::*;
pub use selection::*;
