pub mod case;
pub mod comparables;
pub mod config;
pub mod extraction;
pub mod recommendation;
pub mod risk;
pub mod valuation;

pub use case::*;
pub use comparables::*;
pub use recommendation::*;
pub use risk::*;
pub use valuation::*;
