//! Data models

pub mod sensor;
pub mod table;
pub mod prediction;

pub use sensor::*;
pub use table::*;
pub use prediction::*;
