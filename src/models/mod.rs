//! Data models

pub mod verdict;
pub mod scan;

pub use verdict::*;
pub use scan::*;
