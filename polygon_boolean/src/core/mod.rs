//! Core module has the numeric traits and 2D math shared by the polygon algorithms.
pub mod math;
pub mod traits;
