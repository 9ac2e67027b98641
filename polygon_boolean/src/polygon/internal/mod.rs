//! Internal polygon modules made public for visualization, benchmarking, and testing purposes.
//!
//! Not expected to be used directly as part of the library but may be used to help learn about the
//! algorithms, or to run the engine with a custom [pgon_policies::OperationPolicy].
pub mod pgon_boolean;
pub mod pgon_grouping;
pub mod pgon_intersects;
pub mod pgon_policies;
