//! This module has all the types and functions associated with polygons, polygon edges, and the
//! intersect records used by the boolean operations.
pub mod internal;
mod pgon;
mod pgon_edge;
mod pgon_intersect;
mod pgon_types;

pub use pgon::*;
pub use pgon_edge::*;
pub use pgon_intersect::*;
pub use pgon_types::*;
