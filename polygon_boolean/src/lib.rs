//! 2D polygon boolean operations.
//!
//! Union, intersection, difference, and exclusive-or of polygons (multiple disjoint rings, nested
//! holes and islands, touching and shared boundaries), plus removal of self intersects, all
//! implemented by one intersection tracing engine driven by per operation policies.
//!
//! # Examples
//!
//! ```
//! # use polygon_boolean::polygon::*;
//! # use polygon_boolean::core::traits::*;
//! # use polygon_boolean::polygon;
//! let a = polygon![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)];
//! let b = polygon![(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)];
//! let result = a.boolean(&b, BooleanOp::Intersection);
//! assert_eq!(result.len(), 1);
//! assert!(result[0].area().fuzzy_eq(1.0));
//! ```
#[macro_use]
mod macros;
pub mod core;
mod error;
pub mod polygon;

pub use error::{BooleanError, Operand, PolygonError};
pub use static_aabb2d_index::AABB;
