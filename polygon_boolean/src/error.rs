use thiserror::Error;

/// Problems found when validating a single polygon with
/// [Polygon::validate](crate::polygon::Polygon::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolygonError {
    /// A ring has fewer than three vertexes.
    #[error("ring {ring} has {count} vertexes, at least 3 are required")]
    TooFewVertexes { ring: usize, count: usize },
    /// A vertex coordinate is NaN or infinite.
    #[error("ring {ring} vertex {vertex} has a non-finite coordinate")]
    NonFiniteVertex { ring: usize, vertex: usize },
    /// A ring encloses no area.
    #[error("ring {ring} encloses no area")]
    ZeroArea { ring: usize },
}

/// Which input of a two polygon boolean operation an error refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operand {
    A,
    B,
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::A => write!(f, "A"),
            Operand::B => write!(f, "B"),
        }
    }
}

/// Errors from the validating boolean entry points.
///
/// The boolean engine itself never fails, these are only produced by
/// [Polygon::try_boolean](crate::polygon::Polygon::try_boolean) and
/// [PolygonInteractionRecord::validate](crate::polygon::PolygonInteractionRecord::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BooleanError {
    #[error("polygon {operand} is invalid: {source}")]
    InvalidPolygon {
        operand: Operand,
        #[source]
        source: PolygonError,
    },
    #[error("tolerance must be positive and finite")]
    InvalidTolerance,
    #[error("intersect {index} references edge {edge} but there are only {edge_count} edges")]
    EdgeOutOfRange {
        index: usize,
        edge: usize,
        edge_count: usize,
    },
    #[error("intersect {index} edge {edge} is expected to belong to polygon {operand}")]
    EdgeOnWrongSide {
        index: usize,
        edge: usize,
        operand: Operand,
    },
    #[error("ring relationship table has {found} entries, expected {expected}")]
    RelationshipTableMismatch { found: usize, expected: usize },
}
