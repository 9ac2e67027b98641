/// Macro used for test assertions.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Macro used for implementing the polygon macro. Used for extracting macro repetition count for
/// reserving capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Construct a polygon ring (no holes) with the vertexes given as a list of (x, y) tuples.
///
/// Holes may be attached afterwards with [Polygon::with_inner](crate::polygon::Polygon::with_inner).
///
/// # Examples
///
/// ```
/// # use polygon_boolean::polygon;
/// # use polygon_boolean::polygon::*;
/// # use polygon_boolean::core::math::*;
/// let square = polygon![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
/// assert_eq!(square.vertex_count(), 4);
/// assert_eq!(square[2], Vector2::new(1.0, 1.0));
/// assert!(square.is_positive());
/// ```
#[macro_export]
macro_rules! polygon {
    ($( $x:expr ),* $(,)?) => {
        {
            use $crate::polygon::*;
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut pgon = Polygon::with_capacity(size);
            $(
                pgon.add($x.0, $x.1);
            )*
            pgon
        }
    };
}
