use polygon_boolean::polygon::Polygon;

/// Cycles all the vertex index positions of the outer ring forward by `n`. E.g. index 0 becomes 1,
/// last index becomes 0, etc. Inner polygons are kept as is.
pub fn cycle_start_index_forward(input: &Polygon<f64>, n: usize) -> Polygon<f64> {
    assert!(n > 0, "cycling forward by 0 just returns the same polygon");
    assert!(
        n < input.vertex_count(),
        "cycling forward by more than the ring length is unnecessary"
    );
    let mut result = input.clone();
    result.vertexes.rotate_left(n);
    result
}

#[derive(Debug, Clone, Copy)]
pub struct ModifiedPolygonState {
    pub cycle_position: usize,
}

impl ModifiedPolygonState {
    pub fn new(cycle_position: usize) -> Self {
        Self { cycle_position }
    }
}

/// Set of polygons describing the same region as `input` with the outer ring starting at every
/// vertex.
#[derive(Debug, Clone)]
pub struct ModifiedPolygonSet<'a> {
    pub input: &'a Polygon<f64>,
    pub cycle_index_positions: bool,
}

impl<'a> ModifiedPolygonSet<'a> {
    pub fn new(input: &'a Polygon<f64>, cycle_index_positions: bool) -> Self {
        Self {
            input,
            cycle_index_positions,
        }
    }

    pub fn accept_closure<F>(&self, visitor: &mut F)
    where
        F: FnMut(Polygon<f64>, ModifiedPolygonState),
    {
        visitor(self.input.clone(), ModifiedPolygonState::new(0));
        if self.cycle_index_positions {
            for i in 1..self.input.vertex_count() {
                let cycled = cycle_start_index_forward(self.input, i);
                visitor(cycled, ModifiedPolygonState::new(i));
            }
        }
    }
}
