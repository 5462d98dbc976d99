use super::model::{Bounds, Point, PointSet};

// ---------------------------------------------------------------------------
// Nearest-point index
// ---------------------------------------------------------------------------

/// Result of a successful nearest-point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest<'a> {
    /// Row index of the point in the held point set.
    pub index: usize,
    pub point: &'a Point,
    /// Squared Euclidean distance to the query.
    pub distance_sq: f64,
}

/// Holds the current point set and answers "which point is closest?".
///
/// The lookup is a plain linear scan; data sets here are at most a few
/// thousand points.
#[derive(Debug, Clone, Default)]
pub enum PointIndex {
    /// Nothing built yet.
    #[default]
    Empty,
    Ready { points: PointSet, bounds: Bounds },
}

impl PointIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held points wholesale and return their padded bounds.
    pub fn build(&mut self, points: PointSet) -> Bounds {
        let bounds = Bounds::of(&points);
        *self = PointIndex::Ready { points, bounds };
        bounds
    }

    /// The held points (empty before the first build).
    pub fn points(&self) -> &[Point] {
        match self {
            PointIndex::Empty => &[],
            PointIndex::Ready { points, .. } => points,
        }
    }

    /// Bounds of the held points; the unit envelope before the first build.
    pub fn bounds(&self) -> Bounds {
        match self {
            PointIndex::Empty => Bounds::default(),
            PointIndex::Ready { bounds, .. } => *bounds,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, PointIndex::Ready { .. })
    }

    /// Point with the smallest squared distance to (`qx`, `qy`).
    ///
    /// Ties go to the lowest row index. Returns `None` when no point is held
    /// or the query coordinate is not finite.
    pub fn nearest(&self, qx: f64, qy: f64) -> Option<Nearest<'_>> {
        if !(qx.is_finite() && qy.is_finite()) {
            return None;
        }
        let mut best: Option<Nearest<'_>> = None;
        for (index, point) in self.points().iter().enumerate() {
            let distance_sq = point.distance_sq(qx, qy);
            // Strictly smaller only: the first of equidistant points wins.
            if best.map_or(true, |b| distance_sq < b.distance_sq) {
                best = Some(Nearest {
                    index,
                    point,
                    distance_sq,
                });
            }
        }
        best
    }
}
