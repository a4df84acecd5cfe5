//! Boundary regions and containment

use geo::{Intersects, MultiPolygon, Point, Polygon};

/// One approved area for a subject, as carried in the API response
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryRegion {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl BoundaryRegion {
    /// Boundary-inclusive containment: a point on the edge counts as inside.
    pub fn covers(&self, point: &Point<f64>) -> bool {
        match self {
            BoundaryRegion::Polygon(polygon) => polygon.intersects(point),
            BoundaryRegion::MultiPolygon(multi) => multi.intersects(point),
        }
    }
}

/// True iff `point` is contained in or touches at least one region.
///
/// An empty region set never contains anything. Pure; inputs are untouched.
pub fn is_inside(point: &Point<f64>, boundaries: &[BoundaryRegion]) -> bool {
    boundaries.iter().any(|region| region.covers(point))
}
