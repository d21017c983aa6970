use crate::id::ShapeId;

use geo::{Distance, Euclidean, Line, LineString, Point};

/// A reference trajectory, the polyline a vehicle was observed
/// (or published) to travel along.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteShape {
    pub id: ShapeId,
    pub coords: LineString,
}

impl RouteShape {
    pub fn new(id: impl Into<ShapeId>, coords: impl Into<LineString>) -> Self {
        Self {
            id: id.into(),
            coords: coords.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.coords.0.is_empty()
    }

    /// The consecutive segments of the shape.
    ///
    /// A single-coordinate shape yields one degenerate segment,
    /// an empty shape yields none.
    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        let single = match self.coords.0.as_slice() {
            [only] => Some(Line::new(*only, *only)),
            _ => None,
        };

        self.coords.lines().chain(single)
    }

    /// Minimum planar distance between the shape and a segment.
    ///
    /// An empty shape is infinitely far from everything.
    pub fn distance_to_line(&self, line: &Line) -> f64 {
        self.segments()
            .map(|segment| Euclidean.distance(&segment, line))
            .fold(f64::INFINITY, f64::min)
    }

    pub fn distance_to_point(&self, point: &Point) -> f64 {
        self.segments()
            .map(|segment| Euclidean.distance(point, &segment))
            .fold(f64::INFINITY, f64::min)
    }
}
