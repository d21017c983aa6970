use crate::id::{LineId, RouteId, ShapeId, StopId};

use geo::Point;
use indexmap::IndexMap;

/// A physical stop location.
#[derive(Debug, Clone, PartialEq)]
pub struct StopFacility {
    pub id: StopId,
    pub position: Point,
}

impl StopFacility {
    pub fn new(id: impl Into<StopId>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}

/// A stop served by a route, with offsets in seconds from the
/// start of the route. Either offset may be undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitRouteStop {
    pub facility: StopFacility,
    pub arrival_offset: Option<f64>,
    pub departure_offset: Option<f64>,
}

impl TransitRouteStop {
    pub fn new(facility: StopFacility) -> Self {
        Self {
            facility,
            arrival_offset: None,
            departure_offset: None,
        }
    }

    pub fn with_offsets(mut self, arrival: Option<f64>, departure: Option<f64>) -> Self {
        self.arrival_offset = arrival;
        self.departure_offset = departure;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransitRoute {
    pub id: RouteId,

    /// The schedule transport mode, e.g. `bus` or `rail`.
    pub transport_mode: String,

    /// The reference trajectory of the route, when the feed has one.
    pub shape_id: Option<ShapeId>,

    pub stops: Vec<TransitRouteStop>,
}

impl TransitRoute {
    pub fn new(id: impl Into<RouteId>, transport_mode: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            transport_mode: transport_mode.into(),
            shape_id: None,
            stops: Vec::new(),
        }
    }

    pub fn with_shape(mut self, shape_id: impl Into<ShapeId>) -> Self {
        self.shape_id = Some(shape_id.into());
        self
    }

    pub fn with_stops(mut self, stops: Vec<TransitRouteStop>) -> Self {
        self.stops = stops;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransitLine {
    pub id: LineId,
    pub routes: IndexMap<RouteId, TransitRoute>,
}

impl TransitLine {
    pub fn new(id: impl Into<LineId>) -> Self {
        Self {
            id: id.into(),
            routes: IndexMap::new(),
        }
    }

    /// Adds a route, replacing any route with the same id.
    pub fn add_route(&mut self, route: TransitRoute) -> &mut Self {
        self.routes.insert(route.id.clone(), route);
        self
    }
}

/// The set of transit lines to be mapped, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitSchedule {
    pub lines: IndexMap<LineId, TransitLine>,
}

impl TransitSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line, replacing any line with the same id.
    pub fn add_line(&mut self, line: TransitLine) -> &mut Self {
        self.lines.insert(line.id.clone(), line);
        self
    }

    pub fn route(&self, line: &LineId, route: &RouteId) -> Option<&TransitRoute> {
        self.lines.get(line)?.routes.get(route)
    }

    /// Every (line, route) pair of the schedule.
    pub fn routes(&self) -> impl Iterator<Item = (&TransitLine, &TransitRoute)> {
        self.lines
            .values()
            .flat_map(|line| line.routes.values().map(move |route| (line, route)))
    }

    pub fn route_count(&self) -> usize {
        self.lines.values().map(|line| line.routes.len()).sum()
    }
}
