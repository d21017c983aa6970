use crate::config::TravelCostType;
use crate::network::Link;
use crate::route::costing::{base_travel_cost, link_travel_time, TravelCost};
use crate::schedule::RouteShape;

use geo::Line;
use std::sync::Arc;

/// Added to the relative distance, such that links on the shape
/// still carry a fraction of their base cost.
pub const SHAPE_FACTOR_OFFSET: f64 = 0.1;

/// The factor applied to links once the linear factor exceeds one.
pub const OFF_SHAPE_PENALTY: f64 = 3.0;

/// Scales the base cost of a link by its distance to the shape.
///
/// ```math
/// factor(d) = d / max_weight_distance + 0.1
/// factor(d) = 3                              if factor(d) > 1
/// ```
///
/// Near the shape the factor grows linearly from `0.1` to `1.0`. Beyond
/// that threshold it jumps to exactly [`OFF_SHAPE_PENALTY`], it is not
/// clamped to one.
#[inline]
pub fn distance_factor(distance: f64, max_weight_distance: f64) -> f64 {
    let factor = distance / max_weight_distance + SHAPE_FACTOR_OFFSET;
    if factor > 1.0 {
        OFF_SHAPE_PENALTY
    } else {
        factor
    }
}

/// Link costing biased towards a reference trajectory.
///
/// Travel time stays physical. The disutility is the base cost of the
/// configured [`TravelCostType`], scaled by [`distance_factor`] when a
/// shape is bound, and left as is otherwise.
#[derive(Debug, Clone)]
pub struct ShapeCost {
    shape: Option<Arc<RouteShape>>,
    cost_type: TravelCostType,
    max_weight_distance: f64,
}

impl ShapeCost {
    pub fn new(shape: Arc<RouteShape>, cost_type: TravelCostType, max_weight_distance: f64) -> Self {
        Self {
            shape: Some(shape),
            cost_type,
            max_weight_distance,
        }
    }

    pub fn unbiased(cost_type: TravelCostType) -> Self {
        Self {
            shape: None,
            cost_type,
            max_weight_distance: 1.0,
        }
    }

    pub fn shape(&self) -> Option<&Arc<RouteShape>> {
        self.shape.as_ref()
    }

    pub fn cost_type(&self) -> TravelCostType {
        self.cost_type
    }

    /// The multiplier applied to the base cost of a link with this geometry.
    pub fn factor(&self, geometry: &Line) -> f64 {
        match &self.shape {
            Some(shape) => {
                distance_factor(shape.distance_to_line(geometry), self.max_weight_distance)
            }
            None => 1.0,
        }
    }
}

impl TravelCost for ShapeCost {
    #[inline]
    fn travel_time(&self, link: &Link) -> f64 {
        link_travel_time(link)
    }

    #[inline]
    fn disutility(&self, link: &Link, geometry: &Line) -> f64 {
        base_travel_cost(link, self.cost_type) * self.factor(geometry)
    }
}
