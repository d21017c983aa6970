use crate::config::TravelCostType;
use crate::network::Link;
use crate::schedule::TransitRouteStop;

use geo::{Distance, Euclidean};

/// Free-flow traversal time of a link.
#[inline]
pub fn link_travel_time(link: &Link) -> f64 {
    link.length / link.freespeed
}

/// The unbiased cost of a link under the given policy.
#[inline]
pub fn base_travel_cost(link: &Link, cost_type: TravelCostType) -> f64 {
    match cost_type {
        TravelCostType::LinkLength => link.length,
        TravelCostType::TravelTime => link_travel_time(link),
    }
}

/// A path-independent lower bound on the cost between two stops.
///
/// Under [`TravelCostType::TravelTime`] this is the scheduled time between
/// leaving `from` and arriving at `to`; an undefined offset counts as no
/// time at all. Under [`TravelCostType::LinkLength`] it is the beeline
/// between both stop facilities.
pub fn minimal_travel_cost(
    from: &TransitRouteStop,
    to: &TransitRouteStop,
    cost_type: TravelCostType,
) -> f64 {
    match cost_type {
        TravelCostType::TravelTime => match (from.departure_offset, to.arrival_offset) {
            (Some(departure), Some(arrival)) => (arrival - departure).max(0.0),
            _ => 0.0,
        },
        TravelCostType::LinkLength => {
            Euclidean.distance(from.facility.position, to.facility.position)
        }
    }
}
