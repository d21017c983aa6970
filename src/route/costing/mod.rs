//! Link costing used by the path calculators.
//!
//! A path calculator consumes two capabilities of a link, its physical
//! travel time and the disutility the search minimises. Both are exposed
//! by the [`TravelCost`] trait, implemented by a single value.
//!
//! ```rust
//! use shaperoute::config::TravelCostType;
//! use shaperoute::route::costing::ShapeCost;
//!
//! // Unbiased costing, used when a route has no shape.
//! let costing = ShapeCost::unbiased(TravelCostType::LinkLength);
//! ```
//!
//! ### Default Strategies:
//! - [`ShapeCost`]: base cost scaled by proximity to a shape.

#[doc(hidden)]
pub mod shape;
#[doc(hidden)]
pub mod util;

#[doc(inline)]
pub use shape::*;
#[doc(inline)]
pub use util::*;

use crate::network::Link;
use geo::Line;

pub trait TravelCost {
    /// The physical time taken to traverse the link, in seconds.
    fn travel_time(&self, link: &Link) -> f64;

    /// The cost minimised by the search when traversing the link,
    /// given the straight geometry between its endpoints.
    fn disutility(&self, link: &Link, geometry: &Line) -> f64;
}
