//! Least-cost routing over reduced networks.
//!
//! A [`RouterBundle`] couples a filtered network with its [`ShapeCost`]
//! and the [`PathCalculator`] searching it. Bundles are built through the
//! read-through [`BundleCache`], at most once per key.
//!
//! [`ShapeCost`]: costing::ShapeCost
//! [`BundleCache`]: primitives::BundleCache

pub mod bundle;
pub mod costing;
pub mod path;
pub mod primitives;

#[doc(inline)]
pub use bundle::RouterBundle;
#[doc(inline)]
pub use path::{Path, PathCalculator};

#[cfg(test)]
mod test;
