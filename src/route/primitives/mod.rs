pub mod astar;
pub use astar::*;

pub mod cache;
pub use cache::*;

pub mod cost;
pub use cost::PathCost;
