//! Transit schedule primitives consumed by the routers.

pub mod candidate;
pub mod shape;
pub mod transit;

#[doc(inline)]
pub use candidate::LinkCandidate;
#[doc(inline)]
pub use shape::RouteShape;
#[doc(inline)]
pub use transit::*;
