#![doc = include_str!("../readme.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod config;
#[doc(hidden)]
pub mod error;
pub mod id;
pub mod network;
pub mod route;
pub mod router;
pub mod schedule;
#[doc(hidden)]
pub mod util;


#[doc(inline)]
pub use config::{MappingConfig, TravelCostType};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use network::Network;
#[doc(inline)]
pub use route::{Path, PathCalculator, RouterBundle};
#[doc(inline)]
pub use router::{ModeScheduleRouters, ScheduleRouters, ShapeScheduleRouters};
