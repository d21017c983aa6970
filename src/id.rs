//! Strongly typed identifiers for network and schedule elements.
//!
//! Every identifier is a cheap-to-clone shared string, so that ids may be
//! copied into filtered networks, paths and lookup maps without reallocating.

use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(id: impl AsRef<str>) -> Self {
                Self(Arc::from(id.as_ref()))
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(Arc::from(value))
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), &self.0)
            }
        }
    };
}

identifier!(
    /// Identifies a [`Node`](crate::network::Node) of a network.
    NodeId
);
identifier!(
    /// Identifies a [`Link`](crate::network::Link) of a network.
    LinkId
);
identifier!(
    /// Identifies a [`RouteShape`](crate::schedule::RouteShape).
    ShapeId
);
identifier!(
    /// Identifies a [`TransitLine`](crate::schedule::TransitLine).
    LineId
);
identifier!(
    /// Identifies a [`TransitRoute`](crate::schedule::TransitRoute) within its line.
    RouteId
);
identifier!(
    /// Identifies a [`StopFacility`](crate::schedule::StopFacility).
    StopId
);
