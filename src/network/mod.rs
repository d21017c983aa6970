//! The multimodal network the schedule is mapped onto, and the pure
//! reductions applied to it before routing: a filter by allowed modes
//! and a hard spatial cut around a route shape.

pub mod buffer;
pub mod filter;
pub mod item;

#[doc(inline)]
pub use item::*;

use crate::id::{LinkId, NodeId};

#[derive(thiserror::Error, Debug)]
pub enum NetworkError {
    #[error("node {0} already exists")]
    DuplicateNode(NodeId),

    #[error("link {0} already exists")]
    DuplicateLink(LinkId),

    #[error("link {0} references unknown node {1}")]
    UnknownNode(LinkId, NodeId),

    #[error("link {0} has invalid length {1}")]
    InvalidLength(LinkId, f64),

    #[error("link {0} has invalid free speed {1}")]
    InvalidFreespeed(LinkId, f64),
}
