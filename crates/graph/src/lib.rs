//! Value graphs for the tangle codec.
//!
//! A value is a node in a [`Graph`] arena, addressed by a [`NodeId`]. Containers
//! hold ids rather than nested values, so the same node may be referenced from
//! several places (sharing) or from inside itself (cycles). The id is the node's
//! identity: two slots that hold the same id refer to the same value, while two
//! equal nodes pushed separately are distinct values.

pub mod error;
pub mod graph;
pub mod iso;
pub mod node;
pub mod tag;

pub use error::{GraphError, Result};
pub use graph::Graph;
pub use iso::isomorphic;
pub use node::{Node, NodeId};
pub use tag::TypeTag;
