//! Visitors drive a supplied function over an externally enumerated
//! domain, counting affected entries.
//!
//! Each visitor drains its domain within a single `resume` call rather
//! than chunking internally; pacing for very large edits is provided a
//! level up by [`OperationQueue`](crate::operation::OperationQueue) and
//! [`IncrementalDriver`](crate::operation::IncrementalDriver).

pub mod region;
pub mod flat_region;
pub mod layer;
pub mod entity;

pub use region::RegionVisitor;
pub use flat_region::{ColumnFunction, FlatRegionVisitor};
pub use layer::{LayerFunction, LayerVisitor};
pub use entity::{EntityFunction, EntityVisitor};
