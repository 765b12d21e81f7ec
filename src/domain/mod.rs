//! Domain layer: the document tree and the finger module set
//!
//! This layer is independent of external concerns (no I/O, no config
//! loading).

pub mod arena;
pub mod model;

pub use arena::{Document, DocumentNode, TreeIterator};
pub use model::{Attribute, Element, Finger, PREFIX_ATTR, XACRO_NS};
