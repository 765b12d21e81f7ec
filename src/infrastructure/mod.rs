//! Infrastructure layer: real I/O boundary implementations

pub mod traits;

pub use traits::{CommandRunner, RealCommandRunner};
