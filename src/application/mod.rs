//! Application layer: pipeline use cases
//!
//! Load → select → detach → stage → flatten → cleanup, each stage
//! synchronous and single-threaded.

pub mod error;
pub mod flatten;
pub mod generate;
pub mod loader;
pub mod prune;
pub mod staging;
pub mod writer;

pub use error::{ApplicationError, ApplicationResult};
pub use flatten::FlattenService;
pub use generate::{GenerateReport, GenerateService};
pub use staging::StagedDocument;
