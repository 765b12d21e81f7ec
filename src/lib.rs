//! handgen: generate a hand robot URDF from a parametric xacro description
//!
//! Pipeline: load the xacro document into an arena tree, detach the
//! subtrees of excluded finger modules (identified by the
//! `<finger>_module` prefix convention on the `xacro:prefix`/`prefix`
//! attribute), stage the edited tree to a temporary file, invoke the
//! external flattening tool, and clean the staged artifact up on every
//! exit path.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
