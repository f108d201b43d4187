//! CLI command implementations

mod build;

pub use build::{build, BuildArgs};
