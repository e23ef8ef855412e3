//! Keep the Go toolchain version declared in `go.mod` files and `golang`
//! base images in sync with the latest stable Go release.

pub mod agents;
pub mod cli;
pub mod config;
pub mod error;
pub mod golang;
pub mod logging;
pub mod utils;
pub mod workflow;
