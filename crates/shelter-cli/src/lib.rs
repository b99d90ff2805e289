//! Library side of the `shelter` binary: logging setup and the staged run.

pub mod logging;
pub mod pipeline;
pub mod types;
