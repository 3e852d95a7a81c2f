//! Library side of the `salesdb` binary: logging setup and table rendering.

pub mod logging;
pub mod render;
