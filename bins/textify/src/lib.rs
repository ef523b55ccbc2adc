//! Line-oriented text filters: alignment, wrapping and constant naming.
//!
//! Each module is a pure transform over lines; the binaries in `src/bin`
//! only handle flags and stdin/stdout.

pub mod align;
pub mod cli;
pub mod constant;
pub mod wrap;
