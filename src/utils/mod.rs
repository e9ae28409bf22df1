//! Helper utilities for transaction replay
//!
//! - [`block_utils`]: block environment construction for batch replay

/// Block environment utilities
pub mod block_utils;
