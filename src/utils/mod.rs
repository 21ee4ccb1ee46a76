//! Utility functions
//!
//! - Dense matrix CSV loading and saving

pub mod io;
