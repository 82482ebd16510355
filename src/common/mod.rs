//! Shared helpers for file system work

pub mod fs;
