//! Command implementations for the ai-toolkit CLI

pub mod agents;
pub mod completions;
pub mod install;
pub mod version;
