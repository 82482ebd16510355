//! Domain models for ai-toolkit
//!
//! Pure data types shared by the source layer, the installer and the UI.

pub mod install;
pub mod resource;

pub use install::{
    CompareChoice, DuplicateAction, InstallAction, InstallRequest, InstallResult, Scope,
};
pub use resource::{Resource, ResourceMetadata, ResourceType, SiblingFile};
