//! Configuration module for Kakebo
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence
//! - Collaborator backend selection

pub mod paths;
pub mod settings;

pub use paths::KakeboPaths;
pub use settings::{CollaboratorBackend, CollaboratorSettings, Settings};
