//! appforge is a starter template generator for web and mobile projects.
//! It stamps out a new project directory from a curated template catalog,
//! applying the user's customization choices along the way.

/// Template catalog loading and the declarative template schema
/// Supports JSON and YAML manifests (templates.json, templates.yml, templates.yaml)
pub mod catalog;

/// Command-line interface module for the appforge application
pub mod cli;

/// Resolving a generation plan from prompts and flags
pub mod collector;

/// Common constants used throughout the application
pub mod constants;

/// Environment file synthesis
/// Gates variables on feature selection and generates unique secrets
pub mod envfile;

/// Error types and handling for the appforge application
pub mod error;

/// Logger configuration
pub mod logger;

/// Core output-tree production
/// Copies and transforms a template's file tree into the output directory
pub mod materializer;

/// User input and interaction handling
pub mod prompt;

/// Completion summary and template listing rendering
pub mod report;
