//! Shared test utilities for the module-convert workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: committed git repositories for template-ref tests
//! - [`project`]: [`TestProject`] builder for a module directory
//! - [`template`]: [`TemplateFixture`] builder for a template source

pub mod git;
pub mod project;
pub mod template;

pub use project::TestProject;
pub use template::TemplateFixture;
