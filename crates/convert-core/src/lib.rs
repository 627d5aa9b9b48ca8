//! Conversion engine for module-convert
//!
//! Brings an existing module in line with a template:
//!
//! - **Reconciler**: compares rendered template files and merged metadata
//!   with the project on disk
//! - **ChangeSet**: pending adds, modifies and removes, one per path
//! - **Report**: summaries, banners and the diff report
//! - **SyncApplier**: writes the change set and runs cleanup rules
//!
//! # Architecture
//!
//! ```text
//!                 convert-cli
//!                      |
//!                 convert-core
//!                      |
//!        +-------------+-------------+
//!        |             |             |
//!   convert-fs  convert-content  convert-meta
//! ```

pub mod changeset;
pub mod config;
pub mod convert;
pub mod error;
pub mod reconcile;
pub mod report;
pub mod sink;
pub mod sync;
pub mod template;

pub use changeset::{ChangeSet, Changes, Operation, OperationKind};
pub use config::ConvertConfig;
pub use convert::{
    ConvertOptions, ConvertOutcome, ConvertPlan, ConvertStatus, Converter, Prompt,
};
pub use error::{ApplyError, ConflictError, Error, ReconcileError, Result, TemplateError};
pub use reconcile::Reconciler;
pub use report::{Summary, full_report, generate_banner, print_result, print_summary, summarize};
pub use sink::{BufferSink, ReportSink, WriterSink};
pub use sync::{ApplyReport, CleanupRule, LockRefresher, NoopRefresher, SyncApplier};
pub use template::{DirectoryTemplate, RenderedFile, TemplateRenderer};
