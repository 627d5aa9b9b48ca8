//! Committing a change set to the project directory
//!
//! - **applier**: write adds and modifies, then delete removals
//! - **cleanup**: post-apply removal of files invalidated by a change, and
//!   regeneration of lock files

mod applier;
mod cleanup;

pub use applier::{ApplyReport, SyncApplier};
pub use cleanup::{CleanupRule, LockRefresher, NoopRefresher};
