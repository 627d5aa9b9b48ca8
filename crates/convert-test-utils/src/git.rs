//! Git repository fixtures.

use std::path::Path;

use git2::{IndexAddOption, Oid, Repository, Signature};

/// Initialises a git repository at `path` and commits everything in it.
///
/// The commit is made with `git2` directly so no `git` binary or user
/// configuration is needed.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_all(path: &Path) -> Oid {
    let repo = Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "commit_all: failed to init repository at {}: {e}",
            path.display()
        )
    });

    let mut index = repo
        .index()
        .unwrap_or_else(|e| panic!("commit_all: failed to open index: {e}"));
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .unwrap_or_else(|e| panic!("commit_all: failed to stage files: {e}"));
    index
        .write()
        .unwrap_or_else(|e| panic!("commit_all: failed to write index: {e}"));
    let tree_id = index
        .write_tree()
        .unwrap_or_else(|e| panic!("commit_all: failed to write tree: {e}"));
    let tree = repo
        .find_tree(tree_id)
        .unwrap_or_else(|e| panic!("commit_all: failed to find tree: {e}"));

    let signature = Signature::now("Test User", "test@test.com")
        .unwrap_or_else(|e| panic!("commit_all: failed to build signature: {e}"));
    repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        "Initial commit",
        &tree,
        &[],
    )
    .unwrap_or_else(|e| panic!("commit_all: failed to commit: {e}"))
}
