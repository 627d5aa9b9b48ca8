//! Diffing desired module state against what is on disk
//!
//! The [`Reconciler`] reads the project but never writes to it. Everything
//! it finds is registered in a [`ChangeSet`] for the report and the applier.

use serde_json::{Map, Value};

use convert_content::DiffStats;
use convert_fs::{EntryKind, NormalizedPath, ProjectPath, io};
use convert_meta::{MetadataLoad, MetadataOptions, MetadataProvider};

use crate::Result;
use crate::changeset::ChangeSet;
use crate::error::ReconcileError;
use crate::template::TemplateRenderer;

/// Builds the change set for a project.
pub struct Reconciler<'a> {
    root: &'a NormalizedPath,
    provider: &'a dyn MetadataProvider,
    metadata_options: &'a MetadataOptions,
    noop: bool,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler for the project at `root`.
    ///
    /// With `noop` set, records that would have to be generated from scratch
    /// are registered as empty placeholders instead.
    pub fn new(
        root: &'a NormalizedPath,
        provider: &'a dyn MetadataProvider,
        metadata_options: &'a MetadataOptions,
        noop: bool,
    ) -> Self {
        Self {
            root,
            provider,
            metadata_options,
            noop,
        }
    }

    /// Reconcile metadata, then every file the template renders.
    ///
    /// # Errors
    ///
    /// Fails on the first entry that cannot be reconciled, or when the
    /// template or metadata cannot be read.
    pub fn reconcile(&self, template: &dyn TemplateRenderer) -> Result<ChangeSet> {
        let mut changes = ChangeSet::new();
        self.reconcile_metadata(&template.metadata(), &mut changes)?;

        for rendered in template.render()? {
            let rendered = rendered?;
            self.reconcile_file(&rendered.path, &rendered.content, &mut changes)?;
        }

        tracing::info!(
            root = %self.root,
            operations = changes.len(),
            "Reconciliation complete"
        );
        Ok(changes)
    }

    /// Register the merged metadata record.
    ///
    /// An existing record keeps its explicit values, gains missing defaults
    /// and then takes every key from `template_metadata`.
    pub fn reconcile_metadata(
        &self,
        template_metadata: &Map<String, Value>,
        changes: &mut ChangeSet,
    ) -> Result<()> {
        let relative = NormalizedPath::new(ProjectPath::Metadata.as_str());
        let path = self.root.join(relative.as_str());

        let (record, exists) = match self.provider.load(&path)? {
            MetadataLoad::Found(mut record) => {
                record.backfill(&self.provider.defaults());
                (Some(record), true)
            }
            MetadataLoad::Missing => (self.generated_record(), false),
            MetadataLoad::Invalid(err) => {
                tracing::warn!(error = %err, "Regenerating metadata defaults");
                (self.generated_record(), true)
            }
        };

        let Some(mut record) = record else {
            tracing::debug!("Dry run; registering placeholder metadata");
            changes.add_file(relative, "")?;
            return Ok(());
        };

        record.update(template_metadata);
        let content = record.to_json()?;
        if exists {
            let prior = io::read_text_lossy(&path)?;
            changes.modify_file(relative, content, prior)?;
        } else {
            changes.add_file(relative, content)?;
        }
        Ok(())
    }

    /// Register `desired` as the content of the project-relative `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReconcileError`] if something other than a readable
    /// regular file is already at `path`.
    pub fn reconcile_file(
        &self,
        path: &NormalizedPath,
        desired: &str,
        changes: &mut ChangeSet,
    ) -> Result<()> {
        let full_path = self.root.join(path.as_str());
        let kind = io::probe(&full_path).map_err(|source| ReconcileError::Unreadable {
            path: path.clone(),
            source,
        })?;

        match kind {
            EntryKind::Missing => changes.add_file(path, desired)?,
            EntryKind::File => {
                let current = io::read_text_lossy(&full_path).map_err(|source| {
                    ReconcileError::Unreadable {
                        path: path.clone(),
                        source,
                    }
                })?;
                let stats = DiffStats::compute(&current, desired);
                if !stats.is_empty() {
                    tracing::debug!(
                        path = %path,
                        insertions = stats.insertions,
                        deletions = stats.deletions,
                        "File differs from template"
                    );
                }
                changes.modify_file(path, desired, current)?;
            }
            EntryKind::Directory | EntryKind::Other => {
                return Err(ReconcileError::NotAFile { path: path.clone() }.into());
            }
        }
        Ok(())
    }

    fn generated_record(&self) -> Option<convert_meta::MetadataRecord> {
        if self.noop {
            None
        } else {
            Some(self.provider.prepare_defaults(self.metadata_options))
        }
    }
}
