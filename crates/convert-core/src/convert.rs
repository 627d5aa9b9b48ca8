//! The conversion pipeline: reconcile, report, confirm, apply
//!
//! [`Converter::plan`] and [`Converter::apply`] never prompt. Callers that
//! want the interactive flow use [`Converter::run`] with a [`Prompt`].

use chrono::Local;

use convert_fs::{NormalizedPath, ProjectPath, io};
use convert_meta::{MetadataOptions, MetadataProvider};

use crate::Result;
use crate::changeset::ChangeSet;
use crate::reconcile::Reconciler;
use crate::report::{Summary, full_report, print_result, print_summary, summarize};
use crate::sink::ReportSink;
use crate::sync::{ApplyReport, LockRefresher, NoopRefresher, SyncApplier};
use crate::template::TemplateRenderer;

/// Timestamp format of the report header.
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Shown before asking for confirmation.
pub const DESTRUCTIVE_WARNING: &str = "Module conversion is a potentially destructive action. \
Ensure that you have committed your module to a version control system or have a backup, \
and review the changes above before continuing.";

/// The confirmation question.
pub const CONFIRM_QUESTION: &str = "Do you want to continue and make these changes to your module?";

/// Options for a conversion run
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Reconcile and report only; never write to the project
    pub noop: bool,
    /// Apply without asking for confirmation
    pub force: bool,
    /// Inputs for generating metadata when none is usable
    pub metadata: MetadataOptions,
}

/// Yes/no confirmation from the user.
pub trait Prompt {
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Reconciled changes for a project, ready to be applied.
#[derive(Debug)]
pub struct ConvertPlan {
    changes: ChangeSet,
    summary: Summary,
    noop: bool,
    force: bool,
    report_path: Option<NormalizedPath>,
}

impl ConvertPlan {
    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn has_changes(&self) -> bool {
        self.changes.has_changes()
    }

    /// Whether [`Converter::apply`] would write anything.
    pub fn is_applicable(&self) -> bool {
        !self.noop && self.has_changes()
    }

    /// Whether the user has to approve the plan before it is applied.
    pub fn requires_confirmation(&self) -> bool {
        self.is_applicable() && !self.force
    }

    /// Where the diff report was written, if one was.
    pub fn report_path(&self) -> Option<&NormalizedPath> {
        self.report_path.as_ref()
    }
}

/// How a [`Converter::run`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertStatus {
    /// The project already matches the template
    NoChanges,
    /// Changes were reported but not applied
    DryRun,
    /// The user did not confirm
    Declined,
    Applied(ApplyReport),
}

/// A plan and what happened to it.
#[derive(Debug)]
pub struct ConvertOutcome {
    pub plan: ConvertPlan,
    pub status: ConvertStatus,
}

/// Converts one project to a template.
pub struct Converter<'a> {
    root: NormalizedPath,
    options: ConvertOptions,
    provider: &'a dyn MetadataProvider,
    applier: SyncApplier,
    refresher: Box<dyn LockRefresher + 'a>,
}

impl<'a> Converter<'a> {
    pub fn new(
        root: impl Into<NormalizedPath>,
        options: ConvertOptions,
        provider: &'a dyn MetadataProvider,
    ) -> Self {
        let root = root.into();
        Self {
            applier: SyncApplier::new(root.clone()),
            root,
            options,
            provider,
            refresher: Box::new(NoopRefresher),
        }
    }

    /// Use `refresher` to regenerate lock files after the `Gemfile` changes.
    pub fn with_refresher(mut self, refresher: impl LockRefresher + 'a) -> Self {
        self.refresher = Box::new(refresher);
        self
    }

    pub fn with_applier(mut self, applier: SyncApplier) -> Self {
        self.applier = applier;
        self
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Reconcile the project against `template` and report the result.
    ///
    /// Outside a dry run, the diffs of modified files are written to
    /// `convert_report.txt` for review. A dry run prints them instead and
    /// leaves the project untouched.
    pub fn plan(
        &self,
        template: &dyn TemplateRenderer,
        sink: &mut dyn ReportSink,
    ) -> Result<ConvertPlan> {
        let reconciler = Reconciler::new(
            &self.root,
            self.provider,
            &self.options.metadata,
            self.options.noop,
        );
        let changes = reconciler.reconcile(template)?;
        let mut plan = ConvertPlan {
            summary: summarize(&changes),
            changes,
            noop: self.options.noop,
            force: self.options.force,
            report_path: None,
        };

        if !plan.has_changes() {
            sink.write_line("No changes required.");
            return Ok(plan);
        }

        print_summary(&plan.summary, sink);

        let timestamp = Local::now().format(REPORT_TIMESTAMP_FORMAT).to_string();
        if let Some(report) = full_report(&plan.changes, &timestamp) {
            if self.options.noop {
                sink.write_line("");
                sink.write_line(&report);
            } else {
                let path = self.root.join(ProjectPath::ConvertReport.as_str());
                io::write_text(&path, &report)?;
                tracing::debug!(path = %path, "Wrote convert report");
                sink.write_line("");
                sink.write_line(&format!(
                    "You can find a report of differences in {}.",
                    ProjectPath::ConvertReport
                ));
                sink.write_line("");
                plan.report_path = Some(path);
            }
        }

        Ok(plan)
    }

    /// Apply a plan, refresh lock files and print the result.
    ///
    /// Returns `None` for plans that are not applicable (dry runs and empty
    /// plans).
    pub fn apply(
        &self,
        plan: &ConvertPlan,
        sink: &mut dyn ReportSink,
    ) -> Result<Option<ApplyReport>> {
        if !plan.is_applicable() {
            return Ok(None);
        }

        let report = match self.applier.apply(&plan.changes) {
            Ok(report) => report,
            Err(err) => {
                sink.write_line("");
                sink.write_line(&format!(
                    "Conversion stopped at {}; {} of {} changes were applied:",
                    err.path,
                    err.applied.len(),
                    plan.changes.len()
                ));
                for path in &err.applied {
                    sink.write_line(path.as_str());
                }
                return Err(err.into());
            }
        };

        if plan.changes.is_changed(ProjectPath::Gemfile.as_str())
            && let Err(err) = self.refresher.refresh(&self.root)
        {
            tracing::warn!(error = %err, "Lock refresh failed");
            sink.write_line(&format!("Unable to refresh Gemfile.lock: {err}"));
        }

        print_result(&plan.summary, sink);
        Ok(Some(report))
    }

    /// Plan, ask for confirmation when required, and apply.
    ///
    /// A declined run applies none of the changes, but the diff report
    /// written by [`Converter::plan`] stays in the project root as
    /// `convert_report.txt`. Dry runs write nothing.
    pub fn run(
        &self,
        template: &dyn TemplateRenderer,
        prompt: &dyn Prompt,
        sink: &mut dyn ReportSink,
    ) -> Result<ConvertOutcome> {
        let plan = self.plan(template, sink)?;

        let status = if !plan.has_changes() {
            ConvertStatus::NoChanges
        } else if !plan.is_applicable() {
            ConvertStatus::DryRun
        } else if plan.requires_confirmation() && !self.confirm(prompt, sink)? {
            ConvertStatus::Declined
        } else {
            match self.apply(&plan, sink)? {
                Some(report) => ConvertStatus::Applied(report),
                None => ConvertStatus::DryRun,
            }
        };

        Ok(ConvertOutcome { plan, status })
    }

    fn confirm(&self, prompt: &dyn Prompt, sink: &mut dyn ReportSink) -> Result<bool> {
        sink.write_line(DESTRUCTIVE_WARNING);
        let confirmed = prompt.confirm(CONFIRM_QUESTION)?;
        if !confirmed {
            tracing::info!(root = %self.root, "Conversion declined");
        }
        Ok(confirmed)
    }
}
