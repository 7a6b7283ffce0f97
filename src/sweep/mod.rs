//! Dist sweep engine: walk, match, delete, report.
//!
//! A sweep makes one pass over the root and a second identical pass over the
//! nested subdirectory, deleting every regular file whose name contains a
//! forbidden fragment. Filesystem failures are recorded in the report and
//! streamed to the observer; `clean` itself never returns an error.

#![allow(missing_docs)]

pub mod patterns;
mod walk;

#[cfg(test)]
mod test_properties;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use self::patterns::ForbiddenSet;
use self::walk::walk_files;
use crate::core::config::Config;

/// What to sweep and how.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Build output directory, typically relative to the working directory.
    pub root: PathBuf,
    /// Child of `root` swept a second time when it exists.
    pub nested_dir: String,
    /// Name fragments that mark a file for removal.
    pub forbidden: ForbiddenSet,
    /// Report without deleting.
    pub dry_run: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("dist"),
            nested_dir: "esm".to_string(),
            forbidden: ForbiddenSet::default(),
            dry_run: false,
        }
    }
}

impl SweepConfig {
    /// Build a sweep config from the loaded application config.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            root: config.cleaner.root_dir.clone(),
            nested_dir: config.cleaner.nested_dir.clone(),
            forbidden: ForbiddenSet::new(&config.patterns.forbidden),
            dry_run: config.cleaner.dry_run,
        }
    }
}

/// Per-file progress, streamed to the observer as the sweep runs.
#[derive(Debug)]
pub enum SweepEvent<'a> {
    /// The root directory does not exist; the sweep is a no-op.
    RootMissing { root: &'a Path },
    /// A walk pass over `root` is starting.
    PassStarted { root: &'a Path },
    /// A file was removed (or would be, under dry-run).
    Removed { path: &'a Path, needle: &'a str },
    /// A deletion attempt failed; the sweep continues.
    Failed { path: &'a Path, error: &'a io::Error },
}

/// One failed deletion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of one sweep invocation.
#[derive(Debug)]
pub struct SweepReport {
    /// Root as configured, not resolved.
    pub root: PathBuf,
    pub root_found: bool,
    pub dry_run: bool,
    /// Paths deleted (or planned under dry-run), in walk order, each at most once.
    pub removed: Vec<PathBuf>,
    pub failures: Vec<SweepFailure>,
    /// Regular files visited across both passes; nested files count twice.
    pub files_scanned: usize,
    pub duration: Duration,
}

impl SweepReport {
    #[must_use]
    pub fn total_removed(&self) -> usize {
        self.removed.len()
    }
}

/// The sweep engine. Construct once, run `clean` per invocation.
#[derive(Debug)]
pub struct Sweeper {
    config: SweepConfig,
}

impl Sweeper {
    #[must_use]
    pub fn new(config: SweepConfig) -> Self {
        Self { config }
    }

    /// Sweep the root and the nested subdirectory, returning what happened.
    ///
    /// Never fails: a missing root yields an empty report with
    /// `root_found == false`, and per-file deletion errors land in
    /// `failures` while the run continues.
    pub fn clean(&self, mut observer: Option<&mut dyn FnMut(&SweepEvent)>) -> SweepReport {
        let started = Instant::now();
        let mut report = SweepReport {
            root: self.config.root.clone(),
            root_found: true,
            dry_run: self.config.dry_run,
            removed: Vec::new(),
            failures: Vec::new(),
            files_scanned: 0,
            duration: Duration::ZERO,
        };

        // exists(), not is_dir(): a root that is a plain file still counts as
        // found and simply yields an empty walk.
        if !self.config.root.exists() {
            report.root_found = false;
            emit(
                &mut observer,
                &SweepEvent::RootMissing {
                    root: &self.config.root,
                },
            );
            report.duration = started.elapsed();
            return report;
        }

        self.sweep_pass(&self.config.root, &mut report, &mut observer);

        let nested = self.config.root.join(&self.config.nested_dir);
        if nested.exists() {
            self.sweep_pass(&nested, &mut report, &mut observer);
        }

        report.duration = started.elapsed();
        report
    }

    fn sweep_pass(
        &self,
        pass_root: &Path,
        report: &mut SweepReport,
        observer: &mut Option<&mut dyn FnMut(&SweepEvent)>,
    ) {
        emit(observer, &SweepEvent::PassStarted { root: pass_root });

        let forbidden = &self.config.forbidden;
        let dry_run = self.config.dry_run;

        walk_files(pass_root, |path| {
            report.files_scanned += 1;

            let Some(file_name) = path.file_name() else {
                return;
            };
            let Some(needle) = forbidden.matched_needle(file_name) else {
                return;
            };

            if dry_run {
                // Nothing is deleted, so the nested pass lists the same
                // files again; dedupe to keep the plan honest.
                if !report.removed.iter().any(|seen| seen == path) {
                    report.removed.push(path.to_path_buf());
                    emit(observer, &SweepEvent::Removed { path, needle });
                }
                return;
            }

            match fs::remove_file(path) {
                Ok(()) => {
                    report.removed.push(path.to_path_buf());
                    emit(observer, &SweepEvent::Removed { path, needle });
                }
                Err(error) => {
                    emit(observer, &SweepEvent::Failed { path, error: &error });
                    report.failures.push(SweepFailure {
                        path: path.to_path_buf(),
                        error: error.to_string(),
                    });
                }
            }
        });
    }
}

fn emit(observer: &mut Option<&mut dyn FnMut(&SweepEvent)>, event: &SweepEvent) {
    if let Some(callback) = observer.as_mut() {
        callback(event);
    }
}
