//! Run summary accumulation.

use super::result::MigrationResult;
use std::collections::BTreeMap;

/// Summary of a complete migration run.
///
/// Every fetched candidate ends up either migrated, planned (dry run),
/// in the failure list, or in the duplicate map. Nothing is silently
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of source issues fetched and mapped.
    pub issues_mapped: usize,

    /// Number of destination issues created.
    pub issues_migrated: usize,

    /// Number of mappings previewed in dry-run mode.
    pub issues_planned: usize,

    /// Source URLs that failed to migrate.
    pub failed: Vec<String>,

    /// Source URL to existing destination keys, for skipped duplicates.
    pub duplicates: BTreeMap<String, Vec<String>>,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Records a per-issue outcome.
    pub fn record(&mut self, result: &MigrationResult) {
        match result {
            MigrationResult::Migrated { .. } => self.issues_migrated += 1,
            MigrationResult::Planned { .. } => self.issues_planned += 1,
            MigrationResult::SkippedDuplicate { source_url, keys } => {
                self.duplicates.insert(source_url.clone(), keys.clone());
            }
            MigrationResult::Failed { source_url, .. } => {
                self.failed.push(source_url.clone());
            }
        }
    }

    /// Returns true if any per-issue failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_each_outcome_kind() {
        let mut summary = RunSummary::new(false);

        summary.record(&MigrationResult::Migrated {
            source_url: "https://github.com/o/r/issues/1".to_string(),
            key: "WAL-1".to_string(),
        });
        summary.record(&MigrationResult::Failed {
            source_url: "https://github.com/o/r/issues/2".to_string(),
            error: "no key returned".to_string(),
        });
        summary.record(&MigrationResult::SkippedDuplicate {
            source_url: "https://github.com/o/r/issues/3".to_string(),
            keys: vec!["WAL-9".to_string()],
        });

        assert_eq!(summary.issues_migrated, 1);
        assert_eq!(summary.failed, vec!["https://github.com/o/r/issues/2"]);
        assert_eq!(
            summary.duplicates["https://github.com/o/r/issues/3"],
            vec!["WAL-9"]
        );
        assert!(summary.has_failures());
    }

    #[test]
    fn clean_run_has_no_failures() {
        let mut summary = RunSummary::new(true);
        summary.record(&MigrationResult::Planned {
            source_url: "https://github.com/o/r/issues/1".to_string(),
        });

        assert_eq!(summary.issues_planned, 1);
        assert!(!summary.has_failures());
    }
}
