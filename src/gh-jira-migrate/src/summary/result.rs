//! Per-issue migration outcomes.

/// Terminal outcome of migrating a single source issue.
#[derive(Debug, Clone)]
pub enum MigrationResult {
    /// The destination issue was created and the source updated.
    Migrated {
        /// Source issue URL.
        source_url: String,
        /// Created destination issue key.
        key: String,
    },

    /// Dry run: the mapping was built and reported, nothing mutated.
    Planned {
        /// Source issue URL.
        source_url: String,
    },

    /// A destination issue already linked to this source URL exists.
    SkippedDuplicate {
        /// Source issue URL.
        source_url: String,
        /// Keys of the existing destination issues.
        keys: Vec<String>,
    },

    /// Migration of this issue failed; the run continued.
    Failed {
        /// Source issue URL.
        source_url: String,
        /// Error message.
        error: String,
    },
}
