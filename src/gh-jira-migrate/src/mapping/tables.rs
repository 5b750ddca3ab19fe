//! Static classification tables.
//!
//! Declared order is significant: priority and severity are resolved in
//! table order (first matching entry wins), while issue type is resolved
//! in label order. Tables are ordered `(key, value)` slices rather than
//! hash maps so declaration order survives.

/// Label prefix marking squad ownership.
pub const SQUAD_PREFIX: &str = "squad:";

/// Issue type by label, resolved in label order.
const TYPE_TABLE: &[(&str, &str)] = &[
    ("task", "Task"),
    ("bug", "Bug"),
    ("user_story", "Story"),
    ("Epic", "Epic"),
];

/// Type used when no label matches.
const DEFAULT_TYPE: &str = "Task";

/// Priority by label, resolved in table order of precedence.
const PRIORITY_TABLE: &[(&str, &str)] = &[
    ("blocker (P0)", "Blocker"),
    ("Priority/P1", "Critical"),
    ("Priority/P2", "Normal"),
    ("Priority/P3", "Minor"),
];

/// Priority used when no label matches.
const DEFAULT_PRIORITY: &str = "Undefined";

/// Severity by label, resolved in table order. No default: the field is
/// absent when nothing matches.
const SEVERITY_TABLE: &[(&str, &str)] = &[
    ("Severity 1 - Urgent", "Critical"),
    ("Severity 2 - Major", "Moderate"),
    ("Severity 3 - Minor", "Low"),
];

/// Component by squad label.
const COMPONENT_TABLE: &[(&str, &str)] = &[
    ("squad:policy-grc", "GRC"),
    ("squad:doc", "Documentation"),
];

/// A pipeline-to-status rule, with per-issue-type overrides.
struct StatusRule {
    pipeline: &'static str,
    overrides: &'static [(&'static str, &'static str)],
    default: &'static str,
}

/// Destination workflow status by source pipeline name. Untriaged and
/// backlog pipelines are absent on purpose: those issues stay in the
/// creation state.
const STATUS_TABLE: &[StatusRule] = &[
    StatusRule {
        pipeline: "In Progress",
        overrides: &[("Bug", "ASSIGNED")],
        default: "In Progress",
    },
    StatusRule {
        pipeline: "Awaiting Verification",
        overrides: &[("Bug", "ON_QA"), ("Epic", "Testing")],
        default: "Review",
    },
    StatusRule {
        pipeline: "Epics In Progress",
        overrides: &[],
        default: "In Progress",
    },
    StatusRule {
        pipeline: "Ready For Playback",
        overrides: &[("Bug", "ON_QA"), ("Epic", "Testing")],
        default: "Review",
    },
    StatusRule {
        pipeline: "Awaiting Docs",
        overrides: &[],
        default: "In Progress",
    },
    StatusRule {
        pipeline: "Closed",
        overrides: &[],
        default: "Closed",
    },
];

/// Returns the destination issue type for a label set.
///
/// The first label (in label order) found in the type table wins.
pub fn issue_type(labels: &[String]) -> &'static str {
    for label in labels {
        if let Some((_, mapped)) = TYPE_TABLE.iter().find(|(key, _)| key == label) {
            return mapped;
        }
    }
    DEFAULT_TYPE
}

/// Returns the destination priority for a label set.
///
/// Resolution walks the table in declared precedence order and stops at
/// the first entry any label matches, regardless of label order.
pub fn priority(labels: &[String]) -> &'static str {
    for (key, mapped) in PRIORITY_TABLE {
        if labels.iter().any(|label| label == key) {
            return mapped;
        }
    }
    DEFAULT_PRIORITY
}

/// Returns the destination severity for a label set, if any label maps.
pub fn severity(labels: &[String]) -> Option<&'static str> {
    for (key, mapped) in SEVERITY_TABLE {
        if labels.iter().any(|label| label == key) {
            return Some(mapped);
        }
    }
    None
}

/// Returns mapped component names plus the count of squad labels.
///
/// Every `squad:`-prefixed label counts toward the squad count even when
/// it has no component mapping; a count above one marks the issue as
/// owned by multiple squads and therefore non-closeable.
pub fn components(labels: &[String]) -> (Vec<String>, usize) {
    let mut mapped = Vec::new();
    let mut squad_count = 0;

    for label in labels {
        if !label.starts_with(SQUAD_PREFIX) {
            continue;
        }
        squad_count += 1;
        if let Some((_, component)) = COMPONENT_TABLE.iter().find(|(key, _)| key == label) {
            mapped.push((*component).to_string());
        }
    }

    (mapped, squad_count)
}

/// Returns the destination workflow status for a source pipeline name,
/// honoring per-issue-type overrides.
pub fn status_for(pipeline: &str, issue_type: &str) -> Option<&'static str> {
    let rule = STATUS_TABLE.iter().find(|rule| rule.pipeline == pipeline)?;
    Some(
        rule.overrides
            .iter()
            .find(|(kind, _)| *kind == issue_type)
            .map(|(_, status)| *status)
            .unwrap_or(rule.default),
    )
}
