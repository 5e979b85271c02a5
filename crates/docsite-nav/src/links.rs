//! Link checking for sidebar leaves.
//!
//! Syntax problems are fatal; links missing from the known content path set
//! are reported as warnings only, since navigation and content are authored
//! separately and may drift temporarily.

use std::collections::HashSet;

use crate::entry::{NavEntry, ValidationError};
use crate::flatten::flatten;

/// Non-fatal report of a sidebar link not found in the content path set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkWarning {
    /// The unresolved link as authored.
    pub link: String,
    /// Label of the sidebar entry carrying the link.
    pub label: String,
}

impl std::fmt::Display for LinkWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "sidebar entry '{}' links to '{}' which is not a known content path",
            self.label, self.link
        )
    }
}

/// Outcome of checking every leaf link in a sidebar tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Fatal syntax problems.
    pub errors: Vec<ValidationError>,
    /// Non-fatal unresolved links.
    pub warnings: Vec<LinkWarning>,
}

impl LinkReport {
    /// True when no errors and no warnings were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Check why a string is not a well-formed site-relative path.
///
/// Accepted forms are absolute site paths (`/guides/setup`) and bare slugs
/// (`welcome`, `learn/overview`), optionally with a trailing slash. Returns
/// `None` when the path is acceptable.
#[must_use]
pub fn site_path_error(path: &str) -> Option<&'static str> {
    if path.is_empty() {
        return Some("path is empty");
    }
    if path.chars().any(char::is_whitespace) {
        return Some("path contains whitespace");
    }
    if path.contains("//") {
        return Some("path contains duplicate consecutive slashes");
    }
    None
}

/// Validate every leaf link in a sidebar tree.
///
/// Each link must be a syntactically valid site-relative path. When
/// `known_paths` is provided, links whose normalized form is absent from the
/// set produce [`LinkWarning`]s. Membership is checked with leading and
/// trailing slashes stripped, so `/guide/`, `/guide` and `guide` all refer to
/// the same content path.
#[must_use]
pub fn validate_links(entries: &[NavEntry], known_paths: Option<&HashSet<String>>) -> LinkReport {
    let mut report = LinkReport::default();
    for (link, label) in flatten(entries) {
        if let Some(reason) = site_path_error(link) {
            report.errors.push(ValidationError::InvalidLink {
                location: label.to_owned(),
                link: link.to_owned(),
                reason: reason.to_owned(),
            });
            continue;
        }
        if let Some(known) = known_paths
            && !known.contains(link.trim_matches('/'))
        {
            report.warnings.push(LinkWarning {
                link: link.to_owned(),
                label: label.to_owned(),
            });
        }
    }
    report
}
