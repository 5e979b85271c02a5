//! Redirect table for Docsite.
//!
//! Holds the `from -> to` path mapping handed to the external renderer, with
//! eager validation of duplicate sources and redirect cycles. Lookup is
//! deliberately single-hop — chain resolution is a separate, bounded
//! operation so a cyclic table can never send a lookup into an infinite loop.
//!
//! # Example
//!
//! ```
//! use docsite_redirects::RedirectTable;
//!
//! let mut table = RedirectTable::new();
//! table.register("/testnet/fast-sync", "/guides/fast-sync").unwrap();
//!
//! assert_eq!(table.resolve("/testnet/fast-sync"), Some("/guides/fast-sync"));
//! assert_eq!(table.resolve("/welcome"), None);
//! ```

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

/// Maximum hops followed by chain resolution before reporting a loop.
pub const MAX_REDIRECT_HOPS: usize = 10;

/// A single source-to-destination redirect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RedirectRule {
    /// Source path being redirected away from.
    pub from: String,
    /// Destination path.
    pub to: String,
}

/// What to do when a rule is registered for an already-mapped source.
///
/// Rejecting is the default: a silent overwrite can hide authoring mistakes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail registration with [`RedirectError::Conflict`].
    #[default]
    Reject,
    /// Replace the existing destination and log a warning.
    Overwrite,
}

/// Redirect validation or resolution failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RedirectError {
    /// A source path was registered twice under the fail-fast policy.
    #[error("duplicate redirect for '{from}': already maps to '{existing}', new rule maps to '{replacement}'")]
    Conflict {
        /// The duplicated source path.
        from: String,
        /// Destination already registered for the source.
        existing: String,
        /// Destination of the rejected rule.
        replacement: String,
    },
    /// Chain resolution exceeded the hop bound.
    #[error("redirect chain starting at '{start}' did not terminate within {hops} hops")]
    Loop {
        /// Path the resolution started from.
        start: String,
        /// Number of hops followed before giving up.
        hops: usize,
    },
    /// A rule path is not a well-formed site-relative path.
    #[error("redirect path '{path}' is invalid: {reason}")]
    InvalidPath {
        /// The offending path.
        path: String,
        /// Why the path was rejected.
        reason: String,
    },
}

/// Ordered `from -> to` redirect mapping.
///
/// Rules are stored in a flat list in registration order with a source-path
/// index for O(1) lookup. The table is built once at validation time and read
/// concurrently afterwards; nothing mutates it post-build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RedirectTable {
    rules: Vec<RedirectRule>,
    index: HashMap<String, usize>,
    policy: DuplicatePolicy,
}

impl RedirectTable {
    /// Create an empty table with the fail-fast duplicate policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with an explicit duplicate policy.
    #[must_use]
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Register a redirect rule.
    ///
    /// Both paths must be well-formed site-relative paths. Registering a
    /// source that already exists fails under [`DuplicatePolicy::Reject`];
    /// under [`DuplicatePolicy::Overwrite`] the destination is replaced in
    /// place and a warning is logged.
    ///
    /// # Errors
    ///
    /// Returns [`RedirectError::InvalidPath`] for malformed paths and
    /// [`RedirectError::Conflict`] for duplicates under the fail-fast policy.
    pub fn register(&mut self, from: &str, to: &str) -> Result<(), RedirectError> {
        require_site_path(from)?;
        require_site_path(to)?;

        if let Some(&pos) = self.index.get(from) {
            match self.policy {
                DuplicatePolicy::Reject => {
                    return Err(RedirectError::Conflict {
                        from: from.to_owned(),
                        existing: self.rules[pos].to.clone(),
                        replacement: to.to_owned(),
                    });
                }
                DuplicatePolicy::Overwrite => {
                    tracing::warn!(
                        from,
                        old = %self.rules[pos].to,
                        new = to,
                        "overwriting duplicate redirect"
                    );
                    self.rules[pos].to = to.to_owned();
                    return Ok(());
                }
            }
        }

        self.index.insert(from.to_owned(), self.rules.len());
        self.rules.push(RedirectRule {
            from: from.to_owned(),
            to: to.to_owned(),
        });
        Ok(())
    }

    /// Look up the destination for a path.
    ///
    /// Single-hop only: with `/a -> /b` and `/b -> /c` registered, resolving
    /// `/a` yields `/b`. Use [`Self::resolve_chain`] to follow chains.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&str> {
        self.index.get(path).map(|&pos| self.rules[pos].to.as_str())
    }

    /// Follow a redirect chain to its final destination.
    ///
    /// Returns `None` when the path has no redirect at all, and the final
    /// destination otherwise. Bounded by `max_hops`; callers normally pass
    /// [`MAX_REDIRECT_HOPS`].
    ///
    /// # Errors
    ///
    /// Returns [`RedirectError::Loop`] when the chain does not terminate
    /// within `max_hops` hops (a cycle, or an excessively long chain).
    pub fn resolve_chain(
        &self,
        path: &str,
        max_hops: usize,
    ) -> Result<Option<String>, RedirectError> {
        let mut current = path;
        let mut hops = 0;
        while let Some(next) = self.resolve(current) {
            hops += 1;
            if hops > max_hops {
                return Err(RedirectError::Loop {
                    start: path.to_owned(),
                    hops: max_hops,
                });
            }
            current = next;
        }
        if hops == 0 {
            Ok(None)
        } else {
            Ok(Some(current.to_owned()))
        }
    }

    /// Report every path that can reach itself by following redirects.
    ///
    /// Treats the table as a directed graph over paths (each node has at most
    /// one outgoing edge). Run once at validation time, not on lookups.
    #[must_use]
    pub fn detect_cycles(&self) -> BTreeSet<String> {
        const UNSEEN: u8 = 0;
        const ON_PATH: u8 = 1;
        const DONE: u8 = 2;

        let mut state: HashMap<&str, u8> = HashMap::with_capacity(self.rules.len());
        let mut cycles = BTreeSet::new();

        for rule in &self.rules {
            if state.get(rule.from.as_str()).copied().unwrap_or(UNSEEN) != UNSEEN {
                continue;
            }

            // Walk the unique outgoing chain from this source.
            let mut path: Vec<&str> = Vec::new();
            let mut current = rule.from.as_str();
            loop {
                match state.get(current).copied().unwrap_or(UNSEEN) {
                    ON_PATH => {
                        // Rejoined the current walk: everything from the first
                        // occurrence of `current` onwards lies on a cycle.
                        let start = path.iter().position(|&p| p == current).unwrap_or(0);
                        for &p in &path[start..] {
                            cycles.insert(p.to_owned());
                        }
                        break;
                    }
                    DONE => break,
                    _ => {}
                }
                state.insert(current, ON_PATH);
                path.push(current);

                match self.resolve(current) {
                    Some(next) if self.index.contains_key(next) => current = next,
                    _ => break,
                }
            }

            for p in path {
                state.insert(p, DONE);
            }
        }

        cycles
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RedirectRule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RedirectTable {
    type Item = &'a RedirectRule;
    type IntoIter = std::slice::Iter<'a, RedirectRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Require a string to be a well-formed site-relative path.
///
/// Same acceptance rule as sidebar links: absolute site paths or bare slugs,
/// no whitespace, no duplicate consecutive slashes.
fn require_site_path(path: &str) -> Result<(), RedirectError> {
    let reason = if path.is_empty() {
        "path is empty"
    } else if path.chars().any(char::is_whitespace) {
        "path contains whitespace"
    } else if path.contains("//") {
        "path contains duplicate consecutive slashes"
    } else {
        return Ok(());
    };
    Err(RedirectError::InvalidPath {
        path: path.to_owned(),
        reason: reason.to_owned(),
    })
}
