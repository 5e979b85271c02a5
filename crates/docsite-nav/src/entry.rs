//! Sidebar entry declarations and the validated navigation tree.
//!
//! [`NavDecl`] is the serde-facing input shape where leaf-vs-group is implied
//! by which optional fields are present. [`build`] turns declarations into
//! the tagged [`NavEntry`] tree, making the distinction structural.

use serde::{Deserialize, Serialize};

/// A sidebar entry as authored in the configuration file.
///
/// The shape is duck-typed: a leaf has `link`, a group has `items`. This is
/// also the serialization form — [`to_decls`] maps a validated tree back to
/// exactly this shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavDecl {
    /// Display label shown in the sidebar.
    #[serde(default)]
    pub label: String,
    /// Link target path (leaf entries).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Render the group collapsed initially. UI hint only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Child entries (group entries).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<NavDecl>>,
}

impl NavDecl {
    /// Create a leaf declaration.
    #[must_use]
    pub fn leaf(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: Some(link.into()),
            ..Self::default()
        }
    }

    /// Create a group declaration.
    #[must_use]
    pub fn group(label: impl Into<String>, items: Vec<NavDecl>) -> Self {
        Self {
            label: label.into(),
            items: Some(items),
            ..Self::default()
        }
    }

    /// Create a collapsed group declaration.
    #[must_use]
    pub fn collapsed_group(label: impl Into<String>, items: Vec<NavDecl>) -> Self {
        Self {
            label: label.into(),
            items: Some(items),
            collapsed: Some(true),
            ..Self::default()
        }
    }
}

/// A validated node in the sidebar tree.
///
/// Every entry is either a leaf with a link or a group with children; the
/// enum makes that invariant structural rather than a runtime shape check.
/// Child order is declaration order and is preserved exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavEntry {
    /// Entry linking directly to a page.
    Leaf {
        /// Display label.
        label: String,
        /// Site-relative link target.
        link: String,
    },
    /// Entry containing child entries.
    Group {
        /// Display label.
        label: String,
        /// Ordered child entries.
        items: Vec<NavEntry>,
        /// Render collapsed initially.
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        collapsed: bool,
    },
}

impl NavEntry {
    /// Display label of this entry.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf { label, .. } | Self::Group { label, .. } => label,
        }
    }

    /// True for leaf entries.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }
}

/// Structural problem in a sidebar declaration or a leaf link.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Entry label is missing or empty.
    #[error("sidebar entry at '{location}': label is missing or empty")]
    EmptyLabel {
        /// Label path of the entry (parent labels joined with ` > `).
        location: String,
    },
    /// Entry has neither `link` nor `items`.
    #[error("sidebar entry '{location}' has neither link nor items")]
    EmptyEntry {
        /// Label path of the entry.
        location: String,
    },
    /// Entry has both `link` and non-empty `items`.
    #[error("sidebar entry '{location}' has both link and items")]
    AmbiguousEntry {
        /// Label path of the entry.
        location: String,
    },
    /// Leaf link is not a well-formed site-relative path.
    #[error("sidebar entry '{location}': invalid link '{link}': {reason}")]
    InvalidLink {
        /// Label path of the entry.
        location: String,
        /// The offending link value.
        link: String,
        /// Why the link was rejected.
        reason: String,
    },
}

/// Build the validated sidebar tree from declarations.
///
/// Recursively constructs [`NavEntry`] nodes, preserving declaration order.
/// All structural problems are collected; a declaration with both `link` and
/// non-empty `items`, or with neither, fails the build.
///
/// # Errors
///
/// Returns every [`ValidationError`] found anywhere in the declarations.
pub fn build(decls: &[NavDecl]) -> Result<Vec<NavEntry>, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let entries = build_level(decls, "", &mut errors);
    if errors.is_empty() {
        Ok(entries)
    } else {
        Err(errors)
    }
}

/// Build one nesting level, appending problems to `errors`.
///
/// Malformed entries are skipped so sibling and child errors are still
/// discovered in the same pass.
fn build_level(decls: &[NavDecl], parent: &str, errors: &mut Vec<ValidationError>) -> Vec<NavEntry> {
    let mut entries = Vec::with_capacity(decls.len());
    for (i, decl) in decls.iter().enumerate() {
        let location = locate(parent, &decl.label, i);

        if decl.label.trim().is_empty() {
            errors.push(ValidationError::EmptyLabel {
                location: location.clone(),
            });
        }

        let has_items = decl.items.as_ref().is_some_and(|items| !items.is_empty());
        match (&decl.link, &decl.items) {
            (Some(link), _) if !has_items => {
                entries.push(NavEntry::Leaf {
                    label: decl.label.clone(),
                    link: link.clone(),
                });
            }
            (Some(_), _) => {
                errors.push(ValidationError::AmbiguousEntry { location });
            }
            (None, Some(items)) => {
                let children = build_level(items, &location, errors);
                entries.push(NavEntry::Group {
                    label: decl.label.clone(),
                    items: children,
                    collapsed: decl.collapsed.unwrap_or(false),
                });
            }
            (None, None) => {
                errors.push(ValidationError::EmptyEntry { location });
            }
        }
    }
    entries
}

/// Label path for error messages, e.g. `Learn > Protocol > Overview`.
///
/// Entries without a label are identified by their position.
fn locate(parent: &str, label: &str, index: usize) -> String {
    let name = if label.trim().is_empty() {
        format!("#{index}")
    } else {
        label.to_owned()
    };
    if parent.is_empty() {
        name
    } else {
        format!("{parent} > {name}")
    }
}

/// Map a validated tree back to its declaration shape.
///
/// Inverse of [`build`]: leaves never carry `items`, groups never carry
/// `link`, and `collapsed` is emitted only when set, matching authored form.
#[must_use]
pub fn to_decls(entries: &[NavEntry]) -> Vec<NavDecl> {
    entries
        .iter()
        .map(|entry| match entry {
            NavEntry::Leaf { label, link } => NavDecl::leaf(label.clone(), link.clone()),
            NavEntry::Group {
                label,
                items,
                collapsed,
            } => NavDecl {
                label: label.clone(),
                link: None,
                items: Some(to_decls(items)),
                collapsed: collapsed.then_some(true),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_build_leaf() {
        let decls = vec![NavDecl::leaf("Welcome", "welcome")];

        let entries = build(&decls).unwrap();

        assert_eq!(
            entries,
            vec![NavEntry::Leaf {
                label: "Welcome".to_owned(),
                link: "welcome".to_owned(),
            }]
        );
    }

    #[test]
    fn test_build_nested_groups_preserve_order() {
        let decls = vec![
            NavDecl::leaf("Welcome", "welcome"),
            NavDecl::group(
                "Learn",
                vec![
                    NavDecl::leaf("Overview", "learn/overview"),
                    NavDecl::collapsed_group(
                        "Models",
                        vec![
                            NavDecl::leaf("First", "learn/models/first"),
                            NavDecl::leaf("Second", "learn/models/second"),
                        ],
                    ),
                ],
            ),
        ];

        let entries = build(&decls).unwrap();

        assert_eq!(entries.len(), 2);
        let NavEntry::Group { items, collapsed, .. } = &entries[1] else {
            panic!("expected group");
        };
        assert!(!collapsed);
        assert_eq!(items[0].label(), "Overview");
        let NavEntry::Group { items: models, collapsed, .. } = &items[1] else {
            panic!("expected nested group");
        };
        assert!(collapsed);
        assert_eq!(models[0].label(), "First");
        assert_eq!(models[1].label(), "Second");
    }

    #[test]
    fn test_build_empty_label_fails() {
        let decls = vec![NavDecl::leaf("", "welcome")];

        let errors = build(&decls).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::EmptyLabel { .. }));
    }

    #[test]
    fn test_build_neither_link_nor_items_fails() {
        let decls = vec![NavDecl {
            label: "Dangling".to_owned(),
            ..NavDecl::default()
        }];

        let errors = build(&decls).unwrap_err();

        assert_eq!(
            errors,
            vec![ValidationError::EmptyEntry {
                location: "Dangling".to_owned(),
            }]
        );
    }

    #[test]
    fn test_build_both_link_and_items_fails() {
        let decls = vec![NavDecl {
            label: "Ambiguous".to_owned(),
            link: Some("somewhere".to_owned()),
            items: Some(vec![NavDecl::leaf("Child", "child")]),
            collapsed: None,
        }];

        let errors = build(&decls).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::AmbiguousEntry { .. }));
    }

    #[test]
    fn test_build_link_with_empty_items_is_leaf() {
        // An empty items list carries no children; treat the entry as a leaf.
        let decls = vec![NavDecl {
            label: "Page".to_owned(),
            link: Some("page".to_owned()),
            items: Some(Vec::new()),
            collapsed: None,
        }];

        let entries = build(&decls).unwrap();

        assert!(entries[0].is_leaf());
    }

    #[test]
    fn test_build_collects_all_errors() {
        let decls = vec![
            NavDecl::leaf("", "first"),
            NavDecl::group(
                "Group",
                vec![NavDecl {
                    label: "Inner".to_owned(),
                    ..NavDecl::default()
                }],
            ),
            NavDecl {
                label: String::new(),
                ..NavDecl::default()
            },
        ];

        let errors = build(&decls).unwrap_err();

        // Empty label, empty nested entry, and empty label plus empty entry
        // on the last declaration.
        assert_eq!(errors.len(), 4);
        assert!(
            errors
                .iter()
                .any(|e| matches!(e, ValidationError::EmptyEntry { location } if location == "Group > Inner"))
        );
    }

    #[test]
    fn test_error_location_uses_index_for_unlabeled() {
        let decls = vec![
            NavDecl::leaf("First", "first"),
            NavDecl {
                label: String::new(),
                ..NavDecl::default()
            },
        ];

        let errors = build(&decls).unwrap_err();

        assert!(
            errors
                .iter()
                .any(|e| matches!(e, ValidationError::EmptyEntry { location } if location == "#1"))
        );
    }

    #[test]
    fn test_to_decls_round_trip() {
        let decls = vec![
            NavDecl::leaf("Welcome", "welcome"),
            NavDecl::collapsed_group(
                "Learn",
                vec![
                    NavDecl::leaf("Overview", "learn/overview"),
                    NavDecl::group("Deep", vec![NavDecl::leaf("Nested", "learn/deep/nested")]),
                ],
            ),
        ];

        let entries = build(&decls).unwrap();
        let rebuilt = build(&to_decls(&entries)).unwrap();

        assert_eq!(entries, rebuilt);
    }

    #[test]
    fn test_to_decls_leaf_omits_items_and_collapsed() {
        let entries = vec![NavEntry::Leaf {
            label: "Welcome".to_owned(),
            link: "welcome".to_owned(),
        }];

        let decls = to_decls(&entries);

        assert_eq!(decls[0].items, None);
        assert_eq!(decls[0].collapsed, None);
    }

    #[test]
    fn test_decl_serialization_skips_absent_fields() {
        let decl = NavDecl::leaf("Welcome", "welcome");

        let json = serde_json::to_value(&decl).unwrap();

        assert_eq!(json["label"], "Welcome");
        assert_eq!(json["link"], "welcome");
        assert!(json.get("items").is_none());
        assert!(json.get("collapsed").is_none());
    }

    #[test]
    fn test_entry_serialization_matches_declared_shape() {
        let entries = vec![NavEntry::Group {
            label: "Learn".to_owned(),
            items: vec![NavEntry::Leaf {
                label: "Overview".to_owned(),
                link: "learn/overview".to_owned(),
            }],
            collapsed: true,
        }];

        let json = serde_json::to_value(&entries).unwrap();

        assert_eq!(json[0]["label"], "Learn");
        assert_eq!(json[0]["collapsed"], true);
        assert_eq!(json[0]["items"][0]["link"], "learn/overview");
        assert!(json[0].get("link").is_none());
    }

    #[test]
    fn test_entry_serialization_skips_collapsed_false() {
        let entry = NavEntry::Group {
            label: "Learn".to_owned(),
            items: Vec::new(),
            collapsed: false,
        };

        let json = serde_json::to_value(&entry).unwrap();

        assert!(json.get("collapsed").is_none());
    }

    #[test]
    fn test_decl_deserialization_from_json() {
        let json = r#"[
            {"label": "Welcome", "link": "welcome"},
            {"label": "Learn", "collapsed": true, "items": [
                {"label": "Overview", "link": "learn/overview"}
            ]}
        ]"#;

        let decls: Vec<NavDecl> = serde_json::from_str(json).unwrap();
        let entries = build(&decls).unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_leaf());
        assert!(!entries[1].is_leaf());
    }
}
