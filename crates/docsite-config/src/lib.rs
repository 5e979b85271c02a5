//! Configuration management for Docsite.
//!
//! Parses `docsite.toml` configuration files with serde and assembles the
//! immutable [`SiteConfig`] aggregate handed to the external rendering
//! system: site metadata, theme assets, social links, markdown options,
//! the navigation sidebar, and the redirect table.
//!
//! Validation runs eagerly at build time and accumulates every fatal
//! problem, so authors can fix a whole configuration in one pass instead of
//! replaying the build once per mistake. Unresolved sidebar links are the
//! one non-fatal case: navigation and content are authored separately and
//! may drift, so [`SiteConfig::link_warnings`] reports them without failing.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: `site` and every `social.*` URL.
//!
//! # Example
//!
//! ```
//! use docsite_config::RawConfig;
//!
//! let toml = r#"
//! title = "Docs"
//! site = "https://docs.example.com"
//!
//! [[sidebar]]
//! label = "Welcome"
//! link = "welcome"
//!
//! [redirects]
//! "/old/page" = "/new/page"
//! "#;
//!
//! let config = RawConfig::from_toml_str(toml).unwrap().build().unwrap();
//! assert_eq!(config.title, "Docs");
//! assert_eq!(config.redirects.resolve("/old/page"), Some("/new/page"));
//! ```

mod expand;
mod platform;

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use docsite_nav::{to_decls, validate_links};

pub use docsite_nav::{LinkWarning, NavDecl, NavEntry, ValidationError as NavValidationError};
pub use docsite_redirects::{DuplicatePolicy, RedirectError, RedirectTable};
pub use platform::{ComponentSlot, MathRenderer, SocialPlatform};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "docsite.toml";

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., `social.github`).
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
    /// Accumulated validation problems.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

/// Every fatal validation problem found in one pass over the configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationErrors {
    /// The collected problems, in discovery order.
    pub issues: Vec<ValidationIssue>,
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "configuration has {} problem(s):", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// One fatal validation problem.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    /// A required string field is missing or empty.
    #[error("{field} cannot be empty")]
    EmptyField {
        /// Config field path.
        field: String,
    },
    /// A URL field does not use an http(s) scheme.
    #[error("{field} must start with http:// or https://")]
    InvalidUrl {
        /// Config field path.
        field: String,
    },
    /// A `[social]` key is not a recognized platform.
    #[error("unknown social platform '{key}'")]
    UnknownPlatform {
        /// The unrecognized key.
        key: String,
    },
    /// A `[components]` key is not a recognized UI slot.
    #[error("unknown component slot '{key}'")]
    UnknownComponent {
        /// The unrecognized key.
        key: String,
    },
    /// The `[markdown]` math value is not a recognized renderer.
    #[error("unknown math renderer '{value}'")]
    UnknownMathRenderer {
        /// The unrecognized value.
        value: String,
    },
    /// A heading level is outside `1..=6`.
    #[error("{field} must be between 1 and 6, got {level}")]
    TocRange {
        /// Config field path.
        field: String,
        /// The out-of-range level.
        level: u8,
    },
    /// `toc.min_heading_level` exceeds `toc.max_heading_level`.
    #[error("toc.min_heading_level ({min}) exceeds toc.max_heading_level ({max})")]
    TocBounds {
        /// Configured minimum heading level.
        min: u8,
        /// Configured maximum heading level.
        max: u8,
    },
    /// Structural problem in the sidebar.
    #[error(transparent)]
    Navigation(#[from] NavValidationError),
    /// Invalid or conflicting redirect rule.
    #[error(transparent)]
    Redirect(#[from] RedirectError),
    /// The redirect table contains at least one cycle.
    #[error("redirect cycle detected involving: {}", paths_list(.paths))]
    RedirectCycle {
        /// Every path lying on a cycle.
        paths: BTreeSet<String>,
    },
}

/// Comma-separated path list for cycle error messages.
fn paths_list(paths: &BTreeSet<String>) -> String {
    paths.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Logo asset paths for light and dark themes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    /// Asset path for the light theme.
    pub light: String,
    /// Asset path for the dark theme.
    pub dark: String,
}

/// Table-of-contents heading level bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TocConfig {
    /// Smallest heading level shown.
    pub min_heading_level: u8,
    /// Largest heading level shown.
    pub max_heading_level: u8,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            min_heading_level: 2,
            max_heading_level: 4,
        }
    }
}

/// Markdown pipeline options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarkdownConfig {
    /// Math renderer the external pipeline should enable.
    pub math: MathRenderer,
}

/// A validated social link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SocialLink {
    /// The platform.
    pub platform: SocialPlatform,
    /// Profile URL.
    pub url: String,
}

/// A validated component override.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentOverride {
    /// The UI slot being overridden.
    pub slot: ComponentSlot,
    /// Path of the replacement component file.
    pub path: String,
}

/// Raw markdown options as parsed from TOML.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownRaw {
    /// Math renderer name (`none`, `mathjax`, `katex`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub math: Option<String>,
}

/// Raw table-of-contents bounds as parsed from TOML.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TocRaw {
    /// Smallest heading level shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_heading_level: Option<u8>,
    /// Largest heading level shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heading_level: Option<u8>,
}

/// Raw configuration as parsed from `docsite.toml`.
///
/// All fields are optional or defaulted; [`RawConfig::build`] performs the
/// actual validation and produces the immutable [`SiteConfig`]. This is also
/// the serialization form — [`SiteConfig::to_raw`] maps back to it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// Site title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Site base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    /// Favicon asset path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Custom CSS file paths, applied in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_css: Vec<String>,
    /// Whether previous/next page links are rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<bool>,
    /// Logo asset paths.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
    /// Social links keyed by platform name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub social: BTreeMap<String, String>,
    /// Component overrides keyed by slot name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub components: BTreeMap<String, String>,
    /// Markdown pipeline options.
    #[serde(skip_serializing_if = "markdown_raw_is_default")]
    pub markdown: MarkdownRaw,
    /// Table-of-contents bounds.
    #[serde(skip_serializing_if = "toc_raw_is_default")]
    pub toc: TocRaw,
    /// Sidebar entry declarations, in display order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sidebar: Vec<NavDecl>,
    /// Redirect rules, source path to destination path.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub redirects: BTreeMap<String, String>,
}

fn markdown_raw_is_default(raw: &MarkdownRaw) -> bool {
    *raw == MarkdownRaw::default()
}

fn toc_raw_is_default(raw: &TocRaw) -> bool {
    *raw == TocRaw::default()
}

/// The immutable site configuration handed to the external renderer.
///
/// Constructed once by [`RawConfig::build`], never mutated afterwards. All
/// contained types are plain data without interior mutability, so concurrent
/// read-only validation passes are safe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Site base URL.
    pub site: String,
    /// Favicon asset path.
    pub favicon: Option<String>,
    /// Logo asset paths.
    pub logo: Option<Logo>,
    /// Social links, ordered by platform key.
    pub social: Vec<SocialLink>,
    /// Custom CSS file paths, applied in order.
    pub custom_css: Vec<String>,
    /// Markdown pipeline options.
    pub markdown: MarkdownConfig,
    /// Component overrides, ordered by slot key.
    pub components: Vec<ComponentOverride>,
    /// Table-of-contents bounds.
    pub toc: TocConfig,
    /// Whether previous/next page links are rendered.
    pub pagination: bool,
    /// Validated navigation sidebar.
    pub sidebar: Vec<NavEntry>,
    /// Validated, cycle-free redirect table.
    pub redirects: RedirectTable,
}

impl RawConfig {
    /// Parse a raw configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` on malformed TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a raw configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` or `ConfigError::Parse` on failure.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref site) = self.site {
            self.site = Some(expand::expand_env(site, "site")?);
        }
        for (key, url) in &mut self.social {
            *url = expand::expand_env(url, &format!("social.{key}"))?;
        }
        Ok(())
    }

    /// Validate everything and assemble the immutable [`SiteConfig`].
    ///
    /// Environment variables are expanded first; after that, every fatal
    /// problem is accumulated and reported together rather than one at a
    /// time.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EnvVar` when expansion fails, and
    /// `ConfigError::Validation` carrying every accumulated issue otherwise.
    pub fn build(mut self) -> Result<SiteConfig, ConfigError> {
        self.expand_env_vars()?;
        let mut issues = Vec::new();

        let title = self.title.unwrap_or_default();
        check_non_empty(&title, "title", &mut issues);

        let site = self.site.unwrap_or_default();
        check_non_empty(&site, "site", &mut issues);
        if !site.is_empty() {
            check_http_url(&site, "site", &mut issues);
        }

        if let Some(ref favicon) = self.favicon {
            check_non_empty(favicon, "favicon", &mut issues);
        }
        if let Some(ref logo) = self.logo {
            check_non_empty(&logo.light, "logo.light", &mut issues);
            check_non_empty(&logo.dark, "logo.dark", &mut issues);
        }
        for (i, css) in self.custom_css.iter().enumerate() {
            check_non_empty(css, &format!("custom_css[{i}]"), &mut issues);
        }

        let mut social = Vec::with_capacity(self.social.len());
        for (key, url) in &self.social {
            let field = format!("social.{key}");
            check_http_url(url, &field, &mut issues);
            match SocialPlatform::parse(key) {
                Some(platform) => social.push(SocialLink {
                    platform,
                    url: url.clone(),
                }),
                None => issues.push(ValidationIssue::UnknownPlatform { key: key.clone() }),
            }
        }

        let mut components = Vec::with_capacity(self.components.len());
        for (key, path) in &self.components {
            check_non_empty(path, &format!("components.{key}"), &mut issues);
            match ComponentSlot::parse(key) {
                Some(slot) => components.push(ComponentOverride {
                    slot,
                    path: path.clone(),
                }),
                None => issues.push(ValidationIssue::UnknownComponent { key: key.clone() }),
            }
        }

        let math = match self.markdown.math {
            None => MathRenderer::default(),
            Some(ref value) => MathRenderer::parse(value).unwrap_or_else(|| {
                issues.push(ValidationIssue::UnknownMathRenderer {
                    value: value.clone(),
                });
                MathRenderer::default()
            }),
        };

        let toc = TocConfig {
            min_heading_level: self.toc.min_heading_level.unwrap_or(2),
            max_heading_level: self.toc.max_heading_level.unwrap_or(4),
        };
        for (field, level) in [
            ("toc.min_heading_level", toc.min_heading_level),
            ("toc.max_heading_level", toc.max_heading_level),
        ] {
            if !(1..=6).contains(&level) {
                issues.push(ValidationIssue::TocRange {
                    field: field.to_owned(),
                    level,
                });
            }
        }
        if toc.min_heading_level > toc.max_heading_level {
            issues.push(ValidationIssue::TocBounds {
                min: toc.min_heading_level,
                max: toc.max_heading_level,
            });
        }

        let sidebar = match docsite_nav::build(&self.sidebar) {
            Ok(entries) => entries,
            Err(errors) => {
                issues.extend(errors.into_iter().map(ValidationIssue::from));
                Vec::new()
            }
        };
        let report = validate_links(&sidebar, None);
        issues.extend(report.errors.into_iter().map(ValidationIssue::from));

        let mut redirects = RedirectTable::new();
        for (from, to) in &self.redirects {
            if let Err(e) = redirects.register(from, to) {
                issues.push(ValidationIssue::from(e));
            }
        }
        let cycles = redirects.detect_cycles();
        if !cycles.is_empty() {
            issues.push(ValidationIssue::RedirectCycle { paths: cycles });
        }

        if !issues.is_empty() {
            return Err(ConfigError::Validation(ValidationErrors { issues }));
        }

        Ok(SiteConfig {
            title,
            site,
            favicon: self.favicon,
            logo: self.logo,
            social,
            custom_css: self.custom_css,
            markdown: MarkdownConfig { math },
            components,
            toc,
            pagination: self.pagination.unwrap_or(true),
            sidebar,
            redirects,
        })
    }
}

impl SiteConfig {
    /// Load and build the configuration.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `docsite.toml` in the current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` when an explicit path doesn't exist
    /// or discovery finds nothing, and any [`RawConfig::build`] error
    /// otherwise.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            path.to_path_buf()
        } else {
            Self::discover_config().ok_or_else(|| ConfigError::NotFound(CONFIG_FILENAME.into()))?
        };

        tracing::debug!(path = %path.display(), "loading site configuration");
        RawConfig::load(&path)?.build()
    }

    /// Search for the config file in the current directory and parents.
    #[must_use]
    pub fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Map the built configuration back to its declarative form.
    ///
    /// Rebuilding the result yields a structurally identical configuration:
    /// labels, links, item order, and collapsed flags are all preserved.
    #[must_use]
    pub fn to_raw(&self) -> RawConfig {
        RawConfig {
            title: Some(self.title.clone()),
            site: Some(self.site.clone()),
            favicon: self.favicon.clone(),
            custom_css: self.custom_css.clone(),
            pagination: Some(self.pagination),
            logo: self.logo.clone(),
            social: self
                .social
                .iter()
                .map(|s| (s.platform.as_str().to_owned(), s.url.clone()))
                .collect(),
            components: self
                .components
                .iter()
                .map(|c| (c.slot.as_str().to_owned(), c.path.clone()))
                .collect(),
            markdown: MarkdownRaw {
                math: (self.markdown.math != MathRenderer::None)
                    .then(|| self.markdown.math.as_str().to_owned()),
            },
            toc: TocRaw {
                min_heading_level: Some(self.toc.min_heading_level),
                max_heading_level: Some(self.toc.max_heading_level),
            },
            sidebar: to_decls(&self.sidebar),
            redirects: self
                .redirects
                .iter()
                .map(|r| (r.from.clone(), r.to.clone()))
                .collect(),
        }
    }

    /// Report sidebar links missing from the known content path set.
    ///
    /// Non-fatal: drift between navigation and content is reported via
    /// `tracing` and returned, but never aborts a build.
    #[must_use]
    pub fn link_warnings(&self, known_paths: &HashSet<String>) -> Vec<LinkWarning> {
        let report = validate_links(&self.sidebar, Some(known_paths));
        for warning in &report.warnings {
            tracing::warn!(
                link = %warning.link,
                label = %warning.label,
                "sidebar link not found in content paths"
            );
        }
        report.warnings
    }
}

/// Record an issue when a string field is empty.
fn check_non_empty(value: &str, field: &str, issues: &mut Vec<ValidationIssue>) {
    if value.trim().is_empty() {
        issues.push(ValidationIssue::EmptyField {
            field: field.to_owned(),
        });
    }
}

/// Record an issue when a URL field does not use an http(s) scheme.
fn check_http_url(url: &str, field: &str, issues: &mut Vec<ValidationIssue>) {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        issues.push(ValidationIssue::InvalidUrl {
            field: field.to_owned(),
        });
    }
}
