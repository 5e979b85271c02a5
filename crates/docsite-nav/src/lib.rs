//! Navigation sidebar model for Docsite.
//!
//! Provides the declarative sidebar input shape ([`NavDecl`]), the validated
//! tree ([`NavEntry`]), depth-first leaf traversal ([`flatten`]), and link
//! checking ([`validate_links`]).
//!
//! # Architecture
//!
//! Sidebar declarations are authored as nested label/link/items records where
//! the leaf-vs-group distinction is implied by which fields are present.
//! [`build`] converts that duck-typed shape into a tagged [`NavEntry`] tree,
//! collecting every structural problem instead of stopping at the first, so
//! authors can fix a whole sidebar in one pass.
//!
//! # Example
//!
//! ```
//! use docsite_nav::{NavDecl, build, flatten};
//!
//! let decls = vec![
//!     NavDecl::leaf("Welcome", "welcome"),
//!     NavDecl::group(
//!         "Guides",
//!         vec![NavDecl::leaf("Setup", "/guides/setup")],
//!     ),
//! ];
//! let sidebar = build(&decls).unwrap();
//!
//! let leaves: Vec<_> = flatten(&sidebar).collect();
//! assert_eq!(leaves, vec![("welcome", "Welcome"), ("/guides/setup", "Setup")]);
//! ```

mod entry;
mod flatten;
mod links;

pub use entry::{NavDecl, NavEntry, ValidationError, build, to_decls};
pub use flatten::{Leaves, flatten};
pub use links::{LinkReport, LinkWarning, site_path_error, validate_links};
