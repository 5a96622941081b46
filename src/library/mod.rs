//! Read-only inputs: the content catalog and the user profile.
//!
//! # File Layout
//!
//! ```text
//! ~/.moodboard/
//! ├── catalog.json     # exhibits, institutions, reciprocal_benefits
//! └── profile.json     # interests, memberships, visit_history
//! ```

pub mod catalog;
pub mod profile;

pub use catalog::{Catalog, CatalogError};
pub use profile::load_profile;
