//! moodboard - Personalized cultural-discovery mood board
//!
//! Composes a feed of exhibits, reciprocal membership offers and editorial
//! tips, and lays it out as a gapless 4-column grid.
//!
//! # Architecture
//!
//! The core is a pure pipeline, recomputed on every render:
//! - Aggregate: merge ranked content sources into one ordered feed
//! - Score: integer relevance from the user's interests, memberships and visits
//! - Pack: map scores to card sizes and place them first-fit
//!
//! # Modules
//!
//! - `core`: Curation pipeline (aggregator, tips, scorer, packer, board)
//! - `domain`: Data structures (Exhibit, UserContext, ContentItem, PlacedItem)
//! - `library`: Catalog and profile loading
//! - `detail`: Exhibit detail view model
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Compose the board for today
//! moodboard board --catalog catalog.json --profile profile.json
//!
//! # Inspect one exhibit
//! moodboard show ex-rothko --catalog catalog.json
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod detail;
pub mod domain;
pub mod library;

// Re-export main types at crate root for convenience
pub use core::{BoardOptions, MoodBoard, PackError};
pub use detail::{Badge, ExhibitDetail};
pub use domain::{ContentItem, ContentKind, Exhibit, Footprint, PlacedItem, ScoredItem, UserContext};
pub use library::Catalog;
