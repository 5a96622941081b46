//! Mood board curation pipeline.
//!
//! This module contains:
//! - Aggregator: merging ranked content sources into one feed
//! - Tips: editorial tip generation and the tip deck
//! - Scorer: relevance scores from user context and content attributes
//! - Packer: first-fit placement into the 4-column grid
//! - Board: the composed pipeline

pub mod aggregator;
pub mod board;
pub mod packer;
pub mod scorer;
pub mod tips;

// Re-export commonly used types
pub use aggregator::{aggregate, late_index, midpoint_index, AggregateOptions};
pub use board::{BoardOptions, MoodBoard};
pub use packer::{pack, pack_with, GridPacker, Occupancy, PackError, PackLimits, GRID_COLUMNS};
pub use scorer::{score, score_all, urgency_boost};
pub use tips::{generate_tips, TipDeck, TipSelector};
