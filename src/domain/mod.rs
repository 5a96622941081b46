//! Domain types for the mood board.
//!
//! This module contains the core data structures:
//! - Exhibit, Institution, ReciprocalBenefit: catalog records
//! - UserContext: interests, memberships and visit history
//! - ContentItem, ScoredItem, PlacedItem: pipeline stages of a card

pub mod content;
pub mod exhibit;
pub mod profile;

// Re-export commonly used types
pub use content::{
    Content, ContentItem, ContentKind, Footprint, GridPosition, PlacedItem, ScoredItem, Tip,
    TipCategory, TipKind,
};
pub use exhibit::{Exhibit, FreeAccessDetails, Hours, Institution, Location, ReciprocalBenefit};
pub use profile::{Membership, UserContext, Visit};
