//! Mood board composition: aggregate, score, pack.
//!
//! The board is recomputed from scratch on every call. Identical inputs
//! (catalog, profile, clock and tip selector) give an identical board, and
//! `fingerprint` makes that cheap to check across renders.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use super::aggregator::{aggregate, AggregateOptions};
use super::packer::{pack_with, PackLimits, GRID_COLUMNS};
use super::scorer::score_all;
use crate::domain::{ContentKind, PlacedItem, UserContext};
use crate::library::Catalog;

/// Options for composing a board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardOptions {
    #[serde(default)]
    pub aggregate: AggregateOptions,

    #[serde(default)]
    pub limits: PackLimits,
}

/// A composed, render-ready mood board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodBoard {
    /// When the board was computed (input clock)
    pub generated_at: DateTime<Utc>,

    /// Grid width in cells
    pub columns: usize,

    /// Grid height in cells
    pub rows: usize,

    /// Placed cards in feed order
    pub items: Vec<PlacedItem>,
}

impl MoodBoard {
    /// Run the full curation pipeline
    pub fn compose(
        catalog: &Catalog,
        user: &UserContext,
        now: DateTime<Utc>,
        options: &BoardOptions,
    ) -> Result<Self> {
        let candidates = aggregate(catalog, user, now, &options.aggregate);
        let scored = score_all(candidates, user, now);
        let items = pack_with(scored, options.limits)?;

        let rows = items.iter().map(PlacedItem::bottom).max().unwrap_or(0);
        let board = Self {
            generated_at: now,
            columns: GRID_COLUMNS,
            rows,
            items,
        };

        info!(
            items = board.items.len(),
            rows = board.rows,
            fingerprint = %board.fingerprint(),
            "Composed mood board"
        );

        Ok(board)
    }

    /// Nothing to show: the caller renders its empty state
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of cards of one kind
    pub fn count(&self, kind: ContentKind) -> usize {
        self.items.iter().filter(|p| p.item().kind() == kind).count()
    }

    /// Stable layout hash over ids, scores, footprints and positions.
    ///
    /// First 16 hex chars (8 bytes) of SHA-256.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.columns.to_le_bytes());
        for placed in &self.items {
            hasher.update(placed.item().id.as_bytes());
            hasher.update([0u8]);
            hasher.update(placed.score().to_le_bytes());
            hasher.update(placed.footprint.columns.to_le_bytes());
            hasher.update(placed.footprint.rows.to_le_bytes());
            hasher.update(placed.position.row.to_le_bytes());
            hasher.update(placed.position.col.to_le_bytes());
        }
        let result = hasher.finalize();
        hex::encode(&result[..8])
    }

    /// Cell grid of item indices, row-major. `None` marks an empty cell.
    pub fn cell_map(&self) -> Vec<Vec<Option<usize>>> {
        let mut grid = vec![vec![None; self.columns]; self.rows];
        for (index, placed) in self.items.iter().enumerate() {
            for (row, col) in placed.cells() {
                if let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
                    *cell = Some(index);
                }
            }
        }
        grid
    }
}
