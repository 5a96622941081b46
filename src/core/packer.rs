//! First-fit grid packing.
//!
//! Places scored cards into a fixed-width, unbounded-height grid. Each card
//! gets the top-left-most origin where its whole footprint is free, scanning
//! rows from the top and columns left to right. Cards are placed in arrival
//! order; nothing is reordered after scoring.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::domain::{Footprint, GridPosition, PlacedItem, ScoredItem};

/// Logical columns of the mood board grid
pub const GRID_COLUMNS: usize = 4;

/// Packer settings. The grid width is always `GRID_COLUMNS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackLimits {
    /// Rows the packer may grow to before giving up
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

fn default_max_rows() -> usize {
    4096
}

impl Default for PackLimits {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
        }
    }
}

/// Packing defects. Any of these means a card could not be placed without
/// overlapping another, so the whole layout is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("Item {id} is {columns} columns wide but the grid has {grid_columns}")]
    FootprintTooWide {
        id: String,
        columns: usize,
        grid_columns: usize,
    },

    #[error("No free position for item {id} within {max_rows} rows")]
    RowLimitExceeded { id: String, max_rows: usize },
}

/// Sparse set of occupied cells
#[derive(Debug, Default)]
pub struct Occupancy {
    cells: HashSet<(usize, usize)>,

    /// One past the lowest occupied row
    height: usize,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&(row, col))
    }

    /// Whether `footprint` fits with its top-left corner at `origin`
    pub fn fits(&self, footprint: Footprint, origin: GridPosition) -> bool {
        footprint
            .cells(origin)
            .all(|(row, col)| !self.is_occupied(row, col))
    }

    pub fn mark(&mut self, footprint: Footprint, origin: GridPosition) {
        self.cells.extend(footprint.cells(origin));
        self.height = self.height.max(origin.row + footprint.rows);
    }

    /// Rows in use so far
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// First-fit packer over a fixed-width grid
#[derive(Debug)]
pub struct GridPacker {
    limits: PackLimits,
    occupancy: Occupancy,
}

impl Default for GridPacker {
    fn default() -> Self {
        Self::new(PackLimits::default())
    }
}

impl GridPacker {
    pub fn new(limits: PackLimits) -> Self {
        Self {
            limits,
            occupancy: Occupancy::new(),
        }
    }

    /// Find the first free origin for `footprint`.
    ///
    /// The row right below everything placed so far is always empty, so the
    /// scan never needs to look further than that.
    pub fn find_position(&self, id: &str, footprint: Footprint) -> Result<GridPosition, PackError> {
        let grid_columns = GRID_COLUMNS;
        if footprint.columns > grid_columns {
            return Err(PackError::FootprintTooWide {
                id: id.to_string(),
                columns: footprint.columns,
                grid_columns,
            });
        }

        let last_row = self.occupancy.height();
        for row in 0..=last_row {
            if row + footprint.rows > self.limits.max_rows {
                break;
            }
            for col in 0..=(grid_columns - footprint.columns) {
                let origin = GridPosition::new(row, col);
                if self.occupancy.fits(footprint, origin) {
                    return Ok(origin);
                }
            }
        }

        Err(PackError::RowLimitExceeded {
            id: id.to_string(),
            max_rows: self.limits.max_rows,
        })
    }

    /// Place one scored item
    pub fn place(&mut self, scored: ScoredItem) -> Result<PlacedItem, PackError> {
        let footprint = Footprint::for_score(scored.score);
        let position = self.find_position(&scored.item.id, footprint)?;
        self.occupancy.mark(footprint, position);

        Ok(PlacedItem {
            scored,
            footprint,
            position,
        })
    }

    /// Rows used by the layout so far
    pub fn rows(&self) -> usize {
        self.occupancy.height()
    }
}

/// Pack scored items into the default 4-column grid
pub fn pack(scored: Vec<ScoredItem>) -> Result<Vec<PlacedItem>, PackError> {
    pack_with(scored, PackLimits::default())
}

/// Pack scored items with explicit limits
pub fn pack_with(scored: Vec<ScoredItem>, limits: PackLimits) -> Result<Vec<PlacedItem>, PackError> {
    let mut packer = GridPacker::new(limits);
    let mut placed = Vec::with_capacity(scored.len());

    for item in scored {
        match packer.place(item) {
            Ok(p) => placed.push(p),
            Err(e) => {
                error!(error = %e, placed = placed.len(), "Mood board packing failed");
                return Err(e);
            }
        }
    }

    debug!(items = placed.len(), rows = packer.rows(), "Packed mood board");
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContentItem, Tip, TipKind};

    fn scored(id: &str, score: i32) -> ScoredItem {
        let tip = Tip::new(id, TipKind::Timing, "t", "d", "l");
        ScoredItem {
            item: ContentItem::tip(tip, 4),
            score,
        }
    }

    fn positions(placed: &[PlacedItem]) -> Vec<(usize, usize)> {
        placed.iter().map(|p| (p.position.row, p.position.col)).collect()
    }

    #[test]
    fn test_small_items_fill_rows_left_to_right() {
        let items = (0..6).map(|n| scored(&format!("t{}", n), 1)).collect();
        let placed = pack(items).unwrap();

        assert_eq!(
            positions(&placed),
            vec![(0, 0), (0, 1), (0, 2), (0, 3), (1, 0), (1, 1)]
        );
        assert!(placed.iter().all(|p| p.footprint == Footprint::SMALL));
    }

    #[test]
    fn test_hero_then_small_items_fill_gaps() {
        let items = vec![
            scored("hero", 53),
            scored("a", 1),
            scored("b", 1),
            scored("c", 1),
            scored("d", 1),
            scored("e", 1),
        ];
        let placed = pack(items).unwrap();

        assert_eq!(placed[0].footprint, Footprint::HERO);
        assert_eq!(
            positions(&placed),
            vec![(0, 0), (0, 2), (0, 3), (1, 2), (1, 3), (2, 0)]
        );
    }

    #[test]
    fn test_tall_item_leaves_no_gap_behind() {
        let items = vec![
            scored("wide", 12),
            scored("tall", 8),
            scored("small", 1),
            scored("next", 1),
            scored("fill", 1),
        ];
        let placed = pack(items).unwrap();

        assert_eq!(
            positions(&placed),
            vec![(0, 0), (0, 2), (0, 3), (1, 0), (1, 1)]
        );
        assert_eq!(placed[1].footprint, Footprint::TALL);
    }

    #[test]
    fn test_wide_item_skips_to_row_with_room() {
        let items = vec![
            scored("a", 1),
            scored("b", 1),
            scored("c", 1),
            scored("wide", 10),
        ];
        let placed = pack(items).unwrap();
        assert_eq!(placed[3].position, GridPosition::new(1, 0));
    }

    #[test]
    fn test_row_limit_is_fatal() {
        let limits = PackLimits { max_rows: 1 };
        let items = vec![scored("a", 20), scored("b", 20)];

        let result = pack_with(items, limits);
        assert!(matches!(result, Err(PackError::RowLimitExceeded { .. })));
    }

    #[test]
    fn test_limits_only_carry_max_rows() {
        let limits: PackLimits = serde_json::from_str(r#"{"max_rows": 8}"#).unwrap();
        assert_eq!(limits.max_rows, 8);

        let json = serde_json::to_value(PackLimits::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "max_rows": 4096 }));
    }

    #[test]
    fn test_too_wide_is_fatal() {
        let packer = GridPacker::default();

        let result = packer.find_position("banner", Footprint::new(GRID_COLUMNS + 1, 1));
        match result {
            Err(PackError::FootprintTooWide { id, columns, grid_columns }) => {
                assert_eq!(id, "banner");
                assert_eq!(columns, 5);
                assert_eq!(grid_columns, GRID_COLUMNS);
            }
            other => panic!("Expected FootprintTooWide, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(pack(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_occupancy_tracks_height() {
        let mut occupancy = Occupancy::new();
        assert!(occupancy.is_empty());

        occupancy.mark(Footprint::TALL, GridPosition::new(3, 1));
        assert_eq!(occupancy.height(), 5);
        assert_eq!(occupancy.len(), 2);
        assert!(occupancy.is_occupied(4, 1));
        assert!(!occupancy.fits(Footprint::HERO, GridPosition::new(3, 0)));
        assert!(occupancy.fits(Footprint::HERO, GridPosition::new(3, 2)));
    }
}
