//! Mood board content: candidates, scores and grid placements.
//!
//! A `ContentItem` flows through the curation pipeline, picking up a score
//! (`ScoredItem`) and then a footprint and position (`PlacedItem`).

use serde::{Deserialize, Serialize};

use super::exhibit::{Exhibit, ReciprocalBenefit};

/// A candidate card for the mood board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique content identifier (exhibit, benefit or tip id)
    pub id: String,

    /// Aggregation rank of the source list this item came from (lower is
    /// earlier). Not a scoring input.
    pub source_priority: u8,

    #[serde(flatten)]
    pub content: Content,
}

impl ContentItem {
    pub fn exhibit(exhibit: &Exhibit, source_priority: u8) -> Self {
        Self {
            id: exhibit.id.clone(),
            source_priority,
            content: Content::Exhibit(exhibit.clone()),
        }
    }

    pub fn reciprocal(benefit: &ReciprocalBenefit, source_priority: u8) -> Self {
        Self {
            id: benefit.id.clone(),
            source_priority,
            content: Content::ReciprocalOffer(benefit.clone()),
        }
    }

    pub fn tip(tip: Tip, source_priority: u8) -> Self {
        Self {
            id: tip.id.clone(),
            source_priority,
            content: Content::Tip(tip),
        }
    }

    /// Kind of content carried
    pub fn kind(&self) -> ContentKind {
        match self.content {
            Content::Exhibit(_) => ContentKind::Exhibit,
            Content::ReciprocalOffer(_) => ContentKind::ReciprocalOffer,
            Content::Tip(_) => ContentKind::Tip,
        }
    }

    /// The exhibit, if this item is one
    pub fn as_exhibit(&self) -> Option<&Exhibit> {
        match &self.content {
            Content::Exhibit(exhibit) => Some(exhibit),
            _ => None,
        }
    }
}

/// Payload of a content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Content {
    Exhibit(Exhibit),

    #[serde(rename = "reciprocal")]
    ReciprocalOffer(ReciprocalBenefit),

    Tip(Tip),
}

/// Discriminant of `Content`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Exhibit,
    ReciprocalOffer,
    Tip,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Exhibit => write!(f, "exhibit"),
            ContentKind::ReciprocalOffer => write!(f, "reciprocal"),
            ContentKind::Tip => write!(f, "tip"),
        }
    }
}

/// Editorial tip card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub id: String,

    /// Which slot of the feed the tip is written for
    pub kind: TipKind,

    /// Display category tag
    #[serde(rename = "type")]
    pub category: TipCategory,

    pub title: String,

    pub description: String,

    /// Short overline, e.g. "Pro Tip"
    pub label: String,
}

impl Tip {
    pub fn new(
        id: impl Into<String>,
        kind: TipKind,
        title: impl Into<String>,
        description: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            category: kind.category(),
            title: title.into(),
            description: description.into(),
            label: label.into(),
        }
    }
}

/// Topic a tip is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipKind {
    Reciprocal,
    FreeAccess,
    Timing,
    Neighborhood,
    Special,
}

impl TipKind {
    pub fn category(self) -> TipCategory {
        match self {
            TipKind::Reciprocal => TipCategory::Membership,
            TipKind::FreeAccess | TipKind::Timing => TipCategory::Insider,
            TipKind::Neighborhood => TipCategory::Neighborhood,
            TipKind::Special => TipCategory::Favorite,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipCategory {
    Membership,
    Insider,
    Neighborhood,
    Favorite,
}

/// A content item with its relevance score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredItem {
    #[serde(flatten)]
    pub item: ContentItem,

    /// Relevance score; may be negative
    pub score: i32,
}

/// Cell span of a card in the virtual grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub columns: usize,
    pub rows: usize,
}

impl Footprint {
    pub const HERO: Self = Self::new(2, 2);
    pub const WIDE: Self = Self::new(2, 1);
    pub const TALL: Self = Self::new(1, 2);
    pub const SMALL: Self = Self::new(1, 1);

    pub const fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    /// Map a relevance score to a footprint
    pub fn for_score(score: i32) -> Self {
        match score {
            s if s >= 15 => Self::HERO,
            s if s >= 10 => Self::WIDE,
            s if s >= 7 => Self::TALL,
            _ => Self::SMALL,
        }
    }

    /// Number of cells covered
    pub fn area(&self) -> usize {
        self.columns * self.rows
    }

    /// Cells covered when the top-left corner sits at `origin`, row-major
    pub fn cells(&self, origin: GridPosition) -> impl Iterator<Item = (usize, usize)> + '_ {
        (origin.row..origin.row + self.rows)
            .flat_map(move |row| (origin.col..origin.col + self.columns).map(move |col| (row, col)))
    }
}

/// Top-left cell of a placed card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

impl GridPosition {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A scored item with its final grid placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedItem {
    #[serde(flatten)]
    pub scored: ScoredItem,

    pub footprint: Footprint,

    pub position: GridPosition,
}

impl PlacedItem {
    pub fn item(&self) -> &ContentItem {
        &self.scored.item
    }

    pub fn score(&self) -> i32 {
        self.scored.score
    }

    /// Cells occupied by this placement
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.footprint.cells(self.position)
    }

    /// One past the last row this placement covers
    pub fn bottom(&self) -> usize {
        self.position.row + self.footprint.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_thresholds() {
        assert_eq!(Footprint::for_score(53), Footprint::HERO);
        assert_eq!(Footprint::for_score(15), Footprint::HERO);
        assert_eq!(Footprint::for_score(14), Footprint::WIDE);
        assert_eq!(Footprint::for_score(10), Footprint::WIDE);
        assert_eq!(Footprint::for_score(9), Footprint::TALL);
        assert_eq!(Footprint::for_score(7), Footprint::TALL);
        assert_eq!(Footprint::for_score(6), Footprint::SMALL);
        assert_eq!(Footprint::for_score(-12), Footprint::SMALL);
    }

    #[test]
    fn test_footprint_cells() {
        let cells: Vec<_> = Footprint::HERO.cells(GridPosition::new(1, 2)).collect();
        assert_eq!(cells, vec![(1, 2), (1, 3), (2, 2), (2, 3)]);
        assert_eq!(Footprint::TALL.area(), 2);
    }

    #[test]
    fn test_content_item_serialization() {
        let tip = Tip::new(
            "tip-timing",
            TipKind::Timing,
            "Visit on weekday mornings",
            "Galleries are quiet before noon.",
            "Pro Tip",
        );
        let item = ContentItem::tip(tip, 4);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "tip-timing");
        assert_eq!(json["type"], "tip");
        assert_eq!(json["data"]["type"], "insider");

        let parsed: ContentItem = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, item);
        assert_eq!(parsed.kind(), ContentKind::Tip);
    }
}
