//! Content aggregation: merging ranked sources into one feed.
//!
//! Sources are taken in a fixed priority order, each contributing a capped
//! number of items, with tips interleaved between sections. Missing sources
//! simply skip their section. No item appears twice. A feed shorter than
//! one grid row is topped up with the remaining tips.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::packer::GRID_COLUMNS;
use super::scorer::RECENT_VISIT_MONTHS;
use super::tips::{generate_tips, TipDeck, TipSelector};
use crate::domain::{ContentItem, Exhibit, TipKind, UserContext};
use crate::library::Catalog;

pub const ENDING_SOON_LIMIT: usize = 2;
pub const FREE_ACCESS_LIMIT: usize = 2;
pub const RECIPROCAL_LIMIT: usize = 2;
pub const INTEREST_LIMIT: usize = 10;
pub const NOT_RECENTLY_VISITED_LIMIT: usize = 3;

/// Feeds shorter than this are filled with unused tips
pub const MIN_FEED_LEN: usize = GRID_COLUMNS;

/// Source priorities, in feed order
pub mod priority {
    pub const ENDING_SOON: u8 = 1;
    pub const FREE_ACCESS: u8 = 2;
    pub const RECIPROCAL: u8 = 3;
    pub const TIP: u8 = 4;
    pub const INTEREST: u8 = 5;
    pub const NOT_RECENTLY_VISITED: u8 = 6;
}

/// Tunables for aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateOptions {
    /// Exhibits closing within this many days count as "ending soon"
    #[serde(default = "default_ending_soon_days")]
    pub ending_soon_days: i64,

    /// How to choose between equally good tip candidates
    #[serde(default)]
    pub tip_selector: TipSelector,
}

fn default_ending_soon_days() -> i64 {
    30
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            ending_soon_days: default_ending_soon_days(),
            tip_selector: TipSelector::default(),
        }
    }
}

/// Index at which the mid-feed tip is inserted for a feed of `len` items
pub fn midpoint_index(len: usize) -> usize {
    len / 2
}

/// Index at which the late-feed tip is inserted, `floor(len * 0.7)`
pub fn late_index(len: usize) -> usize {
    len * 7 / 10
}

/// Feed under construction
#[derive(Default)]
struct Feed {
    items: Vec<ContentItem>,
    included: HashSet<String>,
}

impl Feed {
    fn contains(&self, exhibit: &Exhibit) -> bool {
        self.included.contains(&exhibit.id)
    }

    /// Exhibits from `source` not yet in the feed, capped at `limit`
    fn fresh<'a>(&self, source: &[&'a Exhibit], limit: usize) -> Vec<&'a Exhibit> {
        source
            .iter()
            .copied()
            .filter(|e| !self.contains(e))
            .take(limit)
            .collect()
    }

    fn push(&mut self, item: ContentItem) {
        self.included.insert(item.id.clone());
        self.items.push(item);
    }

    fn push_exhibits(&mut self, exhibits: &[&Exhibit], source_priority: u8) {
        for exhibit in exhibits {
            self.push(ContentItem::exhibit(exhibit, source_priority));
        }
    }

    fn push_tip(&mut self, deck: &mut TipDeck, kind: TipKind, source_priority: u8) {
        if let Some(tip) = deck.draw(kind) {
            self.push(ContentItem::tip(tip, source_priority));
        }
    }

    fn insert_tip(&mut self, deck: &mut TipDeck, kind: TipKind, at: impl Fn(usize) -> usize) {
        if let Some(tip) = deck.draw(kind) {
            let index = at(self.items.len());
            self.included.insert(tip.id.clone());
            self.items.insert(index, ContentItem::tip(tip, priority::TIP));
        }
    }

    fn fill_with_tips(&mut self, deck: &mut TipDeck, min_len: usize) {
        while self.items.len() < min_len {
            let Some(tip) = deck.next_unused() else {
                break;
            };
            self.push(ContentItem::tip(tip, priority::TIP));
        }
    }
}

/// Merge the catalog's ranked sources into an ordered candidate feed
pub fn aggregate(
    catalog: &Catalog,
    user: &UserContext,
    now: DateTime<Utc>,
    options: &AggregateOptions,
) -> Vec<ContentItem> {
    let mut deck = TipDeck::new(generate_tips(catalog, user, options.tip_selector));
    let mut feed = Feed::default();

    // Ending soon
    let ending_soon = catalog.ending_soon(now, options.ending_soon_days);
    let urgent = feed.fresh(&ending_soon, ENDING_SOON_LIMIT);
    feed.push_exhibits(&urgent, priority::ENDING_SOON);

    // Free access, introduced by a tip
    let free = feed.fresh(&catalog.free_access(), FREE_ACCESS_LIMIT);
    if !free.is_empty() {
        feed.push_tip(&mut deck, TipKind::FreeAccess, priority::FREE_ACCESS);
        feed.push_exhibits(&free, priority::FREE_ACCESS);
    }

    // Reciprocal offers, introduced by a tip
    let offers = catalog.eligible_reciprocals(user);
    if !offers.is_empty() {
        feed.push_tip(&mut deck, TipKind::Reciprocal, priority::RECIPROCAL);
        for offer in offers.iter().take(RECIPROCAL_LIMIT) {
            feed.push(ContentItem::reciprocal(offer, priority::RECIPROCAL));
        }
    }

    feed.push_tip(&mut deck, TipKind::Timing, priority::TIP);

    // Interest matches not already shown above
    let matched = feed.fresh(&catalog.matching_interests(user), INTEREST_LIMIT);
    feed.push_exhibits(&matched, priority::INTEREST);

    feed.insert_tip(&mut deck, TipKind::Neighborhood, midpoint_index);
    feed.insert_tip(&mut deck, TipKind::Special, late_index);

    // Institutions the user hasn't been to lately
    let not_recent = catalog.not_recently_visited(user, now, RECENT_VISIT_MONTHS);
    let rediscover = feed.fresh(&not_recent, NOT_RECENTLY_VISITED_LIMIT);
    feed.push_exhibits(&rediscover, priority::NOT_RECENTLY_VISITED);

    feed.fill_with_tips(&mut deck, MIN_FEED_LEN);

    debug!(
        urgent = urgent.len(),
        free = free.len(),
        offers = offers.len().min(RECIPROCAL_LIMIT),
        matched = matched.len(),
        rediscover = rediscover.len(),
        total = feed.items.len(),
        "Aggregated mood board candidates"
    );

    feed.items
}
