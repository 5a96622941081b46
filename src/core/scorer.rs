//! Relevance scoring for mood board candidates.
//!
//! Scores are plain integer sums with no clamping; a score can go negative.
//! Tips always keep their base score so they stay small and uniform.

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::domain::{Content, ContentItem, Exhibit, ReciprocalBenefit, ScoredItem, UserContext};

pub const BASE_EXHIBIT: i32 = 5;
pub const BASE_RECIPROCAL: i32 = 3;
pub const BASE_TIP: i32 = 1;

/// Offer for an institution the user already belongs to
pub const REDUNDANT_OFFER_PENALTY: i32 = -8;

pub const INTEREST_MATCH_BOOST: i32 = 5;
pub const MEMBERSHIP_BOOST: i32 = 50;
pub const FREE_ACCESS_BOOST: i32 = 6;
/// Free entry means nothing to a member
pub const FREE_FOR_MEMBER_PENALTY: i32 = -2;
pub const RECENT_VISIT_PENALTY: i32 = -4;
pub const PERMANENT_PENALTY: i32 = -3;
/// Hero treatment for the first card
pub const FIRST_POSITION_BOOST: i32 = 3;

/// Months within which a visit counts as recent
pub const RECENT_VISIT_MONTHS: u32 = 3;

/// Urgency boost by days remaining: (max days, boost)
const URGENCY_TIERS: [(i64, i32); 4] = [(3, 40), (7, 7), (14, 4), (30, 2)];

/// Score one candidate at position `index` of the aggregated feed
pub fn score(item: &ContentItem, index: usize, user: &UserContext, now: DateTime<Utc>) -> i32 {
    match &item.content {
        Content::Tip(_) => BASE_TIP,
        Content::ReciprocalOffer(offer) => score_offer(offer, user),
        Content::Exhibit(exhibit) => score_exhibit(exhibit, index, user, now),
    }
}

/// Score every candidate, preserving feed order
pub fn score_all(items: Vec<ContentItem>, user: &UserContext, now: DateTime<Utc>) -> Vec<ScoredItem> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let score = score(&item, index, user, now);
            trace!(id = %item.id, kind = %item.kind(), score, "Scored candidate");
            ScoredItem { item, score }
        })
        .collect()
}

fn score_offer(offer: &ReciprocalBenefit, user: &UserContext) -> i32 {
    let mut score = BASE_RECIPROCAL;
    if user.is_member_of(&offer.to_institution_id) {
        score += REDUNDANT_OFFER_PENALTY;
    }
    score
}

/// Boost for an exhibit closing in `days`
pub fn urgency_boost(days: i64) -> i32 {
    URGENCY_TIERS
        .iter()
        .find(|(max_days, _)| days <= *max_days)
        .map(|(_, boost)| *boost)
        .unwrap_or(0)
}

fn score_exhibit(exhibit: &Exhibit, index: usize, user: &UserContext, now: DateTime<Utc>) -> i32 {
    let mut score = BASE_EXHIBIT;
    let is_member = user.is_member_of(&exhibit.institution_id);

    if let Some(days) = exhibit.days_remaining(now) {
        score += urgency_boost(days);
    }

    if exhibit.matches_any(user.interests.iter()) {
        score += INTEREST_MATCH_BOOST;
    }

    if is_member {
        score += MEMBERSHIP_BOOST;
    }

    if exhibit.is_free {
        score += if is_member {
            FREE_FOR_MEMBER_PENALTY
        } else {
            FREE_ACCESS_BOOST
        };
    }

    if user.visited_within(&exhibit.institution_id, now, RECENT_VISIT_MONTHS) {
        score += RECENT_VISIT_PENALTY;
    }

    if exhibit.is_permanent {
        score += PERMANENT_PENALTY;
    }

    if index == 0 {
        score += FIRST_POSITION_BOOST;
    }

    score
}
