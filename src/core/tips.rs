//! Editorial tip generation.
//!
//! Tips are derived from the catalog and the user's profile, one per topic,
//! always in the order [reciprocal, free access, timing, neighborhood,
//! special]. When a topic has nothing personal to say the tip falls back to
//! generic filler, so the deck never has fewer than five distinct tips.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::domain::{Institution, Tip, TipKind, UserContext};
use crate::library::Catalog;

/// Chooses among equally good tip candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipSelector {
    /// First candidate in catalog order
    #[default]
    First,

    /// Reproducible pseudo-random candidate
    Seeded(u64),
}

impl TipSelector {
    /// Pick one candidate, or `None` if there are none
    pub fn pick<'a, T>(&self, candidates: &'a [T]) -> Option<&'a T> {
        match self {
            TipSelector::First => candidates.first(),
            TipSelector::Seeded(seed) => {
                let mut rng = StdRng::seed_from_u64(*seed);
                candidates.choose(&mut rng)
            }
        }
    }
}

/// Generate the tip deck for a user
pub fn generate_tips(catalog: &Catalog, user: &UserContext, selector: TipSelector) -> Vec<Tip> {
    vec![
        reciprocal_tip(catalog, user),
        free_access_tip(catalog),
        timing_tip(catalog),
        neighborhood_tip(catalog, selector),
        special_tip(catalog),
    ]
}

fn institution_name<'a>(catalog: &'a Catalog, id: &'a str) -> &'a str {
    catalog
        .institution(id)
        .map(Institution::display_name)
        .unwrap_or(id)
}

fn reciprocal_tip(catalog: &Catalog, user: &UserContext) -> Tip {
    let eligible = catalog.eligible_reciprocals(user);

    if let Some(first) = eligible.first() {
        let source = institution_name(catalog, &first.from_institution_id);
        let count = eligible
            .iter()
            .filter(|rb| rb.from_institution_id == first.from_institution_id)
            .count();
        let places = if count == 1 { "place" } else { "places" };

        return Tip::new(
            "tip-reciprocal",
            TipKind::Reciprocal,
            format!("Your {} membership works in {} more {}", source, count, places),
            "Reciprocal benefits let you in elsewhere. Bring your membership card and photo ID.",
            "Pro Tip",
        );
    }

    Tip::new(
        "tip-reciprocal",
        TipKind::Reciprocal,
        "Your membership unlocks more than you think",
        "Many cultural institutions offer reciprocal benefits. Check your membership card for the reciprocal icon.",
        "Pro Tip",
    )
}

fn free_access_tip(catalog: &Catalog) -> Tip {
    let free = catalog.free_access();

    if let Some(first) = free.first() {
        let venue = institution_name(catalog, &first.institution_id);
        let title = if free.len() == 1 {
            "A free exhibit is on right now".to_string()
        } else {
            format!("{} free exhibits are on right now", free.len())
        };

        return Tip::new(
            "tip-free",
            TipKind::FreeAccess,
            title,
            format!(
                "Start with {} at {}. Check the free-access hours before you go.",
                first.title, venue
            ),
            "Insider Tip",
        );
    }

    Tip::new(
        "tip-free",
        TipKind::FreeAccess,
        "Free culture nights are everywhere",
        "Most museums offer free admission on select evenings or afternoons. Check their websites for \"Community Access\" or \"Free First Thursdays\".",
        "Insider Tip",
    )
}

fn timing_tip(catalog: &Catalog) -> Tip {
    let published = catalog.institutions.iter().find_map(|inst| {
        let weekday = inst.hours.as_ref()?.weekday.as_deref()?;
        Some((inst, weekday))
    });

    let description = match published {
        Some((inst, weekday)) => format!(
            "{} is open {} on weekdays. Arrive at opening and you'll have the galleries almost to yourself.",
            inst.display_name(),
            weekday
        ),
        None => "Avoid crowds by visiting cultural institutions on weekday mornings. You'll have galleries almost to yourself and can truly immerse in the art.".to_string(),
    };

    Tip::new(
        "tip-timing",
        TipKind::Timing,
        "Visit on weekday mornings",
        description,
        "Pro Tip",
    )
}

/// Institutions grouped by neighborhood, in order of first appearance
fn neighborhoods(catalog: &Catalog) -> Vec<(&str, Vec<&Institution>)> {
    let mut groups: Vec<(&str, Vec<&Institution>)> = Vec::new();

    for inst in &catalog.institutions {
        let Some(neighborhood) = inst.neighborhood() else {
            continue;
        };
        match groups.iter_mut().find(|(name, _)| *name == neighborhood) {
            Some((_, members)) => members.push(inst),
            None => groups.push((neighborhood, vec![inst])),
        }
    }

    groups
}

fn neighborhood_tip(catalog: &Catalog, selector: TipSelector) -> Tip {
    let groups = neighborhoods(catalog);

    if let Some((name, members)) = groups.iter().find(|(_, members)| members.len() >= 2) {
        return Tip::new(
            "tip-explore",
            TipKind::Neighborhood,
            format!("Explore {}", name),
            format!(
                "{} and {} are within walking distance. Pair them for an afternoon.",
                members[0].display_name(),
                members[1].display_name()
            ),
            "Explore",
        );
    }

    let singles: Vec<(&str, &Institution)> = groups
        .iter()
        .filter_map(|(name, members)| members.first().map(|inst| (*name, *inst)))
        .collect();

    if let Some((name, inst)) = selector.pick(&singles) {
        return Tip::new(
            "tip-explore",
            TipKind::Neighborhood,
            format!("Wander through {}", name),
            format!(
                "Make {} your anchor and explore the streets around it.",
                inst.display_name()
            ),
            "Explore",
        );
    }

    Tip::new(
        "tip-explore",
        TipKind::Neighborhood,
        "Explore by neighborhood",
        "Group visits by area to discover hidden gems. Many neighborhoods have clusters of galleries, museums, and cultural spaces within walking distance.",
        "Explore",
    )
}

fn special_tip(catalog: &Catalog) -> Tip {
    let temporary = catalog.temporary().len();
    let title = match temporary {
        0 => "Temporary exhibits are worth it".to_string(),
        1 => "One temporary exhibit is on view".to_string(),
        n => format!("{} temporary exhibits are on view", n),
    };

    Tip::new(
        "tip-special",
        TipKind::Special,
        title,
        "Special exhibitions often showcase rare artifacts and artwork that may never return. Don't miss these limited-time opportunities.",
        "Don't Miss",
    )
}

/// Tips waiting to be placed in the feed
#[derive(Debug, Clone, Default)]
pub struct TipDeck {
    tips: Vec<Option<Tip>>,
}

impl TipDeck {
    pub fn new(tips: Vec<Tip>) -> Self {
        Self {
            tips: tips.into_iter().map(Some).collect(),
        }
    }

    /// Take the tip for `kind`, or the next unused tip if that topic is gone
    pub fn draw(&mut self, kind: TipKind) -> Option<Tip> {
        match self
            .tips
            .iter()
            .position(|t| t.as_ref().is_some_and(|t| t.kind == kind))
        {
            Some(index) => self.tips[index].take(),
            None => self.next_unused(),
        }
    }

    /// Take the next unused tip in deck order
    pub fn next_unused(&mut self) -> Option<Tip> {
        self.tips.iter_mut().find_map(Option::take)
    }

    /// Number of tips not yet drawn
    pub fn remaining(&self) -> usize {
        self.tips.iter().filter(|t| t.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Exhibit, ReciprocalBenefit};
    use std::collections::HashSet;

    fn institution(id: &str, neighborhood: Option<&str>) -> Institution {
        Institution::new(id, id.to_uppercase()).located_at(format!("1 {} St", id), neighborhood)
    }

    #[test]
    fn test_empty_catalog_still_yields_distinct_tips() {
        let tips = generate_tips(&Catalog::new(), &UserContext::new(), TipSelector::First);

        assert!(tips.len() >= 4);
        let ids: HashSet<_> = tips.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), tips.len());
        assert_eq!(tips[3].title, "Explore by neighborhood");
    }

    #[test]
    fn test_first_cluster_wins() {
        let catalog = Catalog::new()
            .with_institution(institution("a", Some("Chelsea")))
            .with_institution(institution("b", Some("Midtown")))
            .with_institution(institution("c", Some("Midtown")))
            .with_institution(institution("d", Some("Chelsea")));

        let tip = neighborhood_tip(&catalog, TipSelector::First);
        assert_eq!(tip.title, "Explore Chelsea");
        assert!(tip.description.starts_with("A and D"));
    }

    #[test]
    fn test_unclustered_choice_is_reproducible() {
        let catalog = Catalog::new()
            .with_institution(institution("a", Some("Chelsea")))
            .with_institution(institution("b", Some("Midtown")))
            .with_institution(institution("c", None))
            .with_institution(institution("d", Some("Harlem")));

        let first = neighborhood_tip(&catalog, TipSelector::First);
        assert_eq!(first.title, "Wander through Chelsea");

        let seeded_a = neighborhood_tip(&catalog, TipSelector::Seeded(7));
        let seeded_b = neighborhood_tip(&catalog, TipSelector::Seeded(7));
        assert_eq!(seeded_a, seeded_b);
    }

    #[test]
    fn test_personalized_reciprocal_and_free_tips() {
        let catalog = Catalog::new()
            .with_institution(Institution::new("moma", "Museum of Modern Art"))
            .with_exhibit(Exhibit::new("e1", "moma", "Color Field").free())
            .with_benefit(ReciprocalBenefit::new("rb-1", "moma", "met", "individual"))
            .with_benefit(ReciprocalBenefit::new("rb-2", "moma", "whitney", "individual"));
        let user = UserContext::new().with_membership("moma", "individual");

        let tips = generate_tips(&catalog, &user, TipSelector::First);
        assert_eq!(tips[0].title, "Your Museum of Modern Art membership works in 2 more places");
        assert_eq!(tips[1].title, "A free exhibit is on right now");
        assert!(tips[1].description.contains("Color Field"));
        assert_eq!(tips[4].title, "One temporary exhibit is on view");
    }

    #[test]
    fn test_deck_draws_by_kind_then_falls_back() {
        let tips = generate_tips(&Catalog::new(), &UserContext::new(), TipSelector::First);
        let mut deck = TipDeck::new(tips);

        assert_eq!(deck.draw(TipKind::Timing).unwrap().id, "tip-timing");
        // Timing is used up; next unused tip in deck order
        assert_eq!(deck.draw(TipKind::Timing).unwrap().id, "tip-reciprocal");
        assert_eq!(deck.remaining(), 3);

        while deck.remaining() > 0 {
            deck.draw(TipKind::Special);
        }
        assert!(deck.draw(TipKind::Special).is_none());
    }

    #[test]
    fn test_next_unused_follows_deck_order() {
        let tips = generate_tips(&Catalog::new(), &UserContext::new(), TipSelector::First);
        let mut deck = TipDeck::new(tips);

        deck.draw(TipKind::Reciprocal);
        deck.draw(TipKind::Timing);
        assert_eq!(deck.next_unused().unwrap().id, "tip-free");
        assert_eq!(deck.next_unused().unwrap().id, "tip-explore");
        assert_eq!(deck.next_unused().unwrap().id, "tip-special");
        assert!(deck.next_unused().is_none());
    }
}
