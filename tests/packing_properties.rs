use std::collections::HashSet;

use moodboard::core::{pack, GRID_COLUMNS};
use moodboard::domain::{ContentItem, Exhibit, Footprint, ScoredItem};
use proptest::prelude::*;

fn scored_items(scores: &[i32]) -> Vec<ScoredItem> {
    scores
        .iter()
        .enumerate()
        .map(|(n, score)| ScoredItem {
            item: ContentItem::exhibit(&Exhibit::new(format!("e{}", n), "inst", "Exhibit"), 5),
            score: *score,
        })
        .collect()
}

proptest! {
    #[test]
    fn placements_never_overlap(scores in prop::collection::vec(-20i32..80, 0..60)) {
        let placed = pack(scored_items(&scores)).unwrap();
        let mut occupied = HashSet::new();

        for p in &placed {
            for cell in p.cells() {
                prop_assert!(occupied.insert(cell), "cell {:?} placed twice", cell);
            }
        }
    }

    #[test]
    fn footprints_fit_the_grid(scores in prop::collection::vec(-20i32..80, 0..60)) {
        let placed = pack(scored_items(&scores)).unwrap();

        for p in &placed {
            prop_assert!(p.footprint.columns >= 1 && p.footprint.columns <= 2);
            prop_assert!(p.footprint.rows >= 1 && p.footprint.rows <= 2);
            prop_assert!(p.position.col + p.footprint.columns <= GRID_COLUMNS);
        }
    }

    #[test]
    fn order_and_scores_are_preserved(scores in prop::collection::vec(-20i32..80, 0..60)) {
        let placed = pack(scored_items(&scores)).unwrap();

        prop_assert_eq!(placed.len(), scores.len());
        for (p, score) in placed.iter().zip(&scores) {
            prop_assert_eq!(p.score(), *score);
            prop_assert_eq!(p.footprint, Footprint::for_score(*score));
        }
    }

    #[test]
    fn packing_is_deterministic(scores in prop::collection::vec(-20i32..80, 0..40)) {
        let a = pack(scored_items(&scores)).unwrap();
        let b = pack(scored_items(&scores)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn first_fit_leaves_no_fillable_hole_above_a_small_card(
        scores in prop::collection::vec(-20i32..80, 1..40)
    ) {
        // A 1x1 card always lands in the first free cell in row-major order
        let placed = pack(scored_items(&scores)).unwrap();
        let mut occupied: HashSet<(usize, usize)> = HashSet::new();

        for p in &placed {
            if p.footprint == Footprint::SMALL {
                let first_free = (0usize..)
                    .flat_map(|row| (0..GRID_COLUMNS).map(move |col| (row, col)))
                    .find(|cell| !occupied.contains(cell))
                    .unwrap();
                prop_assert_eq!((p.position.row, p.position.col), first_free);
            }
            occupied.extend(p.cells());
        }
    }
}
