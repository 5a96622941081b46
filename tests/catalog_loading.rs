//! Catalog and Profile Loading Integration Tests
//!
//! Loads JSON inputs from disk and composes a board from them.

use chrono::{TimeZone, Utc};
use moodboard::core::{BoardOptions, MoodBoard};
use moodboard::detail::{Badge, ExhibitDetail};
use moodboard::domain::{ContentKind, Footprint, GridPosition};
use moodboard::library::{load_profile, Catalog};
use tempfile::TempDir;

const CATALOG_JSON: &str = r#"{
  "version": 1,
  "institutions": [
    {
      "id": "moma",
      "name": "The Museum of Modern Art",
      "short_name": "MoMA",
      "location": { "address": "11 W 53rd St, New York, NY", "neighborhood": "Midtown" },
      "hours": { "weekday": "10:30am - 5:30pm", "weekend": "10:30am - 7pm" },
      "website": "https://www.moma.org"
    },
    {
      "id": "met",
      "name": "The Metropolitan Museum of Art",
      "location": { "address": "1000 5th Ave, New York, NY", "neighborhood": "Upper East Side" }
    }
  ],
  "exhibits": [
    {
      "id": "moma-pop",
      "institution_id": "moma",
      "title": "Pop Forms",
      "description": "Screen prints and soup cans.",
      "start_date": "2026-02-01",
      "end_date": "2026-06-17",
      "interests": ["art", "pop-art"]
    },
    {
      "id": "met-egypt",
      "institution_id": "met",
      "title": "Egyptian Wing",
      "is_permanent": true,
      "is_free": true,
      "free_access_details": { "days": ["Friday"], "times": "5pm - 9pm" },
      "interests": ["history"]
    }
  ],
  "reciprocal_benefits": [
    {
      "id": "rb-moma-met",
      "from_institution_id": "moma",
      "to_institution_id": "met",
      "membership_tier": "individual",
      "benefit": "Free general admission"
    }
  ]
}"#;

const PROFILE_JSON: &str = r#"{
  "interests": ["art"],
  "memberships": [{ "institution_id": "moma", "tier": "individual" }],
  "visit_history": [{ "institution_id": "moma", "last_visit": "2026-05-20" }]
}"#;

async fn write_inputs(temp: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let catalog = temp.path().join("catalog.json");
    let profile = temp.path().join("profile.json");
    tokio::fs::write(&catalog, CATALOG_JSON).await.unwrap();
    tokio::fs::write(&profile, PROFILE_JSON).await.unwrap();
    (catalog, profile)
}

#[tokio::test]
async fn test_compose_board_from_files() {
    let temp = TempDir::new().unwrap();
    let (catalog_path, profile_path) = write_inputs(&temp).await;

    let catalog = Catalog::load(&catalog_path).await.unwrap();
    let user = load_profile(&profile_path).await.unwrap();
    let now = Utc.with_ymd_and_hms(2026, 6, 15, 10, 0, 0).unwrap();

    let board = MoodBoard::compose(&catalog, &user, now, &BoardOptions::default()).unwrap();

    // Ending in 2 days, art match, member, visited recently, first: 5+40+5+50-4+3
    let hero = &board.items[0];
    assert_eq!(hero.item().id, "moma-pop");
    assert_eq!(hero.score(), 99);
    assert_eq!(hero.footprint, Footprint::HERO);
    assert_eq!(hero.position, GridPosition::new(0, 0));

    assert_eq!(board.count(ContentKind::ReciprocalOffer), 1);
    assert_eq!(board.count(ContentKind::Exhibit), 2);
    assert!(board.count(ContentKind::Tip) >= 3);
}

#[tokio::test]
async fn test_missing_catalog_is_an_error() {
    let temp = TempDir::new().unwrap();
    let result = Catalog::load(&temp.path().join("nope.json")).await;

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("Failed to read catalog"));
}

#[tokio::test]
async fn test_detail_from_loaded_catalog() {
    let temp = TempDir::new().unwrap();
    let (catalog_path, _) = write_inputs(&temp).await;
    let catalog = Catalog::load(&catalog_path).await.unwrap();
    let now = Utc.with_ymd_and_hms(2026, 6, 15, 10, 0, 0).unwrap();

    let pop = ExhibitDetail::build(catalog.exhibit("moma-pop").unwrap(), &catalog, now);
    assert_eq!(pop.badges, vec![Badge::EndingSoon]);
    assert_eq!(pop.opens.as_deref(), Some("February 1, 2026"));
    assert_eq!(pop.remaining_label.as_deref(), Some("2 days remaining"));
    assert_eq!(pop.website_label.as_deref(), Some("Visit MoMA Website"));
    assert_eq!(pop.tags, vec!["art", "pop art"]);

    let egypt = ExhibitDetail::build(catalog.exhibit("met-egypt").unwrap(), &catalog, now);
    assert_eq!(egypt.badges, vec![Badge::FreeAccess]);
    assert!(egypt.is_permanent);
    assert_eq!(egypt.free_access.as_deref(), Some("Friday • 5pm - 9pm"));
    assert_eq!(egypt.neighborhood.as_deref(), Some("Upper East Side"));
    assert_eq!(egypt.website_label, None);
}
