//! Exhibit detail view model.
//!
//! Everything the detail modal shows, computed up front: badges, formatted
//! dates, time remaining, location and links.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::{Exhibit, Institution};
use crate::library::Catalog;

/// Days remaining at or below which an exhibit is flagged as ending soon
pub const ENDING_SOON_BADGE_DAYS: i64 = 7;

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Badge shown over the exhibit image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    FreeAccess,
    EndingSoon,
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Badge::FreeAccess => write!(f, "Free Access"),
            Badge::EndingSoon => write!(f, "Ending Soon"),
        }
    }
}

/// Render-ready detail for one exhibit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExhibitDetail {
    pub id: String,
    pub title: String,
    pub description: String,

    /// Host institution's full name, if known
    pub institution_name: Option<String>,

    pub badges: Vec<Badge>,

    /// "Opens: ..." date, only for temporary exhibits
    pub opens: Option<String>,

    /// "Closes: ..." date, only for temporary exhibits
    pub closes: Option<String>,

    pub days_until_end: Option<i64>,

    /// "Ends tomorrow!" or "N days remaining"
    pub remaining_label: Option<String>,

    pub is_permanent: bool,

    /// e.g. "Thursday, Friday • 5pm - 9pm"
    pub free_access: Option<String>,

    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub maps_url: Option<String>,

    pub website: Option<String>,

    /// "Visit <short name> Website"
    pub website_label: Option<String>,

    /// Interest tags ready for display
    pub tags: Vec<String>,
}

impl ExhibitDetail {
    /// Build the detail view for an exhibit
    pub fn build(exhibit: &Exhibit, catalog: &Catalog, now: DateTime<Utc>) -> Self {
        let institution = catalog.institution(&exhibit.institution_id);
        let days_until_end = exhibit.days_remaining(now);

        let mut badges = Vec::new();
        if exhibit.is_free {
            badges.push(Badge::FreeAccess);
        }
        if days_until_end.is_some_and(|d| d <= ENDING_SOON_BADGE_DAYS) {
            badges.push(Badge::EndingSoon);
        }

        let (opens, closes) = if exhibit.is_permanent {
            (None, None)
        } else {
            (
                exhibit.start_date.map(format_date),
                exhibit.end_date.map(format_date),
            )
        };

        let free_access = if exhibit.is_free {
            exhibit.free_access_details.as_ref().map(|details| {
                let days = details.days.join(", ");
                match &details.times {
                    Some(times) => format!("{} • {}", days, times),
                    None => days,
                }
            })
        } else {
            None
        };

        let location = institution.and_then(|i| i.location.as_ref());

        Self {
            id: exhibit.id.clone(),
            title: exhibit.title.clone(),
            description: exhibit.description.clone(),
            institution_name: institution.map(|i| i.name.clone()),
            badges,
            opens,
            closes,
            days_until_end,
            remaining_label: days_until_end.map(remaining_label),
            is_permanent: exhibit.is_permanent,
            free_access,
            address: location.map(|l| l.address.clone()),
            neighborhood: location.and_then(|l| l.neighborhood.clone()),
            maps_url: location.map(|l| maps_url(&l.address)),
            website: institution.and_then(|i| i.website.clone()),
            website_label: institution.and_then(website_label),
            tags: exhibit.interests.iter().map(|t| humanize_tag(t)).collect(),
        }
    }
}

/// Long US-style date, e.g. "March 5, 2026"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn remaining_label(days: i64) -> String {
    if days == 1 {
        "Ends tomorrow!".to_string()
    } else {
        format!("{} days remaining", days)
    }
}

/// Replace the first hyphen with a space: "natural-history" -> "natural history"
pub fn humanize_tag(tag: &str) -> String {
    tag.replacen('-', " ", 1)
}

fn website_label(institution: &Institution) -> Option<String> {
    institution
        .website
        .as_ref()
        .map(|_| format!("Visit {} Website", institution.display_name()))
}

/// Maps search link for a street address
pub fn maps_url(address: &str) -> String {
    format!("{}{}", MAPS_SEARCH_URL, encode_component(address))
}

// URI component encoding: unreserved characters pass through, the rest are
// UTF-8 percent-encoded.
fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
