//! Catalog records: exhibits, institutions and reciprocal benefits.
//!
//! These are read-only inputs supplied by the catalog provider. Dates are
//! calendar dates and are interpreted as midnight UTC.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// An exhibit at a cultural institution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exhibit {
    /// Unique exhibit identifier
    pub id: String,

    /// Institution hosting the exhibit
    pub institution_id: String,

    /// Display title
    pub title: String,

    /// Long-form description
    #[serde(default)]
    pub description: String,

    /// Opening date (if announced)
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Closing date (absent for open-ended exhibits)
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// Part of the permanent collection
    #[serde(default)]
    pub is_permanent: bool,

    /// Free to attend (at least at published times)
    #[serde(default)]
    pub is_free: bool,

    /// Interest tags, e.g. "art", "natural-history"
    #[serde(default)]
    pub interests: Vec<String>,

    /// When free access applies
    #[serde(default)]
    pub free_access_details: Option<FreeAccessDetails>,

    /// Hero image URL
    #[serde(default)]
    pub image: Option<String>,
}

impl Exhibit {
    /// Create a minimal exhibit
    pub fn new(
        id: impl Into<String>,
        institution_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            institution_id: institution_id.into(),
            title: title.into(),
            description: String::new(),
            start_date: None,
            end_date: None,
            is_permanent: false,
            is_free: false,
            interests: Vec::new(),
            free_access_details: None,
            image: None,
        }
    }

    /// Set the closing date
    pub fn ending_on(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Set the opening date
    pub fn opening_on(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Mark as part of the permanent collection
    pub fn permanent(mut self) -> Self {
        self.is_permanent = true;
        self
    }

    /// Mark as free to attend
    pub fn free(mut self) -> Self {
        self.is_free = true;
        self
    }

    /// Add an interest tag
    pub fn with_interest(mut self, tag: impl Into<String>) -> Self {
        self.interests.push(tag.into());
        self
    }

    /// Whole days until the exhibit closes, rounded up.
    ///
    /// `None` for permanent exhibits, exhibits without a closing date, and
    /// exhibits that already closed.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        if self.is_permanent {
            return None;
        }

        let end = self.end_date?.and_hms_opt(0, 0, 0)?.and_utc();
        let millis = (end - now).num_milliseconds();
        let days = millis.div_euclid(MILLIS_PER_DAY) + i64::from(millis.rem_euclid(MILLIS_PER_DAY) > 0);

        (days > 0).then_some(days)
    }

    /// Check whether any interest tag appears in `interests`
    pub fn matches_any<'a>(&self, mut interests: impl Iterator<Item = &'a String>) -> bool {
        interests.any(|tag| self.interests.contains(tag))
    }
}

/// Published free-access schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeAccessDetails {
    /// Days with free admission, e.g. ["Thursday"]
    #[serde(default)]
    pub days: Vec<String>,

    /// Time window, e.g. "5pm - 9pm"
    #[serde(default)]
    pub times: Option<String>,
}

/// A museum, gallery or other cultural venue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub short_name: Option<String>,

    #[serde(default)]
    pub location: Option<Location>,

    #[serde(default)]
    pub hours: Option<Hours>,

    /// Admission summary, e.g. "$25 adults"
    #[serde(default)]
    pub admission: Option<String>,

    /// Accessibility summary
    #[serde(default)]
    pub accessibility: Option<String>,

    #[serde(default)]
    pub website: Option<String>,
}

impl Institution {
    /// Create an institution with only an id and a name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            short_name: None,
            location: None,
            hours: None,
            admission: None,
            accessibility: None,
            website: None,
        }
    }

    /// Set the location
    pub fn located_at(mut self, address: impl Into<String>, neighborhood: Option<&str>) -> Self {
        self.location = Some(Location {
            address: address.into(),
            neighborhood: neighborhood.map(str::to_string),
        });
        self
    }

    /// Short name if present, full name otherwise
    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }

    /// Neighborhood, when the location is known
    pub fn neighborhood(&self) -> Option<&str> {
        self.location.as_ref()?.neighborhood.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,

    #[serde(default)]
    pub neighborhood: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hours {
    #[serde(default)]
    pub weekday: Option<String>,

    #[serde(default)]
    pub weekend: Option<String>,

    #[serde(default)]
    pub note: Option<String>,
}

/// Benefit granted to members of one institution at another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReciprocalBenefit {
    /// Unique benefit identifier
    pub id: String,

    /// Institution whose membership qualifies
    pub from_institution_id: String,

    /// Institution granting the benefit
    pub to_institution_id: String,

    /// Membership tier required at the source institution
    pub membership_tier: String,

    /// What the member gets, e.g. "Free general admission"
    #[serde(default)]
    pub benefit: Option<String>,
}

impl ReciprocalBenefit {
    pub fn new(
        id: impl Into<String>,
        from_institution_id: impl Into<String>,
        to_institution_id: impl Into<String>,
        membership_tier: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from_institution_id: from_institution_id.into(),
            to_institution_id: to_institution_id.into(),
            membership_tier: membership_tier.into(),
            benefit: None,
        }
    }
}
