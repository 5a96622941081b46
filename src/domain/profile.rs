//! User context: interests, memberships and visit history.
//!
//! Read-only for the curation pipeline. Save/unsave and mark-visited flows
//! mutate the profile elsewhere and hand a fresh snapshot to each render.

use std::collections::BTreeSet;

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of the user's profile used for curation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    /// Interest tags the user follows
    #[serde(default)]
    pub interests: BTreeSet<String>,

    /// Institution memberships
    #[serde(default)]
    pub memberships: Vec<Membership>,

    /// Most recent visit per institution
    #[serde(default)]
    pub visit_history: Vec<Visit>,
}

impl UserContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow an interest tag
    pub fn with_interest(mut self, tag: impl Into<String>) -> Self {
        self.interests.insert(tag.into());
        self
    }

    /// Add a membership
    pub fn with_membership(
        mut self,
        institution_id: impl Into<String>,
        tier: impl Into<String>,
    ) -> Self {
        self.memberships.push(Membership {
            institution_id: institution_id.into(),
            tier: tier.into(),
        });
        self
    }

    /// Record a visit
    pub fn with_visit(mut self, institution_id: impl Into<String>, last_visit: NaiveDate) -> Self {
        self.visit_history.push(Visit {
            institution_id: institution_id.into(),
            last_visit,
        });
        self
    }

    /// Whether the user holds any membership at the institution
    pub fn is_member_of(&self, institution_id: &str) -> bool {
        self.memberships
            .iter()
            .any(|m| m.institution_id == institution_id)
    }

    /// Whether the user holds exactly this tier at the institution
    pub fn holds_tier(&self, institution_id: &str, tier: &str) -> bool {
        self.memberships
            .iter()
            .any(|m| m.institution_id == institution_id && m.tier == tier)
    }

    /// First recorded visit entry for the institution
    pub fn last_visit(&self, institution_id: &str) -> Option<NaiveDate> {
        self.visit_history
            .iter()
            .find(|v| v.institution_id == institution_id)
            .map(|v| v.last_visit)
    }

    /// Whether the user visited the institution within the last `months`
    /// calendar months.
    pub fn visited_within(&self, institution_id: &str, now: DateTime<Utc>, months: u32) -> bool {
        let Some(last_visit) = self.last_visit(institution_id) else {
            return false;
        };
        let Some(cutoff) = now.checked_sub_months(Months::new(months)) else {
            return true;
        };

        match last_visit.and_hms_opt(0, 0, 0) {
            Some(visited_at) => visited_at.and_utc() >= cutoff,
            None => false,
        }
    }
}

/// Membership at an institution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub institution_id: String,

    /// Tier name, e.g. "individual", "family", "patron"
    pub tier: String,
}

/// Last visit to an institution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub institution_id: String,

    pub last_visit: NaiveDate,
}
