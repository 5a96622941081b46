//! Catalog of exhibits, institutions and reciprocal benefits.
//!
//! Simple JSON document, loaded once per invocation and queried read-only.
//! Every query returns items in catalog order unless documented otherwise.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;

use crate::domain::{Exhibit, Institution, ReciprocalBenefit, UserContext};

/// Read-only catalog snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog format version
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub exhibits: Vec<Exhibit>,

    #[serde(default)]
    pub institutions: Vec<Institution>,

    #[serde(default)]
    pub reciprocal_benefits: Vec<ReciprocalBenefit>,
}

fn default_version() -> u32 {
    1
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self {
            version: default_version(),
            exhibits: Vec::new(),
            institutions: Vec::new(),
            reciprocal_benefits: Vec::new(),
        }
    }

    /// Load the catalog from a JSON file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;

        Self::from_json(&content)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))
    }

    /// Parse a catalog from JSON content
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse catalog JSON")
    }

    pub fn with_exhibit(mut self, exhibit: Exhibit) -> Self {
        self.exhibits.push(exhibit);
        self
    }

    pub fn with_institution(mut self, institution: Institution) -> Self {
        self.institutions.push(institution);
        self
    }

    pub fn with_benefit(mut self, benefit: ReciprocalBenefit) -> Self {
        self.reciprocal_benefits.push(benefit);
        self
    }

    /// Get an exhibit by ID
    pub fn exhibit(&self, id: &str) -> Option<&Exhibit> {
        self.exhibits.iter().find(|e| e.id == id)
    }

    /// Get an institution by ID
    pub fn institution(&self, id: &str) -> Option<&Institution> {
        self.institutions.iter().find(|i| i.id == id)
    }

    /// Get an exhibit by ID, failing when it is absent
    pub fn require_exhibit(&self, id: &str) -> Result<&Exhibit, CatalogError> {
        self.exhibit(id).ok_or_else(|| CatalogError::NotFound {
            kind: "exhibit",
            id: id.to_string(),
        })
    }

    /// Temporary exhibits closing within `window_days`, soonest first.
    ///
    /// Exhibits closing on the same day keep catalog order.
    pub fn ending_soon(&self, now: DateTime<Utc>, window_days: i64) -> Vec<&Exhibit> {
        let mut ending: Vec<(i64, &Exhibit)> = self
            .exhibits
            .iter()
            .filter_map(|e| e.days_remaining(now).map(|days| (days, e)))
            .filter(|(days, _)| *days <= window_days)
            .collect();

        // sort_by_key is stable
        ending.sort_by_key(|(days, _)| *days);
        ending.into_iter().map(|(_, e)| e).collect()
    }

    /// Exhibits with free access
    pub fn free_access(&self) -> Vec<&Exhibit> {
        self.exhibits.iter().filter(|e| e.is_free).collect()
    }

    /// Exhibits tagged with at least one of the user's interests
    pub fn matching_interests(&self, user: &UserContext) -> Vec<&Exhibit> {
        self.exhibits
            .iter()
            .filter(|e| e.matches_any(user.interests.iter()))
            .collect()
    }

    /// Exhibits at institutions the user has not visited within `months`
    pub fn not_recently_visited(
        &self,
        user: &UserContext,
        now: DateTime<Utc>,
        months: u32,
    ) -> Vec<&Exhibit> {
        self.exhibits
            .iter()
            .filter(|e| !user.visited_within(&e.institution_id, now, months))
            .collect()
    }

    /// Reciprocal benefits the user can actually use: they hold the
    /// qualifying tier at the source and no membership at the destination.
    pub fn eligible_reciprocals(&self, user: &UserContext) -> Vec<&ReciprocalBenefit> {
        self.reciprocal_benefits
            .iter()
            .filter(|rb| user.holds_tier(&rb.from_institution_id, &rb.membership_tier))
            .filter(|rb| !user.is_member_of(&rb.to_institution_id))
            .collect()
    }

    /// Non-permanent exhibits
    pub fn temporary(&self) -> Vec<&Exhibit> {
        self.exhibits.iter().filter(|e| !e.is_permanent).collect()
    }

    /// No exhibits and no reciprocal benefits to show
    pub fn is_empty(&self) -> bool {
        self.exhibits.is_empty() && self.reciprocal_benefits.is_empty()
    }
}

/// Catalog lookup errors
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Unknown {kind}: {id}")]
    NotFound { kind: &'static str, id: String },
}
