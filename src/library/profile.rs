//! Loading the user profile snapshot.
//!
//! The profile is owned by the app shell; this crate only reads it. A
//! missing profile file means a first-run user with nothing configured.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::debug;

use crate::domain::UserContext;

/// Load a user profile from a JSON file, or an empty profile if absent
pub async fn load_profile(path: &Path) -> Result<UserContext> {
    if !path.exists() {
        debug!(path = %path.display(), "No profile file, using empty profile");
        return Ok(UserContext::default());
    }

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read profile: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse profile: {}", path.display()))
}
