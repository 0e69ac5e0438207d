//! Per-guild configuration as held in the guild config store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field a guild sorts its report cards by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Influence,
}

/// Per-guild settings consumed by the command handlers.
///
/// `sort_order` follows the store's wire convention: `1` ascending,
/// `-1` descending, `0` unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildConfig {
    pub guild_id: u64,
    /// Roles allowed to run configuration commands.
    #[serde(default)]
    pub admin_roles: Vec<u64>,
    /// Role allowed to run the BGS reporting commands.
    #[serde(default)]
    pub bgs_role: Option<u64>,
    /// Roles that override every access check they are requested for.
    #[serde(default)]
    pub forbidden_roles: Vec<u64>,
    #[serde(default)]
    pub sort: Option<SortField>,
    #[serde(default)]
    pub sort_order: i8,
    pub updated_at: DateTime<Utc>,
}

impl GuildConfig {
    /// Fresh record with no roles or sort preference configured.
    pub fn new(guild_id: u64) -> Self {
        Self {
            guild_id,
            admin_roles: Vec::new(),
            bgs_role: None,
            forbidden_roles: Vec::new(),
            sort: None,
            sort_order: 0,
            updated_at: Utc::now(),
        }
    }
}
