//! Wire models for the EliteBGS v4 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response envelope for every lookup. `total == 0` signals not-found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EbgsResponse<T> {
    pub total: u64,
    pub docs: Vec<T>,
}

/// A star system with the minor factions present in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EbgsSystem {
    pub name: String,
    /// `null` on the wire when the system has no active state.
    pub state: Option<String>,
    /// Case-folded name of the faction controlling this system.
    pub controlling_minor_faction: String,
    pub factions: Vec<SystemFactionRef>,
    pub updated_at: DateTime<Utc>,
}

/// A faction as listed on a system record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemFactionRef {
    pub name: String,
    pub name_lower: String,
}

/// A minor faction with its per-system presence snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EbgsFaction {
    pub name: String,
    pub name_lower: String,
    pub faction_presence: Vec<FactionPresence>,
}

impl EbgsFaction {
    /// The faction's presence entry for `system_name`, matched case-folded.
    pub fn presence_in(&self, system_name: &str) -> Option<&FactionPresence> {
        let lower = system_name.to_lowercase();
        self.faction_presence
            .iter()
            .find(|presence| presence.system_name_lower == lower)
    }
}

/// One faction's snapshot in one system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactionPresence {
    pub system_name_lower: String,
    pub state: String,
    /// Fractional control of the system, 0.0 to 1.0.
    pub influence: f64,
    #[serde(default)]
    pub pending_states: Vec<StateTrend>,
    #[serde(default)]
    pub recovering_states: Vec<StateTrend>,
}

/// A state transition in progress, annotated with its trend direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTrend {
    pub state: String,
    pub trend: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTEM_JSON: &str = r#"{
        "total": 1,
        "docs": [{
            "name": "Qa'wakana",
            "state": null,
            "controlling_minor_faction": "qa'wakana purple boys",
            "factions": [
                { "name": "Qa'wakana Purple Boys", "name_lower": "qa'wakana purple boys" },
                { "name": "Natural Qa'wakana Defence Party", "name_lower": "natural qa'wakana defence party" }
            ],
            "updated_at": "2018-05-13T16:35:21.000Z"
        }]
    }"#;

    const FACTION_JSON: &str = r#"{
        "total": 1,
        "docs": [{
            "name": "Qa'wakana Purple Boys",
            "name_lower": "qa'wakana purple boys",
            "faction_presence": [{
                "system_name_lower": "qa'wakana",
                "state": "Boom",
                "influence": 0.4567,
                "pending_states": [{ "state": "Expansion", "trend": 1 }],
                "recovering_states": []
            }]
        }]
    }"#;

    #[test]
    fn test_deserialize_system_response() {
        let response: EbgsResponse<EbgsSystem> = serde_json::from_str(SYSTEM_JSON).unwrap();
        assert_eq!(response.total, 1);
        let system = &response.docs[0];
        assert_eq!(system.name, "Qa'wakana");
        assert!(system.state.is_none());
        assert_eq!(system.controlling_minor_faction, "qa'wakana purple boys");
        assert_eq!(system.factions.len(), 2);
        assert_eq!(system.updated_at.timestamp(), 1526229321);
    }

    #[test]
    fn test_deserialize_faction_response() {
        let response: EbgsResponse<EbgsFaction> = serde_json::from_str(FACTION_JSON).unwrap();
        let faction = &response.docs[0];
        assert_eq!(faction.name_lower, "qa'wakana purple boys");
        let presence = &faction.faction_presence[0];
        assert_eq!(presence.state, "Boom");
        assert!((presence.influence - 0.4567).abs() < f64::EPSILON);
        assert_eq!(presence.pending_states[0].trend, 1);
        assert!(presence.recovering_states.is_empty());
    }

    #[test]
    fn test_deserialize_empty_response() {
        let response: EbgsResponse<EbgsSystem> =
            serde_json::from_str(r#"{ "total": 0, "docs": [] }"#).unwrap();
        assert_eq!(response.total, 0);
        assert!(response.docs.is_empty());
    }

    #[test]
    fn test_presence_in_matches_case_folded() {
        let response: EbgsResponse<EbgsFaction> = serde_json::from_str(FACTION_JSON).unwrap();
        let faction = &response.docs[0];
        assert!(faction.presence_in("Qa'wakana").is_some());
        assert!(faction.presence_in("QA'WAKANA").is_some());
        assert!(faction.presence_in("Lave").is_none());
    }

    #[test]
    fn test_presence_state_lists_default_when_absent() {
        let json = r#"{
            "system_name_lower": "lave",
            "state": "None",
            "influence": 0.1
        }"#;
        let presence: FactionPresence = serde_json::from_str(json).unwrap();
        assert!(presence.pending_states.is_empty());
        assert!(presence.recovering_states.is_empty());
    }
}
