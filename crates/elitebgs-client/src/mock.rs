//! Fixture-backed mock API for unit testing without network access.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::client::EbgsApi;
use crate::models::{EbgsFaction, EbgsSystem};

/// Error returned for names registered with [`MockApi::failing`].
#[derive(Debug)]
pub struct MockApiError(String);

impl fmt::Display for MockApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mock transport error: {}", self.0)
    }
}

impl std::error::Error for MockApiError {}

/// In-memory [`EbgsApi`] implementation.
///
/// Fixtures are keyed by case-folded name; unknown names resolve to the
/// not-found outcome. Names registered as failing return a transport error
/// instead, for exercising the fail-fast paths.
#[derive(Clone, Default)]
pub struct MockApi {
    inner: Arc<Mutex<Fixtures>>,
}

#[derive(Default)]
struct Fixtures {
    systems: HashMap<String, EbgsSystem>,
    factions: HashMap<String, EbgsFaction>,
    failing: HashSet<String>,
    faction_lookups: Vec<String>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system fixture.
    pub fn with_system(self, system: EbgsSystem) -> Self {
        {
            let mut guard = self.inner.lock().unwrap();
            guard.systems.insert(system.name.to_lowercase(), system);
        }
        self
    }

    /// Register a faction fixture.
    pub fn with_faction(self, faction: EbgsFaction) -> Self {
        {
            let mut guard = self.inner.lock().unwrap();
            guard.factions.insert(faction.name_lower.clone(), faction);
        }
        self
    }

    /// Force every lookup for `name` to fail with a transport error.
    pub fn failing(self, name: &str) -> Self {
        {
            let mut guard = self.inner.lock().unwrap();
            guard.failing.insert(name.to_lowercase());
        }
        self
    }

    /// Names passed to `fetch_faction` so far, in call order.
    pub fn faction_lookups(&self) -> Vec<String> {
        self.inner.lock().unwrap().faction_lookups.clone()
    }
}

impl EbgsApi for MockApi {
    type Error = MockApiError;

    async fn fetch_system(&self, name: &str) -> Result<Option<EbgsSystem>, MockApiError> {
        let guard = self.inner.lock().unwrap();
        let key = name.to_lowercase();
        if guard.failing.contains(&key) {
            return Err(MockApiError(format!("system lookup failed for {}", name)));
        }
        Ok(guard.systems.get(&key).cloned())
    }

    async fn fetch_faction(&self, name: &str) -> Result<Option<EbgsFaction>, MockApiError> {
        let mut guard = self.inner.lock().unwrap();
        let key = name.to_lowercase();
        guard.faction_lookups.push(key.clone());
        if guard.failing.contains(&key) {
            return Err(MockApiError(format!("faction lookup failed for {}", name)));
        }
        Ok(guard.factions.get(&key).cloned())
    }
}
