use super::error::Result;
use super::SnapshotStore;
use crate::core::game_state::GameState;

/// Keeps the snapshot as a JSON string in memory. Useful for tests and
/// throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    json: Option<String>,
    /// Number of successful persists.
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with a raw (possibly partial) JSON snapshot.
    pub fn from_json(json: impl Into<String>) -> Self {
        Self {
            json: Some(json.into()),
            writes: 0,
        }
    }

    pub fn json(&self) -> Option<&str> {
        self.json.as_deref()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<GameState>> {
        let Some(json) = &self.json else {
            return Ok(None);
        };
        let mut state: GameState = serde_json::from_str(json)?;
        state.normalize();
        Ok(Some(state))
    }

    fn persist(&mut self, state: &GameState) -> Result<()> {
        self.json = Some(serde_json::to_string(state)?);
        self.writes += 1;
        Ok(())
    }

    fn erase(&mut self) -> Result<()> {
        self.json = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::PersistenceError;

    #[test]
    fn test_partial_json_loads_with_defaults() {
        let store = MemoryStore::from_json(r#"{"level": 4, "player_hp": 999999}"#);
        let state = store.load().unwrap().unwrap();
        assert_eq!(state.level, 4);
        assert_eq!(state.exp_to_next, 250);
        assert_eq!(state.player_hp, state.max_hp());
        assert_eq!(state.current_stage, 1);
    }

    #[test]
    fn test_garbage_json_is_an_error() {
        let store = MemoryStore::from_json("not json");
        assert!(matches!(store.load(), Err(PersistenceError::Json(_))));
    }

    #[test]
    fn test_persist_then_erase() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        store.persist(&GameState::new(5)).unwrap();
        assert_eq!(store.writes, 1);
        assert_eq!(store.load().unwrap().unwrap().last_seen, 5);
        store.erase().unwrap();
        assert!(store.json().is_none());
    }
}
