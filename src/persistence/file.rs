use super::error::{PersistenceError, Result};
use super::SnapshotStore;
use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::core::game_state::GameState;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const MAGIC_LEN: usize = 8;
const LENGTH_LEN: usize = 4;
const CHECKSUM_LEN: usize = 32;

/// Saves the snapshot to disk in a checksummed envelope.
///
/// File format:
/// - Version magic (8 bytes, little endian)
/// - Payload length (4 bytes, little endian)
/// - JSON payload (variable length)
/// - SHA256 over everything before it (32 bytes)
#[derive(Debug, Clone)]
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Uses `save.dat` in the platform config directory, creating it if needed.
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("", "", "skirmish").ok_or(PersistenceError::NoSaveDirectory)?;
        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(Self {
            save_path: config_dir.join("save.dat"),
        })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }
}

fn checksum(magic: &[u8], length: &[u8], payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(magic);
    hasher.update(length);
    hasher.update(payload);
    let mut digest = [0u8; CHECKSUM_LEN];
    digest.copy_from_slice(&hasher.finalize());
    digest
}

pub fn encode(state: &GameState) -> Result<Vec<u8>> {
    let payload = serde_json::to_vec(state)?;
    let length = u32::try_from(payload.len())
        .map_err(|_| PersistenceError::CorruptedData("snapshot too large".to_string()))?;
    let magic = SAVE_VERSION_MAGIC.to_le_bytes();
    let length = length.to_le_bytes();

    let mut bytes = Vec::with_capacity(MAGIC_LEN + LENGTH_LEN + payload.len() + CHECKSUM_LEN);
    bytes.extend_from_slice(&magic);
    bytes.extend_from_slice(&length);
    bytes.extend_from_slice(&payload);
    bytes.extend_from_slice(&checksum(&magic, &length, &payload));
    Ok(bytes)
}

pub fn decode(bytes: &[u8]) -> Result<GameState> {
    if bytes.len() < MAGIC_LEN + LENGTH_LEN + CHECKSUM_LEN {
        return Err(PersistenceError::CorruptedData("file truncated".to_string()));
    }
    let (magic, rest) = bytes.split_at(MAGIC_LEN);
    let (length, rest) = rest.split_at(LENGTH_LEN);

    let mut magic_bytes = [0u8; MAGIC_LEN];
    magic_bytes.copy_from_slice(magic);
    let version = u64::from_le_bytes(magic_bytes);
    if version != SAVE_VERSION_MAGIC {
        return Err(PersistenceError::CorruptedData(format!(
            "invalid save version: expected 0x{:016X}, got 0x{:016X}",
            SAVE_VERSION_MAGIC, version
        )));
    }

    let mut length_bytes = [0u8; LENGTH_LEN];
    length_bytes.copy_from_slice(length);
    let payload_len = u32::from_le_bytes(length_bytes) as usize;
    if rest.len() != payload_len + CHECKSUM_LEN {
        return Err(PersistenceError::CorruptedData(format!(
            "payload length mismatch: header says {}, found {}",
            payload_len,
            rest.len().saturating_sub(CHECKSUM_LEN)
        )));
    }
    let (payload, stored) = rest.split_at(payload_len);

    if stored != checksum(magic, length, payload).as_slice() {
        return Err(PersistenceError::CorruptedData(
            "checksum verification failed".to_string(),
        ));
    }

    let mut state: GameState = serde_json::from_slice(payload)?;
    state.normalize();
    Ok(state)
}

impl SnapshotStore for SaveManager {
    fn load(&self) -> Result<Option<GameState>> {
        let bytes = match fs::read(&self.save_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        decode(&bytes).map(Some)
    }

    fn persist(&mut self, state: &GameState) -> Result<()> {
        let bytes = encode(state)?;
        if let Some(parent) = self.save_path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Write beside the target and rename so a crash never leaves half a save.
        let tmp_path = self.save_path.with_extension("tmp");
        fs::write(&tmp_path, &bytes)?;
        fs::rename(&tmp_path, &self.save_path)?;
        tracing::debug!(path = %self.save_path.display(), bytes = bytes.len(), "snapshot saved");
        Ok(())
    }

    fn erase(&mut self) -> Result<()> {
        match fs::remove_file(&self.save_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> (TempDir, SaveManager) {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::with_path(dir.path().join("save.dat"));
        (dir, manager)
    }

    #[test]
    fn test_missing_file_is_none() {
        let (_dir, manager) = manager();
        assert!(manager.load().unwrap().is_none());
        assert!(!manager.save_exists());
    }

    #[test]
    fn test_save_and_load() {
        let (_dir, mut manager) = manager();
        let mut state = GameState::new(1_700_000_000);
        state.level = 9;
        state.current_stage = 3;
        state.max_stage_reached = 4;
        state.strengthen_stones = 77;
        manager.persist(&state).unwrap();

        let loaded = manager.load().unwrap().unwrap();
        assert_eq!(loaded.level, 9);
        assert_eq!(loaded.current_stage, 3);
        assert_eq!(loaded.max_stage_reached, 4);
        assert_eq!(loaded.strengthen_stones, 77);
        assert_eq!(loaded.last_seen, 1_700_000_000);
    }

    #[test]
    fn test_flipped_byte_fails_checksum() {
        let (_dir, mut manager) = manager();
        manager.persist(&GameState::new(0)).unwrap();
        let mut bytes = fs::read(manager.path()).unwrap();
        bytes[MAGIC_LEN + LENGTH_LEN + 2] ^= 0xFF;
        fs::write(manager.path(), bytes).unwrap();
        assert!(matches!(
            manager.load(),
            Err(PersistenceError::CorruptedData(_))
        ));
    }

    #[test]
    fn test_wrong_magic_rejected() {
        let mut bytes = encode(&GameState::new(0)).unwrap();
        bytes[0] ^= 0x01;
        assert!(matches!(decode(&bytes), Err(PersistenceError::CorruptedData(_))));
    }

    #[test]
    fn test_truncated_rejected() {
        let bytes = encode(&GameState::new(0)).unwrap();
        assert!(decode(&bytes[..10]).is_err());
        assert!(decode(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn test_erase_is_idempotent() {
        let (_dir, mut manager) = manager();
        manager.persist(&GameState::new(0)).unwrap();
        assert!(manager.save_exists());
        manager.erase().unwrap();
        assert!(!manager.save_exists());
        manager.erase().unwrap();
    }
}
