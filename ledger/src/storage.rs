use std::{collections::HashMap, fs, path::Path};

use core_types::types::RoomNo;
use serde::{Deserialize, Serialize};

use crate::{error::SnapshotError, room::Room, treasury::Treasury};

/// On-disk state: the rooms mapping plus the treasury, as one json file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub rooms: HashMap<RoomNo, Room>,
    pub treasury: Treasury,
}

impl StateSnapshot {
    /// Reads the snapshot if one exists; a missing or empty file yields
    /// fresh state. A malformed file is an error, not a silent reset.
    pub fn load_or_init(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let bytes = fs::read(path)?;
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(&bytes).map_err(|source| SnapshotError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn persist(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let bytes = serde_json::to_vec_pretty(self).expect("serialize ledger state");
        fs::write(path, bytes)?;
        Ok(())
    }
}
