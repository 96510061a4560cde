use std::{
    fs,
    path::{Path, PathBuf},
};

use core_types::types::Rating;

use crate::error::Result;

pub const DEFAULT_STATE_DIR: &str = "hotel.state";
pub const DEFAULT_RATING_MIN: Rating = 1;
pub const DEFAULT_RATING_MAX: Rating = 5;
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

#[derive(Clone, Debug)]
pub struct LedgerConfig {
    pub state_dir: PathBuf,
    pub rating_min: Rating,
    pub rating_max: Rating,
    pub event_capacity: usize,
}

impl LedgerConfig {
    pub fn new(state_dir: PathBuf) -> Self {
        Self {
            state_dir,
            rating_min: DEFAULT_RATING_MIN,
            rating_max: DEFAULT_RATING_MAX,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.state_dir.join("ledger-state.json")
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        if !self.state_dir.exists() {
            fs::create_dir_all(&self.state_dir)?;
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::new(PathBuf::from(DEFAULT_STATE_DIR))
    }
}
