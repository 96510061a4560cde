use std::{path::PathBuf, str::FromStr};

use core_types::{
    config::{HotelConfig, RoomDef},
    types::AccountId,
};
use ledger::LedgerConfig;
use thiserror::Error;

/// Rooms seeded in dev when the config names none.
const DEV_ROOMS: &[(u32, &str, u64)] = &[
    (1, "Royal", 10),
    (2, "Standard", 5),
    (3, "Penthouse", 25),
];

/// Deployment target for the binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(ConfigError::UnknownEnvironment {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown environment {value:?} (expected dev or prod)")]
    UnknownEnvironment { value: String },
    #[error(transparent)]
    Load(#[from] config::ConfigError),
}

/// Runtime configuration assembled for the binary.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub owner: AccountId,
    pub ledger: LedgerConfig,
    pub seed_rooms: Vec<RoomDef>,
}

impl AppConfig {
    pub fn load(env: Environment) -> Result<Self, ConfigError> {
        let hotel = HotelConfig::load()?;

        let mut ledger = LedgerConfig::new(state_dir_for(env, &hotel.state_dir));
        ledger.rating_min = hotel.rating_min;
        ledger.rating_max = hotel.rating_max;

        let seed_rooms = if hotel.rooms.is_empty() && env == Environment::Dev {
            DEV_ROOMS
                .iter()
                .map(|(room_no, category, tariff)| RoomDef {
                    room_no: *room_no,
                    category: (*category).to_string(),
                    tariff: *tariff,
                })
                .collect()
        } else {
            hotel.rooms
        };

        Ok(Self {
            env,
            owner: AccountId::new(hotel.owner),
            ledger,
            seed_rooms,
        })
    }

    pub fn env_label(&self) -> &'static str {
        match self.env {
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

fn state_dir_for(env: Environment, configured: &str) -> PathBuf {
    match env {
        Environment::Dev => PathBuf::from(configured).join("dev"),
        Environment::Prod => PathBuf::from(configured),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!(Environment::from_str("DEV").unwrap(), Environment::Dev);
        assert_eq!(Environment::from_str("prod").unwrap(), Environment::Prod);
        assert!(matches!(
            Environment::from_str("staging").unwrap_err(),
            ConfigError::UnknownEnvironment { .. }
        ));
    }

    #[test]
    fn dev_state_dir_is_isolated() {
        assert_eq!(
            state_dir_for(Environment::Dev, "hotel.state"),
            PathBuf::from("hotel.state/dev")
        );
        assert_eq!(
            state_dir_for(Environment::Prod, "hotel.state"),
            PathBuf::from("hotel.state")
        );
    }
}
