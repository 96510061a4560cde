// Copyright (c) James Kassemi, SC, US. All rights reserved.

use config::{Config, ConfigError};
use serde::{Deserialize, Serialize};

use crate::types::{Amount, Rating, RoomNo};

/// Config structure with the hotel's key knobs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HotelConfig {
    #[serde(default)]
    pub owner: String,
    #[serde(default = "default_state_dir")]
    pub state_dir: String,
    #[serde(default = "default_rating_min")]
    pub rating_min: Rating,
    #[serde(default = "default_rating_max")]
    pub rating_max: Rating,
    #[serde(default)]
    pub rooms: Vec<RoomDef>,
}

fn default_state_dir() -> String {
    "hotel.state".to_string()
}

fn default_rating_min() -> Rating {
    1
}

fn default_rating_max() -> Rating {
    5
}

/// A room the owner configures at boot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDef {
    pub room_no: RoomNo,
    pub category: String,
    pub tariff: Amount,
}

impl HotelConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(config::File::with_name("hotel.toml").required(false))
            .add_source(config::Environment::with_prefix("HOTEL"))
            .build()?;
        let config: Self = settings.try_deserialize()?;
        if config.owner.is_empty() {
            return Err(ConfigError::Message("HOTEL_OWNER is required".to_string()));
        }
        if config.rating_min > config.rating_max {
            return Err(ConfigError::Message(format!(
                "rating bounds inverted: {} > {}",
                config.rating_min, config.rating_max
            )));
        }
        Ok(config)
    }
}
