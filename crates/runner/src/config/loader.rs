use std::collections::HashSet;
use std::path::Path;

use bazaar_behavior::Profession;
use rust_decimal::Decimal;

use super::types::{ClassConfig, CommodityConfig, MarketConfigFile};
use crate::error::ConfigError;

/// Load market configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MarketConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<MarketConfigFile, ConfigError> {
    let config: MarketConfigFile = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<MarketConfigFile, ConfigError> {
    let default_config = include_str!("bazaar_config.json");
    load_config_from_str(default_config)
}

impl MarketConfigFile {
    /// Get a commodity by id
    pub fn get_commodity(&self, id: &str) -> Option<&CommodityConfig> {
        self.commodities.iter().find(|c| c.id == id)
    }

    /// Get a class by id
    pub fn get_class(&self, id: &str) -> Option<&ClassConfig> {
        self.classes.iter().find(|c| c.id == id)
    }

    /// Total agents spawned at startup
    pub fn total_population(&self) -> usize {
        self.classes.iter().map(|c| c.population).sum()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.commodities.is_empty() {
            return Err(ConfigError::Empty("commodities"));
        }
        if self.classes.is_empty() {
            return Err(ConfigError::Empty("classes"));
        }

        let mut seen = HashSet::new();
        for commodity in &self.commodities {
            if !seen.insert(commodity.id.as_str()) {
                return Err(ConfigError::DuplicateId(commodity.id.clone()));
            }
            if commodity.initial_price < Decimal::ZERO {
                return Err(ConfigError::NegativeValue(format!(
                    "initial price of {}",
                    commodity.id
                )));
            }
        }

        let mut seen = HashSet::new();
        for class in &self.classes {
            if !seen.insert(class.id.as_str()) {
                return Err(ConfigError::DuplicateId(class.id.clone()));
            }
            if Profession::from_name(&class.logic).is_none() {
                return Err(ConfigError::UnknownLogic {
                    class: class.id.clone(),
                    logic: class.logic.clone(),
                });
            }
            if class.money < Decimal::ZERO {
                return Err(ConfigError::NegativeValue(format!("money of {}", class.id)));
            }
            for (commodity, units) in class.start_inventory.iter().chain(&class.ideal_inventory) {
                if self.get_commodity(commodity).is_none() {
                    return Err(ConfigError::UnknownCommodity {
                        class: class.id.clone(),
                        commodity: commodity.clone(),
                    });
                }
                if *units < Decimal::ZERO {
                    return Err(ConfigError::NegativeValue(format!(
                        "{} inventory of {}",
                        commodity, class.id
                    )));
                }
            }
        }

        Ok(())
    }
}
