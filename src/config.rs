use crate::domain::coin::CoinReserve;
use crate::domain::money::Cents;
use crate::domain::product::{Inventory, PriceList};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Construction parameters of a machine: starting coins, starting stock and
/// fixed prices in cents.
///
/// Missing fields in a JSON config fall back to [`MachineConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub quarters: u32,
    pub dimes: u32,
    pub nickels: u32,
    pub cola_stock: u32,
    pub pepsi_stock: u32,
    pub cola_price: u32,
    pub pepsi_price: u32,
}

impl Default for MachineConfig {
    /// An empty coin box, ten of each drink, both at ¢50.
    fn default() -> Self {
        Self {
            quarters: 0,
            dimes: 0,
            nickels: 0,
            cola_stock: 10,
            pepsi_stock: 10,
            cola_price: 50,
            pepsi_price: 50,
        }
    }
}

impl MachineConfig {
    pub fn new(
        quarters: u32,
        dimes: u32,
        nickels: u32,
        cola_stock: u32,
        pepsi_stock: u32,
        cola_price: u32,
        pepsi_price: u32,
    ) -> Self {
        Self {
            quarters,
            dimes,
            nickels,
            cola_stock,
            pepsi_stock,
            cola_price,
            pepsi_price,
        }
    }

    /// Loads a config from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.prices().map(|_| ())
    }

    pub fn reserve(&self) -> CoinReserve {
        CoinReserve::new(self.quarters, self.dimes, self.nickels)
    }

    pub fn inventory(&self) -> Inventory {
        Inventory::new(self.cola_stock, self.pepsi_stock)
    }

    pub fn prices(&self) -> Result<PriceList> {
        PriceList::new(Cents(self.cola_price), Cents(self.pepsi_price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VendingError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = MachineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cola_stock, 10);
        assert_eq!(config.cola_price, 50);
    }

    #[test]
    fn test_zero_price_rejected() {
        let config = MachineConfig::new(0, 0, 0, 1, 1, 0, 50);
        assert!(matches!(
            config.validate(),
            Err(VendingError::ConfigError(_))
        ));
    }

    #[test]
    fn test_from_path_fills_missing_fields() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "quarters": 4, "pepsi_price": 65 }}"#).unwrap();

        let config = MachineConfig::from_path(file.path()).unwrap();
        assert_eq!(config.quarters, 4);
        assert_eq!(config.pepsi_price, 65);
        assert_eq!(config.cola_price, 50);
        assert_eq!(config.dimes, 0);
    }

    #[test]
    fn test_from_path_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "quarters = 4").unwrap();

        assert!(matches!(
            MachineConfig::from_path(file.path()),
            Err(VendingError::JsonError(_))
        ));
    }
}
