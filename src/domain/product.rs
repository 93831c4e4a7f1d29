use super::money::Cents;
use crate::error::VendingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    Cola,
    Pepsi,
}

impl Product {
    pub const ALL: [Product; 2] = [Product::Cola, Product::Pepsi];
}

impl FromStr for Product {
    type Err = VendingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cola" | "coke" => Ok(Product::Cola),
            "pepsi" => Ok(Product::Pepsi),
            _ => Err(VendingError::UnknownProduct(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Product::Cola => "Cola",
            Product::Pepsi => "Pepsi",
        };
        f.write_str(name)
    }
}

/// Units left of each product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory {
    cola: u32,
    pepsi: u32,
}

impl Inventory {
    pub fn new(cola: u32, pepsi: u32) -> Self {
        Self { cola, pepsi }
    }

    pub fn count(&self, product: Product) -> u32 {
        match product {
            Product::Cola => self.cola,
            Product::Pepsi => self.pepsi,
        }
    }

    fn count_mut(&mut self, product: Product) -> &mut u32 {
        match product {
            Product::Cola => &mut self.cola,
            Product::Pepsi => &mut self.pepsi,
        }
    }

    /// Takes one unit out of stock, refusing if none is left.
    pub fn take(&mut self, product: Product) -> Result<(), VendingError> {
        let count = self.count_mut(product);
        *count = count
            .checked_sub(1)
            .ok_or(VendingError::SoldOut(product))?;
        Ok(())
    }

    pub fn put_back(&mut self, product: Product) {
        *self.count_mut(product) += 1;
    }
}

/// Fixed per-unit prices, set once when the machine is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceList {
    cola: Cents,
    pepsi: Cents,
}

impl PriceList {
    pub fn new(cola: Cents, pepsi: Cents) -> Result<Self, VendingError> {
        for (product, price) in [(Product::Cola, cola), (Product::Pepsi, pepsi)] {
            if price.is_zero() {
                return Err(VendingError::ConfigError(format!(
                    "{product} price must be positive"
                )));
            }
        }
        Ok(Self { cola, pepsi })
    }

    pub fn price(&self, product: Product) -> Cents {
        match product {
            Product::Cola => self.cola,
            Product::Pepsi => self.pepsi,
        }
    }
}
