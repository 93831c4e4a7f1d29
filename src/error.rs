use crate::domain::coin::Denomination;
use crate::domain::money::Cents;
use crate::domain::product::Product;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VendingError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Unrecognized coin: {0} cents")]
    UnrecognizedCoin(u32),
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
    #[error("Coin box full, {0} rejected")]
    ReserveFull(Denomination),
    #[error("Deposit limit reached, {0} rejected")]
    DepositLimit(Denomination),
    #[error("{0} is sold out")]
    SoldOut(Product),
    #[error("Insufficient funds for {product}: deposited {deposit}, price {price}")]
    InsufficientFunds {
        product: Product,
        deposit: Cents,
        price: Cents,
    },
    #[error("Exact change unavailable for {product}: short by {shortfall}")]
    ExactChangeUnavailable { product: Product, shortfall: Cents },
}

pub type Result<T> = std::result::Result<T, VendingError>;
