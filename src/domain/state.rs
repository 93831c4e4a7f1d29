use super::action::LastAction;
use super::coin::{ChangeGiven, CoinReserve, Denomination};
use super::money::Cents;
use super::product::{Inventory, PriceList, Product};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything the machine knows: stock, coins, the customer's deposit and the
/// last action.
///
/// Only the transaction engine mutates this; observers get a shared reference
/// and read it through the accessors below.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineState {
    pub(crate) inventory: Inventory,
    pub(crate) reserve: CoinReserve,
    pub(crate) prices: PriceList,
    pub(crate) deposit: Cents,
    pub(crate) last_action: LastAction,
    pub(crate) message: String,
}

impl MachineState {
    pub fn new(inventory: Inventory, reserve: CoinReserve, prices: PriceList) -> Self {
        Self {
            inventory,
            reserve,
            prices,
            deposit: Cents::ZERO,
            last_action: LastAction::None,
            message: String::new(),
        }
    }

    pub fn deposit(&self) -> Cents {
        self.deposit
    }

    /// The deposit as the display shows it, e.g. `¢35`.
    pub fn deposited_label(&self) -> String {
        self.deposit.to_string()
    }

    pub fn stock(&self, product: Product) -> u32 {
        self.inventory.count(product)
    }

    pub fn cola_left(&self) -> u32 {
        self.stock(Product::Cola)
    }

    pub fn pepsi_left(&self) -> u32 {
        self.stock(Product::Pepsi)
    }

    pub fn price(&self, product: Product) -> Cents {
        self.prices.price(product)
    }

    pub fn cola_price(&self) -> Cents {
        self.price(Product::Cola)
    }

    pub fn pepsi_price(&self) -> Cents {
        self.price(Product::Pepsi)
    }

    /// The price as it appears under a product button, e.g. ` ¢50`.
    pub fn price_label(&self, product: Product) -> String {
        format!(" {}", self.price(product))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn last_action(&self) -> LastAction {
        self.last_action
    }

    pub fn coins(&self, coin: Denomination) -> u32 {
        self.reserve.count(coin)
    }

    pub fn quarters(&self) -> u32 {
        self.coins(Denomination::Quarter)
    }

    pub fn dimes(&self) -> u32 {
        self.coins(Denomination::Dime)
    }

    pub fn nickels(&self) -> u32 {
        self.coins(Denomination::Nickel)
    }

    pub fn reserve(&self) -> &CoinReserve {
        &self.reserve
    }

    /// Coins used by the last purchase, if the last action was a purchase.
    pub fn change_given(&self) -> Option<ChangeGiven> {
        match self.last_action {
            LastAction::Purchased(_, change) => Some(change),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot::from(self)
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let change = self.change_given().unwrap_or_default();
        writeln!(f, "Vending Machine State:")?;
        writeln!(f, "  Cola     Left      = {}", self.cola_left())?;
        writeln!(f, "  Pepsi    Left      = {}", self.pepsi_left())?;
        writeln!(f, "  Quarters Left      = {}", self.quarters())?;
        writeln!(f, "  Dimes    Left      = {}", self.dimes())?;
        writeln!(f, "  Nickels  Left      = {}", self.nickels())?;
        writeln!(f, "  Change   Given     = {change}")?;
        writeln!(f, "  Total    Deposit   = {}", self.deposit)?;
        writeln!(f, "  Last     Action    = {}", self.last_action)?;
        writeln!(f, "  Message            = {}", self.message)
    }
}

/// Flat projection of [`MachineState`], one CSV row per snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub deposit: Cents,
    pub cola_stock: u32,
    pub pepsi_stock: u32,
    pub cola_price: Cents,
    pub pepsi_price: Cents,
    pub quarters: u32,
    pub dimes: u32,
    pub nickels: u32,
    pub message: String,
}

impl From<&MachineState> for MachineSnapshot {
    fn from(state: &MachineState) -> Self {
        Self {
            deposit: state.deposit(),
            cola_stock: state.cola_left(),
            pepsi_stock: state.pepsi_left(),
            cola_price: state.cola_price(),
            pepsi_price: state.pepsi_price(),
            quarters: state.quarters(),
            dimes: state.dimes(),
            nickels: state.nickels(),
            message: state.message().to_string(),
        }
    }
}
