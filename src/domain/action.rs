use super::coin::{ChangeGiven, Denomination};
use super::product::Product;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The single most recent customer action, carrying what is needed to undo it.
///
/// Every action overwrites the previous one; only this one slot of history
/// exists, so `cancel` can never reach further back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LastAction {
    #[default]
    None,
    Deposited(Denomination),
    Purchased(Product, ChangeGiven),
    Cancelled,
}

impl fmt::Display for LastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastAction::None => f.write_str("None"),
            LastAction::Deposited(coin) => write!(f, "Deposit ({coin})"),
            LastAction::Purchased(product, change) => write!(f, "Buy ({product}, {change})"),
            LastAction::Cancelled => f.write_str("Cancel"),
        }
    }
}
