use super::money::Cents;
use crate::error::VendingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A coin the machine accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    Quarter,
    Dime,
    Nickel,
}

impl Denomination {
    /// All accepted coins, largest first. Change is made in this order.
    pub const ALL: [Denomination; 3] = [
        Denomination::Quarter,
        Denomination::Dime,
        Denomination::Nickel,
    ];

    pub fn value(&self) -> Cents {
        match self {
            Denomination::Quarter => Cents(25),
            Denomination::Dime => Cents(10),
            Denomination::Nickel => Cents(5),
        }
    }
}

impl TryFrom<u32> for Denomination {
    type Error = VendingError;

    fn try_from(cents: u32) -> Result<Self, Self::Error> {
        match cents {
            25 => Ok(Denomination::Quarter),
            10 => Ok(Denomination::Dime),
            5 => Ok(Denomination::Nickel),
            other => Err(VendingError::UnrecognizedCoin(other)),
        }
    }
}

impl FromStr for Denomination {
    type Err = VendingError;

    /// Accepts a coin name ("quarter") or its value in cents ("25").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(cents) = s.parse::<u32>() {
            return Denomination::try_from(cents);
        }
        match s.to_ascii_lowercase().as_str() {
            "quarter" => Ok(Denomination::Quarter),
            "dime" => Ok(Denomination::Dime),
            "nickel" => Ok(Denomination::Nickel),
            _ => Err(VendingError::InvalidCommand(format!("unknown coin '{s}'"))),
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Denomination::Quarter => "Quarter",
            Denomination::Dime => "Dime",
            Denomination::Nickel => "Nickel",
        };
        f.write_str(name)
    }
}

/// The coins consumed from the reserve by one purchase.
///
/// Kept on the last action so that cancelling the purchase puts back exactly
/// these coins rather than re-deriving them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChangeGiven {
    pub quarters: u32,
    pub dimes: u32,
    pub nickels: u32,
}

impl ChangeGiven {
    pub fn count(&self, coin: Denomination) -> u32 {
        match coin {
            Denomination::Quarter => self.quarters,
            Denomination::Dime => self.dimes,
            Denomination::Nickel => self.nickels,
        }
    }

    fn count_mut(&mut self, coin: Denomination) -> &mut u32 {
        match coin {
            Denomination::Quarter => &mut self.quarters,
            Denomination::Dime => &mut self.dimes,
            Denomination::Nickel => &mut self.nickels,
        }
    }

    pub fn value(&self) -> Cents {
        Denomination::ALL
            .iter()
            .fold(Cents::ZERO, |acc, coin| acc + coin.value() * self.count(*coin))
    }
}

impl fmt::Display for ChangeGiven {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.quarters, self.dimes, self.nickels)
    }
}

/// Coins held by the machine, per denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoinReserve {
    quarters: u32,
    dimes: u32,
    nickels: u32,
}

impl CoinReserve {
    pub fn new(quarters: u32, dimes: u32, nickels: u32) -> Self {
        Self {
            quarters,
            dimes,
            nickels,
        }
    }

    pub fn count(&self, coin: Denomination) -> u32 {
        match coin {
            Denomination::Quarter => self.quarters,
            Denomination::Dime => self.dimes,
            Denomination::Nickel => self.nickels,
        }
    }

    fn count_mut(&mut self, coin: Denomination) -> &mut u32 {
        match coin {
            Denomination::Quarter => &mut self.quarters,
            Denomination::Dime => &mut self.dimes,
            Denomination::Nickel => &mut self.nickels,
        }
    }

    /// Total value in cents of every coin in the reserve.
    ///
    /// Counts may be anything up to `u32::MAX`, so the sum is kept in a `u64`.
    pub fn value(&self) -> u64 {
        Denomination::ALL.iter().fold(0, |acc, coin| {
            acc + u64::from(coin.value().value()) * u64::from(self.count(*coin))
        })
    }

    /// Adds one coin. Fails without touching the reserve if the slot's count
    /// is already at its maximum.
    pub fn add(&mut self, coin: Denomination) -> Option<()> {
        let count = self.count_mut(coin);
        *count = count.checked_add(1)?;
        Some(())
    }

    /// Removes one coin. Fails without touching the reserve if none is left.
    pub fn remove(&mut self, coin: Denomination) -> Option<()> {
        let count = self.count_mut(coin);
        *count = count.checked_sub(1)?;
        Some(())
    }

    /// Plans the coins covering `amount`, largest denomination first.
    ///
    /// Each denomination contributes as many coins as fit into what is still
    /// owed, bounded by how many the reserve holds. Nothing is removed here;
    /// pass the plan to [`CoinReserve::dispense`]. If the reserve cannot cover
    /// the full amount, the uncovered remainder is returned as the error.
    pub fn plan_change(&self, amount: Cents) -> Result<ChangeGiven, Cents> {
        let mut remaining = amount.value();
        let mut change = ChangeGiven::default();
        for coin in Denomination::ALL {
            if remaining == 0 {
                break;
            }
            let value = coin.value().value();
            let used = self.count(coin).min(remaining / value);
            remaining -= used * value;
            *change.count_mut(coin) = used;
        }
        if remaining == 0 {
            Ok(change)
        } else {
            Err(Cents(remaining))
        }
    }

    /// Takes the planned coins out of the reserve.
    ///
    /// Only the engine calls this, with a plan produced by
    /// [`CoinReserve::plan_change`] on this same reserve, so every count is
    /// available.
    pub(crate) fn dispense(&mut self, change: &ChangeGiven) {
        for coin in Denomination::ALL {
            *self.count_mut(coin) -= change.count(coin);
        }
    }

    /// Puts back coins taken by [`CoinReserve::dispense`].
    pub(crate) fn restore(&mut self, change: &ChangeGiven) {
        for coin in Denomination::ALL {
            *self.count_mut(coin) += change.count(coin);
        }
    }
}
