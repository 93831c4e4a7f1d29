use super::coin::Denomination;
use super::product::Product;
use crate::error::VendingError;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Deposit,
    Purchase,
    Cancel,
}

/// One row of a command script, as read from CSV.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CommandRecord {
    pub action: ActionType,
    pub item: Option<String>,
}

/// A customer intent the engine can execute.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Command {
    Deposit(Denomination),
    Purchase(Product),
    Cancel,
}

impl TryFrom<CommandRecord> for Command {
    type Error = VendingError;

    fn try_from(record: CommandRecord) -> Result<Self, Self::Error> {
        let item = record.item.as_deref().map(str::trim).unwrap_or_default();
        match record.action {
            ActionType::Deposit if item.is_empty() => Err(VendingError::InvalidCommand(
                "deposit requires a coin".to_string(),
            )),
            ActionType::Deposit => Ok(Command::Deposit(item.parse()?)),
            ActionType::Purchase if item.is_empty() => Err(VendingError::InvalidCommand(
                "purchase requires a product".to_string(),
            )),
            ActionType::Purchase => Ok(Command::Purchase(item.parse()?)),
            ActionType::Cancel => Ok(Command::Cancel),
        }
    }
}
