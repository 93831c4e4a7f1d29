use crate::config::MachineConfig;
use crate::domain::action::LastAction;
use crate::domain::coin::{ChangeGiven, Denomination};
use crate::domain::command::Command;
use crate::domain::money::Cents;
use crate::domain::ports::StateObserverBox;
use crate::domain::product::Product;
use crate::domain::state::{MachineSnapshot, MachineState};
use crate::error::{Result, VendingError};
use tracing::{debug, info, warn};

/// The transaction engine of the vending machine.
///
/// `TransactionEngine` owns the whole machine state and is the only thing that
/// mutates it. Every public operation runs to completion and then notifies the
/// observer, whether it changed anything or not. Operations take `&mut self`,
/// so a caller sharing one machine between clients has to serialize access
/// around the engine as a whole.
pub struct TransactionEngine {
    state: MachineState,
    observer: StateObserverBox,
}

impl TransactionEngine {
    /// Creates a new `TransactionEngine` with zero deposit and no history.
    ///
    /// # Arguments
    ///
    /// * `config` - Starting coins, stock and prices.
    /// * `observer` - Notified after every operation.
    pub fn new(config: MachineConfig, observer: StateObserverBox) -> Result<Self> {
        let state = MachineState::new(config.inventory(), config.reserve(), config.prices()?);
        debug!(?config, "Vending machine ready");
        Ok(Self { state, observer })
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Total cents currently held for the customer.
    pub fn deposited(&self) -> Cents {
        self.state.deposit()
    }

    pub fn cola_left(&self) -> u32 {
        self.state.cola_left()
    }

    pub fn pepsi_left(&self) -> u32 {
        self.state.pepsi_left()
    }

    pub fn cola_price(&self) -> Cents {
        self.state.cola_price()
    }

    pub fn pepsi_price(&self) -> Cents {
        self.state.pepsi_price()
    }

    pub fn message(&self) -> &str {
        self.state.message()
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        self.state.snapshot()
    }

    /// Runs one customer command.
    ///
    /// Cancelling never fails; deposits and purchases report their rejection.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Deposit(coin) => {
                self.deposit(coin)?;
            }
            Command::Purchase(product) => {
                self.purchase(product)?;
            }
            Command::Cancel => {
                self.cancel();
            }
        }
        Ok(())
    }

    /// Accepts one coin and returns the new deposit total.
    ///
    /// The coin is refused, leaving stock, coins, deposit and the last action
    /// as they were, if its slot in the reserve is full or the deposit would
    /// exceed what a [`Cents`] can hold.
    pub fn deposit(&mut self, coin: Denomination) -> Result<Cents> {
        let result = self.try_deposit(coin);
        match &result {
            Ok(deposit) => debug!(%coin, %deposit, "Coin deposited"),
            Err(e) => {
                warn!(%coin, error = %e, "Coin rejected");
                if let Some(message) = rejection_message(e) {
                    self.state.message = message;
                }
            }
        }

        self.notify();
        result
    }

    fn try_deposit(&mut self, coin: Denomination) -> Result<Cents> {
        let deposit = self
            .state
            .deposit
            .checked_add(coin.value())
            .ok_or(VendingError::DepositLimit(coin))?;
        self.state
            .reserve
            .add(coin)
            .ok_or(VendingError::ReserveFull(coin))?;

        self.state.deposit = deposit;
        self.state.last_action = LastAction::Deposited(coin);
        self.state.message = format!("{coin} Deposited");
        Ok(deposit)
    }

    /// Accepts a coin given by its value in cents.
    ///
    /// Anything other than 25, 10 or 5 is rejected with
    /// [`VendingError::UnrecognizedCoin`] and leaves the state untouched.
    pub fn deposit_cents(&mut self, cents: u32) -> Result<Cents> {
        match Denomination::try_from(cents) {
            Ok(coin) => self.deposit(coin),
            Err(e) => {
                warn!(cents, "Unrecognized coin rejected");
                self.notify();
                Err(e)
            }
        }
    }

    /// Sells one unit of `product`, returning the coins taken from the reserve
    /// to cover its price.
    ///
    /// A rejected purchase changes nothing but the message: stock, coins,
    /// deposit and the last action stay as they were, so a following cancel
    /// acts on whatever preceded the attempt.
    pub fn purchase(&mut self, product: Product) -> Result<ChangeGiven> {
        let result = self.try_purchase(product);
        match &result {
            Ok(change) => {
                info!(%product, %change, deposit = %self.state.deposit, "Product purchased");
            }
            Err(e) => {
                warn!(%product, error = %e, "Purchase rejected");
                if let Some(message) = rejection_message(e) {
                    self.state.message = message;
                }
            }
        }

        self.notify();
        result
    }

    fn try_purchase(&mut self, product: Product) -> Result<ChangeGiven> {
        let price = self.state.price(product);
        if self.state.stock(product) == 0 {
            return Err(VendingError::SoldOut(product));
        }
        if self.state.deposit < price {
            return Err(VendingError::InsufficientFunds {
                product,
                deposit: self.state.deposit,
                price,
            });
        }
        let change = self
            .state
            .reserve
            .plan_change(price)
            .map_err(|shortfall| VendingError::ExactChangeUnavailable { product, shortfall })?;

        self.state.inventory.take(product)?;
        self.state.deposit -= price;
        self.state.reserve.dispense(&change);
        self.state.last_action = LastAction::Purchased(product, change);
        self.state.message = format!("{product} Purchased");
        Ok(change)
    }

    /// Reverses the last action, if it was a deposit or a purchase.
    ///
    /// Returns the action that was looked at. Afterwards the last action is
    /// always [`LastAction::Cancelled`], so a second cancel in a row does
    /// nothing.
    pub fn cancel(&mut self) -> LastAction {
        let last = self.state.last_action;
        match last {
            LastAction::Deposited(coin) => {
                // Deposited(coin) is only recorded once the coin is in the
                // reserve and its value is in the deposit.
                self.state.reserve.remove(coin);
                self.state.deposit -= coin.value();
                self.state.message = format!("Your Last {coin} Deposit Canceled");
                info!(%coin, deposit = %self.state.deposit, "Deposit cancelled");
            }
            LastAction::Purchased(product, change) => {
                self.state.inventory.put_back(product);
                self.state.deposit += self.state.price(product);
                self.state.reserve.restore(&change);
                self.state.message = format!("Your Last {product} Purchase Canceled");
                info!(%product, %change, deposit = %self.state.deposit, "Purchase cancelled");
            }
            LastAction::None | LastAction::Cancelled => {
                debug!(%last, "Nothing to cancel");
            }
        }
        self.state.last_action = LastAction::Cancelled;

        self.notify();
        last
    }

    fn notify(&mut self) {
        self.observer.on_state_changed(&self.state);
    }
}

fn rejection_message(error: &VendingError) -> Option<String> {
    match error {
        VendingError::SoldOut(product) => Some(format!("{product} Sold Out")),
        VendingError::InsufficientFunds { product, .. } => {
            Some(format!("Insufficient Funds For {product}"))
        }
        VendingError::ExactChangeUnavailable { product, .. } => {
            Some(format!("Exact Change Unavailable For {product}"))
        }
        VendingError::ReserveFull(coin) => Some(format!("{coin} Slot Full")),
        VendingError::DepositLimit(coin) => {
            Some(format!("Deposit Limit Reached, {coin} Returned"))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::observers::RecordingObserver;

    fn engine_with(config: MachineConfig) -> (TransactionEngine, RecordingObserver) {
        let recorder = RecordingObserver::new();
        let engine = TransactionEngine::new(config, Box::new(recorder.clone())).unwrap();
        (engine, recorder)
    }

    fn stocked() -> (TransactionEngine, RecordingObserver) {
        engine_with(MachineConfig::new(10, 10, 10, 10, 10, 50, 50))
    }

    #[test]
    fn test_deposit_accumulates() {
        let (mut engine, _) = stocked();
        assert_eq!(engine.deposit(Denomination::Quarter).unwrap(), Cents(25));
        assert_eq!(engine.deposit(Denomination::Dime).unwrap(), Cents(35));
        assert_eq!(engine.state().quarters(), 11);
        assert_eq!(engine.state().dimes(), 11);
        assert_eq!(engine.message(), "Dime Deposited");
        assert_eq!(
            engine.state().last_action(),
            LastAction::Deposited(Denomination::Dime)
        );
    }

    #[test]
    fn test_purchase_uses_exact_price_in_coins() {
        let (mut engine, _) = stocked();
        engine.deposit(Denomination::Quarter).unwrap();
        engine.deposit(Denomination::Quarter).unwrap();

        let change = engine.purchase(Product::Cola).unwrap();
        assert_eq!(
            change,
            ChangeGiven {
                quarters: 2,
                dimes: 0,
                nickels: 0
            }
        );
        assert_eq!(engine.cola_left(), 9);
        assert_eq!(engine.deposited(), Cents::ZERO);
        assert_eq!(engine.state().quarters(), 10);
        assert_eq!(engine.message(), "Cola Purchased");
    }

    #[test]
    fn test_insufficient_funds_changes_nothing_but_message() {
        let (mut engine, _) = stocked();
        engine.deposit(Denomination::Quarter).unwrap();
        let before = engine.state().clone();

        let result = engine.purchase(Product::Cola);
        assert!(matches!(
            result,
            Err(VendingError::InsufficientFunds {
                product: Product::Cola,
                deposit: Cents(25),
                price: Cents(50)
            })
        ));
        assert_eq!(engine.cola_left(), before.cola_left());
        assert_eq!(engine.deposited(), before.deposit());
        assert_eq!(engine.state().reserve(), before.reserve());
        assert_eq!(engine.state().last_action(), before.last_action());
        assert_eq!(engine.message(), "Insufficient Funds For Cola");
    }

    #[test]
    fn test_failed_purchase_is_invisible_to_cancel() {
        let (mut engine, _) = stocked();
        engine.deposit(Denomination::Dime).unwrap();
        assert!(engine.purchase(Product::Pepsi).is_err());

        // The cancel reverses the dime, not the failed purchase.
        let reversed = engine.cancel();
        assert_eq!(reversed, LastAction::Deposited(Denomination::Dime));
        assert_eq!(engine.deposited(), Cents::ZERO);
        assert_eq!(engine.pepsi_left(), 10);
        assert_eq!(engine.message(), "Your Last Dime Deposit Canceled");
    }

    #[test]
    fn test_sold_out_rejected() {
        let (mut engine, _) = engine_with(MachineConfig::new(0, 0, 0, 0, 1, 25, 25));
        engine.deposit(Denomination::Quarter).unwrap();

        assert!(matches!(
            engine.purchase(Product::Cola),
            Err(VendingError::SoldOut(Product::Cola))
        ));
        assert_eq!(engine.cola_left(), 0);
        assert_eq!(engine.deposited(), Cents(25));
        assert_eq!(engine.message(), "Cola Sold Out");

        assert!(engine.purchase(Product::Pepsi).is_ok());
        assert_eq!(engine.pepsi_left(), 0);
    }

    #[test]
    fn test_exact_change_unavailable_blocks_sale() {
        // Price 30 from two deposited quarters: one quarter, then 5 short.
        let (mut engine, _) = engine_with(MachineConfig::new(0, 0, 0, 5, 5, 30, 30));
        engine.deposit(Denomination::Quarter).unwrap();
        engine.deposit(Denomination::Quarter).unwrap();

        assert!(matches!(
            engine.purchase(Product::Cola),
            Err(VendingError::ExactChangeUnavailable {
                product: Product::Cola,
                shortfall: Cents(5)
            })
        ));
        assert_eq!(engine.cola_left(), 5);
        assert_eq!(engine.deposited(), Cents(50));
        assert_eq!(engine.state().quarters(), 2);
        assert_eq!(engine.message(), "Exact Change Unavailable For Cola");

        // Once a nickel is in the reserve the same sale goes through.
        engine.deposit(Denomination::Nickel).unwrap();
        let change = engine.purchase(Product::Cola).unwrap();
        assert_eq!(change.value(), Cents(30));
        assert_eq!(engine.deposited(), Cents(25));
    }

    #[test]
    fn test_cancel_purchase_restores_recorded_coins() {
        let (mut engine, _) = stocked();
        engine.deposit(Denomination::Quarter).unwrap();
        engine.deposit(Denomination::Quarter).unwrap();
        engine.purchase(Product::Cola).unwrap();

        let reversed = engine.cancel();
        assert!(matches!(reversed, LastAction::Purchased(Product::Cola, _)));
        assert_eq!(engine.cola_left(), 10);
        assert_eq!(engine.deposited(), Cents(50));
        assert_eq!(engine.state().quarters(), 12);
        assert_eq!(engine.message(), "Your Last Cola Purchase Canceled");
        assert_eq!(engine.state().last_action(), LastAction::Cancelled);
    }

    #[test]
    fn test_cancel_twice_is_noop() {
        let (mut engine, _) = stocked();
        engine.deposit(Denomination::Nickel).unwrap();
        engine.cancel();
        let after_first = engine.state().clone();

        assert_eq!(engine.cancel(), LastAction::Cancelled);
        assert_eq!(engine.state(), &after_first);
    }

    #[test]
    fn test_cancel_before_anything_is_harmless() {
        let (mut engine, recorder) = stocked();
        let before = engine.snapshot();

        assert_eq!(engine.cancel(), LastAction::None);
        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.state().last_action(), LastAction::Cancelled);
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_deposit_into_full_slot_rejected() {
        let (mut engine, recorder) = engine_with(MachineConfig::new(u32::MAX, 0, 0, 1, 1, 50, 50));
        engine.deposit(Denomination::Dime).unwrap();
        let before = engine.state().clone();

        assert!(matches!(
            engine.deposit(Denomination::Quarter),
            Err(VendingError::ReserveFull(Denomination::Quarter))
        ));
        assert_eq!(engine.state().quarters(), u32::MAX);
        assert_eq!(engine.deposited(), Cents(10));
        assert_eq!(engine.state().reserve(), before.reserve());
        assert_eq!(engine.state().last_action(), before.last_action());
        assert_eq!(engine.message(), "Quarter Slot Full");
        assert_eq!(recorder.len(), 2);

        // The cancel still reverses the dime, not the refused quarter.
        assert_eq!(engine.cancel(), LastAction::Deposited(Denomination::Dime));
        assert_eq!(engine.deposited(), Cents::ZERO);

        assert!(matches!(
            engine.deposit_cents(25),
            Err(VendingError::ReserveFull(Denomination::Quarter))
        ));
        assert!(engine.execute(Command::Deposit(Denomination::Quarter)).is_err());
    }

    #[test]
    fn test_deposit_cents_rejects_foreign_coin() {
        let (mut engine, recorder) = stocked();
        engine.deposit(Denomination::Dime).unwrap();
        let before = engine.state().clone();

        assert!(matches!(
            engine.deposit_cents(50),
            Err(VendingError::UnrecognizedCoin(50))
        ));
        assert_eq!(engine.state(), &before);
        assert_eq!(recorder.len(), 2);

        assert_eq!(engine.deposit_cents(5).unwrap(), Cents(15));
    }

    #[test]
    fn test_observer_notified_after_every_operation() {
        let (mut engine, recorder) = stocked();
        engine.deposit(Denomination::Quarter).unwrap();
        let _ = engine.purchase(Product::Cola);
        engine.cancel();
        engine.cancel();

        let snapshots = recorder.snapshots();
        assert_eq!(snapshots.len(), 4);
        assert_eq!(snapshots[0].deposit, Cents(25));
        assert_eq!(snapshots[1].message, "Insufficient Funds For Cola");
        assert_eq!(snapshots[2].deposit, Cents::ZERO);
        assert_eq!(snapshots[3], snapshots[2]);
    }

    #[test]
    fn test_execute_dispatches_commands() {
        let (mut engine, _) = stocked();
        engine
            .execute(Command::Deposit(Denomination::Quarter))
            .unwrap();
        engine
            .execute(Command::Deposit(Denomination::Quarter))
            .unwrap();
        engine.execute(Command::Purchase(Product::Pepsi)).unwrap();
        assert_eq!(engine.pepsi_left(), 9);

        engine.execute(Command::Cancel).unwrap();
        assert_eq!(engine.pepsi_left(), 10);

        assert!(engine.execute(Command::Purchase(Product::Pepsi)).is_ok());
        assert!(engine.execute(Command::Purchase(Product::Pepsi)).is_err());
    }

    #[test]
    fn test_zero_price_config_rejected() {
        let result = TransactionEngine::new(
            MachineConfig::new(0, 0, 0, 1, 1, 50, 0),
            Box::new(RecordingObserver::new()),
        );
        assert!(matches!(result, Err(VendingError::ConfigError(_))));
    }
}
