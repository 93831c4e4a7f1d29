use super::state::MachineState;

/// Receives a notification after every engine operation, including rejected
/// and no-op ones.
///
/// Implementations re-read whatever they need from the state they are handed.
pub trait StateObserver: Send {
    fn on_state_changed(&mut self, state: &MachineState);
}

pub type StateObserverBox = Box<dyn StateObserver>;
