use crate::domain::ports::StateObserver;
use crate::domain::state::{MachineSnapshot, MachineState};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Traces every state change at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl StateObserver for LoggingObserver {
    fn on_state_changed(&mut self, state: &MachineState) {
        debug!(
            deposit = %state.deposit(),
            cola = state.cola_left(),
            pepsi = state.pepsi_left(),
            quarters = state.quarters(),
            dimes = state.dimes(),
            nickels = state.nickels(),
            message = state.message(),
            "State changed"
        );
    }
}

/// Keeps a snapshot of the state at every notification.
///
/// Clones share the same history, so one clone can be handed to the engine
/// while another is kept to inspect what the engine reported.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    snapshots: Arc<Mutex<Vec<MachineSnapshot>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn history(&self) -> MutexGuard<'_, Vec<MachineSnapshot>> {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshots(&self) -> Vec<MachineSnapshot> {
        self.history().clone()
    }

    pub fn last(&self) -> Option<MachineSnapshot> {
        self.history().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.history().len()
    }

    pub fn is_empty(&self) -> bool {
        self.history().is_empty()
    }
}

impl StateObserver for RecordingObserver {
    fn on_state_changed(&mut self, state: &MachineState) {
        self.history().push(state.snapshot());
    }
}
