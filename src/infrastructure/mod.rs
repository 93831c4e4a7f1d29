//! Observer adapters that need nothing beyond the process itself.

pub mod observers;
