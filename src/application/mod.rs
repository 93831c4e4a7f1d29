//! Application layer containing the transaction engine.
//!
//! This module defines the `TransactionEngine`, the single owner of the
//! machine state. It validates customer commands, applies them, and notifies
//! the injected observer after each one.

pub mod engine;
