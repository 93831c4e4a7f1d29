//! Domain layer: money, coins, products, the machine state and its ports.

pub mod action;
pub mod coin;
pub mod command;
pub mod money;
pub mod ports;
pub mod product;
pub mod state;
