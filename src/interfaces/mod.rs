//! Edges of the machine: command scripts in, snapshots and the display out.

pub mod console;
pub mod csv;
