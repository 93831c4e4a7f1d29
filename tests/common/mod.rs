#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;
use vendsim::application::engine::TransactionEngine;
use vendsim::config::MachineConfig;
use vendsim::infrastructure::observers::RecordingObserver;

/// Ten of every coin, ten of every drink, both drinks at ¢50.
pub fn stocked_config() -> MachineConfig {
    MachineConfig::new(10, 10, 10, 10, 10, 50, 50)
}

pub fn engine(config: MachineConfig) -> (TransactionEngine, RecordingObserver) {
    let recorder = RecordingObserver::new();
    let engine = TransactionEngine::new(config, Box::new(recorder.clone()))
        .expect("valid machine config");
    (engine, recorder)
}

/// Writes a command script (header included) to a temp file.
pub fn script(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "action, item").unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}
