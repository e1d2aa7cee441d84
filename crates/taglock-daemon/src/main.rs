//! taglockd — the taglock access-control daemon.
//!
//! Start-up order matters and happens exactly once, before either loop
//! runs: load configuration, open the serial link, wire the GPIO pins,
//! power the reader, create the bounded event channel, then spawn the
//! reader loop and the lock controller.

mod config;

use std::path::Path;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use taglock_controller::{LockController, event_channel};
use taglock_hardware::OutputPin;
use taglock_hardware::SerialTransport;
use taglock_hardware::mock::{MockInputPin, MockOutputPin};
use taglock_reader::ReaderLoop;

use crate::config::DaemonConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => DaemonConfig::load(Path::new(&path))?,
        None => DaemonConfig::default(),
    };

    info!(version = taglock_core::VERSION, "starting taglockd");
    run(config).await
}

async fn run(config: DaemonConfig) -> anyhow::Result<()> {
    let transport = SerialTransport::open(&config.serial.port, config.serial.baud)?;

    // GPIO wiring. Pin drivers are board-specific; this build runs the mock
    // backend, which keeps levels observable while the relay/override
    // traffic shows up in the controller's log output.
    info!(
        reader_enable = config.pins.reader_enable,
        relay = config.pins.relay,
        override_input = config.pins.override_input,
        "gpio wiring (mock backend)"
    );
    let (mut reader_enable, _enable_level) = MockOutputPin::new(false);
    let (relay, _relay_level) = MockOutputPin::new(true);
    let (override_pin, _override_level) = MockInputPin::new(true);

    // Power the reader before either loop starts talking to it.
    reader_enable.set_level(true).await?;

    let (events_tx, events_rx) = event_channel();

    let controller = LockController::new(relay, override_pin, events_rx)
        .with_relock_delay(Duration::from_millis(config.relock_delay_ms));
    let reader = ReaderLoop::new(transport, events_tx).with_settings(config.reader);

    let controller_task = tokio::spawn(controller.run());
    let reader_task = tokio::spawn(reader.run());

    let (controller_result, reader_result) = tokio::try_join!(controller_task, reader_task)?;
    controller_result?;
    reader_result?;
    Ok(())
}
