//! The reader loop: the producer half of the taglock pipeline.
//!
//! Pushes the start-up configuration to the reader, then polls for tags
//! forever: issue a real-time inventory, read and decode whatever comes
//! back, hand each tag detection to the event channel, re-arm the working
//! antenna, repeat. Commands are paced 100 ms apart, matching what the
//! reader's firmware tolerates.
//!
//! Transport failures never stop the loop — they are logged and the next
//! paced round retries, with no backoff. The only exit condition is the
//! event channel closing (the controller went away).

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, info, trace, warn};

use taglock_core::constants::{COMMAND_PACING_MS, READ_TIMEOUT_MS};
use taglock_core::{Error, Result, TagEvent};
use taglock_hardware::Transport;
use taglock_protocol::{CommandPacket, FrameBuffer, commands, extract_tag};

use crate::settings::ReaderSettings;

/// Read chunk size, sized to the reader's burst output.
const READ_CHUNK: usize = 512;

/// Issues commands to the reader and turns its replies into tag events.
pub struct ReaderLoop<T> {
    transport: T,
    events: mpsc::Sender<TagEvent>,
    frames: FrameBuffer,
    settings: ReaderSettings,
    pacing: Duration,
    read_timeout: Duration,
}

impl<T: Transport> ReaderLoop<T> {
    /// Create a reader loop with default settings and stock pacing.
    pub fn new(transport: T, events: mpsc::Sender<TagEvent>) -> Self {
        Self {
            transport,
            events,
            frames: FrameBuffer::new(),
            settings: ReaderSettings::default(),
            pacing: Duration::from_millis(COMMAND_PACING_MS),
            read_timeout: Duration::from_millis(READ_TIMEOUT_MS),
        }
    }

    /// Replace the reader settings applied by [`configure`](Self::configure).
    #[must_use]
    pub fn with_settings(mut self, settings: ReaderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Override the inter-command pacing.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Push the start-up configuration sequence to the reader.
    ///
    /// One command at a time, reading the reply between commands, in the
    /// order the reader expects: spectrum, baud rate, DRM, antenna detect,
    /// working antenna, output power, then a firmware-version query as the
    /// final liveness check.
    ///
    /// # Errors
    /// Only a closed event channel aborts; command failures are logged and
    /// the sequence continues so a flaky link degrades instead of halting.
    pub async fn configure(&mut self) -> Result<()> {
        let s = &self.settings;
        let sequence: [(CommandPacket, &str); 7] = [
            (
                commands::set_frequency_region(s.region, s.start_channel, s.stop_channel),
                "frequency region",
            ),
            (commands::set_baud_rate(s.baud_rate), "baud rate"),
            (commands::set_drm_mode(s.drm), "DRM mode"),
            (commands::set_antenna_detect(s.antenna_detect), "antenna detect"),
            (commands::set_working_antenna(s.antenna), "working antenna"),
            (commands::set_output_power(s.power), "output power"),
            (commands::get_firmware_version(), "firmware version"),
        ];

        for (packet, what) in sequence {
            self.send_command(&packet, what).await;
            self.pace().await;
            self.drain_responses().await?;
            self.pace().await;
        }

        info!("reader configured, system ready");
        Ok(())
    }

    /// Run the loop until the event channel closes.
    pub async fn run(mut self) -> Result<()> {
        match self.drive().await {
            Err(Error::ChannelClosed) => {
                info!("event channel closed, reader loop stopping");
                Ok(())
            }
            other => other,
        }
    }

    async fn drive(&mut self) -> Result<()> {
        self.configure().await?;
        loop {
            self.poll_once().await?;
        }
    }

    /// One inventory round: poll for tags, then re-arm the working antenna.
    ///
    /// # Errors
    /// Returns `Error::ChannelClosed` when the controller side of the event
    /// channel is gone; transport failures are logged and retried on the
    /// next round.
    pub async fn poll_once(&mut self) -> Result<()> {
        let inventory = commands::start_realtime_inventory(self.settings.hop_channels);
        self.send_command(&inventory, "realtime inventory").await;
        self.pace().await;
        self.drain_responses().await?;
        self.pace().await;

        // The deployed firmware re-selects the antenna every round; keep
        // that behavior, it reconfirms the RF path is up.
        let antenna = commands::set_working_antenna(self.settings.antenna);
        self.send_command(&antenna, "working antenna").await;
        self.pace().await;
        self.drain_responses().await?;
        self.pace().await;

        Ok(())
    }

    async fn send_command(&mut self, packet: &CommandPacket, what: &str) {
        let bytes = packet.to_bytes();
        match self.transport.write(&bytes).await {
            Ok(_) => trace!(
                command = format_args!("{:#04X}", packet.command()),
                what,
                "command sent"
            ),
            Err(error) => warn!(%error, what, "command write failed, retrying next round"),
        }
    }

    /// Read once, feed the frame buffer, and forward any tag detections.
    async fn drain_responses(&mut self) -> Result<()> {
        let mut buf = [0u8; READ_CHUNK];
        match self.transport.read(&mut buf, self.read_timeout).await {
            Ok(0) => {}
            Ok(n) => {
                self.frames.feed(&buf[..n]);
                while let Some(frame) = self.frames.next_frame() {
                    match extract_tag(&frame) {
                        Some(event) => {
                            info!(epc = %event.epc_hex(), antenna = event.freq_ant, "tag found");
                            // Backpressure point: suspends while the
                            // controller is mid-cycle and the queue is full.
                            self.events
                                .send(event)
                                .await
                                .map_err(|_| Error::ChannelClosed)?;
                        }
                        None => debug!(
                            command = format_args!("{:#04X}", frame.command),
                            data_len = frame.data.len(),
                            "reader reply"
                        ),
                    }
                }
            }
            Err(error) => warn!(%error, "serial read failed, retrying next poll"),
        }
        Ok(())
    }

    async fn pace(&mut self) {
        time::sleep(self.pacing).await;
    }
}
