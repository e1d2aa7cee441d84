//! Reader loop: the producer half of the taglock pipeline.
//!
//! [`ReaderLoop`] owns the serial [`Transport`](taglock_hardware::Transport)
//! and the sender side of the tag-event channel. It configures the UHF
//! reader once at start-up ([`ReaderSettings`]), then polls real-time
//! inventory forever, pushing one [`TagEvent`](taglock_core::TagEvent) per
//! detected tag.

pub mod poller;
pub mod settings;

pub use poller::ReaderLoop;
pub use settings::ReaderSettings;
