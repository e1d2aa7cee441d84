//! Mock device implementations for testing and development.
//!
//! Each mock comes paired with a control handle: the device half is handed
//! to the loop under test, the handle stays with the test to script inputs
//! and observe outputs.

pub mod gpio;
pub mod transport;

pub use gpio::{MockInputPin, MockInputPinHandle, MockOutputPin, MockOutputPinHandle};
pub use transport::{MockTransport, MockTransportHandle};
