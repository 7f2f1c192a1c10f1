//! Application layer: the stream client's use cases and ports.
//!
//! # What use cases does the client have?
//!
//! - **`reader`** – Drains one live connection's inbound frames, decodes each
//!   into an [`Event`](opsdeck_core::Event), and hands it to the dispatch
//!   sink in arrival order.
//!
//! - **`writer`** – Drains the intent intake queue, filters out kinds the
//!   gateway must never see, and transmits the rest as frames on the same
//!   connection.
//!
//! - **`supervisor`** – Owns the connection lifecycle: connect, run the two
//!   halves until one fails, report the failure as an `APP_ERROR` event, wait
//!   out the retry delay, reconnect.  Forever.
//!
//! Two port modules define the seams the use cases are written against:
//! [`transport`] abstracts the WebSocket (implemented in the infrastructure
//! layer) and [`sink`] abstracts the consumer of decoded events.  Keeping
//! both as traits lets every use case run against scripted doubles in tests.

pub mod reader;
pub mod sink;
pub mod supervisor;
pub mod transport;
pub mod writer;

pub use reader::InboundReader;
pub use sink::{DispatchSink, SinkClosed};
pub use supervisor::{start, StreamHandle, StreamStopped};
pub use transport::{Connection, Connector, FrameSink, FrameSource};
pub use writer::OutboundWriter;
