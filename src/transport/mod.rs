//! HTTP transport for the server under test.

mod http;
pub mod lines;

pub use http::{HttpTransport, TransportError};
pub use lines::{decode_lines, MAX_LINE_BYTES};
