//! The destination a response is written to.
//!
//! A [`ResponseSink`] is the host stack's view of one outgoing response: a
//! header multimap that can be appended to, a status line that is committed
//! once, and a byte stream for the body. Responses drive a sink in a fixed
//! order: headers and cookies, then the status, then body bytes.
//!
//! Two sinks ship with the crate:
//!
//! - [`ResponseRecorder`]: keeps everything in memory, handy for tests
//! - [`WireSink`]: serializes an HTTP/1.1 response onto any [`std::io::Write`]

use http::{HeaderMap, StatusCode};
use std::io;

mod recorder;
pub use recorder::ResponseRecorder;

mod wire;
pub use wire::WireSink;

/// An outgoing response as seen by the code producing it.
///
/// Body bytes go through the [`io::Write`] supertrait. Implementations decide
/// what happens when the status is committed more than once; the sinks in
/// this crate keep the first status and ignore the rest.
pub trait ResponseSink: io::Write {
    /// Returns the header set that will be sent when the status is committed.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Commits the status code, and with it every header added so far.
    fn write_status(&mut self, status: StatusCode) -> io::Result<()>;
}
