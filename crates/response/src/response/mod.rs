//! Response kinds and the uniform write contract they share.
//!
//! - [`HeaderResponse`]: status, headers and cookies, no body
//! - [`RawResponse`]: a head plus a callback that writes the body
//! - [`StreamResponse`]: a head plus a reader copied into the body
//!
//! The body-carrying kinds embed a [`HeaderResponse`] and dereference to it,
//! so `headers()` and `cookies()` are available on all of them. Each one runs
//! the head prologue first and stops there if it fails.

use crate::RequestHead;
use crate::error::ResponseError;
use crate::sink::ResponseSink;

mod header;
pub use header::HeaderResponse;

mod raw;
pub use raw::RawResponse;
pub use raw::WriteFn;

mod stream;
pub use stream::StreamResponse;

/// A response that knows how to write itself to a [`ResponseSink`].
///
/// The trait is object safe, so a router can hold `Box<dyn HttpResponse>`
/// regardless of which kind a handler produced.
pub trait HttpResponse {
    /// Writes the whole response: head first, then the body if there is one.
    ///
    /// Calling it twice sends the head twice; what the sink does with that is
    /// up to the sink.
    ///
    /// # Errors
    ///
    /// Fails when the head can't be written, or when the body fails midway.
    fn write(&mut self, sink: &mut dyn ResponseSink, req: &RequestHead) -> Result<(), ResponseError>;
}

impl<T: HttpResponse + ?Sized> HttpResponse for Box<T> {
    fn write(&mut self, sink: &mut dyn ResponseSink, req: &RequestHead) -> Result<(), ResponseError> {
        (**self).write(sink, req)
    }
}

impl<T: HttpResponse + ?Sized> HttpResponse for &mut T {
    fn write(&mut self, sink: &mut dyn ResponseSink, req: &RequestHead) -> Result<(), ResponseError> {
        (**self).write(sink, req)
    }
}
