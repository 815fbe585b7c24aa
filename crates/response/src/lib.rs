//! Outgoing HTTP responses behind a single write contract.
//!
//! A handler builds one of three response kinds, and the server pipeline calls
//! [`HttpResponse::write`] once with a [`ResponseSink`](sink::ResponseSink):
//!
//! - [`HeaderResponse`]: status code, headers and cookies, no body
//! - [`RawResponse`]: a head plus a callback writing the body
//! - [`StreamResponse`]: a head plus a reader copied into the body
//!
//! Every response carries `X-Content-Type-Options: nosniff`. A status code of
//! `0` is sent as `200 OK`, and any other code outside `100..=599` is rejected
//! before anything reaches the sink.
//!
//! # Example
//!
//! ```
//! use http::{HeaderValue, Request, StatusCode};
//! use micro_response::sink::ResponseRecorder;
//! use micro_response::{Cookie, HttpResponse, RawResponse};
//!
//! let mut response = RawResponse::with_cookies(
//!     201,
//!     HeaderValue::from_static("text/plain; charset=utf-8"),
//!     [Cookie::new("session", "abc")],
//!     |w: &mut dyn std::io::Write| -> Result<(), micro_response::BoxError> {
//!         w.write_all(b"hello")?;
//!         Ok(())
//!     },
//! );
//!
//! let (req, ()) = Request::new(()).into_parts();
//! let mut recorder = ResponseRecorder::new();
//! response.write(&mut recorder, &req).unwrap();
//!
//! assert_eq!(recorder.status(), Some(StatusCode::CREATED));
//! assert_eq!(recorder.headers()["set-cookie"], "session=abc");
//! assert_eq!(recorder.body(), b"hello");
//! ```

mod cookies;
mod error;
mod response;

pub mod sink;

pub use cookie::Cookie;
pub use cookies::Cookies;
pub use error::BoxError;
pub use error::ResponseError;
pub use response::HeaderResponse;
pub use response::HttpResponse;
pub use response::RawResponse;
pub use response::StreamResponse;
pub use response::WriteFn;

/// The request a response answers. Responses receive it for symmetry with the
/// rest of the handler pipeline; none of the kinds here read from it.
pub type RequestHead = http::request::Parts;
