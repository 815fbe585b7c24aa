use http::HeaderValue;
use micro_response::sink::WireSink;
use micro_response::{BoxError, Cookie, HttpResponse, RawResponse};
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!(port = 3000, "start listening");
    let listener = match TcpListener::bind("127.0.0.1:3000") {
        Ok(listener) => listener,
        Err(e) => {
            error!(cause = %e, "bind server error");
            return;
        }
    };

    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                warn!(cause = %e, "failed to accept");
                continue;
            }
        };

        if let Err(e) = serve(stream) {
            error!(cause = %e, "failed to serve connection");
        }
    }
}

fn serve(stream: TcpStream) -> Result<(), BoxError> {
    // drain the request head, this demo answers every request the same way
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut line = String::new();
    while reader.read_line(&mut line)? > 2 {
        line.clear();
    }

    let mut response = RawResponse::with_cookies(
        200,
        HeaderValue::from_static("text/plain; charset=utf-8"),
        [Cookie::build(("visited", "yes")).path("/").build()],
        |w: &mut dyn Write| -> Result<(), BoxError> {
            w.write_all(b"hello world")?;
            Ok(())
        },
    );

    let (req, ()) = http::Request::new(()).into_parts();
    let mut sink = WireSink::new(stream);
    response.write(&mut sink, &req)?;
    sink.flush()?;
    Ok(())
}
