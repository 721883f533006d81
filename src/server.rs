//! Network plumbing: an HTTP listener for the page assets and a WebSocket
//! listener where every connection plays its own game.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_channel::mpsc::unbounded;
use futures_util::future::{self, Either};
use futures_util::{pin_mut, StreamExt, TryStreamExt};
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, info_span, warn, Instrument};

use crate::error::{ServerError, ServerResult};
use crate::message::{multi_message_send, parse_input, ServerMessage};
use crate::resources::StaticResource;
use crate::session::GameSession;

/// Pause after a failed accept so persistent errors (e.g. EMFILE) do not spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub async fn serve_http(listener: TcpListener, resources: Arc<StaticResource>) -> ServerResult<()> {
    info!(addr = %listener.local_addr()?, "serving page");
    loop {
        let (stream, addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "failed to accept http connection");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        let resources = Arc::clone(&resources);
        tokio::spawn(async move {
            let service = service_fn(move |req: Request<Incoming>| {
                let response = route(req.method(), req.uri().path(), &resources);
                async move { Ok::<_, Infallible>(response) }
            });
            if let Err(e) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                debug!(%addr, error = %e, "http connection failed");
            }
        });
    }
}

/// Maps a request to one of the static assets.
pub fn route(method: &Method, path: &str, resources: &StaticResource) -> Response<Full<Bytes>> {
    if *method != Method::GET {
        let mut response = respond(
            StatusCode::METHOD_NOT_ALLOWED,
            "text/plain; charset=utf-8",
            b"Method not allowed".to_vec(),
        );
        response
            .headers_mut()
            .insert(ALLOW, HeaderValue::from_static("GET"));
        return response;
    }
    match path {
        "/" | "/index.html" => respond(
            StatusCode::OK,
            "text/html; charset=utf-8",
            resources.homepage.clone(),
        ),
        "/app.js" => respond(
            StatusCode::OK,
            "text/javascript; charset=utf-8",
            resources.javascript.clone(),
        ),
        "/grid.css" => respond(
            StatusCode::OK,
            "text/css; charset=utf-8",
            resources.css.clone(),
        ),
        _ => respond(
            StatusCode::NOT_FOUND,
            "text/plain; charset=utf-8",
            b"Not found".to_vec(),
        ),
    }
}

fn respond(status: StatusCode, content_type: &'static str, body: Vec<u8>) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

pub async fn serve_ws(listener: TcpListener, board_size: usize) -> ServerResult<()> {
    info!(addr = %listener.local_addr()?, board_size, "accepting game connections");
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                tokio::spawn(
                    handle_connection(stream, addr, board_size)
                        .instrument(info_span!("connection", %addr)),
                );
            }
            Err(e) => {
                warn!(error = %e, "failed to accept game connection");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
            }
        }
    }
}

async fn handle_connection(raw_stream: TcpStream, addr: SocketAddr, board_size: usize) {
    info!("incoming connection from {addr}");
    match play_session(raw_stream, board_size).await {
        Ok(()) => info!("{addr} disconnected"),
        Err(e) => warn!(error = %e, "{addr} disconnected with error"),
    }
}

/// Runs one game over an accepted socket until either side hangs up.
async fn play_session(raw_stream: TcpStream, board_size: usize) -> ServerResult<()> {
    let ws_stream = tokio_tungstenite::accept_async(raw_stream).await?;
    debug!("websocket handshake complete");

    let (outgoing, incoming) = ws_stream.split();
    let (tx, rx) = unbounded();
    let mut session = GameSession::new(board_size)?;
    multi_message_send(&tx, &session.greeting());

    let outgoing_messages = rx.map(Ok).forward(outgoing);
    let input_messages = incoming.try_for_each(|msg| {
        if msg.is_text() || msg.is_binary() {
            let replies = parse_input(&msg)
                .and_then(|input| session.process_input(input).map_err(ServerError::from))
                .unwrap_or_else(|e| {
                    warn!(error = %e, "rejected client input");
                    vec![ServerMessage::error(e.to_string())]
                });
            multi_message_send(&tx, &replies);
        }
        future::ok(())
    });

    pin_mut!(outgoing_messages, input_messages);
    match future::select(outgoing_messages, input_messages).await {
        Either::Left((result, _)) => result?,
        Either::Right((result, _)) => result?,
    }
    Ok(())
}
