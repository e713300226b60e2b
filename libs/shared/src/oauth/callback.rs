//! Loopback HTTP listener that receives the OAuth redirect
//!
//! The DevHub API finishes the GitHub exchange and redirects the browser to
//! `http://127.0.0.1:<port>/callback?app_token=...&github_token=...`, or to
//! `...?error=<message>` when the flow failed. Every connection is served on
//! its own task; only the first callback is delivered.

use super::config::{CALLBACK_PATH, CALLBACK_PORT_ATTEMPTS};
use super::error::{OAuthError, OAuthResult};
use crate::models::auth::OAuthParams;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// How long a connection may stay silent before it is dropped
const READ_TIMEOUT: Duration = Duration::from_secs(10);

const SUCCESS_PAGE: &str = "<!doctype html><html><body><h2>Signed in to DevHub</h2><p>You can close this window and return to the terminal.</p></body></html>";
const FAILURE_PAGE: &str = "<!doctype html><html><body><h2>Sign-in did not complete</h2><p>You can close this window and return to the terminal.</p></body></html>";

/// What an incoming request asks for
#[derive(Debug)]
pub enum CallbackRequest {
    /// The OAuth redirect, carrying either params or the provider's error
    Callback(OAuthResult<OAuthParams>),
    /// CORS preflight
    Preflight,
    /// Anything else
    NotFound,
}

/// Running callback listener
pub struct CallbackServer {
    port: u16,
    rx: mpsc::Receiver<OAuthResult<OAuthParams>>,
    handle: JoinHandle<()>,
}

impl CallbackServer {
    /// Bind the first free loopback port starting at `first_port` and start
    /// accepting connections
    pub async fn start(first_port: u16) -> OAuthResult<Self> {
        let (listener, port) = bind_listener(first_port).await?;
        tracing::debug!(port, "OAuth callback server listening");

        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(serve(listener, tx));

        Ok(Self { port, rx, handle })
    }

    /// Port the listener is bound to
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Wait for the OAuth redirect
    pub async fn wait(&mut self) -> OAuthResult<OAuthParams> {
        match self.rx.recv().await {
            Some(result) => result,
            None => Err(OAuthError::callback_server("listener stopped unexpectedly")),
        }
    }
}

impl Drop for CallbackServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn bind_listener(first_port: u16) -> OAuthResult<(TcpListener, u16)> {
    let attempts = if first_port == 0 {
        1
    } else {
        CALLBACK_PORT_ATTEMPTS
    };

    for offset in 0..attempts {
        let Some(port) = first_port.checked_add(offset) else {
            break;
        };
        match TcpListener::bind(("127.0.0.1", port)).await {
            Ok(listener) => {
                let bound = listener.local_addr()?.port();
                return Ok((listener, bound));
            }
            Err(e) => {
                tracing::debug!(port, error = %e, "callback port unavailable");
            }
        }
    }

    Err(OAuthError::callback_server(format!(
        "no free port between {} and {}",
        first_port,
        first_port.saturating_add(attempts - 1)
    )))
}

async fn serve(listener: TcpListener, tx: mpsc::Sender<OAuthResult<OAuthParams>>) {
    loop {
        let (socket, _addr) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!("Error accepting callback connection: {}", e);
                continue;
            }
        };

        // Idle or slow connections must not hold up the redirect
        tokio::spawn(handle_connection(socket, tx.clone()));
    }
}

async fn handle_connection(mut socket: TcpStream, tx: mpsc::Sender<OAuthResult<OAuthParams>>) {
    let mut buffer = [0; 4096];
    let n = match tokio::time::timeout(READ_TIMEOUT, socket.read(&mut buffer)).await {
        Ok(Ok(n)) => n,
        Ok(Err(e)) => {
            tracing::debug!(error = %e, "callback connection read failed");
            return;
        }
        Err(_) => {
            tracing::debug!("callback connection sent nothing, dropping it");
            return;
        }
    };
    let request = String::from_utf8_lossy(&buffer[..n]);

    match parse_request(&request) {
        CallbackRequest::Callback(result) => {
            let page = if result.is_ok() {
                SUCCESS_PAGE
            } else {
                FAILURE_PAGE
            };
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                page.len(),
                page
            );
            socket.write_all(response.as_bytes()).await.ok();
            // Only the first redirect counts
            if tx.try_send(result).is_err() {
                tracing::debug!("ignoring repeated OAuth callback");
            }
        }
        CallbackRequest::Preflight => {
            let response = "HTTP/1.1 200 OK\r\nAccess-Control-Allow-Origin: *\r\nAccess-Control-Allow-Methods: GET, OPTIONS\r\nAccess-Control-Allow-Headers: Content-Type\r\nContent-Length: 0\r\n\r\n";
            socket.write_all(response.as_bytes()).await.ok();
        }
        CallbackRequest::NotFound => {
            let response = "HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\nContent-Length: 9\r\nConnection: close\r\n\r\nNot Found";
            socket.write_all(response.as_bytes()).await.ok();
        }
    }
}

/// Classify a raw HTTP request
pub fn parse_request(request: &str) -> CallbackRequest {
    let mut parts = request.lines().next().unwrap_or_default().split_whitespace();
    let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
        return CallbackRequest::NotFound;
    };

    if method == "OPTIONS" {
        return CallbackRequest::Preflight;
    }
    if method != "GET" {
        return CallbackRequest::NotFound;
    }

    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    if path != CALLBACK_PATH {
        return CallbackRequest::NotFound;
    }

    CallbackRequest::Callback(parse_query(query))
}

fn parse_query(query: &str) -> OAuthResult<OAuthParams> {
    let mut params = OAuthParams::default();

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = decode(value);
        match key {
            "error" => return Err(OAuthError::from_message(value)),
            "app_token" => params.app_token = Some(value),
            "github_token" => params.github_token = Some(value),
            "github_scope" => params.github_scope = Some(value),
            "github_token_type" => params.github_token_type = Some(value),
            _ => {}
        }
    }

    Ok(params)
}

fn decode(value: &str) -> String {
    let value = value.replace('+', " ");
    urlencoding::decode(&value)
        .map(|v| v.into_owned())
        .unwrap_or(value)
}
