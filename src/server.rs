// ABOUTME: Live presentation host for the lazy-slides application
// ABOUTME: Serves the page over HTTP and relays session messages over WebSockets

use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::fs;
use std::io::ErrorKind;
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tiny_http::{Header, Response, Server, StatusCode};
use tungstenite::Message;

use crate::config::Config;
use crate::default_content::DEFAULT_DOCUMENT;
use crate::errors::{Result, SlidesError};
use crate::html::{self, PageConfig};
use crate::render::ComrakRenderer;
use crate::sync::{ClientMessage, ServerMessage, Session, SessionEvent};
use crate::utils;
use crate::watch::{self, WatchConfig};

/// How long a client connection blocks on reads before flushing pushes.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Fans serialized session messages out to every connected client.
#[derive(Clone, Default)]
pub struct Broadcaster {
    clients: Arc<Mutex<Vec<Sender<String>>>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Receiver<String> {
        let (tx, rx) = mpsc::channel();
        self.clients.lock().push(tx);
        rx
    }

    /// Send to all clients, pruning those that have disconnected.
    pub fn publish(&self, message: &ServerMessage) {
        let payload = match serde_json::to_string(message) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Failed to serialize server message: {}", e);
                return;
            }
        };
        self.clients.lock().retain(|tx| tx.send(payload.clone()).is_ok());
    }

    pub fn client_count(&self) -> usize {
        self.clients.lock().len()
    }
}

pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css",
        "js" => "application/javascript",
        "md" | "txt" => "text/plain; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Serve the page at `/` and files next to the document everywhere else.
fn start_http_server(host: &str, port: u16, page: String, asset_root: PathBuf) -> Result<()> {
    let server = Server::http(format!("{}:{}", host, port))
        .map_err(|e| SlidesError::ServerError(format!("Failed to start HTTP server: {}", e)))?;

    let address = format!("{}:{}", host, port);
    thread::spawn(move || {
        info!("HTTP server listening on http://{}", address);

        for request in server.incoming_requests() {
            let target = request.url().to_string();
            let (body, status, path) = match utils::resolve_asset(&asset_root, &target) {
                None => (page.clone().into_bytes(), 200, PathBuf::from("index.html")),
                Some(path) if path.is_file() => match fs::read(&path) {
                    Ok(content) => (content, 200, path),
                    Err(e) => {
                        error!("Failed to read file {:?}: {}", path, e);
                        (format!("Failed to read file: {}", e).into_bytes(), 500, path)
                    }
                },
                Some(path) => (b"404 Not Found".to_vec(), 404, path),
            };
            debug!("{} {} -> {}", request.method(), target, status);

            let mut response = Response::from_data(body).with_status_code(StatusCode(status));
            if status == 200 {
                if let Ok(header) = Header::from_bytes("Content-Type", content_type(&path)) {
                    response = response.with_header(header);
                }
            }
            if let Err(e) = request.respond(response) {
                error!("Failed to send response: {}", e);
            }
        }
    });

    Ok(())
}

fn start_ws_server(
    host: &str,
    port: u16,
    broadcaster: Broadcaster,
    events: Sender<SessionEvent>,
) -> Result<()> {
    let listener = TcpListener::bind((host, port))?;
    info!("WebSocket endpoint listening on ws://{}:{}", host, port);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    continue;
                }
            };
            let outgoing = broadcaster.subscribe();
            let events = events.clone();
            thread::spawn(move || {
                if let Err(e) = serve_client(stream, outgoing, events) {
                    warn!("Client connection ended with error: {}", e);
                }
            });
        }
    });

    Ok(())
}

fn serve_client(
    stream: TcpStream,
    outgoing: Receiver<String>,
    events: Sender<SessionEvent>,
) -> Result<()> {
    let peer = stream.peer_addr().ok();
    let mut socket = tungstenite::accept(stream)
        .map_err(|e| SlidesError::ServerError(format!("WebSocket handshake failed: {}", e)))?;
    socket.get_ref().set_read_timeout(Some(POLL_INTERVAL))?;
    info!("Client connected: {:?}", peer);

    loop {
        match socket.read() {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(message) => {
                    if events.send(SessionEvent::Client(message)).is_err() {
                        break;
                    }
                }
                Err(e) => warn!("Ignoring malformed client message: {}", e),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(tungstenite::Error::Io(e))
                if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {}
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => break,
            Err(e) => return Err(e.into()),
        }

        for payload in outgoing.try_iter() {
            socket.send(Message::Text(payload))?;
        }
    }

    info!("Client disconnected: {:?}", peer);
    Ok(())
}

/// Run the live editor/presenter until the process is stopped. Without an
/// input file the built-in document is presented and nothing is watched.
pub fn serve(config: &Config, input: Option<&Path>) -> Result<()> {
    let document = match input {
        Some(path) => {
            utils::validate_file_exists(path)?;
            html::read_document(path)?
        }
        None => DEFAULT_DOCUMENT.to_string(),
    };

    let themes = config.theme_registry()?;
    let session = Session::new(
        config.parser(),
        themes.clone(),
        Box::new(ComrakRenderer::default()),
        document,
    );
    info!(
        "Loaded {} slides, leading content policy: {}",
        session.controller().slides().len(),
        config.leading_content
    );

    let css_files = config.css_resources();
    let page = html::generate_page(
        &PageConfig {
            themes: &themes,
            css_files: &css_files,
            embed_resources: config.embed_resources,
            ws_port: config.ws_port(),
        },
        &session.view(),
        session.document(),
    );

    let (tx, rx) = mpsc::channel();
    let broadcaster = Broadcaster::new();
    let asset_root = input
        .map(utils::parent_or_current)
        .unwrap_or_else(|| PathBuf::from("."));

    start_http_server(&config.host, config.port, page, asset_root)?;
    start_ws_server(&config.host, config.ws_port(), broadcaster.clone(), tx.clone())?;

    let _watcher = match input {
        Some(path) => Some(watch::watch_document(
            &WatchConfig {
                markdown_path: path.to_path_buf(),
                debounce_ms: config.debounce_ms,
            },
            tx,
        )?),
        None => None,
    };

    println!(
        "Presenting on http://{}:{} (Press Ctrl+C to stop)",
        config.host, config.port
    );

    session.run(rx, |message| broadcaster.publish(message));
    Ok(())
}
