//! HTTP server for the game and the provider proxy
//!
//! Routes:
//! - GET /play - serve the player's next place (or redirect)
//! - GET /config/tileserver, /config/nolabeltileserver - tile server URLs
//! - GET /public/* - frontend files
//! - GET /, /join, /summary - frontend app shell
//! - GET anything else - proxied to the provider

mod handlers;
mod reply;
mod request;
mod state;

pub use handlers::{
    content_type_for, handle_passthrough, handle_play, join_location, serve_frontend,
    serve_public,
};
pub use reply::Reply;
pub use request::Inbound;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use anyhow::{Result, anyhow};
use tiny_http::Server;
use tracing::{debug, error, info};

/// Page routes owned by the frontend app
const FRONTEND_ROUTES: [&str; 3] = ["/", "/join", "/summary"];

/// Dispatch one request
pub fn route(state: &AppState, request: &Inbound) -> Reply {
    if request.method != "GET" {
        return Reply::text(405, "method not allowed");
    }

    match request.path() {
        "/play" => {
            let mut cookies = request.cookies();
            let mut reply = handle_play(state, request.query(), &mut cookies);
            for value in cookies.set_cookie_headers() {
                reply = reply.with_header("Set-Cookie", value);
            }
            reply
        }
        "/config/tileserver" => handlers::handle_tile_server(state),
        "/config/nolabeltileserver" => handlers::handle_no_label_tile_server(state),
        p if FRONTEND_ROUTES.contains(&p) => serve_frontend(&state.config.public_dir()),
        p if p.starts_with("/public/") => {
            serve_public(&state.config.public_dir(), &p["/public/".len()..])
        }
        _ => handle_passthrough(state, request),
    }
}

/// Running worker pool; dropping it leaves the workers running
pub struct ServerHandle {
    server: Arc<Server>,
    addr: SocketAddr,
    stopping: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
}

impl ServerHandle {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Block until every worker exits
    pub fn join(self) {
        for worker in self.workers {
            let _ = worker.join();
        }
    }

    /// Stop accepting requests and wait for in-flight ones to finish
    pub fn shutdown(self) {
        self.stopping.store(true, Ordering::SeqCst);
        for _ in &self.workers {
            self.server.unblock();
        }
        self.join();
    }
}

/// Bind `bind:port` and start `workers` request threads
pub fn start_server(state: Arc<AppState>) -> Result<ServerHandle> {
    let settings = &state.config.server;
    let bind_addr = format!("{}:{}", settings.bind, settings.port);
    let server = Server::http(&bind_addr)
        .map_err(|e| anyhow!("Failed to start server on {}: {}", bind_addr, e))?;
    let addr = server
        .server_addr()
        .to_ip()
        .ok_or_else(|| anyhow!("Server on {} has no IP address", bind_addr))?;
    let server = Arc::new(server);
    let stopping = Arc::new(AtomicBool::new(false));

    let worker_count = settings.workers.max(1);
    let workers = (0..worker_count)
        .map(|id| {
            let server = Arc::clone(&server);
            let state = Arc::clone(&state);
            let stopping = Arc::clone(&stopping);
            thread::Builder::new()
                .name(format!("earthwalker-http-{id}"))
                .spawn(move || worker_loop(&server, &state, &stopping))
                .map_err(|e| anyhow!("Failed to spawn worker {}: {}", id, e))
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        "[earthwalker:http] Server listening on http://{} ({} workers)",
        addr, worker_count
    );

    Ok(ServerHandle {
        server,
        addr,
        stopping,
        workers,
    })
}

fn worker_loop(server: &Server, state: &AppState, stopping: &AtomicBool) {
    loop {
        let request = match server.recv() {
            Ok(request) => request,
            Err(e) => {
                if stopping.load(Ordering::SeqCst) {
                    return;
                }
                error!("[earthwalker:http] Failed to receive request: {}", e);
                continue;
            }
        };

        let inbound = Inbound::from_tiny(&request);
        let reply = route(state, &inbound);
        debug!(
            "[earthwalker:http] {} {} -> {}",
            inbound.method, inbound.url, reply.status
        );
        if let Err(e) = request.respond(reply.into_response()) {
            debug!("[earthwalker:http] Client went away: {}", e);
        }
    }
}
