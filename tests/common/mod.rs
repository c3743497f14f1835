//! Shared fixtures for end-to-end tests

#![allow(dead_code)]

use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;

use tempfile::TempDir;
use tiny_http::{Header, Response, Server};

use earthwalker::config::Config;
use earthwalker::domain::{Challenge, ChallengeResult, Guess, Location, Place};
use earthwalker::server::{AppState, ServerHandle, start_server};
use earthwalker::store::{ChallengeResultStore, ChallengeStore, JsonDirStore};

pub const FRAGMENT: &str = "<script src=\"/public/modify.js\"></script>";

/// Stand-in for the imagery provider.
///
/// - `/maps/@...` returns a viewer page full of provider links
/// - `/maps/photometa/...` returns a labelled metadata packet
/// - `/echo` returns the User-Agent and Accept it received
/// - anything else is a 404 with a provider link in the body
pub fn spawn_fake_provider() -> SocketAddr {
    let server = Server::http("127.0.0.1:0").expect("Failed to bind fake provider");
    let addr = server
        .server_addr()
        .to_ip()
        .expect("Fake provider has no IP address");

    thread::spawn(move || {
        for request in server.incoming_requests() {
            let url = request.url().to_string();
            let header = |name: &'static str| {
                request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv(name))
                    .map(|h| h.value.to_string())
                    .unwrap_or_default()
            };

            let (status, content_type, body) = if url.starts_with("/maps/@") {
                (
                    200,
                    "text/html",
                    format!(
                        "<html><head><title>{url}</title></head><body><a href=\"https://www.google.com/maps\">x</a><a href=\"https://consent.google.com/ml\">c</a></body></html>"
                    ),
                )
            } else if url.starts_with("/maps/photometa/") {
                (
                    200,
                    "application/json",
                    r#")]}'
[[null,["Sumatera Utara","de"],"https://maps.gstatic.com/mapfiles/annotations/icons/a.png"]]"#
                        .to_string(),
                )
            } else if url.starts_with("/echo") {
                (
                    200,
                    "text/plain",
                    format!("{}|{}|{}", header("User-Agent"), header("Accept"), header("Cookie")),
                )
            } else {
                (404, "text/html", "see https://maps.google.com/help".to_string())
            };

            let response = Response::from_data(body.into_bytes())
                .with_status_code(status)
                .with_header(
                    Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes()).unwrap(),
                )
                .with_header(Header::from_bytes(&b"X-Provider"[..], &b"fake"[..]).unwrap());
            let _ = request.respond(response);
        }
    });

    addr
}

/// A running Earthwalker plus everything it reads from disk
pub struct TestApp {
    pub dir: TempDir,
    pub store: JsonDirStore,
    pub handle: ServerHandle,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.handle.addr(), path)
    }
}

/// Start the server against `provider`, with challenge `c1` (three places)
/// and result `r1` holding `guesses` guesses
pub fn start_app(provider: SocketAddr, guesses: usize) -> TestApp {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let public = dir.path().join("public");
    fs::create_dir_all(public.join("modify_frontend")).unwrap();
    fs::write(public.join("modify_frontend/modify.html"), FRAGMENT).unwrap();
    fs::write(public.join("index.html"), "<html>app shell</html>").unwrap();

    let mut config = Config::default();
    config.server.port = 0;
    config.server.workers = 4;
    config.storage.static_path = dir.path().to_path_buf();
    config.storage.data_dir = dir.path().join("data");
    config.provider.viewer_url_template =
        format!("http://{provider}/maps/@{{lat}},{{lng}},3a/data=!1s{{pano}}!2e0");
    config.provider.proxy_origin = format!("http://{provider}");
    config.provider.timeout_secs = 5;

    let store = JsonDirStore::open(&config.storage.data_dir).unwrap();
    let places = vec![
        Place::at(Location::new(50.77, 6.1, "aachen")),
        Place::at(Location::new(-33.86, 151.21, "sydney")),
        Place::at(Location::new(64.14, -21.94, "reykjavik")),
    ];
    ChallengeStore::insert(&store, &Challenge::new("c1", places)).unwrap();
    let mut result = ChallengeResult::new("r1", "c1");
    result.guesses = (0..guesses)
        .map(|round| Guess {
            round,
            location: Location::new(0.0, 0.0, ""),
        })
        .collect();
    ChallengeResultStore::insert(&store, &result).unwrap();

    let state = AppState::from_config(config).expect("Failed to build app state");
    let handle = start_server(Arc::new(state)).expect("Failed to start server");

    TestApp { dir, store, handle }
}

/// Client that reports redirects instead of following them
pub fn client() -> ureq::Agent {
    ureq::AgentBuilder::new().redirects(0).build()
}

/// Issue a GET and return the response whatever its status
pub fn get(agent: &ureq::Agent, url: &str, headers: &[(&str, &str)]) -> ureq::Response {
    let mut request = agent.get(url);
    for (name, value) in headers {
        request = request.set(name, value);
    }
    match request.call() {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(e) => panic!("Request to {url} failed: {e}"),
    }
}
