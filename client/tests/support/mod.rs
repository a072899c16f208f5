//! Actix Web stub that plays the remote story API.
//!
//! Each stub answers from a fixed list of canned replies keyed by method and
//! raw path, and records every request it receives so tests can assert on
//! token placement and encoding.

use std::net::TcpListener;
use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use reqwest::Url;
use serde_json::Value;

/// Reply served for one method and path.
#[derive(Debug, Clone)]
pub struct Canned {
    pub method: &'static str,
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

impl Canned {
    pub fn json(method: &'static str, path: &'static str, status: u16, body: &Value) -> Self {
        Self {
            method,
            path,
            status,
            body: body.to_string(),
        }
    }

    pub fn raw(method: &'static str, path: &'static str, status: u16, body: &str) -> Self {
        Self {
            method,
            path,
            status,
            body: body.to_owned(),
        }
    }
}

/// One request as the stub saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
    pub body: Option<Value>,
}

pub struct StubState {
    replies: Vec<Canned>,
    recorded: Mutex<Vec<Recorded>>,
}

pub struct StubApi {
    pub base_url: Url,
    state: web::Data<StubState>,
    handle: ServerHandle,
}

impl StubApi {
    /// Requests received so far.
    pub fn recorded(&self) -> Vec<Recorded> {
        self.state
            .recorded
            .lock()
            .expect("recorded requests lock")
            .clone()
    }

    /// The only request received, failing if there was not exactly one.
    pub fn single_request(&self) -> Recorded {
        let mut recorded = self.recorded();
        assert_eq!(recorded.len(), 1, "expected one request: {recorded:?}");
        recorded.remove(0)
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

async fn respond(req: HttpRequest, body: web::Bytes, state: web::Data<StubState>) -> HttpResponse {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    state
        .recorded
        .lock()
        .expect("recorded requests lock")
        .push(Recorded {
            method: method.clone(),
            path: path.clone(),
            query: req.query_string().to_owned(),
            body: serde_json::from_slice(&body).ok(),
        });

    match state
        .replies
        .iter()
        .find(|reply| reply.method == method && reply.path == path)
    {
        Some(reply) => HttpResponse::build(
            StatusCode::from_u16(reply.status).expect("canned status"),
        )
        .content_type("application/json")
        .body(reply.body.clone()),
        None => HttpResponse::NotFound().body(format!("no stub for {method} {path}")),
    }
}

/// Start a stub serving `replies` on an ephemeral local port.
pub async fn spawn_stub(replies: Vec<Canned>) -> StubApi {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    let state = web::Data::new(StubState {
        replies,
        recorded: Mutex::new(Vec::new()),
    });

    let server_state = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(server_state.clone())
            .default_service(web::to(respond))
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .expect("listen on stub socket")
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    StubApi {
        base_url: Url::parse(&format!("http://{addr}")).expect("stub url"),
        state,
        handle,
    }
}

/// A local URL nothing is listening on.
pub fn unreachable_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind throwaway listener");
    let addr = listener.local_addr().expect("throwaway address");
    drop(listener);
    Url::parse(&format!("http://{addr}")).expect("unreachable url")
}

pub fn story_json(id: &str, title: &str) -> Value {
    serde_json::json!({
        "storyId": id,
        "title": title,
        "author": "Ada Author",
        "url": format!("https://example.com/{id}"),
        "username": "hueter",
        "createdAt": "2024-03-01T12:00:00.000Z",
        "updatedAt": "2024-03-01T12:00:00.000Z"
    })
}

pub fn user_json(favorites: Vec<Value>, stories: Vec<Value>) -> Value {
    serde_json::json!({
        "username": "hueter",
        "name": "Joel Burton",
        "createdAt": "2023-05-17T09:30:00.000Z",
        "updatedAt": "2024-03-01T12:00:00.000Z",
        "favorites": favorites,
        "stories": stories
    })
}
