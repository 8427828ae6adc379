// xnote-client/tests/common/mod.rs
// Scripted transport and presenter shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::Method;
use serde_json::Value;
use tokio::sync::Notify;

use xnote_client::api::XnoteApi;
use xnote_client::presenter::{Confirmation, Presenter, ToastKind};
use xnote_client::{ClientError, ClientResult, HttpClient};

/// One recorded request
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    Status(u16, String),
}

type Route = (Method, String);

/// In-memory `HttpClient`.
///
/// Replies are queued per (method, path); the last queued reply repeats.
/// Unscripted requests answer 404.
#[derive(Default)]
pub struct MockHttpClient {
    requests: Mutex<Vec<Request>>,
    routes: Mutex<HashMap<Route, VecDeque<Reply>>>,
    gates: Mutex<HashMap<Route, Arc<Notify>>>,
}

impl MockHttpClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, method: Method, path: &str, body: Value) -> &Self {
        self.push(method, path, Reply::Json(body))
    }

    pub fn fail(&self, method: Method, path: &str, status: u16, message: &str) -> &Self {
        self.push(method, path, Reply::Status(status, message.to_string()))
    }

    fn push(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    /// Hold the next request to (method, path) until the returned handle
    /// is notified
    pub fn gate(&self, method: Method, path: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert((method, path.to_string()), notify.clone());
        notify
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded requests other than GETs
    pub fn mutations(&self) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != Method::GET)
            .collect()
    }

    pub fn count(&self, method: &Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.method == method && r.path == path)
            .count()
    }

    pub fn api(self: &Arc<Self>) -> XnoteApi {
        XnoteApi::new(self.clone())
    }

    fn next_reply(&self, route: &Route) -> Option<Reply> {
        let mut routes = self.routes.lock().unwrap();
        let queue = routes.get_mut(route)?;
        if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> ClientResult<Value> {
        let route = (method.clone(), path.to_string());
        self.requests.lock().unwrap().push(Request {
            method,
            path: path.to_string(),
            body,
        });

        let gate = self.gates.lock().unwrap().remove(&route);
        if let Some(gate) = gate {
            gate.notified().await;
        }

        match self.next_reply(&route) {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::Status(status, message)) => Err(ClientError::from_status(status, message)),
            None => Err(ClientError::from_status(404, format!("no route for {}", path))),
        }
    }
}

/// Presenter recording every callback
pub struct RecordingPresenter {
    accept: AtomicBool,
    pub loading: Mutex<Vec<bool>>,
    pub errors: Mutex<Vec<(String, String)>>,
    pub toasts: Mutex<Vec<(String, ToastKind)>>,
    pub confirmations: Mutex<Vec<Confirmation>>,
}

impl RecordingPresenter {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self::with_answer(true))
    }

    pub fn declining() -> Arc<Self> {
        Arc::new(Self::with_answer(false))
    }

    fn with_answer(accept: bool) -> Self {
        Self {
            accept: AtomicBool::new(accept),
            loading: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
            toasts: Mutex::new(Vec::new()),
            confirmations: Mutex::new(Vec::new()),
        }
    }

    pub fn set_answer(&self, accept: bool) {
        self.accept.store(accept, Ordering::SeqCst);
    }

    pub fn errors(&self) -> Vec<(String, String)> {
        self.errors.lock().unwrap().clone()
    }

    pub fn toasts(&self) -> Vec<String> {
        self.toasts.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn confirmations(&self) -> Vec<Confirmation> {
        self.confirmations.lock().unwrap().clone()
    }

    /// Loading indicator currently shown
    pub fn is_loading(&self) -> bool {
        let loading = self.loading.lock().unwrap();
        loading.iter().filter(|l| **l).count() > loading.iter().filter(|l| !**l).count()
    }
}

impl Presenter for RecordingPresenter {
    fn set_loading(&self, loading: bool) {
        self.loading.lock().unwrap().push(loading);
    }

    fn error(&self, operation: &str, message: &str) {
        self.errors
            .lock()
            .unwrap()
            .push((operation.to_string(), message.to_string()));
    }

    fn toast(&self, message: &str, kind: ToastKind) {
        self.toasts.lock().unwrap().push((message.to_string(), kind));
    }

    fn confirm(&self, confirmation: &Confirmation) -> bool {
        self.confirmations.lock().unwrap().push(confirmation.clone());
        self.accept.load(Ordering::SeqCst)
    }
}
