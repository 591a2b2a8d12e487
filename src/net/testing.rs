//! Scripted transport and navigator fakes shared by the API tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::client::ApiClient;
use super::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::config::ApiConfig;
use crate::state::session::SessionState;
use crate::util::navigator::Navigator;
use crate::util::storage::{CredentialStore, MemoryStorage};

/// Replays queued outcomes in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn reply(&self, status: u16, body: &Value) {
        let body = serde_json::to_vec(body).expect("serializable body");
        self.replies.borrow_mut().push_back(Ok(HttpResponse { status, body }));
    }

    pub fn reply_ok(&self, data: Value) {
        self.reply(200, &json!({ "code": 0, "message": "success", "data": data }));
    }

    pub fn reply_bytes(&self, status: u16, body: &[u8]) {
        self.replies.borrow_mut().push_back(Ok(HttpResponse { status, body: body.to_vec() }));
    }

    pub fn fail(&self, error: TransportError) {
        self.replies.borrow_mut().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests.borrow().last().cloned().expect("at least one request")
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted reply".to_owned())))
    }
}

/// Records every forced navigation.
#[derive(Default)]
pub struct RecordingNavigator {
    visits: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits.borrow_mut().push(path.to_owned());
    }
}

/// Everything a client test needs to inspect.
pub struct Harness {
    pub storage: Rc<MemoryStorage>,
    pub transport: Rc<ScriptedTransport>,
    pub navigator: Rc<RecordingNavigator>,
    pub session: Rc<SessionState>,
    pub client: ApiClient,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_storage(MemoryStorage::new())
    }

    pub fn with_storage(storage: MemoryStorage) -> Self {
        let storage = Rc::new(storage);
        let transport = ScriptedTransport::new();
        let navigator = Rc::new(RecordingNavigator::default());
        let session = Rc::new(SessionState::restore(CredentialStore::new(storage.clone())));
        let client = ApiClient::new(ApiConfig::default(), transport.clone(), session.clone(), navigator.clone());
        Self { storage, transport, navigator, session, client }
    }
}

pub fn user_json(role: &str) -> Value {
    json!({ "id": 1, "username": "alice", "nickname": "Alice", "email": "alice@example.com", "role": role })
}

pub fn login_json(token: &str, role: &str) -> Value {
    json!({ "token": token, "expires_in": 86400, "user": user_json(role) })
}
