use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use eodhd_core::query::params;
use eodhd_core::{Endpoint, EodhdError, EodhdTransport, GetRequest};
use serde_json::{Value, json};

/// Instruction for how a request should be answered.
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Return the provided payload.
    Return(Value),
    /// Fail with this HTTP status and body.
    Status(u16, String),
}

impl MockBehavior {
    fn resolve(&self) -> Result<Value, EodhdError> {
        match self {
            Self::Return(v) => Ok(v.clone()),
            Self::Status(status, body) => Err(EodhdError::http(*status, body.clone())),
        }
    }
}

#[derive(Debug, Default)]
struct InternalState {
    listing: VecDeque<MockBehavior>,
    listing_repeat: Option<MockBehavior>,
    endpoints: HashMap<Endpoint, MockBehavior>,
    requests: Vec<GetRequest>,
}

/// Transport that replays a script set up by the test.
///
/// Listing requests consume queued pages in order; once the queue is empty the
/// repeat page is served if one was set, else `{"data": []}`. Other endpoints
/// answer with their configured behavior, or HTTP 404.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    state: Mutex<InternalState>,
}

impl ScriptedTransport {
    /// Empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, InternalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue one listing response.
    #[must_use]
    pub fn push_page(self, behavior: MockBehavior) -> Self {
        self.state().listing.push_back(behavior);
        self
    }

    /// Queue several listing payloads.
    #[must_use]
    pub fn with_pages(self, pages: impl IntoIterator<Item = Value>) -> Self {
        self.state()
            .listing
            .extend(pages.into_iter().map(MockBehavior::Return));
        self
    }

    /// Serve `page` for every listing request after the queue runs dry.
    #[must_use]
    pub fn repeat_page(self, page: Value) -> Self {
        self.state().listing_repeat = Some(MockBehavior::Return(page));
        self
    }

    /// Answer every request to `endpoint` (other than the listing) with `behavior`.
    #[must_use]
    pub fn on(self, endpoint: Endpoint, behavior: MockBehavior) -> Self {
        self.state().endpoints.insert(endpoint, behavior);
        self
    }

    /// Every request received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<GetRequest> {
        self.state().requests.clone()
    }

    /// `page[offset]` of every listing request, in order.
    #[must_use]
    pub fn listing_offsets(&self) -> Vec<u32> {
        self.state()
            .requests
            .iter()
            .filter(|r| r.endpoint == Endpoint::OptionsEod)
            .filter_map(|r| r.param(params::PAGE_OFFSET)?.parse().ok())
            .collect()
    }
}

impl EodhdTransport for ScriptedTransport {
    fn get_json(&self, req: &GetRequest) -> Result<Value, EodhdError> {
        let mut st = self.state();
        st.requests.push(req.clone());
        if req.endpoint == Endpoint::OptionsEod {
            if let Some(next) = st.listing.pop_front() {
                return next.resolve();
            }
            return st
                .listing_repeat
                .as_ref()
                .map_or_else(|| Ok(json!({ "data": [] })), MockBehavior::resolve);
        }
        st.endpoints.get(&req.endpoint).map_or_else(
            || {
                Err(EodhdError::http(
                    404,
                    format!("no scripted response for {}", req.endpoint.label()),
                ))
            },
            MockBehavior::resolve,
        )
    }
}
