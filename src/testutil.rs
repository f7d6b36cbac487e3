//! In-memory transport for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::api::{ApiError, Transport};

/// Serves canned payloads by endpoint path and counts every request, so
/// tests can assert that an operation did (or did not) hit the network.
pub struct MockTransport {
    routes: Mutex<HashMap<String, Value>>,
    hits: AtomicUsize,
}

impl MockTransport {
    pub fn empty() -> Arc<Self> {
        Self::with_routes(Vec::new())
    }

    pub fn with_routes(routes: Vec<(String, Value)>) -> Arc<Self> {
        Arc::new(Self {
            routes: Mutex::new(routes.into_iter().collect()),
            hits: AtomicUsize::new(0),
        })
    }

    /// Total number of requests issued through this transport.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Transport for MockTransport {
    fn get<'a>(&'a self, endpoint: &'a str) -> BoxFuture<'a, Result<Value>> {
        Box::pin(async move {
            self.hits.fetch_add(1, Ordering::SeqCst);
            self.routes
                .lock()
                .unwrap()
                .get(endpoint)
                .cloned()
                .ok_or_else(|| ApiError::NotFound(endpoint.to_string()).into())
        })
    }
}
