//! Mock question source for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizkit_core::model::QuestionPackage;

use crate::client::QuestionSource;
use crate::error::FetchError;

/// A question source that serves a fixed package without any HTTP.
pub struct MockSource {
    package: QuestionPackage,
    call_count: AtomicU32,
    last_query: Mutex<Option<String>>,
}

impl MockSource {
    pub fn new(package: QuestionPackage) -> Self {
        Self {
            package,
            call_count: AtomicU32::new(0),
            last_query: Mutex::new(None),
        }
    }

    /// Number of searches made against this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The most recent search query, if any.
    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, query: &str) -> Result<QuestionPackage, FetchError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_query.lock().unwrap() = Some(query.to_string());
        Ok(self.package.clone())
    }
}
