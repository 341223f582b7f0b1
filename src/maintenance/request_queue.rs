use std::collections::VecDeque;

use crate::core::error::Result;
use crate::core::types::{DocId, Document, DocumentStatus};
use crate::server::Server;

struct QueryResult {
    result_count: usize,
    time: u64,
}

/// Wraps a server reference and records one entry per search performed
/// through it, maintaining a running count of requests with no results over
/// a sliding window of `window_width` calls (O(1) per call). Ported from
/// `request_queue.h`/`.cpp`; `AddFindRequest`'s three overloads collapse into
/// one generic-predicate method plus two convenience wrappers.
pub struct RequestQueue<'a> {
    server: &'a Server,
    requests: VecDeque<QueryResult>,
    no_result_count: usize,
    current_time: u64,
    window_width: u64,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a Server) -> Self {
        let window_width = server.config().window_width;
        RequestQueue {
            server,
            requests: VecDeque::new(),
            no_result_count: 0,
            current_time: 0,
            window_width,
        }
    }

    fn record(&mut self, result_count: usize) {
        self.current_time += 1;
        while let Some(front) = self.requests.front() {
            if self.current_time - front.time < self.window_width {
                break;
            }
            if front.result_count == 0 {
                self.no_result_count -= 1;
            }
            self.requests.pop_front();
        }
        if result_count == 0 {
            self.no_result_count += 1;
        }
        self.requests.push_back(QueryResult { result_count, time: self.current_time });
    }

    /// Runs `raw_query` through the wrapped server with an arbitrary
    /// predicate and records the result count for the statistics window.
    pub fn add_find_request<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i64) -> bool,
    {
        let docs = self.server.find_top_documents(raw_query, predicate)?;
        self.record(docs.len());
        Ok(docs)
    }

    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.add_find_request(raw_query, move |_, doc_status, _| doc_status == status)
    }

    pub fn add_find_request_default(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        self.add_find_request_with_status(raw_query, DocumentStatus::Actual)
    }

    pub fn no_result_requests(&self) -> usize {
        self.no_result_count
    }
}
