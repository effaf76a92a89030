//! Fetch sequencing: last-write-wins by issuance order.
//!
//! Each query-state change issues a fetch tagged with the next monotonic
//! sequence number. Fetches run on worker threads and may complete in any
//! order; on completion the outcome's sequence is compared against the
//! latest issued one and anything stale is dropped on the floor. Nothing is
//! ever cancelled — the sequence comparison alone is the discard mechanism,
//! so a superseded request completing arbitrarily late is still harmless.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use tracing::{debug, trace};

use crate::api::{ApiError, CustomerApi};
use crate::models::Page;

use super::query::QueryState;

/// Handle for one outgoing page request.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    pub sequence: u64,
    /// Snapshot of the query the request was issued for.
    pub query: QueryState,
}

/// Completion of one page fetch, success or failure.
#[derive(Debug)]
pub struct FetchOutcome {
    pub sequence: u64,
    pub result: Result<Page, ApiError>,
}

/// Issues page fetches and filters their completions.
///
/// Generic over the event type `E` carried on the application's single
/// event channel; worker threads wrap each [`FetchOutcome`] via `From` and
/// send it there, so all completions funnel through the same queue as user
/// input.
pub struct FetchSequencer<E> {
    api: Arc<dyn CustomerApi>,
    tx: Sender<E>,
    /// Sequence of the most recently issued request. 0 = nothing issued yet.
    latest: u64,
}

impl<E: From<FetchOutcome> + Send + 'static> FetchSequencer<E> {
    pub fn new(api: Arc<dyn CustomerApi>, tx: Sender<E>) -> Self {
        Self { api, tx, latest: 0 }
    }

    /// Allocate the next sequence number, start the fetch on a worker
    /// thread, and return immediately.
    pub fn issue(&mut self, query: &QueryState) -> FetchTicket {
        self.latest += 1;
        let ticket = FetchTicket {
            sequence: self.latest,
            query: query.clone(),
        };

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let fetch_query = ticket.query.clone();
        let sequence = ticket.sequence;
        trace!(sequence, "issuing page fetch");
        thread::spawn(move || {
            let result = api.fetch_page(&fetch_query);
            // The receiver dropping just means the app is shutting down.
            let _ = tx.send(E::from(FetchOutcome { sequence, result }));
        });

        ticket
    }

    /// Filter a completed fetch: the result is handed back only when the
    /// outcome belongs to the latest issued request. Stale outcomes —
    /// errors included — are discarded unconditionally.
    pub fn accept(&self, outcome: FetchOutcome) -> Option<Result<Page, ApiError>> {
        if outcome.sequence == self.latest {
            Some(outcome.result)
        } else {
            debug!(
                sequence = outcome.sequence,
                latest = self.latest,
                "discarding stale fetch result"
            );
            None
        }
    }

    /// Sequence of the most recently issued request.
    pub fn latest_sequence(&self) -> u64 {
        self.latest
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;
    use crate::api::MockApi;

    fn sequencer() -> (FetchSequencer<FetchOutcome>, mpsc::Receiver<FetchOutcome>) {
        let (tx, rx) = mpsc::channel();
        (FetchSequencer::new(Arc::new(MockApi::new()), tx), rx)
    }

    #[test]
    fn sequences_are_monotonic() {
        let (mut seq, _rx) = sequencer();
        let query = QueryState::default();
        let a = seq.issue(&query);
        let b = seq.issue(&query);
        let c = seq.issue(&query);
        assert!(a.sequence < b.sequence && b.sequence < c.sequence);
        assert_eq!(seq.latest_sequence(), c.sequence);
    }

    #[test]
    fn ticket_carries_the_query_snapshot() {
        let (mut seq, _rx) = sequencer();
        let query = QueryState::default().with_search("mall");
        let ticket = seq.issue(&query);
        assert_eq!(ticket.query, query);
    }

    #[test]
    fn only_the_latest_outcome_is_accepted() {
        let (mut seq, _rx) = sequencer();
        let query = QueryState::default();
        let a = seq.issue(&query);
        let b = seq.issue(&query.with_page_index(1));

        let stale = FetchOutcome {
            sequence: a.sequence,
            result: Err(ApiError::Transport("late".to_string())),
        };
        // A superseded outcome is dropped even though it is an error.
        assert!(seq.accept(stale).is_none());

        let current = FetchOutcome {
            sequence: b.sequence,
            result: Err(ApiError::Transport("current".to_string())),
        };
        assert!(seq.accept(current).is_some());
    }

    #[test]
    fn completions_arrive_on_the_channel() {
        let (mut seq, rx) = sequencer();
        seq.issue(&QueryState::default());
        let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome.sequence, 1);
        assert!(outcome.result.is_ok());
    }

    #[test]
    fn out_of_order_completions_resolve_to_the_last_issued_query() {
        // Two overlapping requests: A for page 1, then B for page 2. A's
        // response is delivered after B's; the accepted result must be B's.
        let (mut seq, rx) = sequencer();
        seq.issue(&QueryState::default());
        let b = seq.issue(&QueryState::default().with_page_index(1));

        let mut outcomes: Vec<FetchOutcome> = vec![
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
        ];
        // Force completion order B then A.
        outcomes.sort_by_key(|o| std::cmp::Reverse(o.sequence));
        assert_eq!(outcomes[0].sequence, b.sequence);

        let mut accepted = Vec::new();
        for outcome in outcomes {
            if let Some(result) = seq.accept(outcome) {
                accepted.push(result);
            }
        }
        assert_eq!(accepted.len(), 1);
        let page = accepted.pop().unwrap().unwrap();
        // B asked for the second page (one-based 2 on the wire).
        assert_eq!(page.pagination.current_page, 2);
    }
}
