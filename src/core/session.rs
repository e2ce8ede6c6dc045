//! Timeline session: the currently loaded audit snapshot and the
//! last-write-wins rule for overlapping fetches.

use crate::core::search::{DayGroup, filter_and_group};
use crate::errors::AppResult;
use crate::models::{FilterSet, LogEntry, LogQuery};

/// Read-only supplier of raw audit rows.
pub trait LogSource {
    /// At most `query.limit` rows, newest first.
    fn fetch(&self, query: &LogQuery) -> AppResult<Vec<LogEntry>>;
}

/// Generation number handed out when a fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Generation counter deciding whether a finished fetch may replace the
/// snapshot. There is no cancellation: a result is dropped when a newer
/// fetch has already been applied.
#[derive(Debug, Default)]
pub struct FetchGate {
    issued: u64,
    applied: u64,
}

impl FetchGate {
    pub fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Accept `ticket` unless a newer one has already been applied.
    pub fn admit(&mut self, ticket: FetchTicket) -> bool {
        if ticket.0 > self.applied {
            self.applied = ticket.0;
            true
        } else {
            false
        }
    }
}

pub struct TimelineSession<S: LogSource> {
    source: S,
    gate: FetchGate,
    snapshot: Vec<LogEntry>,
    query: Option<LogQuery>,
}

impl<S: LogSource> TimelineSession<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            gate: FetchGate::default(),
            snapshot: Vec::new(),
            query: None,
        }
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.gate.issue()
    }

    /// Apply a finished fetch. Returns `false` when the result was stale and
    /// discarded. A failed fetch is logged and leaves an empty snapshot.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        query: LogQuery,
        result: AppResult<Vec<LogEntry>>,
    ) -> bool {
        if !self.gate.admit(ticket) {
            tracing::debug!(?ticket, "discarding stale log fetch");
            return false;
        }

        match result {
            Ok(mut rows) => {
                rows.truncate(query.limit);
                tracing::debug!(rows = rows.len(), ?ticket, "log fetch applied");
                self.snapshot = rows;
            }
            Err(e) => {
                tracing::warn!(error = %e, "log fetch failed; showing an empty timeline");
                self.snapshot.clear();
            }
        }
        self.query = Some(query);
        true
    }

    /// Fetch synchronously and apply the result.
    pub fn refresh(&mut self, query: LogQuery) -> bool {
        let ticket = self.begin_fetch();
        let result = self.source.fetch(&query);
        self.complete_fetch(ticket, query, result)
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.snapshot
    }

    /// Query that produced the current snapshot.
    pub fn current_query(&self) -> Option<&LogQuery> {
        self.query.as_ref()
    }

    /// Decode, filter and group the current snapshot.
    pub fn view(&self, filters: &FilterSet) -> Vec<DayGroup> {
        filter_and_group(&self.snapshot, filters)
    }
}
