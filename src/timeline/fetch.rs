//! Cached timeline data keyed by query, with last-request-wins acceptance.

use tracing::debug;

use crate::model::{TimelineData, TimelineQuery};

/// Handle for one issued fetch. Only the most recent ticket may fill the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: TimelineQuery,
}

impl FetchTicket {
    pub fn query(&self) -> &TimelineQuery {
        &self.query
    }
}

#[derive(Debug, Default)]
pub struct TimelineCache {
    next_seq: u64,
    latest: Option<u64>,
    /// Query the data answers; `None` once invalidated.
    key: Option<TimelineQuery>,
    data: Option<TimelineData>,
}

impl TimelineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached data if it was fetched for exactly `query`.
    pub fn get(&self, query: &TimelineQuery) -> Option<&TimelineData> {
        match &self.key {
            Some(key) if key == query => self.data.as_ref(),
            _ => None,
        }
    }

    /// Most recently accepted data, whatever query it answered. Used to keep drawing while a
    /// refetch is outstanding.
    pub fn last(&self) -> Option<&TimelineData> {
        self.data.as_ref()
    }

    /// Whether `query` needs a fetch.
    pub fn is_stale(&self, query: &TimelineQuery) -> bool {
        self.get(query).is_none()
    }

    pub fn issue(&mut self, query: TimelineQuery) -> FetchTicket {
        self.next_seq += 1;
        self.latest = Some(self.next_seq);
        FetchTicket {
            seq: self.next_seq,
            query,
        }
    }

    /// Store `data` if `ticket` is the latest issued and still matches the view's `current` query.
    /// Returns whether it was accepted.
    pub fn accept(&mut self, ticket: FetchTicket, data: TimelineData, current: &TimelineQuery) -> bool {
        if self.latest != Some(ticket.seq) || &ticket.query != current {
            debug!(seq = ticket.seq, "discarding stale timeline response");
            return false;
        }
        self.latest = None;
        self.key = Some(ticket.query);
        self.data = Some(data);
        true
    }

    /// Forget the cached key so the next frame refetches. The data stays drawable meanwhile.
    pub fn invalidate(&mut self) {
        self.key = None;
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::{TimelineViewState, ZoomMode};

    fn view() -> TimelineViewState {
        TimelineViewState::new(ZoomMode::Monthly, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
    }

    fn data(marker: u32) -> TimelineData {
        let mut data = TimelineData::default();
        data.working_days_per_month.insert("marker".into(), marker);
        data
    }

    #[test]
    fn accepted_response_is_cached_for_its_query() {
        let query = view().query();
        let mut cache = TimelineCache::new();
        assert!(cache.is_stale(&query));
        let ticket = cache.issue(query.clone());
        assert!(cache.accept(ticket, data(1), &query));
        assert!(!cache.is_stale(&query));
        assert!(cache.get(&view().scroll_forward().query()).is_none());
    }

    #[test]
    fn last_request_wins() {
        let first = view().query();
        let second = view().scroll_forward().query();
        let mut cache = TimelineCache::new();
        let old = cache.issue(first.clone());
        let new = cache.issue(second.clone());

        // Out-of-order arrival: the newer answer lands first, the older one must not replace it
        assert!(cache.accept(new, data(2), &second));
        assert!(!cache.accept(old, data(1), &second));
        assert_eq!(cache.get(&second), Some(&data(2)));
    }

    #[test]
    fn response_for_an_abandoned_view_is_dropped() {
        let first = view().query();
        let mut cache = TimelineCache::new();
        let ticket = cache.issue(first);
        let moved_on = view().set_search("nowak").query();
        assert!(!cache.accept(ticket, data(1), &moved_on));
        assert!(cache.last().is_none());
    }

    #[test]
    fn invalidation_forces_a_refetch_but_keeps_drawing() {
        let query = view().query();
        let mut cache = TimelineCache::new();
        let ticket = cache.issue(query.clone());
        cache.accept(ticket, data(1), &query);
        cache.invalidate();
        assert!(cache.is_stale(&query));
        assert_eq!(cache.last(), Some(&data(1)));
    }
}
