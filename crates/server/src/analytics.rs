//! In-memory analytics recorder.
//!
//! Append-only per-tenant event logs with FIFO eviction at 1000 entries, and
//! the aggregation behind the dashboard endpoint.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use product_grid_core::SiteId;

/// Maximum events retained per tenant; the oldest entries are evicted first.
const MAX_EVENTS_PER_TENANT: usize = 1000;
/// Number of events returned as recent activity.
const RECENT_ACTIVITY_LEN: usize = 50;
/// Number of event names returned as top events.
const TOP_EVENTS_LEN: usize = 10;

/// One recorded widget event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub event: String,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    pub site_id: SiteId,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Event name with its occurrence count.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EventCount {
    pub event: String,
    pub count: u64,
}

/// First and last timestamp of the stored log.
#[derive(Debug, Clone, Serialize)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Aggregated dashboard view over one tenant's log.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_events: usize,
    pub unique_instances: usize,
    pub top_events: Vec<EventCount>,
    pub recent_activity: Vec<AnalyticsEvent>,
    pub date_range: DateRange,
}

/// In-memory per-tenant event logs.
#[derive(Clone, Default)]
pub struct AnalyticsStore {
    inner: Arc<RwLock<HashMap<SiteId, Vec<AnalyticsEvent>>>>,
}

impl AnalyticsStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to a tenant's log, evicting from the front once the
    /// log exceeds the retention cap.
    pub fn record(
        &self,
        site_id: &SiteId,
        event: String,
        data: Value,
        instance_id: Option<String>,
        user_agent: Option<String>,
    ) {
        let entry = AnalyticsEvent {
            event,
            data,
            instance_id,
            site_id: site_id.clone(),
            timestamp: Utc::now(),
            user_agent,
        };

        let mut map = self.inner.write().expect("analytics store lock poisoned");
        let log = map.entry(site_id.clone()).or_default();
        log.push(entry);
        if log.len() > MAX_EVENTS_PER_TENANT {
            let excess = log.len() - MAX_EVENTS_PER_TENANT;
            log.drain(..excess);
        }
    }

    /// Drop a tenant's log (uninstall webhook).
    pub fn delete(&self, site_id: &SiteId) {
        let mut map = self.inner.write().expect("analytics store lock poisoned");
        map.remove(site_id);
    }

    /// Aggregate a tenant's log into the dashboard summary.
    #[must_use]
    pub fn dashboard(&self, site_id: &SiteId) -> DashboardSummary {
        let map = self.inner.read().expect("analytics store lock poisoned");
        let log: &[AnalyticsEvent] = map.get(site_id).map_or(&[], Vec::as_slice);

        let unique_instances = log
            .iter()
            .map(|event| event.instance_id.as_deref())
            .collect::<HashSet<_>>()
            .len();

        DashboardSummary {
            total_events: log.len(),
            unique_instances,
            top_events: top_events(log),
            recent_activity: log
                .iter()
                .rev()
                .take(RECENT_ACTIVITY_LEN)
                .cloned()
                .collect(),
            date_range: DateRange {
                from: log.first().map(|event| event.timestamp),
                to: log.last().map(|event| event.timestamp),
            },
        }
    }

    #[cfg(test)]
    fn log_len(&self, site_id: &SiteId) -> usize {
        self.inner
            .read()
            .expect("analytics store lock poisoned")
            .get(site_id)
            .map_or(0, Vec::len)
    }
}

/// Count event names and keep the ten most frequent.
///
/// Counts are accumulated in first-seen order and sorted with a stable sort,
/// so equally-frequent names keep their first-seen order.
fn top_events(log: &[AnalyticsEvent]) -> Vec<EventCount> {
    let mut counts: Vec<EventCount> = Vec::new();
    for event in log {
        match counts.iter_mut().find(|count| count.event == event.event) {
            Some(count) => count.count += 1,
            None => counts.push(EventCount {
                event: event.event.clone(),
                count: 1,
            }),
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_EVENTS_LEN);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn site() -> SiteId {
        SiteId::new("s1")
    }

    fn record_named(store: &AnalyticsStore, name: &str) {
        store.record(&site(), name.to_string(), Value::Null, None, None);
    }

    #[test]
    fn test_log_is_capped_at_1000() {
        let store = AnalyticsStore::new();
        for i in 0..1001 {
            store.record(
                &site(),
                "view".to_string(),
                json!({ "seq": i }),
                None,
                None,
            );
        }

        assert_eq!(store.log_len(&site()), 1000);
        let summary = store.dashboard(&site());
        assert_eq!(summary.total_events, 1000);
        // Newest entry is present, oldest (seq 0) was evicted
        assert_eq!(summary.recent_activity[0].data["seq"], 1000);
        let oldest = summary.recent_activity.last().expect("non-empty");
        assert_eq!(oldest.data["seq"], 951);
    }

    #[test]
    fn test_dashboard_empty_log() {
        let store = AnalyticsStore::new();
        let summary = store.dashboard(&site());
        assert_eq!(summary.total_events, 0);
        assert_eq!(summary.unique_instances, 0);
        assert!(summary.top_events.is_empty());
        assert!(summary.recent_activity.is_empty());
        assert!(summary.date_range.from.is_none());
        assert!(summary.date_range.to.is_none());
    }

    #[test]
    fn test_top_events_ordering_and_ties() {
        let store = AnalyticsStore::new();
        // click x2, view x3, hover x2 (hover first seen after click)
        record_named(&store, "click");
        record_named(&store, "view");
        record_named(&store, "hover");
        record_named(&store, "view");
        record_named(&store, "click");
        record_named(&store, "hover");
        record_named(&store, "view");

        let summary = store.dashboard(&site());
        let names: Vec<&str> = summary
            .top_events
            .iter()
            .map(|count| count.event.as_str())
            .collect();
        // view wins; click/hover tie broken by first-seen order
        assert_eq!(names, vec!["view", "click", "hover"]);
        assert_eq!(summary.top_events[0].count, 3);
    }

    #[test]
    fn test_top_events_truncated_to_ten() {
        let store = AnalyticsStore::new();
        for i in 0..15 {
            record_named(&store, &format!("event-{i}"));
        }
        let summary = store.dashboard(&site());
        assert_eq!(summary.top_events.len(), 10);
    }

    #[test]
    fn test_unique_instances_counts_absent_as_one() {
        let store = AnalyticsStore::new();
        store.record(&site(), "view".to_string(), Value::Null, Some("i-1".to_string()), None);
        store.record(&site(), "view".to_string(), Value::Null, Some("i-2".to_string()), None);
        store.record(&site(), "view".to_string(), Value::Null, Some("i-1".to_string()), None);
        store.record(&site(), "view".to_string(), Value::Null, None, None);

        let summary = store.dashboard(&site());
        assert_eq!(summary.unique_instances, 3);
    }

    #[test]
    fn test_recent_activity_is_newest_first() {
        let store = AnalyticsStore::new();
        for i in 0..60 {
            store.record(&site(), format!("event-{i}"), Value::Null, None, None);
        }
        let summary = store.dashboard(&site());
        assert_eq!(summary.recent_activity.len(), 50);
        assert_eq!(summary.recent_activity[0].event, "event-59");
        assert_eq!(summary.recent_activity[49].event, "event-10");
    }

    #[test]
    fn test_delete_drops_log() {
        let store = AnalyticsStore::new();
        record_named(&store, "view");
        store.delete(&site());
        assert_eq!(store.dashboard(&site()).total_events, 0);
    }
}
