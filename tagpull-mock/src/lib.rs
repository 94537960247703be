//! Deterministic in-memory historian for tests and demos.
//!
//! `MockHistorian` serves the static fixtures in [`fixtures`], emulates the
//! cursor protocol (handles, continuation codes, release), counts every call
//! and lets tests inject failures per point through [`PointBehavior`].

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tagpull_core::{
    CursorHandle, Fetched, Historian, OpenOutcome, PointId, PointInfo, QueryPlan, RawRecord,
    ServiceId, ServiceInfo, StatusCode, TagpullError, TimeWindow,
};

mod aggregate;
pub mod fixtures;

use fixtures::points::{self, FixturePoint};
use fixtures::services::SERVICES;

/// How the mock answers requests for one point.
#[derive(Debug, Clone, PartialEq)]
pub enum PointBehavior {
    /// Serve the fixture data (the default for fixture points).
    Fixture,
    /// The point does not exist.
    Missing,
    /// `open_query` fails with this code and allocates no handle.
    FailOpen(StatusCode),
    /// `open_query` fails with this code but still allocates a handle.
    FailOpenWithHandle(StatusCode),
    /// Serve the fixture data but end with `code` after `records` records.
    FailAfter {
        /// Records delivered before the failure.
        records: usize,
        /// Terminating code.
        code: StatusCode,
    },
    /// Serve exactly these records regardless of window or mode.
    Records(Vec<RawRecord>),
    /// `next_record` never completes.
    Hang,
}

/// Call counters collected by the mock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockStats {
    /// `exists` calls.
    pub exists_calls: usize,
    /// `open_query` calls.
    pub opens: usize,
    /// Handles allocated by `open_query`, including on failure.
    pub handles_issued: usize,
    /// `release_query` calls for live handles.
    pub releases: usize,
    /// `release_query` calls for unknown or already released handles.
    pub stray_releases: usize,
    /// `next_record` calls.
    pub next_calls: usize,
    /// `describe` calls.
    pub describe_calls: usize,
    /// `list_services` calls.
    pub list_services_calls: usize,
    /// `list_points` calls.
    pub list_points_calls: usize,
    /// Handles open right now.
    pub open_now: usize,
    /// Highest number of simultaneously open handles.
    pub max_open: usize,
}

struct Stream {
    records: VecDeque<RawRecord>,
    end: StatusCode,
    hang: bool,
}

#[derive(Default)]
struct State {
    behaviors: HashMap<String, PointBehavior>,
    streams: HashMap<CursorHandle, Stream>,
    operations: Vec<(PointId, &'static str)>,
    stats: MockStats,
}

/// Mock historian. Provides deterministic data from static fixtures.
pub struct MockHistorian {
    name: &'static str,
    latency: Option<Duration>,
    next_handle: AtomicU64,
    state: Mutex<State>,
}

impl Default for MockHistorian {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHistorian {
    /// Mock named `tagpull-mock` serving the fixtures.
    #[must_use]
    pub fn new() -> Self {
        Self::named("tagpull-mock")
    }

    /// Mock with a custom name.
    #[must_use]
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            latency: None,
            next_handle: AtomicU64::new(1),
            state: Mutex::new(State::default()),
        }
    }

    /// Delay every `next_record` call by `latency`.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Override how requests for `point` are answered.
    pub fn set_behavior(&self, point: &str, behavior: PointBehavior) {
        self.state().behaviors.insert(point.to_string(), behavior);
    }

    /// Restore fixture behavior for every point and zero the counters.
    pub fn reset(&self) {
        let mut st = self.state();
        st.behaviors.clear();
        st.operations.clear();
        st.stats = MockStats {
            open_now: st.streams.len(),
            ..MockStats::default()
        };
    }

    /// Snapshot of the call counters.
    #[must_use]
    pub fn stats(&self) -> MockStats {
        self.state().stats
    }

    /// Remote operations opened so far, in call order.
    #[must_use]
    pub fn operations(&self) -> Vec<(PointId, &'static str)> {
        self.state().operations.clone()
    }

    fn behavior(st: &State, point: &PointId) -> PointBehavior {
        if let Some(b) = st.behaviors.get(point.as_str()) {
            return b.clone();
        }
        if points::by_id(point.as_str()).is_some() {
            PointBehavior::Fixture
        } else {
            PointBehavior::Missing
        }
    }

    fn fixture(point: &PointId) -> Option<&'static FixturePoint> {
        points::by_id(point.as_str())
    }

    fn issue_handle(&self, st: &mut State, stream: Stream) -> CursorHandle {
        let handle = CursorHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        st.streams.insert(handle, stream);
        st.stats.handles_issued += 1;
        st.stats.open_now = st.streams.len();
        st.stats.max_open = st.stats.max_open.max(st.stats.open_now);
        handle
    }
}

#[async_trait]
impl Historian for MockHistorian {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn exists(&self, point: &PointId) -> bool {
        let mut st = self.state();
        st.stats.exists_calls += 1;
        !matches!(Self::behavior(&st, point), PointBehavior::Missing)
    }

    async fn open_query(
        &self,
        point: &PointId,
        window: &TimeWindow,
        plan: &QueryPlan,
    ) -> OpenOutcome {
        let mut st = self.state();
        st.stats.opens += 1;
        st.operations.push((point.clone(), plan.operation_name()));

        let fixture_records = || {
            Self::fixture(point)
                .map(|f| aggregate::records_for(f.samples, window, plan))
                .unwrap_or_default()
        };
        let stream = match Self::behavior(&st, point) {
            PointBehavior::Missing => return OpenOutcome::failed(StatusCode(-1)),
            PointBehavior::FailOpen(code) => return OpenOutcome::failed(code),
            PointBehavior::FailOpenWithHandle(code) => {
                let stream = Stream {
                    records: VecDeque::new(),
                    end: code,
                    hang: false,
                };
                let handle = self.issue_handle(&mut st, stream);
                return OpenOutcome {
                    handle: Some(handle),
                    code,
                };
            }
            PointBehavior::Fixture => Stream {
                records: fixture_records().into(),
                end: StatusCode::NO_MORE_DATA,
                hang: false,
            },
            PointBehavior::FailAfter { records, code } => Stream {
                records: fixture_records().into_iter().take(records).collect(),
                end: code,
                hang: false,
            },
            PointBehavior::Records(records) => Stream {
                records: records.into(),
                end: StatusCode::NO_MORE_DATA,
                hang: false,
            },
            PointBehavior::Hang => Stream {
                records: VecDeque::new(),
                end: StatusCode::NO_MORE_DATA,
                hang: true,
            },
        };
        OpenOutcome::opened(self.issue_handle(&mut st, stream))
    }

    async fn next_record(&self, handle: CursorHandle) -> Fetched {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let hang = {
            let mut st = self.state();
            st.stats.next_calls += 1;
            match st.streams.get_mut(&handle) {
                None => return Fetched::end(StatusCode(-99)),
                Some(stream) if stream.hang => true,
                Some(stream) => {
                    return match stream.records.pop_front() {
                        Some(record) => Fetched::more(record),
                        None => Fetched::end(stream.end),
                    };
                }
            }
        };
        if hang {
            std::future::pending::<()>().await;
        }
        Fetched::end(StatusCode(-99))
    }

    fn release_query(&self, handle: CursorHandle) {
        let mut st = self.state();
        if st.streams.remove(&handle).is_some() {
            st.stats.releases += 1;
        } else {
            st.stats.stray_releases += 1;
        }
        st.stats.open_now = st.streams.len();
    }

    async fn describe(&self, point: &PointId) -> Option<String> {
        let mut st = self.state();
        st.stats.describe_calls += 1;
        if matches!(Self::behavior(&st, point), PointBehavior::Missing) {
            return None;
        }
        Self::fixture(point)
            .filter(|f| f.describable)
            .map(|f| f.description.to_string())
    }

    async fn list_services(&self) -> Result<Vec<ServiceInfo>, TagpullError> {
        self.state().stats.list_services_calls += 1;
        SERVICES
            .iter()
            .map(|s| {
                Ok(ServiceInfo {
                    name: ServiceId::new(s.name)?,
                    description: s.description.to_string(),
                    kind: s.kind.to_string(),
                    status: s.status.to_string(),
                })
            })
            .collect()
    }

    async fn list_points(&self, service: &ServiceId) -> Result<Vec<PointInfo>, TagpullError> {
        self.state().stats.list_points_calls += 1;
        let prefix = format!("{}.", service.as_str());
        points::POINTS
            .iter()
            .filter(|p| p.id.starts_with(&prefix))
            .map(|p| {
                let last = p.samples.last();
                Ok(PointInfo {
                    point: PointId::new(p.id)?,
                    value: last.map(|s| s.2),
                    time: last.map(|s| {
                        fixtures::at(s.0).format("%m/%d/%y %H:%M:%S").to_string()
                    }),
                    status: last.map(|s| s.3.to_string()),
                    description: p.description.to_string(),
                    units: p.units.to_string(),
                })
            })
            .collect()
    }
}
