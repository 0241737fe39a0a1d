//! Interaction state of the recovery companion.
//!
//! A [`Session`] holds what the user has selected (tab, procedure, day
//! counter, symptom checker) and reports the tracked interactions to the
//! local analytics. It carries no presentation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analytics::{payload, EventStore, Payload, Stats};
use crate::recovery::{self, Milestone, ProcedureId, TimelineEntry};
use crate::storage::KeyValueStore;

/// Default days-post-op shown on first load.
pub const DEFAULT_DAYS_POST_OP: u32 = 5;

/// Top-level navigation tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    /// Welcome card and today's focus.
    #[default]
    Home,
    /// Milestone timeline for the selected procedure.
    Timeline,
    /// Education center.
    Education,
    /// Psychological support.
    Psychology,
}

impl Tab {
    /// Key recorded in event payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Timeline => "timeline",
            Self::Education => "education",
            Self::Psychology => "psychology",
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user's session with the app.
#[derive(Debug)]
pub struct Session<S> {
    analytics: EventStore<S>,
    tab: Tab,
    procedure: ProcedureId,
    days_post_op: u32,
    symptom_checker_open: bool,
}

impl<S: KeyValueStore> Session<S> {
    /// Create a session on the home tab with the default selection.
    pub fn new(analytics: EventStore<S>) -> Self {
        Self {
            analytics,
            tab: Tab::default(),
            procedure: ProcedureId::default(),
            days_post_op: DEFAULT_DAYS_POST_OP,
            symptom_checker_open: false,
        }
    }

    /// Set the initial procedure and day counter without tracking.
    #[must_use]
    pub fn with_selection(mut self, procedure: ProcedureId, days_post_op: u32) -> Self {
        self.procedure = procedure;
        self.days_post_op = days_post_op;
        self
    }

    /// Application load: count the visit and record a page view.
    pub fn start(&mut self) -> Option<u64> {
        let visits = self.analytics.record_visit();
        self.analytics
            .record_event("page_view", payload([("page", self.tab.as_str())]));
        debug!("Session started on {} (visit {:?})", self.tab, visits);
        visits
    }

    /// Active tab.
    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Selected procedure.
    pub fn procedure(&self) -> ProcedureId {
        self.procedure
    }

    /// Current days-post-op counter.
    pub fn days_post_op(&self) -> u32 {
        self.days_post_op
    }

    /// Whether the symptom checker is showing.
    pub fn is_symptom_checker_open(&self) -> bool {
        self.symptom_checker_open
    }

    /// Switch tabs and record `tab_change`.
    pub fn go_to_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.analytics
            .record_event("tab_change", payload([("tab", tab.as_str())]));
    }

    /// Select a procedure and record `procedure_change`.
    pub fn select_procedure(&mut self, procedure: ProcedureId) {
        self.procedure = procedure;
        self.analytics.record_event(
            "procedure_change",
            payload([("procedure", procedure.as_str())]),
        );
    }

    /// Move the day counter.
    pub fn set_days_post_op(&mut self, days_post_op: u32) {
        self.days_post_op = days_post_op;
    }

    /// Show the symptom checker.
    pub fn open_symptom_checker(&mut self) {
        self.symptom_checker_open = true;
    }

    /// Hide the symptom checker.
    pub fn close_symptom_checker(&mut self) {
        self.symptom_checker_open = false;
    }

    /// The symptom checker's "Call Surgeon Now" action.
    pub fn call_surgeon(&mut self) {
        self.analytics.record_event("call_surgeon", Payload::new());
    }

    /// Record an arbitrary interaction.
    pub fn track(&mut self, name: &str, payload: Payload) {
        self.analytics.record_event(name, payload);
    }

    /// Milestones of the selected procedure with their statuses.
    pub fn timeline(&self) -> Vec<TimelineEntry> {
        recovery::timeline(self.procedure, self.days_post_op)
    }

    /// Milestones falling on the current day.
    pub fn todays_focus(&self) -> Vec<&'static Milestone> {
        recovery::current_milestones(self.procedure, self.days_post_op)
    }

    /// Re-read the local analytics.
    pub fn stats(&self) -> Stats {
        self.analytics.read_stats()
    }

    /// Wipe the local analytics.
    pub fn clear_stats(&mut self) {
        self.analytics.clear();
    }

    /// The analytics recorder.
    pub fn analytics(&self) -> &EventStore<S> {
        &self.analytics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recovery::Status;
    use crate::storage::{MemoryStore, UnavailableStore};

    fn create_test_session() -> Session<MemoryStore> {
        Session::new(EventStore::new(MemoryStore::new()))
    }

    fn event_names<S: KeyValueStore>(session: &Session<S>) -> Vec<String> {
        session
            .stats()
            .event_log
            .into_iter()
            .map(|e| e.name)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let session = create_test_session();
        assert_eq!(session.tab(), Tab::Home);
        assert_eq!(session.procedure(), ProcedureId::Rhinoplasty);
        assert_eq!(session.days_post_op(), 5);
        assert!(!session.is_symptom_checker_open());
    }

    #[test]
    fn test_start_records_visit_then_page_view() {
        let mut session = create_test_session();
        assert_eq!(session.start(), Some(1));

        let stats = session.stats();
        assert_eq!(stats.visit_count, 1);
        assert_eq!(stats.event_log[0].name, "page_view");
        assert_eq!(stats.event_log[0].payload["page"], "home");
        assert_eq!(stats.event_log[1].name, "visit");
    }

    #[test]
    fn test_go_to_tab_tracks() {
        let mut session = create_test_session();
        session.go_to_tab(Tab::Timeline);

        assert_eq!(session.tab(), Tab::Timeline);
        let stats = session.stats();
        assert_eq!(stats.event_log[0].name, "tab_change");
        assert_eq!(stats.event_log[0].payload["tab"], "timeline");
    }

    #[test]
    fn test_select_procedure_tracks_catalog_key() {
        let mut session = create_test_session();
        session.select_procedure(ProcedureId::BreastAugmentation);

        assert_eq!(session.procedure(), ProcedureId::BreastAugmentation);
        let stats = session.stats();
        assert_eq!(stats.event_log[0].name, "procedure_change");
        assert_eq!(stats.event_log[0].payload["procedure"], "breastAugmentation");
    }

    #[test]
    fn test_untracked_interactions() {
        let mut session = create_test_session();
        session.set_days_post_op(7);
        session.open_symptom_checker();
        assert!(session.is_symptom_checker_open());
        session.close_symptom_checker();
        assert!(!session.is_symptom_checker_open());

        assert!(event_names(&session).is_empty());
        assert_eq!(session.days_post_op(), 7);
    }

    #[test]
    fn test_call_surgeon_has_empty_payload() {
        let mut session = create_test_session();
        session.open_symptom_checker();
        session.call_surgeon();

        let stats = session.stats();
        assert_eq!(stats.event_log[0].name, "call_surgeon");
        assert!(stats.event_log[0].payload.is_empty());
    }

    #[test]
    fn test_timeline_follows_selection() {
        let mut session = create_test_session();
        let statuses: Vec<Status> = session.timeline().iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![Status::Complete, Status::Complete, Status::Upcoming]
        );
        assert!(session.todays_focus().is_empty());

        session.select_procedure(ProcedureId::Liposuction);
        session.set_days_post_op(7);
        let focus = session.todays_focus();
        assert_eq!(focus.len(), 1);
        assert_eq!(focus[0].title, "Bruising Peak");
    }

    #[test]
    fn test_with_selection_is_untracked() {
        let session = create_test_session().with_selection(ProcedureId::Liposuction, 1);
        assert_eq!(session.procedure(), ProcedureId::Liposuction);
        assert_eq!(session.todays_focus()[0].title, "Surgery Day");
        assert!(event_names(&session).is_empty());
    }

    #[test]
    fn test_full_flow_event_order() {
        let mut session = create_test_session();
        session.start();
        session.go_to_tab(Tab::Timeline);
        session.select_procedure(ProcedureId::Liposuction);
        session.call_surgeon();

        assert_eq!(
            event_names(&session),
            vec![
                "call_surgeon",
                "procedure_change",
                "tab_change",
                "page_view",
                "visit"
            ]
        );
    }

    #[test]
    fn test_clear_stats() {
        let mut session = create_test_session();
        session.start();
        session.clear_stats();

        assert_eq!(session.stats(), Stats::default());
    }

    #[test]
    fn test_session_without_storage_keeps_working() {
        let mut session = Session::new(EventStore::new(UnavailableStore::new("offline")));
        assert_eq!(session.start(), None);
        session.go_to_tab(Tab::Education);
        session.call_surgeon();

        assert_eq!(session.tab(), Tab::Education);
        assert_eq!(session.timeline().len(), 3);
        assert_eq!(session.stats(), Stats::default());
    }

    #[test]
    fn test_tab_display() {
        assert_eq!(Tab::Home.to_string(), "home");
        assert_eq!(Tab::Psychology.to_string(), "psychology");
    }
}
