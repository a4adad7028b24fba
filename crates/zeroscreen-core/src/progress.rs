//! Persisted progress: goal, cumulative points and onboarding flag.
//!
//! [`ProgressState`] is the single source of truth for the three persisted
//! fields. It is constructed explicitly over a [`StateStore`] and handed to
//! whichever front-end needs it. Every mutation is written through to the
//! store first, then applied in memory, then announced to subscribers as an
//! [`Event`]. A failed mutation leaves memory untouched and notifies nobody.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::duration::{validate_seconds, HoursMinutes, MAX_DURATION_SECONDS};
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::score::{apply_score, compute_level, compute_score_delta, Level, ScoreOutcome};
use crate::storage::{keys, MemoryStore, StateStore};

/// Handle returned by [`ProgressState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&Event)>;

/// Plain copy of the persisted fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub goal_seconds: u64,
    pub points: i64,
    pub onboarding_complete: bool,
}

impl ProgressSnapshot {
    pub fn level(&self) -> Level {
        compute_level(self.points)
    }
}

/// Result of one [`ProgressState::log_time`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogOutcome {
    pub logged_seconds: u64,
    pub goal_seconds: u64,
    /// Delta computed by the score engine.
    pub delta: i64,
    /// Change actually applied to the total (`points - previous_points`).
    pub applied: i64,
    pub previous_points: i64,
    pub points: i64,
    pub outcome: ScoreOutcome,
}

impl LogOutcome {
    pub fn message(&self) -> &'static str {
        self.outcome.message()
    }
}

impl fmt::Display for LogOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            ScoreOutcome::Increased => write!(f, "+{}", self.applied),
            ScoreOutcome::Unchanged => write!(f, "+0"),
            ScoreOutcome::Reset => write!(f, "reset ({})", self.delta),
        }
    }
}

/// Owner of the persisted progress fields.
pub struct ProgressState<S: StateStore = MemoryStore> {
    store: S,
    snapshot: ProgressSnapshot,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl ProgressState<MemoryStore> {
    /// Fresh state with defaults over a volatile store.
    pub fn in_memory() -> Self {
        Self {
            store: MemoryStore::new(),
            snapshot: ProgressSnapshot::default(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }
}

impl<S: StateStore> ProgressState<S> {
    /// Load progress from `store`. Keys never written take their defaults.
    ///
    /// # Errors
    /// Returns [`CoreError::CorruptValue`] if a stored value cannot be
    /// decoded, or the store's own error if reading fails.
    pub fn new(store: S) -> Result<Self> {
        let snapshot = ProgressSnapshot {
            goal_seconds: load_value(&store, keys::GOAL, decode_goal)?.unwrap_or(0),
            points: load_value(&store, keys::POINTS, decode_points)?.unwrap_or(0),
            onboarding_complete: load_value(&store, keys::ONBOARDING, decode_json::<bool>)?
                .unwrap_or(false),
        };
        tracing::debug!(
            goal_seconds = snapshot.goal_seconds,
            points = snapshot.points,
            onboarding_complete = snapshot.onboarding_complete,
            "loaded progress"
        );
        Ok(Self {
            store,
            snapshot,
            observers: Vec::new(),
            next_subscription: 0,
        })
    }

    pub fn goal_seconds(&self) -> u64 {
        self.snapshot.goal_seconds
    }

    /// The goal as picker values.
    pub fn goal(&self) -> HoursMinutes {
        // goal_seconds is validated on every write and load
        HoursMinutes::from_seconds(self.snapshot.goal_seconds).unwrap_or_default()
    }

    pub fn points(&self) -> i64 {
        self.snapshot.points
    }

    pub fn onboarding_complete(&self) -> bool {
        self.snapshot.onboarding_complete
    }

    pub fn level(&self) -> Level {
        self.snapshot.level()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.snapshot
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Register a callback invoked after every successful mutation.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&Event) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    /// Set the daily goal in seconds.
    ///
    /// # Errors
    /// Returns a validation error if `seconds` exceeds 23h 59m, or the
    /// store's error if persisting fails.
    pub fn set_goal(&mut self, seconds: u64) -> Result<()> {
        validate_seconds("goal", seconds)?;
        self.store.set(keys::GOAL, &encode_goal(seconds)?)?;

        let previous = self.snapshot.goal_seconds;
        self.snapshot.goal_seconds = seconds;
        tracing::debug!(previous, goal_seconds = seconds, "goal set");

        self.emit(Event::GoalSet {
            previous_goal_seconds: previous,
            goal_seconds: seconds,
            at: Utc::now(),
        });
        Ok(())
    }

    /// Set the daily goal from picker values.
    ///
    /// # Errors
    /// See [`ProgressState::set_goal`].
    pub fn set_goal_hm(&mut self, goal: HoursMinutes) -> Result<()> {
        self.set_goal(goal.as_seconds())
    }

    /// Score a day's logged screen time against the current goal.
    ///
    /// There is no once-per-day guard; every call scores.
    ///
    /// # Errors
    /// Returns a validation error if `logged_seconds` exceeds 23h 59m,
    /// [`CoreError::ArithmeticOverflow`] if the total would overflow, or the
    /// store's error if persisting fails.
    pub fn log_time(&mut self, logged_seconds: u64) -> Result<LogOutcome> {
        validate_seconds("logged time", logged_seconds)?;

        let goal_seconds = self.snapshot.goal_seconds;
        let previous_points = self.snapshot.points;
        let delta = compute_score_delta(goal_seconds, logged_seconds);
        let points = apply_score(previous_points, delta)?;
        let outcome = ScoreOutcome::from_delta(delta);

        self.store.set(keys::POINTS, &serde_json::to_string(&points)?)?;
        self.snapshot.points = points;

        if outcome == ScoreOutcome::Reset {
            tracing::warn!(delta, previous_points, "over budget, points reset to zero");
        } else {
            tracing::debug!(delta, previous_points, points, "time logged");
        }

        let result = LogOutcome {
            logged_seconds,
            goal_seconds,
            delta,
            applied: points.saturating_sub(previous_points),
            previous_points,
            points,
            outcome,
        };
        self.emit(Event::TimeLogged {
            logged_seconds,
            goal_seconds,
            delta,
            previous_points,
            points,
            outcome,
            at: Utc::now(),
        });
        Ok(result)
    }

    /// Score picker values, see [`ProgressState::log_time`].
    ///
    /// # Errors
    /// See [`ProgressState::log_time`].
    pub fn log_time_hm(&mut self, logged: HoursMinutes) -> Result<LogOutcome> {
        self.log_time(logged.as_seconds())
    }

    /// Mark the first-run flow as finished.
    ///
    /// Returns `true` if the flag changed. Calling again is a no-op: nothing
    /// is written and nobody is notified.
    ///
    /// # Errors
    /// Returns the store's error if persisting fails.
    pub fn complete_onboarding(&mut self) -> Result<bool> {
        if self.snapshot.onboarding_complete {
            return Ok(false);
        }
        self.store.set(keys::ONBOARDING, "true")?;
        self.snapshot.onboarding_complete = true;
        tracing::debug!("onboarding completed");

        self.emit(Event::OnboardingCompleted { at: Utc::now() });
        Ok(true)
    }

    /// Reset goal, points and onboarding to their defaults.
    ///
    /// All three keys are written in one batch, so a failure leaves both
    /// the store and memory as they were.
    ///
    /// # Errors
    /// Returns the store's error if persisting fails.
    pub fn erase_all(&mut self) -> Result<()> {
        let defaults = ProgressSnapshot::default();
        let goal = encode_goal(defaults.goal_seconds)?;
        let points = serde_json::to_string(&defaults.points)?;
        let onboarding = serde_json::to_string(&defaults.onboarding_complete)?;
        self.store.set_many(&[
            (keys::GOAL, goal.as_str()),
            (keys::POINTS, points.as_str()),
            (keys::ONBOARDING, onboarding.as_str()),
        ])?;
        self.snapshot = defaults;
        tracing::debug!("all progress erased");

        self.emit(Event::DataErased { at: Utc::now() });
        Ok(())
    }

    /// Dump the current state at info level.
    pub fn log_state(&self) {
        tracing::info!(
            goal_seconds = self.snapshot.goal_seconds,
            points = self.snapshot.points,
            onboarding_complete = self.snapshot.onboarding_complete,
            "progress state"
        );
    }

    fn emit(&mut self, event: Event) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }
    }
}

impl<S: StateStore> fmt::Debug for ProgressState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressState")
            .field("snapshot", &self.snapshot)
            .field("subscribers", &self.observers.len())
            .finish()
    }
}

fn load_value<S, T>(store: &S, key: &str, decode: fn(&str) -> Option<T>) -> Result<Option<T>>
where
    S: StateStore,
{
    match store.get(key)? {
        None => Ok(None),
        Some(raw) => decode(&raw).map(Some).ok_or_else(|| CoreError::CorruptValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}

fn decode_json<T: serde::de::DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_str(raw).ok()
}

/// Point totals can never go below zero through scoring, so a negative
/// stored total is corrupt.
fn decode_points(raw: &str) -> Option<i64> {
    let points: i64 = serde_json::from_str(raw).ok()?;
    (points >= 0).then_some(points)
}

/// The goal is stored as a real number of seconds; accept any whole,
/// in-range value.
fn decode_goal(raw: &str) -> Option<u64> {
    let seconds: f64 = serde_json::from_str(raw).ok()?;
    if !seconds.is_finite() || seconds < 0.0 || seconds.fract() != 0.0 {
        return None;
    }
    if seconds > MAX_DURATION_SECONDS as f64 {
        return None;
    }
    Some(seconds as u64)
}

fn encode_goal(seconds: u64) -> Result<String> {
    Ok(serde_json::to_string(&(seconds as f64))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder<S: StateStore>(state: &mut ProgressState<S>) -> Rc<RefCell<Vec<Event>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        state.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        events
    }

    /// Store that refuses any write touching `reject`.
    struct RejectingStore {
        inner: MemoryStore,
        reject: &'static str,
    }

    impl RejectingStore {
        fn check(&self, key: &str) -> Result<()> {
            if key == self.reject {
                return Err(std::io::Error::other(format!("write to {key} refused")).into());
            }
            Ok(())
        }
    }

    impl StateStore for RejectingStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            self.check(key)?;
            self.inner.set(key, value)
        }

        fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()> {
            for (key, _) in entries {
                self.check(key)?;
            }
            self.inner.set_many(entries)
        }
    }

    #[test]
    fn starts_with_defaults() {
        let state = ProgressState::in_memory();
        assert_eq!(state.snapshot(), ProgressSnapshot::default());
        assert_eq!(state.level().level, 0);
        assert_eq!(state.goal().to_string(), "0h 0m");
    }

    #[test]
    fn set_goal_roundtrip() {
        let mut state = ProgressState::in_memory();
        state.set_goal(9000).unwrap();
        assert_eq!(state.goal_seconds(), 9000);
        assert_eq!(state.goal(), HoursMinutes::new(2, 30).unwrap());
        assert_eq!(state.store().get(keys::GOAL).unwrap().as_deref(), Some("9000.0"));
    }

    #[test]
    fn set_goal_rejects_out_of_range() {
        let mut state = ProgressState::in_memory();
        let events = recorder(&mut state);
        let err = state.set_goal(MAX_DURATION_SECONDS + 60).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(state.goal_seconds(), 0);
        assert!(events.borrow().is_empty());
        assert!(state.store().is_empty());
    }

    #[test]
    fn log_time_adds_positive_delta() {
        let mut state = ProgressState::in_memory();
        state.set_goal(3600).unwrap();
        let outcome = state.log_time(0).unwrap();
        assert_eq!(outcome.delta, 600);
        assert_eq!(outcome.applied, 600);
        assert_eq!(outcome.outcome, ScoreOutcome::Increased);
        assert_eq!(outcome.to_string(), "+600");
        assert_eq!(state.points(), 600);
    }

    #[test]
    fn log_time_at_offset_is_unchanged() {
        let mut state = ProgressState::in_memory();
        state.set_goal(3600).unwrap();
        state.log_time(0).unwrap();
        let outcome = state.log_time(3600 + 2400).unwrap();
        assert_eq!(outcome.outcome, ScoreOutcome::Unchanged);
        assert_eq!(outcome.to_string(), "+0");
        assert_eq!(state.points(), 600);
    }

    #[test]
    fn log_time_over_budget_resets() {
        let mut state = ProgressState::in_memory();
        state.set_goal(3600).unwrap();
        state.log_time(0).unwrap();
        let outcome = state.log_time(3600 * 3).unwrap();
        assert_eq!(outcome.delta, -480);
        assert_eq!(outcome.applied, -600);
        assert_eq!(outcome.outcome, ScoreOutcome::Reset);
        assert_eq!(state.points(), 0);
        assert!(outcome.message().contains("went over"));
    }

    #[test]
    fn log_time_allows_repeated_logging() {
        let mut state = ProgressState::in_memory();
        state.set_goal(3600).unwrap();
        for _ in 0..3 {
            state.log_time(0).unwrap();
        }
        assert_eq!(state.points(), 1800);
    }

    #[test]
    fn log_time_rejects_out_of_range() {
        let mut state = ProgressState::in_memory();
        assert!(state.log_time(MAX_DURATION_SECONDS + 1).is_err());
        assert_eq!(state.points(), 0);
    }

    #[test]
    fn overflow_leaves_state_unchanged() {
        let mut store = MemoryStore::new();
        store.set(keys::POINTS, &i64::MAX.to_string()).unwrap();
        let mut state = ProgressState::new(store).unwrap();
        let events = recorder(&mut state);

        let err = state.log_time(0).unwrap_err();
        assert!(matches!(err, CoreError::ArithmeticOverflow { .. }));
        assert_eq!(state.points(), i64::MAX);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn complete_onboarding_is_idempotent() {
        let mut state = ProgressState::in_memory();
        let events = recorder(&mut state);
        assert!(state.complete_onboarding().unwrap());
        assert!(!state.complete_onboarding().unwrap());
        assert!(state.onboarding_complete());
        assert_eq!(events.borrow().len(), 1);
        assert_eq!(state.goal_seconds(), 0);
        assert_eq!(state.points(), 0);
    }

    #[test]
    fn erase_all_restores_defaults() {
        let mut state = ProgressState::in_memory();
        state.set_goal(7200).unwrap();
        state.log_time(0).unwrap();
        state.complete_onboarding().unwrap();

        state.erase_all().unwrap();
        assert_eq!(state.snapshot(), ProgressSnapshot::default());

        let reloaded = ProgressState::new(state.into_store()).unwrap();
        assert_eq!(reloaded.snapshot(), ProgressSnapshot::default());
    }

    #[test]
    fn failed_erase_keeps_store_and_memory() {
        let mut inner = MemoryStore::new();
        inner.set(keys::GOAL, "7200.0").unwrap();
        inner.set(keys::POINTS, "960").unwrap();
        inner.set(keys::ONBOARDING, "true").unwrap();
        let store = RejectingStore { inner, reject: keys::POINTS };

        let mut state = ProgressState::new(store).unwrap();
        let before = state.snapshot();
        let events = recorder(&mut state);

        assert!(state.erase_all().is_err());
        assert_eq!(state.snapshot(), before);
        assert!(events.borrow().is_empty());

        let reloaded = ProgressState::new(state.into_store().inner).unwrap();
        assert_eq!(reloaded.snapshot(), before);
        assert_eq!(reloaded.goal_seconds(), 7200);
    }

    #[test]
    fn observers_receive_events_in_order() {
        let mut state = ProgressState::in_memory();
        let events = recorder(&mut state);
        state.set_goal(60).unwrap();
        state.log_time(60).unwrap();
        state.complete_onboarding().unwrap();
        state.erase_all().unwrap();

        let names: Vec<_> = events.borrow().iter().map(Event::name).collect();
        assert_eq!(
            names,
            ["goal_set", "time_logged", "onboarding_completed", "data_erased"]
        );
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut state = ProgressState::in_memory();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = state.subscribe(move |_| *sink.borrow_mut() += 1);

        state.set_goal(60).unwrap();
        assert!(state.unsubscribe(id));
        assert!(!state.unsubscribe(id));
        state.set_goal(120).unwrap();

        assert_eq!(*count.borrow(), 1);
        assert_eq!(state.subscriber_count(), 0);
    }

    #[test]
    fn loads_persisted_values() {
        let mut store = MemoryStore::new();
        store.set(keys::GOAL, "5400").unwrap();
        store.set(keys::POINTS, "4200").unwrap();
        store.set(keys::ONBOARDING, "true").unwrap();

        let state = ProgressState::new(store).unwrap();
        assert_eq!(state.goal_seconds(), 5400);
        assert_eq!(state.points(), 4200);
        assert!(state.onboarding_complete());
        assert_eq!(state.level().level, 1);
    }

    #[test]
    fn corrupt_values_are_reported() {
        let mut store = MemoryStore::new();
        store.set(keys::POINTS, "lots").unwrap();
        let err = ProgressState::new(store).unwrap_err();
        assert!(matches!(err, CoreError::CorruptValue { ref key, .. } if key == "points"));

        let mut store = MemoryStore::new();
        store.set(keys::GOAL, "-60.0").unwrap();
        assert!(ProgressState::new(store).is_err());
    }

    #[test]
    fn negative_stored_points_are_corrupt() {
        let mut store = MemoryStore::new();
        store.set(keys::POINTS, "-5000").unwrap();
        let err = ProgressState::new(store).unwrap_err();
        assert!(matches!(
            err,
            CoreError::CorruptValue { ref key, ref value } if key == "points" && value == "-5000"
        ));

        let mut store = MemoryStore::new();
        store.set(keys::POINTS, "0").unwrap();
        assert_eq!(ProgressState::new(store).unwrap().points(), 0);
    }

    #[test]
    fn decode_goal_accepts_whole_reals_only() {
        assert_eq!(decode_goal("9000.0"), Some(9000));
        assert_eq!(decode_goal("9000"), Some(9000));
        assert_eq!(decode_goal("90.5"), None);
        assert_eq!(decode_goal("\"9000\""), None);
    }
}
