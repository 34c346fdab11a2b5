// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event and timer buckets that decide when each widget refreshes.
//!
//! Every (widget, policy) pair is filed as one shared [`ScheduleEntry`] into
//! the [`EventBucket`] of each data trigger in its policy and, if the policy
//! has a timer, into a [`TimerBucket`] for that delay:
//!
//! ```text
//!   file(results) ──┬──► EventBucket[current]  ◄── notify(CurrentDataChanged)
//!                   ├──► EventBucket[sun]      ◄── notify(SunDataChanged)
//!                   └──► TimerBucket(#7, 5min) ◄── fire_timer(#7)
//!                                │
//!            drain: claim entry, refresh widget, collect new policies
//!                                │
//!                                ▼
//!                          file(results)
//! ```
//!
//! Each filing round creates one timer bucket per distinct delay and arms one
//! host timer for it. Whichever bucket reaches a shared entry first claims it;
//! the others skip it. Armed host timers are never cancelled: a timer whose
//! bucket was pruned or already fired is a no-op.
//!
//! A widget refresh that fails is logged and the widget is re-filed with the
//! policy it had, so one broken widget never stalls the rest of the drain.

use core::fmt;
use core::time::Duration;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::policy::{RefreshPolicy, Trigger};
use crate::trace::{BucketFiredEvent, BucketSource, TimerArmedEvent, Tracer, WidgetFailedEvent};
use crate::widget::{Phase, WidgetError, WidgetId};

/// Identifies one timer bucket and the host timer backing it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl fmt::Debug for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimerId({})", self.0)
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The host's one-shot timer facility.
///
/// After `delay` has elapsed the host must call back into the scheduler (via
/// [`Scheduler::fire_timer`] or `Display::on_timer`) with the same `timer`.
pub trait TimerHost {
    /// Arms a one-shot timer.
    fn arm(&mut self, timer: TimerId, delay: Duration);
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// A widget waiting to be refreshed, shared by every bucket it was filed in.
#[derive(Debug)]
pub struct ScheduleEntry {
    widget: WidgetId,
    policy: RefreshPolicy,
    satisfied: Cell<bool>,
}

impl ScheduleEntry {
    /// Creates an unsatisfied entry.
    #[must_use]
    pub fn new(widget: WidgetId, policy: RefreshPolicy) -> Self {
        Self {
            widget,
            policy,
            satisfied: Cell::new(false),
        }
    }

    /// The widget to refresh.
    #[must_use]
    pub fn widget(&self) -> WidgetId {
        self.widget
    }

    /// The policy this entry was filed under.
    #[must_use]
    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// Whether some bucket already fired this entry.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.satisfied.get()
    }

    /// Marks the entry satisfied. Returns `false` if it already was.
    fn claim(&self) -> bool {
        !self.satisfied.replace(true)
    }
}

/// Counts from one bucket drain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FireSummary {
    /// Entries taken out of the bucket.
    pub drained: u32,
    /// Widgets refreshed successfully.
    pub refreshed: u32,
    /// Entries already fired by another bucket.
    pub skipped: u32,
    /// Widgets whose refresh failed.
    pub failed: u32,
}

/// Results and counts from one bucket drain.
#[derive(Debug, Default)]
pub struct Drain {
    /// (widget, next policy) pairs to file.
    pub results: Vec<(WidgetId, RefreshPolicy)>,
    /// Counts.
    pub summary: FireSummary,
}

fn drain_entries<F>(
    entries: Vec<Rc<ScheduleEntry>>,
    tracer: &mut Tracer<'_>,
    mut refresh: F,
) -> Drain
where
    F: FnMut(WidgetId) -> Result<RefreshPolicy, WidgetError>,
{
    let mut drain = Drain::default();
    for entry in entries {
        drain.summary.drained += 1;
        if !entry.claim() {
            drain.summary.skipped += 1;
            continue;
        }
        match refresh(entry.widget) {
            Ok(policy) => {
                drain.summary.refreshed += 1;
                drain.results.push((entry.widget, policy));
            }
            Err(err) => {
                drain.summary.failed += 1;
                let message = err.to_string();
                warn!(
                    widget = %entry.widget,
                    error = %message,
                    "refresh failed, keeping previous policy"
                );
                tracer.widget_failed(&WidgetFailedEvent {
                    widget: entry.widget,
                    phase: Phase::Refresh,
                    message: &message,
                });
                drain.results.push((entry.widget, entry.policy));
            }
        }
    }
    drain
}

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

/// Entries waiting on one domain trigger.
#[derive(Debug)]
pub struct EventBucket {
    trigger: Trigger,
    pending: Vec<Rc<ScheduleEntry>>,
}

impl EventBucket {
    /// Creates an empty bucket.
    #[must_use]
    pub fn new(trigger: Trigger) -> Self {
        Self {
            trigger,
            pending: Vec::new(),
        }
    }

    /// The trigger this bucket waits on.
    #[must_use]
    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    /// Number of entries, satisfied or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether the bucket holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Adds an entry.
    pub fn push(&mut self, entry: Rc<ScheduleEntry>) {
        self.pending.push(entry);
    }

    /// Drops entries another bucket already fired.
    pub fn prune(&mut self) {
        self.pending.retain(|entry| !entry.is_satisfied());
    }

    /// Drains the bucket, refreshing every unsatisfied entry once.
    pub fn fire<F>(&mut self, tracer: &mut Tracer<'_>, refresh: F) -> Drain
    where
        F: FnMut(WidgetId) -> Result<RefreshPolicy, WidgetError>,
    {
        drain_entries(core::mem::take(&mut self.pending), tracer, refresh)
    }
}

/// Entries sharing one timer delay, backed by one host timer.
#[derive(Debug)]
pub struct TimerBucket {
    id: TimerId,
    delay: Duration,
    pending: Vec<Rc<ScheduleEntry>>,
}

impl TimerBucket {
    /// The timer id.
    #[must_use]
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// The delay the host timer was armed with.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of entries, satisfied or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether the bucket holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// The widgets waiting on this timer.
    #[must_use]
    pub fn widgets(&self) -> Vec<WidgetId> {
        self.pending.iter().map(|e| e.widget).collect()
    }

    fn has_unsatisfied(&self) -> bool {
        self.pending.iter().any(|e| !e.is_satisfied())
    }

    /// Drains the bucket, refreshing every unsatisfied entry once.
    pub fn fire<F>(&mut self, tracer: &mut Tracer<'_>, refresh: F) -> Drain
    where
        F: FnMut(WidgetId) -> Result<RefreshPolicy, WidgetError>,
    {
        drain_entries(core::mem::take(&mut self.pending), tracer, refresh)
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Routes notifications and timer callbacks into bucket firings.
#[derive(Debug)]
pub struct Scheduler {
    events: [EventBucket; 5],
    timers: BTreeMap<TimerId, TimerBucket>,
    next_timer: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Creates a scheduler with empty buckets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Trigger::ALL.map(EventBucket::new),
            timers: BTreeMap::new(),
            next_timer: 0,
        }
    }

    /// Drops every pending entry and timer bucket.
    ///
    /// Timer ids keep counting up, so host timers armed before the reset
    /// fire as no-ops.
    pub fn reset(&mut self) {
        for bucket in &mut self.events {
            bucket.pending.clear();
        }
        self.timers.clear();
    }

    /// The bucket for `trigger`.
    #[must_use]
    pub fn event_bucket(&self, trigger: Trigger) -> &EventBucket {
        &self.events[trigger.index()]
    }

    /// The live timer bucket `id`, if it has not fired or been pruned.
    #[must_use]
    pub fn timer_bucket(&self, id: TimerId) -> Option<&TimerBucket> {
        self.timers.get(&id)
    }

    /// Number of live timer buckets.
    #[must_use]
    pub fn live_timers(&self) -> usize {
        self.timers.len()
    }

    /// Files refresh results into buckets and arms one host timer per
    /// distinct delay in `results`.
    ///
    /// Returns the timer ids armed by this call.
    pub fn file<I>(
        &mut self,
        results: I,
        host: &mut dyn TimerHost,
        tracer: &mut Tracer<'_>,
    ) -> Vec<TimerId>
    where
        I: IntoIterator<Item = (WidgetId, RefreshPolicy)>,
    {
        for bucket in &mut self.events {
            bucket.prune();
        }
        self.timers.retain(|_, bucket| bucket.has_unsatisfied());

        let mut by_delay: BTreeMap<Duration, Vec<Rc<ScheduleEntry>>> = BTreeMap::new();
        for (widget, policy) in results {
            if policy.is_idle() {
                warn!(%widget, "policy has no triggers and no timer, widget will not run again");
                continue;
            }
            let entry = Rc::new(ScheduleEntry::new(widget, policy));
            for trigger in policy.triggers().iter() {
                self.events[trigger.index()].push(Rc::clone(&entry));
            }
            if let Some(delay) = policy.timer() {
                by_delay.entry(delay).or_default().push(entry);
            }
        }

        let mut armed = Vec::with_capacity(by_delay.len());
        for (delay, pending) in by_delay {
            let id = TimerId(self.next_timer);
            self.next_timer += 1;
            let entries = u32::try_from(pending.len()).unwrap_or(u32::MAX);
            debug!(timer = %id, ?delay, entries, "arming timer");
            host.arm(id, delay);
            tracer.timer_armed(&TimerArmedEvent { timer: id, delay, entries });
            self.timers.insert(id, TimerBucket { id, delay, pending });
            armed.push(id);
        }
        armed
    }

    /// Fires the bucket for `trigger` and files the results.
    pub fn notify<F>(
        &mut self,
        trigger: Trigger,
        host: &mut dyn TimerHost,
        tracer: &mut Tracer<'_>,
        refresh: F,
    ) -> FireSummary
    where
        F: FnMut(WidgetId) -> Result<RefreshPolicy, WidgetError>,
    {
        let drain = self.events[trigger.index()].fire(tracer, refresh);
        self.finish(BucketSource::Event(trigger), drain, host, tracer)
    }

    /// Fires timer bucket `id` and files the results.
    ///
    /// Returns `None` when the bucket already fired or was pruned.
    pub fn fire_timer<F>(
        &mut self,
        id: TimerId,
        host: &mut dyn TimerHost,
        tracer: &mut Tracer<'_>,
        refresh: F,
    ) -> Option<FireSummary>
    where
        F: FnMut(WidgetId) -> Result<RefreshPolicy, WidgetError>,
    {
        let Some(mut bucket) = self.timers.remove(&id) else {
            debug!(timer = %id, "timer fired with nothing left to refresh");
            return None;
        };
        let drain = bucket.fire(tracer, refresh);
        let source = BucketSource::Timer {
            id,
            delay: bucket.delay,
        };
        Some(self.finish(source, drain, host, tracer))
    }

    fn finish(
        &mut self,
        source: BucketSource,
        drain: Drain,
        host: &mut dyn TimerHost,
        tracer: &mut Tracer<'_>,
    ) -> FireSummary {
        let summary = drain.summary;
        debug!(
            ?source,
            drained = summary.drained,
            refreshed = summary.refreshed,
            skipped = summary.skipped,
            failed = summary.failed,
            "bucket fired"
        );
        tracer.bucket_fired(&BucketFiredEvent {
            source,
            drained: summary.drained,
            refreshed: summary.refreshed,
            skipped: summary.skipped,
            failed: summary.failed,
        });
        self.file(drain.results, host, tracer);
        summary
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::policy::{TriggerSet, delay};

    #[derive(Default)]
    struct Timers {
        armed: Vec<(TimerId, Duration)>,
    }

    impl TimerHost for Timers {
        fn arm(&mut self, timer: TimerId, delay: Duration) {
            self.armed.push((timer, delay));
        }
    }

    /// Refreshes widgets by returning a fixed policy per widget and counting calls.
    #[derive(Default)]
    struct Widgets {
        policies: HashMap<WidgetId, RefreshPolicy>,
        calls: Vec<WidgetId>,
        failing: Vec<WidgetId>,
    }

    impl Widgets {
        fn with(mut self, id: WidgetId, policy: RefreshPolicy) -> Self {
            self.policies.insert(id, policy);
            self
        }

        fn refresh(&mut self, id: WidgetId) -> Result<RefreshPolicy, WidgetError> {
            self.calls.push(id);
            if self.failing.contains(&id) {
                return Err(WidgetError::MissingData {
                    snapshot: "current",
                    field: "temperature",
                });
            }
            Ok(self.policies[&id])
        }

        fn count(&self, id: WidgetId) -> usize {
            self.calls.iter().filter(|c| **c == id).count()
        }

        fn initial(&self) -> Vec<(WidgetId, RefreshPolicy)> {
            let mut pairs: Vec<_> = self.policies.iter().map(|(k, v)| (*k, *v)).collect();
            pairs.sort_by_key(|(k, _)| *k);
            pairs
        }
    }

    fn current_every(d: Duration) -> RefreshPolicy {
        RefreshPolicy::triggered_by([Trigger::CurrentDataChanged]).every(d)
    }

    #[test]
    fn one_timer_per_distinct_delay() {
        let mut scheduler = Scheduler::new();
        let mut timers = Timers::default();
        let armed = scheduler.file(
            [
                (WidgetId::Time, RefreshPolicy::after(delay::from_minutes(1))),
                (WidgetId::High, RefreshPolicy::after(delay::from_minutes(1))),
                (WidgetId::Low, RefreshPolicy::after(delay::from_seconds(5))),
            ],
            &mut timers,
            &mut Tracer::none(),
        );
        assert_eq!(armed.len(), 2);
        assert_eq!(timers.armed.len(), 2);
        let minute = timers
            .armed
            .iter()
            .find(|(_, d)| *d == delay::from_minutes(1))
            .unwrap()
            .0;
        assert_eq!(
            scheduler.timer_bucket(minute).unwrap().widgets(),
            [WidgetId::Time, WidgetId::High]
        );
    }

    #[test]
    fn firing_an_event_bucket_empties_it() {
        let mut widgets = Widgets::default()
            .with(WidgetId::CurrentTemp, current_every(delay::from_minutes(5)))
            .with(WidgetId::FeelsLike, current_every(delay::from_minutes(5)));
        let mut scheduler = Scheduler::new();
        let mut timers = Timers::default();
        scheduler.file(widgets.initial(), &mut timers, &mut Tracer::none());
        assert_eq!(scheduler.event_bucket(Trigger::CurrentDataChanged).len(), 2);

        let summary = scheduler.notify(
            Trigger::CurrentDataChanged,
            &mut timers,
            &mut Tracer::none(),
            |id| widgets.refresh(id),
        );
        assert_eq!(summary.refreshed, 2);
        assert_eq!(widgets.count(WidgetId::CurrentTemp), 1);
        assert_eq!(widgets.count(WidgetId::FeelsLike), 1);
        // The bucket now only holds the re-filed entries.
        let bucket = scheduler.event_bucket(Trigger::CurrentDataChanged);
        assert_eq!(bucket.len(), 2);
        assert!(bucket.pending.iter().all(|e| !e.is_satisfied()));
    }

    #[test]
    fn entry_in_event_and_timer_bucket_fires_once_per_round() {
        let mut widgets =
            Widgets::default().with(WidgetId::CurrentTemp, current_every(delay::from_minutes(5)));
        let mut scheduler = Scheduler::new();
        let mut timers = Timers::default();
        let first = scheduler.file(widgets.initial(), &mut timers, &mut Tracer::none())[0];

        scheduler.notify(
            Trigger::CurrentDataChanged,
            &mut timers,
            &mut Tracer::none(),
            |id| widgets.refresh(id),
        );
        assert_eq!(widgets.count(WidgetId::CurrentTemp), 1);

        // The first round's timer was pruned when the refresh re-filed.
        let late = scheduler.fire_timer(first, &mut timers, &mut Tracer::none(), |id| {
            widgets.refresh(id)
        });
        assert!(late.is_none());
        assert_eq!(widgets.count(WidgetId::CurrentTemp), 1);
    }

    #[test]
    fn satisfied_entry_is_skipped_when_bucket_still_has_others() {
        let mut widgets = Widgets::default()
            .with(WidgetId::CurrentTemp, current_every(delay::from_minutes(5)))
            .with(WidgetId::Uptime, RefreshPolicy::after(delay::from_minutes(5)));
        let mut scheduler = Scheduler::new();
        let mut timers = Timers::default();
        let first = scheduler.file(widgets.initial(), &mut timers, &mut Tracer::none())[0];

        scheduler.notify(
            Trigger::CurrentDataChanged,
            &mut timers,
            &mut Tracer::none(),
            |id| widgets.refresh(id),
        );
        let summary = scheduler
            .fire_timer(first, &mut timers, &mut Tracer::none(), |id| {
                widgets.refresh(id)
            })
            .unwrap();
        assert_eq!(summary.skipped, 1, "current temp already ran this round");
        assert_eq!(summary.refreshed, 1);
        assert_eq!(widgets.count(WidgetId::CurrentTemp), 1);
        assert_eq!(widgets.count(WidgetId::Uptime), 1);
    }

    #[test]
    fn data_widget_waits_for_next_push_or_its_timer() {
        let policy = current_every(Duration::from_millis(300_000));
        let mut widgets = Widgets::default().with(WidgetId::CurrentTemp, policy);
        let mut scheduler = Scheduler::new();
        let mut timers = Timers::default();
        scheduler.file(widgets.initial(), &mut timers, &mut Tracer::none());

        scheduler.notify(
            Trigger::CurrentDataChanged,
            &mut timers,
            &mut Tracer::none(),
            |id| widgets.refresh(id),
        );
        assert_eq!(widgets.count(WidgetId::CurrentTemp), 1);

        // Unrelated triggers do not wake it.
        scheduler.notify(
            Trigger::ForecastDataChanged,
            &mut timers,
            &mut Tracer::none(),
            |id| widgets.refresh(id),
        );
        assert_eq!(widgets.count(WidgetId::CurrentTemp), 1);

        // Its fresh 300000 ms timer does.
        let (latest, delay) = *timers.armed.last().unwrap();
        assert_eq!(delay, Duration::from_millis(300_000));
        scheduler
            .fire_timer(latest, &mut timers, &mut Tracer::none(), |id| {
                widgets.refresh(id)
            })
            .unwrap();
        assert_eq!(widgets.count(WidgetId::CurrentTemp), 2);
    }

    #[test]
    fn shared_delay_gives_one_bucket_firing_both() {
        let minute = RefreshPolicy::after(Duration::from_millis(60_000));
        let mut widgets = Widgets::default()
            .with(WidgetId::LastUpdate, minute)
            .with(WidgetId::ObservedTime, minute);
        let mut scheduler = Scheduler::new();
        let mut timers = Timers::default();
        let armed = scheduler.file(widgets.initial(), &mut timers, &mut Tracer::none());
        assert_eq!(armed.len(), 1);
        assert_eq!(timers.armed, [(armed[0], Duration::from_millis(60_000))]);

        let summary = scheduler
            .fire_timer(armed[0], &mut timers, &mut Tracer::none(), |id| {
                widgets.refresh(id)
            })
            .unwrap();
        assert_eq!(summary.refreshed, 2);
        assert_eq!(widgets.count(WidgetId::LastUpdate), 1);
        assert_eq!(widgets.count(WidgetId::ObservedTime), 1);
        assert_eq!(timers.armed.len(), 2, "re-armed once for the next round");
    }

    #[test]
    fn failing_widget_does_not_abort_the_drain() {
        let policy = current_every(delay::from_minutes(5));
        let mut widgets = Widgets::default()
            .with(WidgetId::CurrentTemp, policy)
            .with(WidgetId::FeelsLike, policy)
            .with(WidgetId::Station, policy);
        widgets.failing.push(WidgetId::FeelsLike);
        let mut scheduler = Scheduler::new();
        let mut timers = Timers::default();
        scheduler.file(widgets.initial(), &mut timers, &mut Tracer::none());

        let summary = scheduler.notify(
            Trigger::CurrentDataChanged,
            &mut timers,
            &mut Tracer::none(),
            |id| widgets.refresh(id),
        );
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.refreshed, 2);
        assert_eq!(widgets.calls.len(), 3);
        assert_eq!(
            scheduler.event_bucket(Trigger::CurrentDataChanged).len(),
            3,
            "failed widget is re-filed with its previous policy"
        );
    }

    #[test]
    fn timer_fires_at_most_once() {
        let mut widgets =
            Widgets::default().with(WidgetId::Time, RefreshPolicy::after(delay::from_seconds(1)));
        let mut scheduler = Scheduler::new();
        let mut timers = Timers::default();
        let id = scheduler.file(widgets.initial(), &mut timers, &mut Tracer::none())[0];

        let mut refresh = |id| widgets.refresh(id);
        assert!(
            scheduler
                .fire_timer(id, &mut timers, &mut Tracer::none(), &mut refresh)
                .is_some()
        );
        assert!(
            scheduler
                .fire_timer(id, &mut timers, &mut Tracer::none(), &mut refresh)
                .is_none()
        );
        assert!(
            scheduler
                .fire_timer(TimerId(999), &mut timers, &mut Tracer::none(), &mut refresh)
                .is_none()
        );
        assert_eq!(widgets.count(WidgetId::Time), 1);
    }

    #[test]
    fn multi_trigger_entry_is_filed_in_each_bucket() {
        let policy =
            RefreshPolicy::triggered_by([Trigger::CurrentDataChanged, Trigger::SunDataChanged]);
        let mut widgets = Widgets::default().with(WidgetId::WeatherEmoji, policy);
        let mut scheduler = Scheduler::new();
        let mut timers = Timers::default();
        let armed = scheduler.file(widgets.initial(), &mut timers, &mut Tracer::none());
        assert!(armed.is_empty());
        assert_eq!(scheduler.event_bucket(Trigger::CurrentDataChanged).len(), 1);
        assert_eq!(scheduler.event_bucket(Trigger::SunDataChanged).len(), 1);

        scheduler.notify(
            Trigger::SunDataChanged,
            &mut timers,
            &mut Tracer::none(),
            |id| widgets.refresh(id),
        );
        // The stale copy in the current bucket was pruned during re-filing.
        assert_eq!(scheduler.event_bucket(Trigger::CurrentDataChanged).len(), 1);
        scheduler.notify(
            Trigger::CurrentDataChanged,
            &mut timers,
            &mut Tracer::none(),
            |id| widgets.refresh(id),
        );
        assert_eq!(widgets.count(WidgetId::WeatherEmoji), 2);
    }

    #[test]
    fn idle_policies_are_dropped() {
        let mut scheduler = Scheduler::new();
        let mut timers = Timers::default();
        scheduler.file(
            [(WidgetId::Time, RefreshPolicy::on(TriggerSet::EMPTY))],
            &mut timers,
            &mut Tracer::none(),
        );
        assert!(Trigger::ALL.iter().all(|t| scheduler.event_bucket(*t).is_empty()));
        assert_eq!(scheduler.live_timers(), 0);
    }

    #[test]
    fn reset_keeps_timer_ids_unique() {
        let mut scheduler = Scheduler::new();
        let mut timers = Timers::default();
        let pairs = [(WidgetId::Time, RefreshPolicy::after(delay::from_seconds(1)))];
        let before = scheduler.file(pairs, &mut timers, &mut Tracer::none())[0];
        scheduler.reset();
        let after = scheduler.file(pairs, &mut timers, &mut Tracer::none())[0];
        assert_ne!(before, after);
        assert!(scheduler.timer_bucket(before).is_none());
    }
}
