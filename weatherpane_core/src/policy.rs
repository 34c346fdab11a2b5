// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Refresh policies: the value a widget returns to say when it must run again.
//!
//! A [`RefreshPolicy`] combines a [`TriggerSet`] of domain events with an
//! optional timer delay. Having the timer as `Option<Duration>` means a policy
//! that asks for a timer always carries its delay.
//!
//! The boundary constructors ([`RefreshPolicy::next_second_after`] and
//! friends) are pure functions of the supplied instant. Delays round up to
//! the next whole millisecond so a timer never fires before the boundary it
//! was armed for.

use core::fmt;
use core::time::Duration;

use chrono::{DateTime, Local, NaiveTime, TimeDelta, TimeZone, Timelike};

const NANOS_PER_SEC: u64 = 1_000_000_000;
const NANOS_PER_MILLI: u64 = 1_000_000;

/// Fixed delay constructors.
pub mod delay {
    use core::time::Duration;

    /// A delay of `seconds` seconds.
    #[inline]
    #[must_use]
    pub const fn from_seconds(seconds: u64) -> Duration {
        Duration::from_secs(seconds)
    }

    /// A delay of `minutes` minutes.
    #[inline]
    #[must_use]
    pub const fn from_minutes(minutes: u64) -> Duration {
        Duration::from_secs(minutes * 60)
    }

    /// A delay of `hours` hours.
    #[inline]
    #[must_use]
    pub const fn from_hours(hours: u64) -> Duration {
        Duration::from_secs(hours * 3600)
    }
}

// ---------------------------------------------------------------------------
// Triggers
// ---------------------------------------------------------------------------

/// A domain event that can wake a widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Trigger {
    /// A new background image was selected.
    BackgroundChanged,
    /// A fresh current-conditions snapshot arrived.
    CurrentDataChanged,
    /// A fresh forecast snapshot arrived.
    ForecastDataChanged,
    /// A fresh observation history arrived.
    HistoryDataChanged,
    /// Fresh sunrise/sunset times arrived.
    SunDataChanged,
}

impl Trigger {
    /// Every trigger, in bucket order.
    pub const ALL: [Self; 5] = [
        Self::BackgroundChanged,
        Self::CurrentDataChanged,
        Self::ForecastDataChanged,
        Self::HistoryDataChanged,
        Self::SunDataChanged,
    ];

    /// Position of this trigger in [`Trigger::ALL`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short name used in logs and trace output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BackgroundChanged => "background",
            Self::CurrentDataChanged => "current",
            Self::ForecastDataChanged => "forecast",
            Self::HistoryDataChanged => "history",
            Self::SunDataChanged => "sun",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A small set of [`Trigger`]s.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TriggerSet(u8);

impl TriggerSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Returns a copy of the set with `trigger` added.
    #[inline]
    #[must_use]
    pub const fn with(self, trigger: Trigger) -> Self {
        Self(self.0 | (1 << trigger as u8))
    }

    /// Whether `trigger` is in the set.
    #[inline]
    #[must_use]
    pub const fn contains(self, trigger: Trigger) -> bool {
        self.0 & (1 << trigger as u8) != 0
    }

    /// Whether the set is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of triggers in the set.
    #[inline]
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates the triggers in bucket order.
    pub fn iter(self) -> impl Iterator<Item = Trigger> {
        Trigger::ALL
            .into_iter()
            .filter(move |trigger| self.contains(*trigger))
    }
}

impl FromIterator<Trigger> for TriggerSet {
    fn from_iter<I: IntoIterator<Item = Trigger>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Debug for TriggerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// ---------------------------------------------------------------------------
// RefreshPolicy
// ---------------------------------------------------------------------------

/// When a widget wants its next refresh.
///
/// Produced fresh by every `initialize`/`refresh` call and never mutated after
/// it is handed to the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RefreshPolicy {
    triggers: TriggerSet,
    timer: Option<Duration>,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::after(Self::DEFAULT_DELAY)
    }
}

impl RefreshPolicy {
    /// Delay used when a widget has nothing better to ask for.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

    /// Shortest timer a policy will carry.
    pub const MIN_DELAY: Duration = Duration::from_millis(1);

    /// A policy woken by the given triggers and no timer.
    #[must_use]
    pub const fn on(triggers: TriggerSet) -> Self {
        Self {
            triggers,
            timer: None,
        }
    }

    /// A policy woken by every trigger in `triggers` and no timer.
    #[must_use]
    pub fn triggered_by(triggers: impl IntoIterator<Item = Trigger>) -> Self {
        Self::on(triggers.into_iter().collect())
    }

    /// A timer-only policy.
    #[must_use]
    pub const fn after(delay: Duration) -> Self {
        Self::on(TriggerSet::EMPTY).every(delay)
    }

    /// Adds a trigger.
    #[must_use]
    pub const fn and(self, trigger: Trigger) -> Self {
        Self {
            triggers: self.triggers.with(trigger),
            timer: self.timer,
        }
    }

    /// Sets the timer delay, replacing any previous one.
    ///
    /// A zero delay is raised to [`MIN_DELAY`](Self::MIN_DELAY).
    #[must_use]
    pub const fn every(self, delay: Duration) -> Self {
        let delay = if delay.is_zero() {
            Self::MIN_DELAY
        } else {
            delay
        };
        Self {
            triggers: self.triggers,
            timer: Some(delay),
        }
    }

    /// The data triggers this policy waits on.
    #[inline]
    #[must_use]
    pub const fn triggers(&self) -> TriggerSet {
        self.triggers
    }

    /// The timer delay, if the policy includes a timer.
    #[inline]
    #[must_use]
    pub const fn timer(&self) -> Option<Duration> {
        self.timer
    }

    /// Whether nothing will ever wake this policy.
    #[inline]
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.triggers.is_empty() && self.timer.is_none()
    }

    // -- Boundary constructors --

    /// Timer that fires on the next wall-clock second after `now`.
    #[must_use]
    pub fn next_second_after<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self::after(until_boundary(now, 1))
    }

    /// Timer that fires on the next wall-clock minute after `now`.
    #[must_use]
    pub fn next_minute_after<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self::after(until_boundary(now, 60))
    }

    /// Timer that fires on the next wall-clock hour after `now`.
    #[must_use]
    pub fn next_hour_after<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self::after(until_boundary(now, 3600))
    }

    /// Timer that fires at the next local midnight in `now`'s time zone.
    #[must_use]
    pub fn on_midnight_after<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self::after(until_midnight(now))
    }

    /// [`next_second_after`](Self::next_second_after) the local clock.
    #[must_use]
    pub fn next_second() -> Self {
        Self::next_second_after(&Local::now())
    }

    /// [`next_minute_after`](Self::next_minute_after) the local clock.
    #[must_use]
    pub fn next_minute() -> Self {
        Self::next_minute_after(&Local::now())
    }

    /// [`next_hour_after`](Self::next_hour_after) the local clock.
    #[must_use]
    pub fn next_hour() -> Self {
        Self::next_hour_after(&Local::now())
    }

    /// [`on_midnight_after`](Self::on_midnight_after) the local clock.
    #[must_use]
    pub fn on_midnight() -> Self {
        Self::on_midnight_after(&Local::now())
    }
}

fn ceil_millis(nanos: u64) -> Duration {
    Duration::from_millis(nanos.div_ceil(NANOS_PER_MILLI))
}

/// Time left until the next multiple of `period_secs` within the local day.
fn until_boundary<Tz: TimeZone>(now: &DateTime<Tz>, period_secs: u32) -> Duration {
    // Leap seconds report nanosecond() >= 1e9.
    let sub_second = u64::from(now.nanosecond().min(999_999_999));
    let into_period =
        u64::from(now.num_seconds_from_midnight() % period_secs) * NANOS_PER_SEC + sub_second;
    ceil_millis(u64::from(period_secs) * NANOS_PER_SEC - into_period)
}

fn until_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let Some(tomorrow) = now.date_naive().succ_opt() else {
        return delay::from_hours(24);
    };
    let midnight = tomorrow.and_time(NaiveTime::MIN);
    let remaining = match now.timezone().from_local_datetime(&midnight).earliest() {
        Some(target) => target.signed_duration_since(now),
        // Midnight skipped by a DST jump; measure in local wall time.
        None => midnight - now.naive_local(),
    };
    delta_to_delay(remaining)
}

fn delta_to_delay(delta: TimeDelta) -> Duration {
    let nanos = delta.num_nanoseconds().unwrap_or(i64::MAX).max(1);
    ceil_millis(u64::try_from(nanos).unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};
    use proptest::prelude::*;

    use super::*;

    fn utc(h: u32, m: u32, s: u32, nanos: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, h, m, s)
            .single()
            .unwrap()
            .with_nanosecond(nanos)
            .unwrap()
    }

    #[test]
    fn trigger_set_collects_and_iterates_in_order() {
        let set: TriggerSet = [Trigger::SunDataChanged, Trigger::CurrentDataChanged]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(Trigger::CurrentDataChanged));
        assert!(!set.contains(Trigger::ForecastDataChanged));
        let order: Vec<_> = set.iter().collect();
        assert_eq!(
            order,
            [Trigger::CurrentDataChanged, Trigger::SunDataChanged],
            "iteration follows bucket order"
        );
    }

    #[test]
    fn builder_combines_triggers_and_timer() {
        let policy = RefreshPolicy::on(TriggerSet::EMPTY)
            .and(Trigger::CurrentDataChanged)
            .every(delay::from_minutes(5));
        assert!(policy.triggers().contains(Trigger::CurrentDataChanged));
        assert_eq!(policy.timer(), Some(Duration::from_millis(300_000)));
        assert!(!policy.is_idle());
        assert!(RefreshPolicy::on(TriggerSet::EMPTY).is_idle());
    }

    #[test]
    fn default_is_one_second_timer() {
        let policy = RefreshPolicy::default();
        assert_eq!(policy.timer(), Some(Duration::from_millis(1000)));
        assert!(policy.triggers().is_empty());
    }

    #[test]
    fn zero_delay_is_raised() {
        let policy = RefreshPolicy::after(Duration::ZERO);
        assert_eq!(policy.timer(), Some(RefreshPolicy::MIN_DELAY));
    }

    #[test]
    fn next_second_rounds_up_partial_milliseconds() {
        let now = utc(10, 0, 0, 250_500_000);
        let policy = RefreshPolicy::next_second_after(&now);
        assert_eq!(policy.timer(), Some(Duration::from_millis(750)));
    }

    #[test]
    fn boundary_exactly_on_tick_waits_full_period() {
        let now = utc(10, 0, 0, 0);
        assert_eq!(
            RefreshPolicy::next_second_after(&now).timer(),
            Some(Duration::from_millis(1000))
        );
        assert_eq!(
            RefreshPolicy::next_minute_after(&now).timer(),
            Some(delay::from_minutes(1))
        );
        assert_eq!(
            RefreshPolicy::next_hour_after(&now).timer(),
            Some(delay::from_hours(1))
        );
    }

    #[test]
    fn next_minute_and_hour_measure_from_now() {
        let now = utc(10, 59, 30, 0);
        assert_eq!(
            RefreshPolicy::next_minute_after(&now).timer(),
            Some(delay::from_seconds(30))
        );
        assert_eq!(
            RefreshPolicy::next_hour_after(&now).timer(),
            Some(delay::from_seconds(30))
        );
    }

    #[test]
    fn on_midnight_respects_offset() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 6, 1, 23, 0, 0).single().unwrap();
        assert_eq!(
            RefreshPolicy::on_midnight_after(&now).timer(),
            Some(delay::from_hours(1))
        );
    }

    #[test]
    fn local_helpers_stay_in_range() {
        let policy = RefreshPolicy::next_second();
        let delay = policy.timer().unwrap();
        assert!(delay > Duration::ZERO && delay <= Duration::from_secs(1));
        let midnight = RefreshPolicy::on_midnight().timer().unwrap();
        assert!(midnight <= Duration::from_secs(25 * 3600));
    }

    proptest! {
        #[test]
        fn boundary_delays_are_within_period(
            secs in 0_i64..4_102_444_800,
            nanos in 0_u32..1_000_000_000,
        ) {
            let now = Utc.timestamp_opt(secs, nanos).single().unwrap();
            for (policy, period) in [
                (RefreshPolicy::next_second_after(&now), Duration::from_secs(1)),
                (RefreshPolicy::next_minute_after(&now), delay::from_minutes(1)),
                (RefreshPolicy::next_hour_after(&now), delay::from_hours(1)),
            ] {
                let delay = policy.timer().unwrap();
                prop_assert!(delay > Duration::ZERO, "delay must be positive");
                prop_assert!(delay <= period, "delay {delay:?} exceeds {period:?}");
            }
        }

        #[test]
        fn midnight_delay_lands_on_midnight(
            secs in 0_i64..4_102_444_800,
            nanos in 0_u32..1_000_000_000,
            offset_hours in -12_i32..=14,
        ) {
            let tz = FixedOffset::east_opt(offset_hours * 3600).unwrap();
            let now = tz.timestamp_opt(secs, nanos).single().unwrap();
            let delay = RefreshPolicy::on_midnight_after(&now).timer().unwrap();
            let landed = now + TimeDelta::from_std(delay).unwrap();
            let midnight = now
                .date_naive()
                .succ_opt()
                .unwrap()
                .and_time(NaiveTime::MIN);
            let error = (landed.naive_local() - midnight).num_milliseconds().abs();
            prop_assert!(error < 1000, "landed {error}ms away from midnight");
        }
    }
}
