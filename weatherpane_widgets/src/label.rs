// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single text element whose content and policy come from closures.
//!
//! Most widgets are one line of text. [`Label`] implements the self-healing
//! initialize/refresh pair once; the clock, current-conditions and forecast
//! modules only supply what to show and when to come back.

use core::fmt;

use weatherpane_core::policy::RefreshPolicy;
use weatherpane_core::widget::{RefreshContext, StoredHandle, Widget, WidgetError, WidgetId};

use crate::format;
use crate::settings::TextElementSettings;

/// Produces the label text. `Ok(None)` means "show nothing"; an error shows
/// [`format::PLACEHOLDER`] until the next successful call.
pub type TextFn = Box<dyn Fn(&RefreshContext<'_>) -> Result<Option<String>, WidgetError>>;

/// Produces the next refresh policy.
pub type PolicyFn = Box<dyn Fn(&RefreshContext<'_>) -> RefreshPolicy>;

/// A one-element text widget.
pub struct Label {
    id: WidgetId,
    settings: TextElementSettings,
    text: TextFn,
    policy: PolicyFn,
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("id", &self.id)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Label {
    /// Creates a label.
    #[must_use]
    pub fn new(
        id: WidgetId,
        settings: TextElementSettings,
        text: TextFn,
        policy: PolicyFn,
    ) -> Self {
        Self {
            id,
            settings,
            text,
            policy,
        }
    }

    /// A label refreshed on a fixed policy.
    #[must_use]
    pub fn fixed(
        id: WidgetId,
        settings: TextElementSettings,
        policy: RefreshPolicy,
        text: TextFn,
    ) -> Self {
        Self::new(id, settings, text, Box::new(move |_: &RefreshContext<'_>| policy))
    }

    fn draw(&self, cx: &mut RefreshContext<'_>, text: &str) {
        let halo = self.settings.halo();
        let element = cx.scene.surface.create_text(
            text,
            self.settings.position(),
            &self.settings.style(),
            halo.as_ref(),
        );
        cx.scene.store.insert(self.id, StoredHandle::Element(element));
    }
}

impl Widget for Label {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn initialize(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
        let policy = (self.policy)(cx);
        if !self.settings.enabled {
            return Ok(policy);
        }
        match (self.text)(cx) {
            Ok(Some(text)) => self.draw(cx, &text),
            Ok(None) => {}
            Err(err) => {
                self.draw(cx, format::PLACEHOLDER);
                return Err(err);
            }
        }
        Ok(policy)
    }

    fn refresh(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
        if !self.settings.enabled {
            cx.scene.delete_widget(self.id);
            return Ok((self.policy)(cx));
        }
        let Some(element) = cx.scene.store.element(self.id).filter(|_| cx.scene.is_live(self.id))
        else {
            return self.initialize(cx);
        };
        match (self.text)(cx) {
            Ok(Some(text)) => cx.scene.surface.update_text(element, &text),
            Ok(None) => cx.scene.delete_widget(self.id),
            Err(err) => {
                cx.scene.surface.update_text(element, format::PLACEHOLDER);
                return Err(err);
            }
        }
        Ok((self.policy)(cx))
    }
}

#[cfg(test)]
mod tests {
    use weatherpane_core::policy::{Trigger, delay};
    use weatherpane_core::scene::PrimitiveKind;

    use super::*;
    use crate::testing::Harness;

    fn temperature_label() -> Label {
        Label::fixed(
            WidgetId::CurrentTemp,
            TextElementSettings::at(10.0, 10.0),
            RefreshPolicy::triggered_by([Trigger::CurrentDataChanged])
                .every(delay::from_minutes(5)),
            Box::new(|cx: &RefreshContext<'_>| {
                Ok(cx.data.current.temperature.map(|t| format!("{t:.1}°")))
            }),
        )
    }

    #[test]
    fn draws_text_with_halo() {
        let mut h = Harness::new();
        h.data.current.temperature = Some(20.0);
        let mut label = temperature_label();
        h.initialize(&mut label).unwrap();
        assert!(h.log.shows("20.0°"));
        assert_eq!(h.log.count_kind(PrimitiveKind::Text), 9, "primary plus eight halo copies");
    }

    #[test]
    fn none_draws_nothing_then_appears() {
        let mut h = Harness::new();
        let mut label = temperature_label();
        h.initialize(&mut label).unwrap();
        assert_eq!(h.log.live_count(), 0);

        h.data.current.temperature = Some(3.0);
        h.refresh(&mut label).unwrap();
        assert!(h.log.shows("3.0°"));
    }

    #[test]
    fn refresh_updates_in_place() {
        let mut h = Harness::new();
        h.data.current.temperature = Some(1.0);
        let mut label = temperature_label();
        h.initialize(&mut label).unwrap();
        let created = h.log.created_count();

        h.data.current.temperature = Some(2.0);
        h.refresh(&mut label).unwrap();
        assert_eq!(h.log.created_count(), created);
        assert!(h.log.shows("2.0°"));
    }

    #[test]
    fn value_going_away_deletes_element() {
        let mut h = Harness::new();
        h.data.current.temperature = Some(1.0);
        let mut label = temperature_label();
        h.initialize(&mut label).unwrap();

        h.data.current.temperature = None;
        h.refresh(&mut label).unwrap();
        assert_eq!(h.log.live_count(), 0);
        assert!(h.scene.store.get(WidgetId::CurrentTemp).is_none());
    }

    #[test]
    fn heals_after_clear() {
        let mut h = Harness::new();
        h.data.current.temperature = Some(1.0);
        let mut label = temperature_label();
        h.initialize(&mut label).unwrap();
        let live = h.log.live_count();

        h.scene.clear();
        h.refresh(&mut label).unwrap();
        assert_eq!(h.log.live_count(), live);
        assert!(h.scene.is_live(WidgetId::CurrentTemp));
    }

    fn failing_after(limit: f64) -> Label {
        Label::fixed(
            WidgetId::CurrentTemp,
            TextElementSettings::at(10.0, 10.0).no_stroke(),
            RefreshPolicy::after(delay::from_minutes(5)),
            Box::new(move |cx: &RefreshContext<'_>| match cx.data.current.temperature {
                Some(t) if t > limit => Err(WidgetError::Setting(format!("{t} out of range"))),
                t => Ok(Some(format!("{:.1}°", t.unwrap_or_default()))),
            }),
        )
    }

    #[test]
    fn failed_refresh_replaces_stale_text() {
        let mut h = Harness::new();
        h.data.current.temperature = Some(20.0);
        let mut label = failing_after(50.0);
        h.initialize(&mut label).unwrap();
        assert!(h.log.shows("20.0°"));

        h.data.current.temperature = Some(99.0);
        assert!(h.refresh(&mut label).is_err());
        assert!(!h.log.shows("20.0°"));
        assert_eq!(h.log.texts(), ["--"]);
        assert!(h.scene.is_live(WidgetId::CurrentTemp));
    }

    #[test]
    fn failed_initialize_still_holds_its_place() {
        let mut h = Harness::new();
        h.data.current.temperature = Some(99.0);
        let mut label = failing_after(50.0);
        assert!(h.initialize(&mut label).is_err());
        assert_eq!(h.log.texts(), ["--"]);

        h.data.current.temperature = Some(21.0);
        let created = h.log.created_count();
        h.refresh(&mut label).unwrap();
        assert_eq!(h.log.created_count(), created, "placeholder updated in place");
        assert_eq!(h.log.texts(), ["21.0°"]);
    }

    #[test]
    fn disabled_label_stays_polled() {
        let mut h = Harness::new();
        h.data.current.temperature = Some(1.0);
        let mut label = Label::fixed(
            WidgetId::FeelsLike,
            TextElementSettings::default().disabled(),
            RefreshPolicy::after(delay::from_minutes(5)),
            Box::new(|_: &RefreshContext<'_>| Ok(Some("x".to_owned()))),
        );
        let policy = h.initialize(&mut label).unwrap();
        assert_eq!(policy.timer(), Some(delay::from_minutes(5)));
        assert_eq!(h.log.live_count(), 0);
    }
}
