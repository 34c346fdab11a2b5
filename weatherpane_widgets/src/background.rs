// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The full-screen background image and its tag message.

use std::path::PathBuf;

use tracing::debug;
use weatherpane_core::policy::{RefreshPolicy, Trigger, TriggerSet, delay};
use weatherpane_core::widget::{RefreshContext, StoredHandle, Widget, WidgetError, WidgetId};

use crate::label::Label;
use crate::settings::{ElementSettings, TextElementSettings};

const POLICY: RefreshPolicy = RefreshPolicy::on(TriggerSet::EMPTY.with(Trigger::BackgroundChanged))
    .every(delay::from_minutes(15));

/// Draws the picked background beneath every other element.
#[derive(Debug)]
pub struct Background {
    settings: ElementSettings,
    shown: Option<PathBuf>,
}

impl Background {
    /// Creates the widget.
    #[must_use]
    pub fn new(settings: ElementSettings) -> Self {
        Self {
            settings,
            shown: None,
        }
    }
}

impl Widget for Background {
    fn id(&self) -> WidgetId {
        WidgetId::Background
    }

    fn initialize(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
        self.shown = None;
        if !self.settings.enabled {
            return Ok(POLICY);
        }
        let Some(path) = &cx.data.current.background.path else {
            return Ok(POLICY);
        };
        let id = cx.scene.surface.create_background(path)?;
        cx.scene.store.insert(WidgetId::Background, StoredHandle::Element(id));
        self.shown = Some(path.clone());
        Ok(POLICY)
    }

    fn refresh(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
        if !self.settings.enabled {
            cx.scene.delete_widget(WidgetId::Background);
            return Ok(POLICY);
        }
        let Some(id) = cx
            .scene
            .store
            .element(WidgetId::Background)
            .filter(|_| cx.scene.is_live(WidgetId::Background))
        else {
            return self.initialize(cx);
        };
        let Some(path) = &cx.data.current.background.path else {
            return Ok(POLICY);
        };
        if self.shown.as_ref() == Some(path) {
            return Ok(POLICY);
        }
        debug!(path = %path.display(), "changing background");
        cx.scene.surface.change_background_image(id, path)?;
        self.shown = Some(path.clone());
        Ok(POLICY)
    }
}

/// The background picker's message, or the chosen image's tags.
#[must_use]
pub fn image_tags(settings: &TextElementSettings) -> Label {
    Label::fixed(
        WidgetId::ImageTags,
        settings.clone(),
        POLICY,
        Box::new(|cx: &RefreshContext<'_>| {
            let background = &cx.data.current.background;
            Ok(match &background.message {
                Some(message) => Some(message.clone()),
                None if background.image_tags.is_empty() => None,
                None => Some(format!("Tags: {}", background.image_tags.join(", "))),
            })
        }),
    )
}

#[cfg(test)]
mod tests {
    use weatherpane_core::scene::{CanvasOp, PrimitiveKind};

    use super::*;
    use crate::testing::{Harness, write_png};

    #[test]
    fn draws_nothing_until_a_path_arrives() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sunny.png");
        write_png(&path, [0xFF, 0xCC, 0]);

        let mut h = Harness::new();
        let mut background = Background::new(ElementSettings::default());
        h.initialize(&mut background).unwrap();
        assert_eq!(h.log.live_count(), 0);

        h.data.current.background.path = Some(path.clone());
        h.refresh(&mut background).unwrap();
        assert_eq!(h.log.count_kind(PrimitiveKind::Image), 1);
        let pixels = h.scene.surface.images().len();
        assert_eq!(pixels, 1);
    }

    #[test]
    fn same_path_is_not_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.png");
        let second = dir.path().join("b.png");
        write_png(&first, [1, 2, 3]);
        write_png(&second, [4, 5, 6]);

        let mut h = Harness::new();
        h.data.current.background.path = Some(first);
        let mut background = Background::new(ElementSettings::default());
        h.initialize(&mut background).unwrap();
        h.log.clear_ops();

        h.refresh(&mut background).unwrap();
        assert_eq!(h.log.op_count(), 0);

        h.data.current.background.path = Some(second);
        h.refresh(&mut background).unwrap();
        assert!(
            h.log
                .ops()
                .iter()
                .any(|op| matches!(op, CanvasOp::SetImage { .. }))
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut h = Harness::new();
        h.data.current.background.path = Some(PathBuf::from("/nonexistent/bg.png"));
        let err = h
            .initialize(&mut Background::new(ElementSettings::default()))
            .unwrap_err();
        assert!(matches!(err, WidgetError::Surface(_)));
        assert_eq!(h.log.live_count(), 0);
    }

    #[test]
    fn tags_message_prefers_picker_text() {
        let mut h = Harness::new();
        h.data.current.background.image_tags = vec!["Sunset".to_owned(), "Cloudy".to_owned()];
        let mut label = image_tags(&TextElementSettings::default());
        h.initialize(&mut label).unwrap();
        assert!(h.log.shows("Tags: Sunset, Cloudy"));

        h.data.current.background.message = Some("No image matches [Night, Snow]".to_owned());
        h.refresh(&mut label).unwrap();
        assert!(h.log.shows("No image matches [Night, Snow]"));
    }
}
