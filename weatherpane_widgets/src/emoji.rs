// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Weather glyph stacks.
//!
//! Both widgets draw three layers at one origin. [`WeatherEmoji`] uses text
//! glyphs for every layer; [`WeatherIcon`] puts a raster icon at the back
//! and overlays up to two glyphs.
//!
//! ```text
//!   front   ⚡        (offset from origin)
//!   middle  🌧
//!   back    ☁ / Icon-Moderate_Rain.png
//! ```

use std::path::PathBuf;

use kurbo::Vec2;
use tracing::debug;
use weatherpane_core::policy::{RefreshPolicy, Trigger, TriggerSet, delay};
use weatherpane_core::scene::{GlyphBack, GlyphLayer, GlyphStackSpec};
use weatherpane_core::widget::{RefreshContext, StoredHandle, Widget, WidgetError, WidgetId};

use crate::conditions::{SkyKind, classify};
use crate::settings::{StackedEmojiSettings, StackedIconSettings, icon_file, offset};

const POLICY: RefreshPolicy = RefreshPolicy::on(
    TriggerSet::EMPTY
        .with(Trigger::CurrentDataChanged)
        .with(Trigger::ForecastDataChanged)
        .with(Trigger::SunDataChanged),
)
.every(delay::from_minutes(5));

fn sky(cx: &RefreshContext<'_>) -> SkyKind {
    classify(
        &cx.data.current,
        cx.data.forecast.moon,
        &cx.data.sun,
        cx.local_now(),
    )
}

// ---------------------------------------------------------------------------
// Emoji
// ---------------------------------------------------------------------------

/// Three stacked emoji glyphs for the current sky.
#[derive(Debug)]
pub struct WeatherEmoji {
    settings: StackedEmojiSettings,
}

impl WeatherEmoji {
    /// Creates the widget.
    #[must_use]
    pub fn new(settings: StackedEmojiSettings) -> Self {
        Self { settings }
    }
}

impl Widget for WeatherEmoji {
    fn id(&self) -> WidgetId {
        WidgetId::WeatherEmoji
    }

    fn initialize(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
        if !self.settings.enabled {
            return Ok(POLICY);
        }
        let glyphs = sky(cx).emoji();
        let style = self.settings.glyph.style();
        let halo = self.settings.glyph.halo();
        let layer = |text, shift| GlyphLayer {
            text,
            offset: shift,
            style: &style,
            halo: halo.as_ref(),
        };
        let stack = cx.scene.surface.create_glyph_stack(&GlyphStackSpec {
            origin: self.settings.origin(),
            back: GlyphBack::Text(layer(glyphs.back, Vec2::ZERO)),
            middle: layer(glyphs.middle, offset(self.settings.middle_offset)),
            front: layer(glyphs.front, offset(self.settings.front_offset)),
        })?;
        cx.scene
            .store
            .insert(WidgetId::WeatherEmoji, StoredHandle::Glyphs(stack));
        Ok(POLICY)
    }

    fn refresh(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
        if !self.settings.enabled {
            cx.scene.delete_widget(WidgetId::WeatherEmoji);
            return Ok(POLICY);
        }
        let Some(stack) = cx
            .scene
            .store
            .glyphs(WidgetId::WeatherEmoji)
            .filter(|_| cx.scene.is_live(WidgetId::WeatherEmoji))
        else {
            cx.scene.delete_widget(WidgetId::WeatherEmoji);
            return self.initialize(cx);
        };
        let glyphs = sky(cx).emoji();
        let surface = &mut cx.scene.surface;
        surface.update_text(stack.back, glyphs.back);
        surface.update_text(stack.middle, glyphs.middle);
        surface.update_text(stack.front, glyphs.front);
        Ok(POLICY)
    }
}

// ---------------------------------------------------------------------------
// Icon
// ---------------------------------------------------------------------------

/// A weather icon image with glyph overlays.
#[derive(Debug)]
pub struct WeatherIcon {
    settings: StackedIconSettings,
    assets_dir: PathBuf,
    shown: Option<PathBuf>,
}

impl WeatherIcon {
    /// Creates the widget; icons are read from `{assets_dir}/icons/`.
    #[must_use]
    pub fn new(settings: StackedIconSettings, assets_dir: PathBuf) -> Self {
        Self {
            settings,
            assets_dir,
            shown: None,
        }
    }

    fn icon_path(&self, name: &str) -> PathBuf {
        icon_file(&self.assets_dir, name, self.settings.outline)
    }
}

impl Widget for WeatherIcon {
    fn id(&self) -> WidgetId {
        WidgetId::WeatherIcon
    }

    fn initialize(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
        self.shown = None;
        if !self.settings.enabled {
            return Ok(POLICY);
        }
        let icon = sky(cx).icon();
        let path = self.icon_path(icon.name);
        let style = self.settings.glyph.style();
        let halo = self.settings.glyph.halo();
        let layer = |text, shift| GlyphLayer {
            text,
            offset: shift,
            style: &style,
            halo: halo.as_ref(),
        };
        let stack = cx.scene.surface.create_glyph_stack(&GlyphStackSpec {
            origin: self.settings.origin(),
            back: GlyphBack::Image {
                path: &path,
                offset: Vec2::ZERO,
                width: self.settings.width,
                height: self.settings.height,
                anchor: self.settings.anchor,
            },
            middle: layer(icon.middle, offset(self.settings.middle_offset)),
            front: layer(icon.front, offset(self.settings.front_offset)),
        })?;
        cx.scene
            .store
            .insert(WidgetId::WeatherIcon, StoredHandle::Glyphs(stack));
        self.shown = Some(path);
        Ok(POLICY)
    }

    fn refresh(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
        if !self.settings.enabled {
            cx.scene.delete_widget(WidgetId::WeatherIcon);
            return Ok(POLICY);
        }
        let Some(stack) = cx
            .scene
            .store
            .glyphs(WidgetId::WeatherIcon)
            .filter(|_| cx.scene.is_live(WidgetId::WeatherIcon))
        else {
            cx.scene.delete_widget(WidgetId::WeatherIcon);
            return self.initialize(cx);
        };
        let icon = sky(cx).icon();
        let path = self.icon_path(icon.name);
        if self.shown.as_ref() != Some(&path) {
            debug!(icon = icon.name, "changing weather icon");
            cx.scene.surface.change_image(
                stack.back,
                &path,
                self.settings.width,
                self.settings.height,
            )?;
            self.shown = Some(path);
        }
        cx.scene.surface.update_text(stack.middle, icon.middle);
        cx.scene.surface.update_text(stack.front, icon.front);
        Ok(POLICY)
    }
}
