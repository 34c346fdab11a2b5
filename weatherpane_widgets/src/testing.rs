// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for widget tests.

use std::path::Path;

use chrono::{DateTime, Local, TimeZone};
use kurbo::Size;
use weatherpane_core::data::Snapshots;
use weatherpane_core::policy::RefreshPolicy;
use weatherpane_core::scene::{CanvasLog, DrawingSurface, RecordingCanvas};
use weatherpane_core::widget::{RefreshContext, Scene, Widget, WidgetError};

/// A recording scene plus the snapshots and time handed to widget calls.
pub(crate) struct Harness {
    pub(crate) scene: Scene,
    pub(crate) data: Snapshots,
    pub(crate) now: DateTime<Local>,
    pub(crate) log: CanvasLog,
}

impl Harness {
    pub(crate) fn new() -> Self {
        let canvas = RecordingCanvas::new();
        let log = canvas.log();
        Self {
            scene: Scene::new(DrawingSurface::new(
                Box::new(canvas),
                Size::new(320.0, 240.0),
            )),
            data: Snapshots::default(),
            now: Local.with_ymd_and_hms(2026, 6, 10, 12, 0, 0).unwrap(),
            log,
        }
    }

    pub(crate) fn initialize(
        &mut self,
        widget: &mut dyn Widget,
    ) -> Result<RefreshPolicy, WidgetError> {
        let mut cx = RefreshContext {
            scene: &mut self.scene,
            data: &self.data,
            now: self.now,
        };
        widget.initialize(&mut cx)
    }

    pub(crate) fn refresh(
        &mut self,
        widget: &mut dyn Widget,
    ) -> Result<RefreshPolicy, WidgetError> {
        let mut cx = RefreshContext {
            scene: &mut self.scene,
            data: &self.data,
            now: self.now,
        };
        widget.refresh(&mut cx)
    }
}

/// Writes a small solid PNG.
pub(crate) fn write_png(path: &Path, rgb: [u8; 3]) {
    image::RgbaImage::from_pixel(4, 4, image::Rgba([rgb[0], rgb[1], rgb[2], 0xFF]))
        .save(path)
        .unwrap();
}
