// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained scene handles and a reactive refresh scheduler for
//! weather-station displays.
//!
//! `weatherpane_core` keeps a set of independent widgets on screen and
//! refreshes each one only when its data changes or its own timer elapses.
//! Widgets draw through generational handles into a stateful canvas, so a
//! refresh mutates existing primitives instead of redrawing the screen.
//!
//! # Architecture
//!
//! ```text
//!   Host (data pushes, timer callbacks)
//!       │
//!       ▼
//!   Display::update_*() / on_timer() ──► Scheduler::notify() / fire_timer()
//!                                               │
//!                 ┌─────────────────────────────┘
//!                 ▼
//!   Widget::refresh(RefreshContext) ──► DrawingSurface ──► Canvas
//!                 │
//!                 ▼
//!   RefreshPolicy ──► Scheduler::file() ──► TimerHost::arm()
//! ```
//!
//! **[`policy`]**: [`RefreshPolicy`](policy::RefreshPolicy) and the delay
//! helpers that align timers to wall-clock boundaries.
//!
//! **[`scene`]**: [`DrawingSurface`](scene::DrawingSurface) with handles,
//! stroke halos, glyph stacks and a decoded image cache over a
//! [`Canvas`](scene::Canvas).
//!
//! **[`widget`]**: the [`Widget`](widget::Widget) contract and the handle
//! store widgets use to find their elements again.
//!
//! **[`scheduler`]**: event and timer buckets. Each filing round arms one
//! host timer per distinct delay.
//!
//! **[`display`]**: the orchestrator tying scene, widgets, snapshots and
//! scheduler together.
//!
//! **[`data`]**: the read-only snapshots widgets render.
//!
//! **[`clock`]**: wall-clock sources, including a manual clock for tests and
//! simulations.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) and event types for
//! refresh-loop instrumentation, with a [`Tracer`](trace::Tracer) wrapper
//! that compiles away without the `trace` feature.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod clock;
pub mod data;
pub mod display;
pub mod policy;
pub mod scene;
pub mod scheduler;
pub mod trace;
pub mod widget;
