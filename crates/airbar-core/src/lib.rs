//! # AirBar core
//!
//! An AirBar is a rounded bar that fills vertically or horizontally as the
//! user drags across it, reporting a percentage (0–100) and a value scaled
//! into a configurable `[min, max]` range. This crate holds everything both
//! widget flavors in `airbar-ui` share:
//!
//! - [`ProgressController`]: the fill state and the coordinate ⇄ value math.
//! - [`PointerInteractionHandler`]: press/move/release → controller updates
//!   and `on_changed` / `on_committed` notifications.
//! - [`render`]: where the background, fill and icon go for a given rect.
//! - A small view model ([`View`], [`Modifier`], [`Scene`]) and composition
//!   runtime ([`remember`], [`Scheduler`]) for the declarative flavor.
//!
//! ## Data flow
//!
//! ```text
//! pointer event ─▶ PointerInteractionHandler ─▶ ProgressController
//!                        │ (clamped coordinate)       │ (percentage, value)
//!                        ▼                            ▼
//!              on_changed / on_committed        RedrawHandle ─▶ render::paint
//! ```
//!
//! ```rust
//! use airbar_core::*;
//!
//! let mut controller = ProgressController::from_config(&AirBarConfig::vertical()).unwrap();
//! controller.resize(200.0);
//!
//! let mut handler = PointerInteractionHandler::new();
//! handler.set_on_changed(|r| println!("{}% -> {}", r.percentage, r.value));
//!
//! let surface = Size::new(60.0, 200.0);
//! handler.handle(&mut controller, &PointerEvent::down(30.0, 120.0), surface);
//! handler.handle(&mut controller, &PointerEvent::moved(30.0, 50.0), surface);
//! handler.handle(&mut controller, &PointerEvent::up(30.0, 50.0), surface);
//!
//! assert_eq!(controller.percentage(), 75.0);
//! ```
//!
//! Everything here is single-threaded: shared handles are `Rc`/`RefCell`
//! and must stay on the UI thread that dispatches events and frames.

pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod math;
pub mod modifier;
pub mod prelude;
pub mod redraw;
pub mod render;
pub mod runtime;
pub mod signal;
pub mod style;
pub mod view;

pub use color::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use geometry::*;
pub use input::*;
pub use interaction::*;
pub use modifier::*;
pub use prelude::*;
pub use redraw::*;
pub use runtime::*;
pub use signal::*;
pub use style::*;
pub use view::*;
