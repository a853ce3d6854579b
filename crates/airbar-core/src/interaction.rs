//! # Pointer interaction
//!
//! [`PointerInteractionHandler`] turns press/move/release events into
//! controller updates and host notifications:
//!
//! - a press starts a gesture and changes nothing;
//! - every move during a gesture reads the driven axis (`y` for vertical
//!   bars, `x` for horizontal ones), saturates it into the surface, updates
//!   the controller and fires `on_changed`, with no throttling;
//! - a move over a surface with no extent yet is consumed and changes
//!   nothing;
//! - the release fires `on_committed` once, with the last reading of the
//!   gesture;
//! - a cancel ends the gesture silently.
//!
//! State updates and callbacks are split in two steps ([`process`] then
//! [`ReadingCallbacks::emit`]) so that callers holding the controller in a
//! `RefCell` can release the borrow before host code runs; host callbacks
//! are free to assign a new value to the same controller.
//!
//! [`process`]: PointerInteractionHandler::process

use std::rc::Rc;

use crate::input::{PointerEvent, PointerEventKind};
use crate::{ProgressController, Reading, Size};

pub type ReadingCallback = Rc<dyn Fn(Reading)>;

/// What an event did to the bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerOutcome {
    /// Not part of a gesture; the event was not consumed.
    Ignored,
    /// Consumed without a state change (press, cancel, a move before
    /// layout).
    Handled,
    Changed(Reading),
    Committed(Reading),
}

impl PointerOutcome {
    pub fn is_handled(&self) -> bool {
        !matches!(self, PointerOutcome::Ignored)
    }

    pub fn changed_state(&self) -> bool {
        matches!(self, PointerOutcome::Changed(_))
    }
}

/// The two notification slots. Cheap to clone.
#[derive(Clone, Default)]
pub struct ReadingCallbacks {
    pub on_changed: Option<ReadingCallback>,
    pub on_committed: Option<ReadingCallback>,
}

impl ReadingCallbacks {
    pub fn emit(&self, outcome: PointerOutcome) {
        match outcome {
            PointerOutcome::Changed(r) => {
                if let Some(cb) = &self.on_changed {
                    cb(r);
                }
            }
            PointerOutcome::Committed(r) => {
                if let Some(cb) = &self.on_committed {
                    cb(r);
                }
            }
            PointerOutcome::Ignored | PointerOutcome::Handled => {}
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Gesture {
    #[default]
    Idle,
    Pressed,
    Dragging(Reading),
}

#[derive(Clone, Default)]
pub struct PointerInteractionHandler {
    callbacks: ReadingCallbacks,
    gesture: Gesture,
}

impl PointerInteractionHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_on_changed(&mut self, f: impl Fn(Reading) + 'static) {
        self.callbacks.on_changed = Some(Rc::new(f));
    }

    pub fn clear_on_changed(&mut self) {
        self.callbacks.on_changed = None;
    }

    pub fn set_on_committed(&mut self, f: impl Fn(Reading) + 'static) {
        self.callbacks.on_committed = Some(Rc::new(f));
    }

    pub fn clear_on_committed(&mut self) {
        self.callbacks.on_committed = None;
    }

    pub fn callbacks(&self) -> ReadingCallbacks {
        self.callbacks.clone()
    }

    pub fn is_active(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    /// Applies `event` (in surface-local coordinates) to `controller`.
    /// Fires no callbacks.
    pub fn process(
        &mut self,
        controller: &mut ProgressController,
        event: &PointerEvent,
        surface: Size,
    ) -> PointerOutcome {
        match event.event {
            PointerEventKind::Down(_) => {
                self.gesture = Gesture::Pressed;
                PointerOutcome::Handled
            }
            PointerEventKind::Move => {
                if self.gesture == Gesture::Idle {
                    return PointerOutcome::Ignored;
                }
                let orientation = controller.orientation();
                let extent = f64::from(orientation.extent(surface));
                if extent <= 0.0 || !extent.is_finite() {
                    // Nothing to map onto yet; the press stays live and a
                    // release commits the controller's own reading.
                    log::trace!("move ignored: surface extent {extent}");
                    return PointerOutcome::Handled;
                }
                let raw = f64::from(orientation.axis(event.position));
                // Clamp against the real extent, whatever its size.
                let clamped = raw.clamp(0.0, extent);
                let reading = controller.set_fill_coordinate(clamped, extent);
                log::trace!(
                    "move {raw} on extent {extent}: {}% / {}",
                    reading.percentage,
                    reading.value
                );
                self.gesture = Gesture::Dragging(reading);
                PointerOutcome::Changed(reading)
            }
            PointerEventKind::Up(_) => match std::mem::take(&mut self.gesture) {
                Gesture::Idle => PointerOutcome::Ignored,
                Gesture::Pressed => PointerOutcome::Committed(controller.reading()),
                Gesture::Dragging(last) => PointerOutcome::Committed(last),
            },
            PointerEventKind::Cancel => match std::mem::take(&mut self.gesture) {
                Gesture::Idle => PointerOutcome::Ignored,
                _ => {
                    log::debug!("AirBar gesture cancelled");
                    PointerOutcome::Handled
                }
            },
        }
    }

    /// [`process`](Self::process) followed by the matching callback.
    /// Returns whether the event was consumed.
    pub fn handle(
        &mut self,
        controller: &mut ProgressController,
        event: &PointerEvent,
        surface: Size,
    ) -> bool {
        let outcome = self.process(controller, event, surface);
        self.callbacks.emit(outcome);
        outcome.is_handled()
    }
}

impl std::fmt::Debug for PointerInteractionHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerInteractionHandler")
            .field("gesture", &self.gesture)
            .field(
                "on_changed",
                &self.callbacks.on_changed.as_ref().map(|_| "..."),
            )
            .field(
                "on_committed",
                &self.callbacks.on_committed.as_ref().map(|_| "..."),
            )
            .finish()
    }
}
