//! Pointer routing for composed frames.
//!
//! A press goes to the top-most region under the pointer and captures it;
//! moves, the release and a cancel then go to the captured region even when
//! the pointer has left it, so a drag that overshoots the bar keeps driving
//! it (the handler saturates the coordinate).

use airbar_core::{Frame, PointerEvent, PointerEventKind, Vec2};

/// Top-most hit region index under `pos` (reverse iteration).
pub fn top_hit_index(frame: &Frame, pos: Vec2) -> Option<usize> {
    frame
        .hit_regions
        .iter()
        .enumerate()
        .rev()
        .find(|(_, h)| h.rect.contains(pos))
        .map(|(i, _)| i)
}

pub fn hit_index_by_id(frame: &Frame, id: u64) -> Option<usize> {
    frame.hit_regions.iter().position(|h| h.id == id)
}

#[derive(Debug, Default)]
pub struct PointerRouter {
    capture_id: Option<u64>,
}

impl PointerRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture_id(&self) -> Option<u64> {
        self.capture_id
    }

    /// Delivers `event` (window coordinates) to a region of `frame`.
    /// Returns whether some region received it.
    pub fn dispatch(&mut self, frame: &Frame, event: &PointerEvent) -> bool {
        match event.event {
            PointerEventKind::Down(_) => {
                let Some(i) = top_hit_index(frame, event.position) else {
                    self.capture_id = None;
                    return false;
                };
                let hit = &frame.hit_regions[i];
                self.capture_id = Some(hit.id);
                log::trace!("pointer captured by region {}", hit.id);
                match &hit.on_pointer_down {
                    Some(cb) => {
                        cb(event.clone());
                        true
                    }
                    None => false,
                }
            }
            PointerEventKind::Move => {
                let Some(hit) = self
                    .capture_id
                    .and_then(|cid| hit_index_by_id(frame, cid))
                    .map(|i| &frame.hit_regions[i])
                else {
                    return false;
                };
                match &hit.on_pointer_move {
                    Some(cb) => {
                        cb(event.clone());
                        true
                    }
                    None => false,
                }
            }
            PointerEventKind::Up(_) | PointerEventKind::Cancel => {
                let Some(cid) = self.capture_id.take() else {
                    return false;
                };
                let Some(i) = hit_index_by_id(frame, cid) else {
                    log::debug!("captured region {cid} vanished before release");
                    return false;
                };
                let hit = &frame.hit_regions[i];
                let cb = if matches!(event.event, PointerEventKind::Cancel) {
                    &hit.on_pointer_cancel
                } else {
                    &hit.on_pointer_up
                };
                match cb {
                    Some(cb) => {
                        cb(event.clone());
                        true
                    }
                    None => false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airbar_core::{HitRegion, Rect, Scene};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn region(id: u64, rect: Rect, log: &Rc<RefCell<Vec<(u64, &'static str)>>>) -> HitRegion {
        let cb = |tag: &'static str| {
            let log = log.clone();
            Some(Rc::new(move |_: PointerEvent| log.borrow_mut().push((id, tag)))
                as airbar_core::PointerCallback)
        };
        HitRegion {
            id,
            rect,
            on_pointer_down: cb("down"),
            on_pointer_move: cb("move"),
            on_pointer_up: cb("up"),
            on_pointer_cancel: cb("cancel"),
        }
    }

    fn frame(log: &Rc<RefCell<Vec<(u64, &'static str)>>>) -> Frame {
        Frame {
            scene: Scene::default(),
            hit_regions: vec![
                region(1, Rect::new(0.0, 0.0, 200.0, 200.0), log),
                region(2, Rect::new(50.0, 50.0, 50.0, 50.0), log),
            ],
        }
    }

    #[test]
    fn test_press_goes_to_topmost_region() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let f = frame(&log);
        let mut router = PointerRouter::new();

        assert!(router.dispatch(&f, &PointerEvent::down(60.0, 60.0)));
        assert_eq!(router.capture_id(), Some(2));
        assert!(router.dispatch(&f, &PointerEvent::down(10.0, 10.0)));
        assert_eq!(router.capture_id(), Some(1));
        assert_eq!(*log.borrow(), vec![(2, "down"), (1, "down")]);
    }

    #[test]
    fn test_capture_follows_pointer_outside() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let f = frame(&log);
        let mut router = PointerRouter::new();

        router.dispatch(&f, &PointerEvent::down(60.0, 60.0));
        assert!(router.dispatch(&f, &PointerEvent::moved(500.0, 500.0)));
        assert!(router.dispatch(&f, &PointerEvent::up(500.0, 500.0)));
        assert_eq!(router.capture_id(), None);
        assert_eq!(*log.borrow(), vec![(2, "down"), (2, "move"), (2, "up")]);
    }

    #[test]
    fn test_uncaptured_events_are_dropped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let f = frame(&log);
        let mut router = PointerRouter::new();

        assert!(!router.dispatch(&f, &PointerEvent::moved(60.0, 60.0)));
        assert!(!router.dispatch(&f, &PointerEvent::up(60.0, 60.0)));
        assert!(!router.dispatch(&f, &PointerEvent::down(900.0, 900.0)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_cancel_releases_capture() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let f = frame(&log);
        let mut router = PointerRouter::new();

        router.dispatch(&f, &PointerEvent::down(10.0, 10.0));
        assert!(router.dispatch(&f, &PointerEvent::cancel(10.0, 10.0)));
        assert!(!router.dispatch(&f, &PointerEvent::up(10.0, 10.0)));
        assert_eq!(*log.borrow(), vec![(1, "down"), (1, "cancel")]);
    }
}
