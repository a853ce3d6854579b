use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::{PointerCallback, Rect, RedrawHandle, Scene, View};

thread_local! {
    pub static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
    static CURRENT_REDRAW: RefCell<Option<RedrawHandle>> = const { RefCell::new(None) };
}

#[derive(Default)]
pub struct Composer {
    pub slots: Vec<Box<dyn Any>>,
    pub cursor: usize,
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
}

/// Marks one composition pass: resets the slot cursor and exposes the
/// host's redraw handle to composables for the duration of the pass.
pub struct ComposeGuard {
    redraw: RedrawHandle,
}

impl ComposeGuard {
    pub fn begin(redraw: RedrawHandle) -> Self {
        COMPOSER.with(|c| {
            c.borrow_mut().cursor = 0;
        });
        CURRENT_REDRAW.with(|r| {
            *r.borrow_mut() = Some(redraw.clone());
        });
        ComposeGuard { redraw }
    }

    pub fn redraw(&self) -> &RedrawHandle {
        &self.redraw
    }
}

impl Drop for ComposeGuard {
    fn drop(&mut self) {
        CURRENT_REDRAW.with(|r| {
            *r.borrow_mut() = None;
        });
    }
}

/// Redraw handle of the composition in progress. Outside a composition a
/// detached handle is returned, which nobody observes.
pub fn current_redraw() -> RedrawHandle {
    CURRENT_REDRAW.with(|r| r.borrow().clone().unwrap_or_default())
}

/// Slot-based remember (sequential composition only)
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;

        if cursor >= c.slots.len() {
            let rc: Rc<T> = Rc::new(init());
            c.slots.push(Box::new(rc.clone()));
            return rc;
        }

        if let Some(rc) = c.slots[cursor].downcast_ref::<Rc<T>>() {
            rc.clone()
        } else {
            log::warn!(
                "remember: slot {} type changed; replacing. \
                 If this is due to conditional composition, prefer remember_with_key.",
                cursor
            );
            let rc: Rc<T> = Rc::new(init());
            c.slots[cursor] = Box::new(rc.clone());
            rc
        }
    })
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let key = key.into();

        if let Some(existing) = c.keyed_slots.get(&key) {
            if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
                return rc.clone();
            }
            log::warn!(
                "remember_with_key: key '{}' reused with a different type; replacing.",
                key
            );
        }

        let rc: Rc<T> = Rc::new(init());
        c.keyed_slots.insert(key, Box::new(rc.clone()));
        rc
    })
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

pub fn remember_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> Rc<RefCell<T>> {
    remember_with_key(key, || RefCell::new(init()))
}

/// Frame — output of composition for a tick: scene + input regions.
pub struct Frame {
    pub scene: Scene,
    pub hit_regions: Vec<HitRegion>,
}

/// Pointer target in window coordinates. Callbacks receive events in
/// window coordinates too; widgets localize them against `rect`.
#[derive(Clone)]
pub struct HitRegion {
    pub id: u64,
    pub rect: Rect,
    pub on_pointer_down: Option<PointerCallback>,
    pub on_pointer_move: Option<PointerCallback>,
    pub on_pointer_up: Option<PointerCallback>,
    pub on_pointer_cancel: Option<PointerCallback>,
}

impl std::fmt::Debug for HitRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRegion")
            .field("id", &self.id)
            .field("rect", &self.rect)
            .finish_non_exhaustive()
    }
}

pub struct Scheduler {
    pub size: (u32, u32),
    pub redraw: RedrawHandle,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            size: (1280, 800),
            redraw: RedrawHandle::new(),
        }
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Self::new()
        }
    }

    /// Runs one composition and lays it out. Clears the pending redraw.
    pub fn compose<F>(
        &mut self,
        mut build_root: F,
        layout_paint: impl Fn(&View, (u32, u32)) -> (Scene, Vec<HitRegion>),
    ) -> Frame
    where
        F: FnMut(&mut Scheduler) -> View,
    {
        self.redraw.take();
        let guard = ComposeGuard::begin(self.redraw.clone());
        let root = build_root(self);
        let (scene, hit_regions) = layout_paint(&root, self.size);
        drop(guard);

        log::trace!(
            "composed frame: {} scene nodes, {} hit regions",
            scene.nodes.len(),
            hit_regions.len()
        );
        Frame { scene, hit_regions }
    }
}
