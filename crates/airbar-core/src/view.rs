use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    AirBarStyle, Brush, Color, Icon, Modifier, PointerInteractionHandler, ProgressController,
    Rect, RedrawHandle,
};

pub type ViewId = u64;

/// Shared state of a declarative bar: the controller that survives
/// recomposition, its gesture handler and the redraw request it raises.
#[derive(Clone)]
pub struct AirBarNode {
    pub controller: Rc<RefCell<ProgressController>>,
    pub handler: Rc<RefCell<PointerInteractionHandler>>,
    pub redraw: RedrawHandle,
    pub style: AirBarStyle,
}

#[derive(Clone)]
pub enum ViewKind {
    Box,
    Row,
    Column,
    Text {
        text: String,
        color: Color,
        font_size: f32,
    },
    AirBar(AirBarNode),
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Box => write!(f, "Box"),
            ViewKind::Row => write!(f, "Row"),
            ViewKind::Column => write!(f, "Column"),
            ViewKind::Text {
                text,
                color,
                font_size,
            } => f
                .debug_struct("Text")
                .field("text", text)
                .field("color", color)
                .field("font_size", font_size)
                .finish(),
            ViewKind::AirBar(node) => {
                let c = node.controller.borrow();
                f.debug_struct("AirBar")
                    .field("orientation", &c.orientation())
                    .field("reading", &c.reading())
                    .field("style", &node.style)
                    .finish()
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub modifier: Modifier,
    pub children: Vec<View>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            kind,
            modifier: Modifier::default(),
            children: vec![],
        }
    }
    pub fn modifier(mut self, m: Modifier) -> Self {
        self.modifier = m;
        self
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
}

/// Renderable scene
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Rect {
        rect: Rect,
        brush: Brush,
        radius: f32,
    },
    Text {
        rect: Rect,
        text: String,
        color: Color,
        size: f32,
    },
    Icon {
        rect: Rect,
        icon: Icon,
    },
    PushClip {
        rect: Rect,
        radius: f32,
    },
    PopClip,
}
