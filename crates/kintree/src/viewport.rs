//! Pan, zoom and selection state of the interactive view.
//!
//! Dragging follows a two-state machine:
//!
//! ```text
//! Idle --pointer down on canvas--> Dragging
//! Dragging --pointer move--> Dragging (pan follows the pointer)
//! Dragging --pointer up / leave--> Idle
//! ```
//!
//! Pressing on a node selects it and never starts a drag.

use log::debug;

use kintree_core::{family::FamilyData, geometry::Point};

use crate::layout::TreeLayout;

/// Zoom change per zoom control activation.
pub const ZOOM_STEP: f32 = 0.1;
/// Smallest zoom factor the view accepts.
pub const MIN_ZOOM: f32 = 0.1;

/// What lies under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Canvas,
    Node(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer position minus pan at the moment the drag started.
    Dragging { anchor: Point },
}

/// Scene to screen mapping: scale first, then translate by the unscaled pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    translate: Point,
    scale: f32,
}

impl ViewTransform {
    pub fn new(translate: Point, scale: f32) -> Self {
        Self { translate, scale }
    }

    pub fn translate(&self) -> Point {
        self.translate
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Maps a scene point to screen coordinates.
    pub fn apply(&self, point: Point) -> Point {
        point.scale(self.scale).add_point(self.translate)
    }

    /// Maps a screen point back to scene coordinates.
    pub fn invert(&self, point: Point) -> Point {
        point.sub_point(self.translate).scale(1.0 / self.scale)
    }

    /// SVG `transform` attribute value.
    pub fn to_svg_transform(&self) -> String {
        format!(
            "translate({}, {}) scale({})",
            self.translate.x(),
            self.translate.y(),
            self.scale
        )
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(Point::default(), 1.0)
    }
}

/// Name of the selected member and of its parent, for a detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionDetails {
    pub id: String,
    pub name: String,
    pub parent_name: Option<String>,
}

/// Interactive view state.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f32,
    pan: Point,
    selected_id: Option<String>,
    drag: DragState,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Point::default(),
            selected_id: None,
            drag: DragState::Idle,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn pointer_down(&mut self, position: Point, target: HitTarget) {
        match target {
            HitTarget::Canvas => {
                self.drag = DragState::Dragging {
                    anchor: position.sub_point(self.pan),
                };
            }
            HitTarget::Node(id) => {
                debug!(member = id.as_str(); "Member selected");
                self.selected_id = Some(id);
            }
        }
    }

    pub fn pointer_move(&mut self, position: Point) {
        if let DragState::Dragging { anchor } = self.drag {
            self.pan = position.sub_point(anchor);
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    pub fn pointer_leave(&mut self) {
        self.drag = DragState::Idle;
    }

    pub fn zoom_in(&mut self) {
        self.zoom += ZOOM_STEP;
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Restores unit zoom, zero pan and no selection.
    pub fn reset(&mut self) {
        *self = Self {
            drag: self.drag,
            ..Self::default()
        };
    }

    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    pub fn transform(&self) -> ViewTransform {
        ViewTransform::new(self.pan, self.zoom)
    }

    /// Finds the topmost node under a screen point.
    ///
    /// Nodes later in the layout are drawn above earlier ones.
    pub fn hit_test(&self, screen: Point, layout: &TreeLayout) -> HitTarget {
        let point = self.transform().invert(screen);
        layout
            .nodes()
            .iter()
            .rev()
            .find(|node| node.bounds().contains(point))
            .map_or(HitTarget::Canvas, |node| HitTarget::Node(node.id().to_string()))
    }

    /// Pointer down at a screen point, hit-tested against `layout`.
    pub fn press(&mut self, screen: Point, layout: &TreeLayout) {
        let target = self.hit_test(screen, layout);
        self.pointer_down(screen, target);
    }

    /// Details of the selected member, if it still exists in `data`.
    pub fn selection_details(&self, data: &FamilyData) -> Option<SelectionDetails> {
        let id = self.selected_id.as_deref()?;
        let member = data.member(id)?;
        Some(SelectionDetails {
            id: member.id().to_string(),
            name: member.name().to_string(),
            parent_name: data.parent_of(id).map(|parent| parent.name().to_string()),
        })
    }
}
