//! World-space rectangles and followable positions.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use glam::Vec2;

/// Axis-aligned world-space rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaBox {
    pub top_left: Vec2,
    pub width: f32,
    pub height: f32,
}

impl AreaBox {
    pub fn new(top_left: Vec2, width: f32, height: f32) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.top_left + self.size() / 2.0
    }

    pub fn bottom_right(&self) -> Vec2 {
        self.top_left + self.size()
    }

    /// Move the box so its center lands on `center`, keeping its size.
    pub fn set_center(&mut self, center: Vec2) {
        self.top_left = center - self.size() / 2.0;
    }

    /// Whether `point` lies inside the box, edges included.
    pub fn contains(&self, point: Vec2) -> bool {
        let bottom_right = self.bottom_right();
        point.x >= self.top_left.x
            && point.x <= bottom_right.x
            && point.y >= self.top_left.y
            && point.y <= bottom_right.y
    }

    /// Nearest point inside the box to `point`.
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.top_left, self.bottom_right())
    }
}

impl fmt::Display for AreaBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{x: {:.1}, y: {:.1}, w: {:.1}, h: {:.1}}}",
            self.top_left.x, self.top_left.y, self.width, self.height
        )
    }
}

/// Anything the camera can be asked to keep centered.
pub trait Locatable: fmt::Debug {
    /// Current world-space center.
    fn center(&self) -> Vec2;
}

impl Locatable for AreaBox {
    fn center(&self) -> Vec2 {
        AreaBox::center(self)
    }
}

/// Shared handle to a live position.
///
/// The owner writes the position every frame; cloned handles (such as the
/// one held by a follow task) always observe the latest value.
#[derive(Debug, Clone, Default)]
pub struct PositionRef(Rc<Cell<Vec2>>);

impl PositionRef {
    pub fn new(position: Vec2) -> Self {
        Self(Rc::new(Cell::new(position)))
    }

    pub fn get(&self) -> Vec2 {
        self.0.get()
    }

    pub fn set(&self, position: Vec2) {
        self.0.set(position);
    }
}

impl Locatable for PositionRef {
    fn center(&self) -> Vec2 {
        self.get()
    }
}
