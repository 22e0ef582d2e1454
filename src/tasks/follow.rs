//! Keep the camera centered on a moving target.

use std::rc::Rc;

use crate::camera::CameraView;
use crate::geometry::Locatable;

/// Re-centers the camera on a target every frame. Never finishes.
#[derive(Debug, Clone)]
pub struct FollowTask {
    target: Rc<dyn Locatable>,
}

impl FollowTask {
    pub fn new(target: impl Locatable + 'static) -> Self {
        Self {
            target: Rc::new(target),
        }
    }

    pub fn target(&self) -> &dyn Locatable {
        self.target.as_ref()
    }

    pub fn progress(&mut self, view: &mut CameraView) -> bool {
        view.center_on(self.target.center());
        false
    }
}
