//! Viewport tracking
//!
//! The camera follows the player horizontally, clamped to the level bounds.
//! It is derived state, rebuilt on every level load and updated every frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};

/// World-to-viewport offset, clamped to [-(world_width - view), 0]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub offset: Vec2,
    pub world_width: f32,
}

impl Camera {
    pub fn new(world_width: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            world_width,
        }
    }

    /// Center the viewport on the target, then clamp to the level edges
    pub fn update(&mut self, target: &Rect) {
        let x = -target.center_x() + VIEW_WIDTH / 2.0;
        let x = x.min(0.0);
        let x = x.max(-(self.world_width - VIEW_WIDTH));
        self.offset = Vec2::new(x, 0.0);
    }

    /// World box to viewport box
    pub fn apply(&self, rect: &Rect) -> Rect {
        rect.shifted(self.offset.x, self.offset.y)
    }

    /// Whether a viewport box intersects the visible area at all
    pub fn on_screen(rect: &Rect) -> bool {
        rect.right() >= 0.0 && rect.x <= VIEW_WIDTH && rect.bottom() >= 0.0 && rect.y <= VIEW_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_to_left_edge() {
        let mut cam = Camera::new(8800.0);
        cam.update(&Rect::new(50.0, 100.0, 32.0, 32.0));
        assert_eq!(cam.offset.x, 0.0);
    }

    #[test]
    fn test_clamps_to_right_edge() {
        let mut cam = Camera::new(8800.0);
        cam.update(&Rect::new(8750.0, 100.0, 32.0, 32.0));
        assert_eq!(cam.offset.x, -(8800.0 - VIEW_WIDTH));
    }

    #[test]
    fn test_centers_in_the_middle() {
        let mut cam = Camera::new(8800.0);
        let target = Rect::new(4000.0, 100.0, 32.0, 32.0);
        cam.update(&target);
        // Target center lands at the viewport center
        let applied = cam.apply(&target);
        assert_eq!(applied.center_x(), VIEW_WIDTH / 2.0);
    }

    #[test]
    fn test_on_screen_culling() {
        assert!(Camera::on_screen(&Rect::new(10.0, 10.0, 40.0, 40.0)));
        assert!(!Camera::on_screen(&Rect::new(-100.0, 10.0, 40.0, 40.0)));
        assert!(!Camera::on_screen(&Rect::new(VIEW_WIDTH + 1.0, 10.0, 40.0, 40.0)));
    }
}
