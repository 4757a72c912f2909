//! Axis-separated movement and collision resolution
//!
//! Shared by the player and every enemy: integrate gravity, move along X and
//! resolve penetration, then move along Y and resolve penetration. The X-then-Y
//! order is load-bearing: diagonal corner contacts resolve deterministically
//! and stair-step layouts depend on it.

use glam::Vec2;

use super::rect::Rect;
use super::state::TerrainBlock;
use crate::consts::GRAVITY;

/// What a horizontal collision does to velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallResponse {
    /// Zero horizontal velocity (player: wall-stop)
    Stop,
    /// Flip horizontal velocity (enemies: turn around)
    Reverse,
}

/// Result of one resolution step
#[derive(Debug, Clone, Default)]
pub struct StepOutcome {
    /// Landed on top of a block this step
    pub grounded: bool,
    /// Pushed out along X at least once
    pub hit_wall: bool,
    /// Terrain indices struck from below, in iteration order
    pub bumped: Vec<usize>,
}

/// Advance an actor one simulation step against static terrain.
///
/// Velocity is truncated toward zero before each axis move, so sub-pixel
/// speeds accumulate in `vel` without moving the box. Gravity is applied
/// unconditionally; standing actors re-ground themselves every frame.
pub fn step_actor(
    rect: &mut Rect,
    vel: &mut Vec2,
    terrain: &[TerrainBlock],
    response: WallResponse,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    vel.y += GRAVITY;

    // X axis
    rect.x += vel.x.trunc();
    for block in terrain {
        if !rect.overlaps(&block.rect) {
            continue;
        }
        if vel.x > 0.0 {
            rect.x = block.rect.x - rect.w;
        } else if vel.x < 0.0 {
            rect.x = block.rect.right();
        } else {
            continue;
        }
        outcome.hit_wall = true;
        match response {
            WallResponse::Stop => vel.x = 0.0,
            WallResponse::Reverse => vel.x = -vel.x,
        }
    }

    // Y axis
    rect.y += vel.y.trunc();
    for (i, block) in terrain.iter().enumerate() {
        if !rect.overlaps(&block.rect) {
            continue;
        }
        if vel.y > 0.0 {
            rect.y = block.rect.y - rect.h;
            vel.y = 0.0;
            outcome.grounded = true;
        } else if vel.y < 0.0 {
            rect.y = block.rect.bottom();
            vel.y = 0.0;
            outcome.bumped.push(i);
        }
    }

    // Exact contact counts as support: without this, a standing actor whose
    // bottom touches a block top would flicker between grounded and airborne
    // as sub-pixel gravity accumulates
    if !outcome.grounded && vel.y >= 0.0 {
        let probe = rect.shifted(0.0, 1.0);
        if terrain.iter().any(|b| probe.overlaps(&b.rect)) {
            outcome.grounded = true;
            vel.y = 0.0;
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TILE_SIZE;
    use crate::sim::state::BlockKind;
    use proptest::prelude::*;

    fn solid(x: f32, y: f32) -> TerrainBlock {
        TerrainBlock::new(Rect::new(x, y, TILE_SIZE, TILE_SIZE), BlockKind::Solid)
    }

    #[test]
    fn test_lands_on_block() {
        let terrain = [solid(0.0, 100.0)];
        let mut rect = Rect::new(4.0, 60.0, 32.0, 32.0);
        let mut vel = Vec2::new(0.0, 10.0);

        let outcome = step_actor(&mut rect, &mut vel, &terrain, WallResponse::Stop);
        assert!(outcome.grounded);
        assert_eq!(vel.y, 0.0);
        assert_eq!(rect.bottom(), 100.0);
    }

    #[test]
    fn test_wall_stop() {
        let terrain = [solid(100.0, 0.0)];
        let mut rect = Rect::new(60.0, 4.0, 32.0, 32.0);
        let mut vel = Vec2::new(10.0, 0.0);

        let outcome = step_actor(&mut rect, &mut vel, &terrain, WallResponse::Stop);
        assert!(outcome.hit_wall);
        assert_eq!(vel.x, 0.0);
        assert_eq!(rect.right(), 100.0);
    }

    #[test]
    fn test_wall_reverse() {
        let terrain = [solid(100.0, 0.0)];
        let mut rect = Rect::new(60.0, 4.0, 32.0, 32.0);
        let mut vel = Vec2::new(10.0, 0.0);

        let outcome = step_actor(&mut rect, &mut vel, &terrain, WallResponse::Reverse);
        assert!(outcome.hit_wall);
        assert_eq!(vel.x, -10.0);
        assert_eq!(rect.right(), 100.0);
    }

    #[test]
    fn test_ceiling_bump_reports_index() {
        let terrain = [solid(0.0, 400.0), solid(0.0, 0.0)];
        let mut rect = Rect::new(4.0, 50.0, 32.0, 32.0);
        let mut vel = Vec2::new(0.0, -12.0);

        let outcome = step_actor(&mut rect, &mut vel, &terrain, WallResponse::Stop);
        assert_eq!(outcome.bumped, vec![1]);
        assert_eq!(vel.y, 0.0);
        assert_eq!(rect.y, TILE_SIZE);
    }

    #[test]
    fn test_gravity_applies_every_step() {
        let mut rect = Rect::new(0.0, 0.0, 32.0, 32.0);
        let mut vel = Vec2::ZERO;
        step_actor(&mut rect, &mut vel, &[], WallResponse::Stop);
        assert_eq!(vel.y, GRAVITY);
    }

    #[test]
    fn test_standing_contact_stays_grounded() {
        let terrain = [solid(0.0, 100.0)];
        let mut rect = Rect::new(4.0, 100.0 - 32.0, 32.0, 32.0);
        let mut vel = Vec2::ZERO;

        for _ in 0..10 {
            let outcome = step_actor(&mut rect, &mut vel, &terrain, WallResponse::Stop);
            assert!(outcome.grounded);
            assert_eq!(vel.y, 0.0);
            assert_eq!(rect.bottom(), 100.0);
        }
    }

    #[test]
    fn test_subpixel_speed_does_not_move() {
        let mut rect = Rect::new(10.0, 0.0, 32.0, 32.0);
        let mut vel = Vec2::new(0.9, 0.0);
        step_actor(&mut rect, &mut vel, &[], WallResponse::Stop);
        assert_eq!(rect.x, 10.0);
    }

    proptest! {
        /// Approaching a block orthogonally from the left never ends overlapping
        /// it, and horizontal velocity is zeroed by the wall.
        #[test]
        fn prop_no_overlap_after_horizontal_approach(
            gap in 0.0f32..40.0,
            speed in 1.0f32..20.0,
        ) {
            let terrain = [solid(200.0, 0.0)];
            let mut rect = Rect::new(200.0 - 32.0 - gap, 4.0, 32.0, 32.0);
            let mut vel = Vec2::new(speed, 0.0);

            let outcome = step_actor(&mut rect, &mut vel, &terrain, WallResponse::Stop);
            prop_assert!(!rect.overlaps(&terrain[0].rect));
            if outcome.hit_wall {
                prop_assert_eq!(vel.x, 0.0);
                prop_assert_eq!(rect.right(), 200.0);
            }
        }

        /// Falling onto a block always lands on its top with zero vertical
        /// velocity.
        #[test]
        fn prop_lands_with_zero_velocity(
            gap in 0.0f32..30.0,
            speed in 1.0f32..30.0,
            x_off in -20.0f32..20.0,
        ) {
            let terrain = [solid(100.0, 300.0)];
            let mut rect = Rect::new(100.0 + x_off, 300.0 - 32.0 - gap, 32.0, 32.0);
            let mut vel = Vec2::new(0.0, speed);

            let outcome = step_actor(&mut rect, &mut vel, &terrain, WallResponse::Stop);
            prop_assert!(!rect.overlaps(&terrain[0].rect));
            if outcome.grounded {
                prop_assert_eq!(vel.y, 0.0);
                prop_assert_eq!(rect.bottom(), 300.0);
            }
        }
    }
}
