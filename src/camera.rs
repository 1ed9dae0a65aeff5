//! Follow camera
//!
//! Keeps the player about two rows ahead of the eye. The per-frame step is
//! a sigmoid of the distance from that rest offset, smoothed over the last
//! three steps, so the camera starts slowly, catches up, then settles.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

const EYE_START: Vec3 = Vec3::new(6.5, 7.5, -1.5);
const LOOK_AT_START: Vec3 = Vec3::new(6.5, 0.0, 1.5);
const LIGHT: Vec3 = Vec3::new(6.5, 15.0, 4.5);

/// Rows between the eye and the player at rest
const LEAD: f32 = 2.0;
const FOV_Y: f32 = std::f32::consts::FRAC_PI_3;
const NEAR: f32 = 1.0;
const FAR: f32 = 50.0;
const MIN_ASPECT: f32 = 4.0 / 3.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowCamera {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub light: Vec3,
    pub up: Vec3,
    /// Most recent step first
    recent: [f32; 3],
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            eye: EYE_START,
            look_at: LOOK_AT_START,
            light: LIGHT,
            up: Vec3::Z,
            recent: [0.0; 3],
        }
    }
}

/// Signed z step toward the rest offset for an eye/player distance
pub fn ease_speed(dist: f32) -> f32 {
    if dist == 0.0 {
        return 0.0;
    }
    let ex = dist.abs().exp();
    // Shifted so a zero distance gives zero speed
    let speed = (ex / (10.0 + ex) - 1.0 / 11.0) / 4.0;
    if dist < 0.0 { speed } else { -speed }
}

impl FollowCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step once toward the player; call once per rendered frame
    pub fn update(&mut self, player_z: f32) {
        let dist = self.eye.z - player_z + LEAD;
        self.recent = [ease_speed(dist), self.recent[0], self.recent[1]];
        let step = self.recent.iter().sum::<f32>() / 3.0;
        self.eye.z += step;
        self.look_at.z += step;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.look_at, self.up)
    }

    /// Perspective for a viewport aspect ratio; narrow viewports are treated as 4:3
    pub fn projection(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() { aspect.max(MIN_ASPECT) } else { MIN_ASPECT };
        Mat4::perspective_rh_gl(FOV_Y, aspect, NEAR, FAR)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::START_CELL;

    #[test]
    fn test_at_rest_for_start_cell() {
        let mut cam = FollowCamera::new();
        // Eye z -1.5 puts the start row exactly two rows ahead
        cam.update(START_CELL.z);
        assert_eq!(cam.eye, EYE_START);
    }

    #[test]
    fn test_ease_speed_sign_and_bounds() {
        assert_eq!(ease_speed(0.0), 0.0);
        assert!(ease_speed(-3.0) > 0.0, "player ahead pulls the eye forward");
        assert!(ease_speed(3.0) < 0.0);
        assert!(ease_speed(-100.0) < 0.25);
        assert!((ease_speed(2.0) + ease_speed(-2.0)).abs() < 1e-7);
    }

    #[test]
    fn test_follows_player_and_settles() {
        let mut cam = FollowCamera::new();
        let player_z = 6.5;
        let mut last_gap = f32::MAX;
        for _ in 0..600 {
            cam.update(player_z);
            let gap = (cam.eye.z - player_z + LEAD).abs();
            assert!(gap <= last_gap + 1e-5);
            last_gap = gap;
        }
        assert!(last_gap < 0.05, "camera lagging by {last_gap}");
        assert!((cam.look_at.z - cam.eye.z - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut cam = FollowCamera::new();
        for _ in 0..20 {
            cam.update(9.5);
        }
        cam.reset();
        assert_eq!(cam.eye, EYE_START);
        assert_eq!(cam.look_at, LOOK_AT_START);
    }

    #[test]
    fn test_projection_floors_aspect() {
        let cam = FollowCamera::new();
        assert_eq!(cam.projection(0.5), cam.projection(MIN_ASPECT));
        assert_ne!(cam.projection(2.0), cam.projection(MIN_ASPECT));
        assert_eq!(cam.projection(f32::NAN), cam.projection(MIN_ASPECT));
    }
}
