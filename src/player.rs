//! Player position, facing and per-frame movement.

use std::f32::consts::TAU;

use crate::map::GridMap;
use crate::trig::sin_cos;

/// Reference walking speed in world units per second
pub const BASE_SPEED: f32 = 3.0;
/// Reference turning speed in radians per second
pub const TURN_SPEED: f32 = 1.0;

/// Snapshot of the keys held during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub quit: bool,
}

impl InputState {
    /// True when no movement or rotation key is held
    pub fn is_idle(&self) -> bool {
        !(self.forward
            || self.backward
            || self.strafe_left
            || self.strafe_right
            || self.rotate_left
            || self.rotate_right)
    }
}

/// First-person viewer.
///
/// Facing uses the `(sin, cos)` basis: angle 0 looks along +y and
/// angle π/2 looks along +x. Ray marching and the minimap use the same basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Radians, kept in `[0, 2π)`
    pub angle: f32,
    pub move_speed: f32,
    pub turn_speed: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            x,
            y,
            angle: wrap_angle(angle),
            move_speed: BASE_SPEED,
            turn_speed: TURN_SPEED,
        }
    }

    pub fn with_speeds(mut self, move_speed: f32, turn_speed: f32) -> Self {
        self.move_speed = move_speed;
        self.turn_speed = turn_speed;
        self
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Unit facing vector
    pub fn direction(&self) -> (f32, f32) {
        sin_cos(self.angle)
    }

    /// Unit movement direction for the held keys, or zero when they cancel.
    pub fn move_direction(&self, input: &InputState) -> (f32, f32) {
        let (s, c) = sin_cos(self.angle);
        let mut dx = 0.0;
        let mut dy = 0.0;

        if input.forward {
            dx += s;
            dy += c;
        }
        if input.backward {
            dx -= s;
            dy -= c;
        }
        if input.strafe_left {
            dx -= c;
            dy += s;
        }
        if input.strafe_right {
            dx += c;
            dy -= s;
        }

        // Normalize diagonal speed
        let len = (dx * dx + dy * dy).sqrt();
        if len > f32::EPSILON {
            (dx / len, dy / len)
        } else {
            (0.0, 0.0)
        }
    }

    /// Advance one frame. Returns true if the position changed.
    ///
    /// The destination is tested as a single point; a move that would end
    /// inside a wall is dropped entirely. Rotation is applied afterwards
    /// regardless of whether the move succeeded.
    pub fn update(&mut self, map: &GridMap, input: &InputState, elapsed: f32) -> bool {
        let elapsed = elapsed.max(0.0);
        let (dx, dy) = self.move_direction(input);
        let speed = self.move_speed * elapsed;

        let mut moved = false;
        if (dx != 0.0 || dy != 0.0) && speed > 0.0 {
            let new_x = self.x + dx * speed;
            let new_y = self.y + dy * speed;
            if !map.is_wall(new_x, new_y) {
                self.x = new_x;
                self.y = new_y;
                moved = true;
            }
        }

        let mut turn = 0.0;
        if input.rotate_left {
            turn -= 1.0;
        }
        if input.rotate_right {
            turn += 1.0;
        }
        if turn != 0.0 {
            self.angle = wrap_angle(self.angle + turn * self.turn_speed * elapsed);
        }

        moved
    }
}

/// Wrap into `[0, 2π)`. `rem_euclid` alone can round a tiny negative
/// angle up to exactly `TAU`.
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { wrapped - TAU } else { wrapped }
}

impl Default for Player {
    /// Reference spawn: (6, 8) facing +x
    fn default() -> Self {
        Self::new(6.0, 8.0, std::f32::consts::FRAC_PI_2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn open_map() -> GridMap {
        GridMap::bordered(20, 20)
    }

    fn keys(forward: bool, backward: bool, left: bool, right: bool) -> InputState {
        InputState {
            forward,
            backward,
            strafe_left: left,
            strafe_right: right,
            ..InputState::default()
        }
    }

    #[test]
    fn test_displacement_is_normalized() {
        let map = open_map();
        let dt = 0.016;
        for mask in 1u8..16 {
            let input = keys(mask & 1 != 0, mask & 2 != 0, mask & 4 != 0, mask & 8 != 0);
            let mut player = Player::new(10.0, 10.0, 0.7);
            player.update(&map, &input, dt);
            let moved = ((player.x - 10.0).powi(2) + (player.y - 10.0).powi(2)).sqrt();

            let cancels = (input.forward == input.backward)
                && (input.strafe_left == input.strafe_right);
            if cancels {
                assert_eq!(moved, 0.0, "mask {:04b} should cancel", mask);
            } else {
                assert!(
                    (moved - BASE_SPEED * dt).abs() < 1e-4,
                    "mask {:04b} moved {}",
                    mask,
                    moved
                );
            }
        }
    }

    #[test]
    fn test_forward_follows_facing() {
        let map = open_map();
        let mut player = Player::new(6.0, 8.0, FRAC_PI_2);
        assert!(player.update(&map, &keys(true, false, false, false), 1.0));
        assert!((player.x - 9.0).abs() < 1e-4);
        assert!((player.y - 8.0).abs() < 1e-4);

        // Strafing right while facing +x moves toward -y
        let mut player = Player::new(6.0, 8.0, FRAC_PI_2);
        player.update(&map, &keys(false, false, false, true), 1.0);
        assert!((player.x - 6.0).abs() < 1e-4);
        assert!((player.y - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_collision_rejects_move_but_rotates() {
        let map = open_map();
        let mut player = Player::new(18.5, 10.0, FRAC_PI_2);
        let input = InputState {
            forward: true,
            rotate_right: true,
            ..InputState::default()
        };
        let moved = player.update(&map, &input, 0.5);
        assert!(!moved);
        assert_eq!((player.x, player.y), (18.5, 10.0));
        assert!((player.angle - (FRAC_PI_2 + 0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_diagonal_into_corner_is_rejected() {
        // Either axis alone stays open, the combined destination is the wall
        let map = GridMap::parse("....\n....\n..#.\n....").unwrap();
        let mut player = Player::new(1.9, 1.9, std::f32::consts::FRAC_PI_4);
        assert!(!map.is_wall(2.1, 1.9));
        assert!(!map.is_wall(1.9, 2.1));
        let elapsed = 0.2 / BASE_SPEED * 2f32.sqrt();
        let moved = player.update(&map, &keys(true, false, false, false), elapsed);
        assert!(!moved);
        assert_eq!((player.x, player.y), (1.9, 1.9));
    }

    #[test]
    fn test_rotation_wraps() {
        let map = open_map();
        let mut player = Player::new(10.0, 10.0, 0.1);
        let left = InputState {
            rotate_left: true,
            ..InputState::default()
        };
        player.update(&map, &left, 0.3);
        assert!(player.angle >= 0.0 && player.angle < TAU);
        assert!((player.angle - (TAU - 0.2)).abs() < 1e-5);
        let (s, c) = player.direction();
        assert!((s - (-0.2f32).sin()).abs() < 1e-5);
        assert!((c - (-0.2f32).cos()).abs() < 1e-5);
    }

    #[test]
    fn test_tiny_left_turn_stays_below_tau() {
        let map = open_map();
        let mut player = Player::new(10.0, 10.0, 0.0);
        let left = InputState {
            rotate_left: true,
            ..InputState::default()
        };
        player.update(&map, &left, 1e-9);
        assert!(player.angle >= 0.0 && player.angle < TAU, "angle {}", player.angle);
        assert!(Player::new(0.0, 0.0, -1e-9).angle < TAU);
    }

    #[test]
    fn test_input_idle() {
        assert!(InputState::default().is_idle());
        let quit_only = InputState {
            quit: true,
            ..InputState::default()
        };
        assert!(quit_only.is_idle());
        assert!(!keys(true, false, false, false).is_idle());
    }
}
