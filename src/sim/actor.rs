//! Player and enemy actors
//!
//! Both are axis-aligned rectangles in play-area pixels (origin top-left,
//! y down). Speeds are pixels per simulation tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::input::KeyState;
use crate::consts::*;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Clamp so the rectangle lies fully inside `[0, bounds]`
    pub fn clamp_into(&mut self, bounds: Vec2) {
        self.x = self.x.clamp(0.0, (bounds.x - self.width).max(0.0));
        self.y = self.y.clamp(0.0, (bounds.y - self.height).max(0.0));
    }
}

/// Inclusive range an enemy's fall speed is drawn from on each reset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub const fn fixed(speed: f32) -> Self {
        Self {
            min: speed,
            max: speed,
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min && (self.max - self.min).is_finite() {
            rng.random_range(self.min..=self.max)
        } else {
            self.min
        }
    }
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self::fixed(3.0)
    }
}

/// The keyboard-driven player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub speed: f32,
    pub health: u32,
}

impl Player {
    pub fn new(speed: f32, health: u32) -> Self {
        Self {
            rect: Rect::new(PLAYER_START_X, PLAYER_START_Y, PLAYER_SIZE, PLAYER_SIZE),
            speed,
            health,
        }
    }

    /// Move along every held axis, staying fully inside the play area
    pub fn step(&mut self, keys: &KeyState, bounds: Vec2) {
        let mut delta = Vec2::ZERO;
        if keys.left {
            delta.x -= self.speed;
        }
        if keys.right {
            delta.x += self.speed;
        }
        if keys.up {
            delta.y -= self.speed;
        }
        if keys.down {
            delta.y += self.speed;
        }
        self.rect.x += delta.x;
        self.rect.y += delta.y;
        self.rect.clamp_into(bounds);
    }

    /// Lose health, never dropping below zero
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }
}

/// The falling enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub speed: f32,
    pub speed_range: SpeedRange,
}

impl Enemy {
    /// Spawn at a random position along the top edge
    pub fn spawn<R: Rng + ?Sized>(speed_range: SpeedRange, bounds: Vec2, rng: &mut R) -> Self {
        let mut enemy = Self {
            rect: Rect::new(0.0, 0.0, ENEMY_SIZE, ENEMY_SIZE),
            speed: speed_range.min,
            speed_range,
        };
        enemy.reset(bounds, rng);
        enemy
    }

    /// Descend one tick. Returns true if the enemy fell out and was reset.
    pub fn step<R: Rng + ?Sized>(&mut self, bounds: Vec2, rng: &mut R) -> bool {
        self.rect.y += self.speed;
        if self.rect.y > bounds.y {
            self.reset(bounds, rng);
            return true;
        }
        false
    }

    /// Back to the top at a random x with a fresh speed
    pub fn reset<R: Rng + ?Sized>(&mut self, bounds: Vec2, rng: &mut R) {
        let max_x = (bounds.x - self.rect.width).max(0.0);
        self.rect.x = rng.random_range(0.0..=max_x);
        self.rect.y = 0.0;
        self.speed = self.speed_range.sample(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Vec2 = Vec2::new(PLAY_WIDTH, PLAY_HEIGHT);

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut player = Player::new(7.0, 3);
        player.take_damage(10);
        assert_eq!(player.health, 0);
        assert!(player.is_defeated());
    }

    #[test]
    fn test_player_moves_and_clamps() {
        let mut player = Player::new(7.0, 100);
        player.rect.x = 3.0;
        let keys = KeyState {
            left: true,
            ..Default::default()
        };
        player.step(&keys, BOUNDS);
        assert_eq!(player.rect.x, 0.0);

        player.rect.x = PLAY_WIDTH - PLAYER_SIZE - 2.0;
        let keys = KeyState {
            right: true,
            down: true,
            ..Default::default()
        };
        player.step(&keys, BOUNDS);
        assert_eq!(player.rect.x, PLAY_WIDTH - PLAYER_SIZE);
        assert_eq!(player.rect.y, PLAY_HEIGHT - PLAYER_SIZE);
    }

    #[test]
    fn test_player_idle_without_keys() {
        let mut player = Player::new(7.0, 100);
        let before = player.rect;
        player.step(&KeyState::default(), BOUNDS);
        assert_eq!(player.rect, before);
    }

    #[test]
    fn test_enemy_wraps_to_top() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = Enemy::spawn(SpeedRange::fixed(3.0), BOUNDS, &mut rng);
        enemy.rect.y = PLAY_HEIGHT - 3.0;

        // Landing exactly on the bottom edge is still in play
        assert!(!enemy.step(BOUNDS, &mut rng));
        assert_eq!(enemy.rect.y, PLAY_HEIGHT);

        assert!(enemy.step(BOUNDS, &mut rng));
        assert_eq!(enemy.rect.y, 0.0);
    }

    #[test]
    fn test_unbounded_speed_range_falls_back_to_min() {
        let mut rng = Pcg32::seed_from_u64(5);
        let range = SpeedRange {
            min: 1.0,
            max: f32::INFINITY,
        };
        assert_eq!(range.sample(&mut rng), 1.0);
    }

    #[test]
    fn test_enemy_reset_randomizes_speed_within_range() {
        let mut rng = Pcg32::seed_from_u64(42);
        let range = SpeedRange { min: 2.0, max: 5.0 };
        let mut enemy = Enemy::spawn(range, BOUNDS, &mut rng);
        for _ in 0..100 {
            enemy.reset(BOUNDS, &mut rng);
            assert!(enemy.speed >= 2.0 && enemy.speed <= 5.0);
            assert!(enemy.rect.x >= 0.0 && enemy.rect.x <= PLAY_WIDTH - ENEMY_SIZE);
            assert_eq!(enemy.rect.y, 0.0);
        }
    }
}
