//! Positions, ids and colours shared by every part of the village

use serde::{Deserialize, Serialize};

/// Simulation tick counter (one discrete step)
pub type Tick = u64;

/// Unique identifier for characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub u32);

/// Unique identifier for monsters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonsterId(pub u32);

/// 2D position in play-field units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Step toward `target` by at most `step` units.
    ///
    /// Returns true (and lands exactly on the target) when the remaining
    /// distance is within `step`.
    pub fn step_toward(&mut self, target: Vec2, step: f64) -> bool {
        let delta = target - *self;
        let distance = delta.length();
        if distance > step {
            *self = *self + delta * (step / distance);
            false
        } else {
            *self = target;
            true
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

/// RGB colour carried by characters and floating texts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(255, 255, 255);
    pub const RED: Color = Color(255, 0, 0);
    pub const GREEN: Color = Color(0, 255, 0);
    pub const YELLOW: Color = Color(255, 255, 0);
    pub const GOLD: Color = Color(255, 215, 0);
    pub const PURPLE: Color = Color(150, 0, 150);
    pub const ORANGE: Color = Color(255, 165, 0);
}

/// Index into a slice of positions, closest to `from` by Euclidean distance.
///
/// Ties keep the earliest position.
pub fn nearest_index(from: Vec2, positions: &[Vec2]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, pos) in positions.iter().enumerate() {
        let d = from.distance(pos);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_toward_partial() {
        let mut p = Vec2::new(0.0, 0.0);
        let arrived = p.step_toward(Vec2::new(10.0, 0.0), 3.0);
        assert!(!arrived);
        assert!((p.x - 3.0).abs() < 1e-9);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_step_toward_snaps() {
        let mut p = Vec2::new(0.0, 0.0);
        let target = Vec2::new(2.0, 1.0);
        assert!(p.step_toward(target, 3.0));
        assert_eq!(p, target);
    }

    #[test]
    fn test_nearest_index() {
        let positions = [Vec2::new(100.0, 0.0), Vec2::new(5.0, 5.0), Vec2::new(-6.0, 0.0)];
        assert_eq!(nearest_index(Vec2::default(), &positions), Some(2));
        assert_eq!(nearest_index(Vec2::default(), &[]), None);
    }

    #[test]
    fn test_nearest_index_tie_keeps_first() {
        let positions = [Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0)];
        assert_eq!(nearest_index(Vec2::default(), &positions), Some(0));
    }
}
