//! Deterministic fixed-point 2D math for the simulation layer.
//!
//! Positions, velocities and distances inside `FixedUpdate` are all
//! expressed with these types; floats only appear at the config and render
//! boundaries.

use bevy::prelude::*;
use fixed::types::I48F16;
use serde::{Deserialize, Serialize};

/// I48F16: 48 integer bits, 16 fractional bits (precision ~0.000015).
pub type FixedNum = I48F16;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedVec2 {
    pub x: FixedNum,
    pub y: FixedNum,
}

impl FixedVec2 {
    pub const ZERO: Self = Self { x: FixedNum::ZERO, y: FixedNum::ZERO };

    pub fn new(x: FixedNum, y: FixedNum) -> Self {
        Self { x, y }
    }

    pub fn from_f32(x: f32, y: f32) -> Self {
        Self {
            x: FixedNum::from_num(x),
            y: FixedNum::from_num(y),
        }
    }

    pub fn from_vec2(v: Vec2) -> Self {
        Self::from_f32(v.x, v.y)
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x.to_num(), self.y.to_num())
    }

    pub fn length(self) -> FixedNum {
        let len_sq = self.length_squared();
        if len_sq == FixedNum::ZERO {
            return FixedNum::ZERO;
        }
        len_sq.sqrt()
    }

    pub fn length_squared(self) -> FixedNum {
        self.x * self.x + self.y * self.y
    }

    /// Unit vector in the same direction, or `ZERO` for a zero-length input.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == FixedNum::ZERO {
            Self::ZERO
        } else {
            Self {
                x: self.x / len,
                y: self.y / len,
            }
        }
    }

    pub fn distance_squared(self, other: Self) -> FixedNum {
        (self - other).length_squared()
    }

    /// Component-wise clamp into `[min, max]`.
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self {
            x: self.x.clamp(min.x, max.x),
            y: self.y.clamp(min.y, max.y),
        }
    }
}

/// Express a world-space `point` in the frame of a body sitting at `origin`.
///
/// Simulation bodies never rotate or scale, so the local frame is a pure
/// translation of the world frame.
pub fn to_local(origin: FixedVec2, point: FixedVec2) -> FixedVec2 {
    point - origin
}

impl std::ops::Add for FixedVec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for FixedVec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<FixedNum> for FixedVec2 {
    type Output = Self;
    fn mul(self, rhs: FixedNum) -> Self::Output {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl std::ops::Neg for FixedVec2 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self { x: -self.x, y: -self.y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero_stays_zero() {
        assert_eq!(FixedVec2::ZERO.normalize(), FixedVec2::ZERO);
    }

    #[test]
    fn normalize_has_unit_length() {
        let v = FixedVec2::from_f32(3.0, -4.0).normalize();
        let len: f32 = v.length().to_num();
        assert!((len - 1.0).abs() < 0.001, "length was {}", len);
        assert!((v.x.to_num::<f32>() - 0.6).abs() < 0.001);
        assert!((v.y.to_num::<f32>() + 0.8).abs() < 0.001);
    }

    #[test]
    fn to_local_is_relative_to_origin() {
        let origin = FixedVec2::from_f32(10.0, 5.0);
        let point = FixedVec2::from_f32(12.0, 1.0);
        assert_eq!(to_local(origin, point), FixedVec2::from_f32(2.0, -4.0));
    }

    #[test]
    fn clamp_is_component_wise() {
        let min = FixedVec2::from_f32(-1.0, -1.0);
        let max = FixedVec2::from_f32(1.0, 1.0);
        let clamped = FixedVec2::from_f32(5.0, -0.5).clamp(min, max);
        assert_eq!(clamped, FixedVec2::from_f32(1.0, -0.5));
    }
}
