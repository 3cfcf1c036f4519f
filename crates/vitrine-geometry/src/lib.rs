use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= f64::EPSILON {
            Self::ZERO
        } else {
            self / len
        }
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl std::ops::Div<f64> for Vec3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

pub fn rotate_around_axis(point: Vec3, origin: Vec3, axis: Vec3, angle: f64) -> Vec3 {
    let axis = axis.normalized();
    let v = point - origin;
    let cos = angle.cos();
    let sin = angle.sin();
    let rotated = v * cos + axis.cross(v) * sin + axis * (axis.dot(v)) * (1.0 - cos);
    origin + rotated
}

/// Euler angles in radians, applied Z first, then Y, then X.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Rotation {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn about_x(angle: f64) -> Self {
        Self::new(angle, 0.0, 0.0)
    }

    pub const fn about_z(angle: f64) -> Self {
        Self::new(0.0, 0.0, angle)
    }

    pub fn apply(self, point: Vec3) -> Vec3 {
        let mut p = point;
        if self.z != 0.0 {
            p = rotate_around_axis(p, Vec3::ZERO, Vec3::Z, self.z);
        }
        if self.y != 0.0 {
            p = rotate_around_axis(p, Vec3::ZERO, Vec3::Y, self.y);
        }
        if self.x != 0.0 {
            p = rotate_around_axis(p, Vec3::ZERO, Vec3::X, self.x);
        }
        p
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Rotation,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Rotation::IDENTITY,
    };

    pub const fn new(translation: Vec3, rotation: Rotation) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub const fn from_rotation(rotation: Rotation) -> Self {
        Self::new(Vec3::ZERO, rotation)
    }

    pub const fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Rotation::IDENTITY)
    }

    pub fn apply(&self, point: Vec3) -> Vec3 {
        self.rotation.apply(point) + self.translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1.0e-9
    }

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let p = Rotation::about_z(FRAC_PI_2).apply(Vec3::X);
        assert!(close(p, Vec3::Y));
    }

    #[test]
    fn quarter_turn_about_x_maps_y_to_z() {
        let p = Rotation::about_x(FRAC_PI_2).apply(Vec3::Y);
        assert!(close(p, Vec3::Z));
    }

    #[test]
    fn z_is_applied_before_x() {
        // Z takes X to Y, then X takes Y to Z.
        let p = Rotation::new(FRAC_PI_2, 0.0, FRAC_PI_2).apply(Vec3::X);
        assert!(close(p, Vec3::Z));
    }

    #[test]
    fn transform_rotates_then_translates() {
        let t = Transform::new(Vec3::new(0.0, 0.0, 1.0), Rotation::about_z(FRAC_PI_2));
        assert!(close(t.apply(Vec3::X), Vec3::new(0.0, 1.0, 1.0)));
    }
}
