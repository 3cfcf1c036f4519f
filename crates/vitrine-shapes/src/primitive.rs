use serde::Serialize;
use std::f64::consts::TAU;
use vitrine_geometry::Vec3;

use crate::{Error, Result};

/// Unit primitives, centered on the origin. Cylinders run along Y, planes lie in XY,
/// tori lie in XY around Z.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    Torus {
        radius: f64,
        tube: f64,
        radial_segments: u32,
        tubular_segments: u32,
        arc: f64,
    },
    Cylinder {
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
        radial_segments: u32,
    },
    Cuboid {
        width: f64,
        height: f64,
        depth: f64,
    },
    Plane {
        width: f64,
        height: f64,
    },
}

impl Primitive {
    pub fn torus(
        radius: f64,
        tube: f64,
        radial_segments: u32,
        tubular_segments: u32,
        arc: f64,
    ) -> Result<Self> {
        ensure_positive("radius", radius)?;
        ensure_positive("tube", tube)?;
        ensure_positive("arc", arc)?;
        ensure_segments("radial_segments", radial_segments, 2)?;
        ensure_segments("tubular_segments", tubular_segments, 3)?;
        Ok(Self::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
            arc: arc.min(TAU),
        })
    }

    pub fn cylinder(radius: f64, height: f64, radial_segments: u32) -> Result<Self> {
        ensure_positive("radius", radius)?;
        ensure_positive("height", height)?;
        ensure_segments("radial_segments", radial_segments, 3)?;
        Ok(Self::Cylinder {
            radius_top: radius,
            radius_bottom: radius,
            height,
            radial_segments,
        })
    }

    pub fn cuboid(width: f64, height: f64, depth: f64) -> Result<Self> {
        ensure_positive("width", width)?;
        ensure_positive("height", height)?;
        ensure_positive("depth", depth)?;
        Ok(Self::Cuboid {
            width,
            height,
            depth,
        })
    }

    pub fn plane(width: f64, height: f64) -> Result<Self> {
        ensure_positive("width", width)?;
        ensure_positive("height", height)?;
        Ok(Self::Plane { width, height })
    }

    pub fn edges(&self) -> Vec<[Vec3; 2]> {
        match *self {
            Self::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
                arc,
            } => torus_edges(radius, tube, radial_segments, tubular_segments, arc),
            Self::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => cylinder_edges(radius_top, radius_bottom, height, radial_segments),
            Self::Cuboid {
                width,
                height,
                depth,
            } => cuboid_edges(width, height, depth),
            Self::Plane { width, height } => plane_edges(width, height),
        }
    }
}

fn torus_edges(radius: f64, tube: f64, radial: u32, tubular: u32, arc: f64) -> Vec<[Vec3; 2]> {
    let closed = (TAU - arc).abs() <= f64::EPSILON;
    let point = |i: u32, j: u32| {
        let u = i as f64 / tubular as f64 * arc;
        let v = j as f64 / radial as f64 * TAU;
        let ring = radius + tube * v.cos();
        Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin())
    };

    let mut edges = Vec::new();
    for j in 0..radial {
        for i in 0..tubular {
            edges.push([point(i, j), point(i + 1, j)]);
        }
    }
    let rings = if closed { tubular } else { tubular + 1 };
    for i in 0..rings {
        for j in 0..radial {
            edges.push([point(i, j), point(i, j + 1)]);
        }
    }
    edges
}

fn cylinder_edges(radius_top: f64, radius_bottom: f64, height: f64, segments: u32) -> Vec<[Vec3; 2]> {
    let half = height * 0.5;
    let rim = |radius: f64, y: f64, k: u32| {
        let theta = k as f64 / segments as f64 * TAU;
        Vec3::new(radius * theta.sin(), y, radius * theta.cos())
    };

    let mut edges = Vec::new();
    for k in 0..segments {
        edges.push([rim(radius_top, half, k), rim(radius_top, half, k + 1)]);
        edges.push([rim(radius_bottom, -half, k), rim(radius_bottom, -half, k + 1)]);
        edges.push([rim(radius_top, half, k), rim(radius_bottom, -half, k)]);
    }
    edges
}

fn cuboid_edges(width: f64, height: f64, depth: f64) -> Vec<[Vec3; 2]> {
    let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
    let corner = |i: usize| {
        Vec3::new(
            if i & 1 == 0 { -hx } else { hx },
            if i & 2 == 0 { -hy } else { hy },
            if i & 4 == 0 { -hz } else { hz },
        )
    };
    const PAIRS: [(usize, usize); 12] = [
        (0, 1),
        (2, 3),
        (4, 5),
        (6, 7),
        (0, 2),
        (1, 3),
        (4, 6),
        (5, 7),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];
    PAIRS.iter().map(|&(a, b)| [corner(a), corner(b)]).collect()
}

fn plane_edges(width: f64, height: f64) -> Vec<[Vec3; 2]> {
    let (hx, hy) = (width * 0.5, height * 0.5);
    let corners = [
        Vec3::new(-hx, -hy, 0.0),
        Vec3::new(hx, -hy, 0.0),
        Vec3::new(hx, hy, 0.0),
        Vec3::new(-hx, hy, 0.0),
    ];
    (0..4).map(|i| [corners[i], corners[(i + 1) % 4]]).collect()
}

fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(Error::InvalidParameter(format!("{name} must be > 0")));
    }
    Ok(())
}

fn ensure_segments(name: &str, value: u32, min: u32) -> Result<()> {
    if value < min {
        return Err(Error::InvalidParameter(format!("{name} must be >= {min}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn cuboid_has_twelve_edges() -> Result<()> {
        assert_eq!(Primitive::cuboid(1.0, 2.0, 0.2)?.edges().len(), 12);
        Ok(())
    }

    #[test]
    fn half_torus_stays_in_upper_half_plane() -> Result<()> {
        let torus = Primitive::torus(1.2, 0.1, 8, 16, PI)?;
        for [a, b] in torus.edges() {
            assert!(a.y >= -1.0e-9 && b.y >= -1.0e-9);
        }
        Ok(())
    }

    #[test]
    fn cylinder_rims_sit_at_half_height() -> Result<()> {
        let cylinder = Primitive::cylinder(0.4, 0.2, 16)?;
        let edges = cylinder.edges();
        assert_eq!(edges.len(), 48);
        for [a, b] in edges {
            assert!((a.y.abs() - 0.1).abs() < 1.0e-9);
            assert!((b.y.abs() - 0.1).abs() < 1.0e-9);
        }
        Ok(())
    }

    #[test]
    fn rejects_degenerate_parameters() {
        assert!(Primitive::cuboid(0.0, 1.0, 1.0).is_err());
        assert!(Primitive::plane(1.0, f64::NAN).is_err());
        assert!(Primitive::cylinder(0.5, 1.0, 2).is_err());
        assert!(Primitive::torus(1.0, 0.1, 1, 16, PI).is_err());
    }
}
