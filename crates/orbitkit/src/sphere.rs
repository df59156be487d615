use crate::geom::Vec3;
use std::f64::consts::PI;

/// Radius of the icon cloud, in pixels.
pub const DEFAULT_RADIUS: f64 = 120.0;

/// Segments used for an orbit guide ring.
pub const RING_SEGMENTS: usize = 64;

/// Point `index` of `count` on a sphere of `radius`, spread with the
/// Saff-Kuijlaars spiral so that the poles do not cluster.
///
/// Returns `None` when `index` is out of range, which also covers `count == 0`.
pub fn fibonacci_point(index: usize, count: usize, radius: f64) -> Option<Vec3> {
    if index >= count {
        return None;
    }

    let n = count as f64;
    let phi = (-1.0 + (2.0 * index as f64) / n).acos();
    let theta = (n * PI).sqrt() * phi;

    Some(Vec3::new(
        radius * theta.cos() * phi.sin(),
        radius * theta.sin() * phi.sin(),
        radius * phi.cos(),
    ))
}

pub fn fibonacci_sphere(count: usize, radius: f64) -> Vec<Vec3> {
    (0..count)
        .filter_map(|i| fibonacci_point(i, count, radius))
        .collect()
}

/// Closed polyline on the horizontal plane, first point repeated at the end.
pub fn ring(radius: f64, segments: usize) -> Vec<Vec3> {
    if segments == 0 {
        return Vec::new();
    }

    (0..=segments)
        .map(|i| {
            let angle = (i as f64 / segments as f64) * 2.0 * PI;
            Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
        })
        .collect()
}

/// Base positions for a fixed item count. Built once and only replaced when the
/// item list changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereLayout {
    radius: f64,
    points: Vec<Vec3>,
}

impl SphereLayout {
    pub fn new(count: usize, radius: f64) -> Self {
        Self {
            radius,
            points: fibonacci_sphere(count, radius),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}
