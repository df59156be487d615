use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// A point in scene space. `z` grows toward the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Display, From, Into)]
#[display("({x:.3}, {y:.3}, {z:.3})")]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(&self, other: &Vec3) -> f64 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z).length()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Pointer position in container coordinates (origin at the top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the container that receives pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Offset of `p` from the centre, divided by the container extent on each axis.
    /// An axis with a zero or non-finite extent contributes no offset.
    pub fn normalized_offset(&self, p: Point) -> Point {
        fn axis(pos: f64, extent: f64) -> f64 {
            if extent.is_finite() && extent > 0.0 && pos.is_finite() {
                (pos - extent / 2.0) / extent
            } else {
                0.0
            }
        }

        Point::new(axis(p.x, self.width), axis(p.y, self.height))
    }
}

/// Container rotation, radians. `pitch` turns about the x axis, `yaw` about the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub pitch: f64,
    pub yaw: f64,
}

impl Rotation {
    pub fn new(pitch: f64, yaw: f64) -> Self {
        Self { pitch, yaw }
    }

    /// Applies yaw first, then pitch, matching a `rotateX(pitch) rotateY(yaw)` container.
    pub fn apply(&self, v: Vec3) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();

        let x = v.x * cy + v.z * sy;
        let z = -v.x * sy + v.z * cy;

        Vec3::new(x, v.y * cp - z * sp, v.y * sp + z * cp)
    }
}
