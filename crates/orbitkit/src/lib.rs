//! Geometry for the tech visualizations: sphere layout, orbital motion and
//! depth cues. Everything here is a pure function of its inputs.

pub mod depth;
pub mod geom;
pub mod orbit;
pub mod sphere;

pub use depth::DepthCue;
pub use geom::{Bounds, Point, Rotation, Vec3};
pub use orbit::{OrbitError, OrbitParams};
pub use sphere::SphereLayout;
