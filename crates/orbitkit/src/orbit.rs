use crate::geom::Vec3;
use serde::Serialize;
use std::f64::consts::TAU;
use thiserror::Error;

/// Height of the vertical bob, in the same units as the orbit radius.
pub const BOB_AMPLITUDE: f64 = 0.2;

#[derive(Debug, Error, PartialEq)]
pub enum OrbitError {
    #[error("orbit radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),
    #[error("angular speed must be finite, got {0}")]
    InvalidSpeed(f64),
    #[error("phase offset must be finite, got {0}")]
    InvalidPhase(f64),
}

/// Circular motion on the horizontal plane around the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitParams {
    radius: f64,
    angular_speed: f64,
    phase_offset: f64,
}

impl OrbitParams {
    pub fn new(radius: f64, angular_speed: f64, phase_offset: f64) -> Result<Self, OrbitError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(OrbitError::InvalidRadius(radius));
        }
        if !angular_speed.is_finite() {
            return Err(OrbitError::InvalidSpeed(angular_speed));
        }
        if !phase_offset.is_finite() {
            return Err(OrbitError::InvalidPhase(phase_offset));
        }

        Ok(Self {
            radius,
            angular_speed,
            phase_offset,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn angular_speed(&self) -> f64 {
        self.angular_speed
    }

    pub fn phase_offset(&self) -> f64 {
        self.phase_offset
    }

    pub fn angle_at(&self, t: f64) -> f64 {
        t * self.angular_speed + self.phase_offset
    }

    /// `None` for a stationary orbit.
    pub fn period(&self) -> Option<f64> {
        (self.angular_speed != 0.0).then(|| TAU / self.angular_speed.abs())
    }

    /// Position `t` seconds after mount.
    pub fn position_at(&self, t: f64) -> Vec3 {
        let angle = self.angle_at(t);
        Vec3::new(
            self.radius * angle.cos(),
            BOB_AMPLITUDE * (2.0 * angle).sin(),
            self.radius * angle.sin(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_start_position() {
        let orbit = OrbitParams::new(2.2, 0.3, 0.0).unwrap();
        let p = orbit.position_at(0.0);
        assert!((p.x - 2.2).abs() < EPS);
        assert!(p.y.abs() < EPS);
        assert!(p.z.abs() < EPS);
    }

    #[test]
    fn test_periodicity() {
        let cases = [(2.2, 0.3, 0.0), (3.2, 0.2, PI * 0.5), (1.0, -1.7, 0.4)];

        for (r, w, phase) in cases {
            let orbit = OrbitParams::new(r, w, phase).unwrap();
            let period = orbit.period().unwrap();

            for t in [0.0, 1.3, 17.0, -4.2] {
                let a = orbit.position_at(t);
                let b = orbit.position_at(t + period);
                assert!((a.x - b.x).abs() < 1e-6);
                assert!((a.z - b.z).abs() < 1e-6);
                assert!((a.y - b.y).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_small_steps_move_proportionally() {
        let orbit = OrbitParams::new(3.2, 0.2, 1.0).unwrap();
        // |dp/dt| <= |w| * (r + 2 * bob)
        let bound = orbit.angular_speed().abs() * (orbit.radius() + 2.0 * BOB_AMPLITUDE);
        let dt = 1e-3;

        let mut t = 0.0;
        while t < 40.0 {
            let step = orbit.position_at(t).distance(&orbit.position_at(t + dt));
            assert!(step <= bound * dt + 1e-12, "jump at t={t}: {step}");
            t += 0.37;
        }
    }

    #[test]
    fn test_stationary_orbit_has_no_period() {
        let orbit = OrbitParams::new(1.0, 0.0, 0.0).unwrap();
        assert_eq!(orbit.period(), None);
        assert_eq!(orbit.position_at(0.0), orbit.position_at(100.0));
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert_eq!(
            OrbitParams::new(-1.0, 0.3, 0.0),
            Err(OrbitError::InvalidRadius(-1.0))
        );
        assert!(matches!(
            OrbitParams::new(1.0, f64::INFINITY, 0.0),
            Err(OrbitError::InvalidSpeed(_))
        ));
        assert!(matches!(
            OrbitParams::new(1.0, 0.3, f64::NAN),
            Err(OrbitError::InvalidPhase(_))
        ));
    }
}
