use glam::Vec3;
use std::f32::consts::PI;

use super::EntityError;

/// Default body density in kg/m³, approximating a rocky body.
pub const DEFAULT_DENSITY: f32 = 3344.0;

/// Meters of physical radius per world-space unit.
pub const RADIUS_SCALE: f32 = 100_000.0;

/// CPU-side kinematic and physical state of a body.
///
/// `radius` is derived, never set directly: it tracks `mass` and `density`
/// through `radius = cbrt((3·mass/density) / (4·π)) / RADIUS_SCALE` and is
/// recomputed on every [`step`](Self::step) so a future force model that
/// mutates mass stays consistent without extra bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// World-space position, arbitrary simulation units.
    pub position: Vec3,
    /// World-space velocity, units per second.
    pub velocity: Vec3,
    /// Mass in kg. Must stay positive.
    pub mass: f32,
    /// Density in kg/m³. Must stay positive.
    pub density: f32,

    radius: f32,
}

impl Body {
    /// Creates a body, validating `mass > 0` and `density > 0`.
    pub fn new(position: Vec3, velocity: Vec3, mass: f32, density: f32) -> Result<Self, EntityError> {
        if !(mass > 0.0) {
            return Err(EntityError::InvalidArgument(format!(
                "mass must be positive, got {mass}"
            )));
        }
        if !(density > 0.0) {
            return Err(EntityError::InvalidArgument(format!(
                "density must be positive, got {density}"
            )));
        }

        Ok(Self {
            position,
            velocity,
            mass,
            density,
            radius: radius_for(mass, density),
        })
    }

    /// Derived world-space radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Advances position by one explicit Euler step and recomputes the
    /// radius from the current mass and density.
    ///
    /// Returns `true` when the radius changed, i.e. the caller must
    /// regenerate and re-upload the mesh.
    pub fn step(&mut self, dt: f32) -> bool {
        self.position += self.velocity * dt;

        let radius = radius_for(self.mass, self.density);
        if radius != self.radius {
            self.radius = radius;
            true
        } else {
            false
        }
    }
}

/// Radius of a sphere of the given mass and density, in world units.
pub(crate) fn radius_for(mass: f32, density: f32) -> f32 {
    ((3.0 * mass / density) / (4.0 * PI)).cbrt() / RADIUS_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(mass: f32, density: f32) -> Body {
        Body::new(Vec3::ZERO, Vec3::ZERO, mass, density).unwrap()
    }

    // ── radius derivation ─────────────────────────────────────────────────

    #[test]
    fn radius_matches_formula() {
        let b = body(5.97e24, 5514.0);
        let expected = ((3.0 * 5.97e24 / 5514.0) / (4.0 * PI)).cbrt() / RADIUS_SCALE;
        assert_eq!(b.radius(), expected);
    }

    #[test]
    fn earth_like_radius_is_about_sixty_four_units() {
        // Earth: ~6.371e6 m radius → ~63.7 world units at RADIUS_SCALE.
        let b = body(5.97e24, 5514.0);
        assert!((b.radius() - 63.7).abs() < 0.5, "radius = {}", b.radius());
    }

    #[test]
    fn radius_is_monotonic_in_mass() {
        assert!(body(2.0e22, DEFAULT_DENSITY).radius() > body(1.0e22, DEFAULT_DENSITY).radius());
    }

    #[test]
    fn radius_is_antitonic_in_density() {
        assert!(body(1.0e22, 6000.0).radius() < body(1.0e22, 3000.0).radius());
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn zero_mass_is_rejected() {
        let err = Body::new(Vec3::ZERO, Vec3::ZERO, 0.0, DEFAULT_DENSITY).unwrap_err();
        assert!(matches!(err, EntityError::InvalidArgument(_)));
    }

    #[test]
    fn negative_density_is_rejected() {
        let err = Body::new(Vec3::ZERO, Vec3::ZERO, 1.0, -1.0).unwrap_err();
        assert!(matches!(err, EntityError::InvalidArgument(_)));
    }

    #[test]
    fn nan_mass_is_rejected() {
        let err = Body::new(Vec3::ZERO, Vec3::ZERO, f32::NAN, DEFAULT_DENSITY).unwrap_err();
        assert!(matches!(err, EntityError::InvalidArgument(_)));
    }

    // ── integration ───────────────────────────────────────────────────────

    #[test]
    fn step_with_zero_dt_leaves_position_unchanged() {
        let mut b = body(1.0e22, DEFAULT_DENSITY);
        b.position = Vec3::new(1.0, 2.0, 3.0);
        b.velocity = Vec3::new(4.0, 5.0, 6.0);
        b.step(0.0);
        assert_eq!(b.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn step_with_unit_dt_advances_by_velocity() {
        let mut b = body(1.0e22, DEFAULT_DENSITY);
        b.velocity = Vec3::new(1.0, 0.0, 0.0);
        b.step(1.0);
        assert_eq!(b.position.x, 1.0);
        assert_eq!(b.position.y, 0.0);
        assert_eq!(b.position.z, 0.0);
    }

    #[test]
    fn step_reports_no_radius_change_when_mass_is_constant() {
        let mut b = body(5.97e24, 5514.0);
        let before = b.radius();
        assert!(!b.step(1.0));
        assert_eq!(b.radius(), before);
    }

    #[test]
    fn step_reports_radius_change_after_mass_mutation() {
        let mut b = body(1.0e22, DEFAULT_DENSITY);
        b.mass = 8.0e22;
        assert!(b.step(0.0));
        assert_eq!(b.radius(), radius_for(8.0e22, DEFAULT_DENSITY));
    }
}
