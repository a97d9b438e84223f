use glam::{Mat4, Vec3};

/// Right-handed perspective camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fovy: f32,
    /// Width / height of the drawable surface.
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Creates a camera looking from `eye` at `target` with sensible
    /// perspective defaults.
    pub fn looking_at(eye: Vec3, target: Vec3, aspect: f32) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            fovy: std::f32::consts::FRAC_PI_4,
            aspect,
            znear: 0.1,
            zfar: 10_000.0,
        }
    }

    /// Updates the aspect ratio from a drawable size in pixels.
    ///
    /// Zero dimensions are ignored (minimized window).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Combined view-projection matrix.
    pub fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_proj_is_finite() {
        let cam = Camera::looking_at(Vec3::new(0.0, 100.0, 200.0), Vec3::ZERO, 16.0 / 9.0);
        assert!(cam.view_proj().is_finite());
    }

    #[test]
    fn set_aspect_ignores_zero_dimensions() {
        let mut cam = Camera::looking_at(Vec3::ONE, Vec3::ZERO, 2.0);
        cam.set_aspect(0, 720);
        assert_eq!(cam.aspect, 2.0);
        cam.set_aspect(1280, 720);
        assert_eq!(cam.aspect, 1280.0 / 720.0);
    }

    #[test]
    fn origin_projects_to_screen_center_when_looked_at() {
        let cam = Camera::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 1.0);
        let clip = cam.view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
    }
}
