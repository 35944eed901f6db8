use glam::{Mat4, Vec3};

/// Vertical field of view of the camera.
pub const FOV_Y_DEGREES: f32 = 45.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 100.0;
/// How far the camera sits back along +Z.
pub const CAMERA_DISTANCE: f32 = 10.0;
/// Radians of rotation per second of elapsed time.
pub const ROTATION_RATE: f32 = 1.0;

/// Object transform: rotate about Y by `angle`, then about X by `angle / 2`.
pub fn model(angle: f32) -> Mat4 {
    Mat4::from_rotation_x(angle * 0.5) * Mat4::from_rotation_y(angle)
}

/// Camera transform: the world pushed back by [`CAMERA_DISTANCE`].
pub fn view() -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, -CAMERA_DISTANCE))
}

/// Right-handed perspective with OpenGL clip depth (-w..w).
pub fn projection(aspect: f32) -> Mat4 {
    Mat4::perspective_rh_gl(FOV_Y_DEGREES.to_radians(), aspect, NEAR, FAR)
}

/// Width over height; a zero height is treated as one pixel.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

/// The three matrices uploaded for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl FrameTransforms {
    pub fn at(angle: f32, aspect: f32) -> Self {
        Self {
            model: model(angle),
            view: view(),
            projection: projection(aspect),
        }
    }

    /// Matrices paired with their uniform names, in upload order.
    pub fn named(&self) -> [(&'static str, &Mat4); 3] {
        [
            ("model", &self.model),
            ("view", &self.view),
            ("projection", &self.projection),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn model_rotates_y_then_half_x() {
        let p = model(FRAC_PI_2).transform_point3(Vec3::X);
        // Y by 90deg takes +X to -Z, X by 45deg lifts it toward +Y.
        let expected = Vec3::new(0.0, FRAC_PI_4.sin(), -FRAC_PI_4.cos());
        assert!(p.abs_diff_eq(expected, 1e-5), "got {p:?}");

        let composed = Mat4::from_rotation_x(FRAC_PI_4)
            .transform_point3(Mat4::from_rotation_y(FRAC_PI_2).transform_point3(Vec3::X));
        assert!(p.abs_diff_eq(composed, 1e-5));
    }

    #[test]
    fn model_at_zero_is_identity() {
        assert!(model(0.0).abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn view_is_pure_translation() {
        assert_eq!(
            view().transform_point3(Vec3::ZERO),
            Vec3::new(0.0, 0.0, -10.0)
        );
        assert_eq!(view().transform_vector3(Vec3::X), Vec3::X);
    }

    #[test]
    fn projection_matches_closed_form() {
        let aspect = 1280.0 / 768.0;
        let p = projection(aspect);
        let f = 1.0 / (22.5_f32.to_radians()).tan();

        assert!((p.col(0).x - f / aspect).abs() < 1e-5);
        assert!((p.col(1).y - f).abs() < 1e-5);
        assert!((p.col(2).z - (FAR + NEAR) / (NEAR - FAR)).abs() < 1e-5);
        assert_eq!(p.col(2).w, -1.0);
        assert!((p.col(3).z - 2.0 * FAR * NEAR / (NEAR - FAR)).abs() < 1e-5);
        assert_eq!(p.col(3).w, 0.0);
        assert_eq!(p.col(0).y, 0.0);
        assert_eq!(p.col(1).x, 0.0);
    }

    #[test]
    fn near_and_far_map_to_clip_bounds() {
        let p = projection(1.0);
        let near = p.project_point3(Vec3::new(0.0, 0.0, -NEAR));
        let far = p.project_point3(Vec3::new(0.0, 0.0, -FAR));
        assert!((near.z + 1.0).abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn aspect_guards_zero_height() {
        assert_eq!(aspect_ratio(1280, 0), 1280.0);
        assert_eq!(aspect_ratio(1, 1), 1.0);
    }

    #[test]
    fn named_order_is_model_view_projection() {
        let t = FrameTransforms::at(0.3, 1.5);
        let names: Vec<_> = t.named().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["model", "view", "projection"]);
        assert_eq!(*t.named()[0].1, model(0.3));
    }
}
