use foundation::math::Vec3;

/// Perspective camera looking at the globe center from +Z.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub position: Vec3,
    projection: [[f32; 4]; 4],
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f64, aspect: f64, near: f64, far: f64) -> Self {
        let mut camera = Self {
            fov_y_deg,
            aspect,
            near,
            far,
            position: Vec3::new(0.0, 0.0, 300.0),
            projection: [[0.0; 4]; 4],
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn at_distance(mut self, distance: f64) -> Self {
        self.position = Vec3::new(0.0, 0.0, distance);
        self
    }

    /// Recompute the projection after changing `aspect`, `fov_y_deg`, `near` or `far`.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            mat4_perspective_rh_z0(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection(&self) -> [[f32; 4]; 4] {
        self.projection
    }

    pub fn distance(&self) -> f64 {
        self.position.length()
    }

    /// Focal length in pixels for a surface `height_px` tall.
    pub fn focal_px(&self, height_px: f64) -> f64 {
        0.5 * height_px / (0.5 * self.fov_y_deg.to_radians()).tan()
    }
}

fn mat4_perspective_rh_z0(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> [[f32; 4]; 4] {
    let f = 1.0 / (0.5 * fov_y_rad).tan();
    let m00 = (f / aspect) as f32;
    let m11 = f as f32;
    let m22 = (far / (near - far)) as f32;
    let m23 = ((near * far) / (near - far)) as f32;

    // Column-major, RH, depth range [0, 1].
    [
        [m00, 0.0, 0.0, 0.0],
        [0.0, m11, 0.0, 0.0],
        [0.0, 0.0, m22, -1.0],
        [0.0, 0.0, m23, 0.0],
    ]
}
