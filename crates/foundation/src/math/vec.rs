#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn scale(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Self {
        let n = self.length();
        if n > 1e-10 { self.scale(1.0 / n) } else { Self::ZERO }
    }

    /// Rotate about the Y axis (yaw), then the X axis (pitch).
    pub fn rotate_yaw_pitch(self, yaw_rad: f64, pitch_rad: f64) -> Self {
        let (sy, cy) = yaw_rad.sin_cos();
        let x = self.x * cy + self.z * sy;
        let z = -self.x * sy + self.z * cy;

        let (sp, cp) = pitch_rad.sin_cos();
        let y = self.y * cp - z * sp;
        let z = self.y * sp + z * cp;
        Self::new(x, y, z)
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
