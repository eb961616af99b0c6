/// Globe orientation as yaw (about the vertical axis) and pitch (tilt).
///
/// Horizontal drags and autonomous spin change `yaw_rad`; vertical drags
/// change `pitch_rad`. Pitch is unbounded unless a limit is set.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Orientation {
    pub yaw_rad: f64,
    pub pitch_rad: f64,
    pub pitch_limit_rad: Option<f64>,
}

impl Orientation {
    pub fn identity() -> Self {
        Self {
            yaw_rad: 0.0,
            pitch_rad: 0.0,
            pitch_limit_rad: None,
        }
    }

    pub fn with_pitch_limit(mut self, limit_rad: Option<f64>) -> Self {
        self.pitch_limit_rad = limit_rad.map(f64::abs);
        self.pitch_rad = self.clamp_pitch(self.pitch_rad);
        self
    }

    pub fn rotate(&mut self, d_yaw_rad: f64, d_pitch_rad: f64) {
        self.yaw_rad = wrap_angle(self.yaw_rad + d_yaw_rad);
        self.pitch_rad = self.clamp_pitch(self.pitch_rad + d_pitch_rad);
    }

    fn clamp_pitch(&self, pitch_rad: f64) -> f64 {
        match self.pitch_limit_rad {
            Some(limit) => pitch_rad.clamp(-limit, limit),
            None => pitch_rad,
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::identity()
    }
}

/// Wrap into (-PI, PI].
fn wrap_angle(a: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let mut w = a % TAU;
    if w > PI {
        w -= TAU;
    } else if w <= -PI {
        w += TAU;
    }
    w
}

#[cfg(test)]
mod tests {
    use super::Orientation;

    #[test]
    fn identity_is_unrotated() {
        let o = Orientation::identity();
        assert_eq!((o.yaw_rad, o.pitch_rad), (0.0, 0.0));
    }

    #[test]
    fn pitch_is_unbounded_by_default() {
        let mut o = Orientation::identity();
        o.rotate(0.0, 1.8);
        assert_eq!(o.pitch_rad, 1.8);
        o.rotate(0.0, -4.0);
        assert!((o.pitch_rad + 2.2).abs() < 1e-12);
    }

    #[test]
    fn pitch_limit_clamps_when_set() {
        let mut o = Orientation::identity().with_pitch_limit(Some(-1.5));
        o.rotate(0.0, 10.0);
        assert_eq!(o.pitch_rad, 1.5);
        o.rotate(0.0, -20.0);
        assert_eq!(o.pitch_rad, -1.5);
    }

    #[test]
    fn yaw_wraps_around() {
        let mut o = Orientation::identity();
        o.rotate(3.0 * std::f64::consts::PI, 0.0);
        assert!((o.yaw_rad - std::f64::consts::PI).abs() < 1e-9);
        o.rotate(0.5, 0.0);
        assert!(o.yaw_rad < 0.0);
    }

    #[test]
    fn small_deltas_apply_exactly() {
        let mut o = Orientation::identity();
        o.rotate(0.25, -0.125);
        assert_eq!(o.yaw_rad, 0.25);
        assert_eq!(o.pitch_rad, -0.125);
    }
}
