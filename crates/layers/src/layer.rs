use serde::{Deserialize, Serialize};

/// Point layer rendering parameters.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLayerConfig {
    /// Base radius in degrees of arc; scaled per point by its style.
    pub radius: f32,
    /// Segments used to tessellate each point marker.
    pub resolution: u32,
}

impl Default for PointLayerConfig {
    fn default() -> Self {
        Self {
            radius: 0.6,
            resolution: 12,
        }
    }
}

/// Arc layer rendering parameters.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcLayerConfig {
    /// Dash length as a fraction of the arc.
    pub dash_length: f32,
    /// Gap between dashes as a fraction of the arc.
    pub dash_gap: f32,
    /// Time for a dash to travel the whole arc.
    pub dash_animate_ms: f64,
    pub stroke: f32,
    /// Arc apex height per radian of great-circle distance.
    pub altitude_auto_scale: f32,
    /// Layer transition time. Always zero so new arcs appear immediately.
    #[serde(skip)]
    transition_ms: f64,
}

impl ArcLayerConfig {
    pub fn transition_ms(&self) -> f64 {
        self.transition_ms
    }

    /// Dash offset in [0, 1) for a given time since the arc was born.
    pub fn dash_phase(&self, age_ms: f64) -> f32 {
        if self.dash_animate_ms <= 0.0 {
            return 0.0;
        }
        ((age_ms.max(0.0) / self.dash_animate_ms).fract()) as f32
    }
}

impl Default for ArcLayerConfig {
    fn default() -> Self {
        Self {
            dash_length: 0.4,
            dash_gap: 0.2,
            dash_animate_ms: 1500.0,
            stroke: 0.5,
            altitude_auto_scale: 0.5,
            transition_ms: 0.0,
        }
    }
}
