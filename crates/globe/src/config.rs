use layers::{ArcLayerConfig, PointLayerConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("config json is invalid: {0}")]
    Parse(String),
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("spawn_probability must be within [0, 1], got {0}")]
    Probability(f64),
    #[error("camera planes must satisfy 0 < near < far (near {near}, far {far})")]
    ClipPlanes { near: f64, far: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    /// Camera distance from the globe center.
    pub distance: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 45.0,
            near: 1.0,
            far: 2000.0,
            distance: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Radians of yaw per horizontal pixel dragged.
    pub sensitivity_x: f64,
    /// Radians of pitch per vertical pixel dragged.
    pub sensitivity_y: f64,
    /// Optional bound on pitch. Unset means drag deltas apply unmodified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_clamp_rad: Option<f64>,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            sensitivity_x: 0.005,
            sensitivity_y: 0.003,
            pitch_clamp_rad: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcScheduleConfig {
    pub spawn_period_ms: u32,
    pub spawn_probability: f64,
    /// Expected arcs per second. When set, replaces `spawn_probability` so the
    /// rate is tuned with one number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arcs_per_second: Option<f64>,
    pub lifetime_ms: u32,
    /// Fixed RNG seed for reproducible spawn sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ArcScheduleConfig {
    fn default() -> Self {
        Self {
            spawn_period_ms: 1500,
            spawn_probability: 0.6,
            arcs_per_second: None,
            lifetime_ms: 4000,
            seed: None,
        }
    }
}

impl ArcScheduleConfig {
    /// Per-tick spawn probability actually used.
    ///
    /// A requested `arcs_per_second` above one arc per tick saturates at 1.
    pub fn effective_probability(&self) -> f64 {
        match self.arcs_per_second {
            Some(rate) => (rate * f64::from(self.spawn_period_ms) / 1000.0).clamp(0.0, 1.0),
            None => self.spawn_probability,
        }
    }

    pub fn expected_arcs_per_second(&self) -> f64 {
        if self.spawn_period_ms == 0 {
            return 0.0;
        }
        self.effective_probability() * 1000.0 / f64::from(self.spawn_period_ms)
    }

    /// Upper bound on concurrently active arcs.
    pub fn max_concurrent(&self) -> u32 {
        if self.spawn_period_ms == 0 {
            return 0;
        }
        self.lifetime_ms.div_ceil(self.spawn_period_ms)
    }
}

/// Everything tunable about the globe view. Missing JSON keys take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub camera: CameraConfig,
    pub globe_radius: f64,
    pub interaction: InteractionConfig,
    pub auto_rotate: bool,
    /// Yaw applied per frame while idle.
    pub auto_rotate_step_rad: f64,
    pub arcs: ArcScheduleConfig,
    pub point_layer: PointLayerConfig,
    pub arc_layer: ArcLayerConfig,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            globe_radius: scene::prefabs::DEFAULT_GLOBE_RADIUS,
            interaction: InteractionConfig::default(),
            auto_rotate: true,
            auto_rotate_step_rad: 0.0015,
            arcs: ArcScheduleConfig::default(),
            point_layer: PointLayerConfig::default(),
            arc_layer: ArcLayerConfig::default(),
        }
    }
}

impl GlobeConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GlobeConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("camera.fov_deg", self.camera.fov_deg)?;
        positive("camera.distance", self.camera.distance)?;
        positive("globe_radius", self.globe_radius)?;
        positive("arcs.spawn_period_ms", f64::from(self.arcs.spawn_period_ms))?;
        positive("arcs.lifetime_ms", f64::from(self.arcs.lifetime_ms))?;
        if !(self.camera.near > 0.0 && self.camera.near < self.camera.far) {
            return Err(ConfigError::ClipPlanes {
                near: self.camera.near,
                far: self.camera.far,
            });
        }
        let p = self.arcs.spawn_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::Probability(p));
        }
        if let Some(limit) = self.interaction.pitch_clamp_rad {
            positive("interaction.pitch_clamp_rad", limit)?;
        }
        if let Some(rate) = self.arcs.arcs_per_second {
            if !rate.is_finite() || rate < 0.0 {
                return Err(ConfigError::NotPositive {
                    field: "arcs.arcs_per_second",
                    value: rate,
                });
            }
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}
