use std::rc::Rc;

use layers::{ArcDatum, ArcLayerConfig, Point, PointLayerConfig};

use crate::components::Orientation;

pub const DEFAULT_GLOBE_RADIUS: f64 = 100.0;

/// The globe object: a sphere with a point layer and an arc layer.
///
/// Layers are replaced wholesale through the `set_*_data` methods; each call
/// is counted so callers can verify how often data was pushed.
#[derive(Debug, Clone)]
pub struct GlobeObject {
    pub radius: f64,
    pub orientation: Orientation,
    points: Rc<[Point]>,
    point_config: PointLayerConfig,
    arcs: Vec<ArcDatum>,
    arc_config: ArcLayerConfig,
    point_binds: u64,
    arc_pushes: u64,
}

impl GlobeObject {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            orientation: Orientation::identity(),
            points: Rc::from(Vec::new()),
            point_config: PointLayerConfig::default(),
            arcs: Vec::new(),
            arc_config: ArcLayerConfig::default(),
            point_binds: 0,
            arc_pushes: 0,
        }
    }

    pub fn set_points_data(&mut self, points: Rc<[Point]>, config: PointLayerConfig) {
        self.points = points;
        self.point_config = config;
        self.point_binds += 1;
    }

    pub fn set_arcs_data(&mut self, arcs: Vec<ArcDatum>) {
        self.arcs = arcs;
        self.arc_pushes += 1;
    }

    pub fn set_arc_config(&mut self, config: ArcLayerConfig) {
        self.arc_config = config;
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point_config(&self) -> &PointLayerConfig {
        &self.point_config
    }

    pub fn arcs(&self) -> &[ArcDatum] {
        &self.arcs
    }

    pub fn arc_config(&self) -> &ArcLayerConfig {
        &self.arc_config
    }

    pub fn point_binds(&self) -> u64 {
        self.point_binds
    }

    pub fn arc_pushes(&self) -> u64 {
        self.arc_pushes
    }
}

impl Default for GlobeObject {
    fn default() -> Self {
        Self::new(DEFAULT_GLOBE_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::GlobeObject;
    use catalog::Catalog;
    use layers::{PointLayerConfig, derive_points};
    use std::rc::Rc;

    #[test]
    fn starts_with_empty_layers() {
        let globe = GlobeObject::default();
        assert!(globe.points().is_empty());
        assert!(globe.arcs().is_empty());
        assert_eq!(globe.arc_config().transition_ms(), 0.0);
    }

    #[test]
    fn counts_layer_pushes() {
        let mut globe = GlobeObject::default();
        let points: Rc<[_]> = derive_points(Catalog::builtin().locations()).into();
        globe.set_points_data(points.clone(), PointLayerConfig::default());
        globe.set_arcs_data(Vec::new());
        globe.set_arcs_data(Vec::new());

        assert_eq!(globe.points().len(), points.len());
        assert_eq!(globe.point_binds(), 1);
        assert_eq!(globe.arc_pushes(), 2);
    }
}
