use foundation::ids::ArcId;
use foundation::math::Vec3;
use scene::components::Orientation;
use scene::{PerspectiveCamera, Scene};

use crate::projection::{arc_path, globe_position};

const ARC_SEGMENTS: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Sphere {
        radius: f64,
        orientation: Orientation,
    },
    Point {
        position: Vec3,
        color: [f32; 4],
        /// Marker radius in world units.
        radius: f64,
        segments: u32,
    },
    Arc {
        id: ArcId,
        path: Vec<Vec3>,
        color: [f32; 4],
        dash_length: f32,
        dash_gap: f32,
        /// Dash offset in [0, 1).
        dash_phase: f32,
        stroke: f32,
    },
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub time_ms: f64,
    pub camera: PerspectiveCamera,
    pub commands: Vec<RenderCommand>,
}

impl RenderFrame {
    /// Gather draw commands for the scene as seen by `camera` at `time_ms`.
    pub fn collect(scene: &Scene, camera: &PerspectiveCamera, time_ms: f64) -> Self {
        let mut commands = Vec::new();
        if let Some(globe) = scene.globe() {
            let orientation = globe.orientation;
            commands.push(RenderCommand::Sphere {
                radius: globe.radius,
                orientation,
            });

            let point_cfg = globe.point_config();
            // Marker radius is configured in degrees of arc.
            let base_radius = globe.radius * f64::from(point_cfg.radius).to_radians();
            for p in globe.points() {
                commands.push(RenderCommand::Point {
                    position: globe_position(
                        p.position(),
                        globe.radius,
                        f64::from(p.altitude),
                        &orientation,
                    ),
                    color: p.color,
                    radius: base_radius * f64::from(p.radius_scale),
                    segments: point_cfg.resolution,
                });
            }

            let arc_cfg = globe.arc_config();
            for arc in globe.arcs() {
                let path = arc_path(
                    arc.start,
                    arc.end,
                    globe.radius,
                    f64::from(arc_cfg.altitude_auto_scale),
                    ARC_SEGMENTS,
                )
                .into_iter()
                .map(|v| v.rotate_yaw_pitch(orientation.yaw_rad, orientation.pitch_rad))
                .collect();
                commands.push(RenderCommand::Arc {
                    id: arc.id,
                    path,
                    color: arc.color,
                    dash_length: arc_cfg.dash_length,
                    dash_gap: arc_cfg.dash_gap,
                    dash_phase: arc_cfg.dash_phase(time_ms - arc.born().as_ms()),
                    stroke: arc_cfg.stroke,
                });
            }
        }

        Self {
            time_ms,
            camera: camera.clone(),
            commands,
        }
    }

    pub fn point_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::Point { .. }))
            .count()
    }

    pub fn arc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::Arc { .. }))
            .count()
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.commands.iter().find_map(|c| match c {
            RenderCommand::Sphere { orientation, .. } => Some(*orientation),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{RenderCommand, RenderFrame};
    use catalog::Catalog;
    use foundation::ids::ArcId;
    use foundation::math::LatLon;
    use foundation::time::{Time, TimeSpan};
    use layers::{ArcDatum, PointLayerConfig, derive_points};
    use scene::prefabs::GlobeObject;
    use scene::{PerspectiveCamera, Scene};

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(45.0, 1.5, 1.0, 2000.0)
    }

    #[test]
    fn empty_scene_has_no_commands() {
        let frame = RenderFrame::collect(&Scene::new(), &camera(), 0.0);
        assert!(frame.commands.is_empty());
        assert!(frame.orientation().is_none());
    }

    #[test]
    fn collects_sphere_points_and_arcs() {
        let mut globe = GlobeObject::default();
        let points = derive_points(Catalog::builtin().locations());
        let n = points.len();
        globe.set_points_data(points.into(), PointLayerConfig::default());
        globe.set_arcs_data(vec![ArcDatum {
            id: ArcId::new(0),
            start_index: 0,
            end_index: 1,
            start: LatLon::new(47.0, 8.0),
            end: LatLon::new(39.0, -77.0),
            color: [1.0; 4],
            span: TimeSpan::starting_at(Time::from_ms(1000.0), 4000.0),
        }]);
        let mut scene = Scene::new();
        scene.add_globe(globe);

        let frame = RenderFrame::collect(&scene, &camera(), 1750.0);
        assert!(matches!(frame.commands[0], RenderCommand::Sphere { .. }));
        assert_eq!(frame.point_count(), n);
        assert_eq!(frame.arc_count(), 1);

        let phase = frame.commands.iter().find_map(|c| match c {
            RenderCommand::Arc { dash_phase, .. } => Some(*dash_phase),
            _ => None,
        });
        assert!((phase.unwrap() - 0.5).abs() < 1e-6);
    }
}
