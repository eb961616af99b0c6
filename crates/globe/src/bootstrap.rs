use std::rc::Rc;

use foundation::math::Vec3;
use layers::Point;
use scene::components::Orientation;
use scene::prefabs::GlobeObject;
use scene::{Light, PerspectiveCamera, Scene, SceneGraph};

use crate::config::GlobeConfig;

const AMBIENT_INTENSITY: f32 = 0.8;
const DIRECTIONAL_INTENSITY: f32 = 0.6;

/// Build the scene, camera, lights and globe for a surface of the given size.
///
/// The point layer is bound here, once; the arc layer starts empty.
pub fn build_scene_graph(config: &GlobeConfig, points: Rc<[Point]>, width: u32, height: u32) -> SceneGraph {
    let mut scene = Scene::new();
    scene.add_light(Light::ambient(AMBIENT_INTENSITY));
    scene.add_light(Light::directional(
        DIRECTIONAL_INTENSITY,
        Vec3::new(-200.0, 500.0, 200.0),
    ));

    let mut globe = GlobeObject::new(config.globe_radius);
    globe.orientation = Orientation::identity().with_pitch_limit(config.interaction.pitch_clamp_rad);
    globe.set_points_data(points, config.point_layer);
    globe.set_arc_config(config.arc_layer);
    globe.set_arcs_data(Vec::new());
    scene.add_globe(globe);

    let aspect = if height == 0 { 1.0 } else { f64::from(width) / f64::from(height) };
    let camera = PerspectiveCamera::new(config.camera.fov_deg, aspect, config.camera.near, config.camera.far)
        .at_distance(config.camera.distance);

    SceneGraph { scene, camera }
}
