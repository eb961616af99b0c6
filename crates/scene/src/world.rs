use crate::camera::PerspectiveCamera;
use crate::light::Light;
use crate::prefabs::GlobeObject;

/// Scene graph root for the globe view.
#[derive(Debug, Default)]
pub struct Scene {
    lights: Vec<Light>,
    globe: Option<GlobeObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Attach the globe; replaces any previous one.
    pub fn add_globe(&mut self, globe: GlobeObject) {
        self.globe = Some(globe);
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn globe(&self) -> Option<&GlobeObject> {
        self.globe.as_ref()
    }

    pub fn globe_mut(&mut self) -> Option<&mut GlobeObject> {
        self.globe.as_mut()
    }
}

/// Scene plus the camera that views it.
#[derive(Debug)]
pub struct SceneGraph {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
}
