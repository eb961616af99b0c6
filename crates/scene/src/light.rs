use foundation::math::Vec3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Light {
    Ambient {
        color: [f32; 3],
        intensity: f32,
    },
    Directional {
        color: [f32; 3],
        intensity: f32,
        position: Vec3,
    },
}

impl Light {
    pub fn ambient(intensity: f32) -> Self {
        Light::Ambient {
            color: [1.0, 1.0, 1.0],
            intensity,
        }
    }

    pub fn directional(intensity: f32, position: Vec3) -> Self {
        Light::Directional {
            color: [1.0, 1.0, 1.0],
            intensity,
            position,
        }
    }
}
