use glam::Vec3;

use crate::scene::components::DirectionalLight;
use crate::scene::{Camera, Projection};

/// Distance from the scene origin at which a directional shadow camera sits.
pub const SHADOW_DISTANCE: f32 = 30.0;
/// Width and height of the area a directional shadow map covers.
pub const SHADOW_SIZE: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightType {
    Ambient,
    Point,
    Directional,
}

impl DirectionalLight {
    /// Orthographic camera looking along the light direction at the origin.
    pub fn shadow_camera(&self) -> Camera {
        let direction = self.direction.try_normalize().unwrap_or(Vec3::NEG_Y);
        let eye = -direction * SHADOW_DISTANCE;

        let up = if direction.abs().dot(Vec3::Y) > 0.95 {
            Vec3::Z
        } else {
            Vec3::Y
        };

        Camera {
            eye,
            target: Vec3::ZERO,
            up,
            projection: Projection::Orthographic {
                width: SHADOW_SIZE,
                height: SHADOW_SIZE,
            },
            near: 0.1,
            far: SHADOW_DISTANCE * 2.0,
        }
    }
}

/// Lights of one scene in insertion order. Every scene has exactly one
/// ambient light.
#[derive(Debug, Clone)]
pub struct LightingRig {
    pub(crate) ambient_light: hecs::Entity,
    pub(crate) point_lights: Vec<hecs::Entity>,
    pub(crate) directional_lights: Vec<hecs::Entity>,
}

impl LightingRig {
    pub(crate) fn new(ambient_light: hecs::Entity) -> Self {
        Self {
            ambient_light,
            point_lights: Vec::new(),
            directional_lights: Vec::new(),
        }
    }

    pub fn ambient_light(&self) -> hecs::Entity {
        self.ambient_light
    }

    pub fn point_lights(&self) -> &[hecs::Entity] {
        &self.point_lights
    }

    pub fn directional_lights(&self) -> &[hecs::Entity] {
        &self.directional_lights
    }
}
