// scene/components.rs
// hecs components stored on scene entities

use glam::Vec3;

use crate::renderer::MeshId;
use crate::scene::{GraphId, Transform};

// ============================================================================
// Drawable Components
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct TransformComponent(pub Transform);

#[derive(Debug, Clone, Copy)]
pub struct MeshComponent(pub MeshId);

/// Render graph (owned by the same scene) that shades this entity.
#[derive(Debug, Clone, Copy)]
pub struct RenderGraphComponent(pub GraphId);

/// Whether directional-light draws of this entity sample a shadow map.
#[derive(Debug, Clone, Copy)]
pub struct ShadowReceiver(pub bool);

impl Default for ShadowReceiver {
    fn default() -> Self {
        Self(true)
    }
}

// ============================================================================
// Lighting Components
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Vec3,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Vec3::splat(0.03),
        }
    }
}

/// Point light; position comes from the entity's [`TransformComponent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: Vec3,
    pub intensity: f32,
    pub range: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

/// Marks a directional light as rendering a shadow map each frame.
#[derive(Debug, Clone, Copy)]
pub struct CastsShadow(pub bool);

// ============================================================================
// Utility Components
// ============================================================================

/// Name component for debugging
#[derive(Debug, Clone)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
