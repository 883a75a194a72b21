// scene/builder.rs
// Fluent helper for spawning drawable entities into a Scene

use hecs::Entity;

use super::components::*;
use super::scene::{GraphId, Scene};
use crate::renderer::MeshId;
use crate::scene::Transform;

/// Collects the components of one drawable entity, then spawns it and
/// appends it to the scene's draw order.
pub struct EntityBuilder<'s> {
    scene: &'s mut Scene,
    graph: GraphId,
    mesh: MeshId,
    transform: Transform,
    receive_shadow: bool,
    name: Option<Name>,
}

impl<'s> EntityBuilder<'s> {
    pub(crate) fn new(scene: &'s mut Scene, graph: GraphId, mesh: MeshId) -> Self {
        Self {
            scene,
            graph,
            mesh,
            transform: Transform::default(),
            receive_shadow: ShadowReceiver::default().0,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(Name::new(name));
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Whether directional-light draws should sample a shadow map.
    pub fn receive_shadow(mut self, receive: bool) -> Self {
        self.receive_shadow = receive;
        self
    }

    pub fn spawn(self) -> Entity {
        let mut builder = hecs::EntityBuilder::new();
        builder
            .add(RenderGraphComponent(self.graph))
            .add(MeshComponent(self.mesh))
            .add(TransformComponent(self.transform))
            .add(ShadowReceiver(self.receive_shadow));
        if let Some(name) = self.name {
            builder.add(name);
        }
        self.scene.spawn_drawable(builder.build())
    }
}
