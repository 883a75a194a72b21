// scene/scene.rs
use glam::Vec3;
use hecs::{Entity, World};

use super::builder::EntityBuilder;
use super::components::*;
use super::lights::LightingRig;
use crate::asset::{AssetCache, Handle};
use crate::renderer::{MeshId, RenderGraph};
use crate::scene::Transform;

pub type GraphId = Handle<RenderGraph>;

/// Drawable entities, their render graphs and the lights that shade them.
pub struct Scene {
    world: World,
    graphs: AssetCache<RenderGraph>,
    draw_order: Vec<Entity>,
    lighting_rig: LightingRig,
}

impl Scene {
    pub fn new() -> Self {
        let mut world = World::new();
        let ambient = world.spawn((AmbientLight::default(), Name::new("Ambient")));

        Self {
            world,
            graphs: AssetCache::new(),
            draw_order: Vec::new(),
            lighting_rig: LightingRig::new(ambient),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    // ========================================================================
    // Render graphs and drawable entities
    // ========================================================================

    pub fn create_render_graph(&mut self) -> GraphId {
        self.graphs.insert(RenderGraph::new())
    }

    pub fn render_graph(&self, graph: GraphId) -> Option<&RenderGraph> {
        self.graphs.get(graph)
    }

    pub fn render_graph_mut(&mut self, graph: GraphId) -> Option<&mut RenderGraph> {
        self.graphs.get_mut(graph)
    }

    /// Spawns a shadow-receiving entity drawn with `graph`.
    pub fn create_entity(&mut self, graph: GraphId, mesh: MeshId, transform: Transform) -> Entity {
        self.spawn_entity(graph, mesh).with_transform(transform).spawn()
    }

    pub fn spawn_entity(&mut self, graph: GraphId, mesh: MeshId) -> EntityBuilder<'_> {
        EntityBuilder::new(self, graph, mesh)
    }

    pub(crate) fn spawn_drawable(&mut self, bundle: hecs::BuiltEntity<'_>) -> Entity {
        let entity = self.world.spawn(bundle);
        self.draw_order.push(entity);
        entity
    }

    /// Drawable entities in creation order.
    pub fn entities(&self) -> impl Iterator<Item = (GraphId, Entity)> + '_ {
        self.draw_order.iter().filter_map(move |&entity| {
            self.world
                .get::<&RenderGraphComponent>(entity)
                .ok()
                .map(|graph| (graph.0, entity))
        })
    }

    pub fn entity_count(&self) -> usize {
        self.entities().count()
    }

    pub fn despawn(&mut self, entity: Entity) -> bool {
        self.draw_order.retain(|&e| e != entity);
        self.lighting_rig.point_lights.retain(|&e| e != entity);
        self.lighting_rig.directional_lights.retain(|&e| e != entity);
        self.world.despawn(entity).is_ok()
    }

    pub fn mesh(&self, entity: Entity) -> Option<MeshId> {
        self.world
            .get::<&MeshComponent>(entity)
            .ok()
            .map(|mesh| mesh.0)
    }

    pub fn receives_shadow(&self, entity: Entity) -> bool {
        self.world
            .get::<&ShadowReceiver>(entity)
            .map(|receiver| receiver.0)
            .unwrap_or(false)
    }

    // ========================================================================
    // Lighting
    // ========================================================================

    pub fn lighting_rig(&self) -> &LightingRig {
        &self.lighting_rig
    }

    pub fn ambient_light(&self) -> AmbientLight {
        self.world
            .get::<&AmbientLight>(self.lighting_rig.ambient_light)
            .map(|light| *light)
            .unwrap_or_default()
    }

    pub fn set_ambient_light(&mut self, color: Vec3) {
        let ambient = self.lighting_rig.ambient_light;
        if let Ok(mut light) = self.world.get::<&mut AmbientLight>(ambient) {
            light.color = color;
        }
    }

    pub fn add_point_light(&mut self, light: PointLight, position: Vec3) -> Entity {
        let entity = self.world.spawn((
            light,
            TransformComponent(Transform::from_translation(position)),
        ));
        self.lighting_rig.point_lights.push(entity);
        entity
    }

    pub fn add_directional_light(&mut self, light: DirectionalLight, casts_shadows: bool) -> Entity {
        let entity = self.world.spawn((light, CastsShadow(casts_shadows)));
        self.lighting_rig.directional_lights.push(entity);
        entity
    }

    pub fn directional_light(&self, entity: Entity) -> Option<DirectionalLight> {
        self.world
            .get::<&DirectionalLight>(entity)
            .ok()
            .map(|light| *light)
    }

    pub fn casts_shadows(&self, entity: Entity) -> bool {
        self.world
            .get::<&CastsShadow>(entity)
            .map(|casts| casts.0)
            .unwrap_or(false)
    }

    /// Directional lights that cast shadows, with their shadow cameras.
    pub fn shadow_casters(&self) -> impl Iterator<Item = (Entity, DirectionalLight)> + '_ {
        self.lighting_rig
            .directional_lights
            .iter()
            .filter(move |&&entity| self.casts_shadows(entity))
            .filter_map(move |&entity| self.directional_light(entity).map(|light| (entity, light)))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
