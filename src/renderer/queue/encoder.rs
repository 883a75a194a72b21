use glam::Vec3;

use super::{BuildError, RenderQueueBuilder, ShadowMaps};
use crate::renderer::backend::{MaterialRequest, RenderBackend, TargetId, TextureId};
use crate::renderer::command::{DrawCommand, EntityRef, LightRef, PassId, RenderCommand};
use crate::renderer::pass::RenderPass;
use crate::renderer::render_graph::RenderNode;
use crate::scene::{LightType, Scene, SceneStore, Transform};

impl<B: RenderBackend> RenderQueueBuilder<B> {
    /// Linearizes `passes` in order and terminates the stream with a single
    /// [`RenderCommand::Present`].
    pub(super) fn encode_passes(
        &mut self,
        scenes: &mut SceneStore,
        passes: &[RenderPass],
        shadow_maps: &ShadowMaps,
    ) -> Result<Vec<RenderCommand>, BuildError> {
        let mut commands = Vec::new();

        for (index, pass) in passes.iter().enumerate() {
            let id = PassId(index);
            let first = commands.len();
            commands.push(RenderCommand::PassStart { pass: id });

            let scene = scenes
                .get(pass.scene)
                .ok_or(BuildError::UnknownScene(pass.scene))?;

            if !pass.suppresses_ambient() {
                self.encode_light_pass(id, pass, scene, LightType::Ambient, shadow_maps, &mut commands)?;
            }

            if !pass.depth_only() {
                let rig = scene.lighting_rig();
                if !rig.point_lights().is_empty() {
                    self.encode_light_pass(id, pass, scene, LightType::Point, shadow_maps, &mut commands)?;
                }
                if !rig.directional_lights().is_empty() {
                    self.encode_light_pass(
                        id,
                        pass,
                        scene,
                        LightType::Directional,
                        shadow_maps,
                        &mut commands,
                    )?;
                }

                if let Some(texture) = pass.sky_box {
                    self.encode_sky_box(scenes, id, pass, texture, &mut commands)?;
                }
            }

            commands.push(RenderCommand::PassEnd { pass: id });
            log::trace!(
                "Encoded pass {} (scene {:?}): {} commands",
                index,
                pass.scene,
                commands.len() - first
            );
        }

        commands.push(RenderCommand::Present);
        Ok(commands)
    }

    /// One material per entity, then one draw per light of `light_type`.
    fn encode_light_pass(
        &mut self,
        id: PassId,
        pass: &RenderPass,
        scene: &Scene,
        light_type: LightType,
        shadow_maps: &ShadowMaps,
        commands: &mut Vec<RenderCommand>,
    ) -> Result<(), BuildError> {
        let ambient = light_type == LightType::Ambient;
        let rig = scene.lighting_rig();

        for (graph, entity) in scene.entities() {
            let malformed = BuildError::MalformedEntity {
                scene: pass.scene,
                entity,
            };
            let render_graph = scene.render_graph(graph).ok_or_else(|| malformed.clone())?;
            let mesh = scene.mesh(entity).ok_or(malformed)?;
            let entity_ref = EntityRef {
                scene: pass.scene,
                entity,
            };

            let material = self.backend.create_material(&MaterialRequest {
                render_graph,
                entity: entity_ref,
                mesh,
                colour_target: pass.colour_target,
                light_type,
                normal_output: ambient && pass.normal_target.is_some(),
                position_output: ambient && pass.position_target.is_some(),
            })?;

            let draw = |light: hecs::Entity, shadow_map: Option<TargetId>| {
                RenderCommand::Draw(DrawCommand {
                    pass: id,
                    material,
                    entity: entity_ref,
                    light: LightRef {
                        scene: pass.scene,
                        entity: light,
                        light_type,
                    },
                    shadow_map,
                })
            };

            match light_type {
                LightType::Ambient => commands.push(draw(rig.ambient_light(), None)),
                LightType::Point => {
                    for &light in rig.point_lights() {
                        commands.push(draw(light, None));
                    }
                }
                LightType::Directional => {
                    let receives_shadow = scene.receives_shadow(entity);
                    for &light in rig.directional_lights() {
                        let shadow_map = if receives_shadow {
                            let key = LightRef {
                                scene: pass.scene,
                                entity: light,
                                light_type,
                            };
                            let map = shadow_maps.get(&key);
                            if map.is_none() {
                                log::trace!(
                                    "No shadow map for light {:?}; drawing {:?} unshadowed",
                                    light,
                                    entity
                                );
                            }
                            map
                        } else {
                            None
                        };
                        commands.push(draw(light, shadow_map));
                    }
                }
            }
        }

        Ok(())
    }

    /// Half-unit cube around the camera, lit by the pass scene's ambient light.
    fn encode_sky_box(
        &mut self,
        scenes: &mut SceneStore,
        id: PassId,
        pass: &RenderPass,
        texture: TextureId,
        commands: &mut Vec<RenderCommand>,
    ) -> Result<(), BuildError> {
        let ambient_light = scenes
            .get(pass.scene)
            .ok_or(BuildError::UnknownScene(pass.scene))?
            .lighting_rig()
            .ambient_light();

        let scene_id = scenes.create_frame_scene();
        let scene = scenes
            .get_mut(scene_id)
            .ok_or(BuildError::UnknownScene(scene_id))?;
        let graph = scene.create_render_graph();
        if let Some(render_graph) = scene.render_graph_mut(graph) {
            render_graph.set_render_node(RenderNode::SkyBox { texture });
        }
        let entity = scene
            .spawn_entity(graph, self.meshes.cube)
            .with_name("SkyBox")
            .with_transform(Transform::from_scale(Vec3::splat(0.5)))
            .receive_shadow(false)
            .spawn();

        let render_graph = scene
            .render_graph(graph)
            .ok_or(BuildError::MalformedEntity { scene: scene_id, entity })?;
        let entity_ref = EntityRef {
            scene: scene_id,
            entity,
        };
        let material = self.backend.create_material(&MaterialRequest {
            render_graph,
            entity: entity_ref,
            mesh: self.meshes.cube,
            colour_target: pass.colour_target,
            light_type: LightType::Ambient,
            normal_output: false,
            position_output: false,
        })?;

        commands.push(RenderCommand::Draw(DrawCommand {
            pass: id,
            material,
            entity: entity_ref,
            light: LightRef {
                scene: pass.scene,
                entity: ambient_light,
                light_type: LightType::Ambient,
            },
            shadow_map: None,
        }));

        Ok(())
    }
}
