use std::collections::HashMap;

use super::{BuildError, RenderQueueBuilder};
use crate::renderer::backend::{RenderBackend, TargetId};
use crate::renderer::command::LightRef;
use crate::renderer::pass::{RenderPass, RenderPassFlags};
use crate::renderer::post_processing::PostProcessingDescription;
use crate::scene::{LightType, SceneStore};

/// Directional light -> depth target rendered from that light this frame.
///
/// A missing entry means the light has no shadow map this frame; receivers
/// are then drawn unshadowed.
#[derive(Debug, Clone, Default)]
pub struct ShadowMaps {
    maps: HashMap<LightRef, TargetId>,
}

impl ShadowMaps {
    pub fn get(&self, light: &LightRef) -> Option<TargetId> {
        self.maps.get(light).copied()
    }

    pub fn contains(&self, light: &LightRef) -> bool {
        self.maps.contains_key(light)
    }

    pub fn insert(&mut self, light: LightRef, target: TargetId) {
        self.maps.insert(light, target);
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

impl<B: RenderBackend> RenderQueueBuilder<B> {
    /// Queues a depth-only pass for each shadow-casting directional light in
    /// `pass`'s scene that does not have a shadow map yet.
    pub(super) fn add_shadow_passes(
        &mut self,
        scenes: &SceneStore,
        pass: &RenderPass,
        pre_passes: &mut Vec<RenderPass>,
        shadow_maps: &mut ShadowMaps,
    ) -> Result<(), BuildError> {
        let scene = scenes
            .get(pass.scene)
            .ok_or(BuildError::UnknownScene(pass.scene))?;
        let size = self.settings.shadow_map_size;

        for (entity, light) in scene.shadow_casters() {
            let key = LightRef {
                scene: pass.scene,
                entity,
                light_type: LightType::Directional,
            };
            if shadow_maps.contains(&key) {
                continue;
            }

            let target = self.backend.create_render_target(size, size)?;
            pre_passes.push(RenderPass {
                camera: light.shadow_camera(),
                colour_target: Some(target),
                normal_target: None,
                position_target: None,
                flags: RenderPassFlags::DEPTH_ONLY
                    | RenderPassFlags::CLEAR_COLOUR
                    | RenderPassFlags::CLEAR_DEPTH,
                sky_box: None,
                post_processing: PostProcessingDescription::default(),
                ..*pass
            });
            shadow_maps.insert(key, target);

            log::debug!(
                "Shadow pass for light {:?} in scene {:?} -> target {:?} ({}x{})",
                entity,
                pass.scene,
                target,
                size,
                size
            );
        }

        Ok(())
    }
}
