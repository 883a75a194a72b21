use super::post_process::ChainSeed;
use super::{BuildError, RenderQueueBuilder};
use crate::renderer::backend::RenderBackend;
use crate::renderer::pass::{RenderPass, RenderPassFlags};
use crate::renderer::post_processing::{AmbientOcclusionDescription, PostProcessingDescription};
use crate::renderer::render_graph::RenderNode;
use crate::scene::SceneStore;

impl<B: RenderBackend> RenderQueueBuilder<B> {
    /// Queues the geometry pre-pass and the occlusion pass for `pass`, then
    /// retargets `pass` so its lighting accumulates on top of the occlusion
    /// result.
    ///
    /// The occlusion pass replaces the ambient term, so `pass` keeps its
    /// ambient-occlusion description and the encoder skips its ambient draws.
    ///
    /// When `pass` also has a post-processing chain, the occlusion result goes
    /// to a fresh target that seeds the chain, and the returned seed carries
    /// the intended colour target on to the chain's last stage.
    pub(super) fn add_ambient_occlusion_passes(
        &mut self,
        scenes: &mut SceneStore,
        pass: &mut RenderPass,
        description: AmbientOcclusionDescription,
        pre_passes: &mut Vec<RenderPass>,
    ) -> Result<Option<ChainSeed>, BuildError> {
        let (width, height) = self.frame_size();
        let normal_target = self.backend.create_render_target(width, height)?;
        let position_target = self.backend.create_render_target(width, height)?;

        // Same scene and camera, but only depth plus normals/positions.
        pre_passes.push(RenderPass {
            colour_target: None,
            normal_target: Some(normal_target),
            position_target: Some(position_target),
            flags: pass.flags | RenderPassFlags::DEPTH_ONLY | RenderPassFlags::CLEAR_COLOUR,
            sky_box: None,
            post_processing: PostProcessingDescription::default(),
            ..*pass
        });

        // Fresh target: its depth is fused into `pass` below, so it must
        // outlive every post-processing chain of this frame.
        let data_target = self.backend.create_render_target(width, height)?;
        self.push_full_screen_pass(scenes, pre_passes, data_target, |graph, input| {
            let colour = graph.texture(input);
            let normal = graph.texture(normal_target);
            let position = graph.texture(position_target);
            graph.set_render_node(RenderNode::AmbientOcclusion {
                colour,
                normal,
                position,
                description,
            });
        })?;

        let seed = if pass.post_processing.chain_length() > 0 {
            Some(ChainSeed {
                input: self.backend.create_render_target(width, height)?,
                output: pass.colour_target,
            })
        } else {
            None
        };
        let occlusion_target = seed.map_or(pass.colour_target, |seed| Some(seed.input));

        // The occlusion pass reconstructs view-space data, so it keeps the
        // scene's projection rather than the full-screen orthographic one.
        if let Some(occlusion_pass) = pre_passes.last_mut() {
            occlusion_pass.camera = pass.camera;
            occlusion_pass.colour_target = occlusion_target;
        }

        let hybrid = self
            .backend
            .create_hybrid_render_target(occlusion_target, data_target)?;
        log::debug!(
            "Ambient occlusion for scene {:?}: normals {:?}, positions {:?}, depth {:?}, occlusion {:?}, hybrid {:?}",
            pass.scene,
            normal_target,
            position_target,
            data_target,
            occlusion_target,
            hybrid
        );

        pass.colour_target = Some(hybrid);
        pass.flags
            .remove(RenderPassFlags::CLEAR_COLOUR | RenderPassFlags::CLEAR_DEPTH);

        Ok(seed)
    }
}
