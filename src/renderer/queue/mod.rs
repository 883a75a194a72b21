// renderer/queue/mod.rs
// Compiles a frame's render passes into a linear command stream.
//
// Stages, in order:
//   1. shadows            one depth pass per shadow-casting directional light
//   2. ambient_occlusion  geometry pre-pass + occlusion pass for AO passes
//   3. post_process       bloom / colour adjust / AA chains after each pass
//   4. encoder            PASS_START, per-light DRAWs, sky box, PASS_END, PRESENT

mod ambient_occlusion;
mod encoder;
mod post_process;
mod shadows;

pub use shadows::ShadowMaps;

use glam::Vec3;

use crate::renderer::backend::{BackendError, PrimitiveMeshes, RenderBackend, TargetId};
use crate::renderer::command::{validate_commands, RenderCommand};
use crate::renderer::pass::RenderPass;
use crate::renderer::post_processing::MAX_BLOOM_ITERATIONS;
use crate::renderer::render_graph::RenderGraph;
use crate::scene::{Camera, SceneId, SceneStore, Transform};
use crate::settings::RenderQueueSettings;

#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// A pass names a scene that is not in the store (or an expired frame scene).
    UnknownScene(SceneId),
    /// The pass at this index has a camera with a singular view or projection.
    InvalidCamera { pass: usize },
    /// The pass at this index asks for more bloom blur passes than allowed.
    InvalidPostProcessing { pass: usize },
    /// A drawable entity lost its render graph or mesh.
    MalformedEntity {
        scene: SceneId,
        entity: hecs::Entity,
    },
    Backend(BackendError),
}

impl From<BackendError> for BuildError {
    fn from(e: BackendError) -> Self {
        BuildError::Backend(e)
    }
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::UnknownScene(scene) => write!(f, "Unknown scene {:?}", scene),
            BuildError::InvalidCamera { pass } => write!(f, "Pass {} has an invalid camera", pass),
            BuildError::InvalidPostProcessing { pass } => write!(
                f,
                "Pass {} asks for more than {} bloom iterations",
                pass, MAX_BLOOM_ITERATIONS
            ),
            BuildError::MalformedEntity { scene, entity } => write!(
                f,
                "Entity {:?} in scene {:?} is missing its render graph or mesh",
                entity, scene
            ),
            BuildError::Backend(e) => write!(f, "Backend error: {}", e),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Backend(e) => Some(e),
            _ => None,
        }
    }
}

pub struct RenderQueueBuilder<B> {
    settings: RenderQueueSettings,
    backend: B,
    meshes: PrimitiveMeshes,
}

impl<B: RenderBackend> RenderQueueBuilder<B> {
    pub fn new(settings: RenderQueueSettings, backend: B, meshes: PrimitiveMeshes) -> Self {
        Self {
            settings: settings.validate(),
            backend,
            meshes,
        }
    }

    pub fn settings(&self) -> &RenderQueueSettings {
        &self.settings
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.settings.resolution.width = width;
        self.settings.resolution.height = height;
        self.settings = self.settings.clone().validate();
    }

    /// Expands `passes` with every auxiliary pass the frame needs and
    /// returns the command stream that renders them.
    ///
    /// On success `passes` holds the expanded, ordered pass list and each
    /// command's [`PassId`](crate::renderer::PassId) indexes into it. On
    /// error `passes` is left untouched and nothing built so far should be
    /// used. Frame scenes from the previous build are dropped first, so the
    /// previous command stream must not be replayed after calling this.
    pub fn build(
        &mut self,
        scenes: &mut SceneStore,
        passes: &mut Vec<RenderPass>,
    ) -> Result<Vec<RenderCommand>, BuildError> {
        scenes.begin_frame();
        Self::check_passes(scenes, passes)?;

        let mut shadow_maps = ShadowMaps::default();
        let mut pre_passes = Vec::new();
        let mut scene_passes = passes.clone();
        let mut seeds = Vec::with_capacity(scene_passes.len());

        for pass in scene_passes.iter_mut() {
            self.add_shadow_passes(scenes, pass, &mut pre_passes, &mut shadow_maps)?;

            let seed = match pass.post_processing.ambient_occlusion {
                Some(description) => {
                    self.add_ambient_occlusion_passes(scenes, pass, description, &mut pre_passes)?
                }
                None => None,
            };
            seeds.push(seed);
        }

        let pre_pass_count = pre_passes.len();
        pre_passes.extend(scene_passes);
        let mut chain_seeds = vec![None; pre_pass_count];
        chain_seeds.extend(seeds);
        let expanded = self.add_post_processing_passes(scenes, pre_passes, &chain_seeds)?;
        let commands = self.encode_passes(scenes, &expanded, &shadow_maps)?;

        debug_assert!(
            validate_commands(&commands).is_ok(),
            "malformed command stream: {:?}",
            validate_commands(&commands)
        );

        log::debug!(
            "Render queue: {} caller passes -> {} passes ({} pre-passes, {} shadow maps), {} commands",
            passes.len(),
            expanded.len(),
            pre_pass_count,
            shadow_maps.len(),
            commands.len()
        );

        *passes = expanded;
        Ok(commands)
    }

    fn check_passes(scenes: &SceneStore, passes: &[RenderPass]) -> Result<(), BuildError> {
        for (index, pass) in passes.iter().enumerate() {
            if !scenes.contains(pass.scene) {
                return Err(BuildError::UnknownScene(pass.scene));
            }
            if !pass.camera.is_valid() {
                return Err(BuildError::InvalidCamera { pass: index });
            }
            if !pass.post_processing.is_valid() {
                return Err(BuildError::InvalidPostProcessing { pass: index });
            }
        }
        Ok(())
    }

    fn frame_size(&self) -> (u32, u32) {
        (
            self.settings.resolution.width,
            self.settings.resolution.height,
        )
    }

    /// Points the last pass of `passes` at `input` and appends a full-screen
    /// pass whose graph (built by `build_graph`) reads it. The new pass has
    /// no colour target until the next stage or the caller assigns one.
    fn push_full_screen_pass<F>(
        &mut self,
        scenes: &mut SceneStore,
        passes: &mut Vec<RenderPass>,
        input: TargetId,
        build_graph: F,
    ) -> Result<(), BuildError>
    where
        F: FnOnce(&mut RenderGraph, TargetId),
    {
        let (width, height) = self.frame_size();

        if let Some(previous) = passes.last_mut() {
            previous.colour_target = Some(input);
        }

        let scene_id = scenes.create_frame_scene();
        let scene = scenes
            .get_mut(scene_id)
            .ok_or(BuildError::UnknownScene(scene_id))?;
        let graph = scene.create_render_graph();
        if let Some(render_graph) = scene.render_graph_mut(graph) {
            build_graph(render_graph, input);
        }
        scene
            .spawn_entity(graph, self.meshes.quad)
            .with_name("FullScreenQuad")
            .with_transform(Transform::from_scale(Vec3::new(
                width as f32,
                height as f32,
                1.0,
            )))
            .receive_shadow(false)
            .spawn();

        passes.push(RenderPass::new(
            scene_id,
            Camera::full_screen(width, height),
        ));
        Ok(())
    }
}
