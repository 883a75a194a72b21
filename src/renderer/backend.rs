// renderer/backend.rs
// Capability traits the queue builder uses to talk to a graphics backend.

use crate::renderer::command::EntityRef;
use crate::renderer::render_graph::RenderGraph;
use crate::scene::LightType;

macro_rules! backend_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            pub fn index(self) -> u32 {
                self.0
            }
        }
    };
}

backend_id!(
    /// Colour + depth render target owned by the backend.
    TargetId
);
backend_id!(
    /// Compiled shader/material for one draw.
    MaterialId
);
backend_id!(
    /// Vertex/index data registered with the backend.
    MeshId
);
backend_id!(
    /// Sampled texture, e.g. a sky-box cube map.
    TextureId
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    TargetAllocation { width: u32, height: u32, reason: String },
    HybridTarget(String),
    MaterialCreation(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::TargetAllocation {
                width,
                height,
                reason,
            } => write!(
                f,
                "Failed to allocate {}x{} render target: {}",
                width, height, reason
            ),
            BackendError::HybridTarget(e) => write!(f, "Failed to create hybrid target: {}", e),
            BackendError::MaterialCreation(e) => write!(f, "Failed to create material: {}", e),
        }
    }
}

impl std::error::Error for BackendError {}

/// Allocates render targets. Ownership of every returned target passes to
/// the caller of the queue builder.
pub trait TargetAllocator {
    fn create_render_target(&mut self, width: u32, height: u32) -> Result<TargetId, BackendError>;

    /// Builds a target that renders colour into `colour` (`None` is the
    /// default framebuffer) while using the depth attachment of
    /// `depth_source`.
    fn create_hybrid_render_target(
        &mut self,
        colour: Option<TargetId>,
        depth_source: TargetId,
    ) -> Result<TargetId, BackendError>;
}

/// Everything a backend needs to compile (or look up) the material for one
/// draw.
#[derive(Clone, Copy)]
pub struct MaterialRequest<'a> {
    pub render_graph: &'a RenderGraph,
    pub entity: EntityRef,
    pub mesh: MeshId,
    pub colour_target: Option<TargetId>,
    pub light_type: LightType,
    /// Also write view-space normals (ambient passes with a normal target).
    pub normal_output: bool,
    /// Also write view-space positions (ambient passes with a position target).
    pub position_output: bool,
}

pub trait MaterialFactory {
    fn create_material(&mut self, request: &MaterialRequest<'_>)
        -> Result<MaterialId, BackendError>;
}

/// Anything that can both allocate targets and build materials.
pub trait RenderBackend: TargetAllocator + MaterialFactory {}

impl<T: TargetAllocator + MaterialFactory> RenderBackend for T {}

/// Meshes the builder instantiates for synthesized entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveMeshes {
    /// Unit quad scaled to the frame for full-screen passes.
    pub quad: MeshId,
    /// Unit cube used for sky boxes.
    pub cube: MeshId,
}
