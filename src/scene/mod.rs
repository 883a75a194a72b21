// scene/mod.rs

pub mod builder;
pub mod camera;
pub mod components;
pub mod lights;
pub mod scene;
pub mod store;
pub mod transform;

pub use builder::EntityBuilder;
pub use camera::{Camera, CameraType, Projection};
pub use lights::{LightType, LightingRig, SHADOW_DISTANCE, SHADOW_SIZE};
pub use scene::{GraphId, Scene};
pub use store::{SceneId, SceneStore};
pub use transform::Transform;

pub use components::{
    AmbientLight, CastsShadow, DirectionalLight, MeshComponent, Name, PointLight,
    RenderGraphComponent, ShadowReceiver, TransformComponent,
};
