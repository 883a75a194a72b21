pub mod asset;
pub mod renderer;
pub mod scene;
pub mod settings;

pub use renderer::{
    BuildError, HeadlessBackend, PassId, RenderCommand, RenderPass, RenderQueueBuilder,
};
pub use scene::{Scene, SceneId, SceneStore};
pub use settings::RenderQueueSettings;

/// Installs `env_logger` at `info` unless `RUST_LOG` says otherwise.
/// Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}
