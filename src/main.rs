mod demo_scenes;

use clap::Parser;
use demo_scenes::DemoScene;
use log::{error, info};
use render_queue::renderer::{HeadlessBackend, RenderCommand, RenderQueueBuilder};
use render_queue::scene::SceneStore;
use render_queue::settings::RenderQueueSettings;

#[derive(Parser, Debug)]
#[command(name = "render-queue", version, about = "Compile a demo frame into a render command stream")]
struct CliArgs {
    /// Demo frame to compile
    #[arg(value_enum, default_value = "shadows")]
    scene: DemoScene,
}

fn main() {
    let args = CliArgs::parse();
    render_queue::init_logging();

    let demo = args.scene;

    let settings = RenderQueueSettings::load();
    let mut scenes = SceneStore::new();
    let mut passes = demo.setup(&mut scenes);
    let mut builder = RenderQueueBuilder::new(
        settings,
        HeadlessBackend::new(),
        HeadlessBackend::primitive_meshes(),
    );

    info!("Compiling {:?} with {} passes", demo, passes.len());

    let commands = match builder.build(&mut scenes, &mut passes) {
        Ok(commands) => commands,
        Err(err) => {
            error!("Render queue build failed: {err}");
            std::process::exit(1);
        }
    };

    for (index, pass) in passes.iter().enumerate() {
        info!(
            "pass {:>3}: scene {:?} colour {:?} flags {:?}",
            index, pass.scene, pass.colour_target, pass.flags
        );
    }
    for command in &commands {
        match command {
            RenderCommand::Draw(draw) => info!(
                "  DRAW pass {} material {:?} light {:?}/{:?} shadow {:?}",
                draw.pass.0, draw.material, draw.light.light_type, draw.light.entity, draw.shadow_map
            ),
            other => info!("{:?}", other),
        }
    }

    let backend = builder.backend();
    info!(
        "{} commands, {} passes, {} targets, {} hybrid targets, {} materials",
        commands.len(),
        passes.len(),
        backend.targets().len(),
        backend.hybrids().len(),
        backend.materials().len()
    );
}
