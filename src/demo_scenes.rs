use glam::{Quat, Vec3};
use log::info;
use render_queue::renderer::{
    AmbientOcclusionDescription, BloomDescription, ColourAdjustDescription, MeshId,
    PostProcessingDescription, RenderPass, RenderPassFlags, TextureId,
};
use render_queue::scene::{Camera, DirectionalLight, PointLight, Scene, SceneStore, Transform};

const CUBE_MESH: MeshId = MeshId(2);
const SPHERE_MESH: MeshId = MeshId(3);
const SKY_TEXTURE: TextureId = TextureId(0);

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoScene {
    Simple,
    Shadows,
    Bloom,
    Ssao,
    Full,
}

impl DemoScene {
    /// Fills `scenes` and returns the passes to compile for one frame.
    pub fn setup(self, scenes: &mut SceneStore) -> Vec<RenderPass> {
        match self {
            DemoScene::Simple => setup_simple_scene(scenes),
            DemoScene::Shadows => setup_shadow_test_scene(scenes),
            DemoScene::Bloom => setup_bloom_scene(scenes),
            DemoScene::Ssao => setup_ssao_scene(scenes),
            DemoScene::Full => setup_full_scene(scenes),
        }
    }
}

fn main_camera() -> Camera {
    Camera::perspective(Vec3::new(8.0, 4.0, 8.0), Vec3::ZERO, 45f32.to_radians())
}

fn spawn_cube_grid(scene: &mut Scene, size: i32) {
    let graph = scene.create_render_graph();
    for x in -size..=size {
        for z in -size..=size {
            scene
                .spawn_entity(graph, CUBE_MESH)
                .with_name(format!("Cube {x},{z}"))
                .with_transform(Transform::from_translation(Vec3::new(
                    x as f32 * 2.0,
                    0.5,
                    z as f32 * 2.0,
                )))
                .spawn();
        }
    }
}

fn spawn_floor(scene: &mut Scene) {
    let graph = scene.create_render_graph();
    scene
        .spawn_entity(graph, CUBE_MESH)
        .with_name("Floor")
        .with_transform(Transform::from_trs(
            Vec3::new(0.0, -0.05, 0.0),
            Quat::IDENTITY,
            Vec3::new(25.0, 0.1, 25.0),
        ))
        .spawn();
}

fn sun() -> DirectionalLight {
    DirectionalLight {
        direction: Vec3::new(-0.6, -1.0, -0.4).normalize(),
        color: Vec3::ONE,
        intensity: 6.0,
    }
}

fn fill_light() -> PointLight {
    PointLight {
        color: Vec3::new(0.9, 0.95, 1.0),
        intensity: 2.0,
        range: 20.0,
    }
}

fn setup_simple_scene(scenes: &mut SceneStore) -> Vec<RenderPass> {
    info!("Creating simple scene...");

    let mut scene = Scene::new();
    spawn_cube_grid(&mut scene, 1);

    let id = scenes.add(scene);
    vec![RenderPass::new(id, main_camera())]
}

fn setup_shadow_test_scene(scenes: &mut SceneStore) -> Vec<RenderPass> {
    info!("Creating shadow map test scene...");

    let mut scene = Scene::new();
    spawn_floor(&mut scene);

    let graph = scene.create_render_graph();
    scene
        .spawn_entity(graph, CUBE_MESH)
        .with_name("Shadow Test Cube")
        .with_transform(Transform::from_trs(
            Vec3::new(0.0, 1.0, 0.0),
            Quat::IDENTITY,
            Vec3::splat(1.5),
        ))
        .spawn();

    scene.add_directional_light(sun(), true);
    scene.add_point_light(fill_light(), Vec3::new(3.0, 4.0, 2.0));

    let id = scenes.add(scene);
    vec![RenderPass::new(id, main_camera())]
}

fn setup_bloom_scene(scenes: &mut SceneStore) -> Vec<RenderPass> {
    info!("Creating bloom scene...");

    let mut scene = Scene::new();
    let graph = scene.create_render_graph();
    for i in 0..5 {
        scene
            .spawn_entity(graph, SPHERE_MESH)
            .with_name(format!("Emissive Sphere {i}"))
            .with_transform(Transform::from_translation(Vec3::new(
                i as f32 * 2.0 - 4.0,
                1.0,
                0.0,
            )))
            .receive_shadow(false)
            .spawn();
    }
    scene.add_point_light(
        PointLight {
            intensity: 12.0,
            ..fill_light()
        },
        Vec3::new(0.0, 3.0, 2.0),
    );

    let id = scenes.add(scene);
    let post_processing = PostProcessingDescription::default()
        .with_bloom(BloomDescription::default())
        .with_colour_adjust(ColourAdjustDescription::default());
    vec![RenderPass::new(id, main_camera()).with_post_processing(post_processing)]
}

fn setup_ssao_scene(scenes: &mut SceneStore) -> Vec<RenderPass> {
    info!("Creating SSAO scene...");

    let mut scene = Scene::new();
    spawn_floor(&mut scene);
    spawn_cube_grid(&mut scene, 2);
    scene.set_ambient_light(Vec3::splat(0.2));

    let id = scenes.add(scene);
    let post_processing = PostProcessingDescription::default()
        .with_ambient_occlusion(AmbientOcclusionDescription::default());
    vec![RenderPass::new(id, main_camera()).with_post_processing(post_processing)]
}

fn setup_full_scene(scenes: &mut SceneStore) -> Vec<RenderPass> {
    info!("Creating full pipeline scene...");

    let mut world = Scene::new();
    spawn_floor(&mut world);
    spawn_cube_grid(&mut world, 1);
    world.add_directional_light(sun(), true);
    world.add_directional_light(
        DirectionalLight {
            direction: Vec3::new(0.5, -1.0, 0.3),
            color: Vec3::new(0.4, 0.4, 0.6),
            intensity: 1.0,
        },
        false,
    );
    world.add_point_light(fill_light(), Vec3::new(3.0, 4.0, 2.0));
    let world = scenes.add(world);

    // Small overlay drawn on top of the main view, sharing no lights.
    let mut overlay = Scene::new();
    let graph = overlay.create_render_graph();
    overlay
        .spawn_entity(graph, SPHERE_MESH)
        .with_name("Overlay Gizmo")
        .receive_shadow(false)
        .spawn();
    let overlay = scenes.add(overlay);

    let post_processing = PostProcessingDescription::default()
        .with_ambient_occlusion(AmbientOcclusionDescription::default())
        .with_bloom(BloomDescription {
            threshold: 0.8,
            iterations: 3,
        })
        .with_colour_adjust(ColourAdjustDescription::default())
        .with_anti_aliasing();

    vec![
        RenderPass::new(world, main_camera())
            .with_sky_box(SKY_TEXTURE)
            .with_post_processing(post_processing),
        RenderPass::new(overlay, main_camera())
            .with_flags(RenderPassFlags::CLEAR_DEPTH),
    ]
}
