use std::collections::HashSet;

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use render_queue::asset::Handle;
use render_queue::renderer::{
    validate_commands, AmbientOcclusionDescription, BackendError, BloomDescription, BuildError,
    ColourAdjustDescription, DrawCommand, HeadlessBackend, MeshId, PostProcessingDescription,
    RenderCommand, RenderCommandType, RenderGraph, RenderNode, RenderPass, RenderPassFlags,
    RenderQueueBuilder, TargetAllocator, TargetId, TextureId,
};
use render_queue::scene::{
    Camera, DirectionalLight, LightType, PointLight, Scene, SceneId, SceneStore, Transform,
};
use render_queue::settings::RenderQueueSettings;

const MESH: MeshId = MeshId(7);
const WIDTH: u32 = 320;
const HEIGHT: u32 = 180;

fn builder_with(
    settings: RenderQueueSettings,
    backend: HeadlessBackend,
) -> RenderQueueBuilder<HeadlessBackend> {
    RenderQueueBuilder::new(settings, backend, HeadlessBackend::primitive_meshes())
}

fn builder() -> RenderQueueBuilder<HeadlessBackend> {
    builder_with(
        RenderQueueSettings::with_resolution(WIDTH, HEIGHT),
        HeadlessBackend::new(),
    )
}

fn camera() -> Camera {
    Camera::perspective(Vec3::new(6.0, 4.0, 6.0), Vec3::ZERO, 45f32.to_radians())
}

fn scene_with_entities(count: usize) -> Scene {
    let mut scene = Scene::new();
    let graph = scene.create_render_graph();
    for i in 0..count {
        scene.create_entity(
            graph,
            MESH,
            Transform::from_translation(Vec3::new(i as f32, 0.0, 0.0)),
        );
    }
    scene
}

fn sun() -> DirectionalLight {
    DirectionalLight {
        direction: Vec3::new(-0.5, -1.0, -0.3),
        color: Vec3::ONE,
        intensity: 3.0,
    }
}

fn lamp() -> PointLight {
    PointLight {
        color: Vec3::ONE,
        intensity: 1.0,
        range: 10.0,
    }
}

fn kinds(commands: &[RenderCommand]) -> Vec<RenderCommandType> {
    commands.iter().map(RenderCommand::kind).collect()
}

fn draws_in(commands: &[RenderCommand], pass: usize) -> Vec<DrawCommand> {
    commands
        .iter()
        .filter_map(RenderCommand::as_draw)
        .filter(|draw| draw.pass.0 == pass)
        .copied()
        .collect()
}

/// Graph of the single entity in a synthesized full-screen scene.
fn pass_graph<'a>(scenes: &'a SceneStore, pass: &RenderPass) -> &'a RenderGraph {
    let scene = scenes.get(pass.scene).expect("pass scene");
    let (graph, _) = scene.entities().next().expect("full-screen entity");
    scene.render_graph(graph).expect("render graph")
}

fn colour(pass: &RenderPass) -> TargetId {
    pass.colour_target.expect("pass writes an off-screen target")
}

#[test]
fn plain_passes_emit_start_draw_end_and_one_present() {
    let mut scenes = SceneStore::new();
    let mut passes: Vec<RenderPass> = (0..4)
        .map(|_| RenderPass::new(scenes.add(scene_with_entities(1)), camera()))
        .collect();
    let mut builder = builder();

    let commands = builder.build(&mut scenes, &mut passes).unwrap();

    assert_eq!(passes.len(), 4);
    assert_eq!(commands.len(), 4 * 3 + 1);
    let mut expected = Vec::new();
    for _ in 0..4 {
        expected.extend([
            RenderCommandType::PassStart,
            RenderCommandType::Draw,
            RenderCommandType::PassEnd,
        ]);
    }
    expected.push(RenderCommandType::Present);
    assert_eq!(kinds(&commands), expected);

    for (index, draw) in commands.iter().filter_map(RenderCommand::as_draw).enumerate() {
        assert_eq!(draw.pass.0, index);
        assert_eq!(draw.light.light_type, LightType::Ambient);
        assert_eq!(draw.shadow_map, None);
    }
}

#[test]
fn no_passes_yield_only_present() {
    let mut scenes = SceneStore::new();
    let mut passes = Vec::new();

    let commands = builder().build(&mut scenes, &mut passes).unwrap();

    assert_eq!(commands, vec![RenderCommand::Present]);
    assert!(passes.is_empty());
}

#[test]
fn point_and_directional_lights_fan_out_per_light() {
    let mut scenes = SceneStore::new();
    let mut scene = scene_with_entities(2);
    for x in 0..3 {
        scene.add_point_light(lamp(), Vec3::new(x as f32, 2.0, 0.0));
    }
    scene.add_directional_light(sun(), false);
    let id = scenes.add(scene);
    let mut passes = vec![RenderPass::new(id, camera())];
    let mut builder = builder();

    let commands = builder.build(&mut scenes, &mut passes).unwrap();
    let draws = draws_in(&commands, 0);

    let count = |light_type: LightType| draws.iter().filter(|d| d.light.light_type == light_type).count();
    assert_eq!(count(LightType::Ambient), 2);
    assert_eq!(count(LightType::Point), 6);
    assert_eq!(count(LightType::Directional), 2);

    // Each point draw of an entity names a different light.
    let first_entity = draws[0].entity;
    let lights: HashSet<_> = draws
        .iter()
        .filter(|d| d.entity == first_entity && d.light.light_type == LightType::Point)
        .map(|d| d.light)
        .collect();
    assert_eq!(lights.len(), 3);

    // One material per entity per light type, none with geometry outputs.
    assert_eq!(builder.backend().materials().len(), 6);
    assert!(builder
        .backend()
        .materials()
        .iter()
        .all(|m| !m.normal_output && !m.position_output));
}

#[test]
fn depth_only_pass_skips_point_and_directional_lights() {
    let mut scenes = SceneStore::new();
    let mut scene = scene_with_entities(1);
    scene.add_point_light(lamp(), Vec3::Y);
    scene.add_directional_light(sun(), false);
    let id = scenes.add(scene);
    let mut passes = vec![RenderPass::new(id, camera())
        .with_flags(RenderPassFlags::DEPTH_ONLY | RenderPassFlags::CLEAR_DEPTH)
        .with_sky_box(TextureId(3))];

    let commands = builder().build(&mut scenes, &mut passes).unwrap();

    assert_eq!(
        kinds(&commands),
        vec![
            RenderCommandType::PassStart,
            RenderCommandType::Draw,
            RenderCommandType::PassEnd,
            RenderCommandType::Present,
        ]
    );
    assert_eq!(draws_in(&commands, 0)[0].light.light_type, LightType::Ambient);
}

#[test]
fn shadow_maps_are_shared_by_passes_of_the_same_scene() {
    let mut scenes = SceneStore::new();
    let mut scene = Scene::new();
    let graph = scene.create_render_graph();
    let receiver = scene.create_entity(graph, MESH, Transform::default());
    let bystander = scene
        .spawn_entity(graph, MESH)
        .receive_shadow(false)
        .spawn();
    let caster = scene.add_directional_light(sun(), true);
    let fill = scene.add_directional_light(sun(), false);
    let id = scenes.add(scene);

    let mut passes = vec![
        RenderPass::new(id, camera()),
        RenderPass::new(id, camera()),
    ];
    let mut builder = builder();
    let commands = builder.build(&mut scenes, &mut passes).unwrap();

    assert_eq!(passes.len(), 3);
    let shadow_pass = passes[0];
    assert!(shadow_pass.depth_only());
    assert!(shadow_pass.clear_colour() && shadow_pass.clear_depth());
    assert_eq!(shadow_pass.scene, id);
    assert_eq!(shadow_pass.camera, sun().shadow_camera());
    let shadow_map = colour(&shadow_pass);

    let size = builder.settings().shadow_map_size;
    let record = builder
        .backend()
        .targets()
        .iter()
        .find(|t| t.id == shadow_map)
        .expect("shadow map allocated by backend");
    assert_eq!((record.width, record.height), (size, size));

    for pass in 1..=2 {
        for draw in draws_in(&commands, pass) {
            if draw.light.light_type != LightType::Directional {
                assert_eq!(draw.shadow_map, None);
                continue;
            }
            let expected = if draw.entity.entity == receiver && draw.light.entity == caster {
                Some(shadow_map)
            } else {
                None
            };
            assert_eq!(draw.shadow_map, expected, "{draw:?}");
            assert!(draw.light.entity == caster || draw.light.entity == fill);
            assert!(draw.entity.entity == receiver || draw.entity.entity == bystander);
        }
    }

    // The shadow pass itself only draws ambient.
    assert!(draws_in(&commands, 0)
        .iter()
        .all(|d| d.light.light_type == LightType::Ambient));
}

#[test]
fn bloom_chain_reads_each_predecessor_and_ends_on_intended_target() {
    let mut scenes = SceneStore::new();
    let id = scenes.add(scene_with_entities(1));
    let mut builder = builder();
    let intended = builder.backend_mut().create_render_target(WIDTH, HEIGHT).unwrap();
    let iterations = 2;
    let description = PostProcessingDescription::default().with_bloom(BloomDescription {
        threshold: 0.6,
        iterations,
    });
    let mut passes = vec![RenderPass::new(id, camera())
        .with_colour_target(intended)
        .with_post_processing(description)];

    let commands = builder.build(&mut scenes, &mut passes).unwrap();

    assert_eq!(passes.len(), 1 + 3 + iterations as usize);
    assert_eq!(commands.len(), passes.len() * 3 + 1);
    assert_eq!(passes.last().unwrap().colour_target, Some(intended));

    for i in 1..passes.len() {
        let inputs = pass_graph(&scenes, &passes[i]).texture_inputs();
        assert!(
            inputs.contains(&colour(&passes[i - 1])),
            "stage {i} does not read its predecessor"
        );
        assert!(
            !inputs.contains(&colour(&passes[i])),
            "stage {i} reads its own output"
        );
        assert!(passes[i].scene.is_frame_scene());
        assert_eq!(passes[i].camera, Camera::full_screen(WIDTH, HEIGHT));
    }

    // Combine stage adds the untouched base colour back in.
    let base = colour(&passes[0]);
    let combine = passes.len() - 1;
    assert!(pass_graph(&scenes, &passes[combine])
        .texture_inputs()
        .contains(&base));
    for pass in &passes[1..combine] {
        assert_ne!(colour(pass), base);
    }
}

#[test]
fn post_effects_run_in_fixed_order() {
    let mut scenes = SceneStore::new();
    let id = scenes.add(scene_with_entities(1));
    let description = PostProcessingDescription::default()
        .with_anti_aliasing()
        .with_colour_adjust(ColourAdjustDescription::default())
        .with_bloom(BloomDescription {
            threshold: 0.7,
            iterations: 1,
        });
    let mut passes = vec![RenderPass::new(id, camera()).with_post_processing(description)];

    builder().build(&mut scenes, &mut passes).unwrap();

    assert_eq!(passes.len(), 1 + 4 + 1 + 1);
    let roots: Vec<_> = passes[1..]
        .iter()
        .map(|pass| pass_graph(&scenes, pass).render_node().clone())
        .collect();
    assert!(matches!(roots[0], RenderNode::Standard { colour_input: Some(_) }));
    assert!(matches!(roots[4], RenderNode::ColourAdjust { .. }));
    assert!(matches!(roots[5], RenderNode::AntiAliasing { .. }));
    assert_eq!(passes.last().unwrap().colour_target, None);
}

#[test]
fn reused_targets_alternate_instead_of_allocating_per_stage() {
    let description = PostProcessingDescription::default()
        .with_bloom(BloomDescription::default())
        .with_colour_adjust(ColourAdjustDescription::default())
        .with_anti_aliasing();

    let allocations = |reuse: bool| {
        let mut scenes = SceneStore::new();
        let id = scenes.add(scene_with_entities(1));
        let settings = RenderQueueSettings {
            reuse_post_process_targets: reuse,
            ..RenderQueueSettings::with_resolution(WIDTH, HEIGHT)
        };
        let mut builder = builder_with(settings, HeadlessBackend::new());
        let mut passes = vec![RenderPass::new(id, camera()).with_post_processing(description)];
        builder.build(&mut scenes, &mut passes).unwrap();

        for i in 1..passes.len() - 1 {
            let inputs = pass_graph(&scenes, &passes[i]).texture_inputs();
            assert!(!inputs.contains(&colour(&passes[i])));
        }
        assert!(builder
            .backend()
            .targets()
            .iter()
            .all(|t| (t.width, t.height) == (WIDTH, HEIGHT)));
        builder.backend().targets().len()
    };

    assert_eq!(allocations(false), description.chain_length());
    assert_eq!(allocations(true), 3);
}

#[test]
fn ambient_occlusion_replaces_ambient_draws() {
    let mut scenes = SceneStore::new();
    let mut scene = scene_with_entities(2);
    scene.add_point_light(lamp(), Vec3::Y);
    let id = scenes.add(scene);
    let mut builder = builder();
    let intended = builder.backend_mut().create_render_target(WIDTH, HEIGHT).unwrap();
    let description = PostProcessingDescription::default()
        .with_ambient_occlusion(AmbientOcclusionDescription::default());
    let pass_camera = camera();
    let mut passes = vec![RenderPass::new(id, pass_camera)
        .with_colour_target(intended)
        .with_post_processing(description)];

    let commands = builder.build(&mut scenes, &mut passes).unwrap();
    assert_eq!(passes.len(), 3);
    let (data, occlusion, main) = (passes[0], passes[1], passes[2]);

    // Geometry pre-pass: same scene and camera, normals and positions only.
    assert_eq!(data.scene, id);
    assert_eq!(data.camera, pass_camera);
    assert!(data.depth_only());
    let normal = data.normal_target.expect("normal target");
    let position = data.position_target.expect("position target");
    let data_draws = draws_in(&commands, 0);
    assert_eq!(data_draws.len(), 2);
    for draw in &data_draws {
        assert_eq!(draw.light.light_type, LightType::Ambient);
        let material = builder.backend().materials()[draw.material.0 as usize];
        assert!(material.normal_output && material.position_output);
    }

    // Occlusion pass keeps the perspective camera and writes the real target.
    assert_eq!(occlusion.camera, pass_camera);
    assert_eq!(occlusion.colour_target, Some(intended));
    match pass_graph(&scenes, &occlusion).render_node() {
        RenderNode::AmbientOcclusion { description: d, .. } => {
            assert_eq!(*d, AmbientOcclusionDescription::default())
        }
        other => panic!("unexpected root {other:?}"),
    }
    let inputs = pass_graph(&scenes, &occlusion).texture_inputs();
    assert!(inputs.contains(&normal) && inputs.contains(&position));

    // Original pass accumulates on a hybrid target and skips ambient.
    let hybrid = builder.backend().hybrids()[0];
    assert_eq!(main.colour_target, Some(hybrid.id));
    assert_eq!(hybrid.colour, Some(intended));
    assert_eq!(Some(hybrid.depth_source), data.colour_target);
    assert!(!main.clear_colour() && !main.clear_depth());
    let main_draws = draws_in(&commands, 2);
    assert_eq!(main_draws.len(), 2);
    assert!(main_draws
        .iter()
        .all(|d| d.light.light_type == LightType::Point));
}

#[test]
fn post_chain_after_ambient_occlusion_reads_the_occlusion_result() {
    let mut scenes = SceneStore::new();
    let id = scenes.add(scene_with_entities(1));
    let mut builder = builder();
    let intended = builder.backend_mut().create_render_target(WIDTH, HEIGHT).unwrap();
    let description = PostProcessingDescription::default()
        .with_ambient_occlusion(AmbientOcclusionDescription::default())
        .with_anti_aliasing();
    let mut passes = vec![RenderPass::new(id, camera())
        .with_colour_target(intended)
        .with_post_processing(description)];

    let commands = builder.build(&mut scenes, &mut passes).unwrap();
    assert_eq!(validate_commands(&commands), Ok(()));
    assert_eq!(passes.len(), 4);
    let (data, occlusion, main, anti_aliasing) = (passes[0], passes[1], passes[2], passes[3]);

    // Occlusion goes to a chain input, not to the intended target.
    let chain_input = colour(&occlusion);
    assert_ne!(chain_input, intended);

    // Main pass accumulates on top of it, sharing the data pass's depth.
    let hybrid = builder.backend().hybrids()[0];
    assert_eq!(hybrid.colour, Some(chain_input));
    assert_eq!(Some(hybrid.depth_source), data.colour_target);
    assert_eq!(main.colour_target, Some(hybrid.id));
    assert!(!main.clear_colour() && !main.clear_depth());

    // The chain reads that result and still ends on the intended target.
    assert_eq!(
        pass_graph(&scenes, &anti_aliasing).texture_inputs(),
        vec![chain_input]
    );
    assert_eq!(anti_aliasing.colour_target, Some(intended));
}

#[test]
fn bloom_after_ambient_occlusion_keeps_the_occlusion_result_as_base() {
    let mut scenes = SceneStore::new();
    let id = scenes.add(scene_with_entities(1));
    let mut builder = builder();
    let iterations = 2;
    let description = PostProcessingDescription::default()
        .with_ambient_occlusion(AmbientOcclusionDescription::default())
        .with_bloom(BloomDescription {
            threshold: 0.5,
            iterations,
        });
    let mut passes = vec![RenderPass::new(id, camera()).with_post_processing(description)];

    builder.build(&mut scenes, &mut passes).unwrap();
    assert_eq!(passes.len(), 3 + 3 + iterations as usize);

    let chain_input = colour(&passes[1]);
    let hybrid = builder.backend().hybrids()[0];
    assert_eq!(hybrid.colour, Some(chain_input));
    assert_eq!(passes[2].colour_target, Some(hybrid.id));
    assert_eq!(pass_graph(&scenes, &passes[3]).texture_inputs(), vec![chain_input]);
    assert_eq!(passes.last().map(|pass| pass.colour_target), Some(None));
}

#[test]
fn sky_box_adds_one_ambient_draw() {
    let mut scenes = SceneStore::new();
    let mut scene = scene_with_entities(1);
    scene.set_ambient_light(Vec3::splat(0.4));
    let ambient = scene.lighting_rig().ambient_light();
    let id = scenes.add(scene);
    let mut passes = vec![RenderPass::new(id, camera()).with_sky_box(TextureId(11))];
    let mut builder = builder();

    let commands = builder.build(&mut scenes, &mut passes).unwrap();
    assert_eq!(commands.len(), 5);

    let draws = draws_in(&commands, 0);
    let sky = draws[1];
    assert!(sky.entity.scene.is_frame_scene());
    assert_eq!(sky.light.scene, id);
    assert_eq!(sky.light.entity, ambient);
    assert_eq!(sky.light.light_type, LightType::Ambient);

    let sky_scene = scenes.get(sky.entity.scene).unwrap();
    assert_eq!(sky_scene.mesh(sky.entity.entity), Some(HeadlessBackend::primitive_meshes().cube));
    assert!(!sky_scene.receives_shadow(sky.entity.entity));
    let (graph, _) = sky_scene.entities().next().unwrap();
    assert!(matches!(
        sky_scene.render_graph(graph).unwrap().render_node(),
        RenderNode::SkyBox {
            texture: TextureId(11)
        }
    ));
}

#[test]
fn failed_build_leaves_passes_untouched() {
    let mut scenes = SceneStore::new();
    let id = scenes.add(scene_with_entities(1));
    let description = PostProcessingDescription::default().with_bloom(BloomDescription::default());
    let original = vec![RenderPass::new(id, camera()).with_post_processing(description)];
    let mut passes = original.clone();
    let mut builder = builder_with(
        RenderQueueSettings::with_resolution(WIDTH, HEIGHT),
        HeadlessBackend::new().fail_after(1),
    );

    let err = builder.build(&mut scenes, &mut passes).unwrap_err();

    assert!(matches!(
        err,
        BuildError::Backend(BackendError::TargetAllocation { .. })
    ));
    assert_eq!(passes, original);
}

#[test]
fn unknown_scene_and_invalid_camera_are_rejected() {
    let mut scenes = SceneStore::new();
    let id = scenes.add(scene_with_entities(1));
    let missing = SceneId::Persistent(Handle::new(41));
    let mut builder = builder();

    let mut passes = vec![RenderPass::new(id, camera()), RenderPass::new(missing, camera())];
    assert_eq!(
        builder.build(&mut scenes, &mut passes),
        Err(BuildError::UnknownScene(missing))
    );
    assert_eq!(passes.len(), 2);

    let mut broken = camera();
    broken.target = broken.eye;
    let mut passes = vec![RenderPass::new(id, camera()), RenderPass::new(id, broken)];
    assert_eq!(
        builder.build(&mut scenes, &mut passes),
        Err(BuildError::InvalidCamera { pass: 1 })
    );
}

#[test]
fn oversized_bloom_is_rejected_before_allocating() {
    let mut scenes = SceneStore::new();
    let id = scenes.add(scene_with_entities(1));
    let bloom = BloomDescription {
        threshold: 0.7,
        iterations: u32::MAX,
    };
    let original = vec![
        RenderPass::new(id, camera()),
        RenderPass::new(id, camera())
            .with_post_processing(PostProcessingDescription::default().with_bloom(bloom)),
    ];
    let mut passes = original.clone();
    let mut builder = builder();

    assert_eq!(
        builder.build(&mut scenes, &mut passes),
        Err(BuildError::InvalidPostProcessing { pass: 1 })
    );
    assert_eq!(passes, original);
    assert!(builder.backend().targets().is_empty());
}

#[test]
fn frame_scenes_do_not_outlive_the_next_build() {
    let mut scenes = SceneStore::new();
    let id = scenes.add(scene_with_entities(1));
    let description = PostProcessingDescription::default().with_anti_aliasing();
    let original = vec![RenderPass::new(id, camera())
        .with_post_processing(description)
        .with_sky_box(TextureId(0))];
    let mut builder = builder();

    let mut first = original.clone();
    builder.build(&mut scenes, &mut first).unwrap();
    let per_frame = scenes.frame_scene_count();
    assert_eq!(per_frame, 2);

    let mut second = original.clone();
    builder.build(&mut scenes, &mut second).unwrap();
    assert_eq!(scenes.frame_scene_count(), per_frame);
    assert!(!scenes.contains(first[1].scene));

    // Expanded passes from an earlier frame can no longer be compiled.
    assert!(matches!(
        builder.build(&mut scenes, &mut first),
        Err(BuildError::UnknownScene(_))
    ));
}

struct Topology {
    scenes: SceneStore,
    passes: Vec<RenderPass>,
    expected_passes: usize,
}

fn random_topology(rng: &mut SmallRng) -> Topology {
    let mut scenes = SceneStore::new();
    let mut ids = Vec::new();
    let mut casters = Vec::new();

    for _ in 0..rng.gen_range(1..4) {
        let mut scene = scene_with_entities(rng.gen_range(0..4));
        for _ in 0..rng.gen_range(0..3) {
            scene.add_point_light(lamp(), Vec3::new(rng.gen_range(-5.0..5.0), 3.0, 0.0));
        }
        let mut casting = 0;
        for _ in 0..rng.gen_range(0..3) {
            let casts = rng.gen_bool(0.5);
            casting += usize::from(casts);
            scene.add_directional_light(sun(), casts);
        }
        ids.push(scenes.add(scene));
        casters.push(casting);
    }

    let mut passes = Vec::new();
    let mut used = HashSet::new();
    let mut expected_passes = 0;
    for _ in 0..rng.gen_range(0..5) {
        let scene_index = rng.gen_range(0..ids.len());
        let mut description = PostProcessingDescription::default();
        if rng.gen_bool(0.4) {
            description = description.with_bloom(BloomDescription {
                threshold: 0.7,
                iterations: rng.gen_range(0..4),
            });
        }
        if rng.gen_bool(0.4) {
            description = description.with_colour_adjust(ColourAdjustDescription::default());
        }
        if rng.gen_bool(0.4) {
            description = description.with_anti_aliasing();
        }
        if rng.gen_bool(0.3) {
            description = description.with_ambient_occlusion(AmbientOcclusionDescription::default());
        }

        let mut pass = RenderPass::new(ids[scene_index], camera()).with_post_processing(description);
        if rng.gen_bool(0.3) {
            pass = pass.with_sky_box(TextureId(rng.gen_range(0..4)));
        }

        if used.insert(scene_index) {
            expected_passes += casters[scene_index];
        }
        expected_passes += 1 + description.chain_length();
        if description.ambient_occlusion.is_some() {
            expected_passes += 2;
        }
        passes.push(pass);
    }

    Topology {
        scenes,
        passes,
        expected_passes,
    }
}

#[test]
fn random_topologies_compile_to_stable_well_formed_streams() {
    let mut rng = SmallRng::seed_from_u64(0x5eed_cafe);

    for _ in 0..64 {
        let Topology {
            mut scenes,
            passes: original,
            expected_passes,
        } = random_topology(&mut rng);
        let mut builder = builder();

        let mut first = original.clone();
        let first_commands = builder.build(&mut scenes, &mut first).unwrap();
        let mut second = original.clone();
        let second_commands = builder.build(&mut scenes, &mut second).unwrap();

        assert_eq!(validate_commands(&first_commands), Ok(()));
        assert_eq!(validate_commands(&second_commands), Ok(()));
        assert_eq!(kinds(&first_commands), kinds(&second_commands));
        assert_eq!(first.len(), expected_passes);
        assert_eq!(second.len(), expected_passes);

        let starts = first_commands
            .iter()
            .filter(|c| c.kind() == RenderCommandType::PassStart)
            .count();
        assert_eq!(starts, first.len());
        assert_eq!(first_commands.last(), Some(&RenderCommand::Present));
    }
}
