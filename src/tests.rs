//! End-to-end tests for the raycasting pipeline

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};
use std::path::PathBuf;

use crate::caster::{MIN_DISTANCE, STEP};
use crate::{
    CastParams, Canvas, DepthPolicy, DrawCommand, Exact, GridMap, InputState, LightSet,
    LightSource, Player, RenderConfig, ShadingMode, SinCos, SinCosTable, ViewerConfig, World,
    cast_columns, project, sin_cos,
};

fn test_config(width: usize, height: usize) -> RenderConfig {
    RenderConfig {
        screen_size: (width, height),
        ..RenderConfig::default()
    }
}

#[test]
fn test_main() {
    let options = crate::parse_args(vec!["--help".to_string()]).unwrap();
    assert_eq!(options.command, crate::Command::Usage);
    crate::run(options).unwrap();
}

#[test]
fn test_parse_args() {
    let args = ["--snapshot", "out.ppm", "--flat", "--map", "level.txt", "--bogus"]
        .iter()
        .map(|s| s.to_string());
    let options = crate::parse_args(args).unwrap();
    assert_eq!(options.command, crate::Command::Snapshot(PathBuf::from("out.ppm")));
    assert_eq!(options.viewer.render.shading, ShadingMode::Distance);
    assert_eq!(options.viewer.map_path, Some(PathBuf::from("level.txt")));

    assert!(crate::parse_args(vec!["--map".to_string()]).is_err());
    // No arguments opens the viewer
    let options = crate::parse_args(Vec::new()).unwrap();
    assert_eq!(options.command, crate::Command::Interactive);
    assert_eq!(options.viewer.render.shading, ShadingMode::Lit);

    let options = crate::parse_args(["--ambient-only", "--table"].map(String::from)).unwrap();
    assert_eq!(options.command, crate::Command::Interactive);
    assert_eq!(options.viewer.render.depth_policy, DepthPolicy::AmbientOnly);
}

#[test]
fn test_snapshot_command_writes_ppm() {
    let mut viewer = ViewerConfig::default();
    viewer.render.screen_size = (64, 48);
    let path = std::env::temp_dir().join("raycast_lights_snapshot_command.ppm");

    crate::run_snapshot(&viewer, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("P3"));
    assert_eq!(lines.next(), Some("64 48"));
    assert_eq!(lines.next(), Some("255"));
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 48);
    assert!(rows.iter().all(|row| row.split_whitespace().count() == 64 * 3));

    // Missing layout files surface as errors, nothing is written
    viewer.map_path = Some(PathBuf::from("/nonexistent/raycast_lights.map"));
    let missing = std::env::temp_dir().join("raycast_lights_snapshot_missing.ppm");
    assert!(crate::run_snapshot(&viewer, &missing).is_err());
    assert!(!missing.exists());
}

#[test]
fn test_center_ray_hits_east_border() {
    // Empty interior, border wall column at x = 20
    let map = GridMap::bordered(21, 16);
    let player = Player::new(6.0, 8.0, FRAC_PI_2);
    let width = 640;
    let hits = cast_columns(&map, &player, &CastParams::default(), width, FRAC_PI_3, &Exact);

    let center = hits[width / 2];
    assert!(center.hit_wall);
    let expected = 20.0 - 6.0;
    assert!(
        (center.distance - expected).abs() <= STEP + 1e-4,
        "center ray distance {} expected {}",
        center.distance,
        expected
    );
}

#[test]
fn test_all_distances_bounded() {
    let map = GridMap::default_layout();
    let params = CastParams::default();
    for i in 0..64 {
        let player = Player::new(6.0, 8.0, i as f32 * 0.1);
        for hit in cast_columns(&map, &player, &params, 128, FRAC_PI_3, &Exact) {
            assert!(hit.distance >= MIN_DISTANCE);
            assert!(hit.distance <= params.depth);
            let span = project(hit.distance, 480);
            assert!(span.ceiling.is_finite() && span.floor.is_finite());
        }
    }
}

#[test]
fn test_reference_light_falloff() {
    let lights = LightSet::new(vec![LightSource::new(11.0, 11.0, 1.0, 3.0)]).with_ambient(0.0);
    assert_eq!(lights.intensity(11.0, 11.0, 5.0, 20.0), 1.0);
    for &(x, y) in &[(14.0, 11.0), (11.0, 8.0), (13.2, 13.2), (0.0, 0.0)] {
        assert_eq!(lights.direct(x, y), 0.0, "({}, {}) should be dark", x, y);
    }
}

#[test]
fn test_sin_cos_repeatable() {
    let angle = 0.7853;
    assert_eq!(sin_cos(angle), sin_cos(angle));
    let table = SinCosTable::default();
    assert_eq!(table.sin_cos(angle), table.sin_cos(angle));
}

#[test]
fn test_blocked_walk_keeps_rotating() {
    let mut world = World::with_map(GridMap::bordered(10, 10), test_config(64, 48));
    world.player = Player::new(8.5, 5.0, FRAC_PI_2);
    let input = InputState {
        forward: true,
        rotate_left: true,
        ..InputState::default()
    };
    for _ in 0..5 {
        world.step(&input, 0.1);
    }
    assert!(!world.map.is_wall(world.player.x, world.player.y));
    assert!((world.player.angle - (FRAC_PI_2 - 0.5)).abs() < 1e-4);
}

#[test]
fn test_player_never_enters_wall() {
    let mut world = World::with_map(GridMap::default_layout(), test_config(64, 48));
    let patterns = [
        InputState { forward: true, ..InputState::default() },
        InputState { forward: true, strafe_left: true, ..InputState::default() },
        InputState { backward: true, rotate_right: true, ..InputState::default() },
        InputState { strafe_right: true, rotate_left: true, ..InputState::default() },
    ];
    for i in 0..2000 {
        let input = patterns[(i / 50) % patterns.len()];
        world.step(&input, 0.05);
        assert!(
            !world.map.is_wall(world.player.x, world.player.y),
            "player inside wall at ({}, {})",
            world.player.x,
            world.player.y
        );
    }
}

#[test]
fn test_lit_frame_brighter_near_light() {
    // Looking +x at the east border with a light just in front of it
    let map = GridMap::bordered(20, 20);
    let config = test_config(64, 48);
    let player = Player::new(6.0, 11.0, FRAC_PI_2);

    let lit_scene = LightSet::new(vec![LightSource::new(18.5, 11.0, 1.0, 3.0)]);
    let dark_scene = LightSet::new(Vec::new());

    let lit = World::new(map.clone(), player, lit_scene, config.clone()).render(0.0);
    let dark = World::new(map, player, dark_scene, config).render(0.0);

    let center = 32;
    assert!(lit.columns[center].intensity > dark.columns[center].intensity);
    assert!(lit.columns[center].wall.r > dark.columns[center].wall.r);
}

#[test]
fn test_snapshot_pipeline() {
    let config = test_config(160, 120);
    let world = World::with_map(GridMap::default_layout(), config);
    let frame = world.render(0.0);

    let mut canvas = Canvas::new(160, 120);
    canvas.draw_all(&frame.commands);

    // Column 0 starts with ceiling and ends with floor
    assert_eq!(canvas.get(0, 0), Some(crate::color::palette::CEILING));
    assert_eq!(canvas.get(0, 119), Some(crate::color::palette::FLOOR));
    // Minimap top-left cell is a wall
    let (mx, my) = world.minimap_origin();
    assert_eq!(canvas.get(mx, my), Some(crate::color::palette::MINIMAP_WALL));

    let vlines = frame
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::VLine { .. }))
        .count();
    assert_eq!(vlines, 160 * 3);
}
