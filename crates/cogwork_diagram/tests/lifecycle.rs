//! Mount, frame, theme and unmount behavior against the headless host

use cogwork_3d::materials::Material;
use cogwork_diagram::prelude::*;

fn diagram() -> MechanicalDiagram<HeadlessHost> {
    MechanicalDiagram::new(DiagramConfig {
        seed: Some(7),
        ..Default::default()
    })
}

#[test]
fn repeated_mount_cycles_leave_one_live_renderer() {
    let mut host = HeadlessHost::default();
    let mut diagram = diagram();
    let cycles = 5;

    for cycle in 0..cycles {
        if cycle > 0 {
            diagram.unmount(&mut host);
        }
        diagram.mount(&mut host, Environment::default());
        assert_eq!(diagram.state(), DiagramState::Rendering);
    }

    let log = host.log();
    assert_eq!(log.renderers_created, cycles);
    assert_eq!(log.renderers_disposed, cycles - 1);
    assert_eq!(log.live_renderers(), 1);
    assert_eq!(log.live_canvases.len(), 1);
    assert_eq!(log.canvases_detached, cycles - 1);
    assert_eq!(log.pending_frames.len(), 1);
    assert_eq!(log.live_listeners.len(), 1);
}

#[test]
fn missing_webgl_renders_nothing() {
    let mut host = HeadlessHost::default().without_webgl();
    let mut diagram = diagram();
    diagram.mount(&mut host, Environment::default());

    assert_eq!(diagram.state(), DiagramState::Error);
    assert!(diagram.container_attributes().is_none());
    assert!(diagram.scene().is_none());

    let log = host.log();
    assert_eq!(log.renderers_created, 0);
    assert_eq!(log.canvases_attached, 0);
    assert!(log.pending_frames.is_empty());

    // A failed diagram stays failed until it is unmounted
    diagram.mount(&mut host, Environment::default());
    assert_eq!(diagram.state(), DiagramState::Error);
    diagram.unmount(&mut host);
    assert_eq!(diagram.state(), DiagramState::Disposed);
}

#[test]
fn reduced_motion_keeps_gears_still() {
    let mut host = HeadlessHost::default();
    let mut diagram = diagram();
    diagram.mount(&mut host, Environment::default().with_reduced_motion(true));
    assert_eq!(diagram.animation_count(), 0);

    let before = diagram.gear_rotations();
    assert_eq!(drive_frames(&mut diagram, &mut host, 2, 0.0, 5_000.0), 2);
    assert_eq!(diagram.gear_rotations(), before);

    // Static scenes are still fully visible
    let renderer = diagram.renderer().unwrap();
    assert_eq!(renderer.canvas_style(), CanvasStyle::default());
}

#[test]
fn motion_spins_gears_at_different_rates() {
    let mut host = HeadlessHost::default();
    let mut diagram = diagram();
    diagram.mount(&mut host, Environment::default());
    // Five spins, ten pulses, one line fade and the two entrance tweens
    assert_eq!(diagram.animation_count(), 18);

    let before = diagram.gear_rotations();
    drive_frames(&mut diagram, &mut host, 2, 0.0, 10_000.0);
    let after = diagram.gear_rotations();

    let turned: Vec<f32> = before.iter().zip(&after).map(|(a, b)| b - a).collect();
    assert!(turned.iter().all(|delta| *delta > 0.0));
    assert!(turned[4] > turned[0]);
}

#[test]
fn entrance_fades_canvas_in() {
    let mut host = HeadlessHost::default();
    let mut diagram = diagram();
    diagram.mount(&mut host, Environment::default());

    let style = diagram.renderer().unwrap().canvas_style();
    assert_eq!(style.opacity, 0.0);
    assert_eq!(style.translate_y, 50.0);

    drive_frames(&mut diagram, &mut host, 3, 0.0, 1_000.0);
    let style = diagram.renderer().unwrap().canvas_style();
    assert_eq!(style, CanvasStyle::default());
    assert_eq!(host.log().canvas_style, Some(CanvasStyle::default()));
}

#[test]
fn theme_flip_recolors_in_place() {
    let mut host = HeadlessHost::default();
    let mut diagram = diagram();
    diagram.mount(&mut host, Environment::new(ColorScheme::Light));
    let objects = diagram.scene().unwrap().object_count();
    let geometries = diagram.scene().unwrap().geometry_count();

    assert!(diagram.set_theme(ColorScheme::Dark));
    assert_eq!(diagram.state(), DiagramState::Rendering);

    let dark = DiagramPalette::dark();
    let scene = diagram.scene().unwrap();
    for gear in diagram.gears() {
        for id in gear.body_materials() {
            assert_eq!(scene.material(id).unwrap().base_color(), dark.gear);
        }
    }
    let network = diagram.network().unwrap();
    for node in &network.nodes {
        let material = scene.material(node.material).unwrap();
        assert_eq!(material.base_color(), dark.node_active);
        assert_eq!(material.emissive(), Some(dark.node_active));
    }
    assert_eq!(
        scene.material(network.connections.material).unwrap().base_color(),
        dark.node_glow
    );
    assert_eq!(scene.object_count(), objects);
    assert_eq!(scene.geometry_count(), geometries);
}

#[test]
fn theme_before_mount_is_remembered() {
    let mut host = HeadlessHost::default();
    let mut diagram = diagram();
    assert!(!diagram.set_theme(ColorScheme::Dark));
    diagram.mount(&mut host, Environment::new(ColorScheme::Dark));
    assert_eq!(diagram.palette(), &DiagramPalette::dark());
}

#[test]
fn invalid_config_fails_without_leaking() {
    let mut host = HeadlessHost::default();
    let mut config = DiagramConfig::default();
    config.gears[0].options.radius = -1.0;
    let mut diagram: MechanicalDiagram<HeadlessHost> = MechanicalDiagram::new(config);

    diagram.mount(&mut host, Environment::default());
    assert_eq!(diagram.state(), DiagramState::Error);
    assert_eq!(host.log().renderers_created, 0);
}

#[test]
fn failed_first_frame_releases_partial_scene() {
    let mut host = HeadlessHost::default();
    host.set_render_failure(true);
    let mut diagram = diagram();
    diagram.mount(&mut host, Environment::default());
    assert_eq!(diagram.state(), DiagramState::Error);

    let log = host.log();
    assert_eq!(log.renderers_created, 1);
    assert_eq!(log.renderers_disposed, 1);
    assert_eq!(log.canvases_attached, 1);
    assert_eq!(log.canvases_detached, 1);
    assert!(log.pending_frames.is_empty());
    assert!(log.live_listeners.is_empty());

    // Remounting after an unmount starts over
    host.set_render_failure(false);
    diagram.unmount(&mut host);
    diagram.mount(&mut host, Environment::default());
    assert_eq!(diagram.state(), DiagramState::Rendering);
}

#[test]
fn renderer_creation_failure_is_absorbed() {
    let mut host = HeadlessHost::default().failing_renderer_creation();
    let mut diagram = diagram();
    diagram.mount(&mut host, Environment::default());
    assert_eq!(diagram.state(), DiagramState::Error);
    assert!(host.log().live_canvases.is_empty());
}

#[test]
fn stale_frames_are_ignored() {
    let mut host = HeadlessHost::default();
    let mut diagram = diagram();
    diagram.mount(&mut host, Environment::default());

    let first = host.take_frame().unwrap();
    assert!(diagram.on_animation_frame(&mut host, first, 16.0));
    assert!(!diagram.on_animation_frame(&mut host, first, 32.0));

    let next = host.take_frame().unwrap();
    diagram.unmount(&mut host);
    assert!(!diagram.on_animation_frame(&mut host, next, 48.0));
    assert!(host.log().pending_frames.is_empty());
}

#[test]
fn resize_updates_camera_and_renderer() {
    let mut host = HeadlessHost::new(800, 400).with_device_pixel_ratio(3.0);
    let mut diagram = diagram();
    diagram.mount(&mut host, Environment::default());
    assert_eq!(diagram.renderer().unwrap().pixel_ratio(), 2.0);

    host.resize(600, 600);
    assert!(diagram.on_resize(&host));
    assert_eq!(diagram.camera().unwrap().aspect, 1.0);
    assert_eq!(diagram.renderer().unwrap().size(), (600, 600));

    host.resize(0, 600);
    assert!(!diagram.on_resize(&host));
    assert_eq!(diagram.renderer().unwrap().size(), (600, 600));

    diagram.unmount(&mut host);
    assert!(!diagram.on_resize(&host));
}

#[test]
fn frames_draw_the_whole_scene() {
    let mut host = HeadlessHost::default();
    let mut diagram = diagram();
    diagram.mount(&mut host, Environment::default());
    drive_frames(&mut diagram, &mut host, 1, 0.0, 16.0);

    let frame = host.log().last_frame.unwrap();
    let glows = diagram
        .network()
        .unwrap()
        .nodes
        .iter()
        .filter(|node| node.glow.is_some())
        .count();
    // Gear bodies and bores, node spheres and their glow shells
    assert_eq!(frame.meshes, 5 * 2 + 10 + glows);
    assert_eq!(frame.line_segments, 1);
    assert_eq!(frame.lights, 3);
}
