use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::scene::adapter::SceneAdapter;
use crate::scene::controls::Control;
use crate::scene::frame::LatestFrame;
use crate::simulation::params::{SPEED_MAX, SPEED_MIN};
use crate::simulation::scenario::SimulationState;
use crate::simulation::states::NVec3;

/// Component tagging each sphere with its body index into SimulationState.system.bodies
#[derive(Component)]
struct BodyIndex3(pub usize);

#[derive(Component)]
struct ViewCamera;

/// Display units → world units
const SCALE3D: f32 = 10.0;

/// Smallest sphere drawn, in display units, so realistic mode stays visible
const MIN_VISIBLE_RADIUS: f32 = 0.005;

/// Pixels per scroll line for touchpads reporting pixel deltas
const PIXELS_PER_LINE: f32 = 40.0;

/// Entry point for the windowed viewer. Returns once the window closes.
pub fn run_3d(state: SimulationState) -> AppExit {
    info!(
        "run_3d: starting Bevy 3D viewer with {} bodies ({} scale)",
        state.system.bodies.len(),
        state.scale_mode
    );

    let adapter = SceneAdapter::for_state(&state);
    let tick_secs = state.parameters.frame_interval;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Solar System Simulator".into(),
                resolution: (1600.0, 1200.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .insert_resource(Time::<Fixed>::from_seconds(tick_secs))
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 150.0,
        })
        .insert_resource(state)
        .insert_resource(adapter)
        .init_resource::<LatestFrame>()
        .add_systems(Startup, setup_3d)
        .add_systems(FixedUpdate, tick_system)
        .add_systems(
            Update,
            (
                controls_panel,
                camera_input,
                present_frame,
                apply_view,
                sync_bodies,
                draw_paths,
                draw_labels,
            )
                .chain(),
        )
        .run()
}

/// Model coordinates (z-up ecliptic) → Bevy world (y-up)
fn to_world(v: &NVec3) -> Vec3 {
    Vec3::new(v.x as f32, v.z as f32, -(v.y as f32)) * SCALE3D
}

fn to_color32(c: Srgba, alpha: f32) -> egui::Color32 {
    let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(byte(c.red), byte(c.green), byte(c.blue), byte(alpha))
}

/// Startup system: spawn camera, sun light, and one unit sphere per body
fn setup_3d(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    state: Res<SimulationState>,
    adapter: Res<SceneAdapter>,
) {
    let view = adapter.view();
    let far = (view.distance_bounds().1 + view.extent() * 2.0) as f32 * SCALE3D * 2.0;

    commands.spawn((
        Camera3dBundle {
            camera: Camera {
                clear_color: ClearColorConfig::Custom(Color::BLACK),
                ..default()
            },
            projection: Projection::Perspective(PerspectiveProjection {
                near: 0.01,
                far,
                ..default()
            }),
            transform: Transform::from_translation(to_world(&view.eye()))
                .looking_at(to_world(&view.focus()), Vec3::Y),
            ..default()
        },
        ViewCamera,
    ));

    // The sun lights the planets from the origin
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 5.0e9,
            range: far,
            shadows_enabled: false,
            ..default()
        },
        transform: Transform::from_xyz(0.0, 0.0, 0.0),
        ..default()
    });

    let sphere = meshes.add(Sphere::new(1.0).mesh().uv(32, 18));

    for (i, b) in state.system.bodies.iter().enumerate() {
        let material = if b.is_central() {
            StandardMaterial {
                base_color: Color::Srgba(b.color),
                emissive: LinearRgba::from(b.color) * 4.0,
                unlit: true,
                ..default()
            }
        } else {
            StandardMaterial {
                base_color: Color::Srgba(b.color),
                perceptual_roughness: 0.8,
                ..default()
            }
        };

        commands.spawn((
            PbrBundle {
                mesh: sphere.clone(),
                material: materials.add(material),
                transform: Transform::from_translation(to_world(&adapter.scale().point(&b.position()))),
                ..default()
            },
            BodyIndex3(i),
            Name::new(b.name.clone()),
        ));
    }
}

/// Fixed-rate timer: advance the orbit model by the elapsed step
fn tick_system(time: Res<Time>, mut state: ResMut<SimulationState>) {
    state.tick(time.delta_seconds_f64());
}

/// Buttons, speed slider, title and legend
fn controls_panel(
    mut contexts: EguiContexts,
    mut state: ResMut<SimulationState>,
    mut adapter: ResMut<SceneAdapter>,
) {
    let ctx = contexts.ctx_mut();
    let mut controls = Vec::new();

    egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui.button("Pause/Resume").clicked() {
                controls.push(Control::TogglePause);
            }
            if ui.button("Toggle Orbits").clicked() {
                controls.push(Control::ToggleOrbits);
            }
            if ui.button("Toggle Labels").clicked() {
                controls.push(Control::ToggleLabels);
            }
            if ui.button("Reset View").clicked() {
                controls.push(Control::ResetView);
            }
        });
        let mut speed = state.playback.speed();
        let slider = egui::Slider::new(&mut speed, SPEED_MIN..=SPEED_MAX)
            .step_by(0.1)
            .text("Speed");
        if ui.add(slider).changed() {
            controls.push(Control::SetSpeed(speed));
        }
        ui.add_space(4.0);
    });

    egui::Area::new(egui::Id::new("title"))
        .anchor(egui::Align2::CENTER_TOP, [0.0, 12.0])
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(adapter.title(&state))
                    .size(20.0)
                    .strong()
                    .color(egui::Color32::WHITE),
            );
        });

    egui::Window::new("Bodies")
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 12.0])
        .resizable(false)
        .show(ctx, |ui| {
            for b in &state.system.bodies {
                let text = if b.is_central() {
                    b.name.clone()
                } else {
                    format!("{} ({:.0}d)", b.name, b.period_days)
                };
                ui.label(egui::RichText::new(text).color(to_color32(b.color, 1.0)));
            }
            ui.separator();
            ui.label(format!("Day {:.0}", state.elapsed_days()));
        });

    for control in controls {
        adapter.handle(&mut state, control);
    }
}

/// Left drag rotates, right drag pans, scroll zooms
fn camera_input(
    mut contexts: EguiContexts,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut state: ResMut<SimulationState>,
    mut adapter: ResMut<SceneAdapter>,
) {
    let ctx = contexts.ctx_mut();
    if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
        motion.clear();
        wheel.clear();
        return;
    }

    let drag: Vec2 = motion.read().map(|ev| ev.delta).sum();
    let scroll: f32 = wheel
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / PIXELS_PER_LINE,
        })
        .sum();

    if drag != Vec2::ZERO {
        let (dx, dy) = (drag.x as f64, drag.y as f64);
        if buttons.pressed(MouseButton::Left) {
            adapter.handle(&mut state, Control::Rotate { dx, dy });
        } else if buttons.pressed(MouseButton::Right) {
            adapter.handle(&mut state, Control::Pan { dx, dy });
        }
    }
    if scroll != 0.0 {
        adapter.handle(&mut state, Control::Zoom(scroll as f64));
    }
}

fn present_frame(state: Res<SimulationState>, adapter: Res<SceneAdapter>, mut latest: ResMut<LatestFrame>) {
    adapter.render(&state, &mut *latest);
}

fn apply_view(adapter: Res<SceneAdapter>, mut camera: Query<&mut Transform, With<ViewCamera>>) {
    let view = adapter.view();
    for mut transform in &mut camera {
        let up = to_world(&view.up()).try_normalize().unwrap_or(Vec3::Y);
        *transform = Transform::from_translation(to_world(&view.eye())).looking_at(to_world(&view.focus()), up);
    }
}

fn sync_bodies(latest: Res<LatestFrame>, mut query: Query<(&BodyIndex3, &mut Transform)>) {
    for (BodyIndex3(i), mut transform) in &mut query {
        if let Some(b) = latest.frame.bodies.get(*i) {
            transform.translation = to_world(&b.position);
            transform.scale = Vec3::splat((b.radius as f32).max(MIN_VISIBLE_RADIUS) * SCALE3D);
        }
    }
}

/// Orbit circles, trails and reference axes
fn draw_paths(latest: Res<LatestFrame>, mut gizmos: Gizmos) {
    let frame = &latest.frame;

    let axis_len = frame.extent as f32 * 1.2 * SCALE3D;
    let axis = Color::srgba(1.0, 1.0, 1.0, 0.15);
    gizmos.line(Vec3::new(-axis_len, 0.0, 0.0), Vec3::new(axis_len, 0.0, 0.0), axis);
    gizmos.line(Vec3::new(0.0, 0.0, -axis_len), Vec3::new(0.0, 0.0, axis_len), axis);
    gizmos.line(Vec3::new(0.0, -axis_len * 0.5, 0.0), Vec3::new(0.0, axis_len * 0.5, 0.0), axis);

    for b in &frame.bodies {
        let c = b.color;
        if let Some(path) = &b.orbit_path {
            gizmos.linestrip(path.iter().map(to_world), Color::srgba(c.red, c.green, c.blue, 0.3));
        }
        if let Some(trail) = &b.trail {
            if trail.len() > 1 {
                gizmos.linestrip(trail.iter().map(to_world), Color::srgba(c.red, c.green, c.blue, 0.8));
            }
        }
    }
}

/// Body names projected into screen space
fn draw_labels(
    latest: Res<LatestFrame>,
    mut contexts: EguiContexts,
    camera: Query<(&Camera, &GlobalTransform), With<ViewCamera>>,
) {
    let Ok((camera, cam_transform)) = camera.get_single() else {
        return;
    };
    let ctx = contexts.ctx_mut();
    let painter = ctx.layer_painter(egui::LayerId::new(egui::Order::Background, egui::Id::new("labels")));

    for b in &latest.frame.bodies {
        let Some(label) = &b.label else {
            continue;
        };
        let Some(screen) = camera.world_to_viewport(cam_transform, to_world(&label.anchor)) else {
            continue;
        };
        let size = if b.central { 14.0 } else { 12.0 };
        painter.text(
            egui::pos2(screen.x, screen.y),
            egui::Align2::CENTER_BOTTOM,
            &label.text,
            egui::FontId::proportional(size),
            egui::Color32::WHITE,
        );
    }
}
