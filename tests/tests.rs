use std::f64::consts::{PI, TAU};
use std::io::Cursor;

use solarsim::configuration::prompt::{group_thousands, print_body_table};
use solarsim::scene::camera::{RESET_AZIMUTH_DEG, RESET_ELEVATION_DEG};
use solarsim::{
    angle_delta, build_headless_app, default_bodies, parse_scale_choice, prompt_scale_mode, ConfigError, Control,
    FrameLog, InitialAngles, LatestFrame, OrbitView, RenderSurface, ScaleMode, ScenarioConfig, SceneAdapter,
    SimulationState, Trail, NVec3, SPEED_MAX, SPEED_MIN,
};

const SHIPPED_SCENARIO: &str = include_str!("../scenarios/solar_system.yaml");

/// Built-in table with every planet starting at angle 0
pub fn aligned_state(scale: ScaleMode) -> SimulationState {
    SimulationState::build(&ScenarioConfig::default(), scale, &InitialAngles::Aligned).unwrap()
}

/// Built-in table with reproducible random start angles
pub fn seeded_state(seed: u64) -> SimulationState {
    SimulationState::build(&ScenarioConfig::default(), ScaleMode::Logarithmic, &InitialAngles::Seeded(seed)).unwrap()
}

pub fn angles(state: &SimulationState) -> Vec<f64> {
    state.system.bodies.iter().map(|b| b.angle()).collect()
}

// ==================================================================================
// Orbit model tests
// ==================================================================================

#[test]
fn orbit_closes_after_one_period() {
    let mut state = seeded_state(7);

    for i in 1..state.system.bodies.len() {
        let start = state.system.bodies[i].angle();
        let period = state.system.bodies[i].period_days;

        // Uneven steps that sum to exactly one period
        let steps = [period * 0.25, period * 0.5, period * 0.125, period * 0.125];
        let mut sys = state.system.clone();
        for dt in steps {
            solarsim::advance_orbits(&mut sys, dt);
        }
        let end = sys.bodies[i].angle();
        assert!(
            angle_delta(end, start).abs() < 1e-9,
            "{} did not close: start {start}, end {end}",
            sys.bodies[i].name
        );
    }

    // Same property through the state's own stepping
    let earth_start = state.system.body("Earth").unwrap().angle();
    for _ in 0..365 {
        state.advance(1.0);
    }
    let earth_end = state.system.body("Earth").unwrap().angle();
    assert!(angle_delta(earth_end, earth_start).abs() < 1e-9);
}

#[test]
fn shorter_period_moves_faster() {
    let mut state = aligned_state(ScaleMode::Realistic);
    state.advance(10.0);

    let orbiting: Vec<_> = state.system.orbiting().collect();
    for a in &orbiting {
        for b in &orbiting {
            if a.period_days < b.period_days {
                assert!(a.angular_velocity() > b.angular_velocity());
                assert!(a.angle() > b.angle(), "{} should lead {}", a.name, b.name);
            }
        }
    }
}

#[test]
fn angle_stays_wrapped() {
    let mut state = seeded_state(3);
    for _ in 0..50 {
        state.advance(37.3);
        for b in &state.system.bodies {
            assert!((0.0..TAU).contains(&b.angle()), "{} angle {} out of range", b.name, b.angle());
        }
    }
}

#[test]
fn central_body_is_fixed_and_has_no_trail() {
    let mut state = seeded_state(11);
    for _ in 0..20 {
        state.step_frame();
    }
    let sun = state.system.central().unwrap();
    assert_eq!(sun.name, "Sun");
    assert_eq!(sun.position(), NVec3::zeros());
    assert_eq!(sun.angle(), 0.0);
    assert!(sun.trail().is_empty());
}

#[test]
fn inclination_tilts_orbit_out_of_ecliptic() {
    let mut state = aligned_state(ScaleMode::Realistic);
    // Quarter orbit puts Mercury at the top of its tilted circle
    state.advance(88.0 / 4.0);
    let mercury = state.system.body("Mercury").unwrap();
    let p = mercury.position();
    let i = 7.0_f64.to_radians();
    assert!(p.x.abs() < 1e-9);
    assert!((p.y - 0.39 * i.cos()).abs() < 1e-9);
    assert!((p.z - 0.39 * i.sin()).abs() < 1e-9);
    assert!((p.norm() - 0.39).abs() < 1e-12);

    let earth = state.system.body("Earth").unwrap();
    assert!(earth.position().z.abs() < 1e-12);
}

#[test]
fn trail_is_bounded_fifo() {
    let mut trail = Trail::new(3);
    for i in 0..5 {
        trail.push(NVec3::new(i as f64, 0.0, 0.0));
        assert!(trail.len() <= 3);
    }
    let xs: Vec<f64> = trail.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    assert_eq!(trail.oldest().unwrap().x, 2.0);
    assert_eq!(trail.newest().unwrap().x, 4.0);
}

#[test]
fn body_trails_never_exceed_bound() {
    let mut state = seeded_state(5);
    let bound = state.parameters.trail_length;
    for frame in 0..(bound + 25) {
        state.step_frame();
        for b in state.system.orbiting() {
            assert!(b.trail().len() <= bound);
            assert_eq!(b.trail().len(), (frame + 1).min(bound));
            assert_eq!(*b.trail().newest().unwrap(), b.position());
        }
    }
}

#[test]
fn paused_advance_changes_nothing() {
    let mut state = seeded_state(9);
    state.step_frame();
    state.step_frame();

    let before_angles = angles(&state);
    let before_trails: Vec<Vec<NVec3>> =
        state.system.bodies.iter().map(|b| b.trail().iter().copied().collect()).collect();
    let before_t = state.elapsed_days();

    state.playback.paused = true;
    state.advance(100.0);
    assert_eq!(state.tick(1.0), 0.0);
    state.step_frame();

    assert_eq!(angles(&state), before_angles);
    let after_trails: Vec<Vec<NVec3>> =
        state.system.bodies.iter().map(|b| b.trail().iter().copied().collect()).collect();
    assert_eq!(after_trails, before_trails);
    assert_eq!(state.elapsed_days(), before_t);
}

#[test]
fn speed_is_clamped() {
    let mut state = seeded_state(1);
    assert_eq!(state.playback.set_speed(0.0), SPEED_MIN);
    assert_eq!(state.playback.set_speed(-4.0), SPEED_MIN);
    assert_eq!(state.playback.set_speed(250.0), SPEED_MAX);
    assert_eq!(state.playback.set_speed(f64::INFINITY), SPEED_MAX);
    assert_eq!(state.playback.set_speed(2.5), 2.5);
    assert_eq!(state.playback.speed(), 2.5);

    let mut adapter = SceneAdapter::for_state(&state);
    adapter.handle(&mut state, Control::SetSpeed(42.0));
    assert_eq!(state.playback.speed(), SPEED_MAX);
}

#[test]
fn tick_scales_with_speed_and_wall_time() {
    let mut state = aligned_state(ScaleMode::Logarithmic);
    let frame = state.parameters.frame_interval;

    assert!((state.tick(frame) - 1.0).abs() < 1e-12);
    state.playback.set_speed(2.0);
    assert!((state.tick(frame * 3.0) - 6.0).abs() < 1e-12);
    assert_eq!(state.tick(-1.0), 0.0);
    assert!((state.elapsed_days() - 7.0).abs() < 1e-12);

    // A long stall is capped rather than jumping a whole orbit
    let jump = state.tick(3600.0);
    assert!(jump > 0.0 && jump <= 10.0 * 2.0 + 1e-12);
}

#[test]
fn earth_half_orbit_lands_opposite() {
    for mode in ScaleMode::ALL {
        let mut state = aligned_state(mode);
        let frame = state.parameters.frame_interval;
        // Half-length frames at time step 1 and speed 1x: 365 * 0.5 = 182.5 days
        for _ in 0..365 {
            state.tick(frame * 0.5);
        }
        assert!((state.elapsed_days() - 182.5).abs() < 1e-9);

        let earth = state.system.body("Earth").unwrap();
        assert!((earth.angle() - PI).abs() < 1e-9, "{mode}: angle {}", earth.angle());

        let adapter = SceneAdapter::for_state(&state);
        let frame = adapter.build_frame(&state);
        let p = frame.body("Earth").unwrap().position;
        let d = mode.distance(1.0);
        assert!((p.x + d).abs() < 1e-9, "{mode}: x {}", p.x);
        assert!(p.y.abs() < 1e-9);
        assert!(p.z.abs() < 1e-9);
    }
}

#[test]
fn seeded_angles_are_reproducible() {
    let a = seeded_state(1234);
    let b = seeded_state(1234);
    let c = seeded_state(4321);
    assert_eq!(angles(&a), angles(&b));
    assert_ne!(angles(&a), angles(&c));
    for b in a.system.orbiting() {
        assert!((0.0..TAU).contains(&b.angle()));
    }

    let aligned = aligned_state(ScaleMode::Artistic);
    assert!(angles(&aligned).iter().all(|&a| a == 0.0));
}

#[test]
fn explicit_angles_follow_table_order() {
    let table = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 7.0];
    let state = SimulationState::build(
        &ScenarioConfig::default(),
        ScaleMode::Realistic,
        &InitialAngles::Explicit(table.to_vec()),
    )
    .unwrap();
    let got = angles(&state);
    for i in 1..8 {
        assert!((got[i] - table[i]).abs() < 1e-12);
    }
    // wrapped into [0, 2pi)
    assert!((got[8] - (7.0 - TAU)).abs() < 1e-12);
    // central body ignores its slot
    assert_eq!(got[0], 0.0);
}

// ==================================================================================
// Scale transform tests
// ==================================================================================

#[test]
fn scale_preserves_order_in_every_mode() {
    let bodies = default_bodies();
    for mode in ScaleMode::ALL {
        for x in &bodies {
            for y in &bodies {
                if x.distance_au < y.distance_au {
                    assert!(
                        mode.distance(x.distance_au) <= mode.distance(y.distance_au),
                        "{mode}: distance order broken for {} / {}",
                        x.name,
                        y.name
                    );
                }
                if x.radius_km < y.radius_km {
                    assert!(
                        mode.radius(x.radius_km) <= mode.radius(y.radius_km),
                        "{mode}: radius order broken for {} / {}",
                        x.name,
                        y.name
                    );
                }
            }
        }
    }
}

#[test]
fn scale_is_monotonic_on_a_sweep() {
    for mode in ScaleMode::ALL {
        let mut prev_d = f64::NEG_INFINITY;
        let mut prev_r = f64::NEG_INFINITY;
        for i in 0..=400 {
            let d = i as f64 * 0.1;
            let r = i as f64 * 2000.0;
            let sd = mode.distance(d);
            let sr = mode.radius(r);
            assert!(sd.is_finite() && sr.is_finite());
            assert!(sd > prev_d, "{mode}: distance not increasing at {d}");
            assert!(sr > prev_r, "{mode}: radius not increasing at {r}");
            prev_d = sd;
            prev_r = sr;
        }
        assert_eq!(mode.distance(0.0), 0.0);
    }
}

#[test]
fn realistic_keeps_true_distances() {
    let mode = ScaleMode::Realistic;
    assert_eq!(mode.distance(5.2), 5.2);
    let p = NVec3::new(3.0, 4.0, 0.0);
    assert!((mode.point(&p) - p).norm() < 1e-12);
    // Sun still fits inside Mercury's orbit
    assert!(mode.radius(696_000.0) < mode.distance(0.39));
}

#[test]
fn display_point_keeps_direction() {
    for mode in ScaleMode::ALL {
        let p = NVec3::new(1.0, 2.0, 0.5);
        let q = mode.point(&p);
        assert!((q.norm() - mode.distance(p.norm())).abs() < 1e-9);
        assert!((q.normalize() - p.normalize()).norm() < 1e-12);
        assert_eq!(mode.point(&NVec3::zeros()), NVec3::zeros());
    }
}

#[test]
fn default_input_selects_logarithmic_and_sun_outranks_mercury() {
    assert_eq!(parse_scale_choice(""), Some(ScaleMode::Logarithmic));
    let mode = parse_scale_choice("").unwrap();
    let sun = mode.radius(696_000.0);
    let mercury = mode.radius(2_440.0);
    assert!(sun.is_finite());
    assert!(sun > mercury);
}

// ==================================================================================
// Prompt tests
// ==================================================================================

fn run_prompt(input: &str) -> (ScaleMode, String) {
    let mut reader = Cursor::new(input.as_bytes().to_vec());
    let mut out = Vec::new();
    let mode = prompt_scale_mode(&mut reader, &mut out).unwrap();
    (mode, String::from_utf8(out).unwrap())
}

#[test]
fn prompt_choices() {
    assert_eq!(run_prompt("1\n").0, ScaleMode::Realistic);
    assert_eq!(run_prompt("2\n").0, ScaleMode::Logarithmic);
    assert_eq!(run_prompt("  3  \n").0, ScaleMode::Artistic);
    assert_eq!(run_prompt("\n").0, ScaleMode::Logarithmic);
}

#[test]
fn prompt_defaults_on_eof_and_garbage() {
    let (mode, out) = run_prompt("");
    assert_eq!(mode, ScaleMode::Logarithmic);
    assert!(out.contains("Using logarithmic"));

    let (mode, out) = run_prompt("banana\n");
    assert_eq!(mode, ScaleMode::Logarithmic);
    assert!(out.contains("Unrecognised choice `banana`"));
    assert_eq!(parse_scale_choice("4"), None);
}

#[test]
fn body_table_lists_every_body() {
    let mut out = Vec::new();
    print_body_table(&mut out, &default_bodies()).unwrap();
    let text = String::from_utf8(out).unwrap();
    for b in default_bodies() {
        assert!(text.contains(&b.name));
    }
    assert!(text.contains("696,000"));
    assert!(text.contains("60,190"));
    assert_eq!(group_thousands(88.0), "88");
    assert_eq!(group_thousands(1000.0), "1,000");
    assert_eq!(group_thousands(0.0), "0");
}

// ==================================================================================
// Configuration tests
// ==================================================================================

#[test]
fn shipped_scenario_matches_builtin_table() {
    let cfg = ScenarioConfig::from_yaml_str(SHIPPED_SCENARIO).unwrap();
    assert_eq!(cfg.engine.scale_mode, Some(ScaleMode::Logarithmic));
    assert_eq!(cfg.parameters.seed, Some(42));
    assert_eq!(cfg.bodies.len(), 9);

    for (a, b) in cfg.bodies.iter().zip(default_bodies()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.radius_km, b.radius_km);
        assert_eq!(a.distance_au, b.distance_au);
        assert_eq!(a.period_days, b.period_days);
        assert_eq!(a.color, b.color);
        assert_eq!(a.inclination_deg, b.inclination_deg);
    }

    assert_eq!(SimulationState::scenario_angles(&cfg), InitialAngles::Seeded(42));
}

#[test]
fn empty_yaml_falls_back_to_defaults() {
    let cfg = ScenarioConfig::from_yaml_str("{}").unwrap();
    assert_eq!(cfg.bodies.len(), 9);
    assert_eq!(cfg.parameters.trail_length, 100);
    assert_eq!(cfg.engine.scale_mode, None);
    assert_eq!(SimulationState::scenario_angles(&cfg), InitialAngles::Entropy);
}

#[test]
fn yaml_parameters_reach_the_state() {
    let yaml = r##"
parameters:
  time_step: 2.0
  frame_interval_ms: 100
  trail_length: 5
  speed: 50.0
  aligned_start: true
bodies:
  - { name: Sun, radius_km: 696000, distance_au: 0, period_days: 0, color: "#FDB813" }
  - { name: Earth, radius_km: 6371, distance_au: 1.0, period_days: 365, color: "#4169E1" }
"##;
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
    let angles = SimulationState::scenario_angles(&cfg);
    assert_eq!(angles, InitialAngles::Aligned);

    let mut state = SimulationState::build(&cfg, ScaleMode::Artistic, &angles).unwrap();
    assert_eq!(state.parameters.trail_length, 5);
    assert!((state.parameters.frame_interval - 0.1).abs() < 1e-12);
    assert_eq!(state.playback.speed(), SPEED_MAX);

    // 2 days per nominal frame at 10x
    assert!((state.step_frame() - 20.0).abs() < 1e-12);
}

#[test]
fn explicit_yaml_angles_win() {
    let yaml = r##"
parameters:
  seed: 5
bodies:
  - { name: Sun, radius_km: 696000, distance_au: 0, period_days: 0, color: "#FDB813", initial_angle_deg: 0 }
  - { name: Earth, radius_km: 6371, distance_au: 1.0, period_days: 365, color: "#4169E1", initial_angle_deg: 90 }
"##;
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
    let angles = SimulationState::scenario_angles(&cfg);
    let state = SimulationState::build(&cfg, ScaleMode::Realistic, &angles).unwrap();
    let earth = state.system.body("Earth").unwrap();
    assert!((earth.angle() - PI / 2.0).abs() < 1e-12);
    assert!((earth.position() - NVec3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
}

fn config_with(mutate: impl FnOnce(&mut ScenarioConfig)) -> ScenarioConfig {
    let mut cfg = ScenarioConfig::default();
    mutate(&mut cfg);
    cfg
}

#[test]
fn invalid_configs_are_rejected() {
    let bad_color = config_with(|c| c.bodies[3].color = "blue-ish".into());
    assert!(matches!(bad_color.validate(), Err(ConfigError::InvalidColor { .. })));

    let zero_period = config_with(|c| c.bodies[2].period_days = 0.0);
    assert!(matches!(zero_period.validate(), Err(ConfigError::InvalidBody { .. })));

    let negative_period = config_with(|c| c.bodies[2].period_days = -3.0);
    assert!(matches!(negative_period.validate(), Err(ConfigError::InvalidBody { .. })));

    let duplicate = config_with(|c| c.bodies[4].name = "Earth".into());
    assert!(matches!(duplicate.validate(), Err(ConfigError::DuplicateName(n)) if n == "Earth"));

    let two_suns = config_with(|c| {
        let mut extra = c.bodies[0].clone();
        extra.name = "Nemesis".into();
        c.bodies.push(extra);
    });
    assert!(matches!(two_suns.validate(), Err(ConfigError::MultipleCentral(..))));

    let no_bodies = config_with(|c| c.bodies.clear());
    assert!(matches!(no_bodies.validate(), Err(ConfigError::NoBodies)));

    let no_trail = config_with(|c| c.parameters.trail_length = 0);
    assert!(matches!(no_trail.validate(), Err(ConfigError::NonPositive("trail_length"))));

    let no_step = config_with(|c| c.parameters.time_step = 0.0);
    assert!(matches!(no_step.validate(), Err(ConfigError::NonPositive("time_step"))));

    let partial = config_with(|c| c.bodies[1].initial_angle_deg = Some(10.0));
    assert!(matches!(partial.validate(), Err(ConfigError::PartialAngles { given: 1, total: 9 })));

    assert!(SimulationState::build(&bad_color, ScaleMode::Logarithmic, &InitialAngles::Aligned).is_err());
}

#[test]
fn malformed_yaml_is_an_error() {
    assert!(matches!(
        ScenarioConfig::from_yaml_str("bodies: [ { name: Sun } ]"),
        Err(ConfigError::Yaml(_))
    ));
    assert!(matches!(
        ScenarioConfig::from_yaml_str("engine: { scale_mode: cubist }"),
        Err(ConfigError::Yaml(_))
    ));
}

// ==================================================================================
// Scene adapter tests
// ==================================================================================

#[test]
fn frame_respects_visibility_toggles() {
    let mut state = seeded_state(21);
    for _ in 0..10 {
        state.step_frame();
    }
    let mut adapter = SceneAdapter::for_state(&state);

    let frame = adapter.build_frame(&state);
    assert_eq!(frame.bodies.len(), 9);
    for b in &frame.bodies {
        assert!(b.label.is_some());
        if b.central {
            assert!(b.trail.is_none());
            assert!(b.orbit_path.is_none());
        } else {
            assert_eq!(b.trail.as_ref().unwrap().len(), 10);
            assert!(b.orbit_path.as_ref().unwrap().len() > 2);
        }
    }

    adapter.handle(&mut state, Control::ToggleOrbits);
    adapter.handle(&mut state, Control::ToggleLabels);
    let frame = adapter.build_frame(&state);
    for b in &frame.bodies {
        assert!(b.label.is_none());
        assert!(b.trail.is_none());
        assert!(b.orbit_path.is_none());
    }
}

#[test]
fn frame_geometry_is_scaled() {
    let mut state = seeded_state(8);
    for _ in 0..5 {
        state.step_frame();
    }
    let adapter = SceneAdapter::for_state(&state);
    let frame = adapter.build_frame(&state);
    let mode = state.scale_mode;

    for (prim, body) in frame.bodies.iter().zip(&state.system.bodies) {
        assert_eq!(prim.name, body.name);
        assert!((prim.radius - mode.radius(body.radius_km)).abs() < 1e-12);
        assert!((prim.position.norm() - mode.distance(body.distance_au)).abs() < 1e-9);
        let label = prim.label.as_ref().unwrap();
        assert!(label.anchor.z > prim.position.z);
        if let Some(trail) = &prim.trail {
            for p in trail {
                assert!((p.norm() - mode.distance(body.distance_au)).abs() < 1e-9);
            }
            assert!((trail.last().unwrap() - prim.position).norm() < 1e-12);
        }
        if let Some(path) = &prim.orbit_path {
            assert!((path.first().unwrap() - path.last().unwrap()).norm() < 1e-9);
        }
    }
    assert!((frame.extent - mode.distance(30.07)).abs() < 1e-12);
}

#[test]
fn title_reflects_scale_and_pause() {
    let mut state = aligned_state(ScaleMode::Artistic);
    let mut adapter = SceneAdapter::for_state(&state);
    assert_eq!(adapter.scale(), ScaleMode::Artistic);
    assert_eq!(adapter.build_frame(&state).title, "Solar System Simulator - Scale: Artistic");

    adapter.handle(&mut state, Control::TogglePause);
    assert!(state.playback.paused);
    let frame = adapter.build_frame(&state);
    assert!(frame.paused);
    assert!(frame.title.ends_with("[PAUSED]"));

    adapter.handle(&mut state, Control::TogglePause);
    assert!(!state.playback.paused);
}

#[test]
fn render_presents_to_surface() {
    let state = seeded_state(2);
    let adapter = SceneAdapter::for_state(&state);
    let mut latest = LatestFrame::default();
    adapter.render(&state, &mut latest);
    adapter.render(&state, &mut latest);
    assert_eq!(latest.presented, 2);
    assert_eq!(latest.frame, adapter.build_frame(&state));

    let surface: &mut dyn RenderSurface = &mut latest;
    adapter.render(&state, surface);
    assert_eq!(latest.presented, 3);
}

// ==================================================================================
// View tests
// ==================================================================================

#[test]
fn zoom_stays_positive_and_bounded() {
    let mut view = OrbitView::new(7.5);
    let (lo, hi) = view.distance_bounds();
    assert!(lo > 0.0);

    for _ in 0..500 {
        view.zoom(3.0);
    }
    assert!((view.distance() - lo).abs() < 1e-12);

    for _ in 0..500 {
        view.zoom(-3.0);
    }
    assert!((view.distance() - hi).abs() < 1e-9);

    view.zoom(f64::NAN);
    assert!(view.distance() > 0.0);
}

#[test]
fn rotation_clamps_elevation_and_wraps_azimuth() {
    let mut view = OrbitView::new(10.0);
    view.rotate(0.0, 10_000.0);
    assert!(view.elevation_deg() <= 89.0);
    view.rotate(0.0, -20_000.0);
    assert!(view.elevation_deg() >= -89.0);

    for _ in 0..100 {
        view.rotate(123.0, 0.0);
        assert!((0.0..360.0).contains(&view.azimuth_deg()));
    }
}

#[test]
fn pan_stays_near_scene() {
    let mut view = OrbitView::new(5.0);
    for _ in 0..1000 {
        view.pan(500.0, -300.0);
    }
    assert!(view.focus().norm() <= 5.0 + 1e-9);
    assert!(view.focus().norm() > 0.0);
}

#[test]
fn reset_view_restores_defaults() {
    let mut state = seeded_state(4);
    let mut adapter = SceneAdapter::for_state(&state);
    let initial = adapter.view().clone();

    adapter.handle(&mut state, Control::Rotate { dx: 40.0, dy: -25.0 });
    adapter.handle(&mut state, Control::Pan { dx: 10.0, dy: 10.0 });
    adapter.handle(&mut state, Control::Zoom(4.0));
    assert_ne!(adapter.view(), &initial);

    adapter.handle(&mut state, Control::ResetView);
    let view = adapter.view();
    assert_eq!(view, &initial);
    assert_eq!(view.elevation_deg(), RESET_ELEVATION_DEG);
    assert_eq!(view.azimuth_deg(), RESET_AZIMUTH_DEG);
    assert_eq!(view.focus(), NVec3::zeros());
}

#[test]
fn camera_basis_is_orthonormal() {
    let mut view = OrbitView::new(3.0);
    view.rotate(77.0, 31.0);
    let (d, r, u) = (view.direction(), view.right(), view.up());
    assert!((d.norm() - 1.0).abs() < 1e-12);
    assert!((r.norm() - 1.0).abs() < 1e-12);
    assert!((u.norm() - 1.0).abs() < 1e-12);
    assert!(d.dot(&r).abs() < 1e-12);
    assert!(d.dot(&u).abs() < 1e-12);
    assert!(r.dot(&u).abs() < 1e-12);
    assert!(((view.eye() - view.focus()).norm() - view.distance()).abs() < 1e-9);
}

#[test]
fn gestures_leave_playback_alone() {
    let mut state = seeded_state(6);
    let mut adapter = SceneAdapter::for_state(&state);
    let before = state.playback.clone();
    for c in [
        Control::Rotate { dx: 1.0, dy: 1.0 },
        Control::Pan { dx: 1.0, dy: 1.0 },
        Control::Zoom(1.0),
    ] {
        assert!(c.is_gesture());
        adapter.handle(&mut state, c);
    }
    assert_eq!(state.playback.speed(), before.speed());
    assert_eq!(state.playback.paused, before.paused);
    assert!(!Control::TogglePause.is_gesture());
}

// ==================================================================================
// Headless app tests
// ==================================================================================

#[test]
fn headless_app_steps_one_frame_per_update() {
    let state = aligned_state(ScaleMode::Logarithmic);
    let mut app = build_headless_app(state);
    for _ in 0..30 {
        app.update();
    }

    let state = app.world().resource::<SimulationState>();
    assert!((state.elapsed_days() - 30.0).abs() < 1e-9);
    let earth = state.system.body("Earth").unwrap();
    assert!((earth.angle() - TAU * 30.0 / 365.0).abs() < 1e-9);

    let log = app.world().resource::<FrameLog>();
    assert_eq!(log.frames, 30);
    let last = log.last.as_ref().unwrap();
    assert!((last.elapsed_days - 30.0).abs() < 1e-9);
}

#[test]
fn headless_app_respects_pause() {
    let state = aligned_state(ScaleMode::Realistic);
    let mut app = build_headless_app(state);
    app.update();
    app.world_mut().resource_mut::<SimulationState>().playback.paused = true;
    for _ in 0..10 {
        app.update();
    }
    let state = app.world().resource::<SimulationState>();
    assert!((state.elapsed_days() - 1.0).abs() < 1e-12);
    assert_eq!(app.world().resource::<FrameLog>().frames, 11);
}
