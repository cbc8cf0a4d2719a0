use solarsim::{ScenarioConfig, SimulationState, ScaleMode, InitialAngles};
use solarsim::{run_3d, run_headless};
use solarsim::configuration::prompt::{print_banner, print_body_table, print_controls, prompt_scale_mode, rule};

use anyhow::{bail, Context, Result};
use bevy::app::AppExit;
use clap::Parser;

use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Interactive 3D solar system with circular orbits")]
struct Args {
    /// Scenario YAML, as a path or a name under scenarios/
    #[arg(short, long)]
    file_name: Option<String>,

    /// Scale mode; prompts when neither this nor the scenario sets one
    #[arg(short, long, value_enum)]
    scale: Option<ScaleMode>,

    /// Seed for reproducible start angles
    #[arg(long)]
    seed: Option<u64>,

    /// Start every planet at angle 0
    #[arg(long)]
    aligned: bool,

    /// Run this many frames without a window and print the result
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,
}

// load here to keep main clean
fn load_scenario(file_name: Option<&str>) -> Result<ScenarioConfig> {
    let Some(file_name) = file_name else {
        return Ok(ScenarioConfig::default());
    };

    let direct = PathBuf::from(file_name);
    let config_path = if direct.exists() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))
}

fn start_angles(args: &Args, cfg: &ScenarioConfig) -> InitialAngles {
    if args.aligned {
        InitialAngles::Aligned
    } else if let Some(seed) = args.seed {
        InitialAngles::Seeded(seed)
    } else {
        SimulationState::scenario_angles(cfg)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut out = io::stdout();

    print_banner(&mut out)?;
    println!("\n[1/4] Initializing solar system...");
    let scenario_cfg = load_scenario(args.file_name.as_deref())?;
    println!("✓ Loaded {} celestial bodies", scenario_cfg.bodies.len());

    let scale_mode = match args.scale.or(scenario_cfg.engine.scale_mode) {
        Some(mode) => {
            println!("\n[2/4] Scale mode: {mode}");
            mode
        }
        None => prompt_scale_mode(&mut io::stdin().lock(), &mut out)?,
    };

    println!("\n[3/4] Creating solar system simulation...");
    let state = SimulationState::build(&scenario_cfg, scale_mode, &start_angles(&args, &scenario_cfg))?;
    print_body_table(&mut out, &scenario_cfg.bodies)?;

    if let Some(frames) = args.headless {
        println!("\n[4/4] Running {frames} frames headless...");
        let state = run_headless(state, frames);
        print_final_positions(&mut out, &state)?;
        return Ok(());
    }

    println!("\n[4/4] Launching interactive 3D visualization...");
    print_controls(&mut out, &scenario_cfg.bodies)?;
    println!("\nClose the window to exit.");
    println!("\nStarting simulation...\n");
    out.flush()?;

    let exit = run_3d(state);

    println!("\n{}", rule('='));
    println!("Simulation ended. Thank you for exploring the solar system!");
    println!("{}", rule('='));

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => bail!("viewer exited with status {code}"),
    }
}

fn print_final_positions(out: &mut impl Write, state: &SimulationState) -> io::Result<()> {
    writeln!(out, "\nAfter {:.1} simulated days ({} scale):", state.elapsed_days(), state.scale_mode)?;
    writeln!(out, "{:<12} {:>10} {:>10} {:>10} {:>10}", "Body", "Angle (°)", "x (AU)", "y (AU)", "z (AU)")?;
    writeln!(out, "{}", rule('-'))?;
    for b in &state.system.bodies {
        let p = b.position();
        writeln!(
            out,
            "{:<12} {:>10.2} {:>10.4} {:>10.4} {:>10.4}",
            b.name,
            b.angle().to_degrees(),
            p.x,
            p.y,
            p.z
        )?;
    }
    writeln!(out, "{}", rule('='))
}
