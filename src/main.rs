use pendsim::{Scenario, ScenarioConfig};
use pendsim::{bench_step, bench_drift_curve};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, looked up under `scenarios/` unless it exists as given
    #[arg(short, default_value = "double_intro.yaml")]
    file_name: String,

    /// Write bob positions for every frame to this CSV file
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Run the stepping benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing {}", config_path.display()))?;

    info!("loaded scenario {} ({} pendulum entries)", config_path.display(), scenario_cfg.pendulums.len());
    Ok(scenario_cfg)
}

fn write_frame(out: &mut impl Write, frame: usize, scenario: &Scenario) -> Result<()> {
    for (i, tracked) in scenario.pendulums.iter().enumerate() {
        for (b, bob) in tracked.pendulum.bob_positions().iter().enumerate() {
            writeln!(out, "{},{:.6},{},{},{:.6},{:.6}", frame, scenario.t, i, b, bob.x, bob.y)?;
        }
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg).context("building scenario")?;

    let mut trace = match &args.trace {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut w = BufWriter::new(file);
            writeln!(w, "frame,t,pendulum,bob,x,y")?;
            write_frame(&mut w, 0, &scenario)?;
            Some(w)
        }
        None => None,
    };

    let frames = scenario.parameters.frames();
    let frames_per_second = (1.0 / scenario.parameters.dt).round().max(1.0) as usize;
    info!("running {} frames with {} pendulums", frames, scenario.pendulums.len());

    for frame in 1..=frames {
        scenario.step()?;
        if let Some(w) = trace.as_mut() {
            write_frame(w, frame, &scenario)?;
        }
        if frame % frames_per_second == 0 {
            debug!("t = {:.2} s", scenario.t);
        }
    }

    if let Some(mut w) = trace {
        w.flush()?;
    }

    for (i, tracked) in scenario.pendulums.iter().enumerate() {
        let drift = tracked.monitor.max_drift();
        info!("pendulum {i}: E0 = {:.6}, max relative drift = {:.3e}", tracked.monitor.baseline(), drift);
        if drift > scenario.parameters.drift_warn {
            warn!("pendulum {i}: energy drift {:.3e} above {:.3e}", drift, scenario.parameters.drift_warn);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_step()?;
        bench_drift_curve()?;
        return Ok(());
    }

    run(&args)
}
