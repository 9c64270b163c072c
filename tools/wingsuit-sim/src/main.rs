//! wingsuit-sim: headless driver. Runs one session for a fixed number of
//! frames with a scripted control timeline and prints a summary.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wingsuit_core::{GenerationCounts, WorldConfig};
use wingsuit_game::{Game, GameState};

#[derive(Parser, Debug)]
#[command(name = "wingsuit-sim", about = "Run a headless wingsuit session")]
struct Args {
    /// Fixed seed; omitted means a fresh layout every run.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 3600)]
    frames: u32,
    /// Frame time in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// JSON world config; missing fields take defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the per-segment obstacle population.
    #[arg(long, value_enum)]
    counts: Option<CountsPreset>,
    /// Control cue `FRAME:press|release:NAME`, e.g. `120:press:dive`. Repeatable.
    #[arg(long = "at", value_parser = parse_cue)]
    cues: Vec<Cue>,
    /// Do not press pause on frame 0 to start the run.
    #[arg(long, default_value_t = false)]
    no_start: bool,
    /// Keep stepping after the run ends.
    #[arg(long, default_value_t = false)]
    keep_going: bool,
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum CountsPreset {
    Classic,
    Extended,
    #[value(name = "none")]
    Empty,
}

impl From<CountsPreset> for GenerationCounts {
    fn from(p: CountsPreset) -> Self {
        match p {
            CountsPreset::Classic => GenerationCounts::classic(),
            CountsPreset::Extended => GenerationCounts::extended(),
            CountsPreset::Empty => GenerationCounts::none(),
        }
    }
}

#[derive(Clone, Debug)]
struct Cue {
    frame: u32,
    press: bool,
    control: String,
}

fn parse_cue(s: &str) -> Result<Cue> {
    let mut parts = s.splitn(3, ':');
    let (Some(frame), Some(edge), Some(control)) = (parts.next(), parts.next(), parts.next()) else {
        bail!("expected FRAME:press|release:NAME, got {s:?}");
    };
    let frame = frame.parse().with_context(|| format!("bad frame in cue {s:?}"))?;
    let press = match edge {
        "press" | "down" => true,
        "release" | "up" => false,
        other => return Err(anyhow!("cue edge must be press or release, got {other:?}")),
    };
    Ok(Cue { frame, press, control: control.to_string() })
}

#[derive(Serialize)]
struct Summary {
    seed: Option<u64>,
    frames: u32,
    state: GameState,
    elapsed: f32,
    rings_collected: u32,
    rings_total: usize,
    position: [f32; 3],
    speed: f32,
    resets: u64,
    ledger_events: usize,
    draw_requests: BTreeMap<String, usize>,
    hash: String,
}

fn load_config(args: &Args) -> Result<WorldConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            WorldConfig::from_json_str(&text).with_context(|| format!("loading {}", path.display()))?
        }
        None => WorldConfig::default(),
    };
    if let Some(preset) = args.counts {
        cfg = cfg.with_counts(preset.into());
    }
    Ok(cfg)
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    if !(args.dt.is_finite() && args.dt >= 0.0) {
        bail!("--dt must be a non-negative number, got {}", args.dt);
    }

    let cfg = load_config(&args)?;
    let mut game = match args.seed {
        Some(seed) => Game::with_seed(cfg, seed),
        None => Game::new(cfg),
    }
    .context("invalid world config")?;

    let mut cues = args.cues.clone();
    cues.sort_by_key(|c| c.frame);
    let mut next_cue = 0usize;

    if !args.no_start {
        game.on_control_press(wingsuit_game::Control::Pause);
    }

    let mut frames = 0u32;
    for frame in 0..args.frames {
        while let Some(cue) = cues.get(next_cue).filter(|c| c.frame <= frame) {
            let known = if cue.press {
                game.on_control_press_named(&cue.control)
            } else {
                game.on_control_release_named(&cue.control)
            };
            if !known { warn!(frame, control = %cue.control, "unknown control in cue"); }
            next_cue += 1;
        }
        game.step(args.dt);
        frames = frame + 1;
        if game.state().is_terminal() && !args.keep_going { break; }
    }

    let mut draw_requests = BTreeMap::new();
    game.for_each_drawable(|r| *draw_requests.entry(format!("{:?}", r.shape)).or_insert(0usize) += 1);

    let p = game.player().state();
    let summary = Summary {
        seed: args.seed,
        frames,
        state: game.state(),
        elapsed: game.elapsed(),
        rings_collected: game.rings_collected(),
        rings_total: game.rings().len(),
        position: p.position.to_array(),
        speed: p.speed,
        resets: game.generation(),
        ledger_events: game.ledger().len(),
        draw_requests,
        hash: hex(&game.state_hash()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        info!(frames, state = ?summary.state, "run finished");
        println!("state      {:?}", summary.state);
        println!("frames     {}", summary.frames);
        println!("elapsed    {:.2}s", summary.elapsed);
        println!("rings      {}/{}", summary.rings_collected, summary.rings_total);
        println!("position   ({:.1}, {:.1}, {:.1})", p.position.x, p.position.y, p.position.z);
        println!("speed      {:.2}", summary.speed);
        println!("hash       {}", summary.hash);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_parsing() {
        let c = parse_cue("120:press:bank_left").unwrap();
        assert_eq!((c.frame, c.press, c.control.as_str()), (120, true, "bank_left"));
        assert!(!parse_cue("5:up:dive").unwrap().press);
        assert!(parse_cue("x:press:dive").is_err());
        assert!(parse_cue("5:hold:dive").is_err());
        assert!(parse_cue("5:press").is_err());
    }

    #[test]
    fn args_parse() {
        let a = Args::try_parse_from(["wingsuit-sim", "--seed", "3", "--counts", "none", "--at", "0:press:dive"]).unwrap();
        assert_eq!(a.seed, Some(3));
        assert_eq!(a.cues.len(), 1);
        assert!(matches!(a.counts, Some(CountsPreset::Empty)));
    }

    #[test]
    fn hex_is_lowercase_pairs() {
        assert_eq!(hex(&[0x0f, 0xa0]), "0fa0");
    }
}
