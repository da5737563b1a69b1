//! Kong Dash entry point
//!
//! Native: a headless runner that drives the simulation at a fixed frame
//! rate (optionally on autopilot), prints a run summary and keeps the best
//! score in a JSON file. The browser build is driven from JS through
//! `kong_dash::platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;

    use kong_dash::best_score::{BestScoreStore, JsonFileStore};
    use kong_dash::sim::{FrameSnapshot, GameEvent, GamePhase, GameState, Intent, TickInput, tick};
    use kong_dash::tuning::Tuning;

    /// Headless Kong Dash runner
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// RNG seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Simulated seconds to run
        #[arg(long, default_value_t = 60.0)]
        seconds: f32,

        /// Host frame rate
        #[arg(long, default_value_t = 60.0)]
        fps: f32,

        /// Tuning JSON file
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Best score file
        #[arg(long, default_value = "kong_dash_best.json")]
        best_file: PathBuf,

        /// Let the autopilot play
        #[arg(long)]
        autopilot: bool,

        /// Print the final frame snapshot as JSON
        #[arg(long)]
        snapshot: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    }

    fn init_logging(verbose: bool) {
        let default = if verbose { "debug" } else { "info" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
            .init();
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let args = Args::parse();
        init_logging(args.verbose);

        if args.fps <= 0.0 || args.seconds < 0.0 {
            return Err("--fps must be positive and --seconds non-negative".into());
        }

        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };

        let mut store = JsonFileStore::new(&args.best_file);
        let seed = args.seed.unwrap_or_else(rand::random::<u64>);
        let mut state = GameState::with_tuning(seed, tuning, store.load());
        log::info!("Kong Dash (native) starting with seed {}", seed);

        let dt = 1.0 / args.fps;
        let frames = (args.seconds * args.fps).ceil() as u64;
        let mut input = TickInput {
            autopilot: args.autopilot,
            ..Default::default()
        };
        input.press(Intent::Start);

        let mut hits = 0u32;
        let mut attacks = 0u32;
        for _ in 0..frames {
            tick(&mut state, &input, dt);
            input.clear_intents();

            for event in state.drain_events() {
                match event {
                    GameEvent::PlayerHit { .. } => hits += 1,
                    GameEvent::AttackLanded { .. } => attacks += 1,
                    GameEvent::NewBestScore(best) => store.save(best)?,
                    _ => {}
                }
            }

            if state.phase == GamePhase::GameOver {
                break;
            }
        }

        println!(
            "phase={:?} score={} best={} lives={} hits={} kong_landings={} sim_time={:.1}s",
            state.phase,
            state.display_score(),
            state.best_score,
            state.lives,
            hits,
            attacks,
            state.time_ms / 1000.0
        );
        if args.snapshot {
            println!("{}", FrameSnapshot::capture(&state).to_json());
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = native::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser build starts from `platform::web::wasm_start`
}
