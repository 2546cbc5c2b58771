//! Mini Golf entry point
//!
//! Headless runner: loads a course, lets the demo player play it on the
//! fixed-timestep loop and logs every event and the final scorecard.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;

    use mini_golf::consts::*;
    use mini_golf::demo::DemoPlayer;
    use mini_golf::sim::{Course, GameEvent, HoleState, tick};
    use mini_golf::{GolfError, Scorecard, Settings};

    /// Host frame length; not a multiple of the sim step on purpose
    const FRAME_DT: f32 = 1.0 / 50.0;
    /// Hard stop per hole, in frames
    const MAX_FRAMES_PER_HOLE: u32 = 60_000;

    #[derive(Parser, Debug)]
    #[command(version, about = "Headless mini golf simulator")]
    pub struct Args {
        /// Course JSON file (built-in sample course if omitted)
        #[arg(long)]
        pub course: Option<PathBuf>,
        /// Settings JSON file
        #[arg(long)]
        pub settings: Option<PathBuf>,
        /// Tree placement seed (overrides settings)
        #[arg(long)]
        pub seed: Option<u64>,
        /// Play only this hole (1-based)
        #[arg(long)]
        pub hole: Option<usize>,
        /// Keep full paths in aim previews
        #[arg(long)]
        pub debug_preview: bool,
        /// Strokes before the demo player picks up
        #[arg(long, default_value_t = 10)]
        pub max_strokes: u32,
    }

    /// Game instance for one hole
    struct Game {
        state: HoleState,
        demo: DemoPlayer,
        accumulator: f32,
        frames: u32,
    }

    impl Game {
        fn new(state: HoleState, demo: DemoPlayer) -> Self {
            Self {
                state,
                demo,
                accumulator: 0.0,
                frames: 0,
            }
        }

        fn finished(&self) -> bool {
            self.state.is_complete() || self.demo.conceded(&self.state)
        }

        /// Run simulation ticks for one host frame
        fn update(&mut self, dt: f32) -> Vec<GameEvent> {
            let dt = dt.min(0.1);
            self.accumulator += dt;
            self.frames += 1;

            let mut events = Vec::new();
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.demo.next_input(&self.state);
                events.extend(tick(&mut self.state, &input, SIM_DT));
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            events
        }
    }

    fn load_course(args: &Args) -> Result<Course, GolfError> {
        match &args.course {
            Some(path) => Course::load(path),
            None => Ok(Course::sample()),
        }
    }

    pub fn run() -> Result<(), GolfError> {
        let args = Args::parse();

        let mut settings = args
            .settings
            .as_deref()
            .map(Settings::load_from)
            .unwrap_or_default();
        if let Some(seed) = args.seed {
            settings.tree_seed = seed;
        }
        settings.debug_preview |= args.debug_preview;

        let course = load_course(&args)?;
        log::info!(
            "Course '{}': {} holes, par {}",
            course.name,
            course.holes.len(),
            course.total_par()
        );

        let indices: Vec<usize> = match args.hole {
            Some(n) if n >= 1 && n <= course.holes.len() => vec![n - 1],
            Some(n) => {
                return Err(GolfError::Validation(format!(
                    "hole {} not on this course (1..={})",
                    n,
                    course.holes.len()
                )));
            }
            None => (0..course.holes.len()).collect(),
        };

        let mut card = Scorecard::new();
        for index in indices {
            let Some(hole) = course.hole(index) else {
                continue;
            };
            let mut state = HoleState::new(
                hole.clone(),
                course.world,
                settings.seed_for_hole(index),
                settings.tree_count,
            );
            state.debug_preview = settings.debug_preview;

            let mut game = Game::new(state, DemoPlayer::new(args.max_strokes));
            while !game.finished() && game.frames < MAX_FRAMES_PER_HOLE {
                for event in game.update(FRAME_DT) {
                    log::info!("hole {} event: {}", index + 1, serde_json::to_string(&event)?);
                }
            }

            if !game.state.is_complete() {
                log::warn!(
                    "Hole {} abandoned after {} strokes",
                    index + 1,
                    game.state.ball.strokes
                );
            }
            card.record(index + 1, game.state.ball.strokes, hole.par);
        }

        for entry in &card.entries {
            println!(
                "Hole {:>2}  par {}  {:>2}  {}",
                entry.hole,
                entry.par,
                entry.strokes,
                entry.label().as_str()
            );
        }
        println!(
            "Total {} (par {}, {})",
            card.total_strokes(),
            card.total_par(),
            card.to_par_string()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mini Golf (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host; the library is driven directly
}
