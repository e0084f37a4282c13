use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use clap::Parser;

use keysweep::io::{FileSink, load_targets};
use keysweep::search::{ContinueDecision, SearchConfig, SearchState, run};
use keysweep::{MatchEngine, MatchPolicy};

#[derive(Parser)]
#[command(
    name = "keysweep",
    about = "Sweeps random prefix blocks of the secp256k1 key space against a target address list"
)]
struct Args {
    /// Target address list, one per line; blank lines and # comments ignored.
    #[arg(long)]
    targets: PathBuf,

    /// Append-only match output file.
    #[arg(long, default_value = "output.txt")]
    output: PathBuf,

    /// Characters compared under the prefix match policy; 0 switches to
    /// exact full-string matching.
    #[arg(long, default_value_t = 4)]
    prefix_len: usize,

    /// Suffix-scan worker threads.
    #[arg(long, default_value_t = num_cpus::get())]
    threads: usize,

    /// Suffixes between status dumps (0 disables them).
    #[arg(long, default_value_t = 1000)]
    status_interval: u16,

    /// Headless mode: skip the between-block prompt and keep scanning
    /// until Ctrl-C.
    #[arg(long)]
    yes: bool,
}

/// Interactive between-block control: anything but y/Y stops.
struct Prompt;

impl ContinueDecision for Prompt {
    fn continue_scanning(&mut self, _state: &SearchState) -> bool {
        print!("Continue with next prefix? [y/n]: ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return false;
        }
        input.trim().eq_ignore_ascii_case("y")
    }
}

/// Headless control: scan until the cancellation flag is raised.
struct AutoContinue {
    cancel: Arc<AtomicBool>,
}

impl ContinueDecision for AutoContinue {
    fn continue_scanning(&mut self, _state: &SearchState) -> bool {
        !self.cancel.load(Ordering::SeqCst)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    ctrlc::set_handler(move || {
        println!("Shutting down...");
        flag.store(true, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    let targets = load_targets(&args.targets)
        .with_context(|| format!("loading targets from {}", args.targets.display()))?;
    println!("{} addresses loaded.", targets.len());

    let policy = if args.prefix_len == 0 {
        MatchPolicy::Exact
    } else {
        MatchPolicy::Prefix(args.prefix_len)
    };
    let engine = MatchEngine::new(policy, &targets);
    let mut sink = FileSink::open(&args.output)
        .with_context(|| format!("opening match output {}", args.output.display()))?;

    let config = SearchConfig {
        threads: args.threads.max(1),
        status_interval: args.status_interval,
    };
    println!("Using {} threads", config.threads);

    let state = if args.yes {
        let mut decision = AutoContinue {
            cancel: Arc::clone(&cancel),
        };
        run(&config, &engine, &mut sink, &cancel, &mut decision)?
    } else {
        let mut decision = Prompt;
        run(&config, &engine, &mut sink, &cancel, &mut decision)?
    };

    println!(
        "Exiting. {} blocks, {} keys scanned, {} matches recorded.",
        state.blocks_completed, state.keys_scanned, state.matches_found
    );
    Ok(())
}
