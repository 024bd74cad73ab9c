use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use common::error::FillError;
use common::filler;
use common::playlist::load_playlist;
use common::size::parse_size;
use common::types::{ByteLimit, CandidateList, FillConfig, Opts, RetryLimit};
use env_logger::Env;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::io::{self, BufReader};
use std::process::exit;

#[derive(Parser)]
#[clap(version, about = "Fills a music player with random songs from a playlist", long_about = None)]
struct Cli {
    /// Copy parent directory structure to the given height above each file
    #[clap(short, long, default_value_t = 0, value_name = "DEPTH")]
    parents: usize,
    /// List file names, but don't copy anything. Implies -v
    #[clap(short, long)]
    dry_run: bool,
    /// Fill all the remaining free space on the device (default behaviour)
    #[clap(short, long)]
    fill: bool,
    /// Copy at most this many files
    #[clap(short, long)]
    number: Option<usize>,
    /// Copy at most this much data. Accepts unit abbreviations, e.g. MB, KiB
    #[clap(short, long)]
    size: Option<String>,
    /// If a file doesn't fit, keep trying smaller ones. Optionally limit the number of
    /// consecutive misses with -t=N. May be slow
    #[clap(
        short = 't',
        long = "try-smaller-files",
        value_name = "TRIES",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "all",
        value_parser = parse_tries
    )]
    tries: Option<RetryLimit>,
    /// Be verbose
    #[clap(short, long)]
    verbose: bool,
    /// Seed the random number generator, to repeat a selection
    #[clap(long)]
    seed: Option<u64>,
    /// The target directory on the device
    target: Utf8PathBuf,
    /// Playlist in m3u format. Read from stdin if omitted or '-'
    playlist: Option<Utf8PathBuf>,
}

fn parse_tries(input: &str) -> Result<RetryLimit, String> {
    match input.to_lowercase().as_str() {
        "all" | "unlimited" => Ok(RetryLimit::Unbounded),
        n => n
            .parse::<usize>()
            .map(RetryLimit::Bounded)
            .map_err(|_| format!("'{}' is not a number of tries, or 'all'", input)),
    }
}

fn byte_limit(cli: &Cli) -> anyhow::Result<ByteLimit> {
    match &cli.size {
        Some(size) => {
            if cli.fill {
                log::warn!("--size overrides --fill");
            }
            Ok(ByteLimit::Explicit(parse_size(size)?))
        }
        None => Ok(ByteLimit::FreeSpace),
    }
}

fn fill_config(cli: &Cli) -> anyhow::Result<FillConfig> {
    Ok(FillConfig {
        target: cli.target.clone(),
        item_limit: cli.number,
        byte_limit: byte_limit(cli)?,
        depth: cli.parents,
        retry: cli.tries.unwrap_or_default(),
        opts: Opts {
            verbose: cli.verbose || cli.dry_run,
            noop: cli.dry_run,
        },
    })
}

// Relative entries in a playlist file are relative to the playlist. On stdin they're relative
// to wherever we are.
fn read_playlist(playlist: Option<&Utf8Path>) -> anyhow::Result<CandidateList> {
    match playlist {
        Some(path) if path.as_str() != "-" => {
            let file = File::open(path).with_context(|| format!("cannot open {}", path))?;
            let base = path.parent().filter(|dir| !dir.as_str().is_empty());
            load_playlist(BufReader::new(file), base)
                .with_context(|| format!("cannot load playlist {}", path))
        }
        _ => load_playlist(io::stdin().lock(), None).context("cannot load playlist from stdin"),
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = fill_config(cli)?;
    let candidates = read_playlist(cli.playlist.as_deref())?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    filler::fill(&config, candidates, rng, &mut io::stdout().lock())?;
    Ok(())
}

// Library errors say which stage of the run failed.
fn diagnostic(err: &anyhow::Error) -> String {
    match err.downcast_ref::<FillError>() {
        Some(fill_err) => format!("ERROR ({}): {:#}", fill_err.kind(), err),
        None => format!("ERROR: {:#}", err),
    }
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(&cli) {
        eprintln!("{}", diagnostic(&e));
        exit(1);
    }
}
