use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use gap_con::gap_config::{GapConfig, GapConfigBuilder};
use gap_con::gap_resolver::ResolveStats;
use gap_con::pipeline;

/// Resolves ambiguous gaps in scaffold paths by bounded overlap-graph search and
/// consensus construction.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// k-mer size; adjacent contigs overlap by k-1 bases
    #[arg(short, long)]
    kmer: usize,

    /// Acceptable error of a distance estimate
    #[arg(short = 'd', long, default_value_t = 6)]
    dist_error: i64,

    /// Maximum number of candidate branches to align
    #[arg(short = 'a', long, default_value_t = 4)]
    branches: usize,

    /// Minimum identity fraction to accept a consensus
    #[arg(short = 'p', long, default_value_t = 0.9)]
    identity: f64,

    /// Maximum number of nodes a single gap search may visit
    #[arg(long, default_value_t = 100_000)]
    max_cost: usize,

    /// Output path file
    #[arg(short, long)]
    out: PathBuf,

    /// Output consensus FASTA
    #[arg(short = 's', long)]
    consensus: PathBuf,

    /// Write the overlap graph with the new consensus contigs spliced in
    #[arg(short = 'g', long)]
    graph: Option<PathBuf>,

    /// Verbosity, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Contig FASTA
    contigs: PathBuf,

    /// Overlap graph file
    adj: PathBuf,

    /// Scaffold path file, `-` for standard input
    paths: String
}

impl Args {
    fn config(&self) -> Result<GapConfig, Box<dyn std::error::Error>> {
        let config = GapConfigBuilder::default()
            .k(self.kmer)
            .distance_error(self.dist_error)
            .max_branches(self.branches)
            .min_identity(self.identity)
            .max_cost(self.max_cost)
            .build()?;
        config.validate()?;
        Ok(config)
    }
}

fn run(args: &Args) -> Result<ResolveStats, Box<dyn std::error::Error>> {
    let config = args.config()?;
    pipeline::run(
        &config,
        &args.contigs,
        &args.adj,
        &args.paths,
        &args.out,
        &args.consensus,
        args.graph.as_deref()
    )
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace
        })
        .init();

    match run(&args) {
        Ok(stats) => {
            eprintln!("{}", stats);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {}", error);
            ExitCode::FAILURE
        }
    }
}
