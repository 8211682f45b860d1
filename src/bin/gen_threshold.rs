use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use ite_gates::compile::CompileOptions;
use ite_gates::threshold::ThresholdCircuit;
use ite_gates::types::Encoding;
use ite_gates::writer::{create_cnf_file, create_pog_file};

/// Generate CNF or POG files for k-out-of-n threshold constraints.
#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of inputs.
    #[arg(short = 'n', value_name = "INT")]
    n: u32,

    /// Lower bound on the number of true inputs (default: majority).
    #[arg(short = 'k', value_name = "INT")]
    k: Option<u32>,

    /// Root name for output files: ROOT.cnf, ROOT.pog, ROOT.pbip.
    #[arg(short = 'r', value_name = "ROOT")]
    root: PathBuf,

    /// Use Tseitin encoding of clauses.
    #[arg(short = 't', conflicts_with = "pog")]
    tseitin: bool,

    /// Generate POG representation.
    #[arg(short = 'p')]
    pog: bool,

    /// Generate PBIP declaration file, in addition to CNF.
    #[arg(short = 'P', conflicts_with = "pog")]
    pbip: bool,

    /// Expand ITE/ITO gates before generating CNF.
    #[arg(short = 'e', long)]
    expand: bool,

    /// Keep gates unreachable from the root.
    #[arg(long)]
    no_prune: bool,

    /// Verbosity level.
    #[arg(short = 'v', value_name = "LEVEL", default_value = "1")]
    verbosity: u32,
}

impl Cli {
    fn encoding(&self) -> Encoding {
        if self.pog {
            Encoding::Pog
        } else if self.tseitin {
            Encoding::Tseitin
        } else {
            Encoding::Plaisted
        }
    }

    fn output(&self, extension: &str) -> PathBuf {
        let mut path = self.root.clone().into_os_string();
        path.push(".");
        path.push(extension);
        path.into()
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let level = match args.verbosity {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Info,
        2 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let mut t = match args.k {
        Some(k) => ThresholdCircuit::new(args.n, k, args.encoding())?,
        None => ThresholdCircuit::majority(args.n, args.encoding()),
    };
    info!(
        "Building threshold network for N={} K={} ({} solutions).",
        t.n(),
        t.k(),
        t.solutions()
    );
    t.build()?;
    info!("Built {} gates", t.builder().num_gates());
    if args.verbosity >= 3 {
        info!("After building:");
        t.builder().show();
    }

    if !args.no_prune {
        t.prune();
        info!("After pruning: {} gates", t.builder().num_gates());
        if args.verbosity >= 3 {
            t.builder().show();
        }
    }

    if args.pog || args.expand {
        t.expand()?;
        info!("After expanding: {} gates", t.builder().num_gates());
        if args.verbosity >= 3 {
            t.builder().show();
        }
    }

    let options = CompileOptions {
        verbosity: args.verbosity,
        description: None,
    };

    if args.pog {
        let path = args.output("pog");
        match create_pog_file(args.n, &path) {
            Ok(mut writer) => {
                t.generate_pog(&mut writer, &options)?;
                info!("File {} written", path.display());
                info!("Generated POG.  Size = {}", t.builder().size());
            }
            Err(e) => error!("Could not open file '{}': {}", path.display(), e),
        }
    } else {
        let path = args.output("cnf");
        match create_cnf_file(&path) {
            Ok(mut writer) => {
                let (variables, clauses) = t.generate_cnf(&mut writer, &options)?;
                info!(
                    "File {} written: {} variables, {} clauses",
                    path.display(),
                    variables,
                    clauses
                );
            }
            Err(e) => error!("Could not open file '{}': {}", path.display(), e),
        }

        if args.pbip {
            let path = args.output("pbip");
            match File::create(&path) {
                Ok(file) => match t.write_pbip(BufWriter::new(file)) {
                    Ok(()) => info!("File {} written", path.display()),
                    Err(e) => error!("Could not write '{}': {}", path.display(), e),
                },
                Err(e) => error!("Could not open file '{}': {}", path.display(), e),
            }
        }
    }

    info!("All done in {:.3} s", time_total.elapsed().as_secs_f64());
    Ok(())
}
