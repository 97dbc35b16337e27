//! Binary that reads a filtered relatedness file, computes the smallest set
//! of samples whose removal erases every flagged relationship and writes
//! that set to a text file, one sample per line.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use kith_and_kin::io::{read_fam, read_genome, write_removals};
use kith_and_kin::progress::LogProgress;
use kith_and_kin::removal::{RemovalPlan, Strategy};

#[derive(Parser, Debug)]
#[command(name = "prune")]
#[command(about = "Computes a smallest sample removal set erasing all flagged relatedness")]
struct Config {
    /// Filtered PLINK .genome file holding only the too-related pairs
    genome: PathBuf,

    /// Output file, one removed sample per line
    #[arg(long, default_value = "samples_to_remove.txt")]
    output: PathBuf,

    /// PLINK .fam file with case/control status, required unless --single-pass
    #[arg(long)]
    fam: Option<PathBuf>,

    /// Treat all samples alike instead of preferring to keep cases
    #[arg(long)]
    single_pass: bool,

    /// Abort if a connected component exceeds this many nodes
    #[arg(long)]
    max_component_nodes: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::init();
    let config = Config::parse();

    let genome = File::open(&config.genome)
        .with_context(|| format!("opening {}", config.genome.display()))?;
    let records = read_genome(BufReader::new(genome))?;

    let phenotypes = match &config.fam {
        Some(path) => {
            let fam =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            Some(read_fam(BufReader::new(fam))?)
        }
        None => None,
    };

    let plan = RemovalPlan {
        strategy: if config.single_pass {
            Strategy::SinglePass
        } else {
            Strategy::CasesFirst
        },
        max_component_nodes: config.max_component_nodes,
    };
    let removals = plan.run(&records, phenotypes.as_ref(), &mut LogProgress)?;

    let out = File::create(&config.output)
        .with_context(|| format!("creating {}", config.output.display()))?;
    write_removals(&removals, BufWriter::new(out))?;
    log::info!(
        "{} samples written to {}",
        removals.len(),
        config.output.display()
    );
    Ok(())
}
