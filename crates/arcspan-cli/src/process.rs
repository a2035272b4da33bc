//! The profiled loader: read, parse, extract, recompute, verify, report.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::{info, warn};

use arcspan::answers::read_answers;
use arcspan::haversine::EARTH_RADIUS_KM;
use arcspan::pairs::extract_corpus;
use arcspan::profile_section;
use arcspan::profiler::Profiler;

#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Corpus path.
    #[arg(long, default_value = "pairs.json")]
    pub input: PathBuf,

    /// Answer file to verify the recomputed distances against.
    #[arg(long)]
    pub answers: Option<PathBuf>,

    /// Prefix stripped from source paths in the report.
    #[arg(long)]
    pub path_trim: Option<String>,

    /// Print the flat section list instead of the tree.
    #[arg(long)]
    pub list: bool,
}

/// Sixteen fractional digits under-determine an f64, so recomputed
/// distances differ from the generator's in the last bits.
const VERIFY_TOLERANCE: f64 = 1e-8;

pub fn run(args: &ProcessArgs) -> Result<()> {
    let profiler = Profiler::global();
    profiler.start();

    let bytes = {
        let _section = profile_section!("read-input");
        fs::read(&args.input).with_context(|| format!("reading {}", args.input.display()))?
    };

    let root = {
        let _section = profile_section!("parse-json");
        arcspan::parse(&bytes)?
    };

    let corpus = {
        let _section = profile_section!("extract-pairs");
        extract_corpus(&root)?
    };

    let distances: Vec<f64> = {
        let _section = profile_section!("haversine");
        corpus
            .pairs
            .iter()
            .map(|pair| pair.distance(EARTH_RADIUS_KM))
            .collect()
    };
    let average = if distances.is_empty() {
        0.0
    } else {
        distances.iter().sum::<f64>() / distances.len() as f64
    };

    info!(pairs = corpus.pairs.len(), input = %args.input.display(), "corpus loaded");
    println!("pairs: {}", corpus.pairs.len());
    println!("computed average: {average:.16}");
    if let Some(declared) = corpus.declared_average {
        println!("declared average: {declared:.16}");
    }

    if let Some(path) = &args.answers {
        let _section = profile_section!("verify-answers");
        verify(path, &distances, average)?;
    }

    let report = profiler
        .stop_and_collect(args.path_trim.as_deref())
        .expect("profiler was started above");
    println!("cycle counter: {} ticks/sec", report.cpu_freq);
    if args.list {
        report.print_list();
    } else {
        report.print_tree();
    }
    Ok(())
}

fn verify(path: &Path, distances: &[f64], average: f64) -> Result<()> {
    let answers = read_answers(BufReader::new(
        File::open(path).with_context(|| format!("opening {}", path.display()))?,
    ))?;

    if answers.entries.len() != distances.len() {
        bail!(
            "answer file has {} entries, corpus has {} pairs",
            answers.entries.len(),
            distances.len()
        );
    }

    let mut mismatches = 0usize;
    for (index, ((_, expected), actual)) in answers.entries.iter().zip(distances).enumerate() {
        let scale = expected.abs().max(1.0);
        if (actual - expected).abs() > VERIFY_TOLERANCE * scale {
            if mismatches == 0 {
                warn!(index, expected, actual, "distance mismatch");
            }
            mismatches += 1;
        }
    }
    if mismatches > 0 {
        bail!("{mismatches} of {} distances diverged", distances.len());
    }

    let scale = answers.average.abs().max(1.0);
    if (average - answers.average).abs() > VERIFY_TOLERANCE * scale {
        bail!(
            "average diverged: computed {average:.16}, answers say {:.16}",
            answers.average
        );
    }

    println!("verified against {}", path.display());
    Ok(())
}
