//! Corpus generation: seeded random pairs, 16-fraction-digit JSON, and the
//! matching binary answer stream.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use arcspan::answers::write_answers;
use arcspan::haversine::EARTH_RADIUS_KM;
use arcspan::pairs::Pair;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of coordinate pairs to write.
    #[arg(long, default_value_t = 10_000)]
    pub count: usize,

    /// RNG seed; identical seeds write identical files.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Sample from this many clusters instead of the whole sphere. Cluster
    /// sampling keeps the expected distance away from the uniform ~10 000 km
    /// plateau, which makes averaging mistakes visible.
    #[arg(long)]
    pub clusters: Option<usize>,

    /// Corpus output path.
    #[arg(long, default_value = "pairs.json")]
    pub output: PathBuf,

    /// Answer-file output path.
    #[arg(long, default_value = "pairs.answers")]
    pub answers: PathBuf,
}

/// Where coordinates are sampled from.
enum Sampler {
    Uniform,
    /// Cluster centers; points scatter around a randomly chosen one.
    Clustered(Vec<(f64, f64)>),
}

const CLUSTER_SPREAD_X: f64 = 20.0;
const CLUSTER_SPREAD_Y: f64 = 10.0;

impl Sampler {
    fn new(rng: &mut SmallRng, clusters: Option<usize>) -> Self {
        match clusters {
            None | Some(0) => Self::Uniform,
            Some(n) => Self::Clustered(
                (0..n)
                    .map(|_| {
                        (
                            rng.random_range(-180.0..180.0),
                            rng.random_range(-90.0..90.0),
                        )
                    })
                    .collect(),
            ),
        }
    }

    fn point(&self, rng: &mut SmallRng) -> (f64, f64) {
        match self {
            Self::Uniform => (
                rng.random_range(-180.0..180.0),
                rng.random_range(-90.0..90.0),
            ),
            Self::Clustered(centers) => {
                let (cx, cy) = centers[rng.random_range(0..centers.len())];
                let x = cx + rng.random_range(-CLUSTER_SPREAD_X..CLUSTER_SPREAD_X);
                let y = cy + rng.random_range(-CLUSTER_SPREAD_Y..CLUSTER_SPREAD_Y);
                (wrap_longitude(x), y.clamp(-90.0, 90.0))
            }
        }
    }

    fn pair(&self, rng: &mut SmallRng) -> Pair {
        let (x0, y0) = self.point(rng);
        let (x1, y1) = self.point(rng);
        Pair { x0, y0, x1, y1 }
    }
}

fn wrap_longitude(x: f64) -> f64 {
    if x < -180.0 {
        x + 360.0
    } else if x >= 180.0 {
        x - 360.0
    } else {
        x
    }
}

pub fn run(args: &GenerateArgs) -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let sampler = Sampler::new(&mut rng, args.clusters);

    let mut json = BufWriter::new(
        File::create(&args.output)
            .with_context(|| format!("creating {}", args.output.display()))?,
    );

    let mut entries = Vec::with_capacity(args.count);
    let mut sum = 0.0f64;

    write!(json, "{{\"pairs\": [")?;
    for i in 0..args.count {
        let pair = sampler.pair(&mut rng);
        let distance = pair.distance(EARTH_RADIUS_KM);
        sum += distance;

        if i > 0 {
            write!(json, ",")?;
        }
        write!(
            json,
            "\n    {{\"x0\": {:.16}, \"y0\": {:.16}, \"x1\": {:.16}, \"y1\": {:.16}}}",
            pair.x0, pair.y0, pair.x1, pair.y1
        )?;
        entries.push((pair, distance));
    }

    let average = if args.count == 0 {
        0.0
    } else {
        sum / args.count as f64
    };
    write!(
        json,
        "\n], \"avg\": {average:.16}, \"count\": {}}}\n",
        args.count
    )?;
    json.flush()?;

    let mut answer_file = BufWriter::new(
        File::create(&args.answers)
            .with_context(|| format!("creating {}", args.answers.display()))?,
    );
    write_answers(&mut answer_file, &entries, average)?;
    answer_file.flush()?;

    info!(
        count = args.count,
        seed = args.seed,
        average,
        corpus = %args.output.display(),
        answers = %args.answers.display(),
        "wrote corpus"
    );
    println!("{} pairs, expected average {average:.16}", args.count);
    Ok(())
}
