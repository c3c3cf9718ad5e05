extern crate sine_k_means;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::process::ExitCode;

use sine_k_means::{ClusteringError,ClusteringProblem,ConvergenceCriterion,Dataset,OptionalParameters,compute_k_means,init_tracing};
use sine_k_means::palette::{DEMO_K,cluster_label,emotion_of,emotion_palette,representative_color};

/// Groups colors (or any points) into k clusters by k-means.
/// Without --file the emotion palette of the journal is clustered.
#[derive(Parser, Debug)]
#[command(name = "sine_k_means", version, about)]
struct Cli {
    /// Number of clusters
    #[arg(short, long, default_value_t = DEMO_K)]
    k: usize,

    /// Seed of the random initialization (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Dataset file: one point per line, coordinates separated by ','
    #[arg(long)]
    file: Option<String>,

    /// Expected number of points in the dataset file
    #[arg(long, default_value_t = 1000)]
    expected: usize,

    /// Number of threads for the assignment step (0: all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Maximal number of rounds (0: no limit)
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Stop as soon as no centroid moves further than this distance (default: exact equality)
    #[arg(long)]
    tolerance: Option<f64>,

    /// Write the clustering (one line per cluster with point indices) to this file
    #[arg(long)]
    output: Option<String>,

    /// -v: brief, -vv: verbose
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(cli: &Cli) -> Result<(), ClusteringError> {
    let space = match &cli.file {
        Some(path) => Dataset::by_file(path, cli.expected)?,
        None => emotion_palette(),
    };

    let optional = OptionalParameters {
        thread_count: cli.threads,
        max_iterations: cli.max_iterations,
        convergence: cli.tolerance.map(ConvergenceCriterion::Tolerance),
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (clustering, total_time) = compute_k_means(&space, &ClusteringProblem{k: cli.k}, &mut rng, Some(optional))?;

    for (i, cluster) in clustering.get_clusters(&space).iter().enumerate() {
        let color = match representative_color(cluster) {
            Some(rgb) => rgb.to_string(),
            None => "-".to_string(),
        };
        let members: Vec<String> = cluster.iter()
            .map(|p| match emotion_of(p) {
                Some(name) => name.to_string(),
                None => format!("{:?}", p),
            })
            .collect();
        println!("{} [{}]: {}", cluster_label(i), color, members.join(", "));
    }
    println!("{} rounds, {:.6}s", clustering.iterations(), total_time);

    if let Some(path) = &cli.output {
        clustering.save_to_file(path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}
