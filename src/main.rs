//! Quadratic Sort Growth
//!
//! Command-line driver: generates trial tables for the four counting sorts,
//! averages a table into a growth curve (optionally plotted to SVG), lists the
//! tables in the output directory, and writes a combined growth report.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use quad_sort_growth::{
    find_tables, plot_average_series, select_table, Algorithm, ExperimentConfig, GrowthCurve,
    GrowthError, GrowthReport, PlotSurface, Result, SvgPlot, TrialRunner, TrialTable,
};

/// Pattern matching persisted trial tables
const TABLE_PATTERN: &str = "*.csv";

#[derive(Debug, Parser)]
#[command(name = "quad-sort-growth", version, about = "Operation-count growth of quadratic sorts")]
struct Cli {
    /// TOML experiment configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding trial tables
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Length of each sampled sequence
    #[arg(long, global = true)]
    max_n: Option<usize>,

    /// Trials per table
    #[arg(long, global = true)]
    trials: Option<usize>,

    /// Seed for reproducible tables
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Run trials in parallel
    #[arg(long, global = true)]
    parallel: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate trial tables
    Generate {
        /// Algorithm to measure (bubble, insertion, opt-bubble, selection)
        #[arg(short, long, required_unless_present = "all", conflicts_with = "all")]
        algorithm: Option<Algorithm>,

        /// Measure all four algorithms
        #[arg(long)]
        all: bool,
    },
    /// Average the columns of a trial table
    Average {
        /// Table file name inside the output directory
        #[arg(long, required_unless_present = "algorithm", conflicts_with = "algorithm")]
        file: Option<String>,

        /// Average the table of this algorithm
        #[arg(short, long)]
        algorithm: Option<Algorithm>,

        /// Plot the averages to this SVG file
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// List trial tables in the output directory
    List {
        #[arg(long, default_value = TABLE_PATTERN)]
        pattern: String,
    },
    /// Average every available table into a growth report
    Report {
        #[arg(long, default_value = "growth_report.lino")]
        lino: PathBuf,

        #[arg(long)]
        markdown: Option<PathBuf>,

        #[arg(long, default_value = "Quadratic sort growth")]
        description: String,
    },
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Command::Generate { algorithm, all } => {
            let algorithms: Vec<Algorithm> = if all {
                Algorithm::ALL.to_vec()
            } else {
                algorithm.into_iter().collect()
            };
            generate(&config, &algorithms)
        }
        Command::Average {
            file,
            algorithm,
            svg,
        } => {
            let name = match (file, algorithm) {
                (Some(name), _) => name,
                (None, Some(algorithm)) => algorithm.table_file_name(),
                (None, None) => {
                    return Err(GrowthError::InvalidParameter(
                        "either --file or --algorithm is required".to_string(),
                    ))
                }
            };
            average(&config, &name, svg)
        }
        Command::List { pattern } => {
            let names = find_tables(&config.output_dir, &pattern)?;
            println!(
                "Showing {} files matching pattern \"{}\" in {}",
                names.len(),
                pattern,
                config.output_dir.display()
            );
            for (i, name) in names.iter().enumerate() {
                println!("{:>3}. {}", i + 1, name);
            }
            Ok(())
        }
        Command::Report {
            lino,
            markdown,
            description,
        } => report(&config, &description, &lino, markdown.as_deref()),
    }
}

/// Config file first, then command-line overrides.
fn load_config(cli: &Cli) -> Result<ExperimentConfig> {
    let mut config = match &cli.config {
        Some(path) => ExperimentConfig::load(path)?,
        None => ExperimentConfig::default(),
    };

    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(max_n) = cli.max_n {
        config.max_n = max_n;
    }
    if let Some(trials) = cli.trials {
        config.num_trials = trials;
    }
    if let Some(seed) = cli.seed {
        config.random_seed = Some(seed);
    }
    if cli.parallel {
        config.parallel = true;
    }

    config.validate()?;
    Ok(config)
}

fn generate(config: &ExperimentConfig, algorithms: &[Algorithm]) -> Result<()> {
    let mut rng = match config.random_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let runner = TrialRunner::new(config.max_n, config.num_trials).parallel(config.parallel);

    fs::create_dir_all(&config.output_dir)?;

    for &algorithm in algorithms {
        println!("\nGenerating test files for {}...", algorithm.label());

        let table = runner.run_algorithm(algorithm, &mut rng);
        let path = config.output_dir.join(algorithm.table_file_name());
        table.write_csv(&path)?;

        println!(
            "Wrote {} trials x {} sizes to {}",
            table.num_rows(),
            table.num_columns(),
            path.display()
        );
    }

    Ok(())
}

fn average(config: &ExperimentConfig, name: &str, svg: Option<PathBuf>) -> Result<()> {
    let selection = select_table(&config.output_dir, TABLE_PATTERN, Some(name))?;
    let path = selection.path().ok_or_else(|| {
        GrowthError::InvalidParameter(format!(
            "no trial table named '{}' in {}",
            name,
            config.output_dir.display()
        ))
    })?;

    println!("\nCalculating averages for {}", name);
    let table = TrialTable::read_csv(&path)?;
    let series = table.column_averages()?;

    let label = name.trim_end_matches(".csv");
    println!("{} ({} trials):", label, table.num_rows());
    let values: Vec<String> = series.iter().map(u64::to_string).collect();
    println!("{}", values.join(","));

    if let Some(svg_path) = svg {
        let mut plot = SvgPlot::fitted(label, &svg_path, &config.plot, series.len(), series.max())?;
        plot_average_series(&mut plot, &series, label);
        plot.block()?;
        plot.dispose();
        println!("Plot written to {}", svg_path.display());
    }

    Ok(())
}

fn report(
    config: &ExperimentConfig,
    description: &str,
    lino_path: &std::path::Path,
    markdown_path: Option<&std::path::Path>,
) -> Result<()> {
    let available = find_tables(&config.output_dir, TABLE_PATTERN)?;
    let mut report = GrowthReport::new(description);

    for algorithm in Algorithm::ALL {
        let name = algorithm.table_file_name();
        if !available.contains(&name) {
            warn!(algorithm = algorithm.name(), "No trial table, skipping");
            continue;
        }

        let table = TrialTable::read_csv(&config.output_dir.join(&name))?;
        let series = table.column_averages()?;
        report.add_curve(GrowthCurve::new(algorithm.name(), table.num_rows(), &series));
    }

    if report.curves.is_empty() {
        return Err(GrowthError::InvalidParameter(format!(
            "no trial tables found in {}",
            config.output_dir.display()
        )));
    }

    report.save_lino(lino_path)?;
    info!(path = %lino_path.display(), curves = report.curves.len(), "Report written");
    println!("Links Notation report written to: {}", lino_path.display());

    if let Some(path) = markdown_path {
        report.save_markdown(path)?;
        println!("Markdown report written to: {}", path.display());
    }

    Ok(())
}
