use clap::{ArgAction, Parser, ValueEnum};
use funnelflow::funnel::DEFAULT_DATASET_KEY;
use funnelflow::prelude::*;
use log::info;
use std::fs;
use std::time::Instant;

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LossPolicyCli {
    Signed,
    PositiveOnly,
}

impl From<LossPolicyCli> for LossPolicy {
    fn from(policy: LossPolicyCli) -> Self {
        match policy {
            LossPolicyCli::Signed => LossPolicy::Signed,
            LossPolicyCli::PositiveOnly => LossPolicy::PositiveOnly,
        }
    }
}

/// Builds Sankey flow graphs from funnel stage counts
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a stage JSON file (array of records or object keyed by stage)
    stages_path: Option<String>,

    /// Use a preset dataset instead of a stage file
    #[arg(short, long, conflicts_with = "stages_path")]
    dataset: Option<String>,

    /// Path to a graph options JSON file
    #[arg(long)]
    options: Option<String>,

    /// Attach the dashboard color palette to nodes and edges
    #[arg(long)]
    palette: bool,

    /// Which loss edges to emit
    #[arg(long, value_enum)]
    loss_policy: Option<LossPolicyCli>,

    /// Write the graph JSON here instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Also save a binary graph artifact to this path
    #[arg(long)]
    artifact: Option<String>,

    /// Rebuild the graph from a saved artifact instead of stages
    #[arg(long, conflicts_with_all = ["stages_path", "dataset", "options"])]
    load_artifact: Option<String>,

    /// Print conversion metrics to stderr
    #[arg(short, long)]
    summary: bool,

    /// List preset datasets and exit
    #[arg(long)]
    list_datasets: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list_datasets {
        list_datasets();
        return;
    }

    if let Err(e) = run(cli) {
        exit_with_error(&e.to_string());
    }
}

fn run(cli: Cli) -> Result<()> {
    let total_start = Instant::now();

    // --- 1. Inputs ---
    let (stages, mut options) = match &cli.load_artifact {
        Some(path) => {
            info!("Loading graph artifact from '{}'", path);
            let artifact = GraphArtifact::from_file(path)?;
            (artifact.stages, artifact.options)
        }
        None => (load_input_stages(&cli)?, load_options(cli.options.as_deref())?),
    };

    if cli.palette {
        options.palette = Some(Palette::dashboard());
    }
    if let Some(policy) = cli.loss_policy {
        options.loss_policy = policy.into();
    }

    // --- 2. Build ---
    let build_start = Instant::now();
    let builder = FlowGraph::builder(Some(&stages)).with_options(options);
    let graph = builder.build();
    info!(
        "Built {} node(s) and {} edge(s) in {:?}",
        graph.nodes.len(),
        graph.edges.len(),
        build_start.elapsed()
    );

    let duplicates = graph.duplicate_ids();
    if !duplicates.is_empty() {
        eprintln!(
            "Warning: node ids {:?} are not unique; the renderer cannot tell these stages apart.",
            duplicates
        );
    }

    // --- 3. Outputs ---
    let json = graph.to_json_pretty()?;
    match &cli.output {
        Some(path) => {
            fs::write(path, json)
                .map_err(|e| format!("Failed to write graph to '{}': {}", path, e))?;
            info!("Wrote graph JSON to '{}'", path);
        }
        None => println!("{}", json),
    }

    if let Some(path) = &cli.artifact {
        GraphArtifact::from_builder(&builder).save(path)?;
        info!("Saved graph artifact to '{}'", path);
    }

    if cli.summary {
        eprintln!("\n--- Funnel Summary ---");
        eprintln!("{}", FunnelSummary::from_stages(&stages));
    }

    info!("Total execution: {:?}", total_start.elapsed());
    Ok(())
}

fn load_input_stages(cli: &Cli) -> Result<StageSet> {
    if let Some(path) = &cli.stages_path {
        info!("Loading stages from '{}'", path);
        return Ok(load_stages(path)?);
    }

    let key = cli.dataset.as_deref().unwrap_or(DEFAULT_DATASET_KEY);
    let catalog = DatasetCatalog::presets();
    let dataset = catalog.get(key)?;
    info!("Using preset dataset '{}' ({})", dataset.key, dataset.label);
    Ok(dataset.stages.clone())
}

fn load_options(path: Option<&str>) -> Result<GraphOptions> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read options file '{}': {}", path, e))?;
            Ok(GraphOptions::from_json(&json)?)
        }
        None => Ok(GraphOptions::default()),
    }
}

fn list_datasets() {
    let catalog = DatasetCatalog::presets();
    for (key, label) in catalog.options() {
        let marker = if key == DEFAULT_DATASET_KEY { " (default)" } else { "" };
        println!("{:<10} {}{}", key, label, marker);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_artifact_rejects_build_inputs() {
        assert!(Cli::try_parse_from(["funnelflow-cli", "--load-artifact", "a.bin"]).is_ok());
        for extra in [
            &["--options", "o.json"][..],
            &["--dataset", DEFAULT_DATASET_KEY][..],
            &["stages.json"][..],
        ] {
            let mut args = vec!["funnelflow-cli", "--load-artifact", "a.bin"];
            args.extend_from_slice(extra);
            assert!(Cli::try_parse_from(args).is_err(), "accepted {:?}", extra);
        }
    }
}
