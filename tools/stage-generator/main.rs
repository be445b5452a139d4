use clap::Parser;
use funnelflow::funnel::Stage;
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fs;

const STAGE_NAMES: [(&str, &str); 8] = [
    ("discovery", "Discovery/Dev"),
    ("interested", "Interested"),
    ("started", "App Started"),
    ("submitted", "App Submitted"),
    ("complete", "App Complete"),
    ("offered", "Admission Offered"),
    ("accepted", "Admission Accepted"),
    ("enrolled", "Enrolled"),
];

/// A CLI tool to generate random funnel stage data for funnelflow
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_stages.json")]
    output: String,

    /// Number of stages to generate (at most 8)
    #[arg(long, default_value_t = 7)]
    stages: usize,

    /// Lead count of the first stage
    #[arg(long, default_value_t = 150)]
    start: u32,

    /// The largest fraction of leads a single step may lose
    #[arg(long, default_value_t = 0.45)]
    max_drop: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.stages > STAGE_NAMES.len() {
        eprintln!(
            "Error: --stages ({}) cannot be greater than {}",
            cli.stages,
            STAGE_NAMES.len()
        );
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.max_drop) {
        eprintln!("Error: --max-drop ({}) must be between 0 and 1", cli.max_drop);
        std::process::exit(1);
    }

    println!(
        "Generating {} stage(s) starting at {} lead(s)...",
        cli.stages, cli.start
    );

    let stages = generate_stages(&mut rng, cli.stages, cli.start, cli.max_drop);
    let json_output = serde_json::to_string_pretty(&stages)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved stage data to '{}'",
        cli.output
    );

    Ok(())
}

/// Generates a non-increasing funnel: each stage keeps a random share of the previous one.
fn generate_stages(rng: &mut ThreadRng, count: usize, start: u32, max_drop: f64) -> Vec<Stage> {
    let mut current = f64::from(start);
    STAGE_NAMES
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, (key, name))| {
            if i > 0 {
                let kept = 1.0 - rng.random_range(0.0..=max_drop);
                current = (current * kept).floor();
            }
            println!("-> {}: {}", name, current);
            Stage::new(*key, current, *name)
        })
        .collect()
}
