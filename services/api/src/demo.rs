use crate::export::render_csv;
use crate::infra::{demo_box, load_json, parse_probability};
use clap::Args;
use morphbox::config::AppConfig;
use morphbox::domain::{Combination, Importance, MorphologicalBox};
use morphbox::error::AppError;
use morphbox::explorer::{
    ExploreOptions, Exploration, ExplorerService, GeneratorConfig, RankedCombination,
};
use morphbox::telemetry;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    /// Box definition (JSON)
    #[arg(long = "box", value_name = "FILE")]
    pub(crate) box_path: PathBuf,
    /// Seed for a reproducible sample
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Maximum number of combinations to draw
    #[arg(long)]
    pub(crate) cap: Option<usize>,
    /// Placeholder probability for low-importance parameters (0-1)
    #[arg(long, value_parser = parse_probability)]
    pub(crate) probability: Option<f64>,
    /// Only emit distinct combinations
    #[arg(long)]
    pub(crate) distinct: bool,
    /// Score and order the sample
    #[arg(long)]
    pub(crate) rank: bool,
    /// Print ranked combinations as CSV instead of JSON
    #[arg(long)]
    pub(crate) csv: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Box definition (JSON)
    #[arg(long = "box", value_name = "FILE")]
    pub(crate) box_path: PathBuf,
    /// Combination to score (JSON object of parameter id -> attribute id)
    #[arg(long, value_name = "FILE")]
    pub(crate) combination: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seed for a reproducible walkthrough
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Number of top-ranked combinations to show
    #[arg(long, default_value_t = 5)]
    pub(crate) top: usize,
}

pub(crate) fn run_generate(args: GenerateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let explorer_box: MorphologicalBox = load_json(&args.box_path)?;
    let mut generator = config.explorer.generator_config();
    if let Some(probability) = args.probability {
        generator.default_probability = probability;
    }
    let service = ExplorerService::new(generator, config.explorer.seed);

    let options = ExploreOptions {
        seed: args.seed,
        sample_cap: args.cap,
        allow_duplicates: args.distinct.then_some(false),
        rank: args.rank || args.csv,
    };
    let exploration = service.explore(&explorer_box, &options)?;

    if args.csv {
        let ranked = exploration.ranked.unwrap_or_default();
        print!("{}", render_csv(&explorer_box, &ranked)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&exploration)?);
    }

    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let explorer_box: MorphologicalBox = load_json(&args.box_path)?;
    let combination: Combination = load_json(&args.combination)?;
    let assessment = ExplorerService::default().assess(&explorer_box, &combination)?;

    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let explorer_box = demo_box()?;
    let service = ExplorerService::new(GeneratorConfig::default(), None);
    let options = ExploreOptions {
        seed: args.seed,
        rank: true,
        ..ExploreOptions::default()
    };
    let exploration = service.explore(&explorer_box, &options)?;

    println!("Morphological box demo: {}", explorer_box.name);
    render_parameters(&explorer_box);
    render_sample_summary(&explorer_box, &exploration);

    let ranked = exploration.ranked.unwrap_or_default();
    println!("\nTop {} candidates", args.top.min(ranked.len()));
    for entry in ranked.iter().take(args.top) {
        render_ranked(&explorer_box, entry);
    }

    let rejected: Vec<&RankedCombination> = ranked
        .iter()
        .filter(|entry| !entry.score.constraints_satisfied)
        .collect();
    if rejected.is_empty() {
        println!("\nEvery sampled combination satisfies the box constraints");
        return Ok(());
    }

    println!(
        "\n{} sampled combinations break a constraint; the lowest ranked one:",
        rejected.len()
    );
    if let Some(entry) = rejected.last() {
        render_ranked(&explorer_box, entry);
        let assessment = service.assess(&explorer_box, &entry.combination)?;
        for violation in &assessment.violations {
            println!("    ! {}", violation.detail);
        }
    }

    Ok(())
}

fn render_parameters(explorer_box: &MorphologicalBox) {
    println!("Parameters:");
    for parameter in &explorer_box.parameters {
        let attributes: Vec<&str> = parameter
            .attributes
            .iter()
            .map(|attribute| attribute.name.as_str())
            .collect();
        println!(
            "- {} (weight {}, {} importance): {}",
            parameter.name,
            parameter.weight.value(),
            parameter.importance().label(),
            attributes.join(" | ")
        );
    }
}

fn render_sample_summary(explorer_box: &MorphologicalBox, exploration: &Exploration) {
    let sample = &exploration.sample;
    println!(
        "\nCombination space: {} | sampled {} at {}",
        sample.total,
        sample.sample.len(),
        sample.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let low_importance: Vec<_> = explorer_box
        .parameters
        .iter()
        .filter(|parameter| {
            parameter.importance() == Importance::Low && !parameter.attributes.is_empty()
        })
        .collect();
    if low_importance.is_empty() || sample.sample.is_empty() {
        return;
    }

    let slots = low_importance.len() * sample.sample.len();
    let placeholders = sample
        .sample
        .iter()
        .flat_map(|combination| {
            low_importance
                .iter()
                .filter_map(move |parameter| combination.get(&parameter.id))
        })
        .filter(|selection| selection.is_default())
        .count();
    println!(
        "- {placeholders} of {slots} low-importance slots left as Default ({:.0}%)",
        placeholders as f64 / slots as f64 * 100.0
    );
}

fn render_ranked(explorer_box: &MorphologicalBox, entry: &RankedCombination) {
    let score = &entry.score;
    let innovation = score
        .innovation_score
        .map(|value| format!("{value:.1}"))
        .unwrap_or_else(|| "n/a".to_string());
    println!(
        "#{} overall {:.1} | compatibility {:.1} | technical {:.1} | principles {:.1} | innovation {}",
        entry.rank,
        entry.overall,
        score.compatibility_score,
        score.technical_score,
        score.principle_score,
        innovation
    );

    let cells: Vec<String> = explorer_box
        .parameters
        .iter()
        .filter_map(|parameter| {
            entry
                .combination
                .get(&parameter.id)
                .map(|selection| format!("{}: {}", parameter.name, selection.label(parameter)))
        })
        .collect();
    println!("    {}", cells.join("; "));
}
