use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use course_rank::catalog::load_catalog;
use course_rank::profile::{
    get_profile_path, load_profile, run_init_wizard, StudentProfile, SubjectResult,
};
use course_rank::scoring::{academic_score, compute_recommendations_with, ScoringError};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CATALOG: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// List eligible courses ranked by overall score (default if no subcommand)
    List {
        /// Show only the first N courses
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show eligible courses grouped by recommendation tier
    Tiers,
    /// Show score details for a course by its rank
    Show {
        /// Rank of the course (1-based, as shown in list)
        index: usize,
    },
    /// Print the interest quiz questions and their ids
    Questions,
    /// Create a student profile interactively
    Init {
        /// Where to save the profile (defaults to ~/.config/course-rank/profile.yaml)
        path: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "course-rank")]
#[command(about = "University course recommendations for A/L students", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/course-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to student profile (defaults to ~/.config/course-rank/profile.yaml)
    #[arg(short, long, global = true)]
    profile: Option<PathBuf>,

    /// Path to a course catalog YAML (defaults to the built-in catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// A/L stream, overriding the profile
    #[arg(long, global = true)]
    stream: Option<String>,

    /// Subject grade as SUBJECT=GRADE; repeat for each subject. Replaces profile subjects
    #[arg(short, long = "grade", global = true)]
    grades: Vec<String>,

    /// Interest rating as QUESTION=1..5; repeat as needed. Merged over profile ratings
    #[arg(short, long = "interest", global = true)]
    interests: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn split_pair(s: &str, what: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() && !v.trim().is_empty() => {
            Ok((k.trim().to_string(), v.trim().to_string()))
        }
        _ => Err(format!("invalid {} '{}': expected NAME=VALUE", what, s)),
    }
}

/// Load the stored profile (if any) and apply command-line overrides.
///
/// `default_path` is only consulted when neither `--profile` nor the config
/// names a profile file.
fn build_profile(
    cli: &Cli,
    configured: Option<PathBuf>,
    default_path: &Path,
) -> anyhow::Result<StudentProfile> {
    let inline = cli.stream.is_some() && !cli.grades.is_empty();

    let mut profile = match cli.profile.clone().or(configured) {
        Some(path) => load_profile(&path)?,
        None => {
            let path = default_path;
            if path.exists() {
                load_profile(path)?
            } else if inline {
                StudentProfile::default()
            } else {
                anyhow::bail!(
                    "No profile found at {}. Run `course-rank init`, or pass --stream and --grade",
                    path.display()
                );
            }
        }
    };

    if let Some(ref stream) = cli.stream {
        profile.stream = stream.clone();
    }

    if !cli.grades.is_empty() {
        profile.subjects = cli
            .grades
            .iter()
            .map(|g| split_pair(g, "grade").map(|(name, grade)| SubjectResult::new(name, grade)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(anyhow::Error::msg)?;
    }

    for entry in &cli.interests {
        let (question, rating) = split_pair(entry, "interest").map_err(anyhow::Error::msg)?;
        let rating: i64 = rating
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid rating '{}' for {}", rating, question))?;
        profile.interests.insert(question, rating);
    }

    Ok(profile)
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Commands::List {
        top: None,
        format: OutputFormat::Table,
    });
    let start_time = Instant::now();

    if let Err(e) = course_rank::telemetry::init(cli.verbose) {
        eprintln!("Logging disabled: {}", e);
    }

    // Load config
    let config = match course_rank::config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Commands that do not need scoring inputs
    match &command {
        Commands::Questions => {
            println!("{}", course_rank::output::format_questions());
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::Init { path } => {
            let path = path.clone().or_else(|| cli.profile.clone()).or(config.profile.clone());
            if let Err(e) = run_init_wizard(path) {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
            std::process::exit(EXIT_SUCCESS);
        }
        _ => {}
    }

    // Validate scoring config at startup
    let effective_scoring = config.scoring.clone().unwrap_or_default();
    if let Err(errors) = course_rank::scoring::validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // Student inputs
    let profile = match get_profile_path()
        .and_then(|default| build_profile(&cli, config.profile.clone(), &default))
    {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Profile error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };
    let (record, interests) = match profile.to_inputs() {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("Invalid input: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    };
    info!(
        stream = %record.stream,
        subjects = record.subjects.len(),
        answered = interests.len(),
        "student inputs ready"
    );

    // Catalog
    let catalog_path = cli.catalog.clone().or(config.catalog.clone());
    let catalog = match load_catalog(catalog_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Catalog error: {:#}", e);
            std::process::exit(EXIT_CATALOG);
        }
    };

    // Score
    let scored = match compute_recommendations_with(&record, &interests, &catalog, &effective_scoring)
    {
        Ok(s) => s,
        Err(ScoringError::InvalidInput(e)) => {
            eprintln!("Invalid input: {}", e);
            std::process::exit(EXIT_INPUT);
        }
        Err(ScoringError::InvalidConfig(errors)) => {
            eprintln!("Scoring config errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
    };
    debug!(
        eligible = scored.len(),
        elapsed = ?start_time.elapsed(),
        "scoring finished"
    );

    let use_colors = course_rank::output::should_use_colors();

    // Route based on subcommand
    match command {
        Commands::List { top, format } => {
            let limit = top.or(config.top).unwrap_or(scored.len()).min(scored.len());
            let shown = &scored[..limit];

            match format {
                OutputFormat::Table => {
                    println!(
                        "{}",
                        course_rank::output::format_scored_table(shown, use_colors)
                    );
                    if shown.iter().any(|s| s.course.requires_aptitude_test()) {
                        println!();
                        println!("* requires an aptitude test (see `course-rank show <index>`)");
                    }
                }
                OutputFormat::Tsv => {
                    let tsv = course_rank::output::format_tsv(shown);
                    if !tsv.is_empty() {
                        println!("{}", tsv);
                    }
                }
                OutputFormat::Json => {
                    // Subjects are non-empty here, so the mean is defined
                    let academic = academic_score(&record.subjects).unwrap_or_default();
                    let report = course_rank::output::RecommendationReport::new(
                        profile.name.as_deref(),
                        record.stream,
                        academic,
                        scored.len(),
                        shown,
                    );
                    match report.to_json() {
                        Ok(json) => println!("{}", json),
                        Err(e) => {
                            eprintln!("Output error: {:#}", e);
                            std::process::exit(EXIT_INPUT);
                        }
                    }
                }
            }
        }
        Commands::Tiers => {
            println!(
                "{}",
                course_rank::output::format_tier_groups(&scored, use_colors)
            );
        }
        Commands::Show { index } => {
            // Validate index bounds (1-based)
            if index < 1 || index > scored.len() {
                eprintln!(
                    "Invalid index {}. Must be between 1 and {}.",
                    index,
                    scored.len()
                );
                std::process::exit(EXIT_INPUT);
            }

            println!(
                "{}",
                course_rank::output::format_course_detail(&scored[index - 1], use_colors)
            );
        }
        // Handled before scoring
        Commands::Questions | Commands::Init { .. } => {}
    }

    std::process::exit(EXIT_SUCCESS);
}
