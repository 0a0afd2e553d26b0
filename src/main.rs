//! cyclecast CLI
//!
//! Usage:
//!   cyclecast --obs 2024-01-01,2024-01-29 --target 2024-02-26   # Single prediction
//!   cyclecast --obs ... --target ... --days 7                   # Range forecast
//!   cyclecast --obs 2024-01-01,2024-01-04 --suggest             # Suggest gap fills
//!   cyclecast --serve                                           # HTTP API server
//!   cyclecast --obs ... --json                                  # JSON output

use chrono::{Days, Local, NaiveDate};
use clap::Parser;

use cyclecast::core::{run_server, suggest_fill_dates, CycleEngine, ScoreOptions};
use cyclecast::types::{
    parse_calendar_day, Category, ObservationSet, ParsedObservations, Prediction, ScoreReason,
};
use cyclecast::{DEFAULT_MAX_GAP_DAYS, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "cyclecast",
    version = VERSION,
    about = "cyclecast - Bayesian cycle-state prediction from logged bleed dates",
    long_about = "cyclecast estimates, for any calendar day, the probability that it is\n\
                  a bleed day (regla), a high-receptivity day (perrisima), a moderately\n\
                  receptive day (horny), or a neutral day (nifunifa), from a sparse list\n\
                  of observed bleed dates.\n\n\
                  Modes:\n  \
                  --obs d1,d2,... --target d  Score one day (default target: today)\n  \
                  --days N                    Forecast N consecutive days from the target\n  \
                  --suggest                   Print suggested fill dates for logging gaps\n  \
                  --serve                     HTTP API server mode\n\n\
                  Categories:\n  \
                  regla      - Menstruating\n  \
                  perrisima  - Highly receptive\n  \
                  horny      - Moderately receptive\n  \
                  nifunifa   - Neutral"
)]
struct Args {
    /// Observed bleed-day dates, comma-separated (YYYY-MM-DD)
    #[arg(short, long, value_delimiter = ',')]
    obs: Vec<String>,

    /// Target date to score (default: today)
    #[arg(short, long)]
    target: Option<String>,

    /// Score this many consecutive days starting at the target
    #[arg(short, long)]
    days: Option<u32>,

    /// Dates known for certain to be bleed days, comma-separated
    #[arg(long, value_delimiter = ',')]
    certain: Vec<String>,

    /// Print suggested fill dates for in-cluster gaps and exit
    #[arg(long)]
    suggest: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Disable cluster gap-filling before scoring
    #[arg(long)]
    no_auto_fill: bool,

    /// Widest within-cluster spacing to bridge, in days
    #[arg(long, default_value_t = DEFAULT_MAX_GAP_DAYS)]
    max_gap: i64,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show the score and posterior breakdown
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.serve {
        run_serve(&args).await;
    } else if args.suggest {
        run_suggest(&args);
    } else if args.days.is_some() {
        run_range(&args);
    } else {
        run_predict(&args);
    }
}

/// Parse the observation and certainty inputs shared by all scoring modes
fn parse_inputs(args: &Args) -> (ObservationSet, ScoreOptions) {
    let parsed = ParsedObservations::parse(&args.obs);
    warn_rejected(&parsed.rejected, args.no_color);

    let options = ScoreOptions {
        certain_dates: args
            .certain
            .iter()
            .filter_map(|s| parse_calendar_day(s))
            .collect(),
        auto_fill_clusters: !args.no_auto_fill,
        max_gap_days: args.max_gap,
    };
    (parsed.set, options)
}

/// The date to score: --target when given, otherwise today
fn resolve_target(args: &Args) -> NaiveDate {
    match &args.target {
        Some(raw) => match parse_calendar_day(raw) {
            Some(date) => date,
            None => {
                eprintln!("Invalid --target date {:?} (expected YYYY-MM-DD)", raw);
                std::process::exit(2);
            }
        },
        None => Local::now().date_naive(),
    }
}

/// Run a single-date prediction
fn run_predict(args: &Args) {
    let (observations, options) = parse_inputs(args);
    let target = resolve_target(args);
    let engine = CycleEngine::default();

    match engine.score(&observations, target, &options) {
        Some(prediction) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&prediction).unwrap());
            } else if args.verbose {
                print_verbose(&engine, &observations, &options, &prediction, args.no_color);
            } else if args.no_color {
                println!("{}", prediction.to_parseable_string());
            } else {
                println!("{}", prediction.to_terminal_string());
            }
        }
        None => print_no_prediction(args),
    }
}

/// Run a multi-day forecast starting at the target date
fn run_range(args: &Args) {
    let (observations, options) = parse_inputs(args);
    let start = resolve_target(args);
    let days = args.days.unwrap_or(1).max(1);
    let engine = CycleEngine::default();

    let mut predictions: Vec<Prediction> = Vec::new();
    for i in 0..days {
        let day = start + Days::new(u64::from(i));
        if let Some(prediction) = engine.score(&observations, day, &options) {
            predictions.push(prediction);
        }
    }

    if predictions.is_empty() {
        print_no_prediction(args);
        return;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&predictions).unwrap());
    } else {
        for prediction in &predictions {
            if args.no_color {
                println!("{}", prediction.to_parseable_string());
            } else {
                println!("{}", prediction.to_terminal_string());
            }
        }
    }
}

/// Print suggested fill dates for observation gaps
fn run_suggest(args: &Args) {
    let parsed = ParsedObservations::parse(&args.obs);
    warn_rejected(&parsed.rejected, args.no_color);

    let fills = suggest_fill_dates(&parsed.set.dates(), args.max_gap);

    if args.json {
        #[derive(serde::Serialize)]
        struct SuggestOutput {
            suggested_dates: Vec<String>,
        }

        let out = SuggestOutput {
            suggested_dates: fills
                .iter()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out).unwrap());
    } else if fills.is_empty() {
        println!("No fill dates to suggest.");
    } else {
        for date in fills {
            println!("{}", date.format("%Y-%m-%d"));
        }
    }
}

/// Warn about date strings that were dropped
fn warn_rejected(rejected: &[String], no_color: bool) {
    for raw in rejected {
        eprintln!(
            "{}⚠ Ignoring unparseable date: {:?}{}",
            if no_color { "" } else { "\x1b[33m" },
            raw,
            if no_color { "" } else { "\x1b[0m" }
        );
    }
}

/// The defined no-result outcome: no valid observations to score against
fn print_no_prediction(args: &Args) {
    if args.json {
        println!("null");
    } else {
        eprintln!(
            "{}⚠ No valid observations; nothing to score. Pass --obs with at least one date.{}",
            if args.no_color { "" } else { "\x1b[33m" },
            if args.no_color { "" } else { "\x1b[0m" }
        );
    }
}

/// Print the score and posterior breakdown
fn print_verbose(
    engine: &CycleEngine,
    observations: &ObservationSet,
    options: &ScoreOptions,
    prediction: &Prediction,
    no_color: bool,
) {
    let color = if no_color { "" } else { prediction.dominant.color_code() };
    let reset = if no_color { "" } else { Category::color_reset() };

    println!("{}┌──────────────────────────────────────────┐{}", color, reset);
    println!(
        "{}│ target: {} | {}{}",
        color,
        prediction.target.format("%Y-%m-%d"),
        prediction.reason.code(),
        reset
    );
    println!("{}├──────────────────────────────────────────┤{}", color, reset);
    println!("{}│ Scores:{}", color, reset);
    for (category, mass) in prediction.scores.as_array() {
        println!(
            "{}│   {} {:<11} {:.4}{}",
            color,
            category.emoji(),
            format!("{}:", category),
            mass,
            reset
        );
    }
    println!("{}├──────────────────────────────────────────┤{}", color, reset);
    println!(
        "{}│ sexual_prob = {:.4} | dominance_gap = {:.4}{}",
        color, prediction.sexual_prob, prediction.dominance_gap, reset
    );
    if let Some(day) = prediction.expected_cycle_day {
        println!("{}│ expected cycle day = {:.1}{}", color, day, reset);
    }
    println!(
        "{}│ reliability: {}{}",
        color,
        prediction.reliability.display_value(),
        reset
    );
    println!("{}├──────────────────────────────────────────┤{}", color, reset);

    let used = engine.used_observations(observations, options);
    let filled = used.len() - used.confirmed_count();
    println!(
        "{}│ observations: {} used ({} filled){}",
        color,
        used.len(),
        filled,
        reset
    );
    if prediction.reason == ScoreReason::ScoredFromPosterior {
        if let Some(posterior) = engine.posterior_for(observations, options) {
            if let Some(map) = posterior.map_estimate() {
                println!(
                    "{}│ MAP cell: K={} L={} r={} (w={:.4}){}",
                    color, map.cycle_len, map.bleed_len, map.phase, map.weight, reset
                );
            }
            println!(
                "{}│ expected cycle length = {:.1}{}",
                color,
                posterior.expected_cycle_len(),
                reset
            );
        }
    } else {
        println!("{}│ {}{}", color, prediction.reason.description(), reset);
    }
    println!("{}└──────────────────────────────────────────┘{}", color, reset);
}

/// Run HTTP API server
async fn run_serve(args: &Args) {
    println!();
    println!("╔════════════════════════════════════════════╗");
    println!("║  🩸 cyclecast API Server                   ║");
    println!("║  Version: {}                            ║", VERSION);
    println!("╚════════════════════════════════════════════╝");
    println!();

    if let Err(e) = run_server(&args.addr).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
