//! Score one (query, URL) pair from the command line.
//!
//! ```text
//! check --query "Is climate change real?" --url https://climate.nasa.gov/ --json
//! ```

use anyhow::Context;
use clap::Parser;

use credibility_checker::telemetry::init_tracing;
use credibility_checker::CredibilityChecker;

#[derive(Parser, Debug)]
#[command(name = "check", about = "Estimate the credibility of a URL for a query")]
struct Args {
    /// The question or claim the page should answer.
    #[arg(short, long)]
    query: String,

    /// Page to evaluate.
    #[arg(short, long)]
    url: String,

    /// Print the result record as pretty JSON.
    #[arg(long)]
    json: bool,

    /// Print the full score breakdown as JSON instead of the result record.
    #[arg(long, conflicts_with = "json")]
    report: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();
    let args = Args::parse();

    let checker = CredibilityChecker::from_env().context("building credibility checker")?;

    if args.report {
        let report = checker.score(&args.query, &args.url).await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let result = checker.credibility_score(&args.query, &args.url).await?;
    if args.json {
        println!("{}", result.to_json_pretty()?);
    } else {
        println!("Score: {} / 100", result.display_score());
        println!("Ratings: {}", result.ratings);
        println!("Explanation: {}", result.explanation);
    }
    Ok(())
}
