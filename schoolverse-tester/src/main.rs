mod reports;
mod scenarios;
mod tester;
mod util;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use scenarios::{all_keys, get_scenario, list_scenarios};
use tester::{LogicTester, ScenarioResult};
use util::{OutputTarget, parse_seeds, split_csv};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "schoolverse-tester", version)]
#[command(about = "Automated QA for the SchoolVerse player economy")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated, decimal or 0x-prefixed hex)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        let mut target = OutputTarget::new(args.output.clone())?;
        write_scenario_list(&mut target)?;
        target.flush_inner()?;
        return Ok(());
    }

    if args.report == ReportFormat::Console {
        announce_banner();
    }

    let start_time = Instant::now();
    let scenario_keys = expand_scenarios(&args.scenarios);
    let seeds = parse_seeds(&args.seeds)?;
    log::info!(
        "running {} scenarios over {} seeds x {} iterations",
        scenario_keys.len(),
        seeds.len(),
        args.iterations
    );

    let results = run_scenarios(&args, &scenario_keys, &seeds)?;
    write_report(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn write_scenario_list(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(out, "  {key:22} - {description}")?;
    }
    Ok(())
}

fn announce_banner() {
    println!("{}", "🏫 SchoolVerse Economy Tester".bright_cyan().bold());
    println!("{}", "=============================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for key in all_keys() {
            if !scenarios.contains(&key) {
                scenarios.push(key);
            }
        }
    }
    scenarios
}

fn run_scenarios(args: &Args, keys: &[String], seeds: &[u64]) -> Result<Vec<ScenarioResult>> {
    let tester = LogicTester::new(args.verbose);
    let mut results = Vec::new();
    for key in keys {
        let Some(scenario) = get_scenario(key) else {
            bail!("unknown scenario `{key}` (use --list-scenarios)");
        };
        results.extend(tester.run_scenario(&scenario, seeds, args.iterations));
    }
    Ok(results)
}

fn write_report(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Console => {
            reports::generate_console_report(&mut target, results, start_time.elapsed())?;
        }
        ReportFormat::Json => reports::generate_json_report(&mut target, results)?,
        ReportFormat::Markdown => reports::generate_markdown_report(&mut target, results)?,
    }
    target.flush_inner().context("flushing report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_expands_to_every_scenario_once() {
        let expanded = expand_scenarios("purchase-flow,all");
        assert_eq!(expanded.len(), all_keys().len());
        assert_eq!(expanded[0], "purchase-flow");
    }

    #[test]
    fn explicit_list_is_preserved() {
        assert_eq!(
            expand_scenarios(" rewards , decorations "),
            vec!["rewards".to_string(), "decorations".to_string()]
        );
    }

    #[test]
    fn unknown_scenario_is_an_error() {
        let args = Args::parse_from(["schoolverse-tester", "--scenarios", "teleport"]);
        let err = run_scenarios(&args, &expand_scenarios(&args.scenarios), &[1]).unwrap_err();
        assert!(err.to_string().contains("teleport"));
    }

    #[test]
    fn scenario_list_mentions_every_key() {
        let mut buf = Vec::new();
        write_scenario_list(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        for key in all_keys() {
            assert!(text.contains(&key));
        }
    }
}
