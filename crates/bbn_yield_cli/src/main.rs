//! bbn-yield CLI: simulate, report, defaults.

use bbn_yield::compute::{evaluate, InputField};
use bbn_yield::ui::{run_simulation, TextUi};
use bbn_yield::{InputParams, ReportData, ScenarioConfig};
use bbn_yield_report::HtmlUi;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    match cli.command {
        Command::Simulate(args) => run_simulate(args),
        Command::Report(args) => run_report(args),
        Command::Defaults => run_defaults(),
    }
}

#[derive(Parser)]
#[command(name = "bbn-yield")]
#[command(author = "gorusys <goru.connector@outlook.com>")]
#[command(about = "Staking yield simulator for Bitcoin and Babylon (BBN) stakers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a scenario and print the results.
    Simulate(SimulateArgs),
    /// Evaluate a scenario and write an HTML page.
    Report(ReportArgs),
    /// Print the default scenario as JSON.
    Defaults,
}

/// Scenario source plus per-field overrides. Flags win over the scenario file.
#[derive(Args)]
struct ScenarioArgs {
    /// Scenario JSON file. Without it: $BBN_YIELD_SCENARIO_PATH, ./config/scenario.json, ./scenario.json, defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Total Value Locked in USD.
    #[arg(long)]
    tvl: Option<f64>,
    /// Fully Diluted Value in USD.
    #[arg(long)]
    fdv: Option<f64>,
    /// Fraction of BBN supply staked, 0..=1.
    #[arg(long)]
    staking_ratio: Option<f64>,
    /// Price of 1 BBN in USD.
    #[arg(long)]
    bbn_price: Option<f64>,
    /// Total BBN supply.
    #[arg(long)]
    total_bbn: Option<f64>,
    /// Annual inflation, percent.
    #[arg(long)]
    inflation_rate: Option<f64>,
    /// Share of inflation routed to BTC stakers, percent. BBN gets the rest.
    #[arg(long)]
    btc_split: Option<f64>,
    #[arg(long)]
    btc_staking_apr: Option<f64>,
    #[arg(long)]
    lrt2_rewards_apr: Option<f64>,
    /// Collected but not used by any output.
    #[arg(long)]
    estimated_s4_added_apr: Option<f64>,
    #[arg(long)]
    collateral_yield: Option<f64>,
    #[arg(long)]
    borrow_cost: Option<f64>,
    /// Loan-to-value, percent. Collected but not used by any output.
    #[arg(long)]
    ltv_ratio: Option<f64>,
    #[arg(long)]
    max_leverage: Option<f64>,
}

impl ScenarioArgs {
    fn resolve(&self) -> Result<InputParams, Box<dyn std::error::Error>> {
        let mut p = ScenarioConfig::resolve(self.config.as_deref())?;
        p.apply_overrides([
            (InputField::Tvl, self.tvl),
            (InputField::Fdv, self.fdv),
            (InputField::StakingRatio, self.staking_ratio),
            (InputField::BbnPrice, self.bbn_price),
            (InputField::TotalBbn, self.total_bbn),
            (InputField::InflationRate, self.inflation_rate),
            (InputField::BtcSplit, self.btc_split),
            (InputField::BtcStakingApr, self.btc_staking_apr),
            (InputField::Lrt2RewardsApr, self.lrt2_rewards_apr),
            (InputField::EstimatedS4AddedApr, self.estimated_s4_added_apr),
            (InputField::CollateralYield, self.collateral_yield),
            (InputField::BorrowCost, self.borrow_cost),
            (InputField::LtvRatio, self.ltv_ratio),
            (InputField::MaxLeverage, self.max_leverage),
        ]);
        Ok(p)
    }
}

#[derive(Args)]
struct SimulateArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,
    /// Print the full evaluation with its fingerprint as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ReportArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long, default_value = "./reports")]
    reports_dir: PathBuf,
}

fn run_simulate(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let params = args.scenario.resolve()?;
    if args.json {
        let evaluation = evaluate(&params.to_inputs()?)?;
        let data = ReportData::new(params, evaluation)?;
        info!(fingerprint = %data.fingerprint_sha256, "simulate complete");
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }
    let stdout = std::io::stdout();
    let mut ui = TextUi::new(params, stdout.lock());
    run_simulation(&mut ui)?;
    Ok(())
}

fn run_report(args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let params = args.scenario.resolve()?;
    let html_path = args
        .out
        .unwrap_or_else(|| args.reports_dir.join("scenario.html"));
    let mut ui = HtmlUi::new(params, html_path);
    let results = run_simulation(&mut ui)?;
    info!(
        btc_apy = results.btc_apy,
        bbn_apy = results.bbn_apy,
        "report complete"
    );
    println!("Report written to {}", ui.out_path().display());
    Ok(())
}

fn run_defaults() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&InputParams::default())?);
    Ok(())
}
