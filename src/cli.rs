//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_orders_adapter::CsvOrdersAdapter;
use crate::adapters::file_config_adapter::{
    validate_analysis_config, FileConfigAdapter, DEFAULT_CAPITAL, DEFAULT_DECIMALS,
    DEFAULT_LEVERAGE, DEFAULT_OUTPUT, DEFAULT_TITLE,
};
use crate::adapters::html_report::HtmlReportAdapter;
use crate::domain::analysis::{analyze_orders, Analysis};
use crate::domain::error::EdgemapError;
use crate::ports::config_port::ConfigPort;
use crate::ports::order_source_port::OrderSourcePort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "edgemap", about = "Order risk/reward analyzer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze an orders file and write an HTML report
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        orders: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        capital: Option<f64>,
        #[arg(long)]
        leverage: Option<f64>,
    },
    /// Check an orders file without producing a report
    Validate {
        #[arg(short, long)]
        orders: PathBuf,
        /// Resolve every order against this entry price instead of its own
        #[arg(long)]
        entry_override: Option<f64>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            config,
            orders,
            output,
            capital,
            leverage,
        } => run_analyze(&config, orders.as_ref(), output.as_ref(), capital, leverage),
        Command::Validate {
            orders,
            entry_override,
        } => run_validate(&orders, entry_override),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = EdgemapError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn run_analyze(
    config_path: &PathBuf,
    orders_override: Option<&PathBuf>,
    output_override: Option<&PathBuf>,
    capital_override: Option<f64>,
    leverage_override: Option<f64>,
) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    // Stage 2: Validate config values
    if let Err(e) = validate_analysis_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 3: Resolve account parameters
    let capital = match capital_override {
        Some(c) => c,
        None => adapter.get_double("account", "capital", DEFAULT_CAPITAL),
    };
    let leverage = match leverage_override {
        Some(l) => l,
        None => adapter.get_double("account", "leverage", DEFAULT_LEVERAGE),
    };

    if capital <= 0.0 {
        eprintln!("error: capital must be positive");
        return ExitCode::from(2);
    }
    if leverage <= 0.0 {
        eprintln!("error: leverage must be positive");
        return ExitCode::from(2);
    }

    // Stage 4: Resolve orders file
    let orders_path = match orders_override {
        Some(p) => p.display().to_string(),
        None => match adapter.get_string("orders", "file") {
            Some(f) => f,
            None => {
                let err = EdgemapError::ConfigMissing {
                    section: "orders".into(),
                    key: "file".into(),
                };
                eprintln!("error: {err}");
                return (&err).into();
            }
        },
    };

    // Stage 5: Load orders
    eprintln!("Loading orders from {orders_path}");
    let source = CsvOrdersAdapter::new(PathBuf::from(&orders_path));
    let orders = match source.load_orders() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 6: Evaluate orders
    let analysis = analyze_orders(&orders, capital, leverage);
    for skipped in &analysis.skipped {
        eprintln!(
            "warning: skipping order {} ({})",
            skipped.index + 1,
            skipped.reason
        );
    }

    if analysis.is_empty() {
        let err = EdgemapError::NoValidOrders;
        eprintln!("error: {err}");
        return (&err).into();
    }

    // Stage 7: Print results table to stdout, summary to stderr
    let decimals = adapter.get_int("report", "decimals", DEFAULT_DECIMALS) as usize;
    print_results_table(&analysis, decimals);
    print_summary(&analysis);

    // Stage 8: Write report
    let output = match output_override {
        Some(p) => p.display().to_string(),
        None => adapter
            .get_string("report", "output")
            .unwrap_or_else(|| DEFAULT_OUTPUT.to_string()),
    };
    let title = adapter
        .get_string("report", "title")
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let report = HtmlReportAdapter::new(title, decimals);
    match report.write(&analysis, &output) {
        Ok(()) => {
            eprintln!("\nReport written to: {output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write report: {e}");
            (&e).into()
        }
    }
}

fn print_results_table(analysis: &Analysis, decimals: usize) {
    println!(
        "{:>3}  {:<6} {:>12} {:>12} {:>12} {:>10} {:>12} {:>12} {:>9} {:>12}",
        "#",
        "dir",
        "entry",
        "take profit",
        "stop loss",
        "p/l ratio",
        "profit",
        "loss",
        "win rate",
        "ev",
    );
    for (i, eval) in analysis.evaluations.iter().enumerate() {
        println!(
            "{:>3}  {:<6} {:>12.p$} {:>12.p$} {:>12.p$} {:>10.p$} {:>12.p$} {:>12.p$} {:>8.1}% {:>12.p$}",
            i + 1,
            eval.direction.as_str(),
            eval.entry_price,
            eval.take_profit,
            eval.stop_loss,
            eval.profit_loss_ratio,
            eval.potential_profit,
            eval.potential_loss,
            eval.win_rate * 100.0,
            eval.expected_value,
            p = decimals,
        );
    }
}

fn print_summary(analysis: &Analysis) {
    let positive = analysis
        .evaluations
        .iter()
        .filter(|e| e.expected_value > 0.0)
        .count();

    eprintln!("\n=== Evaluation Summary ===");
    eprintln!("Capital:          {:.2}", analysis.capital);
    eprintln!("Leverage:         {}x", analysis.leverage);
    eprintln!("Orders evaluated: {}", analysis.evaluations.len());
    eprintln!("Orders skipped:   {}", analysis.skipped.len());
    eprintln!("Positive EV:      {positive}");
}

pub fn run_validate(orders_path: &PathBuf, entry_override: Option<f64>) -> ExitCode {
    if let Some(entry) = entry_override {
        if entry <= 0.0 {
            eprintln!("error: entry override must be positive");
            return ExitCode::from(2);
        }
    }

    eprintln!("Validating orders from {}", orders_path.display());
    let source = CsvOrdersAdapter::new(orders_path.clone());
    let orders = match source.load_orders() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if orders.is_empty() {
        eprintln!("No orders found in {}", orders_path.display());
        return ExitCode::SUCCESS;
    }

    let mut invalid = 0usize;
    for (i, order) in orders.iter().enumerate() {
        let resolved = match entry_override {
            Some(entry) => order.resolve_at(entry),
            None => order.resolve(),
        };
        let verdict = if resolved.has_valid_geometry() {
            "ok"
        } else {
            invalid += 1;
            "invalid geometry"
        };
        println!(
            "order {}: {} entry {}, take profit {}, stop loss {} [{}]",
            i + 1,
            resolved.direction,
            resolved.entry_price,
            resolved.take_profit,
            resolved.stop_loss,
            verdict,
        );
    }

    if invalid == 0 {
        eprintln!("\nAll {} orders have valid geometry.", orders.len());
    } else {
        eprintln!(
            "\n{} of {} orders have invalid geometry.",
            invalid,
            orders.len()
        );
    }
    ExitCode::SUCCESS
}
