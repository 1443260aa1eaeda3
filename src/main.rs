use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use inventory_sim::io::reporting;
use inventory_sim::{InventoryLedger, InventorySimulation, LeadTimeSampling, SimulationConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Sampling {
    /// Draw a lead time on every daily review
    EveryReview,
    /// Draw a lead time only when an order could go out
    OnOrder,
}

impl From<Sampling> for LeadTimeSampling {
    fn from(value: Sampling) -> Self {
        match value {
            Sampling::EveryReview => LeadTimeSampling::EveryReview,
            Sampling::OnOrder => LeadTimeSampling::OnOrder,
        }
    }
}

#[derive(Parser)]
#[command(name = "inventory-sim")]
#[command(version, about = "Daily inventory simulation with reorder-point replenishment", long_about = None)]
struct Cli {
    /// Seed for demand noise and lead-time draws
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of days to simulate
    #[arg(long, default_value_t = 365)]
    days: u32,

    /// When the replenishment policy samples a lead time
    #[arg(long, value_enum, default_value = "every-review")]
    sample_lead_time: Sampling,

    /// Directory for CSV exports (histories and KPI summary)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Print the monthly demand/shipped/stock table per SKU
    #[arg(long)]
    monthly: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    // 1. SETUP CONFIGURATION
    let config = SimulationConfig {
        horizon_days: cli.days,
        seed: cli.seed,
        lead_time_sampling: cli.sample_lead_time.into(),
        ..SimulationConfig::default()
    };

    // 2. INITIALIZE SIMULATION (demand is generated for the whole horizon here)
    let mut sim = InventorySimulation::new(config).context("invalid simulation configuration")?;

    // 3. RUN SIMULATION
    info!(days = sim.horizon_days(), "running simulation");
    sim.run();

    // 4. KPI SUMMARY
    let kpis = sim.kpis();
    print!("{}", reporting::format_kpi_report(&kpis));

    if cli.monthly {
        for ledger in sim.ledgers() {
            println!("[Monthly: {}]", ledger.name);
            println!("{:>5} {:>10} {:>10} {:>12}", "month", "demand", "shipped", "avg_stock");
            for row in reporting::monthly_summary(ledger) {
                println!(
                    "{:>5} {:>10} {:>10} {:>12.2}",
                    row.month, row.demand, row.shipped, row.avg_stock
                );
            }
        }
    }

    // 5. EXPORT RESULTS
    if let Some(dir) = cli.out_dir {
        let ledgers: Vec<&InventoryLedger> = sim.ledgers().collect();
        let written = reporting::export_all(&dir, ledgers.iter().copied(), &kpis)
            .with_context(|| format!("failed to export results to {}", dir.display()))?;
        for path in written {
            println!("Data written to {}", path.display());
        }
    }

    Ok(())
}
