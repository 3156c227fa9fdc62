use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use stockpickr::display::format_matches;
use stockpickr::{PipelineConfig, RecommendRequest, Recommender, RestApi, VariancePolicy};
use stockpickr_features::{current_year, DEFAULT_STD_FLOOR};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Recommend stocks similar to your preferences
#[derive(Parser, Debug)]
#[command(name = "stockpickr")]
#[command(about = "Recommend stocks similar to your preferences", long_about = None)]
struct Args {
    /// Path to the company catalog CSV
    #[arg(short, long, global = true, default_value = "data/companies.csv")]
    catalog: PathBuf,

    /// Year company ages are computed against (defaults to the current year)
    #[arg(long, global = true, value_parser = clap::value_parser!(i32).range(1..=9999))]
    reference_year: Option<i32>,

    /// Handling of features without variance
    #[arg(long, global = true, value_enum, default_value_t = PolicyArg::UnitScale)]
    variance_policy: PolicyArg,

    /// Minimum standard deviation for the `floor` policy
    #[arg(long, global = true, default_value_t = DEFAULT_STD_FLOOR)]
    std_floor: f64,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the companies closest to the given preferences
    Recommend(RecommendArgs),
    /// Print input ranges, industries and countries as JSON
    Bounds,
    /// Serve the HTTP API
    Serve {
        /// HTTP API port
        #[arg(long, default_value_t = 8080)]
        http_port: u16,
    },
}

#[derive(ClapArgs, Debug)]
struct RecommendArgs {
    /// Low, Medium or High
    #[arg(long, default_value = "Low")]
    risk_level: String,

    /// Annual revenue in USD billions
    #[arg(long, default_value_t = 50.0)]
    annual_revenue: f64,

    /// Market cap in USD billions
    #[arg(long, default_value_t = 200.0)]
    market_cap: f64,

    /// Number of employees
    #[arg(long, default_value_t = 10_000)]
    employee_size: u64,

    /// Dividend yield in percent
    #[arg(long, default_value_t = 2.0)]
    dividend_yield: f64,

    /// Growth over the last year in percent
    #[arg(long, default_value_t = 120.0)]
    growth: f64,

    /// Company age in years
    #[arg(long, default_value_t = 20)]
    age: u32,

    /// Number of recommendations
    #[arg(short, default_value_t = stockpickr_similarity::DEFAULT_K)]
    k: usize,

    /// Print the explained response as JSON
    #[arg(long)]
    json: bool,
}

impl From<&RecommendArgs> for RecommendRequest {
    fn from(args: &RecommendArgs) -> Self {
        RecommendRequest {
            risk_level: args.risk_level.clone(),
            annual_revenue: args.annual_revenue,
            market_cap: args.market_cap,
            employee_size: args.employee_size,
            dividend_yield_pct: args.dividend_yield,
            growth_pct: args.growth,
            age_years: args.age,
            k: args.k,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    UnitScale,
    Floor,
    Reject,
}

impl Args {
    fn pipeline_config(&self) -> PipelineConfig {
        let variance_policy = match self.variance_policy {
            PolicyArg::UnitScale => VariancePolicy::UnitScale,
            PolicyArg::Floor => VariancePolicy::Floor(self.std_floor),
            PolicyArg::Reject => VariancePolicy::Reject,
        };
        PipelineConfig {
            reference_year: self.reference_year.unwrap_or_else(current_year),
            variance_policy,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so JSON output on stdout stays clean
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting StockPickr v{}", env!("CARGO_PKG_VERSION"));
    let config = args.pipeline_config();
    let recommender = Recommender::from_path(&args.catalog, config)
        .with_context(|| format!("failed to initialize from {}", args.catalog.display()))?;

    match args.command {
        Command::Recommend(ref rec_args) => {
            let request = RecommendRequest::from(rec_args);
            if rec_args.json {
                let response = recommender.recommend_explained(&request)?;
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                let matches = recommender.recommend(&request)?;
                println!("{}", format_matches(&matches));
            }
        }
        Command::Bounds => {
            let catalog = recommender.catalog();
            let body = serde_json::json!({
                "companies": catalog.len(),
                "reference_year": catalog.reference_year(),
                "industries": catalog.distinct_industries(),
                "countries": catalog.distinct_countries(),
                "bounds": catalog.input_bounds(),
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Command::Serve { http_port } => serve(recommender, http_port).await,
    }

    Ok(())
}

async fn serve(recommender: Recommender, http_port: u16) {
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(recommender, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://localhost:{}/", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_year_range() {
        let args = Args::try_parse_from(["stockpickr", "--reference-year", "2024", "bounds"]).unwrap();
        assert_eq!(args.pipeline_config().reference_year, 2024);

        for year in ["0", "-2147483648", "10000"] {
            let arg = format!("--reference-year={}", year);
            assert!(Args::try_parse_from(["stockpickr", arg.as_str(), "bounds"]).is_err());
        }
    }

    #[test]
    fn test_variance_policy_mapping() {
        let args = Args::try_parse_from([
            "stockpickr",
            "--variance-policy",
            "floor",
            "--std-floor",
            "0.5",
            "recommend",
        ])
        .unwrap();
        assert_eq!(args.pipeline_config().variance_policy, VariancePolicy::Floor(0.5));
    }
}
