use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;

use fdcalc::config::AppConfig;
use fdcalc::core::{Calculator, Compounding, DepositInputs, RingChart};
use fdcalc::error::CalcError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliCompounding {
    Yearly,
    HalfYearly,
    Quarterly,
    Monthly,
}

impl From<CliCompounding> for Compounding {
    fn from(value: CliCompounding) -> Self {
        match value {
            CliCompounding::Yearly => Compounding::Yearly,
            CliCompounding::HalfYearly => Compounding::HalfYearly,
            CliCompounding::Quarterly => Compounding::Quarterly,
            CliCompounding::Monthly => Compounding::Monthly,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "fdcalc", about = "Fixed deposit maturity calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the calculator page and JSON API
    Serve(ServeArgs),
    /// Compute a single maturity and print the summary
    Compute(ComputeArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, help = "Bind address, overrides FDCALC_HOST")]
    host: Option<String>,
    #[arg(long, help = "Port, overrides FDCALC_PORT")]
    port: Option<u16>,
    #[arg(long, help = "Locale for digit grouping, overrides FDCALC_LOCALE")]
    locale: Option<String>,
    #[arg(long, help = "Currency symbol, overrides FDCALC_CURRENCY_SYMBOL")]
    symbol: Option<String>,
}

#[derive(Args, Debug)]
struct ComputeArgs {
    #[arg(long, help = "Deposit amount")]
    principal: String,
    #[arg(long, help = "Annual interest rate in percent, e.g. 6.5")]
    rate: String,
    #[arg(long, default_value = "0")]
    years: String,
    #[arg(long, default_value = "0", help = "Additional months, 0-11")]
    months: String,
    #[arg(long, value_enum, default_value_t = CliCompounding::Quarterly)]
    compounding: CliCompounding,
    #[arg(long, help = "Print the summary as JSON")]
    json: bool,
}

fn apply_serve_overrides(mut config: AppConfig, args: ServeArgs) -> AppConfig {
    if let Some(v) = args.host {
        config.host = v;
    }
    if let Some(v) = args.port {
        config.port = v;
    }
    if let Some(v) = args.locale {
        config.locale = v;
    }
    if let Some(v) = args.symbol {
        config.currency_symbol = v;
    }
    config
}

fn run_compute(config: &AppConfig, args: ComputeArgs) -> Result<(), CalcError> {
    let currency = config.currency_format()?;
    let mut calculator = Calculator::<RingChart>::headless(DepositInputs::default());
    calculator.set_principal(args.principal.as_str());
    calculator.set_rate(args.rate.as_str());
    calculator.set_years(args.years.as_str());
    calculator.set_months(args.months.as_str());
    calculator.set_compounding(args.compounding.into());

    let summary = calculator.summary();
    if args.json {
        let json = serde_json::json!({
            "inputs": calculator.inputs(),
            "tenure": calculator.tenure().label(),
            "summary": summary,
        });
        println!("{json}");
    } else {
        println!("Tenure:           {}", calculator.tenure());
        println!("Compounding:      {}", calculator.inputs().compounding.label());
        println!("Total investment: {}", currency.format(summary.total_investment));
        println!("Total interest:   {}", currency.format(summary.total_interest));
        println!("Maturity amount:  {}", currency.format(summary.maturity_amount));
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fdcalc=info")),
        )
        .init();

    let cli = Cli::parse();
    let result = match AppConfig::from_env() {
        Ok(config) => match cli.command {
            Command::Serve(args) => {
                fdcalc::api::run_http_server(apply_serve_overrides(config, args)).await
            }
            Command::Compute(args) => run_compute(&config, args),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}
