use chrono::Local;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};
use finance_tracker::config::DEFAULT_BASE_URL;
use finance_tracker::projector::current_year;
use finance_tracker::render::render_dashboard;
use finance_tracker::{
    ClientConfig, Locale, MutationPolicy, Snapshot, SyncClient, TransactionKind, ViewProjector,
    validate_savings_amount, validate_transaction,
};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};

/// Terminal front end for the finance tracker server.
#[derive(Debug, Parser)]
#[command(name = "finance_tracker", version)]
struct Cli {
    /// Server base URL.
    #[arg(
        long,
        env = "FINANCE_API_URL",
        default_value = DEFAULT_BASE_URL,
        global = true
    )]
    api_url: String,

    /// Language of chart labels: ru or en.
    #[arg(long, env = "FINANCE_LOCALE", default_value = "ru", global = true)]
    locale: Locale,

    /// Request timeout in seconds. No timeout when unset.
    #[arg(
        long,
        env = "FINANCE_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    timeout_secs: Option<u64>,

    /// Wait for each mutation to finish before sending the next one.
    /// Accepts true/false, yes/no, on/off or 1/0.
    #[arg(
        long,
        env = "FINANCE_SINGLE_FLIGHT",
        default_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    single_flight: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load the current state and print balances, transactions and charts.
    Show {
        /// Year of the yearly chart. Defaults to the current year.
        #[arg(long)]
        year: Option<i32>,
        /// Print the snapshot and both chart series as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Record an income dated today.
    AddIncome(TransactionArgs),
    /// Record an expense dated today.
    AddExpense(TransactionArgs),
    /// Set the savings total.
    Savings {
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
    },
}

#[derive(Debug, Args)]
struct TransactionArgs {
    #[arg(long, allow_hyphen_values = true)]
    amount: String,
    #[arg(long)]
    note: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = init_logger() {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();
    debug!("{cli:?}");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let client = SyncClient::new(client_config(&cli))?;
    let projector = ViewProjector::new(cli.locale);

    match cli.command {
        Command::Show { year, json } => {
            let snapshot = client.load().await?;
            let year = year.unwrap_or_else(current_year);
            if json {
                print_json(&projector, &snapshot, year)?;
            } else {
                print_dashboard(&projector, &snapshot, year);
            }
        }
        Command::AddIncome(args) => {
            submit_transaction(&client, &projector, TransactionKind::Income, args).await?;
        }
        Command::AddExpense(args) => {
            submit_transaction(&client, &projector, TransactionKind::Expense, args).await?;
        }
        Command::Savings { amount } => {
            let amount = validate_savings_amount(&amount)?;
            let snapshot = client.submit_savings(amount).await?;
            info!("savings set to {amount:.2}");
            print_dashboard(&projector, &snapshot, current_year());
        }
    }
    Ok(())
}

async fn submit_transaction(
    client: &SyncClient,
    projector: &ViewProjector,
    kind: TransactionKind,
    args: TransactionArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let today = Local::now().date_naive();
    let transaction = validate_transaction(&args.amount, &args.note, today)?;
    let snapshot = client.submit_transaction(kind, &transaction).await?;
    info!(
        "recorded {kind:?} of {:.2} on {}",
        transaction.amount, transaction.date
    );
    print_dashboard(projector, &snapshot, current_year());
    Ok(())
}

fn client_config(cli: &Cli) -> ClientConfig {
    ClientConfig::new(cli.api_url.clone())
        .with_mutation_policy(MutationPolicy::from_single_flight(cli.single_flight))
        .with_timeout(cli.timeout_secs.map(Duration::from_secs))
}

fn print_dashboard(projector: &ViewProjector, snapshot: &Snapshot, year: i32) {
    let weekly = projector.project_weekly(snapshot);
    let yearly = projector.project_yearly(snapshot, year);
    print!(
        "{}",
        render_dashboard(snapshot, &weekly, &yearly, projector.locale())
    );
}

fn print_json(
    projector: &ViewProjector,
    snapshot: &Snapshot,
    year: i32,
) -> Result<(), serde_json::Error> {
    let payload = serde_json::json!({
        "snapshot": snapshot,
        "weekly": projector.project_weekly(snapshot),
        "yearly": projector.project_yearly(snapshot, year),
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn init_logger() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
