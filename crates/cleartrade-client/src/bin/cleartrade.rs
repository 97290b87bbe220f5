//! ClearTrade terminal client
//!
//! An interactive front-end for the ClearTrade analysis service.
//!
//! # Usage
//!
//! ```bash
//! # Point at the service (defaults to http://127.0.0.1:8000/api)
//! export CLEARTRADE_API_BASE="http://127.0.0.1:8000/api"
//!
//! # Run the REPL
//! cargo run --bin cleartrade -p cleartrade-client
//!
//! # Or analyze once and exit
//! cargo run --bin cleartrade -p cleartrade-client -- --analyze msft --format markdown
//! ```

use clap::{Parser, ValueEnum};
use cleartrade_client::interface::{Formatter, FormatterFactory, OutputStyle};
use cleartrade_client::{ClientConfig, Dashboard, Reply};
use std::io::{self, BufRead, Write};
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Markdown,
}

impl From<Format> for OutputStyle {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputStyle::Text,
            Format::Markdown => OutputStyle::Markdown,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "cleartrade")]
#[command(about = "Explainable stock decision support in the terminal", long_about = None)]
struct Args {
    /// Base URL of the analysis service (overrides CLEARTRADE_API_BASE)
    #[arg(long)]
    api_base: Option<String>,

    /// Request timeout in seconds (overrides CLEARTRADE_TIMEOUT_SECS)
    #[arg(long)]
    timeout: Option<u64>,

    /// Ticker prefilled for `/analyze` (overrides CLEARTRADE_DEFAULT_TICKER)
    #[arg(long)]
    ticker: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Analyze this ticker, print the result and exit
    #[arg(long, value_name = "TICKER")]
    analyze: Option<String>,
}

fn build_config(args: &Args) -> cleartrade_client::Result<ClientConfig> {
    let mut builder = ClientConfig::builder();
    if let Some(api_base) = &args.api_base {
        builder = builder.api_base(api_base);
    }
    if let Some(secs) = args.timeout {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    if let Some(ticker) = &args.ticker {
        builder = builder.default_ticker(ticker);
    }
    builder.with_env().build()
}

fn print_banner(config: &ClientConfig) {
    println!("ClearTrade - Explainable Stock Decision Support");
    println!("  Service: {}", config.api_base);
    println!("  Type /help for commands, /exit to quit.");
    println!();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    cleartrade_utils::init_tracing("warn,cleartrade_client=info");

    let args = Args::parse();
    let config = build_config(&args)?;
    let formatter = FormatterFactory::create(args.format.into());
    let mut dashboard = Dashboard::connect(config.clone())?;

    if let Some(ticker) = args.analyze.as_deref() {
        let completion = dashboard.analyze(ticker).await;
        println!("{}", formatter.format_view(&dashboard.view()));
        if !completion.is_applied() {
            std::process::exit(1);
        }
        return Ok(());
    }

    print_banner(&config);
    println!("{}\n", formatter.format_chat(dashboard.view().chat));

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("[{}] > ", dashboard.view().ticker);
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match dashboard.process_input(input, formatter.as_ref()).await {
            Ok(Reply::Text(text)) if text.is_empty() => {}
            Ok(Reply::Text(text)) => println!("{text}\n"),
            Ok(Reply::Exit) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => eprintln!("{}\n", formatter.format_error(&e.user_message())),
        }
    }

    Ok(())
}
