//! Basic analysis example
//!
//! Runs one analyze call and one follow-up question against a running
//! ClearTrade service, then prints the derived view and the chat log.
//!
//! ```bash
//! cargo run --example basic_analysis -p cleartrade-client -- MSFT
//! ```

use cleartrade_client::interface::{Formatter, TextFormatter};
use cleartrade_client::{ClientConfig, Dashboard};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    cleartrade_utils::init_tracing("info");

    let ticker = std::env::args().nth(1).unwrap_or_else(|| "AAPL".to_string());
    let mut dashboard = Dashboard::connect(ClientConfig::from_env()?)?;

    dashboard.analyze(&ticker).await;
    println!("{}\n", TextFormatter.format_view(&dashboard.view()));

    dashboard.ask("Why?").await;
    println!("{}", TextFormatter.format_chat(dashboard.view().chat));

    Ok(())
}
