use clap::Parser;
use ledger_gateway::config::GatewayConfig;
use ledger_gateway::interfaces::form::payment_form::PaymentForm;
use ledger_gateway::interfaces::json::response_writer::ResponseWriter;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Form-encoded payment request. Read from stdin when omitted.
    input: Option<PathBuf>,

    #[command(flatten)]
    config: GatewayConfig,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let gateway = cli.config.build_gateway().into_diagnostic()?;

    let form = match cli.input {
        Some(path) => PaymentForm::from_reader(File::open(path).into_diagnostic()?),
        None => PaymentForm::from_reader(io::stdin().lock()),
    }
    .into_diagnostic()?;

    let result = gateway.process_payment(form.into_request()).await;

    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(stdout.lock());
    writer.write_response(&result).into_diagnostic()?;

    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
