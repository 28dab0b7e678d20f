use clap::{Args, Parser, Subcommand, ValueEnum};
use fortpay::application::method::{GatewayMethod, PaymentMethod};
use fortpay::config::GatewayConfig;
use fortpay::domain::command::{Command, MethodKind};
use fortpay::domain::parameters::Parameters;
use fortpay::domain::signature::{ShaType, SignatureEngine};
use fortpay::domain::status::TransactionOutcome;
use fortpay::infrastructure::http::HttpGatewayClient;
use fortpay::infrastructure::rules::FortRules;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the signature of a JSON parameter file
    Sign {
        /// JSON object with the request fields
        input: PathBuf,
        #[arg(long, env = "FORT_SHA_REQUEST_PHRASE", hide_env_values = true)]
        phrase: String,
        #[arg(long, env = "FORT_SHA_TYPE", default_value = "SHA-256")]
        sha_type: ShaType,
    },
    /// Authorize a transaction described by a JSON parameter file
    Authorize {
        input: PathBuf,
        #[command(flatten)]
        request: RequestArgs,
    },
    /// Query the status of a transaction
    CheckStatus {
        #[arg(long)]
        merchant_reference: String,
        #[arg(long)]
        fort_id: Option<String>,
        /// Fail unless the transaction is settled
        #[arg(long)]
        strict: bool,
        #[command(flatten)]
        request: RequestArgs,
    },
    /// Print the signed form for the hosted tokenization page
    Tokenize {
        #[arg(long)]
        merchant_reference: String,
        #[arg(long)]
        return_url: Option<String>,
        #[command(flatten)]
        account: AccountArgs,
    },
}

#[derive(Args)]
struct RequestArgs {
    #[arg(long, value_enum, default_value = "apple-pay")]
    method: Method,
    /// Print the signed, validated request instead of sending it
    #[arg(long)]
    dry_run: bool,
    #[command(flatten)]
    account: AccountArgs,
}

#[derive(Args)]
struct AccountArgs {
    #[arg(long, env = "FORT_MERCHANT_IDENTIFIER")]
    merchant_identifier: String,
    #[arg(long, env = "FORT_ACCESS_CODE")]
    access_code: String,
    #[arg(long, env = "FORT_SHA_REQUEST_PHRASE", hide_env_values = true)]
    request_phrase: String,
    #[arg(long, env = "FORT_SHA_RESPONSE_PHRASE", hide_env_values = true)]
    response_phrase: String,
    #[arg(long, env = "FORT_LANGUAGE", default_value = "en")]
    language: String,
    #[arg(long, env = "FORT_CURRENCY", default_value = "AED")]
    currency: String,
    #[arg(long, env = "FORT_SHA_TYPE", default_value = "SHA-256")]
    sha_type: ShaType,
    /// Use the production endpoints instead of the sandbox
    #[arg(long, env = "FORT_PRODUCTION")]
    production: bool,
    #[arg(long, env = "FORT_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum Method {
    ApplePay,
    MerchantPage,
}

impl From<Method> for MethodKind {
    fn from(method: Method) -> Self {
        match method {
            Method::ApplePay => MethodKind::ApplePay,
            Method::MerchantPage => MethodKind::MerchantPage,
        }
    }
}

impl AccountArgs {
    fn into_config(self) -> GatewayConfig {
        GatewayConfig {
            merchant_identifier: self.merchant_identifier,
            access_code: self.access_code,
            sha_request_phrase: self.request_phrase,
            sha_response_phrase: self.response_phrase,
            language: self.language,
            currency: self.currency,
            sandbox: !self.production,
            sha_type: self.sha_type,
            timeout_secs: self.timeout_secs,
        }
    }
}

fn build_method(kind: MethodKind, account: AccountArgs) -> Result<GatewayMethod> {
    let config = account.into_config();
    let client = HttpGatewayClient::from_config(&config).into_diagnostic()?;
    GatewayMethod::new(kind, config, Box::new(FortRules), Box::new(client)).into_diagnostic()
}

fn read_parameters(path: &Path) -> Result<Parameters> {
    let raw = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", path.display()))?;
    Parameters::from_json(&raw)
        .into_diagnostic()
        .wrap_err("parameter file must hold a JSON object")
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Cmd::Sign {
            input,
            phrase,
            sha_type,
        } => {
            let params = read_parameters(&input)?;
            println!("{}", SignatureEngine::new(sha_type).sign(&params, &phrase));
        }
        Cmd::Authorize { input, request } => {
            let params = read_parameters(&input)?;
            let method = build_method(request.method.into(), request.account)?;
            if request.dry_run {
                let prepared = method
                    .prepare(Command::Authorization, params)
                    .into_diagnostic()?;
                return print_json(&prepared);
            }
            let response = method.authorize(params).await.into_diagnostic()?;
            print_json(&response)?;
        }
        Cmd::CheckStatus {
            merchant_reference,
            fort_id,
            strict,
            request,
        } => {
            let mut params = Parameters::new().with("merchant_reference", merchant_reference);
            if let Some(fort_id) = fort_id {
                params.insert("fort_id", fort_id);
            }
            let method = build_method(request.method.into(), request.account)?;
            if request.dry_run {
                let prepared = method
                    .prepare(Command::CheckStatus, params)
                    .into_diagnostic()?;
                return print_json(&prepared);
            }
            let response = if strict {
                method.check_transaction_status(params).await
            } else {
                method.check_status(params).await
            }
            .into_diagnostic()?;
            let status = response.transaction_status();
            tracing::info!(
                outcome = ?TransactionOutcome::from_response(&response),
                status = status.as_deref().unwrap_or("-"),
                "Transaction status"
            );
            print_json(&response)?;
        }
        Cmd::Tokenize {
            merchant_reference,
            return_url,
            account,
        } => {
            let mut params = Parameters::new().with("merchant_reference", merchant_reference);
            if let Some(url) = return_url {
                params.insert("return_url", url);
            }
            let method = build_method(MethodKind::MerchantPage, account)?;
            if let Some(form) = method.prepare_tokenization_data(params).into_diagnostic()? {
                print_json(&form)?;
            }
        }
    }

    Ok(())
}
