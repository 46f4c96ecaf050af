//! Command-line front-end for the CMS API.
//!
//! Usage:
//!   cms-client --list
//!   cms-client member-detail idx=42
//!   cms-client policy-list --locale en
//!   cms-client visitor-statistics --query type=day --query start=2024-01-01
//!   cms-client create-comment idx=12 --body '{"content": "hi"}'
//!
//! Required environment variables:
//! - SITE_ID
//! - API_URL
//!
//! Optional:
//! - CONSOLE_API_URL (defaults to API_URL)
//! - CONSOLE_API_TOKEN
//! - DEFAULT_LOCALE (defaults to ko)
//! - MESSAGES_DIR
//! - REQUEST_TIMEOUT_SECS

use anyhow::{bail, Context, Result};
use cms_client::{config, AppContext, Operation, PathParams, RequestState};
use serde_json::Value;
use tracing::info;

#[derive(Debug, PartialEq)]
enum Command {
    List,
    Run(Invocation),
}

#[derive(Debug, PartialEq)]
struct Invocation {
    operation: Operation,
    params: PathParams,
    query: Vec<(String, String)>,
    body: Option<Value>,
    locale: Option<String>,
}

fn split_pair(arg: &str) -> Result<(&str, &str)> {
    arg.split_once('=')
        .with_context(|| format!("Expected name=value, got '{}'", arg))
}

fn parse_args(args: &[String]) -> Result<Command> {
    let mut iter = args.iter();

    let first = match iter.next() {
        Some(first) => first,
        None => bail!("Missing operation name (use --list to see all operations)"),
    };
    if first == "--list" {
        return Ok(Command::List);
    }

    let operation = Operation::from_name(first)
        .with_context(|| format!("Unknown operation '{}'", first))?;

    let mut invocation = Invocation {
        operation,
        params: PathParams::new(),
        query: Vec::new(),
        body: None,
        locale: None,
    };

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--query" => {
                let pair = iter.next().context("--query needs name=value")?;
                let (name, value) = split_pair(pair)?;
                invocation.query.push((name.to_string(), value.to_string()));
            }
            "--body" => {
                let raw = iter.next().context("--body needs a JSON value")?;
                invocation.body =
                    Some(serde_json::from_str(raw).context("--body is not valid JSON")?);
            }
            "--locale" => {
                let locale = iter.next().context("--locale needs a locale code")?;
                invocation.locale = Some(locale.clone());
            }
            other => {
                let (name, value) = split_pair(other)?;
                invocation.params.insert(name, value);
            }
        }
    }

    Ok(Command::Run(invocation))
}

fn route_table() -> String {
    Operation::ALL
        .iter()
        .map(|op| {
            let route = op.route();
            format!(
                "{:<28} {:<8} {:<7} {}\n",
                op.name(),
                route.audience,
                route.method,
                route.template
            )
        })
        .collect()
}

fn print_routes() {
    print!("{}", route_table());
}

async fn run(ctx: &AppContext, invocation: Invocation) -> Result<Value> {
    if let Some(locale) = &invocation.locale {
        ctx.language.set_locale(locale.as_str());
    }

    let mut params = invocation.params;
    params.insert_default("c_lang", ctx.language_code());

    let operation = invocation.operation;
    info!("Running {} ({})", operation, operation.method());

    let state = if operation.method().is_read() {
        let mut query = ctx.client.query(operation)?.params(params);
        for (name, value) in &invocation.query {
            query = query.query_param(name, value);
        }
        query.fetch().await;
        query.into_state()
    } else {
        let mut mutation = ctx.client.mutation(operation)?.params(params);
        for (name, value) in &invocation.query {
            mutation = mutation.query_param(name, value);
        }
        match &invocation.body {
            Some(body) => mutation.execute_with(body).await,
            None => mutation.execute().await,
        };
        mutation.into_state()
    };

    match state {
        RequestState::Success(data) => Ok(data),
        RequestState::Error(err) => Err(err).with_context(|| format!("{} failed", operation)),
        RequestState::Idle | RequestState::Loading => bail!("{} did not complete", operation),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cms_client=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match parse_args(&args)? {
        Command::List => {
            print_routes();
            return Ok(());
        }
        Command::Run(invocation) => invocation,
    };

    let config = config::Config::from_env()?;
    let ctx = AppContext::new(config)?;

    let data = run(&ctx, invocation).await?;
    println!("{}", serde_json::to_string_pretty(&data)?);

    Ok(())
}
