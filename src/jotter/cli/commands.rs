//! # CLI Layer
//!
//! The only place that knows about stdout, stdin and the async runtime.
//!
//! Every handler follows the same shape: load the collection through the
//! API, drive a transition, render the resulting views. The API owns all
//! state; handlers never touch notes directly.

use super::print::{print_messages, print_progress};
use super::render::render_note_list;
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use jotter::api::{CmdMessage, JotterApi};
use jotter::config::{JotterConfig, API_URL_ENV};
use jotter::error::{Result, UpdateFailure};
use jotter::store::http::HttpStore;
use std::io::{BufRead, Write};
use tracing::Level;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "JOTTER_LOG";

struct AppContext {
    api: JotterApi<HttpStore>,
    config: JotterConfig,
    use_color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.api_url.clone())?;

    if let Some(Commands::Config) = cli.command {
        return handle_config(&config);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let mut ctx = AppContext {
        api: JotterApi::new(HttpStore::from_config(&config)?),
        config,
        use_color: console::colors_enabled(),
    };

    runtime.block_on(async move {
        match cli.command {
            Some(Commands::List { search }) => handle_list(&mut ctx, search).await,
            Some(Commands::Search { term }) => handle_search(&mut ctx, term).await,
            Some(Commands::Replace {
                term,
                replacement,
                yes,
            }) => handle_replace(&mut ctx, term, replacement, yes).await,
            Some(Commands::Config) => Ok(()),
            None => handle_list(&mut ctx, None).await,
        }
    })
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default_filter(verbose));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Used when `JOTTER_LOG` is unset or unparsable.
fn default_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    EnvFilter::default().add_directive(level.into())
}

fn load_config(flag_url: Option<String>) -> Result<JotterConfig> {
    let loaded = match ProjectDirs::from("com", "jotter", "jotter") {
        Some(dirs) => JotterConfig::load(dirs.config_dir())?,
        None => JotterConfig::default(),
    };
    Ok(loaded.with_overrides(flag_url, std::env::var(API_URL_ENV).ok()))
}

async fn handle_list(ctx: &mut AppContext, search: Option<String>) -> Result<()> {
    ctx.api.load().await?;
    ctx.api.set_search_term(search);
    print!("{}", render_note_list(&ctx.api.note_views(), ctx.use_color));
    Ok(())
}

async fn handle_search(ctx: &mut AppContext, term: String) -> Result<()> {
    ctx.api.load().await?;
    ctx.api.set_search_term(Some(term));
    print!("{}", render_note_list(&ctx.api.note_views(), ctx.use_color));
    print_messages(&[CmdMessage::info(format!(
        "{} match(es) in {} note(s)",
        ctx.api.match_count(),
        ctx.api.filtered().len()
    ))]);
    Ok(())
}

async fn handle_replace(
    ctx: &mut AppContext,
    term: String,
    replacement: String,
    yes: bool,
) -> Result<()> {
    ctx.api.load().await?;
    ctx.api.set_search_term(Some(term.clone()));
    ctx.api.stage_replacement(Some(replacement))?;

    if ctx.api.filtered().is_empty() {
        print_messages(&[CmdMessage::warning(format!(
            "No notes contain {:?}.",
            term
        ))]);
        ctx.api.cancel_replacement();
        return Ok(());
    }

    print!("{}", render_note_list(&ctx.api.note_views(), ctx.use_color));

    let question = format!(
        "Replace {} occurrence(s) in {} note(s)? [y/N] ",
        ctx.api.match_count(),
        ctx.api.filtered().len()
    );
    if !yes && !confirm(&question)? {
        ctx.api.cancel_replacement();
        print_messages(&[CmdMessage::info("Cancelled, nothing was changed.")]);
        return Ok(());
    }

    let show_progress = ctx.config.progress;
    let outcome = ctx
        .api
        .confirm_replacement(|progress| {
            if show_progress {
                print_progress(progress);
            }
        })
        .await;

    match outcome {
        Ok(result) => {
            print_messages(&result.messages);
            Ok(())
        }
        Err(err) => {
            if let Some((failures, succeeded)) = err.batch_failures() {
                print_messages(&failure_messages(failures, succeeded));
            }
            Err(err)
        }
    }
}

fn failure_messages(failures: &[UpdateFailure], succeeded: usize) -> Vec<CmdMessage> {
    let mut messages = vec![CmdMessage::warning(format!(
        "Updated {} note(s), {} failed. Run the same replace again to retry:",
        succeeded,
        failures.len()
    ))];
    messages.extend(
        failures
            .iter()
            .map(|failure| CmdMessage::error(format!("  {}", failure))),
    );
    messages
}

fn handle_config(config: &JotterConfig) -> Result<()> {
    println!("api_url = {}", config.api_url);
    println!("timeout_secs = {}", config.timeout_secs);
    println!("progress = {}", config.progress);
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{}", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
