// src/main.rs

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_standup::analytics::measure_digest;
use notion_standup::config::{process_env, resolve_api_key, resolve_database_id, Command};
use notion_standup::output::{details_path, prompt_path, standups_path, to_pretty_json};
use notion_standup::{
    deliver, deliver_all, load_standups, page_details, AppError, CommandLineInput, DatabaseQuery,
    DeliveryTarget, NotionHttpClient, NotionId, OutputPlan, OutputReport, PromptArgs,
    PromptComposer, PromptDelivery, RenderedPrompt, StandupCollector, StandupConfig,
    StandupPromptComposer, StandupSource, Warning,
};
use std::fs;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_standup.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // stdout carries JSON and prompt output, so logs go to stderr.
    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Opens a Notion client with the configured request deadline.
fn connect(config: &StandupConfig) -> Result<NotionHttpClient, AppError> {
    let api_key = resolve_api_key(process_env)?;
    NotionHttpClient::new(&api_key, config.request_timeout)
}

/// `fetch`: done tasks → standups.json.
async fn run_fetch(config: &StandupConfig) -> Result<(), AppError> {
    let client = connect(config)?;
    let database = resolve_database_id(process_env)?;
    let collector = StandupCollector::new(&client, &database, config.max_depth)
        .with_query(DatabaseQuery::with_status(&config.status));

    let digest = collector.collect().await?;
    let path = standups_path(&config.output_dir);
    let json = to_pretty_json(&digest.entries)?;
    deliver_all(OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
        path: path.clone(),
        content: json,
    }))?;

    let stats = measure_digest(&digest.entries);
    println!(
        "📄 Collected {} done pages ({} work items across {} projects).",
        stats.pages,
        stats.work_items,
        stats.project_count()
    );
    if stats.empty_pages > 0 {
        println!("   {} pages had no work items.", stats.empty_pages);
    }
    report_warnings(&digest.warnings);
    println!("✓ Standups saved to {}", path.display());
    Ok(())
}

/// `details`: done tasks → timestamped full-detail report.
async fn run_details(config: &StandupConfig) -> Result<(), AppError> {
    let client = connect(config)?;
    let database = resolve_database_id(process_env)?;
    let collector = StandupCollector::new(&client, &database, config.max_depth)
        .with_query(DatabaseQuery::with_status(&config.status));

    let started = Local::now();
    let digest = collector.collect_details(started.to_rfc3339()).await?;
    let path = details_path(&config.output_dir, &started);
    let json = to_pretty_json(&digest.report)?;
    deliver_all(OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
        path: path.clone(),
        content: json,
    }))?;

    println!(
        "📄 Extracted {} done pages in full detail.",
        digest.report.metadata.total_pages
    );
    report_warnings(&digest.warnings);
    println!("✓ Report saved to {}", path.display());
    Ok(())
}

/// `page <ID>`: one page in full detail on stdout.
async fn run_page(config: &StandupConfig, raw_id: &str) -> Result<(), AppError> {
    let id = NotionId::parse(raw_id)?;
    let client = connect(config)?;

    let (details, warnings) = page_details(&client, &id, config.max_depth).await?;
    for warning in &warnings {
        log::warn!("{}", warning);
    }
    deliver_all(OutputPlan::new().with_operation(DeliveryTarget::PrintToStdout {
        content: to_pretty_json(&details)?,
    }))?;
    Ok(())
}

/// `prompt`: standups.json → summarization prompt.
fn run_prompt(config: &StandupConfig, args: &PromptArgs) -> Result<(), AppError> {
    let entries = load_standups(&standups_path(&config.output_dir))?;
    log::info!("Loaded {} standups", entries.len());

    let composer = match &args.template {
        Some(path) => StandupPromptComposer::from_template_file(path, args.instruction.clone())?,
        None => StandupPromptComposer::new(args.instruction.clone())?,
    };
    let prompt = composer.compose(&entries)?;

    let delivery = PromptOutputs { config, args };
    let report = delivery.deliver(prompt)?;
    delivery.report_completion(&report);
    Ok(())
}

/// Where a rendered prompt goes: always the prompt file, optionally
/// stdout and the clipboard.
struct PromptOutputs<'a> {
    config: &'a StandupConfig,
    args: &'a PromptArgs,
}

impl PromptOutputs<'_> {
    fn report_completion(&self, report: &OutputReport) {
        for completed in &report.completed {
            match &completed.operation {
                DeliveryTarget::WriteFile { path, .. } => {
                    println!("✓ Prompt saved to {}", path.display());
                }
                DeliveryTarget::CopyToClipboard { .. } => {
                    println!("✓ Prompt copied to clipboard");
                }
                DeliveryTarget::PrintToStdout { .. } => {}
            }
        }
        for failed in &report.failed {
            eprintln!("⚠️  {}", failed.error);
        }
    }
}

impl PromptDelivery for PromptOutputs<'_> {
    fn deliver(&self, prompt: RenderedPrompt) -> Result<OutputReport, AppError> {
        let content = prompt.into_string();
        let mut plan = OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
            path: prompt_path(&self.config.output_dir),
            content: content.clone(),
        });
        if self.args.print {
            plan = plan.with_operation(DeliveryTarget::PrintToStdout {
                content: content.clone(),
            });
        }
        if !self.args.no_clipboard {
            plan = plan.with_operation(DeliveryTarget::CopyToClipboard { content });
        }

        let report = deliver(plan)?;

        // Only a missing prompt file fails the command.
        let file_failures: Vec<String> = report
            .failed
            .iter()
            .filter(|f| matches!(f.operation, DeliveryTarget::WriteFile { .. }))
            .map(|f| f.error.clone())
            .collect();
        if !file_failures.is_empty() {
            return Err(AppError::DeliveryFailed {
                failures: file_failures,
            });
        }

        Ok(report)
    }
}

fn report_warnings(warnings: &[Warning]) {
    if warnings.is_empty() {
        return;
    }
    eprintln!(
        "⚠️  {} blocks could not be fully expanded; their content may be incomplete.",
        warnings.len()
    );
    for warning in warnings {
        log::debug!("{}", warning);
    }
}

async fn execute(cli: CommandLineInput) -> Result<(), AppError> {
    let config = StandupConfig::resolve(&cli)?;

    match &cli.command {
        Command::Fetch => run_fetch(&config).await,
        Command::Details => run_details(&config).await,
        Command::Page { id } => run_page(&config, id).await,
        Command::Prompt(args) => run_prompt(&config, args),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose).context("failed to initialize logging")?;

    if let Err(e) = execute(cli).await {
        if let Some(hint) = e.hint() {
            eprintln!("hint: {}", hint);
        }
        return Err(e.into());
    }

    Ok(())
}
