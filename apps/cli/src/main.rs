use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::load_settings, ConverterClient, HistoryRegion, RegionUpdate, ResultRegion, UiAction,
    UiController, ViewState,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    runtime::Handle,
    sync::mpsc,
};
use tracing_subscriber::EnvFilter;

const SHELL_HELP: &str = "\
commands:
  convert <text>   convert a measurement string
  history          show conversion history
  clear result     clear the result
  clear history    clear the history list
  help             show this message
  quit             exit immediately (end of input waits for pending requests)";

#[derive(Parser, Debug)]
#[command(name = "measure", about = "Client for the measurement conversion service")]
struct Cli {
    /// Base address of the conversion service.
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one measurement string; the words are joined with spaces.
    Convert { input: Vec<String> },
    /// Print the conversion history kept by the service.
    History,
    /// Interactive session; every region update is printed as it arrives.
    Shell,
}

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Action(UiAction),
    Help,
    Quit,
    Nothing,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(server_url = %settings.server_url, "starting measure cli");

    let client = ConverterClient::new(settings.server_url.clone())
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let controller = UiController::new(Arc::new(client), Arc::new(update_tx), Handle::current());

    match cli.command {
        Command::Convert { input } => {
            let view = run_once(
                controller,
                update_rx,
                UiAction::Convert {
                    input: input.join(" "),
                },
            )
            .await?;
            Ok(print_result(&view.result))
        }
        Command::History => {
            let view = run_once(controller, update_rx, UiAction::ShowHistory).await?;
            Ok(print_history(&view.history))
        }
        Command::Shell => run_shell(controller, update_rx).await,
    }
}

async fn run_once(
    controller: UiController,
    mut update_rx: mpsc::UnboundedReceiver<RegionUpdate>,
    action: UiAction,
) -> Result<ViewState> {
    if let Some(task) = controller.dispatch(action) {
        task.await.context("request task failed")?;
    }
    let mut view = ViewState::default();
    while let Ok(update) = update_rx.try_recv() {
        view.apply(update);
    }
    Ok(view)
}

fn print_result(region: &ResultRegion) -> ExitCode {
    if region.is_error() {
        eprintln!("{}", region.text());
        ExitCode::FAILURE
    } else {
        println!("{}", region.text());
        ExitCode::SUCCESS
    }
}

fn print_history(region: &HistoryRegion) -> ExitCode {
    let mut code = ExitCode::SUCCESS;
    for line in region.lines() {
        if line.is_error {
            eprintln!("{}", line.text);
            code = ExitCode::FAILURE;
        } else {
            println!("{}", line.text);
        }
    }
    code
}

async fn run_shell(
    controller: UiController,
    mut update_rx: mpsc::UnboundedReceiver<RegionUpdate>,
) -> Result<ExitCode> {
    let printer = tokio::spawn(async move {
        while let Some(update) = update_rx.recv().await {
            for line in describe_update(&update) {
                println!("{line}");
            }
        }
    });

    println!("{SHELL_HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut quit = false;
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match parse_shell_command(&line) {
            Ok(ShellCommand::Action(action)) => {
                // fire and forget: the printer reports the outcome
                let _ = controller.dispatch(action);
            }
            Ok(ShellCommand::Help) => println!("{SHELL_HELP}"),
            Ok(ShellCommand::Quit) => {
                quit = true;
                break;
            }
            Ok(ShellCommand::Nothing) => {}
            Err(unknown) => eprintln!("unknown command '{unknown}'; type `help`"),
        }
    }

    drop(controller);
    if quit {
        printer.abort();
    } else {
        // in-flight requests keep the channel open until they publish
        let _ = printer.await;
    }
    Ok(ExitCode::SUCCESS)
}

fn parse_shell_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map(|(head, rest)| (head, rest.trim()))
        .unwrap_or((line, ""));

    match (head.to_ascii_lowercase().as_str(), rest) {
        ("", _) => Ok(ShellCommand::Nothing),
        ("convert", input) => Ok(ShellCommand::Action(UiAction::Convert {
            input: input.to_string(),
        })),
        ("history", "") => Ok(ShellCommand::Action(UiAction::ShowHistory)),
        ("clear-result", "") => Ok(ShellCommand::Action(UiAction::ClearResult)),
        ("clear-history", "") => Ok(ShellCommand::Action(UiAction::ClearHistory)),
        ("clear", target) if target.eq_ignore_ascii_case("result") => {
            Ok(ShellCommand::Action(UiAction::ClearResult))
        }
        ("clear", target) if target.eq_ignore_ascii_case("history") => {
            Ok(ShellCommand::Action(UiAction::ClearHistory))
        }
        ("help" | "?", "") => Ok(ShellCommand::Help),
        ("quit" | "exit", "") => Ok(ShellCommand::Quit),
        _ => Err(line.to_string()),
    }
}

fn describe_update(update: &RegionUpdate) -> Vec<String> {
    match update {
        RegionUpdate::Result(ResultRegion::Empty) => vec!["result: (cleared)".to_string()],
        RegionUpdate::Result(region) if region.is_error() => {
            vec![format!("result: error: {}", region.text())]
        }
        RegionUpdate::Result(region) => vec![format!("result: {}", region.text())],
        RegionUpdate::History(HistoryRegion::Empty) => vec!["history: (cleared)".to_string()],
        RegionUpdate::History(region) => region
            .lines()
            .into_iter()
            .map(|line| {
                if line.is_error {
                    format!("history: error: {}", line.text)
                } else {
                    format!("history: {}", line.text)
                }
            })
            .collect(),
    }
}
