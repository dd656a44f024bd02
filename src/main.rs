use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fern::colors::{Color, ColoredLevelConfig};

mod api;
mod attendance;
mod clock_command;
mod config;
mod console;
mod datetime;
mod filter;
mod list_command;
mod remove_command;
mod role;
mod summary_command;
mod time_entry;

use api::RestClient;
use clock_command::{ClockInArgs, ClockInCommand, ClockOutArgs, ClockOutCommand};
use config::Config;
use console::{ConsoleMarkdownList, ConsolePresenter};
use list_command::{ListArgs, ListCommand};
use remove_command::{RemoveArgs, RemoveCommand};
use role::{ensure_capability, Capability};
use summary_command::{SummaryArgs, SummaryCommand};

/// 現場スタッフの勤怠記録を一覧・集計するためのCLIアプリケーション。
///
/// # Examples
/// ```
/// $ cargo run -- list
/// $ cargo run -- summary --from 2024-03-04 --to 2024-03-10
/// ```
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    #[clap(subcommand)]
    subcommand: SubCommands,
}

/// サブコマンドを表す列挙型。
#[derive(Debug, Subcommand)]
enum SubCommands {
    List(ListArgs),
    Summary(SummaryArgs),
    ClockIn(ClockInArgs),
    ClockOut(ClockOutArgs),
    Remove(RemoveArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logger().context("Failed to initialize logger")?;

    let config = Config::from_env().context("Failed to load configuration")?;
    let client = RestClient::new(&config);
    let mut stdout = io::stdout();
    let mut presenter = ConsoleMarkdownList::new(&mut stdout);

    match args.subcommand {
        SubCommands::List(list) => {
            ensure_capability(config.role, Capability::ViewTimesheet)?;
            let time_entries = ListCommand::new(&client).run(list).await?;
            presenter.show_time_entries(&time_entries)?;
        }
        SubCommands::Summary(summary) => {
            ensure_capability(config.role, Capability::ViewTimesheet)?;
            let report = SummaryCommand::new(&client).run(summary).await?;
            presenter.show_report(&report)?;
        }
        SubCommands::ClockIn(clock_in) => {
            ensure_capability(config.role, Capability::RecordTime)?;
            let created = ClockInCommand::new(&client).run(clock_in).await?;
            presenter.show_time_entries(&[created])?;
        }
        SubCommands::ClockOut(clock_out) => {
            ensure_capability(config.role, Capability::RecordTime)?;
            let updated = ClockOutCommand::new(&client).run(clock_out).await?;
            presenter.show_time_entries(&[updated])?;
        }
        SubCommands::Remove(remove) => {
            ensure_capability(config.role, Capability::ManageTimesheet)?;
            RemoveCommand::new(&client).run(remove).await?;
        }
    }

    Ok(())
}

/// ロガーを初期化する。ログはstderrに出力し、標準出力は表示専用とする。
fn setup_logger() -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stderr())
        .apply()
        .context("Failed to apply logger settings")?;

    Ok(())
}
