//! Command-line front end for `cmslink`.
//!
//! Run with: `cmslink <task> [args]`
//!
//! Results go to stdout as one JSON line per task; diagnostics go through
//! `tracing` to stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use cmslink_core::RestConnector;
use cmslink_infra::{config, init_logging, LogFormat, SessionConnector};

mod tasks;

use tasks::Task;

const DEFAULT_LOG_FILTER: &str = "warn,cmslink=info";

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let task = match Task::parse(&args) {
        Ok(Task::Help) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Ok(task) => task,
        Err(e) => {
            eprintln!("{e}");
            eprintln!();
            print_help();
            return ExitCode::FAILURE;
        }
    };

    match run(&task).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Task {} failed: {e:#}", task.name());
            ExitCode::FAILURE
        }
    }
}

async fn run(task: &Task) -> anyhow::Result<()> {
    let format = env::var("CMSLINK_LOG_FORMAT")
        .ok()
        .map(|raw| raw.parse::<LogFormat>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();
    let filter = env::var("CMSLINK_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
    init_logging(&filter, format)?;

    let config = config::load().context("loading configuration")?;
    let connector: Arc<dyn RestConnector> =
        Arc::new(SessionConnector::connect(&config).await.context("opening CAS session")?);

    let output = task.run(connector).await?;
    println!("{output}");
    Ok(())
}

fn print_help() {
    println!("cmslink: CAS-authenticated content-management client");
    println!();
    println!("USAGE:");
    println!("    cmslink <TASK> [ARGS]");
    println!();
    println!("TASKS:");
    println!("    group-add <user> <group>             Add user to group (remove first, then add)");
    println!("    group-remove <user> <group>          Remove user from group");
    println!("    group-members <group>                List users directly in group");
    println!("    site-add <user> <site> [--manager]   Add user to site as collaborator or manager");
    println!("    site-remove <user> <site>            Remove user from site if a member");
    println!("    site-members <site>                  List site members");
    println!("    people [filter]                      List people, optionally filtered");
    println!("    help                                 Show this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    CMSLINK_* environment variables (a .env file is honoured), or");
    println!("    cmslink.properties / cmslink.toml / cmslink.json in the working directory.");
    println!("    CMSLINK_LOG sets the log filter, CMSLINK_LOG_FORMAT=json switches to JSON logs.");
}
