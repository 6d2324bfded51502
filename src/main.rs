#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::doc_markdown, clippy::if_not_else, clippy::non_ascii_literal)]

use anyhow::Context;
use colored::Colorize;
use cybereye::aggregate::ScanResult;
use cybereye::input::{Config, Opts};
use cybereye::registry::select_targets;
use cybereye::report::{render_greppable, render_terminal, write_html_report};
use cybereye::scanner::{ReqwestTransport, Scanner};
use cybereye::{detail, funny_opening, output, snapshot, warning};
use std::{sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;

#[macro_use]
extern crate log;

#[cfg(not(tarpaulin_include))]
/// Username reconnaissance across social platforms
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut opts: Opts = Opts::read();
    let config = match Config::read(opts.config_path.clone()) {
        Ok(config) => config,
        Err(e) => {
            println!("Found {e:#} in configuration file.\nAborting scan.\n");
            std::process::exit(1);
        }
    };
    opts.merge(&config);

    debug!("Main() `opts` arguments are {:?}", opts);

    if !opts.greppable && !opts.accessible && !opts.no_banner {
        print_opening(&opts);
    }

    if opts.from_last {
        return report_from_last(&opts);
    }

    let runtime = tokio::runtime::Runtime::new().context("Could not start the async runtime")?;
    let result = runtime.block_on(scan(&opts))?;

    if opts.greppable {
        println!("{}", render_greppable(&result));
    } else {
        print!("{}", render_terminal(&result, opts.accessible));
    }

    if !opts.no_save {
        if let Err(e) = snapshot::save(&opts.results_file, &result) {
            warning!(format!("{e:#}"), opts.greppable, opts.accessible);
        }
    }

    if opts.html {
        let path = write_html_report(&opts.report_dir, std::slice::from_ref(&result))?;
        output!(
            format!("Report saved to {}", path.display()),
            opts.greppable,
            opts.accessible
        );
    }

    Ok(())
}

async fn scan(opts: &Opts) -> anyhow::Result<ScanResult> {
    let username = opts
        .username
        .as_deref()
        .map(str::trim)
        .filter(|username| !username.is_empty())
        .context("No username given")?;

    let targets = select_targets(opts.exclude_platforms.as_deref().unwrap_or_default());
    if targets.is_empty() {
        warning!(
            "Every platform is excluded, nothing to scan.",
            opts.greppable,
            opts.accessible
        );
    }

    let transport = ReqwestTransport::new().context("Could not build the HTTP client")?;
    let scanner = Scanner::new(
        &targets,
        Arc::new(transport),
        Duration::from_secs(opts.timeout),
        opts.tries,
        opts.batch_size,
    )
    .with_deadline(opts.deadline.map(Duration::from_secs));

    detail!(
        format!(
            "Scanning username {} on {} platforms",
            username.cyan(),
            scanner.targets().len()
        ),
        opts.greppable,
        opts.accessible
    );

    let cancel = CancellationToken::new();
    let probes = scanner.run_with_cancel(username, &cancel);
    tokio::pin!(probes);

    let result = tokio::select! {
        result = &mut probes => result,
        _ = tokio::signal::ctrl_c() => {
            warning!(
                "Interrupted, reporting what finished so far.",
                opts.greppable,
                opts.accessible
            );
            cancel.cancel();
            probes.await
        }
    };

    Ok(result)
}

fn report_from_last(opts: &Opts) -> anyhow::Result<()> {
    let Some(result) = snapshot::load(&opts.results_file)? else {
        warning!(
            "No previous results found to generate report.",
            opts.greppable,
            opts.accessible
        );
        return Ok(());
    };

    let path = write_html_report(&opts.report_dir, std::slice::from_ref(&result))?;
    output!(
        format!("Report for {} saved to {}", result.subject, path.display()),
        opts.greppable,
        opts.accessible
    );
    Ok(())
}

/// Prints the opening title.
fn print_opening(opts: &Opts) {
    debug!("Printing opening");
    let s = r"
   _____      _               ______
  / ____|    | |             |  ____|
 | |    _   _| |__   ___ _ __| |__  _   _  ___
 | |   | | | | '_ \ / _ \ '__|  __|| | | |/ _ \
 | |___| |_| | |_) |  __/ |  | |___| |_| |  __/
  \_____\__, |_.__/ \___|_|  |______\__, |\___|
         __/ |                       __/ |
        |___/                       |___/
";
    println!("{}", s.green().bold());
    let info = r"________________________________________
: Username reconnaissance, public pages :
 ---------------------------------------";
    println!("{}", info.yellow().bold());
    funny_opening!();

    if let Some(config_path) = opts
        .config_path
        .clone()
        .or_else(cybereye::input::default_config_path)
    {
        detail!(
            format!("The config file is expected to be at {config_path:?}"),
            opts.greppable,
            opts.accessible
        );
    }
}
