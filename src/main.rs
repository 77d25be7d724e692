// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Downline CLI entrypoint.
//!
//! Runs the interactive member tree TUI against the REST API at `DOWNLINE_API_URL`
//! (or `--api-url`).

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use downline::api::{HttpMemberApi, MemberApi};
use downline::config::{self, Config, Overrides};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--api-url <url>] [--timeout <secs>] [--log-file <path>]\n  {program} --help\n\n--api-url overrides {api_var} (default {default_url}).\n--timeout overrides {timeout_var} (default {default_timeout}s).\n--log-file overrides {log_var}; without a log file, logs go to stderr only when RUST_LOG is set.\n\nA .env file in the working directory is loaded first.",
        api_var = config::API_URL_VAR,
        default_url = downline::api::DEFAULT_API_URL,
        timeout_var = config::TIMEOUT_VAR,
        default_timeout = config::DEFAULT_TIMEOUT_SECS,
        log_var = config::LOG_FILE_VAR,
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    help: bool,
    overrides: Overrides,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                if options.help {
                    return Err(());
                }
                options.help = true;
            }
            "--api-url" => {
                if options.overrides.api_url.is_some() {
                    return Err(());
                }
                let url = args.next().ok_or(())?;
                options.overrides.api_url = Some(url);
            }
            "--log-file" => {
                if options.overrides.log_file.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.overrides.log_file = Some(PathBuf::from(path));
            }
            "--timeout" => {
                if options.overrides.timeout_secs.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let secs: u64 = raw.parse().map_err(|_| ())?;
                options.overrides.timeout_secs = Some(secs);
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "downline".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };
        if options.help {
            print_usage(&program);
            return Ok(());
        }

        let config = Config::from_env(options.overrides)?;
        config::init_logging(config.log_file())?;
        log::info!(
            "starting downline {} against {} (timeout {:?})",
            env!("CARGO_PKG_VERSION"),
            config.api_url(),
            config.request_timeout()
        );
        if let Some(path) = config.env_file() {
            log::debug!("loaded {}", path.display());
        }

        let api: Arc<dyn MemberApi> =
            Arc::new(HttpMemberApi::new(config.api_url(), config.request_timeout())?);

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let handle = tokio::runtime::Handle::current();
            let tui_join = tokio::task::spawn_blocking(move || {
                downline::tui::run(api, handle).map_err(|err| err.to_string())
            })
            .await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        log::info!("downline exited");
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("downline: {err}");
        std::process::exit(1);
    }
}
