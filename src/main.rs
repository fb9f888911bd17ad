use anyhow::Context;
use serde::Serialize;

use vmlaunch::args::{
    flag_registry, parse_arguments, LaunchContext, ParseResult, ParseStatus, ProcessConfig,
};
use vmlaunch::config::Config;
use vmlaunch::devtool::{ScriptPathRecognizer, SnapshotLocator};
use vmlaunch::error::ERROR_EXIT_CODE;
use vmlaunch::logging::init_tracing;

/// What gets printed on stdout for a successful parse.
#[derive(Serialize)]
struct LaunchPlan<'a> {
    #[serde(flatten)]
    result: &'a ParseResult,
    process: &'a ProcessConfig,
}

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    match run(&argv) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(ERROR_EXIT_CODE);
        }
    }
}

fn run(argv: &[String]) -> anyhow::Result<i32> {
    let config = Config::load().context("failed to load launcher configuration")?;
    init_tracing(&config.log.filter);

    let locator =
        SnapshotLocator::from_config(&config.devtool, SnapshotLocator::current_exe_dir());
    let ctx = LaunchContext {
        run_from_app_snapshot: config.runtime.run_from_app_snapshot,
        abi: config.abi.range(),
    };
    let mut process = ProcessConfig::default();

    let result = match parse_arguments(argv, &ctx, &locator, &ScriptPathRecognizer, &mut process)
    {
        Ok(result) => result,
        Err(fatal) => {
            eprintln!("{fatal}");
            return Ok(fatal.exit_code());
        }
    };

    for line in result.warnings.iter().chain(&result.diagnostics) {
        eprintln!("{line}");
    }

    if result.status == ParseStatus::UsageError {
        if result.options.help {
            print_usage(result.options.verbose);
            return Ok(0);
        }
        if result.options.version {
            print_version();
            return Ok(0);
        }
        print_usage(false);
        return Ok(ERROR_EXIT_CODE);
    }

    let plan = LaunchPlan {
        result: &result,
        process: &process,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&plan).context("failed to serialize launch plan")?
    );
    Ok(0)
}

fn print_usage(verbose: bool) {
    eprintln!("Usage: vmlaunch [<vm-flags>] <script-file|command> [<arguments>]");
    eprintln!();
    if !verbose {
        eprintln!("Use --help --verbose to list all launcher flags.");
        return;
    }
    for def in flag_registry() {
        let name = match def.short {
            Some(short) => format!("{short}, {}", def.long),
            None => def.long.to_string(),
        };
        eprintln!("  {name:<36} {}", def.description);
    }
}

fn print_version() {
    eprintln!("vmlaunch version: {}", env!("CARGO_PKG_VERSION"));
}
