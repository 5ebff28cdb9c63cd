use std::ffi::OsString;
use std::path::Path;
use std::process::ExitCode;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::{info, warn};

use hookburst::args::LoadTestArgs;
use hookburst::config::{FALLBACK_URL_ENV, RunSettings, apply_config, load_config};
use hookburst::error::AppResult;
use hookburst::export::{export_csv, export_json};
use hookburst::http::{DispatchConfig, Dispatcher};
use hookburst::metrics::aggregate;
use hookburst::report::print_report;

/// Exit status for argument and configuration errors.
const EXIT_CONFIG_ERROR: u8 = 1;

pub(crate) fn run() -> ExitCode {
    let (mut args, matches) = match parse_args(std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };

    match prepare(&mut args, &matches).and_then(|(settings, dispatcher)| {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(run_load_test(&settings, &dispatcher));
        Ok(())
    }) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

/// Parses the command line. Help and version exit 0; usage errors exit 1.
fn parse_args<I>(raw_args: I) -> Result<(LoadTestArgs, ArgMatches), ExitCode>
where
    I: IntoIterator<Item = OsString>,
{
    let parsed = LoadTestArgs::command()
        .try_get_matches_from(raw_args)
        .and_then(|matches| {
            LoadTestArgs::from_arg_matches(&matches).map(|args| (args, matches))
        });
    parsed.map_err(|err| {
        let code = if err.use_stderr() {
            ExitCode::from(EXIT_CONFIG_ERROR)
        } else {
            ExitCode::SUCCESS
        };
        if let Err(print_err) = err.print() {
            eprintln!("Failed to print usage: {}", print_err);
        }
        code
    })
}

/// Resolves config and builds the dispatcher before any request is sent.
fn prepare(args: &mut LoadTestArgs, matches: &ArgMatches) -> AppResult<(RunSettings, Dispatcher)> {
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(args, matches, &config)?;
    }

    crate::logger::init_logging(args.verbose);

    let settings = RunSettings::resolve(args, std::env::var(FALLBACK_URL_ENV).ok())?;
    let dispatcher = Dispatcher::new(DispatchConfig {
        target: settings.target.clone(),
        request_timeout: settings.request_timeout,
        workload: settings.workload,
    })?;

    Ok((settings, dispatcher))
}

async fn run_load_test(settings: &RunSettings, dispatcher: &Dispatcher) {
    println!("Starting webhook load test");
    println!("   - Target URL: {}", dispatcher.target());
    println!("   - Total Requests: {}", settings.requests);
    println!("   - Concurrency: all requests launched simultaneously");
    match settings.workload {
        Some(range) => println!(
            "   - Workload hint: {}-{}s (random per request)",
            range.min_secs(),
            range.max_secs()
        ),
        None => println!("   - Workload hint: disabled"),
    }
    println!();

    let outcome = dispatcher.run(settings.requests).await;
    let stats = aggregate(&outcome.results, outcome.total_duration);
    info!(
        "Batch finished in {:?}: {} ok, {} failed",
        outcome.total_duration, stats.successful, stats.failed
    );

    println!();
    print_report(
        dispatcher.target(),
        &stats,
        &outcome.results,
        settings.show_table,
    );

    if let Some(path) = settings.export_csv.as_deref() {
        match export_csv(Path::new(path), &outcome.results).await {
            Ok(()) => println!("Results saved to: {}", path),
            Err(err) => warn!("CSV export failed: {}", err),
        }
    }
    if let Some(path) = settings.export_json.as_deref() {
        match export_json(Path::new(path), dispatcher.target(), &stats, &outcome.results).await {
            Ok(()) => println!("Results saved to: {}", path),
            Err(err) => warn!("JSON export failed: {}", err),
        }
    }
}
