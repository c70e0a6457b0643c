use std::io::Write;
use std::sync::Arc;

use log::LevelFilter;
use netonboard_rust::cli::{execute, parse_args, verbose_requested, USAGE};
use netonboard_rust::CONFIG;
use onboard_core::{LogFacadeLogger, RunLogger};

/// Backend del facade `log`: stderr con prefijo `[onboard]`. `RUST_LOG` sigue
/// pudiendo afinar filtros por target.
fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new().filter_level(level)
                              .parse_default_env()
                              .format(|buf, record| writeln!(buf, "[onboard] {:<5} {}", record.level(), record.args()))
                              .init();
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    // antes de CONFIG: sus advertencias de entorno pasan por el logger
    init_logging(verbose_requested(&args));
    let config = *CONFIG;

    let cli = match parse_args(&args, config.default_port) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("[onboard] {e}");
            eprintln!("{USAGE}");
            std::process::exit(e.exit_code());
        }
    };

    let logger: Arc<dyn RunLogger> = Arc::new(LogFacadeLogger::default());
    let report = match execute(cli.command, &config, logger).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("[onboard] {e}");
            std::process::exit(e.exit_code());
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("[onboard] report serialization failed: {e}");
            std::process::exit(4);
        }
    }
    eprintln!("[onboard] {} ({}): {} collected, {} failed", report.job, report.run_id, report.collected(), report.failed());
}
