use std::{env, fs::read_to_string, path::Path, process::ExitCode, time::Instant};

use frontend::{
    errors::errors::{render_diagnostic, Error},
    parse_source, Options,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: frontend <file>");
        return ExitCode::from(2);
    }

    match run(&args[1]) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("error: {}", error);
            ExitCode::FAILURE
        }
    }
}

/// Parses one file and prints its diagnostics. Returns whether it was clean.
fn run(file_path: &str) -> Result<bool, Error> {
    let file_name = Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from(file_path));

    let start = Instant::now();
    let source = read_to_string(file_path)?;
    let options = Options::with_file(file_name);
    let output = parse_source(&source, &options)?;

    for diagnostic in &output.diagnostics {
        println!("{}\n", render_diagnostic(diagnostic, &source, options.tab_width));
    }

    let counts = output.unit.count_nodes();
    tracing::info!(
        nodes = counts.total(),
        missing = output.unit.missing_locations().len(),
        diagnostics = output.diagnostics.len(),
        "Parsed in {:?}",
        start.elapsed()
    );

    Ok(!output.has_errors())
}
