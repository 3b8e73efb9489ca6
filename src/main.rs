use clap::{CommandFactory, Parser};
use env_logger::{Builder, Env, Target};
use log::info;
use std::fs;
use std::io;

use sfind::cli::Cli;
use sfind::config::Config;
use sfind::criteria::{Budget, Criteria};
use sfind::error::{Result as SfindResult, SfindError};
use sfind::output::{ConsoleDiagnostics, ConsoleOutput};
use sfind::paths;
use sfind::walker::{SearchState, Walker};

fn main() -> SfindResult<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "sfind", &mut io::stdout());
        return Ok(());
    }

    setup_logging(&cli)?;

    let config = Config::load()?;
    let mut criteria = Criteria::from_cli(&cli, &config);
    let budget = Budget::from_limit(cli.exit);

    if cli.color || cli.ack.is_some() {
        colored::control::set_override(true);
    } else if criteria.color && !is_terminal::is_terminal(&io::stdout()) {
        // color came from the config file; keep pipes clean
        criteria.color = false;
    }

    let roots = paths::resolve_roots(&cli.paths, criteria.full_path, cli.which);
    info!("searching {} root(s)", roots.len());

    let stdout = io::stdout();
    let mut output = ConsoleOutput::new(&criteria, stdout.lock());
    let mut diagnostics = ConsoleDiagnostics::default();
    let mut state = SearchState::new(budget);
    let mut walker = Walker::new(&criteria, &mut output, &mut diagnostics);
    walker.walk(&roots, &mut state)?;

    info!(
        "walk finished, {} recoverable failure(s)",
        diagnostics.reported()
    );
    Ok(())
}

fn setup_logging(cli: &Cli) -> SfindResult<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("error"));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    if let Some(log_path) = &cli.log {
        if let Some(parent_dir) = log_path.parent() {
            if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                fs::create_dir_all(parent_dir)?;
            }
        }
        let log_file = fs::File::create(log_path)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| SfindError::Config(e.to_string()))?;
    Ok(())
}
