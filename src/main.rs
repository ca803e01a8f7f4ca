/*!
 * Command-line interface for repo-to-txt
 */

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tempfile::TempDir;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use repo_to_txt::clipboard::copy_file_to_clipboard;
use repo_to_txt::config::{Args, Config, DEFAULT_CLONE_DIR};
use repo_to_txt::git::{clone_or_pull, BarReporter};
use repo_to_txt::prompt::{Prompt, PromptSelector, TermPrompt};
use repo_to_txt::report::{ReportFormat, Reporter, ScanReport};
use repo_to_txt::scanner::write_repo_contents;
use repo_to_txt::selection::{write_selected_files, FileSelector};
use repo_to_txt::Result;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("repo_to_txt=info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "repo-to-txt", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Variant messages already embed their sources
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let interactive = !args.non_interactive && io::stdin().is_terminal();
    let mut term = TermPrompt::new();
    let mut prompt: Option<&mut dyn Prompt> = if interactive {
        Some(&mut term as &mut dyn Prompt)
    } else {
        None
    };

    let config = Config::resolve(args, prompt.as_deref_mut())?;
    config.validate()?;
    info!("Welcome to repo-to-txt!");

    // Dropping the guard removes the temporary checkout
    let (_guard, checkout): (Option<TempDir>, PathBuf) = match &config.clone_dir {
        Some(dir) => (None, dir.join(&config.repo.name)),
        None => {
            let temp = tempfile::Builder::new()
                .prefix(DEFAULT_CLONE_DIR)
                .tempdir()?;
            let path = temp.path().to_path_buf();
            (Some(temp), path)
        }
    };

    let bar = BarReporter::new(&config.repo.name);
    let fetched = clone_or_pull(&config.repo, &checkout, &config.credentials, Some(&bar));
    bar.finish();
    fetched?;

    let output_file = config.output_file();
    let report = if config.file_names.is_empty() {
        let report = write_repo_contents(&checkout, &output_file, &config.policy)?;
        info!("Repository contents written to {}", output_file.display());
        report
    } else {
        let report = match prompt {
            Some(p) => {
                let mut selector = PromptSelector::new(p);
                write_selected_files(&checkout, &output_file, &config.file_names, &mut selector)?
            }
            None => {
                let mut first = FirstMatch;
                write_selected_files(&checkout, &output_file, &config.file_names, &mut first)?
            }
        };
        info!("Specified files' contents written to {}", output_file.display());
        report
    };

    copy_output(&config, &report)?;
    Reporter::new(ReportFormat::ConsoleTable).print_report(&report);
    Ok(())
}

fn copy_output(config: &Config, report: &ScanReport) -> Result<()> {
    if config.copy_to_clipboard {
        copy_file_to_clipboard(&config.output_file())?;
        info!("Output has been copied to the clipboard ({} files)", report.emitted.len());
    } else {
        info!("Output was not copied to the clipboard");
    }
    Ok(())
}

/// Takes the first candidate in walk order when nobody can be asked
struct FirstMatch;

impl FileSelector for FirstMatch {
    fn select(&mut self, name: &str, candidates: &[PathBuf]) -> Result<PathBuf> {
        warn!(
            "{} matches found for {}, using {}",
            candidates.len(),
            name,
            candidates[0].display()
        );
        Ok(candidates[0].clone())
    }
}
