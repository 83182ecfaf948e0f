//! itpatch CLI.
//!
//! Lists the boards under the configured root (`MainMCU/` by default), lets
//! the user pick one, and comments out the CubeMX interrupt handlers that the
//! RTOS port defines itself.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use itpatch::core::types::PatchMode;
use itpatch::exit_codes;
use itpatch::io::config::{DEFAULT_CONFIG_PATH, PatchConfig, load_config, write_config};
use itpatch::patch::{BoardReport, PatchOptions, list_boards, run_patch};
use itpatch::select::{BoardChoice, PromptSelector, write_menu};

#[derive(Parser)]
#[command(
    name = "itpatch",
    version,
    about = "Comment out CubeMX interrupt handlers that collide with the RTOS port"
)]
struct Cli {
    /// Config file (missing file means built-in defaults).
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Board root directory; overrides `root` from the config.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the numbered board menu.
    List,
    /// Patch the interrupt files of one board.
    Patch {
        /// Board index or name; prompts on stdin when omitted.
        #[arg(short, long)]
        board: Option<BoardChoice>,
        /// Override the configured patch mode.
        #[arg(long, value_enum)]
        mode: Option<PatchMode>,
        /// Report matched blocks without writing.
        #[arg(long)]
        dry_run: bool,
    },
    /// Write the default config file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    itpatch::logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::for_error(&err));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::List => cmd_list(&load(&cli.config, cli.root)?),
        Command::Patch {
            board,
            mode,
            dry_run,
        } => {
            let config = load(&cli.config, cli.root)?;
            let options = PatchOptions { mode, dry_run };
            cmd_patch(&config, board, &options)
        }
        Command::InitConfig { force } => cmd_init_config(&cli.config, force),
    }
}

fn load(path: &Path, root: Option<PathBuf>) -> Result<PatchConfig> {
    let mut config = load_config(path).context("load config")?;
    if let Some(root) = root {
        config.root = root;
    }
    Ok(config)
}

fn cmd_list(config: &PatchConfig) -> Result<()> {
    let boards = list_boards(&config.root)?;
    let mut stdout = io::stdout().lock();
    write_menu(&mut stdout, &boards).context("write menu")?;
    Ok(())
}

fn cmd_patch(config: &PatchConfig, board: Option<BoardChoice>, options: &PatchOptions) -> Result<()> {
    let report = match board {
        Some(mut choice) => run_patch(config, &mut choice, options)?,
        None => {
            let mut selector = PromptSelector::new(io::stdin().lock(), io::stdout());
            run_patch(config, &mut selector, options)?
        }
    };
    print_report(&report, options.dry_run)
}

fn cmd_init_config(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    write_config(path, &PatchConfig::default())
        .with_context(|| format!("write {}", path.display()))?;
    println!("init-config: file={}", path.display());
    Ok(())
}

fn print_report(report: &BoardReport, dry_run: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_report(&mut stdout, report, dry_run).context("write report")
}

/// One `<label>: file=<path> blocks=<n> lines=<m>` line per file.
fn write_report<W: Write>(out: &mut W, report: &BoardReport, dry_run: bool) -> io::Result<()> {
    let label = if dry_run { "dry-run" } else { "patched" };
    for file in &report.files {
        writeln!(
            out,
            "{}: file={} blocks={} lines={}",
            label,
            file.path.display(),
            file.blocks.len(),
            file.affected_lines
        )?;
    }
    Ok(())
}
