use clap::Parser;
use std::io::{self, Write};
use std::process::exit;

use xtask::config::{Context, XConfig};
use xtask::plugins;
use xtask::utils::{init_logger, project_root, XError, XResult};

#[macro_use]
extern crate log;

/// Runs VASM build directives, in order.
#[derive(Parser, Debug)]
#[command(name = "x", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Directives to run; `help` lists them
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    directives: Vec<String>,
}

fn main() {
    init_logger();

    if let Err(e) = try_main() {
        match e {
            XError::Exit => {
                // help and friends end the run successfully
            }
            XError::ToolMissing { .. } => {
                warn!("{}", e);
                exit(1);
            }
            _ => {
                error!("{}", e);
                exit(1);
            }
        }
    }
}

fn try_main() -> XResult<()> {
    let cli = Cli::parse();

    let root = project_root();
    let config = XConfig::load(&root)?;
    let cx = Context::resolve(root, config)?;
    let registry = plugins::registry()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.directives.is_empty() {
        write!(out, "{}", registry.help())?;
        return Ok(());
    }

    registry.dispatch(cli.directives.as_slice(), &cx, &mut out)
}
