use crate::registry::{Action, Scope};
use crate::utils::XResult;
use std::io::Write;
use xshell::Shell;

/// Zig output and cache directories, relative to the project root.
pub const ARTIFACTS: [&str; 2] = ["zig-out", ".zig-cache"];

pub struct Clean;

impl Action for Clean {
    fn name(&self) -> &str {
        "clean"
    }

    fn run(&self, scope: &Scope<'_>, _out: &mut dyn Write) -> XResult<()> {
        let sh = Shell::new()?;
        sh.change_dir(scope.cx.root());

        for artifact in ARTIFACTS {
            info!("rm -rf {}", artifact);
            sh.remove_path(artifact)?;
        }
        Ok(())
    }
}
