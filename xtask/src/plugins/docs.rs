use crate::registry::{Action, Scope};
use crate::utils::XResult;
use std::io::Write;
use xshell::Shell;

/// Checks for Asciidoctor and prepares the manual page output directories.
///
/// Every documentation command lists this as a prerequisite, so a missing
/// generator stops the run before any page is rendered.
pub struct Docs;

impl Action for Docs {
    fn name(&self) -> &str {
        "docs"
    }

    fn run(&self, scope: &Scope<'_>, _out: &mut dyn Write) -> XResult<()> {
        let cx = scope.cx;
        cx.asciidoctor()?;

        let sh = Shell::new()?;
        sh.change_dir(cx.root());
        for dir in [&cx.docs().man_out, &cx.docs().web_man_out] {
            let created = sh.create_dir(dir)?;
            debug!("    Output dir: {}", created.display());
        }
        Ok(())
    }
}
