use crate::registry::{Action, Scope};
use crate::utils::{XError, XResult};
use std::io::Write;

/// Prints the command listing and ends the invocation.
pub struct Help;

impl Action for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn run(&self, scope: &Scope<'_>, out: &mut dyn Write) -> XResult<()> {
        write!(out, "{}", scope.registry.help())?;
        out.flush()?;
        Err(XError::Exit)
    }
}
