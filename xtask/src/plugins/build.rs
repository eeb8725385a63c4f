use crate::config::Context;
use crate::registry::{Action, Scope};
use crate::utils::{Invocation, XResult};
use std::io::Write;

/// Builds the VASM program.
pub struct Build;

impl Build {
    pub fn invocation(cx: &Context) -> Invocation {
        Invocation::new(cx.zig(), ["build", "--summary", "all"])
    }
}

impl Action for Build {
    fn name(&self) -> &str {
        "build"
    }

    fn run(&self, scope: &Scope<'_>, _out: &mut dyn Write) -> XResult<()> {
        Self::invocation(scope.cx).run(scope.cx.root())
    }
}
