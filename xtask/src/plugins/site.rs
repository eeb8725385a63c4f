use crate::config::Context;
use crate::registry::{Action, Scope};
use crate::utils::{Invocation, XResult};
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;

/// Renders every `.adoc` file under the site directory to the web format.
pub struct Site;

impl Site {
    pub fn plan(cx: &Context) -> XResult<Vec<Invocation>> {
        let docs = cx.docs();
        let site_dir = cx.path(&docs.site_dir);
        if !site_dir.is_dir() {
            warn!("Site directory {} does not exist", site_dir.display());
            return Ok(Vec::new());
        }

        let asciidoctor = cx.asciidoctor()?;
        let mut plan = Vec::new();
        for entry in WalkDir::new(&site_dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_adoc(entry.path()) {
                continue;
            }
            let source = entry.path().strip_prefix(cx.root()).unwrap_or(entry.path());
            plan.push(Invocation::new(
                asciidoctor,
                [
                    "-b".to_string(),
                    docs.web_format.clone(),
                    source.display().to_string(),
                ],
            ));
        }
        Ok(plan)
    }
}

fn is_adoc(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(".adoc"))
        .unwrap_or(false)
}

impl Action for Site {
    fn name(&self) -> &str {
        "site"
    }

    fn run(&self, scope: &Scope<'_>, _out: &mut dyn Write) -> XResult<()> {
        for invocation in Self::plan(scope.cx)? {
            invocation.run(scope.cx.root())?;
        }
        Ok(())
    }
}
