use crate::config::Context;
use crate::registry::{Action, Scope};
use crate::utils::{Invocation, XError, XResult};
use std::fs;
use std::io::Write;
use std::path::Path;

const SOURCE_SUFFIX: &str = ".adoc";

/// Renders each manual page source twice: an HTML copy for the website and a
/// roff page for `man`.
pub struct ManPages;

impl ManPages {
    pub fn plan(cx: &Context) -> XResult<Vec<Invocation>> {
        let docs = cx.docs();
        let asciidoctor = cx.asciidoctor()?;

        let man_src = cx.path(&docs.man_src);
        let entries = fs::read_dir(&man_src).map_err(|source| XError::ReadDir {
            path: man_src.clone(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(SOURCE_SUFFIX) {
                names.push(name);
            }
        }
        names.sort();

        let mut plan = Vec::with_capacity(names.len() * 2);
        for name in names {
            let stem = &name[..name.len() - SOURCE_SUFFIX.len()];
            let source = display(Path::new(&docs.man_src).join(&name));

            let web_page = display(Path::new(&docs.web_man_out).join(format!("{}.html", stem)));
            plan.push(Invocation::new(
                asciidoctor,
                ["-b", docs.web_format.as_str(), source.as_str(), "-o", web_page.as_str()],
            ));

            let man_page = display(Path::new(&docs.man_out).join(format!("{}.1", stem)));
            plan.push(Invocation::new(
                asciidoctor,
                ["-b", docs.man_format.as_str(), source.as_str(), "-o", man_page.as_str()],
            ));
        }
        Ok(plan)
    }
}

fn display(path: impl AsRef<Path>) -> String {
    path.as_ref().display().to_string()
}

impl Action for ManPages {
    fn name(&self) -> &str {
        "man-pages"
    }

    fn run(&self, scope: &Scope<'_>, _out: &mut dyn Write) -> XResult<()> {
        for invocation in Self::plan(scope.cx)? {
            invocation.run(scope.cx.root())?;
        }
        Ok(())
    }
}
