//! Command registry and directive dispatch.
//!
//! A [`Registry`] is a flat, insertion-ordered table of named commands. Each
//! command has an optional action of its own and a list of prerequisite
//! actions that run, in order, before it. Prerequisites are plain actions,
//! not commands, so there is no graph to resolve and nothing is memoized:
//! dispatching a name twice runs everything twice.

use crate::config::Context;
use crate::utils::{XError, XResult};
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::io::Write;

/// A unit of work that can be run by name.
pub trait Action {
    /// Display name used when the action is logged or listed as a prerequisite.
    fn name(&self) -> &str;
    fn run(&self, scope: &Scope<'_>, out: &mut dyn Write) -> XResult<()>;
}

/// What an action can see while it runs.
pub struct Scope<'a> {
    pub cx: &'a Context,
    pub registry: &'a Registry,
}

pub struct Command {
    name: String,
    description: String,
    action: Option<Box<dyn Action>>,
    prerequisites: Vec<Box<dyn Action>>,
}

impl Command {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Headless commands only exist to trigger their prerequisites.
    pub fn is_headless(&self) -> bool {
        self.action.is_none()
    }

    pub fn prerequisite_names(&self) -> Vec<&str> {
        self.prerequisites.iter().map(|p| p.name()).collect()
    }

    fn run(&self, scope: &Scope<'_>, out: &mut dyn Write) -> XResult<()> {
        for prerequisite in &self.prerequisites {
            info!("==> {}", prerequisite.name());
            prerequisite.run(scope, out)?;
        }
        if let Some(action) = &self.action {
            debug!("==> {} ({})", self.name, action.name());
            action.run(scope, out)?;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct Registry {
    commands: IndexMap<String, Command>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: &str,
        description: &str,
        action: Option<Box<dyn Action>>,
        prerequisites: Vec<Box<dyn Action>>,
    ) -> XResult<()> {
        match self.commands.entry(name.to_string()) {
            Entry::Occupied(_) => Err(XError::DuplicateCommand(name.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(Command {
                    name: name.to_string(),
                    description: description.to_string(),
                    action,
                    prerequisites,
                });
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Commands in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Runs each directive in turn.
    ///
    /// Unknown directives are reported on `out` and skipped. An error from an
    /// action stops the whole invocation and is returned as is.
    pub fn dispatch<S: AsRef<str>>(
        &self,
        directives: &[S],
        cx: &Context,
        out: &mut dyn Write,
    ) -> XResult<()> {
        let scope = Scope { cx, registry: self };
        for directive in directives {
            let directive = directive.as_ref();
            match self.get(directive) {
                Some(command) => command.run(&scope, out)?,
                None => writeln!(out, "unknown build directive: {}", directive)?,
            }
        }
        Ok(())
    }

    /// The help listing: commands with fewer prerequisites first, ties kept in
    /// registration order, with a `depends on` line under every command that
    /// has prerequisites.
    pub fn help(&self) -> String {
        let width = self.commands.keys().map(String::len).max().unwrap_or(0) + 2;

        let mut listed: Vec<&Command> = self.commands().collect();
        listed.sort_by_key(|command| command.prerequisites.len());

        let mut text = String::from("\nusage: x [DIRECTIVE...]\n\na directive can be any of the following:\n\n");
        for command in listed {
            text.push_str(&format!("\t{:<width$}{}\n", command.name, command.description));
            if !command.prerequisites.is_empty() {
                text.push_str(&format!(
                    "\t{:<width$}depends on: {}\n",
                    "",
                    command.prerequisite_names().join(", ")
                ));
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::XConfig;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    type Journal = Rc<RefCell<Vec<String>>>;

    struct Record {
        name: &'static str,
        journal: Journal,
    }

    impl Action for Record {
        fn name(&self) -> &str {
            self.name
        }

        fn run(&self, _scope: &Scope<'_>, _out: &mut dyn Write) -> XResult<()> {
            self.journal.borrow_mut().push(self.name.to_string());
            Ok(())
        }
    }

    struct Fail;

    impl Action for Fail {
        fn name(&self) -> &str {
            "fail"
        }

        fn run(&self, _scope: &Scope<'_>, _out: &mut dyn Write) -> XResult<()> {
            Err(XError::ToolMissing { tool: "Asciidoctor" })
        }
    }

    fn record(name: &'static str, journal: &Journal) -> Box<dyn Action> {
        Box::new(Record {
            name,
            journal: journal.clone(),
        })
    }

    fn context() -> Context {
        Context::new(PathBuf::from("."), PathBuf::from("zig"), None, XConfig::default())
    }

    fn dispatch(registry: &Registry, directives: &[&str]) -> (XResult<()>, String) {
        let mut out = Vec::<u8>::new();
        let result = registry.dispatch(directives, &context(), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn prerequisites_run_in_order_before_the_action() {
        let journal = Journal::default();
        let mut registry = Registry::new();
        registry
            .register(
                "c",
                "",
                Some(record("a", &journal)),
                vec![record("p1", &journal), record("p2", &journal)],
            )
            .unwrap();

        let (result, out) = dispatch(&registry, &["c"]);
        assert!(result.is_ok());
        assert!(out.is_empty());
        assert_eq!(*journal.borrow(), vec!["p1", "p2", "a"]);
    }

    #[test]
    fn repeated_directives_are_not_memoized() {
        let journal = Journal::default();
        let mut registry = Registry::new();
        registry
            .register("c", "", Some(record("a", &journal)), vec![record("p", &journal)])
            .unwrap();

        dispatch(&registry, &["c", "c"]).0.unwrap();
        assert_eq!(*journal.borrow(), vec!["p", "a", "p", "a"]);
    }

    #[test]
    fn unknown_directives_are_reported_and_skipped() {
        let journal = Journal::default();
        let mut registry = Registry::new();
        registry.register("a", "", Some(record("A", &journal)), vec![]).unwrap();
        registry
            .register("b", "", Some(record("B", &journal)), vec![record("A", &journal)])
            .unwrap();

        let (result, out) = dispatch(&registry, &["b", "z"]);
        assert!(result.is_ok());
        assert_eq!(*journal.borrow(), vec!["A", "B"]);
        assert_eq!(out, "unknown build directive: z\n");
    }

    #[test]
    fn each_unknown_directive_gets_one_line() {
        let journal = Journal::default();
        let mut registry = Registry::new();
        registry.register("a", "", Some(record("A", &journal)), vec![]).unwrap();

        let (_, out) = dispatch(&registry, &["x", "a", "y", "x"]);
        assert_eq!(out.lines().count(), 3);
        assert_eq!(*journal.borrow(), vec!["A"]);
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let journal = Journal::default();
        let mut registry = Registry::new();
        registry.register("build", "", Some(record("build", &journal)), vec![]).unwrap();

        let (_, out) = dispatch(&registry, &["Build", "bui", "build "]);
        assert_eq!(out.lines().count(), 3);
        assert!(journal.borrow().is_empty());
    }

    #[test]
    fn headless_command_without_prerequisites_is_a_no_op() {
        let mut registry = Registry::new();
        registry.register("nothing", "", None, vec![]).unwrap();

        assert!(registry.get("nothing").unwrap().is_headless());
        let (result, out) = dispatch(&registry, &["nothing"]);
        assert!(result.is_ok());
        assert!(out.is_empty());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = Registry::new();
        registry.register("a", "first", None, vec![]).unwrap();
        let err = registry.register("a", "second", None, vec![]).unwrap_err();

        assert!(matches!(err, XError::DuplicateCommand(name) if name == "a"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").unwrap().description(), "first");
    }

    #[test]
    fn action_errors_stop_the_invocation() {
        let journal = Journal::default();
        let mut registry = Registry::new();
        registry.register("bad", "", Some(Box::new(Fail)), vec![]).unwrap();
        registry.register("a", "", Some(record("A", &journal)), vec![]).unwrap();

        let (result, _) = dispatch(&registry, &["bad", "a"]);
        assert!(matches!(result, Err(XError::ToolMissing { .. })));
        assert!(journal.borrow().is_empty());
    }

    #[test]
    fn help_sorts_by_prerequisite_count_and_keeps_ties_stable() {
        let journal = Journal::default();
        let mut registry = Registry::new();
        registry
            .register("all", "everything", None, vec![record("x", &journal), record("y", &journal)])
            .unwrap();
        registry
            .register("site", "web", Some(record("site", &journal)), vec![record("docs", &journal)])
            .unwrap();
        registry.register("tests", "run tests", Some(record("t", &journal)), vec![]).unwrap();
        registry.register("build", "compile", Some(record("b", &journal)), vec![]).unwrap();

        let expected = "\nusage: x [DIRECTIVE...]\n\na directive can be any of the following:\n\n\
                        \ttests  run tests\n\
                        \tbuild  compile\n\
                        \tsite   web\n\
                        \t       depends on: docs\n\
                        \tall    everything\n\
                        \t       depends on: x, y\n";
        assert_eq!(registry.help(), expected);
    }
}
