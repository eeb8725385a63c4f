//! The directives understood by `x` and the actions behind them.

pub mod build;
pub mod clean;
pub mod docs;
pub mod help;
pub mod man_pages;
pub mod site;

use crate::registry::Registry;
use crate::utils::XResult;

use build::Build;
use clean::Clean;
use docs::Docs;
use help::Help;
use man_pages::ManPages;
use site::Site;
use tests::Tests;

/// Builds the command table, in the order commands were declared.
pub fn registry() -> XResult<Registry> {
    let mut registry = Registry::new();

    registry.register("tests", "Builds the tests suite", Some(Box::new(Tests::plain())), vec![])?;
    registry.register(
        "tests-summary",
        "Builds the tests suite and runs it with the summary output",
        Some(Box::new(Tests::summary())),
        vec![],
    )?;
    registry.register("clean", "Cleans any zig cache files", Some(Box::new(Clean)), vec![])?;
    registry.register("docs", "Builds the documentation", Some(Box::new(Docs)), vec![])?;
    registry.register(
        "all",
        "Builds everything including the manual pages and the site, and runs the tests",
        None,
        vec![
            Box::new(Tests::summary()),
            Box::new(Docs),
            Box::new(ManPages),
            Box::new(Build),
            Box::new(Site),
        ],
    )?;
    registry.register("help", "Prints the help menu", Some(Box::new(Help)), vec![])?;
    registry.register("build", "Builds the VASM program", Some(Box::new(Build)), vec![])?;
    registry.register("vasm", "(alias to build)", Some(Box::new(Build)), vec![])?;
    registry.register(
        "site",
        "Builds the website documentation",
        Some(Box::new(Site)),
        vec![Box::new(Docs)],
    )?;
    registry.register(
        "man-pages",
        "Builds the manual pages (also places them in the docs/man directory)",
        Some(Box::new(ManPages)),
        vec![Box::new(Docs)],
    )?;

    Ok(registry)
}
