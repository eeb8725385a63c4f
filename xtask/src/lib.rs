//! Build orchestration for VASM: the `x` directive runner and the source
//! scanners behind `extract-docs` and `extract-todos`.

#[macro_use]
extern crate log;

pub mod config;
pub mod plugins;
pub mod registry;
pub mod scan;
pub mod utils;
