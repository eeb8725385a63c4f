//! Layered configuration and the resolved run context.
//!
//! Settings come from built-in defaults, an optional `x.toml` in the project
//! root and `VASM_X_*` environment variables, in that order of precedence.

use crate::utils::{XError, XResult};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "x.toml";
pub const ENV_PREFIX: &str = "VASM_X_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XConfig {
    pub tools: ToolsConfig,
    pub docs: DocsConfig,
}

/// Explicit tool locations. Unset entries are searched on `PATH`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub zig: Option<PathBuf>,
    pub asciidoctor: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Backend used for web pages
    pub web_format: String,
    /// Backend used for manual pages
    pub man_format: String,
    pub site_dir: String,
    pub man_src: String,
    pub man_out: String,
    pub web_man_out: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        DocsConfig {
            web_format: "html".to_string(),
            man_format: "manpage".to_string(),
            site_dir: "docs".to_string(),
            man_src: "man-src".to_string(),
            man_out: "man/man1".to_string(),
            web_man_out: "docs/man".to_string(),
        }
    }
}

impl XConfig {
    pub fn figment(root: &Path) -> Figment {
        Figment::from(Serialized::defaults(XConfig::default()))
            .merge(Toml::file(root.join(CONFIG_FILE)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load(root: &Path) -> XResult<Self> {
        Ok(Self::figment(root).extract()?)
    }
}

/// Everything an action needs to know about the environment it runs in.
///
/// Built once at startup and handed to every action by reference.
#[derive(Debug, Clone)]
pub struct Context {
    root: PathBuf,
    zig: PathBuf,
    asciidoctor: Option<PathBuf>,
    config: XConfig,
}

impl Context {
    pub fn new(root: PathBuf, zig: PathBuf, asciidoctor: Option<PathBuf>, config: XConfig) -> Self {
        Context {
            root,
            zig,
            asciidoctor,
            config,
        }
    }

    /// Locates the external tools. A missing Zig is fatal; a missing
    /// Asciidoctor only matters to the commands that need it.
    pub fn resolve(root: PathBuf, config: XConfig) -> XResult<Self> {
        let zig = locate("zig", config.tools.zig.as_deref())
            .ok_or(XError::ToolMissing { tool: "Zig" })?;
        let asciidoctor = locate("asciidoctor", config.tools.asciidoctor.as_deref());

        debug!("zig: {}", zig.display());
        match &asciidoctor {
            Some(path) => debug!("asciidoctor: {}", path.display()),
            None => debug!("asciidoctor: not found"),
        }

        Ok(Context::new(root, zig, asciidoctor, config))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn zig(&self) -> &Path {
        &self.zig
    }

    pub fn asciidoctor(&self) -> XResult<&Path> {
        self.asciidoctor
            .as_deref()
            .ok_or(XError::ToolMissing { tool: "Asciidoctor" })
    }

    pub fn docs(&self) -> &DocsConfig {
        &self.config.docs
    }

    /// Resolves a project-relative path.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

fn locate(binary: &str, configured: Option<&Path>) -> Option<PathBuf> {
    match configured {
        Some(path) => which::which(path).ok(),
        None => which::which(binary).ok(),
    }
}
