use crate::winpath;
use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;

/// What the launcher should be told to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorerTarget {
    pub path: String,
    pub select: bool,
}

#[derive(Debug, Clone)]
pub struct TargetPolicy {
    unc_host: String,
}

impl Default for TargetPolicy {
    fn default() -> Self {
        Self::new("wsl.localhost")
    }
}

impl TargetPolicy {
    pub fn new(unc_host: impl Into<String>) -> Self {
        Self {
            unc_host: unc_host.into(),
        }
    }

    /// Rewrites a leading `\\wsl$\` to the canonical share host.
    pub fn canonical_share<'a>(&self, path: &'a str) -> Cow<'a, str> {
        let Ok(re) = legacy_share_regex() else {
            return Cow::Borrowed(path);
        };
        let replacement = format!("{}{}{}", winpath::UNC_PREFIX, self.unc_host, winpath::SEPARATOR);
        re.replace(path, regex::NoExpand(&replacement))
    }

    pub fn decide(&self, native_path: &str, is_directory: bool) -> ExplorerTarget {
        let path = self.canonical_share(native_path);
        let select = !is_directory;

        // explorer's /select is unreliable on UNC shares and may open duplicate windows
        if select && winpath::is_unc(&path) {
            return ExplorerTarget {
                path: winpath::parent(&path),
                select: false,
            };
        }

        ExplorerTarget {
            path: path.into_owned(),
            select,
        }
    }
}

pub fn decide_target(native_path: &str, is_directory: bool) -> ExplorerTarget {
    TargetPolicy::default().decide(native_path, is_directory)
}

fn legacy_share_regex() -> Result<&'static Regex> {
    static LEGACY_RE: OnceCell<Regex> = OnceCell::new();
    LEGACY_RE.get_or_try_init(|| {
        Regex::new(r"(?i)^\\\\wsl\$\\").context("failed to compile legacy share regex")
    })
}
