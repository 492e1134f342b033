use crate::config::Config;
use crate::environment::Environment;
use crate::error::Result;
use crate::remote::{percent_decode, resolve_remote, wsl_distro};
use async_trait::async_trait;
use std::fmt;
use tokio::fs;
use tracing::debug;

const FILE_SCHEME: &str = "file";
const SCHEME_SEPARATOR: &str = "://";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceIdentifier {
    /// A path in the syntax of the environment the process runs in.
    Local { path: String },
    /// `path` keeps forward slashes and any percent-encoding.
    Remote {
        scheme: String,
        authority: String,
        path: String,
    },
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceIdentifier::Local { path } => write!(f, "{path}"),
            ResourceIdentifier::Remote {
                scheme,
                authority,
                path,
            } => write!(f, "{scheme}://{authority}{path}"),
        }
    }
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    // single letters are drive letters, not schemes
    candidate.len() > 1
        && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn split_authority(rest: &str) -> (&str, &str) {
    match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, ""),
    }
}

impl ResourceIdentifier {
    pub fn local(path: impl Into<String>) -> Self {
        ResourceIdentifier::Local { path: path.into() }
    }

    pub fn remote(scheme: impl Into<String>, authority: impl Into<String>, path: impl Into<String>) -> Self {
        ResourceIdentifier::Remote {
            scheme: scheme.into(),
            authority: authority.into(),
            path: path.into(),
        }
    }

    /// Accepts plain paths, `file://` URIs and `<scheme>://<authority>/<path>` URIs.
    pub fn parse(text: &str) -> Result<Self> {
        let Some((scheme, rest)) = text
            .split_once(SCHEME_SEPARATOR)
            .filter(|(scheme, _)| is_scheme(scheme))
        else {
            return Ok(Self::local(text));
        };

        // query and fragment are not part of the resource; a literal '#' or '?' arrives as %23 / %3F
        let rest = rest.split(['?', '#']).next().unwrap_or_default();
        let (authority, path) = split_authority(rest);
        if !scheme.eq_ignore_ascii_case(FILE_SCHEME) {
            return Ok(Self::remote(scheme, authority, path));
        }

        let decoded = percent_decode(path)?;
        let bytes = decoded.as_bytes();
        let local = if bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b':' {
            decoded[1..].to_string()
        } else if !authority.is_empty() && authority != "localhost" {
            format!("//{authority}{decoded}")
        } else {
            decoded
        };
        Ok(Self::local(local))
    }

    pub fn has_trailing_separator(&self) -> bool {
        match self {
            ResourceIdentifier::Local { path } => path.ends_with(['/', '\\']),
            ResourceIdentifier::Remote { path, .. } => path.ends_with('/'),
        }
    }
}

/// Which source the lookup settled on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Explicit(ResourceIdentifier),
    ActiveDocument(ResourceIdentifier),
    WorkspaceRoot(ResourceIdentifier),
    Nothing,
}

impl Selection {
    pub fn resource(&self) -> Option<&ResourceIdentifier> {
        match self {
            Selection::Explicit(r) | Selection::ActiveDocument(r) | Selection::WorkspaceRoot(r) => Some(r),
            Selection::Nothing => None,
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            Selection::Explicit(_) => "explicit",
            Selection::ActiveDocument(_) => "active document",
            Selection::WorkspaceRoot(_) => "workspace root",
            Selection::Nothing => "none",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceCandidates {
    pub explicit: Option<ResourceIdentifier>,
    pub active_document: Option<ResourceIdentifier>,
    pub workspace_roots: Vec<ResourceIdentifier>,
}

impl ResourceCandidates {
    pub fn explicit(resource: ResourceIdentifier) -> Self {
        Self {
            explicit: Some(resource),
            ..Self::default()
        }
    }

    pub fn resolve(self) -> Selection {
        if let Some(r) = self.explicit {
            return Selection::Explicit(r);
        }
        if let Some(r) = self.active_document {
            return Selection::ActiveDocument(r);
        }
        match self.workspace_roots.into_iter().next() {
            Some(r) => Selection::WorkspaceRoot(r),
            None => Selection::Nothing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExistenceInfo {
    pub is_directory: bool,
}

/// Metadata lookup. `None` means unknown, never an error.
#[async_trait]
pub trait Stat: Send + Sync {
    async fn stat(&self, resource: &ResourceIdentifier) -> Option<ExistenceInfo>;
}

pub struct FsStat {
    env: Environment,
    cfg: Config,
}

impl FsStat {
    pub fn new(env: Environment, cfg: Config) -> Self {
        Self { env, cfg }
    }

    /// Where a remote WSL resource can be reached from this process, if anywhere.
    fn reachable_path(&self, scheme: &str, authority: &str, path: &str) -> Option<String> {
        if scheme != self.cfg.remote_scheme {
            return None;
        }
        let distro = wsl_distro(&self.cfg, authority).ok()?;
        if self.env.distro.as_deref() == Some(distro.as_str()) {
            return percent_decode(path).ok();
        }
        if self.env.is_windows() {
            return resolve_remote(&self.cfg, scheme, authority, path).ok();
        }
        None
    }
}

#[async_trait]
impl Stat for FsStat {
    async fn stat(&self, resource: &ResourceIdentifier) -> Option<ExistenceInfo> {
        let path = match resource {
            ResourceIdentifier::Local { path } => path.clone(),
            ResourceIdentifier::Remote {
                scheme,
                authority,
                path,
            } => self.reachable_path(scheme, authority, path)?,
        };

        match fs::metadata(&path).await {
            Ok(meta) => Some(ExistenceInfo {
                is_directory: meta.is_dir(),
            }),
            Err(err) => {
                debug!(path = %path, error = %err, "stat failed");
                None
            }
        }
    }
}
