use thiserror::Error;

pub type Result<T> = std::result::Result<T, RevealError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RevealError {
    #[error("No file or folder selected to open in Windows Explorer.")]
    NoTargetSelected,
    #[error("Invalid path.")]
    InvalidPath,
    #[error("Current platform ({0}) is not supported.")]
    UnsupportedPlatform(String),
    #[error("Unsupported URI scheme: {0}")]
    UnsupportedScheme(String),
    #[error("Unsupported remote authority: {0}")]
    UnsupportedAuthority(String),
    #[error("Could not detect WSL distro from URI.")]
    MissingDistro,
    #[error("Malformed percent-encoding in: {0}")]
    MalformedEncoding(String),
    #[error("Could not convert path: {0}")]
    ConversionFailed(String),
    #[error("{0} was not found. Use this command from Windows or WSL.")]
    LauncherNotFound(String),
    #[error("{0} is not executable in this environment.")]
    LauncherNotExecutable(String),
    #[error("{program} failed: {detail}")]
    ExternalProcess { program: String, detail: String },
}

impl RevealError {
    /// Warnings are reported to the user but are not failures.
    pub fn is_warning(&self) -> bool {
        matches!(self, RevealError::NoTargetSelected)
    }
}
