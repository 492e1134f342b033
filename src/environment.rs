use once_cell::sync::Lazy;

const DISTRO_ENV_VAR: &str = "WSL_DISTRO_NAME";
const KERNEL_RELEASE_PATH: &str = "/proc/sys/kernel/osrelease";
const KERNEL_VENDOR_MARKER: &str = "microsoft";

static CURRENT: Lazy<Environment> = Lazy::new(Environment::detect);

/// Snapshot of where this process runs. Computed once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub os: String,
    pub wsl: bool,
    pub distro: Option<String>,
}

impl Environment {
    pub fn detect() -> Self {
        let distro = std::env::var(DISTRO_ENV_VAR).ok();
        let kernel_release = std::fs::read_to_string(KERNEL_RELEASE_PATH).unwrap_or_default();
        Self::from_signals(std::env::consts::OS, distro.as_deref(), &kernel_release)
    }

    pub fn from_signals(os: &str, distro_env: Option<&str>, kernel_release: &str) -> Self {
        let distro = distro_env
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let kernel_mentions_vendor = kernel_release
            .to_ascii_lowercase()
            .contains(KERNEL_VENDOR_MARKER);

        Self {
            os: os.to_string(),
            wsl: distro.is_some() || kernel_mentions_vendor,
            distro,
        }
    }

    pub fn windows() -> Self {
        Self::from_signals("windows", None, "")
    }

    pub fn wsl(distro: &str) -> Self {
        Self::from_signals("linux", Some(distro), "")
    }

    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }

    pub fn is_wsl(&self) -> bool {
        self.wsl
    }
}

/// The process-wide environment, detected on first use.
pub fn current() -> &'static Environment {
    &CURRENT
}

pub fn is_wsl() -> bool {
    current().is_wsl()
}
