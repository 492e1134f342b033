use crate::config::Config;
use crate::environment::{self, Environment};
use crate::error::{Result, RevealError};
use crate::launcher::Launcher;
use crate::process::{ProcessRunner, TokioRunner};
use crate::remote::resolve_remote;
use crate::resource::{FsStat, ResourceCandidates, ResourceIdentifier, Stat};
use crate::target::{ExplorerTarget, TargetPolicy};
use crate::translate::PathTranslator;
use crate::{loge, logi, logok, logw};
use std::sync::Arc;

const FAILURE_PREFIX: &str = "Unable to open in Windows Explorer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealOutcome {
    Opened(ExplorerTarget),
    /// Dry run: the target that would have been opened.
    Planned(ExplorerTarget),
    NoTarget(String),
    Failed(String),
}

impl RevealOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RevealOutcome::Opened(_) | RevealOutcome::Planned(_) => 0,
            RevealOutcome::NoTarget(_) => 2,
            RevealOutcome::Failed(_) => 1,
        }
    }
}

pub struct Revealer {
    cfg: Config,
    translator: PathTranslator,
    stat: Arc<dyn Stat>,
    launcher: Launcher,
    policy: TargetPolicy,
    dry_run: bool,
}

impl Revealer {
    pub fn new(cfg: Config, env: Environment, runner: Arc<dyn ProcessRunner>, stat: Arc<dyn Stat>) -> Self {
        Self {
            translator: PathTranslator::new(env, cfg.path_converter.clone(), runner.clone()),
            launcher: Launcher::new(cfg.launcher.clone(), runner),
            policy: TargetPolicy::new(cfg.unc_host.clone()),
            stat,
            cfg,
            dry_run: false,
        }
    }

    /// Wired to the detected environment, real processes and the real filesystem.
    pub fn from_config(cfg: Config) -> Self {
        let env = environment::current().clone();
        let stat = Arc::new(FsStat::new(env.clone(), cfg.clone()));
        Self::new(cfg, env, Arc::new(TokioRunner), stat)
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn resolve_target(&self, resource: &ResourceIdentifier) -> Result<ExplorerTarget> {
        // unknown existence without a trailing separator is treated as a file
        let is_directory = match self.stat.stat(resource).await {
            Some(info) => info.is_directory,
            None => resource.has_trailing_separator(),
        };

        let native = match resource {
            ResourceIdentifier::Local { path } => self.translator.to_native_path(path).await?,
            ResourceIdentifier::Remote {
                scheme,
                authority,
                path,
            } => resolve_remote(&self.cfg, scheme, authority, path)?,
        };

        Ok(self.policy.decide(&native, is_directory))
    }

    pub async fn reveal(&self, candidates: ResourceCandidates) -> RevealOutcome {
        let selection = candidates.resolve();
        let Some(resource) = selection.resource() else {
            let message = RevealError::NoTargetSelected.to_string();
            logw(&message);
            return RevealOutcome::NoTarget(message);
        };
        logi(format!("Target ({}): {}", selection.source(), resource));

        match self.run(resource).await {
            Ok(outcome) => outcome,
            Err(err) => {
                let message = format!("{FAILURE_PREFIX}: {err}");
                loge(&message);
                RevealOutcome::Failed(message)
            }
        }
    }

    async fn run(&self, resource: &ResourceIdentifier) -> Result<RevealOutcome> {
        let target = self.resolve_target(resource).await?;
        if self.dry_run {
            logi(format!("Would open {} (select: {})", target.path, target.select));
            return Ok(RevealOutcome::Planned(target));
        }

        self.launcher.open(&target).await?;
        logok(format!("Opened {} (select: {})", target.path, target.select));
        Ok(RevealOutcome::Opened(target))
    }
}
