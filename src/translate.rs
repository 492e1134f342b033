use crate::environment::Environment;
use crate::error::{Result, RevealError};
use crate::process::ProcessRunner;
use crate::winpath;
use std::sync::Arc;
use tracing::debug;

/// Turns paths of the current execution environment into Windows paths.
pub struct PathTranslator {
    env: Environment,
    converter: String,
    runner: Arc<dyn ProcessRunner>,
}

impl PathTranslator {
    pub fn new(env: Environment, converter: impl Into<String>, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            env,
            converter: converter.into(),
            runner,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub async fn to_native_path(&self, path: &str) -> Result<String> {
        if path.is_empty() {
            return Err(RevealError::InvalidPath);
        }

        if winpath::is_unc(path) {
            return Ok(path.to_string());
        }

        if self.env.is_windows() {
            return Ok(winpath::normalize(path));
        }

        if !self.env.is_wsl() {
            return Err(RevealError::UnsupportedPlatform(self.env.os.clone()));
        }

        let args = vec!["-w".to_string(), path.to_string()];
        let output = self
            .runner
            .run(&self.converter, &args)
            .await
            .map_err(|err| RevealError::ExternalProcess {
                program: self.converter.clone(),
                detail: err.to_string(),
            })?;

        if !output.success {
            let detail = match output.stderr.trim() {
                "" => format!("exited with status {:?}", output.code),
                stderr => stderr.to_string(),
            };
            return Err(RevealError::ExternalProcess {
                program: self.converter.clone(),
                detail,
            });
        }

        let converted = output.stdout.lines().next().unwrap_or_default().trim();
        if converted.is_empty() {
            return Err(RevealError::ConversionFailed(path.to_string()));
        }

        debug!(from = path, to = converted, "converted path");
        Ok(converted.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessOutput;
    use async_trait::async_trait;
    use std::io;
    use std::sync::Mutex;

    struct FakeRunner {
        reply: Box<dyn Fn() -> io::Result<ProcessOutput> + Send + Sync>,
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl FakeRunner {
        fn new(reply: impl Fn() -> io::Result<ProcessOutput> + Send + Sync + 'static) -> Arc<Self> {
            Arc::new(Self {
                reply: Box::new(reply),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ProcessRunner for FakeRunner {
        async fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_string(), args.to_vec()));
            (self.reply)()
        }
    }

    fn translator(env: Environment, runner: Arc<FakeRunner>) -> PathTranslator {
        PathTranslator::new(env, "wslpath", runner)
    }

    #[tokio::test]
    async fn wsl_delegates_to_converter() {
        let runner = FakeRunner::new(|| Ok(ProcessOutput::ok("C:\\Users\\u\\project\\file.txt\n")));
        let t = translator(Environment::wsl("Ubuntu"), runner.clone());

        let out = t.to_native_path("/mnt/c/Users/u/project/file.txt").await.unwrap();
        assert_eq!(out, r"C:\Users\u\project\file.txt");

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "wslpath");
        assert_eq!(calls[0].1, vec!["-w", "/mnt/c/Users/u/project/file.txt"]);
    }

    #[tokio::test]
    async fn blank_converter_output_is_conversion_failure() {
        let runner = FakeRunner::new(|| Ok(ProcessOutput::ok("  \n")));
        let t = translator(Environment::wsl("Ubuntu"), runner);

        let err = t.to_native_path("/home/u/x").await.unwrap_err();
        assert_eq!(err, RevealError::ConversionFailed("/home/u/x".to_string()));
    }

    #[tokio::test]
    async fn missing_converter_is_external_process_error() {
        let runner = FakeRunner::new(|| Err(io::Error::new(io::ErrorKind::NotFound, "no such file")));
        let t = translator(Environment::wsl("Ubuntu"), runner);

        match t.to_native_path("/home/u/x").await.unwrap_err() {
            RevealError::ExternalProcess { program, detail } => {
                assert_eq!(program, "wslpath");
                assert!(detail.contains("no such file"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn converter_nonzero_exit_reports_stderr() {
        let runner = FakeRunner::new(|| Ok(ProcessOutput::failed(1, "wslpath: /nope: No such file\n")));
        let t = translator(Environment::wsl("Ubuntu"), runner);

        let err = t.to_native_path("/nope").await.unwrap_err();
        assert_eq!(
            err,
            RevealError::ExternalProcess {
                program: "wslpath".to_string(),
                detail: "wslpath: /nope: No such file".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn unc_paths_pass_through_without_spawning() {
        let runner = FakeRunner::new(|| panic!("converter must not run"));
        let t = translator(Environment::wsl("Ubuntu"), runner);

        let unc = r"\\wsl.localhost\Ubuntu\home";
        assert_eq!(t.to_native_path(unc).await.unwrap(), unc);
    }

    #[tokio::test]
    async fn windows_normalizes_without_spawning() {
        let runner = FakeRunner::new(|| panic!("converter must not run"));
        let t = translator(Environment::windows(), runner);

        assert_eq!(
            t.to_native_path(r"C:\Users\\u\.\file.txt").await.unwrap(),
            r"C:\Users\u\file.txt"
        );
        let once = t.to_native_path(r"C:\Users\u\file.txt").await.unwrap();
        assert_eq!(t.to_native_path(&once).await.unwrap(), once);
    }

    #[tokio::test]
    async fn windows_keeps_forward_slash_unc_roots() {
        let runner = FakeRunner::new(|| panic!("converter must not run"));
        let t = translator(Environment::windows(), runner);

        assert_eq!(
            t.to_native_path("//server/share/dir/x.txt").await.unwrap(),
            r"\\server\share\dir\x.txt"
        );
    }

    #[tokio::test]
    async fn other_platforms_are_rejected() {
        let runner = FakeRunner::new(|| panic!("converter must not run"));
        let t = translator(Environment::from_signals("macos", None, ""), runner);

        let err = t.to_native_path("/Users/u").await.unwrap_err();
        assert_eq!(err, RevealError::UnsupportedPlatform("macos".to_string()));
        assert_eq!(err.to_string(), "Current platform (macos) is not supported.");
    }

    #[tokio::test]
    async fn empty_path_is_invalid() {
        let runner = FakeRunner::new(|| panic!("converter must not run"));
        let t = translator(Environment::windows(), runner);
        assert_eq!(t.to_native_path("").await.unwrap_err(), RevealError::InvalidPath);
    }
}
