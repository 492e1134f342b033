use anyhow::{Context, Result};
use explorer_reveal::{winpath, Config, ResourceCandidates, ResourceIdentifier, RevealOutcome, Revealer};
use std::path::{Path, PathBuf};
use tracing::Level;

const USAGE: &str = "\
Usage: explorer-reveal [OPTIONS] [TARGET]

Opens TARGET in Windows Explorer, selecting it when it is a file.
TARGET is a path, a file:// URI or a vscode-remote://wsl+<distro>/<path> URI.

Options:
  --active <REF>     reference of the active document, used when TARGET is absent
  --workspace <REF>  workspace root, used when TARGET and --active are absent (repeatable)
  --config <FILE>    JSON config file (default: $EXPLORER_REVEAL_CONFIG)
  --dry-run          print the decided target as JSON instead of launching
  --verbose          debug logging
  -h, --help         show this help";

#[derive(Debug, Default, PartialEq)]
struct Args {
    target: Option<String>,
    active: Option<String>,
    workspaces: Vec<String>,
    config: Option<PathBuf>,
    dry_run: bool,
    verbose: bool,
}

/// `Ok(None)` means help was requested.
fn parse_args(argv: impl IntoIterator<Item = String>) -> Result<Option<Args>> {
    let mut args = Args::default();
    let mut iter = argv.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--dry-run" => args.dry_run = true,
            "--verbose" => args.verbose = true,
            "--active" => args.active = Some(iter.next().context("--active needs a value")?),
            "--workspace" => args
                .workspaces
                .push(iter.next().context("--workspace needs a value")?),
            "--config" => {
                args.config = Some(PathBuf::from(iter.next().context("--config needs a value")?))
            }
            flag if flag.starts_with("--") => anyhow::bail!("unknown option: {flag}"),
            _ if args.target.is_some() => anyhow::bail!("more than one target given: {arg}"),
            _ => args.target = Some(arg),
        }
    }

    Ok(Some(args))
}

fn to_identifier(text: &str) -> Result<ResourceIdentifier> {
    identifier_for_host(text, cfg!(windows))
}

/// Relative local paths are made absolute against the working directory. Off Windows,
/// drive and UNC text is Windows syntax already and stays as given.
fn identifier_for_host(text: &str, windows_host: bool) -> Result<ResourceIdentifier> {
    let resource = ResourceIdentifier::parse(text)?;
    match resource {
        ResourceIdentifier::Local { path }
            if Path::new(&path).is_relative()
                && (windows_host || !winpath::is_windows_rooted(&path)) =>
        {
            let absolute = std::path::absolute(&path)
                .with_context(|| format!("Failed to resolve path: {path}"))?;
            Ok(ResourceIdentifier::local(absolute.to_string_lossy()))
        }
        other => Ok(other),
    }
}

fn build_candidates(args: &Args) -> Result<ResourceCandidates> {
    Ok(ResourceCandidates {
        explicit: args.target.as_deref().map(to_identifier).transpose()?,
        active_document: args.active.as_deref().map(to_identifier).transpose()?,
        workspace_roots: args
            .workspaces
            .iter()
            .map(|w| to_identifier(w))
            .collect::<Result<Vec<_>>>()?,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let Some(args) = parse_args(std::env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let cfg = Config::load_or_default(args.config.as_deref()).await?;
    let candidates = build_candidates(&args)?;

    let outcome = Revealer::from_config(cfg)
        .with_dry_run(args.dry_run)
        .reveal(candidates)
        .await;

    if let RevealOutcome::Planned(target) = &outcome {
        println!("{}", serde_json::to_string(target)?);
    }

    std::process::exit(outcome.exit_code());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_all_options() {
        let args = parse_args(argv(&[
            "--dry-run",
            "--active",
            "/a",
            "--workspace",
            "/w1",
            "--workspace",
            "/w2",
            "--config",
            "cfg.json",
            "/target",
        ]))
        .unwrap()
        .unwrap();

        assert_eq!(
            args,
            Args {
                target: Some("/target".to_string()),
                active: Some("/a".to_string()),
                workspaces: vec!["/w1".to_string(), "/w2".to_string()],
                config: Some(PathBuf::from("cfg.json")),
                dry_run: true,
                verbose: false,
            }
        );
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(parse_args(argv(&["/x", "--help"])).unwrap(), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(argv(&["--active"])).is_err());
        assert!(parse_args(argv(&["--bogus"])).is_err());
        assert!(parse_args(argv(&["/a", "/b"])).is_err());
    }

    #[test]
    fn relative_paths_become_absolute() {
        let id = to_identifier("some/file.txt").unwrap();
        let ResourceIdentifier::Local { path } = id else {
            panic!("expected a local identifier");
        };
        assert!(Path::new(&path).is_absolute());
        assert!(path.ends_with("file.txt"));
    }

    #[test]
    fn backslash_relative_paths_become_absolute() {
        for windows_host in [true, false] {
            let id = identifier_for_host(r"src\main.rs", windows_host).unwrap();
            let ResourceIdentifier::Local { path } = id else {
                panic!("expected a local identifier");
            };
            assert!(Path::new(&path).is_absolute(), "{path}");
            assert!(path.ends_with(r"src\main.rs"), "{path}");
        }
    }

    #[test]
    fn windows_rooted_text_is_kept_off_windows() {
        assert_eq!(
            identifier_for_host("//server/share/x", false).unwrap(),
            ResourceIdentifier::local("//server/share/x")
        );
        assert_eq!(
            identifier_for_host(r"D:relative\x", false).unwrap(),
            ResourceIdentifier::local(r"D:relative\x")
        );
    }

    #[test]
    fn uris_and_windows_paths_are_untouched() {
        assert_eq!(
            to_identifier(r"C:\Users\u").unwrap(),
            ResourceIdentifier::local(r"C:\Users\u")
        );
        assert_eq!(
            to_identifier("vscode-remote://wsl+Ubuntu/home").unwrap(),
            ResourceIdentifier::remote("vscode-remote", "wsl+Ubuntu", "/home")
        );
    }
}
