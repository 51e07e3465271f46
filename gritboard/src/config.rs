use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Args;
use gritboard_app::DashboardConfig;

pub const DEFAULT_SESSION_FILE: &str = ".gritboard/session";
pub const DEFAULT_OUTPUT: &str = "dashboard.html";

/// Endpoints and file locations. Every option can also be set from the environment.
#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// JSON file with dashboard settings, such as the XP path rules and chart titles
    #[arg(long, env = "GRITBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Sign in endpoint, takes precedence over the config file
    #[arg(long, env = "GRITBOARD_SIGNIN_URL")]
    pub signin_url: Option<String>,

    /// GraphQL endpoint, takes precedence over the config file
    #[arg(long, env = "GRITBOARD_GRAPHQL_URL")]
    pub graphql_url: Option<String>,

    /// Where the session token is kept between runs
    #[arg(long, env = "GRITBOARD_SESSION_FILE", default_value = DEFAULT_SESSION_FILE)]
    pub session_file: PathBuf,

    /// Where to write the rendered dashboard page
    #[arg(short, long, env = "GRITBOARD_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

impl Settings {
    /// Reads the config file if one was given, then applies the endpoint overrides.
    pub fn dashboard(&self) -> Result<DashboardConfig> {
        let mut dashboard = match &self.config {
            Some(path) => read_config(path)?,
            None => DashboardConfig::default(),
        };
        if let Some(url) = &self.signin_url {
            dashboard.signin_url = url.clone();
        }
        if let Some(url) = &self.graphql_url {
            dashboard.graphql_url = url.clone();
        }
        Ok(dashboard)
    }
}

fn read_config(path: &Path) -> Result<DashboardConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[derive(Parser, Debug)]
    struct Cli {
        #[command(flatten)]
        settings: Settings,
    }

    fn parse(args: &[&str]) -> Settings {
        let argv = std::iter::once("gritboard").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().settings
    }

    #[test]
    fn flags_override_defaults() {
        let settings = parse(&[
            "--graphql-url",
            "http://localhost:8080/v1/graphql",
            "-o",
            "/tmp/out.html",
        ]);
        let dashboard = settings.dashboard().unwrap();
        assert_eq!(dashboard.graphql_url, "http://localhost:8080/v1/graphql");
        assert_eq!(dashboard.signin_url, DashboardConfig::default().signin_url);
        assert_eq!(settings.output, PathBuf::from("/tmp/out.html"));
    }

    #[test]
    fn config_file_sets_path_rules() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"curriculum_root": "/campus/curriculum", "signin_url": "http://file/signin"}}"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap();
        let settings = parse(&["--config", path, "--signin-url", "http://flag/signin"]);

        let dashboard = settings.dashboard().unwrap();
        assert_eq!(dashboard.curriculum_root, "/campus/curriculum");
        assert_eq!(dashboard.signin_url, "http://flag/signin");
        assert_eq!(dashboard.skill_prefix, "skill_");
        assert!(dashboard.path_filter().includes("/campus/curriculum/proj"));
    }

    #[test]
    fn unreadable_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let settings = parse(&["--config", missing.to_str().unwrap()]);
        let err = settings.dashboard().unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let settings = parse(&["--config", file.path().to_str().unwrap()]);
        let err = settings.dashboard().unwrap_err();
        assert!(err.to_string().starts_with("Invalid config file"));
    }
}
