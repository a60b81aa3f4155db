use std::path::PathBuf;

pub const WORKSPACE_ENV: &str = "TUTORD_WORKSPACE";
pub const LOG_ENV: &str = "TUTORD_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Workspace opened before the first request; the UI can still switch
    /// with `workspace.select`.
    pub workspace: Option<PathBuf>,
    pub log_filter: String,
}

impl Config {
    pub fn from_env_and_args() -> Self {
        Self::from_parts(
            std::env::args().skip(1),
            std::env::var(WORKSPACE_ENV).ok(),
            std::env::var(LOG_ENV).ok(),
        )
    }

    fn from_parts(
        args: impl IntoIterator<Item = String>,
        workspace_env: Option<String>,
        log_env: Option<String>,
    ) -> Self {
        let mut workspace = workspace_env
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if let Some(v) = arg.strip_prefix("--workspace=") {
                workspace = Some(PathBuf::from(v));
            } else if arg == "--workspace" {
                if let Some(v) = args.next() {
                    workspace = Some(PathBuf::from(v));
                }
            }
        }
        let log_filter = log_env
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Self {
            workspace,
            log_filter,
        }
    }
}
