use std::{
    collections::HashMap,
    fmt,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde_yaml::Value;
use url::Url;

use crate::error::{NotifyError, Result};

pub const DEFAULT_RELEASE_NOTES_PATH: &str = "Release-Notes.txt";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

pub const KEY_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const KEY_RUN_ID: &str = "GITHUB_RUN_ID";
pub const KEY_SHA: &str = "GITHUB_SHA";
pub const KEY_REF: &str = "GITHUB_REF";
pub const KEY_WORKSPACE: &str = "GITHUB_WORKSPACE";
pub const KEY_API_URL: &str = "GITHUB_API_URL";
pub const KEY_SERVER_URL: &str = "GITHUB_SERVER_URL";
pub const KEY_TOKEN: &str = "token";
pub const KEY_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const KEY_WEBHOOK_URL: &str = "MS_TEAMS_WEBHOOK_URL";
pub const KEY_JOB_STATUS: &str = "job_status";
pub const KEY_RELEASE_NOTES_PATH: &str = "release_note_path";
pub const KEY_RELEASE_NOTES_PATH_LEGACY: &str = "realease_note_path";
pub const KEY_DRY_RUN: &str = "dry_run";

/// Everything a notification run needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub github: GitHubConfig,
    pub run: RunConfig,
    pub notify: NotifyConfig,
}

#[derive(Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    pub token: String,
    pub api_url: Url,
    /// Base for human-facing links, e.g. `https://github.com`.
    pub server_url: Url,
}

impl fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .field("server_url", &self.server_url.as_str())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    /// Parse `owner/name`.
    pub fn parse(value: &str) -> Option<Self> {
        let (owner, name) = value.split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self { owner: owner.to_string(), name: name.to_string() })
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub repository: Repository,
    pub run_id: u64,
    pub sha: String,
    /// Tag or branch ref, e.g. `refs/tags/v1.2.0`. Used verbatim in the card title.
    pub release_ref: String,
    /// Legacy status input, only consulted when the run has no conclusion yet.
    pub job_status: Option<String>,
}

impl RunConfig {
    /// Last path segment of the release ref (`refs/tags/v1.2.0` -> `v1.2.0`).
    pub fn ref_name(&self) -> &str {
        self.release_ref.rsplit('/').next().unwrap_or(&self.release_ref)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    /// Required unless `dry_run` is set.
    pub webhook_url: Option<Url>,
    pub release_notes_path: PathBuf,
    pub dry_run: bool,
}

/// Flat key-value configuration source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigVars(HashMap<String, String>);

impl ConfigVars {
    pub fn from_env() -> Self { std::env::vars().collect() }

    /// Load a flat YAML mapping of scalar values.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            NotifyError::config(format!("failed to open {}: {e}", path.display()))
        })?;
        let mapping: HashMap<String, Value> = serde_yaml::from_reader(BufReader::new(file))
            .map_err(|e| NotifyError::config(format!("failed to parse {}: {e}", path.display())))?;
        Self::from_yaml_mapping(mapping)
    }

    fn from_yaml_mapping(mapping: HashMap<String, Value>) -> Result<Self> {
        let mut vars = HashMap::with_capacity(mapping.len());
        for (key, value) in mapping {
            let value = match value {
                Value::Null => continue,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::String(s) => s,
                _ => {
                    return Err(NotifyError::config(format!(
                        "key {key} must be a scalar value"
                    )));
                }
            };
            vars.insert(key, value);
        }
        Ok(Self(vars))
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn layer(mut self, other: ConfigVars) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Trimmed value for `key`; blank values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
    }

    fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| NotifyError::config(format!("{key} is not set")))
    }
}

impl<K, V> FromIterator<(K, V)> for ConfigVars
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Config {
    pub fn from_vars(vars: &ConfigVars) -> Result<Self> {
        let repository = vars.require(KEY_REPOSITORY)?;
        let repository = Repository::parse(repository).ok_or_else(|| {
            NotifyError::config(format!("{KEY_REPOSITORY} must be owner/name, got {repository:?}"))
        })?;

        let run_id = vars.require(KEY_RUN_ID)?;
        let run_id = run_id.parse::<u64>().map_err(|_| {
            NotifyError::config(format!("{KEY_RUN_ID} must be numeric, got {run_id:?}"))
        })?;

        let sha = vars.require(KEY_SHA)?;
        if !(7..=64).contains(&sha.len()) || !sha.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(NotifyError::config(format!(
                "{KEY_SHA} must be a hex commit id, got {sha:?}"
            )));
        }

        let release_ref = vars.require(KEY_REF)?.to_string();
        let token = vars
            .get(KEY_TOKEN)
            .or_else(|| vars.get(KEY_GITHUB_TOKEN))
            .ok_or_else(|| NotifyError::config(format!("{KEY_TOKEN} is not set")))?
            .to_string();

        let api_url = parse_url(KEY_API_URL, vars.get(KEY_API_URL).unwrap_or(DEFAULT_API_URL))?;
        let server_url =
            parse_url(KEY_SERVER_URL, vars.get(KEY_SERVER_URL).unwrap_or(DEFAULT_SERVER_URL))?;

        let dry_run = vars.get(KEY_DRY_RUN).is_some_and(parse_bool);
        let webhook_url = match vars.get(KEY_WEBHOOK_URL) {
            Some(url) => Some(parse_url(KEY_WEBHOOK_URL, url)?),
            None if dry_run => None,
            None => {
                return Err(NotifyError::config(format!(
                    "{KEY_WEBHOOK_URL} is not set (required unless {KEY_DRY_RUN} is enabled)"
                )));
            }
        };

        let mut release_notes_path = PathBuf::from(
            vars.get(KEY_RELEASE_NOTES_PATH)
                .or_else(|| vars.get(KEY_RELEASE_NOTES_PATH_LEGACY))
                .unwrap_or(DEFAULT_RELEASE_NOTES_PATH),
        );
        if release_notes_path.is_relative()
            && let Some(workspace) = vars.get(KEY_WORKSPACE)
        {
            release_notes_path = Path::new(workspace).join(release_notes_path);
        }

        Ok(Self {
            github: GitHubConfig { token, api_url, server_url },
            run: RunConfig {
                repository,
                run_id,
                sha: sha.to_string(),
                release_ref,
                job_status: vars.get(KEY_JOB_STATUS).map(str::to_string),
            },
            notify: NotifyConfig { webhook_url, release_notes_path, dry_run },
        })
    }
}

fn parse_url(key: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| NotifyError::config(format!("{key} is not a valid URL ({e}): {value:?}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(NotifyError::config(format!("{key} must be an http(s) URL, got {value:?}")));
    }
    Ok(url)
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}
