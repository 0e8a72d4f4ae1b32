use std::{collections::HashSet, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{SublistError, SublistResult};

pub const DEFAULT_CONFIG_FILE: &str = "sub.yaml";
pub const DEFAULT_PROXY_TEMPLATE: &str = "https://raw.popeyelau.repl.co/?r={host}{path}";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// How track URIs are produced. Can be overridden from the command line.
    #[serde(default)]
    pub mode: PlaylistMode,

    /// URI template used in proxy mode. `{host}` and `{path}` are substituted.
    #[serde(default = "default_proxy_template")]
    pub proxy: String,

    #[serde(default)]
    pub folders: Vec<Folder>,
}

fn default_proxy_template() -> String {
    DEFAULT_PROXY_TEMPLATE.to_string()
}

/// A remote directory which becomes one playlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Folder {
    /// Display name, also used as the playlist file stem and `group-title`.
    pub name: String,
    /// Base url of the file host, e.g. `https://alist.example.com`
    pub host: String,
    /// Remote directory to enumerate.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Folder {
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            path: path.into(),
            password: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Remote path of an entry listed in this folder.
    pub fn entry_path(&self, entry_name: &str) -> String {
        format!("{}/{entry_name}", self.path.trim_end_matches('/'))
    }

    pub fn playlist_file_name(&self) -> String {
        format!("{}.m3u", self.name)
    }

    fn validate(&self) -> SublistResult<()> {
        let invalid = |reason| SublistError::InvalidFolder {
            name: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if self.name.contains(['/', '\\']) {
            return Err(invalid("name must not contain path separators"));
        }
        if self.host.trim().is_empty() {
            return Err(invalid("host is empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistMode {
    /// Tracks point at the proxy template and carry a `group-title` tag.
    #[default]
    Proxy,
    /// Tracks point at the resolved raw download url of each file.
    Raw,
}

impl FromStr for PlaylistMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "proxy" => Ok(Self::Proxy),
            "raw" => Ok(Self::Raw),
            _ => Err(format!("unknown playlist mode: {s}")),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> SublistResult<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_yaml(&data)
    }

    pub fn from_yaml(data: &str) -> SublistResult<Self> {
        let config: Config = serde_yaml::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SublistResult<()> {
        let mut names = HashSet::new();
        for folder in &self.folders {
            folder.validate()?;
            if !names.insert(folder.name.as_str()) {
                log::warn!(
                    "Folder name {} is used more than once, later playlists overwrite earlier ones.",
                    folder.name
                );
            }
        }
        Ok(())
    }
}
