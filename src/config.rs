use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "mdsite.json";

/// Top-level mdsite.json schema.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    #[serde(default = "default_template")]
    pub template: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
            content_dir: default_content_dir(),
            public_dir: default_public_dir(),
            template: default_template(),
        }
    }
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}
fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}
fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}
fn default_template() -> PathBuf {
    PathBuf::from("template.html")
}

impl SiteConfig {
    /// Resolve every relative path against `root`.
    pub fn resolve(self, root: &Path) -> Self {
        let join = |p: PathBuf| if p.is_absolute() { p } else { root.join(p) };
        Self {
            static_dir: join(self.static_dir),
            content_dir: join(self.content_dir),
            public_dir: join(self.public_dir),
            template: join(self.template),
        }
    }
}

/// Load config from `path` (or `./mdsite.json`), or return defaults if missing.
///
/// Paths in the returned config are resolved against the directory holding
/// the config file.
pub fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(CONFIG_FILE),
    };

    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    if config_path.exists() {
        let raw = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: SiteConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        Ok(config.resolve(&root))
    } else if path.is_some() {
        anyhow::bail!("Config file {} does not exist", config_path.display())
    } else {
        Ok(SiteConfig::default().resolve(&root))
    }
}
