use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Project settings read from `intake.yaml`. Every field has a default, so a
/// project without the file behaves like one with an empty file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_clients_dir")]
    pub clients_dir: PathBuf,
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
    #[serde(default = "default_export_file")]
    pub export_file: PathBuf,
    #[serde(default = "default_summary_file")]
    pub summary_file: PathBuf,
    /// Custom Markdown template for consulting reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

fn default_version() -> u32 {
    1
}

fn default_clients_dir() -> PathBuf {
    PathBuf::from(paths::DEFAULT_CLIENTS_DIR)
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from(paths::DEFAULT_REPORTS_DIR)
}

fn default_export_file() -> PathBuf {
    PathBuf::from(paths::DEFAULT_EXPORT_FILE)
}

fn default_summary_file() -> PathBuf {
    PathBuf::from(paths::DEFAULT_SUMMARY_FILE)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            clients_dir: default_clients_dir(),
            reports_dir: default_reports_dir(),
            export_file: default_export_file(),
            summary_file: default_summary_file(),
            template: None,
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Resolved locations (relative settings are anchored at the project root)
    // -----------------------------------------------------------------------

    pub fn clients_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.clients_dir)
    }

    pub fn reports_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.reports_dir)
    }

    pub fn export_path(&self, root: &Path) -> PathBuf {
        root.join(&self.export_file)
    }

    pub fn summary_path(&self, root: &Path) -> PathBuf {
        root.join(&self.summary_file)
    }

    pub fn template_path(&self, root: &Path) -> Option<PathBuf> {
        self.template.as_ref().map(|t| root.join(t))
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self, root: &Path) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        for (key, value) in [
            ("clients_dir", &self.clients_dir),
            ("reports_dir", &self.reports_dir),
            ("export_file", &self.export_file),
            ("summary_file", &self.summary_file),
        ] {
            if value.as_os_str().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("'{key}' is empty"),
                });
            }
        }

        let clients = self.clients_dir(root);
        if !self.clients_dir.as_os_str().is_empty() && !clients.is_dir() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "clients directory '{}' does not exist yet",
                    clients.display()
                ),
            });
        }

        if let Some(template) = self.template_path(root) {
            if !template.is_file() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("report template '{}' not found", template.display()),
                });
            }
        }

        if self.version != 1 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("unknown config version {}", self.version),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
