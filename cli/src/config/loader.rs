//! Site configuration loader for folio
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./folio.json or ./.folio/config.json
//! 3. Git repository root: <repo_root>/.folio/config.json
//! 4. XDG config: $XDG_CONFIG_HOME/folio/config.json or ~/.config/folio/config.json
//! 5. Built-in default site (no files)
//!
//! `FOLIO_UI_*` environment overrides apply on top of the loaded file,
//! and `--mode` / `--easing` flags on top of those.

use anyhow::{anyhow, Context, Result};
use folio_core::{Easing, SiteConfig, TransitionMode};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in a directory or the working directory
const CONFIG_FILE: &str = "folio.json";

/// CLI configuration loader
#[derive(Debug, Default)]
pub struct SiteConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    mode_override: Option<TransitionMode>,
    easing_override: Option<Easing>,
    /// Skip the working-directory, git and XDG search
    skip_search: bool,
}

impl SiteConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set config file/directory override; `~` is expanded
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        self.config_override = Some(PathBuf::from(expanded));
        self
    }

    /// Set transition mode override
    pub fn with_mode_override(mut self, mode: TransitionMode) -> Self {
        self.mode_override = Some(mode);
        self
    }

    /// Set easing override
    pub fn with_easing_override(mut self, easing: Easing) -> Self {
        self.easing_override = Some(easing);
        self
    }

    /// Use the built-in site unless an explicit override is given
    pub fn without_search(mut self) -> Self {
        self.skip_search = true;
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<SiteConfig> {
        // Step 1: Find and load base configuration
        let mut config = if let Some(override_path) = &self.config_override {
            self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else if self.skip_search {
            SiteConfig::default()
        } else {
            self.search_and_load().await?
        };

        // Step 2: Environment overrides, then flag overrides
        config.animation = config.animation.with_env_overrides();
        if let Some(mode) = self.mode_override {
            config.animation.mode = mode;
        }
        if let Some(easing) = self.easing_override {
            config.animation.easing = easing;
        }

        // Step 3: Validate
        config
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(config)
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<SiteConfig> {
        let cwd = std::env::current_dir()?;

        // 1. Current working directory
        for candidate in [cwd.join(CONFIG_FILE), cwd.join(".folio").join("config.json")] {
            if candidate.exists() {
                return self.load_file(&candidate).await;
            }
        }

        // 2. Git repository root
        if let Some(git_root) = find_git_root(&cwd) {
            let candidate = git_root.join(".folio").join("config.json");
            if candidate.exists() {
                return self.load_file(&candidate).await;
            }
        }

        // 3. XDG config directory
        if let Some(config_dir) = xdg_config_dir() {
            let candidate = config_dir.join("folio").join("config.json");
            if candidate.exists() {
                return self.load_file(&candidate).await;
            }
        }

        // 4. Built-in site
        debug!("No site configuration found, using built-in default");
        Ok(SiteConfig::default())
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<SiteConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            let config_file = path.join(CONFIG_FILE);
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No {} found in directory: {}",
                    CONFIG_FILE,
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<SiteConfig> {
        debug!("Loading site configuration from {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        SiteConfig::from_json(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Find git repository root
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Get XDG config directory
fn xdg_config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::ViewId;

    const SITE: &str = r#"{
        "initial_path": "/about",
        "routes": [
            { "path": "/", "view": "home", "label": "Home" },
            { "path": "/about", "view": "about", "label": "About" }
        ],
        "animation": { "exit_ms": 10, "enter_ms": 20 }
    }"#;

    #[tokio::test]
    async fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, SITE).unwrap();

        let config = SiteConfigLoader::new()
            .with_config_override(path)
            .with_mode_override(TransitionMode::CrossFade)
            .load()
            .await
            .unwrap();

        assert_eq!(config.initial_path, "/about");
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.animation.mode, TransitionMode::CrossFade);
        assert_eq!(config.route_table().unwrap().resolve("/"), &ViewId::from("home"));
    }

    #[tokio::test]
    async fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), SITE).unwrap();

        let config = SiteConfigLoader::new()
            .with_config_override(dir.path().to_path_buf())
            .with_easing_override(Easing::Linear)
            .load()
            .await
            .unwrap();
        assert_eq!(config.animation.easing, Easing::Linear);
    }

    #[tokio::test]
    async fn test_directory_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = SiteConfigLoader::new()
            .with_config_override(dir.path().to_path_buf())
            .load()
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("No folio.json found"));
    }

    #[tokio::test]
    async fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.json");
        std::fs::write(
            &path,
            r#"{ "routes": [ { "path": "/", "view": "a" }, { "path": "/", "view": "b" } ] }"#,
        )
        .unwrap();

        let err = SiteConfigLoader::new()
            .with_config_override(path)
            .load()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Duplicate route path: /"));
    }

    #[tokio::test]
    async fn test_builtin_without_search() {
        let config = SiteConfigLoader::new().without_search().load().await.unwrap();
        assert_eq!(config.routes.len(), SiteConfig::default().routes.len());
    }

    #[test]
    fn test_find_git_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_git_root(&nested), Some(dir.path().to_path_buf()));
    }
}
