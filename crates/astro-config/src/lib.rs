//! Configuration management for the AstroBits docs engine.
//!
//! Parses `astro.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `auth.sign_in_url`
//! - `auth.session_cookie`
//! - `install.package_manager`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override pages root directory.
    pub pages_dir: Option<PathBuf>,
    /// Override static build output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "astro.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Route classification patterns.
    pub routes: RoutesConfig,
    /// Authentication collaborator settings used by the route guard.
    pub auth: AuthConfig,
    /// Scaffolding configuration.
    scaffold: ScaffoldConfigRaw,
    /// Component install configuration.
    install: InstallConfigRaw,
    /// Static build configuration.
    build: BuildConfigRaw,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Resolved scaffold configuration (set after loading).
    #[serde(skip)]
    pub scaffold_resolved: ScaffoldConfig,
    /// Resolved install configuration (set after loading).
    #[serde(skip)]
    pub install_resolved: InstallConfig,
    /// Resolved build output directory (set after loading).
    #[serde(skip)]
    pub output_dir: PathBuf,
    /// Directory holding the config file, or the cwd when none was found.
    #[serde(skip)]
    pub project_root: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3008,
        }
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    title: Option<String>,
    pages_dir: Option<String>,
    page_file: Option<String>,
    navigation: Option<String>,
    versions: Option<Vec<String>>,
    default_version: Option<String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug)]
pub struct SiteConfig {
    /// Product name shown in the sidebar header.
    pub title: String,
    /// Root directory of page sources.
    pub pages_dir: PathBuf,
    /// File name that marks a routable page (e.g. `page.html`).
    pub page_file: String,
    /// Navigation tree file (YAML or JSON).
    pub navigation: PathBuf,
    /// Selectable documentation versions.
    pub versions: Vec<String>,
    /// Version preselected in the switcher.
    pub default_version: Option<String>,
}

impl SiteConfig {
    fn with_base(base: &Path) -> Self {
        Self {
            title: "AstroBits Core".to_owned(),
            pages_dir: base.join("app"),
            page_file: "page.html".to_owned(),
            navigation: base.join("navigation.yaml"),
            versions: vec!["1.0.0".to_owned()],
            default_version: None,
        }
    }

    /// Version preselected in the switcher: the configured default, else the first version.
    #[must_use]
    pub fn initial_version(&self) -> Option<&str> {
        self.default_version
            .as_deref()
            .or_else(|| self.versions.first().map(String::as_str))
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

/// Route classification patterns.
///
/// Patterns use path-to-regexp style groups (`/docs(.*)`) and are matched
/// against the whole request path.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Routes served without authentication.
    pub public: Vec<String>,
    /// Routes that require an authenticated session.
    pub protected: Vec<String>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            public: ["/", "/about", "/docs(.*)", "/test(.*)", "/api/public(.*)"]
                .map(str::to_owned)
                .to_vec(),
            protected: ["/dashboard(.*)", "/profile(.*)", "/settings(.*)", "/admin(.*)"]
                .map(str::to_owned)
                .to_vec(),
        }
    }
}

/// Authentication collaborator settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Where protected routes redirect when no session is present.
    pub sign_in_url: String,
    /// Cookie whose presence marks an authenticated session.
    pub session_cookie: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            sign_in_url: "/sign-in".to_owned(),
            session_cookie: "__session".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ScaffoldConfigRaw {
    descriptors: Option<String>,
}

/// Resolved scaffolding configuration.
#[derive(Debug)]
pub struct ScaffoldConfig {
    /// YAML list of page descriptors.
    pub descriptors: PathBuf,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            descriptors: PathBuf::from("scaffold.yaml"),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct InstallConfigRaw {
    package_manager: Option<String>,
    install_args: Option<Vec<String>>,
    registry_command: Option<Vec<String>>,
    components: Option<String>,
    components_dir: Option<String>,
    manifest: Option<String>,
    package_json: Option<String>,
    demo_page: Option<String>,
    timeout_secs: Option<u64>,
    pins: BTreeMap<String, String>,
}

/// Resolved component install configuration.
#[derive(Debug)]
pub struct InstallConfig {
    /// Package manager executable.
    pub package_manager: String,
    /// Arguments placed before the dependency specifiers.
    pub install_args: Vec<String>,
    /// Registry CLI program and leading arguments; the registry identifier is appended.
    pub registry_command: Vec<String>,
    /// YAML list of component install specs.
    pub components: PathBuf,
    /// Directory the registry CLI places component sources in.
    pub components_dir: PathBuf,
    /// UI framework manifest file.
    pub manifest: PathBuf,
    /// Package manifest listing already installed dependencies.
    pub package_json: PathBuf,
    /// Demo page written after a run (`None` disables it).
    pub demo_page: Option<PathBuf>,
    /// Per-subprocess timeout in seconds.
    pub timeout_secs: u64,
    /// Version ranges forced onto matching dependency names.
    pub pins: BTreeMap<String, String>,
}

impl InstallConfig {
    fn with_base(base: &Path) -> Self {
        Self {
            package_manager: "npm".to_owned(),
            install_args: vec!["install".to_owned(), "--legacy-peer-deps".to_owned()],
            registry_command: ["npx", "--yes", "shadcn@latest", "add", "--yes"]
                .map(str::to_owned)
                .to_vec(),
            components: base.join("components.yaml"),
            components_dir: base.join("components/ui"),
            manifest: base.join("components.json"),
            package_json: base.join("package.json"),
            demo_page: None,
            timeout_secs: 300,
            pins: BTreeMap::new(),
        }
    }
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    output_dir: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`ASTRO_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `astro.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(pages_dir) = &settings.pages_dir {
            self.site_resolved.pages_dir.clone_from(pages_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_dir.clone_from(output_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteConfigRaw::default(),
            routes: RoutesConfig::default(),
            auth: AuthConfig::default(),
            scaffold: ScaffoldConfigRaw::default(),
            install: InstallConfigRaw::default(),
            build: BuildConfigRaw::default(),
            site_resolved: SiteConfig::with_base(base),
            scaffold_resolved: ScaffoldConfig {
                descriptors: base.join("scaffold.yaml"),
            },
            install_resolved: InstallConfig::with_base(base),
            output_dir: base.join("dist"),
            project_root: base.to_path_buf(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_site()?;
        self.validate_install()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        let site = &self.site_resolved;
        require_non_empty(&site.title, "site.title")?;
        require_non_empty(&site.page_file, "site.page_file")?;
        if site.page_file.contains('/') {
            return Err(ConfigError::Validation(
                "site.page_file must be a file name, not a path".to_owned(),
            ));
        }
        if let Some(default) = &site.default_version
            && !site.versions.contains(default)
        {
            return Err(ConfigError::Validation(format!(
                "site.default_version \"{default}\" is not listed in site.versions"
            )));
        }
        require_non_empty(&self.auth.session_cookie, "auth.session_cookie")?;
        require_non_empty(&self.auth.sign_in_url, "auth.sign_in_url")?;
        Ok(())
    }

    fn validate_install(&self) -> Result<(), ConfigError> {
        let install = &self.install_resolved;
        require_non_empty(&install.package_manager, "install.package_manager")?;
        match install.registry_command.first() {
            Some(program) => require_non_empty(program, "install.registry_command")?,
            None => {
                return Err(ConfigError::Validation(
                    "install.registry_command cannot be empty".to_owned(),
                ));
            }
        }
        if install.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "install.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.auth.sign_in_url = expand::expand_env(&self.auth.sign_in_url, "auth.sign_in_url")?;
        self.auth.session_cookie =
            expand::expand_env(&self.auth.session_cookie, "auth.session_cookie")?;
        if let Some(ref pm) = self.install.package_manager {
            self.install.package_manager =
                Some(expand::expand_env(pm, "install.package_manager")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));
        let defaults = Self::default_with_base(config_dir);

        let site = &self.site;
        self.site_resolved = SiteConfig {
            title: site.title.clone().unwrap_or(defaults.site_resolved.title),
            pages_dir: resolve(site.pages_dir.as_deref(), "app"),
            page_file: site
                .page_file
                .clone()
                .unwrap_or(defaults.site_resolved.page_file),
            navigation: resolve(site.navigation.as_deref(), "navigation.yaml"),
            versions: site
                .versions
                .clone()
                .unwrap_or(defaults.site_resolved.versions),
            default_version: site.default_version.clone(),
        };

        self.scaffold_resolved = ScaffoldConfig {
            descriptors: resolve(self.scaffold.descriptors.as_deref(), "scaffold.yaml"),
        };

        let install = &self.install;
        let install_defaults = defaults.install_resolved;
        self.install_resolved = InstallConfig {
            package_manager: install
                .package_manager
                .clone()
                .unwrap_or(install_defaults.package_manager),
            install_args: install
                .install_args
                .clone()
                .unwrap_or(install_defaults.install_args),
            registry_command: install
                .registry_command
                .clone()
                .unwrap_or(install_defaults.registry_command),
            components: resolve(install.components.as_deref(), "components.yaml"),
            components_dir: resolve(install.components_dir.as_deref(), "components/ui"),
            manifest: resolve(install.manifest.as_deref(), "components.json"),
            package_json: resolve(install.package_json.as_deref(), "package.json"),
            demo_page: install.demo_page.as_deref().map(|p| config_dir.join(p)),
            timeout_secs: install.timeout_secs.unwrap_or(install_defaults.timeout_secs),
            pins: install.pins.clone(),
        };

        self.output_dir = resolve(self.build.output_dir.as_deref(), "dist");
        self.project_root = config_dir.to_path_buf();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3008);
        assert_eq!(config.site_resolved.pages_dir, PathBuf::from("/test/app"));
        assert_eq!(config.site_resolved.page_file, "page.html");
        assert_eq!(
            config.site_resolved.navigation,
            PathBuf::from("/test/navigation.yaml")
        );
        assert_eq!(config.output_dir, PathBuf::from("/test/dist"));
        assert_eq!(config.install_resolved.package_manager, "npm");
        assert_eq!(config.install_resolved.timeout_secs, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.auth.session_cookie, "__session");
        assert!(config.routes.public.contains(&"/docs(.*)".to_owned()));
    }

    #[test]
    fn test_parse_routes_and_auth() {
        let toml = r#"
[routes]
public = ["/", "/docs(.*)"]
protected = ["/admin(.*)"]

[auth]
sign_in_url = "https://accounts.example.com/sign-in"
session_cookie = "sid"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.routes.public, vec!["/", "/docs(.*)"]);
        assert_eq!(config.routes.protected, vec!["/admin(.*)"]);
        assert_eq!(config.auth.sign_in_url, "https://accounts.example.com/sign-in");
        assert_eq!(config.auth.session_cookie, "sid");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[site]
title = "Docs"
pages_dir = "site/app"
navigation = "nav.json"
versions = ["1.0.0", "2.0.0-beta"]
default_version = "2.0.0-beta"

[scaffold]
descriptors = "pages.yaml"

[install]
components = "ui.yaml"
components_dir = "src/ui"
demo_page = "app/test-components/page.html"

[install.pins]
"lucide-react" = "^0.542.0"

[build]
output_dir = "public"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site_resolved.title, "Docs");
        assert_eq!(
            config.site_resolved.pages_dir,
            PathBuf::from("/project/site/app")
        );
        assert_eq!(
            config.site_resolved.navigation,
            PathBuf::from("/project/nav.json")
        );
        assert_eq!(config.site_resolved.initial_version(), Some("2.0.0-beta"));
        assert_eq!(
            config.scaffold_resolved.descriptors,
            PathBuf::from("/project/pages.yaml")
        );
        assert_eq!(
            config.install_resolved.components_dir,
            PathBuf::from("/project/src/ui")
        );
        assert_eq!(
            config.install_resolved.demo_page,
            Some(PathBuf::from("/project/app/test-components/page.html"))
        );
        assert_eq!(
            config.install_resolved.package_json,
            PathBuf::from("/project/package.json")
        );
        assert_eq!(
            config.install_resolved.pins.get("lucide-react").map(String::as_str),
            Some("^0.542.0")
        );
        assert_eq!(config.output_dir, PathBuf::from("/project/public"));
        assert_eq!(config.project_root, PathBuf::from("/project"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_initial_version_falls_back_to_first() {
        let site = SiteConfig {
            versions: vec!["1.0.0".to_owned(), "1.1.0-alpha".to_owned()],
            ..SiteConfig::default()
        };
        assert_eq!(site.initial_version(), Some("1.0.0"));

        let empty = SiteConfig {
            versions: Vec::new(),
            ..SiteConfig::default()
        };
        assert_eq!(empty.initial_version(), None);
    }

    #[test]
    fn test_default_version_must_be_listed() {
        let toml = r#"
[site]
versions = ["1.0.0"]
default_version = "9.9.9"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("9.9.9"));
    }

    #[test]
    fn test_page_file_must_not_be_path() {
        let toml = r#"
[site]
page_file = "nested/page.html"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let toml = r"
[install]
timeout_secs = 0
";
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_empty_registry_command_rejected() {
        let toml = r"
[install]
registry_command = []
";
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_port_zero_rejected() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            port: Some(9000),
            pages_dir: Some(PathBuf::from("/custom/app")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.site_resolved.pages_dir, PathBuf::from("/custom/app"));
        assert_eq!(config.output_dir, PathBuf::from("/test/dist"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/astro.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("astro.toml");
        std::fs::write(&path, "[server]\nport = 4000\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.site_resolved.pages_dir, dir.path().join("app"));
        assert_eq!(config.config_path, Some(path));
    }
}
