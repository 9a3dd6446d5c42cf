//! Environment lookups and the `.env.local` template.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File holding local collaborator credentials.
pub const ENV_FILE: &str = ".env.local";

/// Placeholder template for [`ENV_FILE`]. Contains no real credentials.
pub const ENV_TEMPLATE: &str = "\
# Clerk Authentication
NEXT_PUBLIC_CLERK_PUBLISHABLE_KEY=your_clerk_publishable_key_here
CLERK_SECRET_KEY=your_clerk_secret_key_here

# Supabase Configuration
NEXT_PUBLIC_SUPABASE_URL=your_supabase_url_here
NEXT_PUBLIC_SUPABASE_ANON_KEY=your_supabase_anon_key_here
SUPABASE_SERVICE_ROLE_KEY=your_supabase_service_role_key_here

# Stripe Configuration
STRIPE_SECRET_KEY=your_stripe_secret_key_here
NEXT_PUBLIC_STRIPE_PUBLISHABLE_KEY=your_stripe_publishable_key_here
STRIPE_WEBHOOK_SECRET=your_stripe_webhook_secret_here

# Notion Configuration
NOTION_API_KEY=your_notion_api_key_here
NOTION_DATABASE_ID=your_notion_database_id_here

# Sentry Configuration
SENTRY_DSN=your_sentry_dsn_here

# Vercel Configuration
VERCEL_TOKEN=your_vercel_token_here

# GitHub Configuration
GITHUB_TOKEN=your_github_token_here

# Context7 Configuration
CONTEXT7_API_KEY=your_context7_api_key_here
";

/// Source of environment variables.
pub trait Environment {
    /// Value of `key`, if set.
    fn var(&self, key: &str) -> Option<String>;

    /// Value of `key` if set to something other than a template placeholder.
    fn configured(&self, key: &str) -> Option<String> {
        self.var(key)
            .filter(|v| !v.trim().is_empty() && !is_placeholder(v))
    }
}

/// The process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// File entries layered over another environment.
#[derive(Debug, Default, Clone)]
pub struct LayeredEnv<E> {
    overlay: BTreeMap<String, String>,
    base: E,
}

impl<E: Environment> LayeredEnv<E> {
    /// Layer `overlay` over `base`.
    pub fn new(overlay: BTreeMap<String, String>, base: E) -> Self {
        Self { overlay, base }
    }

    /// Layer the entries of an env file over `base`. A missing file adds
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn from_file(path: &Path, base: E) -> io::Result<Self> {
        let overlay = match fs::read_to_string(path) {
            Ok(content) => parse_env_file(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e),
        };
        Ok(Self::new(overlay, base))
    }
}

impl<E: Environment> Environment for LayeredEnv<E> {
    fn var(&self, key: &str) -> Option<String> {
        self.overlay.get(key).cloned().or_else(|| self.base.var(key))
    }
}

/// Parse `KEY=value` lines. Comments, blank lines and lines without `=`
/// are skipped. Matching surrounding quotes are removed.
#[must_use]
pub fn parse_env_file(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_owned(), unquote(value.trim()).to_owned()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn is_placeholder(value: &str) -> bool {
    value.starts_with("your_") && value.ends_with("_here")
}

/// Env template error.
#[derive(Debug, thiserror::Error)]
pub enum EnvFileError {
    /// The file exists and overwriting was not requested.
    #[error("{} already exists (use --force to overwrite)", path.display())]
    Exists {
        /// Existing file.
        path: PathBuf,
    },
    /// The file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Target file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Write [`ENV_TEMPLATE`] to `path`, refusing to replace an existing file
/// unless `force` is set.
///
/// # Errors
///
/// Returns an error if the file exists without `force` or cannot be written.
pub fn write_env_template(path: &Path, force: bool) -> Result<(), EnvFileError> {
    if path.exists() && !force {
        return Err(EnvFileError::Exists {
            path: path.to_owned(),
        });
    }
    fs::write(path, ENV_TEMPLATE).map_err(|source| EnvFileError::Io {
        path: path.to_owned(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Created environment file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_env_file() {
        let vars = parse_env_file(
            "# comment\n\nSTRIPE_SECRET_KEY=sk_live\nexport SENTRY_DSN=\"https://dsn\"\n\
             NOTION_API_KEY='secret'\nnot a pair\n=orphan\n",
        );
        assert_eq!(vars.len(), 3);
        assert_eq!(vars["STRIPE_SECRET_KEY"], "sk_live");
        assert_eq!(vars["SENTRY_DSN"], "https://dsn");
        assert_eq!(vars["NOTION_API_KEY"], "secret");
    }

    #[test]
    fn test_layered_env_prefers_overlay() {
        let base = LayeredEnv::new(
            BTreeMap::from([("A".to_owned(), "base".to_owned()), ("B".to_owned(), "b".to_owned())]),
            ProcessEnv,
        );
        let env = LayeredEnv::new(BTreeMap::from([("A".to_owned(), "top".to_owned())]), base);
        assert_eq!(env.var("A").as_deref(), Some("top"));
        assert_eq!(env.var("B").as_deref(), Some("b"));
    }

    #[test]
    fn test_placeholders_are_not_configured() {
        let env = LayeredEnv::new(parse_env_file(ENV_TEMPLATE), LayeredEnv::<ProcessEnv>::default());
        assert!(env.var("STRIPE_SECRET_KEY").is_some());
        assert_eq!(env.configured("STRIPE_SECRET_KEY"), None);
    }

    #[test]
    fn test_template_has_no_real_keys() {
        for (key, value) in parse_env_file(ENV_TEMPLATE) {
            assert!(is_placeholder(&value), "{key} is not a placeholder");
        }
    }

    #[test]
    fn test_write_env_template_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ENV_FILE);
        fs::write(&path, "KEEP=1\n").unwrap();

        let err = write_env_template(&path, false).unwrap_err();
        assert!(matches!(err, EnvFileError::Exists { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "KEEP=1\n");

        write_env_template(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), ENV_TEMPLATE);
    }

    #[test]
    fn test_from_file_missing_is_empty() {
        let env = LayeredEnv::from_file(Path::new("/nonexistent/.env.local"), ProcessEnv).unwrap();
        assert!(env.overlay.is_empty());
    }
}
