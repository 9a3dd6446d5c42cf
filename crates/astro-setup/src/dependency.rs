//! Package-manager dependency specifiers.

use std::collections::BTreeMap;
use std::fmt;

/// A dependency specifier: package name plus optional version range.
///
/// Accepts `name`, `name@range`, `@scope/name` and `@scope/name@range`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySpec {
    /// Package name, including scope.
    pub name: String,
    /// Version range, if any.
    pub range: Option<String>,
}

/// Invalid dependency specifier.
#[derive(Debug, thiserror::Error)]
#[error("Invalid dependency specifier \"{spec}\": {reason}")]
pub struct DependencyError {
    /// Offending specifier.
    pub spec: String,
    /// What is wrong with it.
    pub reason: &'static str,
}

impl DependencySpec {
    /// Parse a specifier.
    ///
    /// # Errors
    ///
    /// Returns an error for empty names, blank ranges, whitespace in the
    /// name, and scopes without a package name. Ranges may contain spaces
    /// (`>=18 <20`, `1.2.7 || >=1.2.9 <2.0.0`).
    pub fn parse(spec: &str) -> Result<Self, DependencyError> {
        let err = |reason| DependencyError {
            spec: spec.to_owned(),
            reason,
        };

        if spec.is_empty() {
            return Err(err("empty specifier"));
        }

        // The scope's leading '@' is not a version separator
        let search_from = usize::from(spec.starts_with('@'));
        let (name, range) = match spec[search_from..].find('@') {
            Some(pos) => {
                let at = search_from + pos;
                let range = spec[at + 1..].trim();
                if range.is_empty() {
                    return Err(err("empty version range"));
                }
                (&spec[..at], Some(range.to_owned()))
            }
            None => (spec, None),
        };

        if name.chars().any(char::is_whitespace) {
            return Err(err("package name contains whitespace"));
        }
        if let Some(scoped) = name.strip_prefix('@') {
            match scoped.split_once('/') {
                Some((scope, package)) if !scope.is_empty() && !package.is_empty() => {}
                _ => return Err(err("scoped package needs @scope/name")),
            }
        } else if name.is_empty() {
            return Err(err("empty package name"));
        }

        Ok(Self {
            name: name.to_owned(),
            range,
        })
    }

    /// Replace the range with a pinned one when the name is pinned.
    #[must_use]
    pub fn pinned(mut self, pins: &BTreeMap<String, String>) -> Self {
        if let Some(range) = pins.get(&self.name) {
            self.range = Some(range.clone());
        }
        self
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.range {
            Some(range) => write!(f, "{}@{range}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(spec: &str) -> (String, Option<String>) {
        let dep = DependencySpec::parse(spec).unwrap();
        (dep.name, dep.range)
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse("clsx"), ("clsx".to_owned(), None));
        assert_eq!(
            parse("framer-motion@^11.0.0"),
            ("framer-motion".to_owned(), Some("^11.0.0".to_owned()))
        );
        assert_eq!(
            parse("@radix-ui/react-dialog"),
            ("@radix-ui/react-dialog".to_owned(), None)
        );
        assert_eq!(
            parse("@radix-ui/react-tabs@1.1.0"),
            ("@radix-ui/react-tabs".to_owned(), Some("1.1.0".to_owned()))
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for spec in ["", "clsx@", "clsx@  ", "@radix-ui", "@/react", "two words", "re act@1", "@scope/"] {
            assert!(DependencySpec::parse(spec).is_err(), "accepted {spec:?}");
        }
    }

    #[test]
    fn test_parse_ranges_with_spaces() {
        assert_eq!(
            parse("react@>=18 <20"),
            ("react".to_owned(), Some(">=18 <20".to_owned()))
        );
        assert_eq!(
            parse("lodash@1.2.7 || >=1.2.9 <2.0.0"),
            ("lodash".to_owned(), Some("1.2.7 || >=1.2.9 <2.0.0".to_owned()))
        );
        assert_eq!(
            parse("@types/node@ ^20.0.0 "),
            ("@types/node".to_owned(), Some("^20.0.0".to_owned()))
        );
    }

    #[test]
    fn test_pins_replace_range() {
        let pins = BTreeMap::from([("lucide-react".to_owned(), "^0.542.0".to_owned())]);
        let pinned = DependencySpec::parse("lucide-react@^0.300.0").unwrap().pinned(&pins);
        assert_eq!(pinned.to_string(), "lucide-react@^0.542.0");

        let untouched = DependencySpec::parse("clsx").unwrap().pinned(&pins);
        assert_eq!(untouched.to_string(), "clsx");
    }
}
