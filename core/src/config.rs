use std::env;
use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, Context, Result};

pub const DEFAULT_FILE_NAME: &str = "sets.json";
pub const DEFAULT_EXTENSION: &str = "json";
pub const DEFAULT_TARGET_REPS: u32 = 100;
pub const DEFAULT_DAYS: u32 = 30;

pub const ENV_DEFAULT_FILE: &str = "SET_TRACKER_DEFAULT_FILE";
pub const ENV_BASE_DIR: &str = "SET_TRACKER_BASE_DIR";
pub const ENV_DEFAULT_GROUP: &str = "SET_TRACKER_DEFAULT_GROUP";
pub const ENV_DEFAULT_TARGET_REPS: &str = "SET_TRACKER_DEFAULT_TARGET_REPS";

/// Defaults taken from `SET_TRACKER_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub default_file: String,
    pub base_dir: Option<String>,
    pub default_group: Option<String>,
    pub default_target_reps: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let default_target_reps = match non_empty(ENV_DEFAULT_TARGET_REPS) {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or_else(|| {
                    anyhow!(
                        "{} must be a positive number, got '{}'",
                        ENV_DEFAULT_TARGET_REPS,
                        value
                    )
                })?,
            None => DEFAULT_TARGET_REPS,
        };

        Ok(Self {
            default_file: non_empty(ENV_DEFAULT_FILE)
                .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
            base_dir: non_empty(ENV_BASE_DIR),
            default_group: non_empty(ENV_DEFAULT_GROUP),
            default_target_reps,
        })
    }
}

/// Resolves the set store path.
///
/// Relative names are looked up in the base directory (current directory unless configured). A
/// name without an extension that does not name an existing file gets `.json` appended.
pub fn expand_file_name(file_name: Option<&str>, settings: &Settings) -> Result<PathBuf> {
    let file_name = file_name.unwrap_or(&settings.default_file);
    let file_path = Path::new(file_name);
    if file_path.is_absolute() {
        return Ok(file_path.to_path_buf());
    }

    let base_dir = match &settings.base_dir {
        Some(dir) => PathBuf::from(expand_vars(&expand_user(dir)?)),
        None => env::current_dir().context("Could not determine current directory")?,
    };
    let base_dir = if base_dir.is_absolute() {
        base_dir
    } else {
        env::current_dir()
            .context("Could not determine current directory")?
            .join(base_dir)
    };

    let mut path = normalize(&base_dir.join(file_path));
    if !path.is_file() && path.extension().is_none() {
        path.set_extension(DEFAULT_EXTENSION);
    }
    Ok(path)
}

fn expand_user(path: &str) -> Result<String> {
    if path == "~" || path.starts_with("~/") {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        return Ok(format!("{}{}", home.display(), &path[1..]));
    }
    Ok(path.to_string())
}

/// Expands `$NAME` and `${NAME}`; unknown variables are left untouched.
fn expand_vars(input: &str) -> String {
    expand_vars_with(input, |key| env::var(key).ok())
}

fn expand_vars_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };

        match lookup(name).filter(|_| !name.is_empty()) {
            Some(value) => out.push_str(&value),
            None => {
                out.push('$');
                out.push_str(&after[..consumed]);
            }
        }
        rest = &after[consumed..];
    }

    out.push_str(rest);
    out
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[]).unwrap();
        assert_eq!(settings.default_file, "sets.json");
        assert_eq!(settings.base_dir, None);
        assert_eq!(settings.default_group, None);
        assert_eq!(settings.default_target_reps, 100);
    }

    #[test]
    fn test_env_overrides() {
        let settings = settings(&[
            (ENV_DEFAULT_FILE, "pushups"),
            (ENV_DEFAULT_GROUP, "pushups"),
            (ENV_DEFAULT_TARGET_REPS, "50"),
        ])
        .unwrap();
        assert_eq!(settings.default_file, "pushups");
        assert_eq!(settings.default_group.as_deref(), Some("pushups"));
        assert_eq!(settings.default_target_reps, 50);
    }

    #[test]
    fn test_invalid_target_reps() {
        assert!(settings(&[(ENV_DEFAULT_TARGET_REPS, "lots")]).is_err());
        assert!(settings(&[(ENV_DEFAULT_TARGET_REPS, "0")]).is_err());
    }

    #[test]
    fn test_expand_file_name_in_base_dir() {
        let dir = tempdir().unwrap();
        let base = dir.path().to_str().unwrap();
        let settings = settings(&[(ENV_BASE_DIR, base)]).unwrap();

        assert_eq!(expand_file_name(None, &settings).unwrap(), dir.path().join("sets.json"));
        let expand = |name| expand_file_name(Some(name), &settings).unwrap();
        assert_eq!(expand("legs"), dir.path().join("legs.json"));
        assert_eq!(expand("sub/../arms.db"), dir.path().join("arms.db"));
    }

    #[test]
    fn test_existing_file_without_extension_is_kept() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("legs"), "{}").unwrap();
        let settings = settings(&[(ENV_BASE_DIR, dir.path().to_str().unwrap())]).unwrap();

        assert_eq!(expand_file_name(Some("legs"), &settings).unwrap(), dir.path().join("legs"));
    }

    #[test]
    fn test_absolute_file_name_is_unchanged() {
        let dir = tempdir().unwrap();
        let absolute = dir.path().join("elsewhere");
        let settings = settings(&[]).unwrap();

        assert_eq!(expand_file_name(absolute.to_str(), &settings).unwrap(), absolute);
    }

    #[test]
    fn test_expand_vars() {
        let lookup = |key: &str| match key {
            "HOME" => Some("/home/me".to_string()),
            "SUB" => Some("sets".to_string()),
            _ => None,
        };
        assert_eq!(expand_vars_with("$HOME/${SUB}/x", lookup), "/home/me/sets/x");
        assert_eq!(expand_vars_with("$MISSING/a", lookup), "$MISSING/a");
        assert_eq!(expand_vars_with("cost$", lookup), "cost$");
        assert_eq!(expand_vars_with("${open", lookup), "${open");
    }
}
