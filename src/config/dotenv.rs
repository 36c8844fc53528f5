use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// Files consulted when no explicit env file is given, highest priority first.
pub const DEFAULT_ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Parse `KEY=VALUE` lines. Blank lines and `#` comments are skipped and a
/// single layer of matching quotes is stripped from the value.
pub fn parse_env_file(content: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some(eq_idx) = line.find('=') else {
            continue;
        };
        let key = line[..eq_idx].trim();
        if key.is_empty() {
            continue;
        }
        let mut value = line[eq_idx + 1..].trim();
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            value = &value[1..value.len() - 1];
        }
        pairs.push((key.to_string(), value.to_string()));
    }
    pairs
}

/// Load env files into the process environment. Variables that are already
/// set are never overwritten. Returns the files that were actually read.
pub fn load_env_files<P: AsRef<Path>>(paths: &[P]) -> Vec<PathBuf> {
    let mut loaded = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let Ok(content) = std::fs::read_to_string(path) else {
            debug!(path = %path.display(), "Env file not present");
            continue;
        };
        for (key, value) in parse_env_file(&content) {
            if std::env::var_os(&key).is_none() {
                std::env::set_var(&key, &value);
            }
        }
        info!(path = %path.display(), "Loaded environment file");
        loaded.push(path.to_path_buf());
    }
    loaded
}
