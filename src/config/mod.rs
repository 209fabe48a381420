//! Key/value configuration: defaults, rc file, environment overlay.

use std::{
    collections::HashMap,
    env, fs,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use directories::BaseDirs;

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self::from_file(&default_config_path())
    }

    /// Build a config from defaults plus one rc file, then overlay the
    /// environment. Split out from `load` so tests can point at a temp file.
    pub fn from_file(path: &Path) -> Self {
        let mut map = default_map();

        if path.exists() {
            if let Ok(file) = fs::File::open(path) {
                let reader = BufReader::new(file);
                for line in reader.lines().flatten() {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((k, v)) = line.split_once('=') {
                        map.insert(k.trim().to_string(), v.trim().to_string());
                    }
                }
            }
        }

        // Environment takes precedence over the rc file.
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path: path.to_path_buf() }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        // ENV first
        if let Ok(v) = env::var(key) {
            return Some(v);
        }
        self.inner.get(key).cloned()
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.parse::<u64>().ok())
    }
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &["BACKEND_URL", "REQUEST_TIMEOUT", "DEFAULT_LANGUAGE"];

    KEYS.contains(&k) || k.starts_with("PLAYPAD_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("playpad").join(".playpadrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    // BACKEND_URL has no default on purpose; the client refuses to build
    // without one (see client::PlaygroundClient::from_config).
    m.insert("REQUEST_TIMEOUT".into(), "60".into());
    m.insert("DEFAULT_LANGUAGE".into(), "python".into());
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rc_file_overrides_defaults() {
        env::remove_var("BACKEND_URL");
        let dir = tempfile::tempdir().unwrap();
        let rc = dir.path().join(".playpadrc");
        let mut f = fs::File::create(&rc).unwrap();
        writeln!(f, "# playpad settings").unwrap();
        writeln!(f, "REQUEST_TIMEOUT = 5").unwrap();
        writeln!(f, "BACKEND_URL=http://localhost:8080/playground").unwrap();

        let cfg = Config::from_file(&rc);
        assert_eq!(cfg.get_u64("REQUEST_TIMEOUT"), Some(5));
        assert_eq!(
            cfg.get("BACKEND_URL").as_deref(),
            Some("http://localhost:8080/playground")
        );
        assert_eq!(cfg.get("DEFAULT_LANGUAGE").as_deref(), Some("python"));
    }

    #[test]
    fn missing_file_keeps_defaults() {
        env::remove_var("BACKEND_URL");
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::from_file(&dir.path().join("nope"));
        assert_eq!(cfg.get_u64("REQUEST_TIMEOUT"), Some(60));
        assert!(cfg.get("BACKEND_URL").is_none());
    }
}
