/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
///
/// ```toml
/// [timing]
/// frame_ms = 16
/// win_reset_ms = 2000
/// row_enter_ms = 320
///
/// [words]
/// file = "target-words.json"
/// fixed_word = ""
///
/// [general]
/// sound = true
/// log_file = "wordgrid.log"
/// log_level = "info"
/// ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub timing: TimingConfig,
    pub words_file: PathBuf,
    /// Non-empty: every round plays this word.
    pub fixed_word: Option<String>,
    pub sound: bool,
    pub log_file: PathBuf,
    pub log_level: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    pub frame_ms: u64,
    pub win_reset_ms: u64,   // observation pause after a win
    pub row_enter_ms: u64,   // entry effect on a freshly appended row
}

impl TimingConfig {
    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    pub fn win_reset(&self) -> Duration {
        Duration::from_millis(self.win_reset_ms)
    }

    pub fn row_enter(&self) -> Duration {
        Duration::from_millis(self.row_enter_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            frame_ms: default_frame(),
            win_reset_ms: default_win_reset(),
            row_enter_ms: default_row_enter(),
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    words: TomlWords,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_frame")]
    frame_ms: u64,
    #[serde(default = "default_win_reset")]
    win_reset_ms: u64,
    #[serde(default = "default_row_enter")]
    row_enter_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlWords {
    #[serde(default = "default_words_file")]
    file: String,
    #[serde(default)]
    fixed_word: String,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_sound")]
    sound: bool,
    #[serde(default = "default_log_file")]
    log_file: String,
    #[serde(default = "default_log_level")]
    log_level: String,
}

// ── Defaults ──

fn default_frame() -> u64 { 16 }
fn default_win_reset() -> u64 { 2000 }
fn default_row_enter() -> u64 { 320 }
fn default_words_file() -> String { "target-words.json".into() }
fn default_sound() -> bool { true }
fn default_log_file() -> String { "wordgrid.log".into() }
fn default_log_level() -> String { "info".into() }

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            frame_ms: default_frame(),
            win_reset_ms: default_win_reset(),
            row_enter_ms: default_row_enter(),
        }
    }
}

impl Default for TomlWords {
    fn default() -> Self {
        TomlWords {
            file: default_words_file(),
            fixed_word: String::new(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            sound: default_sound(),
            log_file: default_log_file(),
            log_level: default_log_level(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) `~/.local/share/wordgrid`.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);
        GameConfig::from_toml(toml_cfg, &search_dirs)
    }

    fn from_toml(cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        let fixed = cfg.words.fixed_word.trim();
        GameConfig {
            timing: TimingConfig {
                // A zero frame would spin the loop.
                frame_ms: cfg.timing.frame_ms.max(1),
                win_reset_ms: cfg.timing.win_reset_ms,
                row_enter_ms: cfg.timing.row_enter_ms,
            },
            words_file: resolve_data_path(&cfg.words.file, search_dirs),
            fixed_word: (!fixed.is_empty()).then(|| fixed.to_string()),
            sound: cfg.general.sound,
            log_file: PathBuf::from(cfg.general.log_file),
            log_level: cfg.general.log_level,
        }
    }
}

/// Absolute paths are kept; relative ones are looked up in the search dirs,
/// defaulting to CWD-relative.
fn resolve_data_path(name: &str, search_dirs: &[PathBuf]) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    search_dirs.iter()
        .map(|d| d.join(name))
        .find(|p| p.is_file())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Candidate directories to search: exe dir + CWD + XDG data dir (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        // Resolve symlinks so data next to the real binary is found.
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/wordgrid");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
/// Runs before the terminal is taken over, so warnings go to stderr.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => return parse_toml(&text),
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

fn parse_toml(text: &str) -> TomlConfig {
    match toml::from_str::<TomlConfig>(text) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Warning: config.toml parse error: {e}");
            eprintln!("Using default settings.");
            TomlConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_text(text: &str) -> GameConfig {
        GameConfig::from_toml(parse_toml(text), &[])
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = from_text("");
        assert_eq!(cfg.timing, TimingConfig::default());
        assert_eq!(cfg.timing.win_reset(), Duration::from_millis(2000));
        assert_eq!(cfg.timing.row_enter(), Duration::from_millis(320));
        assert_eq!(cfg.words_file, PathBuf::from("target-words.json"));
        assert_eq!(cfg.fixed_word, None);
        assert!(cfg.sound);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = from_text("[timing]\nwin_reset_ms = 500\n\n[words]\nfixed_word = \" apfel \"\n");
        assert_eq!(cfg.timing.win_reset_ms, 500);
        assert_eq!(cfg.timing.row_enter_ms, 320);
        assert_eq!(cfg.fixed_word.as_deref(), Some("apfel"));
    }

    #[test]
    fn zero_frame_is_clamped() {
        let cfg = from_text("[timing]\nframe_ms = 0\n");
        assert_eq!(cfg.timing.frame(), Duration::from_millis(1));
    }

    #[test]
    fn malformed_file_falls_back() {
        let cfg = from_text("[timing\nwin_reset_ms = ");
        assert_eq!(cfg.timing, TimingConfig::default());
    }

    #[test]
    fn words_file_found_in_search_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("words.json"), "[]").unwrap();
        let found = resolve_data_path("words.json", &[dir.path().to_path_buf()]);
        assert_eq!(found, dir.path().join("words.json"));
        let missing = resolve_data_path("other.json", &[dir.path().to_path_buf()]);
        assert_eq!(missing, PathBuf::from("other.json"));
    }
}
