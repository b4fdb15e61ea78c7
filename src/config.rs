/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

use crate::ui::palette::ColorMode;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Duration of one display frame in milliseconds (the vsync cadence).
    pub frame_ms: u64,
    /// Edge-trigger the puzzle screen's buttons instead of re-sampling
    /// held buttons every frame.
    pub debounce: bool,
    /// Palette configuration: four-shade monochrome or the color table.
    pub color_mode: ColorMode,
    pub gamepad: GamepadConfig,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub a_button: Vec<String>,
    pub b_button: Vec<String>,
    pub start: Vec<String>,
    pub select: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            frame_ms: default_frame_ms(),
            debounce: default_debounce(),
            color_mode: ColorMode::Dmg,
            gamepad: GamepadConfig {
                a_button: default_a_button(),
                b_button: default_b_button(),
                start: default_start(),
                select: default_select(),
            },
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    input: TomlInput,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    display: TomlDisplay,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_frame_ms")]
    frame_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlInput {
    #[serde(default = "default_debounce")]
    debounce: bool,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_a_button")]
    a_button: Vec<String>,
    #[serde(default = "default_b_button")]
    b_button: Vec<String>,
    #[serde(default = "default_start")]
    start: Vec<String>,
    #[serde(default = "default_select")]
    select: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_color_mode")]
    color_mode: String,
}

// ── Defaults ──

fn default_frame_ms() -> u64 { 16 }   // ~60 frames per second
fn default_debounce() -> bool { false }

fn default_a_button() -> Vec<String> { vec!["A".into(), "X".into()] }
fn default_b_button() -> Vec<String> { vec!["B".into(), "Y".into()] }
fn default_start() -> Vec<String> { vec!["Start".into()] }
fn default_select() -> Vec<String> { vec!["Select".into(), "Back".into()] }
fn default_color_mode() -> String { "dmg".into() }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { frame_ms: default_frame_ms() }
    }
}

impl Default for TomlInput {
    fn default() -> Self {
        TomlInput { debounce: default_debounce() }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            a_button: default_a_button(),
            b_button: default_b_button(),
            start: default_start(),
            select: default_select(),
        }
    }
}

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay { color_mode: default_color_mode() }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());

        let color_mode = match toml_cfg.display.color_mode.to_lowercase().as_str() {
            "dmg" => ColorMode::Dmg,
            "cgb" => ColorMode::Cgb,
            other => {
                eprintln!("Warning: unknown color_mode {other:?}, using \"dmg\"");
                ColorMode::Dmg
            }
        };

        GameConfig {
            frame_ms: toml_cfg.speed.frame_ms.max(1),
            debounce: toml_cfg.input.debounce,
            color_mode,
            gamepad: GamepadConfig {
                a_button: toml_cfg.gamepad.a_button,
                b_button: toml_cfg.gamepad.b_button,
                start: toml_cfg.gamepad.start,
                select: toml_cfg.gamepad.select,
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        // Resolve symlinks so an installed binary still finds data
        // relative to its real location.
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

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
