use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use cross_xdg::BaseDirs;
use nu_ansi_term::Color;
use crate::theme::Mocha;
use crate::LoopEntry;

/// Colors for the REPL syntax highlighter, one per command plus a fallback
/// for comment characters.
#[derive(Debug, Clone)]
pub struct Colors {
    pub op_right: Color,   // '>'
    pub op_left: Color,    // '<'
    pub op_inc: Color,     // '+'
    pub op_dec: Color,     // '-'
    pub op_output: Color,  // '.'
    pub op_input: Color,   // ','
    pub op_bracket: Color, // '[' and ']'
    pub non_command: Color,
}

impl Default for Colors {
    fn default() -> Self {
        // Movement in the cool accents, data in green/red, I/O in the warm
        // ones, flow control in mauve.
        Self {
            op_right: Mocha::SKY,
            op_left: Mocha::TEAL,
            op_inc: Mocha::GREEN,
            op_dec: Mocha::RED,
            op_output: Mocha::YELLOW,
            op_input: Mocha::PEACH,
            op_bracket: Mocha::MAUVE,
            non_command: Mocha::SURFACE2,
        }
    }
}

/// User configuration, loaded once from `bft.toml` in the XDG config home.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub loop_entry: LoopEntry,
    pub timeout_ms: Option<u64>,
    pub colors: Colors,
}

static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn config() -> &'static Config {
    CONFIG.get_or_init(|| load_from_toml().unwrap_or_default())
}

/// Parse a loop-entry mode name as used by `bft.toml` and `--loop-entry`.
pub fn parse_loop_entry(value: &str) -> Option<LoopEntry> {
    match value.trim().to_ascii_lowercase().as_str() {
        "quirky" => Some(LoopEntry::Quirky),
        "conventional" | "strict" => Some(LoopEntry::Conventional),
        _ => None,
    }
}

fn parse_color(value: &str) -> Option<Color> {
    let s = value.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
    } else {
        // Named colors matching nu_ansi_term::Color variants
        let name = s.to_ascii_lowercase();
        return Some(match name.as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "purple" => Color::Purple,
            "cyan" => Color::Cyan,
            "gray" | "grey" => Color::LightGray,
            "darkgray" | "dark_grey" | "darkgrey" | "dark_gray" => Color::DarkGray,
            "lightred" | "light_red" => Color::LightRed,
            "lightgreen" | "light_green" => Color::LightGreen,
            "lightblue" | "light_blue" => Color::LightBlue,
            "lightmagenta" | "light_magenta" => Color::LightMagenta,
            "lightcyan" | "light_cyan" => Color::LightCyan,
            "white" => Color::White,
            _ => return None,
        });
    }
    None
}

fn load_from_toml() -> Option<Config> {
    let base_dirs = BaseDirs::new().unwrap();

    // On Linux: resolves to /home/<user>/.config
    // On Windows: resolves to C:\Users\<user>\.config
    // On macOS: resolves to /Users/<user>/.config
    let config_home = base_dirs.config_home();

    let mut path = PathBuf::from(config_home);
    path.push("bft.toml");

    let content = fs::read_to_string(path).ok()?;
    // Very small hand-rolled parser: track the current [section] and collect
    // key = value pairs under "section.key". Values may be quoted.
    let mut section = String::new();
    let mut map: HashMap<String, String> = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            section = line[1..line.len() - 1].to_string();
            continue;
        }
        if let Some(eq) = line.find('=') {
            let key = line[..eq].trim().to_string();
            let val_raw = line[eq + 1..].trim();
            let val = if val_raw.starts_with('"') && val_raw.ends_with('"') && val_raw.len() >= 2 {
                val_raw[1..val_raw.len() - 1].to_string()
            } else {
                val_raw.to_string()
            };
            map.insert(format!("{section}.{key}"), val);
        }
    }

    let mut cfg = Config::default();

    if let Some(v) = map.get("interpreter.loop_entry").and_then(|s| parse_loop_entry(s)) {
        cfg.loop_entry = v;
    }
    if let Some(v) = map.get("interpreter.timeout_ms").and_then(|s| s.parse::<u64>().ok()) {
        cfg.timeout_ms = Some(v);
    }

    macro_rules! set {
        ($field:ident, $key:literal) => {
            if let Some(v) = map.get($key).and_then(|s| parse_color(s)) {
                cfg.colors.$field = v;
            }
        };
    }

    set!(op_right, "colors.op_right");
    set!(op_left, "colors.op_left");
    set!(op_inc, "colors.op_inc");
    set!(op_dec, "colors.op_dec");
    set!(op_output, "colors.op_output");
    set!(op_input, "colors.op_input");
    set!(op_bracket, "colors.op_bracket");
    set!(non_command, "colors.non_command");

    Some(cfg)
}
