//! Type-safe key bindings with help text and an enabled/disabled flag.
//!
//! A [`Binding`] ties one or more key presses to an action, carries the
//! help entry shown in the footer, and can be disabled so the key stops
//! matching entirely. The timer controls (start, pause, reset) are plain
//! bindings whose enabled state the application syncs from the controller
//! after every command.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus its modifier set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key code, e.g. `KeyCode::Char('s')` or `KeyCode::Enter`.
    pub code: KeyCode,
    /// Modifier keys that must be held, e.g. `KeyModifiers::CONTROL`.
    pub mods: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, mods): (KeyCode, KeyModifiers)) -> Self {
        Self { code, mods }
    }
}

/// Help information for a binding: the key label and what it does.
#[derive(Debug, Clone, Default)]
pub struct Help {
    /// Short key label, e.g. `"s"` or `"ctrl+c"`.
    pub key: String,
    /// Action description, e.g. `"start"`.
    pub desc: String,
}

/// A key binding with help text and an enabled flag.
///
/// Disabled bindings never match, so a single `matches_binding` dispatch
/// chain respects button state without extra guards.
///
/// # Examples
///
/// ```rust
/// use focus_timer::key::{matches_binding, new_binding, with_help, with_keys_str};
/// use bubbletea_rs::KeyMsg;
/// use crossterm::event::{KeyCode, KeyModifiers};
///
/// let mut pause = new_binding(vec![
///     with_keys_str(&["p"]),
///     with_help("p", "pause"),
/// ]);
///
/// let press = KeyMsg { key: KeyCode::Char('p'), modifiers: KeyModifiers::NONE };
/// assert!(matches_binding(&press, &pause));
///
/// pause.set_enabled(false);
/// assert!(!matches_binding(&press, &pause));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding matching the given key presses.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help entry for this binding.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Returns the help entry.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Returns whether the binding is currently enabled.
    pub fn enabled(&self) -> bool {
        !self.disabled
    }

    /// Enables or disables the binding. A disabled binding never matches.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Returns whether the key message matches this binding.
    ///
    /// Always `false` while the binding is disabled.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if self.disabled {
            return false;
        }
        self.keys
            .iter()
            .any(|k| k.code == msg.key && k.mods == msg.modifiers)
    }
}

/// An option for [`new_binding`].
pub enum BindingOption {
    /// Adds key presses to the binding.
    WithKeys(Vec<KeyPress>),
    /// Sets the help entry (key label, description).
    WithHelp(String, String),
    /// Creates the binding disabled.
    WithDisabled,
}

impl BindingOption {
    fn apply(self, b: &mut Binding) {
        match self {
            BindingOption::WithKeys(mut keys) => b.keys.append(&mut keys),
            BindingOption::WithHelp(key, desc) => b.help = Help { key, desc },
            BindingOption::WithDisabled => b.disabled = true,
        }
    }
}

/// Creates a binding from a list of options.
pub fn new_binding(opts: Vec<BindingOption>) -> Binding {
    let mut b = Binding::default();
    for opt in opts {
        opt.apply(&mut b);
    }
    b
}

/// Option adding the given key presses to a binding.
pub fn with_keys<K: Into<KeyPress>>(keys: Vec<K>) -> BindingOption {
    BindingOption::WithKeys(keys.into_iter().map(Into::into).collect())
}

/// Option adding key presses parsed from string descriptions.
///
/// Accepts single characters (`"s"`), named keys (`"enter"`, `"space"`,
/// `"esc"`, `"tab"`, `"backspace"`, `"up"`, `"down"`, `"left"`, `"right"`),
/// and `ctrl+`/`alt+` prefixed combinations (`"ctrl+c"`). Unparseable
/// descriptions are skipped.
pub fn with_keys_str(keys: &[&str]) -> BindingOption {
    BindingOption::WithKeys(keys.iter().filter_map(|s| parse_key(s)).collect())
}

/// Option setting the help entry of a binding.
pub fn with_help(key: &str, desc: &str) -> BindingOption {
    BindingOption::WithHelp(key.to_string(), desc.to_string())
}

/// Option creating the binding disabled.
pub fn with_disabled() -> BindingOption {
    BindingOption::WithDisabled
}

/// Returns whether the key message matches the binding.
pub fn matches_binding(msg: &KeyMsg, binding: &Binding) -> bool {
    binding.matches(msg)
}

fn parse_key(desc: &str) -> Option<KeyPress> {
    let mut mods = KeyModifiers::NONE;
    let mut rest = desc;
    loop {
        if let Some(r) = rest.strip_prefix("ctrl+") {
            mods |= KeyModifiers::CONTROL;
            rest = r;
        } else if let Some(r) = rest.strip_prefix("alt+") {
            mods |= KeyModifiers::ALT;
            rest = r;
        } else if let Some(r) = rest.strip_prefix("shift+") {
            mods |= KeyModifiers::SHIFT;
            rest = r;
        } else {
            break;
        }
    }

    let code = match rest {
        "enter" => KeyCode::Enter,
        "space" => KeyCode::Char(' '),
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        s if s.chars().count() == 1 => KeyCode::Char(s.chars().next()?),
        _ => return None,
    };

    Some(KeyPress { code, mods })
}
