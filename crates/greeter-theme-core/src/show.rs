//! Show predicates: when an item takes part in layout.

/// The kind of display session the greeter runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayMode {
    /// Local console, fixed server.
    #[default]
    ConsoleFixed,
    /// Local console, flexible (on-demand) server.
    ConsoleFlexi,
    /// Remote flexible server (e.g. Xnest).
    RemoteFlexi,
    /// Remote XDMCP display.
    Remote,
}

impl DisplayMode {
    fn bit(self) -> u8 {
        match self {
            DisplayMode::ConsoleFixed => 1 << 0,
            DisplayMode::ConsoleFlexi => 1 << 1,
            DisplayMode::RemoteFlexi => 1 << 2,
            DisplayMode::Remote => 1 << 3,
        }
    }

    /// Parse a mode name as given on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        let mode = match name {
            "console-fixed" | "console" => DisplayMode::ConsoleFixed,
            "console-flexi" => DisplayMode::ConsoleFlexi,
            "remote-flexi" => DisplayMode::RemoteFlexi,
            "remote" => DisplayMode::Remote,
            _ => return None,
        };
        Some(mode)
    }
}

/// Set of display modes an item is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShowModes(u8);

impl ShowModes {
    pub const NOWHERE: Self = Self(0);
    pub const EVERYWHERE: Self = Self(0b1111);

    /// Modes selected by a single theme keyword, or `None` if unknown.
    pub fn from_name(name: &str) -> Option<Self> {
        use DisplayMode::*;
        let modes = match name {
            "console" => Self::of(&[ConsoleFixed, ConsoleFlexi]),
            "console-fixed" => Self::of(&[ConsoleFixed]),
            "console-flexi" => Self::of(&[ConsoleFlexi]),
            "flexi" => Self::of(&[ConsoleFlexi, RemoteFlexi]),
            "remote-flexi" => Self::of(&[RemoteFlexi]),
            "remote" => Self::of(&[Remote, RemoteFlexi]),
            "everywhere" => Self::EVERYWHERE,
            "nowhere" => Self::NOWHERE,
            _ => return None,
        };
        Some(modes)
    }

    pub fn of(modes: &[DisplayMode]) -> Self {
        Self(modes.iter().fold(0, |acc, m| acc | m.bit()))
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn contains(self, mode: DisplayMode) -> bool {
        self.0 & mode.bit() != 0
    }
}

impl Default for ShowModes {
    fn default() -> Self {
        Self::EVERYWHERE
    }
}

/// Conditions under which an item is shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShowPredicate {
    pub modes: ShowModes,
    /// Feature category (`halt`, `config`, `timed`, ...).
    pub category: Option<String>,
    pub min_screen_width: i32,
    pub min_screen_height: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_keywords() {
        let console = ShowModes::from_name("console").unwrap();
        assert!(console.contains(DisplayMode::ConsoleFixed));
        assert!(console.contains(DisplayMode::ConsoleFlexi));
        assert!(!console.contains(DisplayMode::Remote));

        let flexi = ShowModes::from_name("flexi").unwrap();
        assert!(flexi.contains(DisplayMode::RemoteFlexi));
        assert!(!flexi.contains(DisplayMode::ConsoleFixed));

        assert!(ShowModes::from_name("sideways").is_none());
    }

    #[test]
    fn test_everywhere_and_nowhere() {
        for mode in [
            DisplayMode::ConsoleFixed,
            DisplayMode::ConsoleFlexi,
            DisplayMode::RemoteFlexi,
            DisplayMode::Remote,
        ] {
            assert!(ShowModes::EVERYWHERE.contains(mode));
            assert!(!ShowModes::NOWHERE.contains(mode));
        }
    }
}
