//! Whether an item is shown in the current runtime context.

use greeter_theme_core::{ConfigAccessor, DisplayMode, ItemNode};

/// Greeter features that gate items by their show category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureFlags {
    pub system_menu: bool,
    pub config_available: bool,
    pub chooser_available: bool,
    pub halt_available: bool,
    pub reboot_available: bool,
    pub suspend_available: bool,
    pub timed_login: bool,
}

impl FeatureFlags {
    /// Every feature on.
    pub fn all() -> Self {
        Self {
            system_menu: true,
            config_available: true,
            chooser_available: true,
            halt_available: true,
            reboot_available: true,
            suspend_available: true,
            timed_login: true,
        }
    }

    /// Derive the flags from the greeter configuration. Power actions, the
    /// configurator and the chooser live in the system menu and need it
    /// enabled.
    pub fn from_config(config: &dyn ConfigAccessor) -> Self {
        let has_command = |key: &str| config.get_string(key).is_some_and(|c| !c.trim().is_empty());
        let system_menu = config.get_bool("greeter/SystemMenu").unwrap_or(true);
        let timed_user = config.get_string("daemon/TimedLogin").unwrap_or_default();

        let flags = Self {
            system_menu,
            config_available: system_menu && config.get_bool("greeter/ConfigAvailable").unwrap_or(true),
            chooser_available: system_menu
                && config.get_bool("greeter/ChooserButton").unwrap_or(true)
                && config.get_bool("xdmcp/Enable").unwrap_or(false),
            halt_available: system_menu && has_command("daemon/HaltCommand"),
            reboot_available: system_menu && has_command("daemon/RebootCommand"),
            suspend_available: system_menu && has_command("daemon/SuspendCommand"),
            timed_login: config.get_bool("daemon/TimedLoginEnable").unwrap_or(false)
                && !timed_user.trim().is_empty()
                && config.get_int("daemon/TimedLoginDelay").unwrap_or(0) >= 0,
        };
        log::debug!("feature flags: {flags:?}");
        flags
    }

    /// Whether items of a show category are allowed. Unknown categories
    /// always are.
    pub fn allows(&self, category: &str) -> bool {
        match category {
            "system" => self.system_menu,
            "config" => self.config_available,
            "chooser" => self.chooser_available,
            "halt" => self.halt_available,
            "reboot" => self.reboot_available,
            "suspend" => self.suspend_available,
            "timed" => self.timed_login,
            _ => true,
        }
    }
}

/// Facts about the running greeter that decide visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeContext {
    pub mode: DisplayMode,
    pub surface_width: i32,
    pub surface_height: i32,
    pub flags: FeatureFlags,
}

impl Default for RuntimeContext {
    fn default() -> Self {
        Self {
            mode: DisplayMode::default(),
            surface_width: 800,
            surface_height: 600,
            flags: FeatureFlags::all(),
        }
    }
}

impl RuntimeContext {
    pub fn new(mode: DisplayMode, surface_width: i32, surface_height: i32, flags: FeatureFlags) -> Self {
        Self {
            mode,
            surface_width,
            surface_height,
            flags,
        }
    }
}

/// Evaluate a node's show predicate. Ancestors are not consulted.
pub fn is_visible(node: &ItemNode, runtime: &RuntimeContext) -> bool {
    let show = &node.show;
    if !show.modes.contains(runtime.mode) {
        return false;
    }
    if runtime.surface_width < show.min_screen_width || runtime.surface_height < show.min_screen_height {
        return false;
    }
    show.category.as_deref().map_or(true, |category| runtime.flags.allows(category))
}
