//! Built-in label strings selected with `<stock type="..."/>`.

/// The fixed string for a stock label type, or `None` if the type is
/// unknown.
pub fn stock_label(kind: &str) -> Option<&'static str> {
    let text = match kind {
        "language" => "Language",
        "session" => "Session",
        "system" => "Actions",
        "disconnect" => "Disconnect",
        "quit" => "Quit",
        "halt" => "Shut Down",
        "reboot" => "Restart",
        "suspend" => "Suspend",
        "chooser" => "Remote Login via XDMCP",
        "config" => "Configure",
        "caps-lock-warning" => "You've got capslock on!",
        "timed-label" => "User %u will login in %t",
        "welcome-label" => "Welcome to %n",
        "username-label" => "Username:",
        "ok" => "OK",
        "cancel" => "Cancel",
        "startover" => "Start Over",
        _ => return None,
    };
    Some(text)
}
