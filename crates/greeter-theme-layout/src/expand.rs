//! Greeter escapes in label text (`%h`, `%n`, ...).

/// Values substituted into label text before measurement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpansionContext {
    /// `%h`
    pub hostname: String,
    /// `%n`
    pub nodename: String,
    /// `%d`
    pub display: String,
    /// `%s`
    pub sysname: String,
    /// `%r`
    pub release: String,
    /// `%m`
    pub machine: String,
    /// `%u`
    pub timed_user: String,
    /// `%t`, in seconds
    pub timed_delay: i64,
}

impl ExpansionContext {
    /// Fill what the process environment knows: `HOSTNAME`, `DISPLAY` and
    /// the build target's OS and architecture.
    pub fn from_env() -> Self {
        let hostname = std::env::var("HOSTNAME").unwrap_or_default();
        Self {
            nodename: hostname.clone(),
            hostname,
            display: std::env::var("DISPLAY").unwrap_or_default(),
            sysname: std::env::consts::OS.to_string(),
            machine: std::env::consts::ARCH.to_string(),
            ..Self::default()
        }
    }
}

/// Replace greeter escapes in `text`. `%%` is a literal percent sign;
/// unknown escapes are kept as written. With `markup`, substituted values
/// are XML-escaped so they cannot break the surrounding tags.
pub fn expand_text(text: &str, ctx: &ExpansionContext, markup: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let push = |out: &mut String, value: &str| {
        if markup {
            out.push_str(&escape_xml(value));
        } else {
            out.push_str(value);
        }
    };
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('h') => push(&mut out, &ctx.hostname),
            Some('n') => push(&mut out, &ctx.nodename),
            Some('d') => push(&mut out, &ctx.display),
            Some('s') => push(&mut out, &ctx.sysname),
            Some('r') => push(&mut out, &ctx.release),
            Some('m') => push(&mut out, &ctx.machine),
            Some('u') => push(&mut out, &ctx.timed_user),
            Some('t') => out.push_str(&ctx.timed_delay.to_string()),
            Some('%') => out.push('%'),
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }
    out
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
