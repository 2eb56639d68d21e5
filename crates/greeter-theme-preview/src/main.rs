//! Greeter theme preview.
//!
//! Loads a theme, resolves it for a surface and prints the draw list.
//!
//! # Usage
//!
//! ```bash
//! # A theme document
//! greeter-theme-preview themes/circles/circles.xml --width 1280 --height 1024
//!
//! # A theme by name from a themes directory, falling back to another
//! greeter-theme-preview themes --name circles --fallback happygnome --mode remote
//!
//! # Hover a button and print JSON
//! greeter-theme-preview themes --name circles --hover options --json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use greeter_theme_core::{DisplayMode, ItemTree, MapConfig, VisualState};
use greeter_theme_layout::{
    emit, resolve, set_text, DrawList, ExpansionContext, FeatureFlags, MonospaceMeasure, ResolveOptions,
    RuntimeContext,
};
use greeter_theme_parser::{load_with_fallback, parse_file, ParseOptions, ThemeLoad};

#[derive(Parser, Debug)]
#[command(name = "greeter-theme-preview")]
#[command(about = "Resolve a greeter theme and print its draw list")]
struct Args {
    /// Theme document, or a directory of themes when --name is given
    theme: PathBuf,

    /// Theme to load from the themes directory
    #[arg(long)]
    name: Option<String>,

    /// Theme to try when --name fails to load
    #[arg(long)]
    fallback: Option<String>,

    /// Surface width in pixels
    #[arg(long, default_value = "1024")]
    width: i32,

    /// Surface height in pixels
    #[arg(long, default_value = "768")]
    height: i32,

    /// Display mode: console, console-flexi, remote-flexi or remote
    #[arg(long, default_value = "console", value_parser = parse_mode)]
    mode: DisplayMode,

    /// Locale for translated text (defaults to the environment)
    #[arg(long)]
    locale: Option<String>,

    /// Configuration value as section/Key=value, repeatable
    #[arg(long = "config", value_name = "KEY=VALUE")]
    config: Vec<String>,

    /// Replace an item's text as id=text, repeatable
    #[arg(long = "set", value_name = "ID=TEXT")]
    texts: Vec<String>,

    /// Show a button in its prelight state
    #[arg(long)]
    hover: Option<String>,

    /// Character advance of the reference measurer
    #[arg(long, default_value = "8")]
    advance: i32,

    /// Line height of the reference measurer
    #[arg(long, default_value = "16")]
    line_height: i32,

    /// Print JSON instead of a listing
    #[arg(long)]
    json: bool,
}

fn parse_mode(name: &str) -> Result<DisplayMode, String> {
    DisplayMode::from_name(name).ok_or_else(|| format!("unknown display mode '{name}'"))
}

fn split_pair(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{pair}'"))
}

fn load(args: &Args, options: &ParseOptions) -> Result<ItemTree> {
    let Some(name) = &args.name else {
        return parse_file(&args.theme, options).with_context(|| format!("Failed to parse {}", args.theme.display()));
    };
    let fallback = args.fallback.as_deref().unwrap_or(name);
    match load_with_fallback(Path::new(&args.theme), name, fallback, options) {
        ThemeLoad::Themed {
            tree,
            theme,
            fallback_used,
        } => {
            if fallback_used {
                log::warn!("theme '{name}' failed to load, using '{theme}'");
            }
            Ok(tree)
        }
        ThemeLoad::Unthemed { errors } => {
            for (theme, error) in &errors {
                log::error!("theme '{theme}': {error}");
            }
            bail!("no theme could be loaded from {}", args.theme.display())
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let parse_options = match &args.locale {
        Some(locale) => ParseOptions::with_locales([locale.as_str()]),
        None => ParseOptions::from_env(),
    };
    let mut tree = load(&args, &parse_options)?;

    let mut config = MapConfig::new();
    for pair in &args.config {
        let (key, value) = split_pair(pair)?;
        config.set(key, value);
    }
    let flags = FeatureFlags::from_config(&config);
    let runtime = RuntimeContext::new(args.mode, args.width, args.height, flags);
    let mut options = ResolveOptions::from_config(&config);
    options.expansion = ExpansionContext {
        timed_user: options.expansion.timed_user.clone(),
        timed_delay: options.expansion.timed_delay,
        ..ExpansionContext::from_env()
    };

    for pair in &args.texts {
        let (id, text) = split_pair(pair)?;
        let node = tree
            .lookup_index(id)
            .with_context(|| format!("no item with id '{id}'"))?;
        if !set_text(&mut tree, node, text) {
            bail!("item '{id}' has no text");
        }
    }
    if let Some(id) = &args.hover {
        let node = tree
            .lookup_index(id)
            .with_context(|| format!("no item with id '{id}'"))?;
        tree.set_button_state(node, VisualState::Prelight);
    }

    let oracle = MonospaceMeasure::new(args.advance, args.line_height);
    resolve(&mut tree, args.width, args.height, &oracle, &runtime, &options);

    let mut list = DrawList::default();
    emit(&tree, &oracle, &options, &mut list);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        print!("{list}");
    }
    Ok(())
}
