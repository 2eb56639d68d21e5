//! Layout and text flow for greeter themes.
//!
//! This crate turns a parsed [`ItemTree`](greeter_theme_core::ItemTree)
//! into absolute rectangles for a given surface and emits a draw list.
//!
//! # Architecture
//!
//! 1. **Visibility**: show predicates against display mode, surface size and
//!    enabled greeter features
//! 2. **Text flow**: escape expansion, markup-aware wrapping through a
//!    pluggable [`TextMeasure`]
//! 3. **Geometry**: anchored and box placement in one top-down pass
//! 4. **Emission**: per-item draw commands in paint order
//!
//! # Example
//!
//! ```ignore
//! use greeter_theme_layout::{emit, resolve, DrawList, MonospaceMeasure, ResolveOptions, RuntimeContext};
//!
//! let mut tree = greeter_theme_parser::parse_file(path, &Default::default())?;
//! let oracle = MonospaceMeasure::default();
//! resolve(&mut tree, 1024, 768, &oracle, &RuntimeContext::default(), &ResolveOptions::default());
//!
//! let mut list = DrawList::default();
//! emit(&tree, &oracle, &ResolveOptions::default(), &mut list);
//! print!("{list}");
//! ```

mod box_layout;
mod compute;
mod expand;
mod markup;
mod measure;
mod render;
mod text;
mod visibility;

pub use box_layout::{distribute, natural_size, BoxChild};
pub use compute::{button_at, hit_test, resolve, set_text, ResolveOptions};
pub use expand::{expand_text, ExpansionContext};
pub use markup::{is_well_formed, visible_text};
pub use measure::{point_size, MonospaceMeasure, TextMeasure};
pub use render::{emit, DrawCommand, DrawList, Emitter, RenderSink};
pub use text::{wrap, WrappedBlock};
pub use visibility::{is_visible, FeatureFlags, RuntimeContext};
