//! Text flow: greedy line wrapping against a pixel budget.
//!
//! Break opportunities come from the Unicode line breaking algorithm run over
//! the visible characters. Markup tags are zero-width atoms glued to a word:
//! opening tags to the word that follows, closing tags to the word before.

use glam::IVec2;
use unicode_linebreak::{linebreaks, BreakOpportunity};

use crate::markup::{self, OpenTag, Token};
use crate::measure::TextMeasure;

/// Wrapped text and the size of the whole block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WrappedBlock {
    pub width: i32,
    pub height: i32,
    /// Display lines. With markup each line is well-formed on its own.
    pub lines: Vec<String>,
}

impl WrappedBlock {
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }
}

/// A word plus its trailing whitespace and attached tags.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Unit {
    raw: String,
    /// A line must end after this unit.
    mandatory: bool,
}

/// Wrap `text` so that no line is wider than `max_width` pixels, unless a
/// single word is. `None` means no limit: only line feeds split the text.
pub fn wrap(
    text: &str,
    markup: bool,
    max_width: Option<i32>,
    font: Option<&str>,
    oracle: &dyn TextMeasure,
) -> WrappedBlock {
    let markup = markup && {
        let ok = markup::is_well_formed(text);
        if !ok {
            log::warn!("malformed markup, wrapping as plain text: {text:?}");
        }
        ok
    };
    let max_width = max_width.map(|w| w.max(0));
    let fits = |size: IVec2| max_width.map_or(true, |max| size.x <= max);

    let whole = oracle.measure(text, font, markup);
    if fits(whole) && !text.contains('\n') {
        return WrappedBlock {
            width: whole.x,
            height: whole.y,
            lines: vec![text.to_string()],
        };
    }

    let units = split_units(text, markup);
    let mut lines = Vec::new();
    let mut open: Vec<OpenTag> = Vec::new();
    let mut body = String::new();
    let finish = |body: &mut String, open: &mut Vec<OpenTag>, lines: &mut Vec<String>| {
        lines.push(render_line(open, body, markup));
        if markup {
            markup::apply_tags(open, body);
        }
        body.clear();
    };

    for unit in &units {
        if !body.is_empty() {
            let candidate = format!("{body}{}", unit.raw);
            let size = oracle.measure(&render_line(&open, &candidate, markup), font, markup);
            if !fits(size) {
                finish(&mut body, &mut open, &mut lines);
            }
        }
        body.push_str(&unit.raw);
        if unit.mandatory {
            finish(&mut body, &mut open, &mut lines);
        }
    }
    if !body.is_empty() || lines.is_empty() {
        finish(&mut body, &mut open, &mut lines);
    }

    let size = oracle.measure(&lines.join("\n"), font, markup);
    log::trace!("wrapped {} chars into {} lines, {}x{}", text.len(), lines.len(), size.x, size.y);
    WrappedBlock {
        width: size.x,
        height: size.y,
        lines,
    }
}

/// The display form of one line: trailing whitespace dropped and, for
/// markup, tags balanced.
fn render_line(open: &[OpenTag], body: &str, markup: bool) -> String {
    let body = body.trim_end();
    if markup {
        markup::balance(open, body)
    } else {
        body.to_string()
    }
}

/// Cut `text` into units at every break opportunity.
fn split_units(text: &str, markup: bool) -> Vec<Unit> {
    let tokens = if markup {
        markup::tokenize(text)
    } else {
        vec![Token::Text(text)]
    };

    let mut visible = String::with_capacity(text.len());
    let mut atoms: Vec<(usize, Token<'_>)> = Vec::new();
    for token in tokens {
        match token {
            Token::Text(s) => visible.push_str(s),
            other => atoms.push((visible.len(), other)),
        }
    }
    if visible.is_empty() {
        return vec![Unit {
            raw: text.to_string(),
            mandatory: false,
        }];
    }

    let breaks: Vec<(usize, BreakOpportunity)> = linebreaks(&visible).collect();
    let ends: Vec<usize> = breaks.iter().map(|(end, _)| *end).collect();
    let last = breaks.len() - 1;

    // Assign each atom a unit; document order must be kept.
    let mut owner = Vec::with_capacity(atoms.len());
    let mut floor = 0;
    for (pos, token) in &atoms {
        let unit = match token {
            Token::Close { .. } => ends.partition_point(|&end| end < *pos),
            _ => ends.partition_point(|&end| end <= *pos),
        };
        floor = unit.min(last).max(floor);
        owner.push(floor);
    }

    let mut atoms = atoms.iter().zip(owner).peekable();
    let mut start = 0;
    breaks
        .iter()
        .enumerate()
        .map(|(index, &(end, opportunity))| {
            let mut raw = String::new();
            let mut cursor = start;
            while let Some(((pos, token), _)) = atoms.next_if(|(_, unit)| *unit == index) {
                let at = (*pos).clamp(cursor, end);
                raw.push_str(&visible[cursor..at]);
                raw.push_str(token.raw());
                cursor = at;
            }
            raw.push_str(&visible[cursor..end]);
            start = end;
            Unit {
                raw,
                mandatory: opportunity == BreakOpportunity::Mandatory && index != last,
            }
        })
        .collect()
}
