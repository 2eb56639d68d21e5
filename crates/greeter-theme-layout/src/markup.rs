//! Inline markup: `<b>`, `<span foreground="...">` and friends inside label
//! text.

/// A piece of markup source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Character data, entities undecoded.
    Text(&'a str),
    Open { name: &'a str, raw: &'a str },
    Close { name: &'a str, raw: &'a str },
    /// Self-closing tags, comments and processing instructions.
    Empty { raw: &'a str },
}

impl<'a> Token<'a> {
    pub fn raw(&self) -> &'a str {
        match *self {
            Token::Text(raw) | Token::Open { raw, .. } | Token::Close { raw, .. } | Token::Empty { raw } => raw,
        }
    }
}

/// An opening tag still in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTag {
    pub name: String,
    pub raw: String,
}

fn wrapped_document(text: &str) -> String {
    format!("<markup>{text}</markup>")
}

/// Whether `text` is well-formed markup (balanced tags, valid entities).
pub fn is_well_formed(text: &str) -> bool {
    roxmltree::Document::parse(&wrapped_document(text)).is_ok()
}

/// The characters `text` displays: tags dropped, entities decoded. `None`
/// if the markup is malformed.
pub fn visible_text(text: &str) -> Option<String> {
    let source = wrapped_document(text);
    let doc = roxmltree::Document::parse(&source).ok()?;
    Some(
        doc.root_element()
            .descendants()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect(),
    )
}

/// Split markup into tags and character data. Meant for well-formed input;
/// an unterminated `<` is kept as text.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            tokens.push(Token::Text(rest));
            break;
        };
        if lt > 0 {
            tokens.push(Token::Text(&rest[..lt]));
            rest = &rest[lt..];
        }
        let Some(len) = tag_length(rest) else {
            tokens.push(Token::Text(rest));
            break;
        };
        let (raw, tail) = rest.split_at(len);
        tokens.push(classify(raw));
        rest = tail;
    }
    tokens
}

/// Byte length of the tag at the start of `s`, honoring quoted attribute
/// values.
fn tag_length(s: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in s.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i + 1),
            (None, _) => {}
        }
    }
    None
}

fn classify(raw: &str) -> Token<'_> {
    let inner = &raw[1..raw.len() - 1];
    if inner.starts_with('!') || inner.starts_with('?') || inner.ends_with('/') {
        return Token::Empty { raw };
    }
    match inner.strip_prefix('/') {
        Some(name) => Token::Close { name: name.trim(), raw },
        None => Token::Open {
            name: inner.split_whitespace().next().unwrap_or_default(),
            raw,
        },
    }
}

/// Update the stack of open tags with the tags in `raw`.
pub fn apply_tags(stack: &mut Vec<OpenTag>, raw: &str) {
    for token in tokenize(raw) {
        match token {
            Token::Open { name, raw } => stack.push(OpenTag {
                name: name.to_string(),
                raw: raw.to_string(),
            }),
            Token::Close { .. } => {
                stack.pop();
            }
            Token::Text(_) | Token::Empty { .. } => {}
        }
    }
}

/// Wrap `body` so that it is well-formed on its own: tags open before it are
/// re-opened in front, tags left open at its end are closed behind it.
pub fn balance(open_before: &[OpenTag], body: &str) -> String {
    let mut stack = open_before.to_vec();
    apply_tags(&mut stack, body);

    let mut out = String::with_capacity(body.len());
    for tag in open_before {
        out.push_str(&tag.raw);
    }
    out.push_str(body);
    for tag in stack.iter().rev() {
        out.push_str("</");
        out.push_str(&tag.name);
        out.push('>');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokens = tokenize(r#"Hi <span weight="bold" font_desc="a>b">there</span><br/>!"#);
        assert_eq!(
            tokens,
            vec![
                Token::Text("Hi "),
                Token::Open { name: "span", raw: r#"<span weight="bold" font_desc="a>b">"# },
                Token::Text("there"),
                Token::Close { name: "span", raw: "</span>" },
                Token::Empty { raw: "<br/>" },
                Token::Text("!"),
            ]
        );
    }

    #[test]
    fn test_unterminated_tag_is_text() {
        assert_eq!(tokenize("a <b"), vec![Token::Text("a "), Token::Text("<b")]);
    }

    #[test]
    fn test_well_formed() {
        assert!(is_well_formed("<b>bold</b> &amp; <i>italic</i>"));
        assert!(is_well_formed("plain"));
        assert!(!is_well_formed("<b>open"));
        assert!(!is_well_formed("AT&T"));
    }

    #[test]
    fn test_visible_text() {
        assert_eq!(visible_text("<b>a</b> &lt;b&gt;").as_deref(), Some("a <b>"));
        assert_eq!(visible_text("</i>"), None);
    }

    #[test]
    fn test_balance() {
        let open = vec![OpenTag { name: "b".into(), raw: "<b>".into() }];
        assert_eq!(balance(&open, "bold <i>both"), "<b>bold <i>both</i></b>");
        assert_eq!(balance(&open, "end</b> plain"), "<b>end</b> plain");
        assert_eq!(balance(&[], "plain"), "plain");
    }
}
