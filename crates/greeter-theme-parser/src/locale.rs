//! Locale preference lists and translated text selection.

/// Expand a POSIX locale name (`lang_TERRITORY.codeset@modifier`) into the
/// ordered list of names a translation may be tagged with, most specific
/// first. `C` is always last.
pub fn locale_preferences(locale: &str) -> Vec<String> {
    let mut out = Vec::new();
    push_variants(locale, &mut out);
    push_unique(&mut out, "C".to_string());
    out
}

/// Build a preference list from several locale names in priority order.
pub fn preferences_for<'a>(locales: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out = Vec::new();
    for locale in locales {
        push_variants(locale, &mut out);
    }
    push_unique(&mut out, "C".to_string());
    out
}

fn push_unique(out: &mut Vec<String>, name: String) {
    if !out.contains(&name) {
        out.push(name);
    }
}

fn push_variants(locale: &str, out: &mut Vec<String>) {
    let locale = locale.trim();
    if locale.is_empty() {
        return;
    }

    let (rest, modifier) = match locale.split_once('@') {
        Some((rest, m)) => (rest, Some(m)),
        None => (locale, None),
    };
    let (rest, codeset) = match rest.split_once('.') {
        Some((rest, c)) => (rest, Some(c)),
        None => (rest, None),
    };
    let (language, territory) = match rest.split_once('_') {
        Some((l, t)) => (l, Some(t)),
        None => (rest, None),
    };

    const CODESET: u8 = 1 << 0;
    const TERRITORY: u8 = 1 << 1;
    const MODIFIER: u8 = 1 << 2;

    let present = codeset.map_or(0, |_| CODESET)
        | territory.map_or(0, |_| TERRITORY)
        | modifier.map_or(0, |_| MODIFIER);

    for mask in (0..=present).rev() {
        if mask & !present != 0 {
            continue;
        }
        let mut name = language.to_string();
        if let Some(t) = territory.filter(|_| mask & TERRITORY != 0) {
            name.push('_');
            name.push_str(t);
        }
        if let Some(c) = codeset.filter(|_| mask & CODESET != 0) {
            name.push('.');
            name.push_str(c);
        }
        if let Some(m) = modifier.filter(|_| mask & MODIFIER != 0) {
            name.push('@');
            name.push_str(m);
        }
        push_unique(out, name);
    }
}

/// Score of a candidate tagged `lang`: its position in the preference list
/// (lower is better). Untagged candidates score just past every real
/// locale; tags that match nothing are rejected.
pub fn locale_score(lang: Option<&str>, locales: &[String]) -> Option<usize> {
    match lang {
        None => Some(locales.len()),
        Some(lang) => locales.iter().position(|l| l == lang),
    }
}

/// Pick the best-scoring text among `(lang, text)` candidates. Ties go to
/// the first candidate.
pub fn select_translation<'a, I>(candidates: I, locales: &[String]) -> Option<&'a str>
where
    I: IntoIterator<Item = (Option<&'a str>, &'a str)>,
{
    candidates
        .into_iter()
        .filter_map(|(lang, text)| locale_score(lang, locales).map(|score| (score, text)))
        .fold(None, |best: Option<(usize, &'a str)>, (score, text)| match best {
            Some((best_score, _)) if best_score <= score => best,
            _ => Some((score, text)),
        })
        .map(|(_, text)| text)
}
