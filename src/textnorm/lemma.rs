//! Rule-based lemmatizer.
//!
//! Default-mode WordNet lemmatization is essentially de-pluralization, so a
//! small suffix-rewrite table covers the answer-sheet vocabulary this system
//! sees. Irregular forms that matter for short factual answers are handled
//! explicitly; everything else falls through the suffix rules.

/// Irregular plural -> singular forms worth special-casing.
const IRREGULARS: &[(&str, &str)] = &[
    ("children", "child"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("men", "man"),
    ("mice", "mouse"),
    ("people", "person"),
    ("teeth", "tooth"),
    ("women", "woman"),
];

/// Reduces `token` to a base form.
///
/// Rules are ordered most-specific first. Tokens of three characters or fewer
/// are returned untouched; stripping them produces more noise than signal
/// ("gas", "bus", "its").
pub fn lemmatize(token: &str) -> String {
    if let Some((_, singular)) = IRREGULARS.iter().find(|(plural, _)| *plural == token) {
        return (*singular).to_string();
    }

    if token.len() <= 3 {
        return token.to_string();
    }

    if let Some(stem) = token.strip_suffix("ies")
        && stem.len() >= 2
    {
        return format!("{stem}y");
    }

    for suffix in ["sses", "shes", "ches", "xes", "zes"] {
        if let Some(stem) = token.strip_suffix("es")
            && token.ends_with(suffix)
        {
            return stem.to_string();
        }
    }

    // Plain plural, but leave "-ss" and "-us" words alone (glass, radius).
    if let Some(stem) = token.strip_suffix('s')
        && !token.ends_with("ss")
        && !token.ends_with("us")
        && !token.ends_with("is")
    {
        return stem.to_string();
    }

    token.to_string()
}
