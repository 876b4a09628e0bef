/// Escapes the five HTML-significant characters so server-supplied text can be
/// placed inside markup or a quoted attribute.
pub fn escape_for_display(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Derives up to two uppercase initials from a name or an email address.
///
/// For an email only the local part (before `@`) is used. The core is split on
/// whitespace, `.`, `_` and `-`:
/// - one fragment gives its first two characters ("ada" -> "AD")
/// - two or more give the first character of the first two ("Ada Lovelace" -> "AL")
pub fn initials_for(label: &str) -> String {
    let label = label.trim();
    if label.is_empty() {
        return String::new();
    }

    let core = match label.split_once('@') {
        Some((local, _)) => local,
        None => label,
    };
    let parts: Vec<&str> = core
        .split(|c: char| c.is_whitespace() || c == '.' || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect();

    let initials: String = match parts.as_slice() {
        [] => String::new(),
        [only] => only.chars().take(2).collect(),
        [first, second, ..] => first.chars().take(1).chain(second.chars().take(1)).collect(),
    };
    initials.to_uppercase()
}
