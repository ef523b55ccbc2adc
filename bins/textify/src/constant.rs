//! Constant-name generation from literal strings.

/// Build an upper-case constant name from a cleaned value
///
/// Spaces become `_`. A `_` is inserted where the text switches into
/// upper case or into digits, but never at the start and never next to an
/// existing `_`.
pub fn constant_name(value: &str) -> String {
    let mut name = String::with_capacity(value.len() + 4);
    let mut prev: Option<char> = None;

    for c in value.chars().map(|c| if c == ' ' { '_' } else { c }) {
        let boundary = match prev {
            None | Some('_') => false,
            Some(_) if c == '_' => false,
            Some(p) => {
                (c.is_ascii_uppercase() && !p.is_ascii_uppercase())
                    || (c.is_ascii_digit() && !p.is_ascii_digit())
            }
        };
        if boundary {
            name.push('_');
        }
        name.extend(c.to_uppercase());
        prev = Some(c);
    }

    name
}

/// Turn one input line into a `NAME = 'value'` assignment
///
/// Surrounding whitespace and any quote characters are dropped from the
/// value. Blank lines yield `None`.
pub fn constantify(line: &str) -> Option<String> {
    let value: String = line.trim().chars().filter(|&c| c != '\'' && c != '"').collect();
    if value.is_empty() {
        return None;
    }
    Some(format!("{} = '{}'", constant_name(&value), value))
}
