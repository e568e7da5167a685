//! Name inflection for state types.
//!
//! Symbolic state names are snake_case (`didnt_start`); state type names are
//! PascalCase identifiers (`DidntStart`). These helpers convert between the
//! two and render a type name as a readable phrase.

/// Convert a snake_case symbolic name into a PascalCase type identifier.
///
/// Underscores followed by an alphanumeric character are dropped and that
/// character is uppercased; every other character is lowercased.
///
/// # Example
///
/// ```rust
/// use pushdown::core::pascal_case;
///
/// assert_eq!(pascal_case("starting"), "Starting");
/// assert_eq!(pascal_case("didnt_start"), "DidntStart");
/// assert_eq!(pascal_case("HTTP_server"), "HttpServer");
/// ```
pub fn pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    let mut upper_next = true;

    while let Some(c) = chars.next() {
        if c == '_' && chars.peek().is_some_and(|next| next.is_alphanumeric()) {
            upper_next = true;
            continue;
        }

        if upper_next {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        upper_next = false;
    }

    out
}

/// Strip the module path and generic arguments from a Rust type name.
///
/// `my_app::engine::Starting` becomes `Starting`.
pub fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Render a PascalCase type name as a lowercase phrase.
///
/// # Example
///
/// ```rust
/// use pushdown::core::engine_phrase;
///
/// assert_eq!(engine_phrase("StartingUp"), "starting up");
/// assert_eq!(engine_phrase("HTTPServer"), "http server");
/// ```
pub fn engine_phrase(type_name: &str) -> String {
    let chars: Vec<char> = type_name.chars().collect();
    let mut out = String::with_capacity(type_name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower)
            {
                out.push(' ');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}
