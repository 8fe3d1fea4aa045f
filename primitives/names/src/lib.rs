#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Go identifier rules shared by the descriptor resolver and the generators.
//!
//! Everything here is a pure string transform: camel-casing proto names into
//! exported Go names, folding exported names into their unexported form, and
//! deriving a usable package name from an import path.

use std::sync::OnceLock;

use regex::Regex;

/// Go reserved keywords; a package name equal to one of these gets a `_` prefix.
const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Convert a proto name into an exported Go identifier.
///
/// Follows the protobuf-go convention: `_x` and `.x` boundaries start a new
/// capitalised word, a leading `_` becomes `X`, and any other `.` becomes `_`
/// (so nested message `Outer.Inner` maps to `Outer_Inner`).
///
/// # Examples
/// ```
/// use grpcgen_names::go_camel_case;
/// assert_eq!(go_camel_case("say_hello"), "SayHello");
/// assert_eq!(go_camel_case("Outer.Inner"), "Outer_Inner");
/// assert_eq!(go_camel_case("_private"), "XPrivate");
/// ```
pub fn go_camel_case(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        let next_is_lower = bytes.get(i + 1).is_some_and(u8::is_ascii_lowercase);
        if c == b'.' && next_is_lower {
            // dropped; the following word is capitalised below
        } else if c == b'.' {
            out.push('_');
        } else if c == b'_' && (i == 0 || bytes[i - 1] == b'.') {
            out.push('X');
        } else if c == b'_' && next_is_lower {
            // dropped
        } else if c.is_ascii_digit() {
            out.push(c as char);
        } else {
            out.push(c.to_ascii_uppercase() as char);
            while bytes.get(i + 1).is_some_and(u8::is_ascii_lowercase) {
                i += 1;
                out.push(bytes[i] as char);
            }
        }
        i += 1;
    }
    out
}

/// Fold the first character of an exported identifier to lowercase.
///
/// # Examples
/// ```
/// use grpcgen_names::unexport;
/// assert_eq!(unexport("GreeterClient"), "greeterClient");
/// assert_eq!(unexport("SayHello"), "sayHello");
/// ```
pub fn unexport(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Fold the first character of an identifier to uppercase; inverse of [`unexport`]
/// for identifiers that start with an ASCII letter.
pub fn export(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Whether `s` is a Go keyword
pub fn is_go_keyword(s: &str) -> bool { GO_KEYWORDS.contains(&s) }

// constant pattern, checked by test_invalid_ident_chars_pattern
#[allow(clippy::expect_used)]
fn invalid_ident_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\p{L}\p{Nd}]").expect("identifier regex is valid"))
}

/// Sanitize an arbitrary string into a valid Go identifier.
///
/// Characters outside the Unicode letter and decimal digit classes become `_`,
/// and a `_` is prepended when the result is a keyword or does not start with a letter.
pub fn go_sanitized(s: &str) -> String {
    let mapped = invalid_ident_chars().replace_all(s, "_").into_owned();
    let starts_with_letter = mapped.chars().next().is_some_and(char::is_alphabetic);
    if is_go_keyword(&mapped) || !starts_with_letter {
        format!("_{}", mapped)
    } else {
        mapped
    }
}

/// Last element of a slash-separated path
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Default Go package name for an import path: the sanitized last path element.
///
/// # Examples
/// ```
/// use grpcgen_names::package_name_for_import_path;
/// assert_eq!(package_name_for_import_path("google.golang.org/grpc"), "grpc");
/// assert_eq!(package_name_for_import_path("example.com/hello-world"), "hello_world");
/// ```
pub fn package_name_for_import_path(import_path: &str) -> String {
    go_sanitized(base_name(import_path))
}
