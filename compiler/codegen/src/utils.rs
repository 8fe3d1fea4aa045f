//! Small text helpers shared by the generators.

/// Quote `s` as a Go interpreted string literal, escaping the way `strconv.Quote` does.
///
/// # Examples
/// ```
/// use grpcgen_codegen::utils::go_quote;
/// assert_eq!(go_quote("helloworld.Greeter"), "\"helloworld.Greeter\"");
/// assert_eq!(go_quote("a\"b\\c"), "\"a\\\"b\\\\c\"");
/// ```
pub fn go_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\u{b}' => out.push_str("\\v"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Join parameter strings into a parenthesized list
pub fn param_list<S: AsRef<str>>(params: &[S]) -> String {
    let joined: Vec<&str> = params.iter().map(AsRef::as_ref).collect();
    format!("({})", joined.join(", "))
}
