// Keyslots Slot Content Escaping
// Keeps every slot on one line of the store

/// Separator between a slot id and its escaped content.
pub const SEPARATOR: char = '|';

/// Escape slot content for storage.
///
/// Newline, carriage return, backslash and the separator become
/// two-character sequences: `\n`, `\r`, `\\`, `\p`.
pub fn encode(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            SEPARATOR => out.push_str("\\p"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverse [`encode`].
///
/// A backslash that does not start a known sequence is kept as is, so
/// hand-edited stores never lose characters.
pub fn decode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let unescaped = match chars.peek() {
            Some('n') => '\n',
            Some('r') => '\r',
            Some('\\') => '\\',
            Some('p') => SEPARATOR,
            _ => {
                out.push('\\');
                continue;
            }
        };
        chars.next();
        out.push(unescaped);
    }
    out
}
