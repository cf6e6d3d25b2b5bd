//! Lexer for SVG path data.

/// One lexical element of path data.
///
/// ## Rust Lesson #10: Enums (Sum Types)
///
/// A path string mixes letters and numbers. In JS you'd get an array of
/// `string | number`; here each token says which one it is, and the
/// compiler makes the parser handle both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Command(char),
    Number(f64),
}

/// Split path data into command and number tokens.
///
/// Whitespace (space, tab, CR, LF) and commas separate tokens. Any other
/// unexpected character, or a number too large for an `f64`, returns an
/// empty list: the path is treated as having nothing to draw.
pub fn tokenize(d: &str) -> Vec<Token> {
    let bytes = d.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        if is_command(c) {
            tokens.push(Token::Command(c as char));
            pos += 1;
        } else if is_separator(c) {
            pos += 1;
        } else if let Some(end) = scan_number(bytes, pos) {
            // The scanned slice only holds ASCII sign/digit/dot/exponent bytes
            match d[pos..end].parse::<f64>() {
                Ok(value) if value.is_finite() => tokens.push(Token::Number(value)),
                _ => {
                    log::debug!("number {:?} out of range in path data", &d[pos..end]);
                    return Vec::new();
                }
            }
            pos = end;
        } else {
            log::debug!("unrecognized character {:?} at byte {} in path data", c as char, pos);
            return Vec::new();
        }
    }

    tokens
}

#[inline]
fn is_command(c: u8) -> bool {
    matches!(
        c,
        b'M' | b'm' | b'L' | b'l' | b'H' | b'h' | b'V' | b'v' | b'C' | b'c'
            | b'S' | b's' | b'Q' | b'q' | b'T' | b't' | b'A' | b'a' | b'Z' | b'z'
    )
}

#[inline]
fn is_separator(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | b',')
}

/// Scan `[-+]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][-+]?[0-9]+)?` starting at
/// `start`, returning the end offset of the longest match.
fn scan_number(bytes: &[u8], start: usize) -> Option<usize> {
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut pos = start;
    if matches!(bytes.get(pos), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_end = digits_from(pos);
    if int_end > pos {
        pos = int_end;
        if bytes.get(pos) == Some(&b'.') {
            pos = digits_from(pos + 1);
        }
    } else if bytes.get(pos) == Some(&b'.') {
        let frac_end = digits_from(pos + 1);
        if frac_end == pos + 1 {
            return None;
        }
        pos = frac_end;
    } else {
        return None;
    }

    // Exponent only counts when at least one digit follows
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            pos = exp_end;
        }
    }

    Some(pos)
}
