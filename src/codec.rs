//! String and number codecs.
//!
//! Text-level helpers shared by the reader and the writers: JSON string
//! quoting with control-character escapes, and locale-independent number
//! formatting. The formatter always emits `.` as the decimal point
//! regardless of host locale, and maps non-finite reals to the spellings
//! the writers rely on (`null`, `1e+9999`, `-1e+9999`).

/// Quote and escape a byte-sequence string payload.
///
/// Bytes that need no escaping pass through unchanged, so non-UTF-8
/// payloads survive byte-for-byte. Control bytes below 0x20 (including
/// NUL) that have no named escape become `\u00XX`. Forward slash is never
/// escaped.
pub fn quote_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + 2);
    out.push(b'"');
    if bytes.iter().any(|&b| needs_escape(b)) {
        for &b in bytes {
            match b {
                b'"' => out.extend_from_slice(b"\\\""),
                b'\\' => out.extend_from_slice(b"\\\\"),
                0x08 => out.extend_from_slice(b"\\b"),
                0x0C => out.extend_from_slice(b"\\f"),
                b'\n' => out.extend_from_slice(b"\\n"),
                b'\r' => out.extend_from_slice(b"\\r"),
                b'\t' => out.extend_from_slice(b"\\t"),
                b if b < 0x20 => {
                    let mut buf = [0u8; 6];
                    write_u_escape(&mut buf, b);
                    out.extend_from_slice(&buf);
                }
                b => out.push(b),
            }
        }
    } else {
        out.extend_from_slice(bytes);
    }
    out.push(b'"');
    out
}

/// Quote and escape UTF-8 text.
pub fn quote_str(s: &str) -> String {
    // Escaping only inserts ASCII, so UTF-8 input stays UTF-8.
    String::from_utf8_lossy(&quote_bytes(s.as_bytes())).into_owned()
}

fn needs_escape(b: u8) -> bool {
    b < 0x20 || b == b'"' || b == b'\\'
}

fn write_u_escape(buf: &mut [u8; 6], b: u8) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    buf[0] = b'\\';
    buf[1] = b'u';
    buf[2] = b'0';
    buf[3] = b'0';
    buf[4] = HEX[usize::from(b >> 4)];
    buf[5] = HEX[usize::from(b & 0x0F)];
}

/// Base-10 rendering of a signed integer.
pub fn format_int(value: i64) -> String {
    value.to_string()
}

/// Base-10 rendering of an unsigned integer.
pub fn format_uint(value: u64) -> String {
    value.to_string()
}

/// Render a real with 17 significant digits, `%g` style: trailing zeros
/// trimmed, scientific notation when the decimal exponent falls below -4
/// or reaches 17. NaN renders as `null`, infinities as `1e+9999` /
/// `-1e+9999`. This is the writers' canonical formatting.
pub fn format_double(value: f64) -> String {
    format_double_with_precision(value, 17)
}

/// Render a real with the given number of significant digits, `%g`
/// style. The writers use 17 digits (see [`format_double`]); diagnostic
/// surfaces that compare against 16-digit expectations pass 16.
pub fn format_double_with_precision(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "null".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-1e+9999" } else { "1e+9999" }.to_string();
    }

    // `{:.*e}` is correctly rounded to the requested digit count, the
    // same digit stream printf's %g starts from.
    let precision = precision.max(1);
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exp_str) = match sci.split_once('e') {
        Some(parts) => parts,
        None => (sci.as_str(), "0"),
    };
    let exp: i32 = exp_str.parse().unwrap_or(0);

    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let mut digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    while digits.len() > 1 && digits.ends_with('0') {
        digits.pop();
    }

    let body = if (-4..precision as i32).contains(&exp) {
        format_fixed(&digits, exp)
    } else {
        format_scientific(&digits, exp)
    };
    format!("{sign}{body}")
}

fn format_fixed(digits: &str, exp: i32) -> String {
    if exp < 0 {
        let zeros = "0".repeat((-exp - 1) as usize);
        return format!("0.{zeros}{digits}");
    }
    let int_len = exp as usize + 1;
    if digits.len() <= int_len {
        let zeros = "0".repeat(int_len - digits.len());
        format!("{digits}{zeros}")
    } else {
        format!("{}.{}", &digits[..int_len], &digits[int_len..])
    }
}

fn format_scientific(digits: &str, exp: i32) -> String {
    let mantissa = if digits.len() == 1 {
        digits.to_string()
    } else {
        format!("{}.{}", &digits[..1], &digits[1..])
    };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
}
