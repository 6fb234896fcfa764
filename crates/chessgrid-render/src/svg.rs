//! Small SVG string helpers shared by the board renderer and the page template.

use std::fmt;

/// Formats a coordinate with at most three decimals, no trailing zeros and no `-0`.
pub fn num(v: f64) -> Num {
    Num(v)
}

#[derive(Debug, Clone, Copy)]
pub struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if !v.is_finite() {
            return f.write_str("0");
        }
        let k = (v * 1000.0).round() as i64;
        if k == 0 {
            return f.write_str("0");
        }
        let sign = if k < 0 { "-" } else { "" };
        let k = k.unsigned_abs();
        let (int, frac) = (k / 1000, k % 1000);
        if frac == 0 {
            return write!(f, "{sign}{int}");
        }
        let frac = format!("{frac:03}");
        write!(f, "{sign}{int}.{}", frac.trim_end_matches('0'))
    }
}

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_xml(text: &str) -> EscapeXml<'_> {
    EscapeXml(text)
}

pub struct EscapeXml<'a>(&'a str);

impl fmt::Display for EscapeXml<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0;
        let mut start = 0usize;
        for (i, b) in text.bytes().enumerate() {
            let esc = match b {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                b'\'' => "&#39;",
                _ => continue,
            };
            if start < i {
                f.write_str(&text[start..i])?;
            }
            f.write_str(esc)?;
            start = i + 1;
        }
        if start < text.len() {
            f.write_str(&text[start..])?;
        }
        Ok(())
    }
}

/// Opens a standalone SVG document with a `width x height` canvas.
pub fn document_open(width: f64, height: f64) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(width),
        h = num(height)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(num(12.0).to_string(), "12");
        assert_eq!(num(12.5).to_string(), "12.5");
        assert_eq!(num(0.1 + 0.2).to_string(), "0.3");
        assert_eq!(num(-0.0001).to_string(), "0");
        assert_eq!(num(-3.125).to_string(), "-3.125");
        assert_eq!(num(-0.25).to_string(), "-0.25");
        assert_eq!(num(f64::NAN).to_string(), "0");
    }

    #[test]
    fn markup_is_escaped() {
        assert_eq!(
            escape_xml(r#"Tal's <"brilliant"> & quiet"#).to_string(),
            "Tal&#39;s &lt;&quot;brilliant&quot;&gt; &amp; quiet"
        );
        assert_eq!(escape_xml("Kf7+").to_string(), "Kf7+");
    }
}
