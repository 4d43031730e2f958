//! Repair of common text-encoding artifacts.
//!
//! Scraped captions regularly contain mojibake (UTF-8 that was decoded as
//! Windows-1252 and re-encoded), typographic ligatures, full-width forms,
//! curly quotes and stray control characters. Each is mapped back to the
//! plain form a tokenizer vocabulary was trained on.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Windows-1252 characters for bytes 0x80..=0x9F. Bytes that Windows-1252
/// leaves undefined decode to the C1 control with the same value.
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{81}', '\u{201A}', '\u{192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{2C6}', '\u{2030}', '\u{160}', '\u{2039}', '\u{152}', '\u{8D}', '\u{17D}', '\u{8F}',
    '\u{90}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{2DC}', '\u{2122}', '\u{161}', '\u{203A}', '\u{153}', '\u{9D}', '\u{17E}', '\u{178}',
];

/// Byte that `ch` would have been decoded from under Windows-1252 (falling
/// back to Latin-1 for the C1 range).
fn cp1252_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    if code < 0x80 || (0xA0..=0xFF).contains(&code) {
        return Some(code as u8);
    }
    if let Some(pos) = CP1252_HIGH.iter().position(|&c| c == ch) {
        return Some(0x80 + pos as u8);
    }
    if (0x80..=0x9F).contains(&code) {
        return Some(code as u8);
    }
    None
}

/// Length of the UTF-8 sequence introduced by `lead`, if it is a lead byte.
fn utf8_sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Replace every complete UTF-8 sequence in `bytes` by the character it
/// encodes; characters that do not start one are kept as they are.
fn decode_run(out: &mut String, run: &[char], bytes: &[u8]) {
    let mut i = 0;
    while i < run.len() {
        let decoded = utf8_sequence_len(bytes[i])
            .filter(|&len| i + len <= bytes.len())
            .and_then(|len| std::str::from_utf8(&bytes[i..i + len]).ok().map(|s| (s, len)));

        match decoded {
            Some((s, len)) => {
                out.push_str(s);
                i += len;
            }
            None => {
                out.push(run[i]);
                i += 1;
            }
        }
    }
}

/// Re-decode UTF-8 that was misread as Windows-1252.
///
/// Mojibake never contains ASCII, so candidates are maximal runs of non-ASCII
/// Windows-1252 characters. Within a run each complete UTF-8 sequence is
/// decoded on its own, so correctly encoded text next to mojibake is kept.
pub fn fix_mojibake(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run: Vec<char> = Vec::new();
    let mut run_bytes = Vec::new();

    for ch in text.chars() {
        match cp1252_byte(ch).filter(|b| !b.is_ascii()) {
            Some(byte) => {
                run.push(ch);
                run_bytes.push(byte);
            }
            None => {
                decode_run(&mut out, &run, &run_bytes);
                run.clear();
                run_bytes.clear();
                out.push(ch);
            }
        }
    }
    decode_run(&mut out, &run, &run_bytes);

    out
}

/// Expand Latin ligatures into their component letters.
pub fn fix_latin_ligatures(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{FB00}' => out.push_str("ff"),
            '\u{FB01}' => out.push_str("fi"),
            '\u{FB02}' => out.push_str("fl"),
            '\u{FB03}' => out.push_str("ffi"),
            '\u{FB04}' => out.push_str("ffl"),
            '\u{FB05}' | '\u{FB06}' => out.push_str("st"),
            '\u{0132}' => out.push_str("IJ"),
            '\u{0133}' => out.push_str("ij"),
            _ => out.push(ch),
        }
    }
    out
}

/// Fold full-width ASCII forms and the ideographic space to ASCII.
pub fn fix_character_width(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{3000}' => ' ',
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(ch as u32 - 0xFEE0).unwrap_or(ch),
            _ => ch,
        })
        .collect()
}

/// Replace curly quotes with straight ones.
pub fn uncurl_quotes(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => '"',
            _ => ch,
        })
        .collect()
}

/// Normalize every line-break convention to `\n`.
pub fn fix_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n")
        .chars()
        .map(|ch| match ch {
            '\r' | '\u{2028}' | '\u{2029}' | '\u{0085}' => '\n',
            _ => ch,
        })
        .collect()
}

fn is_removable_control(ch: char) -> bool {
    matches!(
        ch,
        '\u{00}'..='\u{08}'
            | '\u{0B}'
            | '\u{0E}'..='\u{1F}'
            | '\u{7F}'
            | '\u{206A}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFC}'
    )
}

/// Drop control and invisible formatting characters. Tabs, newlines and form
/// feeds are kept.
pub fn remove_control_chars(text: &str) -> String {
    text.chars().filter(|&ch| !is_removable_control(ch)).collect()
}

/// Strip ANSI terminal escape sequences.
pub fn remove_terminal_escapes(text: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("terminal escape pattern is valid")
    });
    re.replace_all(text, "").into_owned()
}

/// Text repair pipeline.
#[derive(Debug, Clone, Copy)]
pub struct TextRepair {
    enabled: bool,
}

impl TextRepair {
    /// Create a repair stage.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// A repair stage that leaves text untouched.
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Check if repair is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Run every repair step in order and compose the result to NFC.
    pub fn fix_text(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }

        // Text containing '<' is likely markup; entities are left alone here.
        let text = if text.contains('<') {
            text.to_string()
        } else {
            htmlize::unescape(text).into_owned()
        };
        let text = remove_terminal_escapes(&text);
        let text = fix_mojibake(&text);
        let text = fix_latin_ligatures(&text);
        let text = fix_character_width(&text);
        let text = uncurl_quotes(&text);
        let text = fix_line_breaks(&text);
        let text = remove_control_chars(&text);
        text.nfc().collect()
    }
}

impl Default for TextRepair {
    fn default() -> Self {
        Self::new(true)
    }
}
