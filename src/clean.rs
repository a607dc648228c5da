//! Raw-text cleanup applied before any tokenization.
//!
//! `clean_text` strips markup, decodes escape artifacts, lowercases, and
//! collapses whitespace. It keeps the hard ngram boundary characters
//! (period, semicolon, comma, ...) intact so segmentation still works.
//! The function is idempotent: cleaning already-clean text is a no-op.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<[^<]+?>").expect("valid regex");
    static ref UNICODE_ESCAPE: Regex =
        Regex::new(r"\\u([0-9a-fA-F]{4})").expect("valid regex");
    static ref ENTITY: Regex =
        Regex::new(r"&(#x?[0-9a-fA-F]{1,6}|[a-zA-Z]{2,10});").expect("valid regex");
    static ref BREAK_DASH: Regex = Regex::new(r"\s+-\s*|\s*-\s+").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
}

/// Decode literal backslash escapes left over from serialized text, like
/// `é` sequences and literal `\n` / `\t` pairs.
fn handle_unicode_escapes(text: &str) -> String {
    let text = UNICODE_ESCAPE.replace_all(text, |caps: &Captures| {
        u32::from_str_radix(&caps[1], 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });
    text.replace("\\n", "\n").replace("\\t", "\t")
}

/// Decode HTML character entities, named and numeric. Unknown entities are
/// left untouched.
fn handle_html_unquote(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                return u32::from_str_radix(hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .map(String::from)
                    .unwrap_or_else(|| caps[0].to_string());
            }
            if let Some(dec) = body.strip_prefix('#') {
                return dec
                    .parse::<u32>()
                    .ok()
                    .and_then(char::from_u32)
                    .map(String::from)
                    .unwrap_or_else(|| caps[0].to_string());
            }
            match body {
                "amp" => "&".to_string(),
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                "quot" => "\"".to_string(),
                "apos" => "'".to_string(),
                "nbsp" => " ".to_string(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Replace the curly quotes some editors insert with their ASCII forms.
fn handle_mac_quotes(text: &str) -> String {
    text.replace('\u{201c}', "\"")
        .replace('\u{201d}', "\"")
        .replace('\u{2018}', "'")
        .replace('\u{2019}', "'")
}

/// Convert text-break dashes into semicolons so they act as ngram
/// boundaries.
///
/// `"She loved icecream - mint chip especially"` becomes
/// `"She loved icecream;mint chip especially"`, while hyphenated words like
/// `"27-year-old"` are untouched.
fn handle_text_break_dash(text: &str) -> String {
    BREAK_DASH.replace_all(text, ";").into_owned()
}

/// Strip text of non-useful characters: markup, escape artifacts, curly
/// quotes, break dashes. Lowercases and NFKC-normalizes the result and
/// collapses whitespace runs to single spaces.
pub fn clean_text(raw_text: &str) -> String {
    // HTML tags must be stripped before entity decoding.
    let text = TAG.replace_all(raw_text, "");
    let text = handle_unicode_escapes(&text);
    let text = handle_html_unquote(&text);
    let text = handle_mac_quotes(&text);
    let text = handle_text_break_dash(&text);
    let text: String = text.nfkc().collect::<String>().to_lowercase();
    let text = text.replace('&', " ");
    WHITESPACE.replace_all(&text, " ").into_owned()
}
