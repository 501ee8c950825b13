use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static CDATA: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").unwrap());
// A trailing unclosed `<...` is dropped too
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>?").unwrap());
static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Replace `<![CDATA[...]]>` sections with their raw content
pub fn unwrap_cdata(text: &str) -> String {
    CDATA.replace_all(text, "$1").into_owned()
}

pub fn strip_tags(text: &str) -> String {
    TAG.replace_all(text, "").into_owned()
}

/// Decode the handful of entities feeds use in practice, plus numeric references.
/// Unknown named entities are left untouched. Decoding is single pass, so `&amp;lt;`
/// becomes `&lt;`.
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            let decoded = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => decode_numeric(name),
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

fn decode_numeric(reference: &str) -> Option<char> {
    let code = if let Some(hex) = reference
        .strip_prefix("#x")
        .or_else(|| reference.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        reference.strip_prefix('#')?.parse().ok()?
    };
    match code {
        // non-breaking space
        160 => Some(' '),
        _ => char::from_u32(code),
    }
}

/// Clean a title: unwrap CDATA, decode entities, trim
pub fn clean_title(raw: &str) -> String {
    decode_entities(&unwrap_cdata(raw)).trim().to_string()
}

/// Clean a description into plain text. Markup escaped as entities (common in Atom
/// `type="html"` summaries) is stripped after decoding as well.
pub fn clean_description(raw: &str) -> String {
    let text = strip_tags(&unwrap_cdata(raw));
    let text = strip_tags(&decode_entities(&text));
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}
