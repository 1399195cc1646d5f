use regex::Regex;
use std::sync::OnceLock;

fn tag_re() -> &'static Regex {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

fn whitespace_re() -> &'static Regex {
    static WS_RE: OnceLock<Regex> = OnceLock::new();
    WS_RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Reduce a rich-text (HTML) description body to plain text suitable for a
/// tracker event body: tags removed, common entities decoded, whitespace
/// runs collapsed, surrounding whitespace trimmed.
pub fn strip_markup(body: &str) -> String {
    let without_tags = tag_re().replace_all(body, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    whitespace_re()
        .replace_all(&decoded, " ")
        .trim()
        .to_string()
}
