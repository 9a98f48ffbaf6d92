//! Minimal inline markup used by html menu rows.
//!
//! Only a handful of inline tags are understood: `<b>`, `<strong>`, `<i>`,
//! `<em>`, `<u>`, `<a href="...">` and `<br>`. Unknown tags are dropped and
//! their text is kept. The named entities `&nbsp;`, `&amp;`, `&lt;`, `&gt;`,
//! `&quot;` and `&#39;` are decoded.

/// A run of text sharing the same inline formatting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Span {
    /// Decoded text of the run.
    pub text: String,
    /// Inside `<b>` or `<strong>`.
    pub bold: bool,
    /// Inside `<i>` or `<em>`.
    pub italic: bool,
    /// Inside `<u>` or an anchor.
    pub underline: bool,
    /// Inside an `<a>` element, with or without `href`.
    pub anchor: bool,
    /// Target of the enclosing `<a href>`, if any.
    pub link: Option<String>,
}

#[derive(Default)]
struct Format {
    bold: usize,
    italic: usize,
    underline: usize,
    links: Vec<Option<String>>,
}

impl Format {
    fn link(&self) -> Option<String> {
        self.links.iter().rev().find_map(|l| l.clone())
    }

    fn in_anchor(&self) -> bool {
        !self.links.is_empty()
    }
}

/// Split `markup` into formatted spans, in document order.
pub fn parse(markup: &str) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    let mut format = Format::default();
    let mut text = String::new();
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        text.push_str(&decode_entities(&rest[..open]));
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            // Unterminated tag, keep it as literal text
            text.push_str(&decode_entities(&rest[open..]));
            rest = "";
            break;
        };

        let tag = after[..close].trim();
        rest = &after[close + 1..];

        let closing = tag.starts_with('/');
        let body = tag.trim_start_matches('/').trim_end_matches('/').trim();
        let name = body
            .split(|c: char| c.is_whitespace())
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        if name == "br" {
            text.push('\n');
            continue;
        }

        if !matches!(name.as_str(), "b" | "strong" | "i" | "em" | "u" | "a") {
            continue;
        }

        flush(&mut spans, &mut text, &format);

        match (name.as_str(), closing) {
            ("b" | "strong", false) => format.bold += 1,
            ("b" | "strong", true) => format.bold = format.bold.saturating_sub(1),
            ("i" | "em", false) => format.italic += 1,
            ("i" | "em", true) => format.italic = format.italic.saturating_sub(1),
            ("u", false) => format.underline += 1,
            ("u", true) => format.underline = format.underline.saturating_sub(1),
            ("a", false) => format.links.push(attribute(body, "href")),
            ("a", true) => {
                format.links.pop();
            }
            _ => {}
        }
    }

    text.push_str(&decode_entities(rest));
    flush(&mut spans, &mut text, &format);
    spans
}

/// Text content of `markup` with every tag removed.
pub fn plain_text(markup: &str) -> String {
    parse(markup).into_iter().map(|span| span.text).collect()
}

/// Span holding the character at `index` of the concatenated span texts.
pub fn span_at(spans: &[Span], index: usize) -> Option<&Span> {
    let mut start = 0;
    for span in spans {
        let end = start + span.text.chars().count();
        if index < end {
            return Some(span);
        }
        start = end;
    }
    None
}

fn flush(spans: &mut Vec<Span>, text: &mut String, format: &Format) {
    if text.is_empty() {
        return;
    }
    spans.push(Span {
        text: std::mem::take(text),
        bold: format.bold > 0,
        italic: format.italic > 0,
        underline: format.underline > 0 || format.in_anchor(),
        anchor: format.in_anchor(),
        link: format.link(),
    });
}

fn attribute(tag_body: &str, name: &str) -> Option<String> {
    let lower = tag_body.to_ascii_lowercase();
    let start = lower.find(&format!("{name}="))? + name.len() + 1;
    let value = &tag_body[start..];

    let value = match value.chars().next()? {
        quote @ ('"' | '\'') => {
            let inner = &value[1..];
            &inner[..inner.find(quote).unwrap_or(inner.len())]
        }
        _ => value.split(char::is_whitespace).next().unwrap_or(""),
    };

    Some(decode_entities(value))
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];
        let entity = candidate
            .find(';')
            .map(|end| (&candidate[..=end], end + 1));

        let decoded = entity.and_then(|(name, len)| {
            let ch = match name {
                "&nbsp;" => '\u{a0}',
                "&amp;" => '&',
                "&lt;" => '<',
                "&gt;" => '>',
                "&quot;" => '"',
                "&#39;" | "&apos;" => '\'',
                _ => return None,
            };
            Some((ch, len))
        });

        match decoded {
            Some((ch, len)) => {
                out.push(ch);
                rest = &candidate[len..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_single_span() {
        let spans = parse("Copy");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Copy");
        assert!(!spans[0].bold);
    }

    #[test]
    fn test_bold_span() {
        let spans = parse("<b>Two</b>");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Two");
        assert!(spans[0].bold);
    }

    #[test]
    fn test_mixed_formatting() {
        let spans = parse("Open <em>recent</em> <STRONG>files</STRONG>");
        let texts: Vec<_> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Open ", "recent", " ", "files"]);
        assert!(spans[1].italic);
        assert!(spans[3].bold);
        assert!(!spans[2].bold && !spans[2].italic);
    }

    #[test]
    fn test_link_target() {
        let spans = parse(r#"See <a href="https://example.com/docs">docs</a>"#);
        assert_eq!(spans[1].link.as_deref(), Some("https://example.com/docs"));
        assert!(spans[1].underline);
        assert!(spans[1].anchor);
        assert!(!spans[0].anchor);

        let spans = parse("<a href='/help'>Help</a>");
        assert_eq!(spans[0].link.as_deref(), Some("/help"));
    }

    #[test]
    fn test_anchor_without_href() {
        let spans = parse("<A>x</A> y");
        assert!(spans[0].anchor);
        assert_eq!(spans[0].link, None);
        assert!(!spans[1].anchor);
    }

    #[test]
    fn test_entities_and_unknown_tags() {
        assert_eq!(plain_text("<span>Save &amp; Close</span>"), "Save & Close");
        assert_eq!(plain_text("&nbsp;"), "\u{a0}");
        assert_eq!(plain_text("a &unknown; b"), "a &unknown; b");
        assert_eq!(plain_text("1 &lt; 2<br>3"), "1 < 2\n3");
    }

    #[test]
    fn test_unterminated_tag_is_literal() {
        assert_eq!(plain_text("a <b"), "a <b");
    }

    #[test]
    fn test_span_at_maps_character_index() {
        let spans = parse("Open <a href=\"/help\">help</a>");
        assert_eq!(span_at(&spans, 0).map(|s| s.anchor), Some(false));
        assert_eq!(span_at(&spans, 4).map(|s| s.anchor), Some(false));
        assert_eq!(span_at(&spans, 5).map(|s| s.anchor), Some(true));
        assert_eq!(span_at(&spans, 8).map(|s| s.anchor), Some(true));
        assert!(span_at(&spans, 9).is_none());
    }
}
