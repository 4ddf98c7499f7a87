use crate::{python, Token};

/// Escape the html-significant characters of `text`
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

/// Render a token stream as markup. Every token's text is escaped before it is wrapped, and the
/// inserted spans are never scanned again.
pub fn to_markup(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token.category.css_class() {
            Some(class) => {
                out.push_str("<span class=\"");
                out.push_str(class);
                out.push_str("\">");
                escape_into(&mut out, token.text);
                out.push_str("</span>");
            }
            None => escape_into(&mut out, token.text),
        }
    }
    out
}

/// Highlight python source as markup that is safe to embed in a page
pub fn highlight(source: &str) -> String {
    to_markup(&python::tokenize(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// remove every inserted tag, failing on any '<' that does not open one of ours
    fn strip_spans(markup: &str) -> Option<String> {
        let mut out = String::with_capacity(markup.len());
        let mut rest = markup;
        while let Some(i) = rest.find('<') {
            out.push_str(&rest[..i]);
            let tag = &rest[i..];
            let end = tag.find('>')?;
            let inner = &tag[..=end];
            if inner != "</span>" && !inner.starts_with("<span class=\"tok-") {
                return None;
            }
            rest = &tag[end + 1..];
        }
        out.push_str(rest);
        Some(out)
    }

    fn unescape(text: &str) -> String {
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&")
    }

    fn only_entities(text: &str) -> bool {
        !text.contains('>')
            && text.match_indices('&').all(|(i, _)| {
                let rest = &text[i..];
                rest.starts_with("&amp;") || rest.starts_with("&lt;") || rest.starts_with("&gt;")
            })
    }

    #[test]
    fn test_escape_ampersand_first() {
        assert_eq!(escape("&lt; <b>"), "&amp;lt; &lt;b&gt;");
    }

    #[test]
    fn test_highlight_empty() {
        assert_eq!(highlight(""), "");
    }

    #[test]
    fn test_highlight_wraps_categories() {
        assert_eq!(
            highlight("class Conta:\n    pass # fim"),
            "<span class=\"tok-keyword\">class</span> <span class=\"tok-class\">Conta</span>:\n    \
             <span class=\"tok-keyword\">pass</span> <span class=\"tok-comment\"># fim</span>"
        );
    }

    #[test]
    fn test_highlight_escapes_inside_spans() {
        assert_eq!(
            highlight("if a < b: print('<ok>')"),
            "<span class=\"tok-keyword\">if</span> a &lt; b: <span class=\"tok-keyword\">print</span>\
             (<span class=\"tok-string\">'&lt;ok&gt;'</span>)"
        );
    }

    #[test]
    fn test_inserted_markup_is_not_rescanned() {
        // the css class text must never be highlighted as a string or keyword
        let markup = highlight("@decorator\nclass X: pass");
        assert_eq!(markup.matches("<span").count(), 4);
        assert_eq!(strip_spans(&markup).map(|s| unescape(&s)).as_deref(), Some("@decorator\nclass X: pass"));
    }

    proptest! {
        #[test]
        fn prop_markup_round_trips(source in any::<String>()) {
            let markup = highlight(&source);
            let stripped = strip_spans(&markup);
            prop_assert!(stripped.is_some());
            let stripped = stripped.unwrap_or_default();
            prop_assert!(only_entities(&stripped));
            prop_assert_eq!(unescape(&stripped), source);
        }

        #[test]
        fn prop_python_like_markup_round_trips(
            source in r#"(def |class |self|@prop|print\(|'x'|"y"|# c|<|>|&|\n| |[a-z]{1,4}){0,40}"#
        ) {
            let markup = highlight(&source);
            let stripped = strip_spans(&markup).unwrap_or_default();
            prop_assert!(only_entities(&stripped));
            prop_assert_eq!(unescape(&stripped), source);
        }
    }
}
