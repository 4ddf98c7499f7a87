use crate::{Category, Token};

/// The reserved words highlighted in python source
pub const KEYWORDS: &[&str] = &[
    "def", "class", "return", "import", "from", "if", "else", "elif", "for", "while", "try",
    "except", "with", "as", "pass", "print",
];

/// The receiver identifier
const SELF: &str = "self";

const TRIPLE_DOUBLE: &str = "\"\"\"";
const TRIPLE_SINGLE: &str = "'''";

/// What the next identifier is expected to be
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Expect {
    Anything,
    ClassName,
    FunctionName,
}

/// Tokenize python source in a single pass. Adjacent plain text is coalesced into one token and
/// the token texts always concatenate back to `source`.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut expect = Expect::Anything;
    let mut pos = 0;
    // start of the plain run that has not been emitted yet
    let mut plain_start = 0;

    while pos < source.len() {
        let (category, len) = scan(&source[pos..], &mut expect);
        if category != Category::Plain {
            if plain_start < pos {
                tokens.push(Token::new(Category::Plain, &source[plain_start..pos]));
            }
            tokens.push(Token::new(category, &source[pos..pos + len]));
            plain_start = pos + len;
        }
        pos += len;
    }

    if plain_start < source.len() {
        tokens.push(Token::new(Category::Plain, &source[plain_start..]));
    }

    tokens
}

/// Scan the lexeme at the start of `rest` and return its category and length in bytes. The
/// returned length is never zero for a non-empty `rest`.
fn scan(rest: &str, expect: &mut Expect) -> (Category, usize) {
    let Some(c) = rest.chars().next() else {
        return (Category::Plain, rest.len());
    };

    match c {
        '#' => {
            *expect = Expect::Anything;
            (Category::Comment, rest.find('\n').unwrap_or(rest.len()))
        }
        '\'' | '"' => {
            *expect = Expect::Anything;
            match string_len(rest, c) {
                Some(len) => (Category::String, len),
                None => (Category::Plain, c.len_utf8()),
            }
        }
        '@' => {
            *expect = Expect::Anything;
            match word_len(&rest[1..]) {
                0 => (Category::Plain, 1),
                len => (Category::Decorator, 1 + len),
            }
        }
        c if is_word(c) => {
            let len = word_len(rest);
            let word = &rest[..len];
            let category = match *expect {
                // a name never starts with a digit
                _ if c.is_numeric() => Category::Plain,
                Expect::ClassName => Category::ClassName,
                Expect::FunctionName => Category::FunctionName,
                Expect::Anything if KEYWORDS.contains(&word) => Category::Keyword,
                Expect::Anything if word == SELF => Category::SelfRef,
                Expect::Anything => Category::Plain,
            };
            *expect = match (category, word) {
                (Category::Keyword, "class") => Expect::ClassName,
                (Category::Keyword, "def") => Expect::FunctionName,
                _ => Expect::Anything,
            };
            (category, len)
        }
        // whitespace keeps a pending class/def name alive
        c if c.is_whitespace() => (
            Category::Plain,
            rest.char_indices()
                .find(|(_, c)| !c.is_whitespace())
                .map(|(i, _)| i)
                .unwrap_or(rest.len()),
        ),
        c => {
            *expect = Expect::Anything;
            (Category::Plain, c.len_utf8())
        }
    }
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Length in bytes of the run of word characters at the start of `s`
fn word_len(s: &str) -> usize {
    s.char_indices()
        .find(|(_, c)| !is_word(*c))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Length in bytes of the string literal opened by `quote` at the start of `rest`, or None if it
/// is never closed
fn string_len(rest: &str, quote: char) -> Option<usize> {
    let triple = if quote == '"' {
        TRIPLE_DOUBLE
    } else {
        TRIPLE_SINGLE
    };
    if rest.starts_with(triple) {
        if let Some(len) = closing(&rest[3..], triple, true) {
            return Some(3 + len);
        }
    }
    closing(&rest[1..], &rest[..1], false).map(|len| 1 + len)
}

/// Length in bytes of `body` up to and including `delimiter`. Backslash escapes the next char.
fn closing(body: &str, delimiter: &str, multiline: bool) -> Option<usize> {
    let mut chars = body.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next();
            continue;
        }
        if c == '\n' && !multiline {
            return None;
        }
        if body[i..].starts_with(delimiter) {
            return Some(i + delimiter.len());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn categories(source: &str) -> Vec<(Category, &str)> {
        tokenize(source)
            .into_iter()
            .map(|t| (t.category, t.text))
            .collect()
    }

    fn of(source: &str, category: Category) -> Vec<&str> {
        tokenize(source)
            .into_iter()
            .filter(|t| t.category == category)
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_empty_source() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_digits_are_not_names() {
        assert!(of("class 1:", Category::ClassName).is_empty());
        assert!(of("def 2x(): pass", Category::FunctionName).is_empty());
        assert_eq!(of("def 2x(): pass", Category::Keyword), vec!["def", "pass"]);
        assert_eq!(of("class _Base1:", Category::ClassName), vec!["_Base1"]);
    }

    #[test]
    fn test_keywords_whole_words_only() {
        assert_eq!(
            of("for item in classes: pass", Category::Keyword),
            vec!["for", "pass"]
        );
        assert!(of("define imports_", Category::Keyword).is_empty());
    }

    #[test]
    fn test_class_and_function_names() {
        let tokens = categories("class Carro:\n    def acelerar(self, v):\n        return v");
        assert_eq!(
            tokens,
            vec![
                (Category::Keyword, "class"),
                (Category::Plain, " "),
                (Category::ClassName, "Carro"),
                (Category::Plain, ":\n    "),
                (Category::Keyword, "def"),
                (Category::Plain, " "),
                (Category::FunctionName, "acelerar"),
                (Category::Plain, "("),
                (Category::SelfRef, "self"),
                (Category::Plain, ", v):\n        "),
                (Category::Keyword, "return"),
                (Category::Plain, " v"),
            ]
        );
    }

    #[test]
    fn test_name_expected_across_newline() {
        assert_eq!(of("class\n  Casa", Category::ClassName), vec!["Casa"]);
        // punctuation cancels the pending name
        assert!(of("def (x)", Category::FunctionName).is_empty());
    }

    #[test]
    fn test_decorators() {
        assert_eq!(
            of("@property\ndef saldo(self): pass", Category::Decorator),
            vec!["@property"]
        );
        assert!(of("a @ b", Category::Decorator).is_empty());
    }

    #[test]
    fn test_strings_hide_keywords_and_comments() {
        let source = r#"print("class Foo # not a comment")"#;
        assert_eq!(
            of(source, Category::String),
            vec![r#""class Foo # not a comment""#]
        );
        assert!(of(source, Category::ClassName).is_empty());
        assert!(of(source, Category::Comment).is_empty());
    }

    #[test]
    fn test_escaped_quote_in_string() {
        assert_eq!(of(r#"x = 'it\'s'"#, Category::String), vec![r#"'it\'s'"#]);
    }

    #[test]
    fn test_unterminated_quote_is_plain() {
        let tokens = categories("x = \"aberto\ny = 1");
        assert!(tokens.iter().all(|(c, _)| *c == Category::Plain));
    }

    #[test]
    fn test_triple_quoted_string_spans_lines() {
        let source = "def f():\n    \"\"\"Linha um.\n    Linha dois.\"\"\"\n    pass";
        assert_eq!(
            of(source, Category::String),
            vec!["\"\"\"Linha um.\n    Linha dois.\"\"\""]
        );
        assert_eq!(of(source, Category::Keyword), vec!["def", "pass"]);
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        assert_eq!(
            categories("# 'quoted' def\nx"),
            vec![
                (Category::Comment, "# 'quoted' def"),
                (Category::Plain, "\nx"),
            ]
        );
    }

    #[test]
    fn test_unicode_identifiers() {
        let source = "def descrição(self): return 'ação'";
        assert_eq!(of(source, Category::FunctionName), vec!["descrição"]);
        assert_eq!(of(source, Category::String), vec!["'ação'"]);
    }

    proptest! {
        #[test]
        fn prop_tokens_concatenate_to_source(source in any::<String>()) {
            let joined: String = tokenize(&source).iter().map(|t| t.text).collect();
            prop_assert_eq!(joined, source);
        }

        #[test]
        fn prop_python_like_tokens_concatenate_to_source(
            source in r#"[a-z_@#'"\\ \n():=<>&]{0,120}"#
        ) {
            let tokens = tokenize(&source);
            prop_assert!(tokens.iter().all(|t| !t.text.is_empty()));
            let joined: String = tokens.iter().map(|t| t.text).collect();
            prop_assert_eq!(joined, source);
        }
    }
}
