use std::fmt;

/// The closed set of styling categories a piece of source text can fall into
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Category {
    /// Ordinary text: identifiers, punctuation, whitespace, numbers
    Plain,
    /// A reserved word of the language
    Keyword,
    /// The receiver identifier (`self`)
    SelfRef,
    /// A decorator such as `@property`
    Decorator,
    /// A quoted string literal, quotes included
    String,
    /// A line comment, marker included
    Comment,
    /// The name following a `class` keyword
    ClassName,
    /// The name following a `def` keyword
    FunctionName,
}

impl Category {
    /// Get the css class used when rendering this category as markup. Plain text is never wrapped
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Category::Plain => None,
            Category::Keyword => Some("tok-keyword"),
            Category::SelfRef => Some("tok-self"),
            Category::Decorator => Some("tok-decorator"),
            Category::String => Some("tok-string"),
            Category::Comment => Some("tok-comment"),
            Category::ClassName => Some("tok-class"),
            Category::FunctionName => Some("tok-function"),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Plain => write!(f, "Plain"),
            Category::Keyword => write!(f, "Keyword"),
            Category::SelfRef => write!(f, "SelfRef"),
            Category::Decorator => write!(f, "Decorator"),
            Category::String => write!(f, "String"),
            Category::Comment => write!(f, "Comment"),
            Category::ClassName => write!(f, "ClassName"),
            Category::FunctionName => write!(f, "FunctionName"),
        }
    }
}

/// A categorized slice of the source text. Concatenating the text of every token produced from a
/// source yields the source exactly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Token<'a> {
    pub category: Category,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    /// Create a new token
    pub fn new(category: Category, text: &'a str) -> Self {
        Self { category, text }
    }
}
