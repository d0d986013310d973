//! Syntax Highlighting
//!
//! Regex based highlighting for Python, JavaScript, TypeScript and C#.
//!
//! Four independent passes (keyword, string, comment, number) each scan the
//! whole text. Categories are not exclusive: a keyword inside a string, or a
//! number inside a comment, is tagged by both passes. Nothing is cached
//! between calls apart from the compiled patterns.

use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use scribe_core::Language;
use tracing::{debug, warn};

/// Highlight category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HighlightCategory {
    Keyword,
    String,
    Comment,
    Number,
}

impl HighlightCategory {
    /// Every category, in pass order
    pub const ALL: [HighlightCategory; 4] = [
        HighlightCategory::Keyword,
        HighlightCategory::String,
        HighlightCategory::Comment,
        HighlightCategory::Number,
    ];

    /// Tag name used by the presentation layer
    pub fn tag_name(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::String => "string",
            Self::Comment => "comment",
            Self::Number => "number",
        }
    }

    /// Foreground color (Tk/X11 named colors blue, green, gray, purple)
    pub fn color(&self) -> &'static str {
        match self {
            Self::Keyword => "#0000FF",
            Self::String => "#00FF00",
            Self::Comment => "#BEBEBE",
            Self::Number => "#A020F0",
        }
    }
}

/// A highlighted range in the text, in character offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRange {
    pub category: HighlightCategory,
    pub start: usize,
    pub end: usize,
}

/// Result of one highlighting pass over a document
///
/// Every category is present, possibly with no ranges. Ranges within a
/// category are in ascending order of start offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlights {
    ranges: BTreeMap<HighlightCategory, Vec<Range<usize>>>,
}

impl Highlights {
    /// Highlights with all four categories empty
    pub fn empty() -> Self {
        Self {
            ranges: HighlightCategory::ALL
                .iter()
                .map(|&category| (category, Vec::new()))
                .collect(),
        }
    }

    /// Ranges for one category
    pub fn get(&self, category: HighlightCategory) -> &[Range<usize>] {
        self.ranges.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Categories and their ranges, in category order
    pub fn categories(
        &self,
    ) -> impl Iterator<Item = (HighlightCategory, &[Range<usize>])> + '_ {
        self.ranges.iter().map(|(category, ranges)| (*category, ranges.as_slice()))
    }

    /// Flattened ranges, category by category
    pub fn iter(&self) -> impl Iterator<Item = HighlightRange> + '_ {
        self.ranges.iter().flat_map(|(category, ranges)| {
            ranges.iter().map(move |r| HighlightRange {
                category: *category,
                start: r.start,
                end: r.end,
            })
        })
    }

    /// Total number of ranges across categories
    pub fn len(&self) -> usize {
        self.ranges.values().map(Vec::len).sum()
    }

    /// No ranges in any category
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set(&mut self, category: HighlightCategory, ranges: Vec<Range<usize>>) {
        self.ranges.insert(category, ranges);
    }
}

impl Default for Highlights {
    fn default() -> Self {
        Self::empty()
    }
}

const PYTHON_KEYWORDS: &[&str] = &[
    "class", "def", "return", "if", "else", "elif", "for", "while", "break", "continue",
    "pass", "try", "except", "finally", "import", "from", "as", "with", "lambda", "yield",
    "in", "is", "not", "or", "and",
];

const JAVASCRIPT_KEYWORDS: &[&str] = &[
    "function", "return", "if", "else", "for", "while", "break", "continue", "try", "catch",
    "finally", "import", "from", "as", "with", "yield", "in", "is", "not", "or", "and",
    "var", "let", "const",
];

const TYPESCRIPT_EXTRA_KEYWORDS: &[&str] = &["interface", "type", "namespace"];

const CSHARP_KEYWORDS: &[&str] = &[
    "class", "struct", "enum", "void", "int", "double", "float", "bool", "string", "if",
    "else", "for", "while", "do", "switch", "case", "break", "continue", "return", "try",
    "catch", "finally", "using", "namespace", "public", "private", "protected", "static",
    "new", "virtual", "override", "abstract", "sealed",
];

const HASH_COMMENTS: &str = r"#[^\n]*";
const C_STYLE_COMMENTS: &str = r"//[^\n]*|/\*[\s\S]*?\*/";

// Non-greedy, stops at the first matching quote, never crosses a newline.
const STRING_PATTERN: &str = r#""(?:.*?)"|'(?:.*?)'"#;
const NUMBER_PATTERN: &str = r"\b\d+\b";

/// Compiled patterns for one language
struct LanguageRules {
    keywords: Option<Regex>,
    comments: Option<Regex>,
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!("Failed to compile highlight pattern {:?}: {}", pattern, e);
            None
        }
    }
}

fn keyword_pattern(words: &[&str]) -> String {
    format!(r"\b(?:{})\b", words.join("|"))
}

impl LanguageRules {
    fn for_language(language: Language) -> Self {
        let (keywords, comments) = match language {
            Language::Python => (keyword_pattern(PYTHON_KEYWORDS), HASH_COMMENTS),
            Language::JavaScript => (keyword_pattern(JAVASCRIPT_KEYWORDS), C_STYLE_COMMENTS),
            Language::TypeScript => {
                let words: Vec<&str> = JAVASCRIPT_KEYWORDS
                    .iter()
                    .chain(TYPESCRIPT_EXTRA_KEYWORDS)
                    .copied()
                    .collect();
                (keyword_pattern(&words), C_STYLE_COMMENTS)
            }
            Language::CSharp => (keyword_pattern(CSHARP_KEYWORDS), C_STYLE_COMMENTS),
        };

        Self {
            keywords: compile(&keywords),
            comments: compile(comments),
        }
    }
}

static RULES: Lazy<HashMap<Language, LanguageRules>> = Lazy::new(|| {
    Language::ALL
        .iter()
        .map(|&language| (language, LanguageRules::for_language(language)))
        .collect()
});

static STRINGS: Lazy<Option<Regex>> = Lazy::new(|| compile(STRING_PATTERN));
static NUMBERS: Lazy<Option<Regex>> = Lazy::new(|| compile(NUMBER_PATTERN));

/// Highlight `text` as `language`, rescanning from the first character
pub fn highlight(language: Language, text: &str) -> Highlights {
    let mut highlights = Highlights::empty();
    let Some(rules) = RULES.get(&language) else {
        return highlights;
    };

    let passes = [
        (HighlightCategory::Keyword, rules.keywords.as_ref()),
        (HighlightCategory::String, STRINGS.as_ref()),
        (HighlightCategory::Comment, rules.comments.as_ref()),
        (HighlightCategory::Number, NUMBERS.as_ref()),
    ];

    for (category, regex) in passes {
        if let Some(regex) = regex {
            highlights.set(category, scan(regex, text));
        }
    }

    debug!("Highlighted {} bytes as {}: {} ranges", text.len(), language, highlights.len());
    highlights
}

/// Highlight using a language name; unrecognized names yield empty highlights
pub fn highlight_named(name: &str, text: &str) -> Highlights {
    match name.parse::<Language>() {
        Ok(language) => highlight(language, text),
        Err(_) => {
            debug!("No highlighting rules for language {:?}", name);
            Highlights::empty()
        }
    }
}

/// Collect match spans of `regex` over the whole text as character ranges
fn scan(regex: &Regex, text: &str) -> Vec<Range<usize>> {
    let mut index = CharIndex::new(text);
    regex
        .find_iter(text)
        .map(|m| {
            let start = index.char_offset(m.start());
            let end = index.char_offset(m.end());
            start..end
        })
        .collect()
}

/// Converts ascending byte offsets into character offsets in one forward walk
struct CharIndex<'a> {
    text: &'a str,
    ascii: bool,
    byte_pos: usize,
    char_pos: usize,
}

impl<'a> CharIndex<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            ascii: text.is_ascii(),
            byte_pos: 0,
            char_pos: 0,
        }
    }

    fn char_offset(&mut self, byte: usize) -> usize {
        if self.ascii {
            return byte;
        }
        if byte < self.byte_pos {
            self.byte_pos = 0;
            self.char_pos = 0;
        }
        self.char_pos += self.text[self.byte_pos..byte].chars().count();
        self.byte_pos = byte;
        self.char_pos
    }
}

/// Convert a character offset into a (1-based line, 0-based column) position.
///
/// Offsets past the end clamp to the end of the text.
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 0;
    for ch in text.chars().take(offset) {
        if ch == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    (line, column)
}

/// Highlighter bound to the editor's active language
#[derive(Debug, Clone)]
pub struct SyntaxHighlighter {
    language: Language,
}

impl SyntaxHighlighter {
    /// Create a new syntax highlighter for a language
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Get the current language
    pub fn language(&self) -> Language {
        self.language
    }

    /// Change the language
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Highlight the whole document
    pub fn highlight(&self, text: &str) -> Highlights {
        highlight(self.language, text)
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use HighlightCategory::*;

    #[test]
    fn test_all_categories_present() {
        for language in Language::ALL {
            let highlights = highlight(language, "");
            let categories: Vec<_> = highlights.categories().map(|(c, _)| c).collect();
            assert_eq!(categories, HighlightCategory::ALL.to_vec());
            assert!(highlights.is_empty());
        }
    }

    #[test]
    fn test_category_palette() {
        let palette: Vec<_> = HighlightCategory::ALL
            .iter()
            .map(|c| (c.tag_name(), c.color()))
            .collect();
        assert_eq!(
            palette,
            vec![
                ("keyword", "#0000FF"),
                ("string", "#00FF00"),
                ("comment", "#BEBEBE"),
                ("number", "#A020F0"),
            ]
        );
    }

    #[test]
    fn test_number_inside_string() {
        for language in Language::ALL {
            let highlights = highlight(language, "\"123\"");
            assert_eq!(highlights.get(String), &[0..5]);
            assert_eq!(highlights.get(Number), &[1..4]);
        }
    }

    #[test]
    fn test_keyword_inside_string_still_tagged() {
        let highlights = highlight(Language::Python, "x = 'if'");
        assert_eq!(highlights.get(String), &[4..8]);
        assert_eq!(highlights.get(Keyword), &[5..7]);
    }

    #[test]
    fn test_python_passes() {
        let text = "def f(x):\n    return x + 42  # if 7\n";
        let highlights = highlight(Language::Python, text);

        let keywords: Vec<&str> =
            highlights.get(Keyword).iter().map(|r| &text[r.clone()]).collect();
        assert_eq!(keywords, vec!["def", "return", "if"]);

        let comments: Vec<&str> =
            highlights.get(Comment).iter().map(|r| &text[r.clone()]).collect();
        assert_eq!(comments, vec!["# if 7"]);

        let numbers: Vec<&str> = highlights.get(Number).iter().map(|r| &text[r.clone()]).collect();
        assert_eq!(numbers, vec!["42", "7"]);
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let text = "let a = 1; /* first\nsecond */ // tail";
        let highlights = highlight(Language::JavaScript, text);
        let comments: Vec<&str> =
            highlights.get(Comment).iter().map(|r| &text[r.clone()]).collect();
        assert_eq!(comments, vec!["/* first\nsecond */", "// tail"]);

        // '#' is not a comment outside Python
        assert!(highlight(Language::JavaScript, "# nope").get(Comment).is_empty());
    }

    #[test]
    fn test_string_does_not_cross_newline() {
        let text = "\"abc\n\"def\"";
        let highlights = highlight(Language::Python, text);
        assert_eq!(highlights.get(String), &[5..10]);
    }

    #[test]
    fn test_string_has_no_escape_handling() {
        let text = r#""a\"b""#;
        let highlights = highlight(Language::CSharp, text);
        assert_eq!(highlights.get(String), &[0..4]);
    }

    #[test]
    fn test_number_word_boundaries() {
        let text = "x1 = 12 + 3.5";
        let highlights = highlight(Language::Python, text);
        let numbers: Vec<&str> = highlights.get(Number).iter().map(|r| &text[r.clone()]).collect();
        assert_eq!(numbers, vec!["12", "3", "5"]);
    }

    #[test]
    fn test_language_keyword_sets() {
        let ts = highlight(Language::TypeScript, "interface Foo {}");
        assert_eq!(ts.get(Keyword), &[0..9]);

        let js = highlight(Language::JavaScript, "interface Foo {}");
        assert!(js.get(Keyword).is_empty());

        let cs = highlight(Language::CSharp, "public sealed class A {}");
        assert_eq!(cs.get(Keyword).len(), 3);

        // Keywords only match whole words
        let py = highlight(Language::Python, "define classy");
        assert!(py.get(Keyword).is_empty());
    }

    #[test]
    fn test_offsets_are_characters() {
        let text = "\"é\" 42";
        let highlights = highlight(Language::Python, text);
        assert_eq!(highlights.get(String), &[0..3]);
        assert_eq!(highlights.get(Number), &[4..6]);
    }

    #[test]
    fn test_unknown_language_name() {
        let highlights = highlight_named("Ruby", "def x; 1; end");
        assert_eq!(highlights, Highlights::empty());
        assert_eq!(highlights.categories().count(), 4);

        let known = highlight_named("C#", "int x = 1;");
        assert_eq!(known.get(Keyword), &[0..3]);
    }

    #[test]
    fn test_recomputed_from_scratch() {
        let mut highlighter = SyntaxHighlighter::default();
        let first = highlighter.highlight("if x: pass");
        assert_eq!(first.get(Keyword).len(), 2);

        highlighter.set_language(Language::CSharp);
        let second = highlighter.highlight("if x: pass");
        assert_eq!(second.get(Keyword), &[0..2]);

        highlighter.set_language(Language::Python);
        assert_eq!(highlighter.highlight("if x: pass"), first);
    }

    #[test]
    fn test_iter_flattens_in_category_order() {
        let ranges: Vec<HighlightRange> = highlight(Language::Python, "'1' # 2").iter().collect();
        let categories: Vec<_> = ranges.iter().map(|r| r.category).collect();
        assert_eq!(categories, vec![String, Comment, Number, Number]);
    }

    #[test]
    fn test_line_col() {
        let text = "ab\ncd\n";
        assert_eq!(line_col(text, 0), (1, 0));
        assert_eq!(line_col(text, 4), (2, 1));
        assert_eq!(line_col(text, 100), (3, 0));
        assert_eq!(Keyword.tag_name(), "keyword");
    }
}
