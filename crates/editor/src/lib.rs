//! Scribe Editor
//!
//! Syntax highlighting for the editor surface:
//! - Keyword, string, comment and number passes per language
//! - Character-offset ranges ready to be painted as tags

pub mod syntax;

pub use syntax::{
    highlight, highlight_named, line_col, HighlightCategory, HighlightRange, Highlights,
    SyntaxHighlighter,
};
