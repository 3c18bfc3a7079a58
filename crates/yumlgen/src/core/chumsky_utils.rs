//! Shared chumsky parser utilities
//!
//! Common combinators for the declaration source parser. All of them carry
//! rich errors so failures can be reported with a position.

use chumsky::prelude::*;

/// Parser extras used throughout the crate
pub type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Parse optional whitespace including newlines.
///
/// Uses explicit character matching to avoid the "repeated combinator making no progress"
/// issue that can occur with `chumsky::text::whitespace().repeated()`.
pub fn optional_whitespace<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    one_of(" \t\n\r").repeated().ignored()
}

/// Parse required whitespace (at least one whitespace/newline character).
pub fn whitespace_required<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    one_of(" \t\n\r").repeated().at_least(1).ignored()
}

/// Parse inline whitespace only (spaces and tabs, no newlines).
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    just(' ').or(just('\t')).repeated().ignored()
}

/// Parse a line comment (`//` to end of line).
pub fn line_comment<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    just("//").ignore_then(none_of('\n').repeated()).ignored()
}

/// Parse any run of whitespace and line comments, possibly empty.
pub fn optional_whitespace_or_comment<'src>(
) -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    one_of(" \t\n\r")
        .ignored()
        .or(line_comment())
        .repeated()
        .ignored()
}

/// Convert a byte offset into a 1-based line and column
pub fn line_column(input: &str, offset: usize) -> (usize, usize) {
    let before = &input[..offset.min(input.len())];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rsplit('\n')
        .next()
        .map_or(0, |tail| tail.chars().count())
        + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_column() {
        assert_eq!(line_column("class A", 0), (1, 1));
        assert_eq!(line_column("class A\nclass B", 8), (2, 1));
        assert_eq!(line_column("class A\nclass B", 14), (2, 7));
        assert_eq!(line_column("ab", 99), (1, 3));
    }

    #[test]
    fn test_optional_whitespace() {
        let parser = optional_whitespace().then(just("test")).then_ignore(end());
        assert!(parser.parse("test").into_result().is_ok());
        assert!(parser.parse(" test").into_result().is_ok());
        assert!(parser.parse("\t\n test").into_result().is_ok());
    }

    #[test]
    fn test_whitespace_required() {
        let parser = just("a")
            .then(whitespace_required())
            .then(just("b"))
            .then_ignore(end());
        assert!(parser.parse("a b").into_result().is_ok());
        assert!(parser.parse("a\nb").into_result().is_ok());
        assert!(parser.parse("ab").into_result().is_err());
    }

    #[test]
    fn test_inline_whitespace() {
        let parser = inline_whitespace().then(just("test")).then_ignore(end());
        assert!(parser.parse("\ttest").into_result().is_ok());
        assert!(parser.parse("\ntest").into_result().is_err());
    }

    #[test]
    fn test_line_comment() {
        let parser = line_comment().then_ignore(end());
        assert!(parser.parse("// a comment").into_result().is_ok());
        assert!(parser.parse("/ not a comment").into_result().is_err());
    }

    #[test]
    fn test_interleaved_comments() {
        let parser = optional_whitespace_or_comment()
            .then(just("class"))
            .then_ignore(end());
        assert!(parser.parse("// header\n  // more\nclass").into_result().is_ok());
        assert!(parser.parse("class").into_result().is_ok());
    }
}
