//! Error types for parsing constraint lines

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed expression at {span:?}: {message}")]
    MalformedExpression {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl ParseError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            ParseError::MalformedExpression {
                span,
                message,
                expected,
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };

                Report::build(ReportKind::Error, filename, span.start)
                    .with_message(message)
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(format!("{}{}", message, expected_str))
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf)
                    .unwrap();
            }
        }
        String::from_utf8(buf).unwrap()
    }
}

impl<'a> From<chumsky::error::Rich<'a, crate::parser::lexer::Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, crate::parser::lexer::Token>) -> Self {
        use crate::parser::lexer::Token;
        use chumsky::error::RichReason;

        // Check if a reserved word landed where an element name was expected
        let found_token = err.found().cloned();
        let reserved = found_token.as_ref().and_then(|tok| match tok {
            Token::Left => Some("left"),
            Token::Right => Some("right"),
            Token::Width => Some("width"),
            Token::Top => Some("top"),
            Token::Bottom => Some("bottom"),
            Token::Height => Some("height"),
            Token::Px => Some("px"),
            Token::Cm => Some("cm"),
            Token::In => Some("in"),
            _ => None,
        });

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                if let Some(word) = reserved {
                    format!(
                        "cannot use '{}' as an element name - it's a reserved word",
                        word
                    )
                } else {
                    let found_str = match found {
                        Some(tok) => format_token(tok),
                        None => "end of input".to_string(),
                    };
                    format!("unexpected {}", found_str)
                }
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        ParseError::MalformedExpression {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &crate::parser::lexer::Token) -> String {
    use crate::parser::lexer::Token;
    match tok {
        Token::Ident(s) => format!("identifier '{}'", s),
        Token::Number(n) => format!("number {}", n),
        Token::Equals => "'='".to_string(),
        Token::Plus => "'+'".to_string(),
        Token::Minus => "'-'".to_string(),
        Token::Star => "'*'".to_string(),
        Token::Dot => "'.'".to_string(),
        Token::Left => "edge 'left'".to_string(),
        Token::Right => "edge 'right'".to_string(),
        Token::Width => "edge 'width'".to_string(),
        Token::Top => "edge 'top'".to_string(),
        Token::Bottom => "edge 'bottom'".to_string(),
        Token::Height => "edge 'height'".to_string(),
        Token::SelfRef => "'self'".to_string(),
        Token::Parent => "'parent'".to_string(),
        Token::Px => "unit 'px'".to_string(),
        Token::Cm => "unit 'cm'".to_string(),
        Token::In => "unit 'in'".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_constraint;

    #[test]
    fn test_error_carries_span_and_message() {
        let errs = parse_constraint("b.left = a + 5px").unwrap_err();
        assert!(!errs.is_empty());
        let ParseError::MalformedExpression { message, .. } = &errs[0];
        assert!(!message.is_empty());
    }

    #[test]
    fn test_reserved_word_diagnostic() {
        let errs = parse_constraint("width.left = 10px").unwrap_err();
        let ParseError::MalformedExpression { message, .. } = &errs[0];
        assert!(message.contains("reserved word"), "got: {}", message);
    }

    #[test]
    fn test_format_renders_source_context() {
        let source = "b.left = a + 5px";
        let errs = parse_constraint(source).unwrap_err();
        let rendered = errs[0].format(source, "constraints");
        assert!(rendered.contains("constraints"));
    }
}
