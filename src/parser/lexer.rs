//! Lexer for the constraint language using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Edge keywords
    #[token("left")]
    Left,
    #[token("right")]
    Right,
    #[token("width")]
    Width,
    #[token("top")]
    Top,
    #[token("bottom")]
    Bottom,
    #[token("height")]
    Height,

    // Identifier aliases resolved by the constraint, not the parser
    #[token("self")]
    SelfRef,
    #[token("parent")]
    Parent,

    // Unit suffixes (reserved words, like the edge names)
    #[token("px")]
    Px,
    #[token("cm")]
    Cm,
    #[token("in")]
    In,

    // Operators
    #[token("=")]
    Equals,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token(".")]
    Dot,

    // Literals - identifiers must come after keywords
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),
}

/// Lex input string into tokens with spans
///
/// Fails with the span of the first lexeme that matches no token; garbage
/// characters are never dropped.
pub fn lex(input: &str) -> Result<Vec<(Token, Span)>, Span> {
    let mut tokens = Vec::new();
    for (tok, span) in Token::lexer(input).spanned() {
        match tok {
            Ok(t) => tokens.push((t, span)),
            Err(()) => return Err(span),
        }
    }
    Ok(tokens)
}
