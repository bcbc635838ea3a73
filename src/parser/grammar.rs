//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::units::{Measurement, Unit};

/// Parse a batch of constraint lines into a Document
pub fn parse(input: &str) -> Result<Document, Vec<crate::ParseError>> {
    let len = input.len();

    let tokens = tokenize(input)?;
    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));

    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    document_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Parse a single constraint line
pub fn parse_constraint(input: &str) -> Result<Spanned<ConstraintDecl>, Vec<crate::ParseError>> {
    let len = input.len();

    let tokens = tokenize(input)?;
    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));

    let token_stream = Stream::from_iter(token_iter)
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    constraint_parser()
        .then_ignore(end())
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Run the lexer, turning an unlexable character into a parse error
fn tokenize(
    input: &str,
) -> Result<Vec<(Token, std::ops::Range<usize>)>, Vec<crate::ParseError>> {
    crate::parser::lexer::lex(input).map_err(|span| {
        vec![crate::ParseError::MalformedExpression {
            message: format!("unrecognized character '{}'", &input[span.clone()]),
            span,
            expected: vec![],
        }]
    })
}

/// Helper to extract span range from chumsky's span type
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn constraint_parser<'a, I>(
) -> impl Parser<'a, I, Spanned<ConstraintDecl>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let identifier = select! {
        Token::Ident(s) => Identifier::new(s),
    }
    .map_with(|id, e| Spanned::new(id, span_range(&e.span())));

    let number = select! {
        Token::Number(n) => n,
    };

    let edge = choice((
        just(Token::Left).to(Edge::Left),
        just(Token::Right).to(Edge::Right),
        just(Token::Width).to(Edge::Width),
        just(Token::Top).to(Edge::Top),
        just(Token::Bottom).to(Edge::Bottom),
        just(Token::Height).to(Edge::Height),
    ))
    .map_with(|edge, e| Spanned::new(edge, span_range(&e.span())));

    let unit = choice((
        just(Token::Px).to(Unit::Pixel),
        just(Token::Cm).to(Unit::Centimeter),
        just(Token::In).to(Unit::Inch),
    ));

    // A bare number is a pixel measurement
    let measurement = number
        .then(unit.or_not())
        .map(|(value, unit)| Measurement::new(value, unit.unwrap_or(Unit::Pixel)));

    let element_ref = choice((
        just(Token::SelfRef).to(ElementRef::SelfRef),
        just(Token::Parent).to(ElementRef::Parent),
        select! { Token::Ident(s) => ElementRef::Named(Identifier::new(s)) },
    ))
    .map_with(|r, e| Spanned::new(r, span_range(&e.span())));

    let edge_ref = element_ref
        .then_ignore(just(Token::Dot))
        .then(edge.clone())
        .map(|(element, edge)| EdgeRef { element, edge });

    // One summand, sign not yet applied. At most one `*`; the multiplier may
    // sit on either side of a reference but only in front of a measurement.
    let term = choice((
        number
            .then_ignore(just(Token::Star))
            .then(edge_ref.clone())
            .map(|(multiplier, reference)| Term::reference(multiplier, reference)),
        edge_ref
            .clone()
            .then_ignore(just(Token::Star))
            .then(number)
            .map(|(reference, multiplier)| Term::reference(multiplier, reference)),
        number
            .then_ignore(just(Token::Star))
            .then(measurement.clone())
            .map(|(multiplier, offset)| Term {
                multiplier,
                reference: None,
                offset,
            }),
        measurement.map(Term::constant),
        edge_ref.map(|reference| Term::reference(1.0, reference)),
    ))
    .map_with(|t, e| Spanned::new(t, span_range(&e.span())));

    let sign = choice((just(Token::Plus).to(1.0f64), just(Token::Minus).to(-1.0f64)));

    // expr := term (("+"|"-") term)* with no leading sign
    let expr = term
        .clone()
        .then(sign.then(term).repeated().collect::<Vec<_>>())
        .map(|(first, rest)| {
            let mut terms = vec![first];
            for (sign, t) in rest {
                if sign < 0.0 {
                    let span = t.span.clone();
                    terms.push(Spanned::new(t.node.negate(), span));
                } else {
                    terms.push(t);
                }
            }
            terms
        });

    identifier
        .then_ignore(just(Token::Dot))
        .then(edge)
        .then_ignore(just(Token::Equals))
        .then(expr)
        .map_with(|((target_element, target_edge), terms), e| {
            Spanned::new(
                ConstraintDecl {
                    target_element,
                    target_edge,
                    terms,
                },
                span_range(&e.span()),
            )
        })
}

fn document_parser<'a, I>() -> impl Parser<'a, I, Document, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    constraint_parser()
        .repeated()
        .collect()
        .then_ignore(end())
        .map(|constraints| Document { constraints })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(input: &str) -> ConstraintDecl {
        parse_constraint(input).expect("should parse").node
    }

    #[test]
    fn test_parse_constant_constraint() {
        let c = single("w.left = 10px");
        assert_eq!(c.target_element.node.as_str(), "w");
        assert_eq!(c.target_edge.node, Edge::Left);
        assert_eq!(c.terms.len(), 1);
        assert_eq!(
            c.terms[0].node,
            Term::constant(Measurement::new(10.0, Unit::Pixel))
        );
    }

    #[test]
    fn test_parse_bare_number_defaults_to_pixels() {
        let c = single("w.top = 25");
        assert_eq!(
            c.terms[0].node.offset,
            Measurement::new(25.0, Unit::Pixel)
        );
    }

    #[test]
    fn test_parse_physical_measurement() {
        let c = single("w.width = 0.5in");
        assert_eq!(
            c.terms[0].node.offset,
            Measurement::new(0.5, Unit::Inch)
        );
    }

    #[test]
    fn test_parse_reference_with_offset() {
        let c = single("b.left = a.right + 5px");
        assert_eq!(c.terms.len(), 2);

        let first = &c.terms[0].node;
        assert_eq!(first.multiplier, 1.0);
        let r = first.reference.as_ref().expect("reference term");
        assert_eq!(r.element.node, ElementRef::Named(Identifier::new("a")));
        assert_eq!(r.edge.node, Edge::Right);

        let second = &c.terms[1].node;
        assert!(second.reference.is_none());
        assert_eq!(second.multiplier, 1.0);
        assert_eq!(second.offset, Measurement::new(5.0, Unit::Pixel));
    }

    #[test]
    fn test_parse_subtraction_negates_term() {
        let c = single("b.left = a.right - 0.5in");
        let second = &c.terms[1].node;
        assert_eq!(second.multiplier, -1.0);
        assert_eq!(second.offset, Measurement::new(0.5, Unit::Inch));
    }

    #[test]
    fn test_parse_multiplier_prefix() {
        let c = single("b.width = 2 * a.width");
        let t = &c.terms[0].node;
        assert_eq!(t.multiplier, 2.0);
        assert!(t.reference.is_some());
    }

    #[test]
    fn test_parse_multiplier_suffix() {
        let c = single("b.width = a.width * 0.5");
        let t = &c.terms[0].node;
        assert_eq!(t.multiplier, 0.5);
        assert!(t.reference.is_some());
    }

    #[test]
    fn test_parse_scaled_measurement() {
        let c = single("b.width = 2 * 1in");
        let t = &c.terms[0].node;
        assert_eq!(t.multiplier, 2.0);
        assert!(t.reference.is_none());
        assert_eq!(t.offset, Measurement::new(1.0, Unit::Inch));
    }

    #[test]
    fn test_parse_self_and_parent_aliases() {
        let c = single("w.right = parent.width - self.width");
        assert_eq!(
            c.terms[0].node.reference.as_ref().unwrap().element.node,
            ElementRef::Parent
        );
        let second = &c.terms[1].node;
        assert_eq!(second.multiplier, -1.0);
        assert_eq!(
            second.reference.as_ref().unwrap().element.node,
            ElementRef::SelfRef
        );
    }

    #[test]
    fn test_parse_document_multiple_lines() {
        let doc = parse("a.left = 10px\nb.left = a.right + 5px\n").expect("should parse");
        assert_eq!(doc.constraints.len(), 2);
    }

    #[test]
    fn test_reject_missing_dot_reference() {
        assert!(parse_constraint("b.left = a + 5px").is_err());
    }

    #[test]
    fn test_reject_double_star() {
        assert!(parse_constraint("b.left = 2 * 3 * a.width").is_err());
    }

    #[test]
    fn test_reject_leading_sign() {
        assert!(parse_constraint("b.left = -5px").is_err());
    }

    #[test]
    fn test_reject_missing_expression() {
        assert!(parse_constraint("b.left =").is_err());
    }

    #[test]
    fn test_reject_reserved_word_as_element_name() {
        assert!(parse_constraint("width.left = 10px").is_err());
    }

    #[test]
    fn test_reject_unrecognized_characters_after_valid_prefix() {
        // A valid constraint followed by garbage must not be accepted
        let errs = parse_constraint("a.left = 10px @ # $").unwrap_err();
        let crate::ParseError::MalformedExpression { message, span, .. } = &errs[0];
        assert!(message.contains("unrecognized character"), "got: {message}");
        assert_eq!(*span, 14..15);
    }

    #[test]
    fn test_reject_variable_times_variable() {
        assert!(parse_constraint("b.left = a.width * c.width").is_err());
    }
}
