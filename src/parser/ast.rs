//! Abstract syntax tree for the constraint language

use crate::units::Measurement;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Valid identifier (alphanumeric + underscore, starts with letter/_)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the six named rectangle attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Width,
    Top,
    Bottom,
    Height,
}

impl Edge {
    pub fn axis(&self) -> Axis {
        match self {
            Edge::Left | Edge::Right | Edge::Width => Axis::Horizontal,
            Edge::Top | Edge::Bottom | Edge::Height => Axis::Vertical,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Right => "right",
            Edge::Width => "width",
            Edge::Top => "top",
            Edge::Bottom => "bottom",
            Edge::Height => "height",
        }
    }

    /// All six edges, horizontal axis first
    pub fn all() -> [Edge; 6] {
        [
            Edge::Left,
            Edge::Right,
            Edge::Width,
            Edge::Top,
            Edge::Bottom,
            Edge::Height,
        ]
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Grouping of edges into horizontal and vertical triples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The three edges that share this axis
    pub fn edges(&self) -> [Edge; 3] {
        match self {
            Axis::Horizontal => [Edge::Left, Edge::Right, Edge::Width],
            Axis::Vertical => [Edge::Top, Edge::Bottom, Edge::Height],
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "horizontal"),
            Axis::Vertical => write!(f, "vertical"),
        }
    }
}

/// How an expression names an element: a concrete id, or an alias that the
/// constraint resolves against its own target before the resolver runs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementRef {
    Named(Identifier),
    SelfRef,
    Parent,
}

impl std::fmt::Display for ElementRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementRef::Named(id) => write!(f, "{}", id),
            ElementRef::SelfRef => write!(f, "self"),
            ElementRef::Parent => write!(f, "parent"),
        }
    }
}

/// `element.edge` as it appears on the right-hand side of a constraint
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRef {
    pub element: Spanned<ElementRef>,
    pub edge: Spanned<Edge>,
}

/// One signed summand of an expression
///
/// With a reference the term contributes
/// `multiplier * referenced_edge + to_px(offset)`; without one it is a pure
/// constant contributing `multiplier * to_px(offset)`. The sign from the
/// surrounding `+`/`-` lives in the multiplier either way.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub multiplier: f64,
    pub reference: Option<EdgeRef>,
    pub offset: Measurement,
}

impl Term {
    pub fn constant(offset: Measurement) -> Self {
        Self {
            multiplier: 1.0,
            reference: None,
            offset,
        }
    }

    pub fn reference(multiplier: f64, reference: EdgeRef) -> Self {
        Self {
            multiplier,
            reference: Some(reference),
            offset: Measurement::zero(),
        }
    }

    /// Flip the term's sign (applied when the term follows a `-`)
    pub fn negate(mut self) -> Self {
        self.multiplier = -self.multiplier;
        self
    }
}

/// One parsed constraint line: `target.edge = term (+|- term)*`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintDecl {
    pub target_element: Spanned<Identifier>,
    pub target_edge: Spanned<Edge>,
    pub terms: Vec<Spanned<Term>>,
}

/// A parsed batch of constraint lines
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub constraints: Vec<Spanned<ConstraintDecl>>,
}
