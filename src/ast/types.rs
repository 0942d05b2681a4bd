use compact_str::CompactString;
use serde::Serialize;
use smallvec::SmallVec;

/// One top-level SQL statement in parser-independent form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub index:      usize,
    pub kind:       StatementKind,
    pub projection: Projection,
    pub predicate:  Option<Expression>,
    pub location:   Option<SourceLocation>
}

impl Statement {
    pub fn new(index: usize, kind: StatementKind) -> Self {
        Self {
            index,
            kind,
            projection: Projection::Columns(Vec::new()),
            predicate: None,
            location: None
        }
    }

    /// Line of the statement start, if the parser reported one
    pub fn line(&self) -> Option<u64> {
        self.location.map(|loc| loc.line)
    }
}

/// Type of SQL statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Other
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Select => write!(f, "SELECT"),
            Self::Insert => write!(f, "INSERT"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
            Self::Other => write!(f, "OTHER")
        }
    }
}

/// Select list of a statement
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    /// A single bare `*`
    Star,
    /// Explicit column expressions, in source order
    Columns(Vec<Expression>)
}

impl Projection {
    /// True for `*` or when any projected expression is a wildcard reference
    pub fn has_wildcard(&self) -> bool {
        match self {
            Self::Star => true,
            Self::Columns(cols) => cols.iter().any(Expression::is_wildcard)
        }
    }
}

/// 1-based position of a statement in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub line:   u64,
    pub column: u64
}

/// Kind of a literal value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralKind {
    String,
    Number,
    Other
}

/// Node of a normalized expression tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expression {
    BinaryOp {
        operator: CompactString,
        left:     Box<Expression>,
        right:    Box<Expression>
    },
    ColumnRef {
        name: CompactString
    },
    Literal {
        value: String,
        kind:  LiteralKind
    },
    /// Opaque node; `children` keeps nested expressions reachable
    Unknown {
        text:     String,
        children: Vec<Expression>
    }
}

impl Expression {
    pub fn binary(
        operator: impl Into<CompactString>,
        left: Expression,
        right: Expression
    ) -> Self {
        Self::BinaryOp {
            operator: operator.into(),
            left:     Box::new(left),
            right:    Box::new(right)
        }
    }

    pub fn column(name: impl Into<CompactString>) -> Self {
        Self::ColumnRef {
            name: name.into()
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            kind:  LiteralKind::String
        }
    }

    pub fn number(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            kind:  LiteralKind::Number
        }
    }

    pub fn unknown(text: impl Into<String>, children: Vec<Expression>) -> Self {
        Self::Unknown {
            text: text.into(),
            children
        }
    }

    /// `*` or `qualifier.*`
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::ColumnRef { name } if name.as_str() == "*" || name.ends_with(".*"))
    }

    /// Direct children in traversal order (left before right)
    pub fn children(&self) -> SmallVec<[&Expression; 2]> {
        match self {
            Self::BinaryOp {
                left,
                right,
                ..
            } => SmallVec::from_buf([left.as_ref(), right.as_ref()]),
            Self::Unknown {
                children, ..
            } => children.iter().collect(),
            Self::ColumnRef {
                ..
            }
            | Self::Literal {
                ..
            } => SmallVec::new()
        }
    }
}
