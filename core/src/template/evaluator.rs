//! Two-pass template evaluation
//!
//! Pass one replaces variable tokens, pass two replaces function tokens in
//! the output of pass one. Each pass walks its input once and never looks at
//! the text it just produced, so substitutions cannot loop.

use phf::phf_map;

use super::{NumberFormat, Segment, Token, tokenize};
use crate::catalog::ItemInstance;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    /// Item id
    Id,
    /// Stack size
    Qty,
    /// Catalog price
    Value,
    /// High alchemy price
    HighAlch,
}

impl Variable {
    pub fn lookup(name: &str) -> Option<Self> {
        VARIABLES.get(name).copied()
    }

    fn value(self, item: &ItemInstance) -> String {
        match self {
            Self::Id => item.id.to_string(),
            Self::Qty => item.quantity.to_string(),
            Self::Value => item.price.to_string(),
            Self::HighAlch => item.high_alch_price.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// `qtymult(N)`: stack size × N (N defaults to 1), digit-grouped
    QtyMult,
}

impl Function {
    pub fn lookup(name: &str) -> Option<Self> {
        FUNCTIONS.get(name).copied()
    }

    /// `None` when the arguments are malformed; the token then stays literal
    fn call(self, args: Option<&str>, item: &ItemInstance, format: &NumberFormat) -> Option<String> {
        match self {
            Self::QtyMult => {
                let multiplier = match args {
                    None => 1,
                    Some(arg) => parse_count(arg)?,
                };
                let total = i64::from(item.quantity).saturating_mul(multiplier);
                Some(format.format(total))
            }
        }
    }
}

static VARIABLES: phf::Map<&'static str, Variable> = phf_map! {
    "ID" => Variable::Id,
    "QTY" => Variable::Qty,
    "VALUE" => Variable::Value,
    "HIGH_ALCH" => Variable::HighAlch,
};

static FUNCTIONS: phf::Map<&'static str, Function> = phf_map! {
    "qtymult" => Function::QtyMult,
};

/// A non-empty run of ASCII digits that fits in an `i64`
fn parse_count(arg: &str) -> Option<i64> {
    if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    arg.parse().ok()
}

/// Renders hover templates against an item instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEvaluator {
    number_format: NumberFormat,
}

impl TemplateEvaluator {
    pub fn new(number_format: NumberFormat) -> Self {
        Self { number_format }
    }

    pub fn number_format(&self) -> NumberFormat {
        self.number_format
    }

    /// Substitute variables, then functions. Unknown or malformed tokens are
    /// copied through unchanged.
    pub fn evaluate(&self, template: &str, item: &ItemInstance) -> String {
        let with_variables = substitute(template, |token| match token.args {
            None => Variable::lookup(token.name).map(|v| v.value(item)),
            Some(_) => None,
        });

        substitute(&with_variables, |token| {
            Function::lookup(token.name)?.call(token.args, item, &self.number_format)
        })
    }
}

fn substitute(text: &str, mut replace: impl FnMut(&Token<'_>) -> Option<String>) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in tokenize(text) {
        match segment {
            Segment::Literal(s) => out.push_str(s),
            Segment::Token(token) => match replace(&token) {
                Some(value) => out.push_str(&value),
                None => out.push_str(token.raw),
            },
        }
    }
    out
}
