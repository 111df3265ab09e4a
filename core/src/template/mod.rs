//! Hover text templates
//!
//! The grammar is fixed and closed:
//! - **Variables** `<%ID%>`, `<%QTY%>`, `<%VALUE%>`, `<%HIGH_ALCH%>`
//! - **Functions** `<%qtymult%>`, `<%qtymult(N)%>`
//!
//! Anything else between `<%` and `%>` is left as literal text.

mod evaluator;
mod number_format;
mod tokenizer;

pub use evaluator::{Function, TemplateEvaluator, Variable};
pub use number_format::NumberFormat;
pub use tokenizer::{Segment, TOKEN_CLOSE, TOKEN_OPEN, Token, tokenize};
