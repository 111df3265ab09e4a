//! Template tokenizer
//!
//! Splits a template into literal runs and `<%NAME%>` / `<%NAME(ARGS)%>`
//! tokens. Whether a token means anything is decided by the evaluator.

pub const TOKEN_OPEN: &str = "<%";
pub const TOKEN_CLOSE: &str = "%>";

/// A `<%...%>` placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The full token text including delimiters, emitted when unrecognized
    pub raw: &'a str,
    pub name: &'a str,
    /// Text between the parentheses, `None` for the bare `<%NAME%>` form
    pub args: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Token(Token<'a>),
}

/// Split `text` into segments.
///
/// When delimiters nest (`<%a(<%B%>)%>`) the innermost well-formed token is
/// taken and the outer opener stays literal. Text that looks like a token but
/// has no identifier name is literal too.
pub fn tokenize(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut pos = 0;

    while let Some(rel) = text[pos..].find(TOKEN_OPEN) {
        let open = pos + rel;
        let body_start = open + TOKEN_OPEN.len();
        let Some(close_rel) = text[body_start..].find(TOKEN_CLOSE) else {
            break;
        };
        let close = body_start + close_rel;
        let end = close + TOKEN_CLOSE.len();
        let body = &text[body_start..close];

        let parsed = if body.contains(TOKEN_OPEN) {
            None
        } else {
            parse_body(body)
        };

        match parsed {
            Some((name, args)) => {
                if literal_start < open {
                    segments.push(Segment::Literal(&text[literal_start..open]));
                }
                segments.push(Segment::Token(Token {
                    raw: &text[open..end],
                    name,
                    args,
                }));
                pos = end;
                literal_start = end;
            }
            None => pos = body_start,
        }
    }

    if literal_start < text.len() {
        segments.push(Segment::Literal(&text[literal_start..]));
    }

    segments
}

/// `NAME` or `NAME(ARGS)`
fn parse_body(body: &str) -> Option<(&str, Option<&str>)> {
    let (name, args) = match body.find('(') {
        Some(paren) => {
            let args = body[paren + 1..].strip_suffix(')')?;
            (&body[..paren], Some(args))
        }
        None => (body, None),
    };

    is_identifier(name).then_some((name, args))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token<'a>(raw: &'a str, name: &'a str, args: Option<&'a str>) -> Segment<'a> {
        Segment::Token(Token { raw, name, args })
    }

    #[test]
    fn splits_literals_and_tokens() {
        assert_eq!(
            tokenize("<%QTY%> x <%ID%>"),
            vec![
                token("<%QTY%>", "QTY", None),
                Segment::Literal(" x "),
                token("<%ID%>", "ID", None),
            ]
        );
    }

    #[test]
    fn parses_function_arguments() {
        assert_eq!(
            tokenize("Total: <%qtymult(3)%>"),
            vec![
                Segment::Literal("Total: "),
                token("<%qtymult(3)%>", "qtymult", Some("3")),
            ]
        );
        assert_eq!(
            tokenize("<%qtymult()%>"),
            vec![token("<%qtymult()%>", "qtymult", Some(""))]
        );
    }

    #[test]
    fn plain_text_is_one_literal() {
        assert_eq!(tokenize("Line A</br>Line B"), vec![Segment::Literal("Line A</br>Line B")]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn malformed_tokens_stay_literal() {
        assert_eq!(tokenize("<%%>"), vec![Segment::Literal("<%%>")]);
        assert_eq!(tokenize("<% QTY %>"), vec![Segment::Literal("<% QTY %>")]);
        assert_eq!(tokenize("<%QTY"), vec![Segment::Literal("<%QTY")]);
        assert_eq!(tokenize("<%f(1%>"), vec![Segment::Literal("<%f(1%>")]);
        assert_eq!(tokenize("50% off %>"), vec![Segment::Literal("50% off %>")]);
    }

    #[test]
    fn nested_opener_yields_inner_token() {
        assert_eq!(
            tokenize("<%qtymult(<%QTY%>)%>"),
            vec![
                Segment::Literal("<%qtymult("),
                token("<%QTY%>", "QTY", None),
                Segment::Literal(")%>"),
            ]
        );
    }

    #[test]
    fn handles_multibyte_text() {
        assert_eq!(
            tokenize("€ <%VALUE%> ✓"),
            vec![
                Segment::Literal("€ "),
                token("<%VALUE%>", "VALUE", None),
                Segment::Literal(" ✓"),
            ]
        );
    }
}
