//! CSS syntax parser using the `cssparser` crate.
//!
//! The parser only understands what merging needs: comma-separated selector
//! lists (kept as source text and classified) and flat `property: value`
//! declarations (value kept as written). At-rules are not interpreted; their
//! source text is preserved so they can be written back unchanged.

use classfold_core::declaration::Declaration;
use cssparser::{Delimiter, ParseError as CssParseError, Parser, ParserInput, SourceLocation, Token};

use crate::rules::{StyleItem, StyleRule};
use crate::selector::Selector;
use crate::{Error, Result};

const TARGET: &str = "classfold_style::parser";

/// Parse a CSS stylesheet string into a list of items.
///
/// Rules that fail to parse are skipped with a warning logged, and so are
/// individual malformed declarations.
///
/// # Error Recovery
///
/// Parse errors in individual rules do not cause the entire parse to fail.
/// Instead, the parser:
/// 1. Logs the error via `tracing::warn!`
/// 2. Skips to the next rule (after the closing `}`)
/// 3. Continues parsing subsequent rules
///
/// # Example
///
/// ```
/// use classfold_style::parser::parse_css;
///
/// let items = parse_css(".x-a { color: red; } @font-face { font-family: A; }")?;
/// assert_eq!(items.len(), 2);
/// # Ok::<(), classfold_style::Error>(())
/// ```
pub fn parse_css(css: &str) -> Result<Vec<StyleItem>> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut items = vec![];
    let mut order = 0u32;

    loop {
        // Skip whitespace and comments
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        if at_keyword_next(&mut parser) {
            items.push(StyleItem::Verbatim(parse_at_rule(&mut parser)));
            continue;
        }

        match parse_rule(&mut parser, order) {
            Ok(rule) => {
                items.push(StyleItem::Rule(rule));
                order += 1;
            }
            Err(e) => {
                tracing::warn!(target: TARGET, "CSS parse error: {}", e);
                // Try to recover by skipping to next rule
                skip_to_next_rule(&mut parser);
            }
        }
    }

    tracing::debug!(target: TARGET, items = items.len(), rules = order, "parsed stylesheet");
    Ok(items)
}

fn at_keyword_next(parser: &mut Parser<'_, '_>) -> bool {
    let state = parser.state();
    let found = matches!(parser.next(), Ok(Token::AtKeyword(_)));
    parser.reset(&state);
    found
}

/// Consume an at-rule (statement or block form) and return its source text.
fn parse_at_rule(parser: &mut Parser<'_, '_>) -> String {
    let start = parser.position();
    loop {
        match parser.next() {
            Ok(Token::Semicolon) | Err(_) => break,
            Ok(Token::CurlyBracketBlock) => {
                let _ = parser.parse_nested_block(|p| {
                    while p.next().is_ok() {}
                    Ok::<_, CssParseError<'_, ()>>(())
                });
                break;
            }
            _ => {}
        }
    }
    parser.slice_from(start).trim().to_string()
}

fn error_at(location: SourceLocation, message: String) -> Error {
    Error::parse(message, location.line + 1, location.column)
}

/// Parse a single CSS rule: selector-list { declarations }
fn parse_rule(parser: &mut Parser<'_, '_>, order: u32) -> Result<StyleRule> {
    let location = parser.current_source_location();

    let selectors = parser
        .parse_until_before(Delimiter::CurlyBracketBlock, |p| {
            p.parse_comma_separated(|p| parse_selector(p))
        })
        .map_err(|e: CssParseError<'_, ()>| {
            error_at(location, format!("Failed to parse selector: {:?}", e.kind))
        })?;

    let declarations = match parser.next() {
        Ok(Token::CurlyBracketBlock) => parser
            .parse_nested_block(|block_parser| parse_declarations(block_parser))
            .map_err(|e: CssParseError<'_, ()>| {
                error_at(
                    location,
                    format!("Failed to parse declaration block: {:?}", e.kind),
                )
            })?,
        _ => {
            return Err(error_at(location, "Expected '{' after selector".to_string()));
        }
    };

    Ok(StyleRule::new(selectors, declarations, order))
}

/// Parse one selector of a comma-separated list, keeping its source text.
fn parse_selector<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<Selector, CssParseError<'i, ()>> {
    let start = parser.position();
    while parser.next().is_ok() {}

    let text = parser.slice_from(start).trim();
    if text.is_empty() {
        return Err(parser.new_custom_error(()));
    }
    Ok(Selector::parse(text))
}

/// Parse declarations inside a { } block.
fn parse_declarations<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<Vec<Declaration>, CssParseError<'i, ()>> {
    let mut declarations = vec![];

    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        // Stray semicolon
        if parser.try_parse(|p| p.expect_semicolon()).is_ok() {
            continue;
        }

        let location = parser.current_source_location();
        let property = match parser.expect_ident() {
            Ok(name) => Some(name.to_string()),
            Err(_) => None,
        };
        let Some(property) = property else {
            tracing::warn!(
                target: TARGET,
                line = location.line + 1,
                column = location.column,
                "Expected property name, skipping declaration"
            );
            skip_declaration(parser);
            continue;
        };

        if parser.expect_colon().is_err() {
            tracing::warn!(
                target: TARGET,
                property = %property,
                "Expected ':' after property name"
            );
            skip_declaration(parser);
            continue;
        }

        let start = parser.position();
        let _ = parser.parse_until_before(Delimiter::Semicolon, |p| {
            while p.next().is_ok() {}
            Ok::<_, CssParseError<'_, ()>>(())
        });
        let value = parser.slice_from(start);

        // Skip optional semicolon
        let _ = parser.try_parse(|p| p.expect_semicolon());

        if value.trim().is_empty() {
            tracing::warn!(
                target: TARGET,
                property = %property,
                "Empty value, skipping declaration"
            );
            continue;
        }

        declarations.push(Declaration::new(&property, value));
    }

    Ok(declarations)
}

/// Skip tokens until we reach the next rule.
fn skip_to_next_rule(parser: &mut Parser<'_, '_>) {
    let mut depth = 0;
    loop {
        match parser.next() {
            Ok(Token::CurlyBracketBlock) => {
                depth += 1;
                if depth == 1 {
                    // Skip block contents
                    let _ = parser.parse_nested_block(|p| {
                        while !p.is_exhausted() {
                            let _ = p.next();
                        }
                        Ok::<_, CssParseError<'_, ()>>(())
                    });
                    return;
                }
            }
            Ok(Token::CloseCurlyBracket) => {
                if depth > 0 {
                    depth -= 1;
                }
                if depth == 0 {
                    return;
                }
            }
            Err(_) => return,
            _ => {}
        }
    }
}

/// Skip tokens until the end of the current declaration.
fn skip_declaration(parser: &mut Parser<'_, '_>) {
    loop {
        match parser.next() {
            Ok(Token::Semicolon) | Err(_) => return,
            _ => {}
        }
    }
}
