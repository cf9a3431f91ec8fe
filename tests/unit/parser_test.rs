//! Tests for the token parser core

use std::cell::Cell;
use std::rc::Rc;

use stencil::error::ParseError;
use stencil::node::{Node, NodeList, TextNode, downcast, render_nodes};
use stencil::{Context, Token, TokenParser, until};

use crate::common::{text_of, variable_of};

/// Composite node used to check nested parsing
#[derive(Debug)]
struct SectionNode {
    body: NodeList,
}

impl Node for SectionNode {
    fn render(&self, context: &mut Context) -> Result<String, stencil::RenderError> {
        Ok(format!("[{}]", render_nodes(&self.body, context)?))
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

fn parse_section(parser: &mut TokenParser, _token: &Token) -> Result<Box<dyn Node>, ParseError> {
    let body = parser.parse_until(until(["endsection"]))?;
    match parser.next_token() {
        Some(end) if end.tag_name() == Some("endsection") => Ok(Box::new(SectionNode { body })),
        _ => Err(ParseError::missing_end("section", "endsection")),
    }
}

// =============================================================================
// INLINE TOKENS
// =============================================================================

#[test]
fn test_text_variable_comment() {
    let mut parser = TokenParser::new(vec![
        Token::text("Hi "),
        Token::variable("name"),
        Token::comment("note"),
        Token::text("!"),
    ]);

    let nodes = parser.parse().unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(text_of(nodes[0].as_ref()), "Hi ");
    assert_eq!(variable_of(nodes[1].as_ref()), "name");
    assert_eq!(text_of(nodes[2].as_ref()), "!");
}

#[test]
fn test_empty_stream() {
    let mut parser = TokenParser::new(Vec::new());
    assert!(parser.parse().unwrap().is_empty());
    assert!(parser.next_token().is_none());
}

#[test]
fn test_unknown_tag_is_dropped() {
    let mut parser =
        TokenParser::new(vec![Token::text("a"), Token::block("mystery arg"), Token::text("b")]);

    let nodes = parser.parse().unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(text_of(nodes[0].as_ref()), "a");
    assert_eq!(text_of(nodes[1].as_ref()), "b");
}

#[test]
fn test_empty_block_is_dropped() {
    let mut parser = TokenParser::new(vec![Token::block(""), Token::text("x")]);
    assert_eq!(parser.parse().unwrap().len(), 1);
}

// =============================================================================
// REGISTRY
// =============================================================================

#[test]
fn test_builtins_registered() {
    let parser = TokenParser::new(Vec::new());
    assert_eq!(parser.tag_names(), vec!["for", "if", "ifnot", "include", "now"]);
}

#[test]
fn test_register_tag_dispatch() {
    let mut parser = TokenParser::new(vec![Token::block("hello world")]);
    parser.register_tag("hello", |_parser, token| {
        Ok(Box::new(TextNode::new(token.components()[1].clone())))
    });

    let nodes = parser.parse().unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(text_of(nodes[0].as_ref()), "world");
}

#[test]
fn test_last_registration_wins() {
    let mut parser = TokenParser::new(vec![Token::block("greet")]);
    parser.register_tag("greet", |_, _| Ok(Box::new(TextNode::new("one"))));

    let first = parser.parse().unwrap();
    assert_eq!(text_of(first[0].as_ref()), "one");

    parser.register_tag("greet", |_, _| Ok(Box::new(TextNode::new("two"))));
    parser.prepend_token(Token::block("greet"));

    let second = parser.parse().unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(text_of(second[0].as_ref()), "two");
}

#[test]
fn test_register_over_builtin() {
    let mut parser = TokenParser::new(vec![Token::block("for anything")]);
    parser.register_tag("for", |_, _| Ok(Box::new(TextNode::new("custom"))));

    let nodes = parser.parse().unwrap();
    assert_eq!(text_of(nodes[0].as_ref()), "custom");
}

#[test]
fn test_register_mid_parse() {
    let mut parser = TokenParser::new(vec![
        Token::block("late"),
        Token::block("define"),
        Token::block("late"),
    ]);
    parser.register_tag("define", |parser, _| {
        parser.register_tag("late", |_, _| Ok(Box::new(TextNode::new("late"))));
        Ok(Box::new(TextNode::new("defined")))
    });

    let nodes = parser.parse().unwrap();
    let texts: Vec<&str> = nodes.iter().map(|n| text_of(n.as_ref())).collect();
    assert_eq!(texts, vec!["defined", "late"]);
    assert!(parser.has_tag("late"));
}

#[test]
fn test_simple_tag() {
    let mut parser = TokenParser::new(vec![Token::block("shout"), Token::text("!")]);
    parser.register_simple_tag("shout", |ctx| {
        Ok(ctx.get("word").and_then(|v| v.as_str()).unwrap_or("?").to_uppercase())
    });

    let nodes = parser.parse().unwrap();
    let mut ctx = Context::new();
    ctx.set("word", "hey");
    assert_eq!(render_nodes(&nodes, &mut ctx).unwrap(), "HEY!");
}

#[test]
fn test_simple_tag_failure_is_deferred_to_render() {
    let mut parser = TokenParser::new(vec![Token::block("broken")]);
    parser.register_simple_tag("broken", |_| Err(stencil::RenderError::Handler("boom".into())));

    let nodes = parser.parse().expect("simple tags always parse");
    let err = render_nodes(&nodes, &mut Context::new()).unwrap_err();
    assert_eq!(err.to_string(), "boom");
}

// =============================================================================
// ERRORS
// =============================================================================

#[test]
fn test_callback_error_aborts_parse() {
    let calls = Rc::new(Cell::new(0));
    let mut parser = TokenParser::new(vec![
        Token::text("before"),
        Token::block("fail"),
        Token::block("count"),
        Token::text("after"),
    ]);
    parser.register_tag("fail", |_, _| Err(ParseError::syntax("fail", "always fails")));
    let counter = Rc::clone(&calls);
    parser.register_tag("count", move |_, _| {
        counter.set(counter.get() + 1);
        Ok(Box::new(TextNode::new("")))
    });

    let err = parser.parse().unwrap_err();
    assert_eq!(err, ParseError::syntax("fail", "always fails"));
    assert_eq!(calls.get(), 0);
    assert_eq!(parser.remaining(), 2);
    assert_eq!(parser.next_token(), Some(Token::block("count")));
}

#[test]
fn test_nested_error_propagates_unchanged() {
    let mut parser = TokenParser::new(vec![
        Token::block("section"),
        Token::block("section"),
        Token::block("fail"),
        Token::block("endsection"),
        Token::block("endsection"),
    ]);
    parser.register_tag("section", parse_section);
    parser.register_tag("fail", |_, _| Err(ParseError::syntax("fail", "deep")));

    assert_eq!(parser.parse().unwrap_err(), ParseError::syntax("fail", "deep"));
}

#[test]
fn test_strict_mode_rejects_unknown_tags() {
    let options = stencil::config::ParserOptions::strict();
    let mut parser = TokenParser::with_options(vec![Token::block("mystery")], options);

    assert_eq!(parser.parse().unwrap_err(), ParseError::UnknownTag("mystery".to_string()));
}

#[test]
fn test_strict_mode_still_terminates() {
    let options = stencil::config::ParserOptions::strict();
    let mut parser = TokenParser::with_options(vec![Token::text("a"), Token::block("endx")], options);

    let nodes = parser.parse_until(until(["endx"])).unwrap();
    assert_eq!(nodes.len(), 1);
}

// =============================================================================
// TERMINATION
// =============================================================================

#[test]
fn test_parse_until_pushes_back_delimiter() {
    let mut parser = TokenParser::new(vec![
        Token::text("body"),
        Token::block("endX"),
        Token::text("after"),
    ]);

    let nodes = parser.parse_until(until(["endX"])).unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(text_of(nodes[0].as_ref()), "body");
    assert_eq!(parser.next_token(), Some(Token::block("endX")));
    assert_eq!(parser.next_token(), Some(Token::text("after")));
}

#[test]
fn test_parse_until_matches_any_name() {
    let mut parser = TokenParser::new(vec![Token::text("a"), Token::block("else"), Token::block("endif")]);

    parser.parse_until(until(["endif", "else"])).unwrap();
    assert_eq!(parser.peek_token(), Some(&Token::block("else")));
}

#[test]
fn test_parse_until_exhausts_without_match() {
    let mut parser = TokenParser::new(vec![Token::text("a"), Token::text("b")]);

    let nodes = parser.parse_until(until(["endX"])).unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(parser.remaining(), 0);
}

#[test]
fn test_termination_wins_over_registration() {
    let mut parser = TokenParser::new(vec![Token::block("stop")]);
    parser.register_tag("stop", |_, _| panic!("must not be dispatched"));

    let nodes = parser.parse_until(until(["stop"])).unwrap();
    assert!(nodes.is_empty());
    assert_eq!(parser.peek_token(), Some(&Token::block("stop")));
}

#[test]
fn test_until_ignores_non_block_tokens() {
    let mut parser = TokenParser::new(vec![Token::text("endX"), Token::variable("endX")]);

    let nodes = parser.parse_until(until(["endX"])).unwrap();
    assert_eq!(nodes.len(), 2);
}

#[test]
fn test_until_matches_tag_name_only() {
    let mut parser = TokenParser::new(vec![Token::block("endX with args")]);

    assert!(parser.parse_until(until(["endX"])).unwrap().is_empty());
    assert_eq!(parser.remaining(), 1);
}

#[test]
fn test_custom_predicate_sees_parser_state() {
    let mut parser = TokenParser::new(vec![
        Token::block("a"),
        Token::block("b"),
        Token::block("c"),
    ]);

    // Stop on the first block when only one token is left after it
    let nodes = parser.parse_until(|parser, _token| parser.remaining() == 1).unwrap();
    assert!(nodes.is_empty());
    assert_eq!(parser.peek_token(), Some(&Token::block("b")));
}

// =============================================================================
// NESTING
// =============================================================================

#[test]
fn test_section_wraps_body() {
    let mut parser = TokenParser::new(vec![
        Token::block("section"),
        Token::text("body"),
        Token::block("endsection"),
    ]);
    parser.register_tag("section", parse_section);

    let nodes = parser.parse().unwrap();
    assert_eq!(nodes.len(), 1);

    let section = downcast::<SectionNode>(nodes[0].as_ref()).expect("section node");
    assert_eq!(section.body.len(), 1);
    assert_eq!(text_of(section.body[0].as_ref()), "body");
}

#[test]
fn test_nested_sections() {
    let mut parser = TokenParser::new(vec![
        Token::block("section"),
        Token::text("a"),
        Token::block("section"),
        Token::text("b"),
        Token::block("endsection"),
        Token::text("c"),
        Token::block("endsection"),
        Token::text("d"),
    ]);
    parser.register_tag("section", parse_section);

    let nodes = parser.parse().unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(render_nodes(&nodes, &mut Context::new()).unwrap(), "[a[b]c]d");
}

#[test]
fn test_unclosed_section_is_callback_error() {
    let mut parser = TokenParser::new(vec![Token::block("section"), Token::text("body")]);
    parser.register_tag("section", parse_section);

    assert_eq!(
        parser.parse().unwrap_err(),
        ParseError::missing_end("section", "endsection")
    );
}

#[test]
fn test_stray_end_tag_at_top_level_is_dropped() {
    let mut parser = TokenParser::new(vec![Token::text("x"), Token::block("endsection")]);
    parser.register_tag("section", parse_section);

    assert_eq!(parser.parse().unwrap().len(), 1);
}

#[test]
fn test_debug_lists_tags() {
    let parser = TokenParser::new(vec![Token::text("x")]);
    let debug = format!("{parser:?}");
    assert!(debug.contains("1 remaining"));
    assert!(debug.contains("\"for\""));
}
