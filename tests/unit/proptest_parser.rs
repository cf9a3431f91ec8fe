//! Property-based tests for the lexer and parser
//!
//! Uses proptest to verify properties that should hold for all inputs.

use proptest::prelude::*;
use stencil::node::{TextNode, VariableNode, downcast};
use stencil::{Context, Template, Token, TokenParser, until};

/// Text, variable or comment tokens with arbitrary payloads
fn inline_token() -> impl Strategy<Value = Token> {
    prop_oneof![
        "[a-zA-Z0-9 .,!]{0,12}".prop_map(Token::Text),
        "[a-z_][a-z0-9_.]{0,8}".prop_map(Token::Variable),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Token::Comment),
    ]
}

proptest! {
    /// Inline tokens map one-to-one onto nodes, comments excluded, in order
    #[test]
    fn inline_tokens_become_nodes_in_order(tokens in prop::collection::vec(inline_token(), 0..32)) {
        let expected: Vec<Token> = tokens
            .iter()
            .filter(|t| !matches!(t, Token::Comment(_)))
            .cloned()
            .collect();

        let mut parser = TokenParser::new(tokens);
        let nodes = parser.parse().unwrap();
        prop_assert_eq!(nodes.len(), expected.len());

        for (node, token) in nodes.iter().zip(&expected) {
            match token {
                Token::Text(text) => {
                    let node = downcast::<TextNode>(node.as_ref());
                    prop_assert_eq!(node.map(TextNode::text), Some(text.as_str()));
                },
                Token::Variable(expr) => {
                    let node = downcast::<VariableNode>(node.as_ref());
                    prop_assert_eq!(node.map(|n| n.variable().expression()), Some(expr.trim()));
                },
                _ => unreachable!(),
            }
        }
    }

    /// Unregistered block tags never produce nodes or errors
    #[test]
    fn unknown_tags_are_dropped(
        texts in prop::collection::vec("[a-z]{1,5}", 0..10),
        tag in "zz[a-z]{1,6}"
    ) {
        let mut tokens = Vec::new();
        for text in &texts {
            tokens.push(Token::block(tag.clone()));
            tokens.push(Token::text(text.clone()));
        }

        let mut parser = TokenParser::new(tokens);
        prop_assert_eq!(parser.parse().unwrap().len(), texts.len());
    }

    /// A terminated sub-parse leaves exactly the delimiter and what follows
    #[test]
    fn parse_until_leaves_delimiter(
        before in prop::collection::vec("[a-z]{1,5}", 0..8),
        after in prop::collection::vec("[a-z]{1,5}", 0..8)
    ) {
        let mut tokens: Vec<Token> = before.iter().cloned().map(Token::Text).collect();
        tokens.push(Token::block("endx"));
        tokens.extend(after.iter().cloned().map(Token::Text));

        let mut parser = TokenParser::new(tokens);
        let nodes = parser.parse_until(until(["endx"])).unwrap();
        prop_assert_eq!(nodes.len(), before.len());
        prop_assert_eq!(parser.remaining(), after.len() + 1);
        prop_assert_eq!(parser.next_token(), Some(Token::block("endx")));
    }

    /// Source without delimiters renders back unchanged
    #[test]
    fn plain_text_renders_verbatim(source in "[a-zA-Z0-9 .,!\n]{0,64}") {
        let template = Template::new(&source).unwrap();
        prop_assert_eq!(template.render(&mut Context::new()).unwrap(), source);
    }
}
