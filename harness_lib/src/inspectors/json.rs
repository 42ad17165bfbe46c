//! JSON renderings of the token list and the parse tree, in the shape the grammar editor reads.
//!
//! Token objects carry `Type`, `Line`, 1-based `Column` and `Length`. `Text` is only present when
//! it differs from the source span (EOF, for instance) and `Channel` only for off-channel tokens.
//! Tree nodes are `{"Type": rule, "Children": [...]}` for rules and `{"Type": "Token", "Index": i}`
//! for tokens, where `i` points into the token list.

use serde_json::{json, Map, Value};

use crate::{
    token::{Token, Vocabulary, DEFAULT_CHANNEL, HIDDEN_CHANNEL},
    tree::ParseTree,
};

fn channel_name(channel: usize) -> Value {
    match channel {
        DEFAULT_CHANNEL => json!("DEFAULT_TOKEN_CHANNEL"),
        HIDDEN_CHANNEL => json!("HIDDEN"),
        other => json!(other),
    }
}

fn token_to_json(token: &Token, vocabulary: &Vocabulary) -> Value {
    let mut object = Map::new();
    let token_type = match vocabulary.symbolic_name(token.token_type) {
        Some(name) => json!(name),
        None => json!(token.token_type),
    };
    object.insert("Type".to_owned(), token_type);
    object.insert("Line".to_owned(), json!(token.line));
    object.insert("Column".to_owned(), json!(token.column + 1));

    let length = token.stop + 1 - token.start as isize;
    if token.stop != -1 {
        object.insert("Length".to_owned(), json!(length));
    }
    let text_length = token.text.chars().count() as isize;
    if !token.text.is_empty() && text_length != length {
        object.insert("Text".to_owned(), json!(token.text));
    }
    if token.channel != DEFAULT_CHANNEL {
        object.insert("Channel".to_owned(), channel_name(token.channel));
    }
    Value::Object(object)
}

fn tree_to_json(tree: &ParseTree) -> Value {
    match tree {
        ParseTree::Rule { name, children } => json!({
            "Type": name,
            "Children": children.iter().map(tree_to_json).collect::<Vec<_>>(),
        }),
        ParseTree::Terminal(token) | ParseTree::Error(token) => json!({
            "Type": "Token",
            "Index": token.index,
        }),
    }
}

/// Renders `tokens` as a pretty-printed JSON array.
pub fn inspect_tokens(tokens: &[Token], vocabulary: &Vocabulary) -> String {
    let tokens: Vec<_> = tokens
        .iter()
        .map(|token| token_to_json(token, vocabulary))
        .collect();
    format!("{:#}\n", Value::Array(tokens))
}

/// Renders `tree` as a pretty-printed JSON object.
pub fn inspect_tree(tree: &ParseTree) -> String {
    format!("{:#}\n", tree_to_json(tree))
}
