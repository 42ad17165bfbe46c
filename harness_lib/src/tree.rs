use crate::{token::Token, util::escape_whitespace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTree {
    Rule {
        name: &'static str,
        children: Vec<ParseTree>,
    },
    Terminal(Token),
    /// A token consumed or conjured during error recovery.
    Error(Token),
}

impl ParseTree {
    pub fn rule(name: &'static str) -> Self {
        ParseTree::Rule {
            name,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, child: ParseTree) {
        match self {
            ParseTree::Rule { children, .. } => children.push(child),
            _ => unreachable!("only rule nodes have children"),
        }
    }

    pub fn children(&self) -> &[ParseTree] {
        match self {
            ParseTree::Rule { children, .. } => children,
            _ => &[],
        }
    }

    /// The text shown for this node: the rule name, or the token text.
    pub fn node_text(&self) -> String {
        match self {
            ParseTree::Rule { name, .. } => escape_whitespace(name),
            ParseTree::Terminal(token) | ParseTree::Error(token) => escape_whitespace(&token.text),
        }
    }

    /// LISP-style rendering, e.g. `(statement select (columns a , b) from t ;)`.
    pub fn to_string_tree(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out);
        out
    }

    fn write_tree(&self, out: &mut String) {
        let children = self.children();
        if children.is_empty() {
            out.push_str(&self.node_text());
            return;
        }
        out.push('(');
        out.push_str(&self.node_text());
        for child in children {
            out.push(' ');
            child.write_tree(out);
        }
        out.push(')');
    }

    /// All leaf tokens in input order, conjured ones included.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            ParseTree::Rule { children, .. } => {
                for child in children {
                    child.collect_tokens(out);
                }
            }
            ParseTree::Terminal(token) | ParseTree::Error(token) => out.push(token),
        }
    }
}
