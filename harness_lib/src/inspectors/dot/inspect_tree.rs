use super::{DotTree, ToDot};
use crate::tree::ParseTree;

impl ToDot for ParseTree {
    fn to_dot(&self) -> DotTree {
        match self {
            ParseTree::Rule { children, .. } => DotTree::new(
                self.node_text(),
                children.iter().map(ToDot::to_dot).collect(),
            ),
            ParseTree::Terminal(_) => DotTree::new_leaf(self.node_text()),
            ParseTree::Error(_) => DotTree::new_error_leaf(self.node_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        inspectors::dot::inspect_tree,
        token::{Token, DEFAULT_CHANNEL},
        tree::ParseTree,
    };

    #[test]
    fn numbers_nodes_in_pre_order() {
        let token = |text: &str| Token {
            token_type: 1,
            channel: DEFAULT_CHANNEL,
            start: 0,
            stop: 0,
            line: 1,
            column: 0,
            text: text.to_owned(),
            index: 0,
        };
        let mut value = ParseTree::rule("value");
        value.push(ParseTree::Terminal(token("\"x\"")));
        value.push(ParseTree::Error(token("#")));

        let expected = "digraph ParseTree {
 ordering=\"out\"
 n0 [label=\"value\"];
 n1 [label=\"\\\"x\\\"\"];
 n0 -> n1;
 n2 [label=\"#\", color=red];
 n0 -> n2;
}
";
        pretty_assertions::assert_str_eq!(inspect_tree(&value), expected);
    }
}
