mod dot_tree;
mod inspect_tree;

use crate::tree::ParseTree;
use dot_tree::DotTree;

trait ToDot {
    fn to_dot(&self) -> DotTree;
}

pub fn inspect_tree(tree: &ParseTree) -> String {
    tree.to_dot().to_string()
}
