pub struct DotTree {
    name: String,
    is_error: bool,
    children: Vec<DotTree>,
}

impl DotTree {
    pub fn new(name: String, children: Vec<DotTree>) -> Self {
        Self {
            name,
            is_error: false,
            children,
        }
    }

    pub fn new_leaf(name: String) -> Self {
        Self {
            name,
            is_error: false,
            children: vec![],
        }
    }

    pub fn new_error_leaf(name: String) -> Self {
        Self {
            name,
            is_error: true,
            children: vec![],
        }
    }

    /// Writes this node and its subtree, numbering nodes in pre-order starting at `next_id`.
    /// Returns the id given to this node.
    fn to_inner_dot(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        next_id: &mut usize,
    ) -> Result<usize, std::fmt::Error> {
        let id = *next_id;
        *next_id += 1;
        let color = if self.is_error { ", color=red" } else { "" };
        writeln!(f, " n{} [label=\"{}\"{}];", id, escape_label(&self.name), color)?;
        for c in &self.children {
            let child_id = c.to_inner_dot(f, next_id)?;
            writeln!(f, " n{} -> n{};", id, child_id)?;
        }
        Ok(id)
    }
}

fn escape_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

impl std::fmt::Display for DotTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "digraph ParseTree {{")?;
        writeln!(f, " ordering=\"out\"")?;
        self.to_inner_dot(f, &mut 0)?;
        writeln!(f, "}}")?;

        Ok(())
    }
}
