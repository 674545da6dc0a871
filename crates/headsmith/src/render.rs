//! Plain-text timeline view.

use std::fmt::Write as _;

use headsmith_history::HistoryTree;

/// Draw the history as an indented tree, one node per line.
///
/// Each line starts with the node's timeline row index (what script `jump`
/// and `prune` take), then `├─`/`└─` connectors and the id tail. The
/// current node is marked with `*`.
///
/// ```text
///   0  9c41d2e0
///   1  ├─ 03b7aa51
///   2  └─ 5e2f0c8d
///   3     └─ a1d94b27 *
/// ```
pub fn render_timeline(tree: &HistoryTree) -> String {
    let mut out = String::new();
    // is_last flag of each open ancestor below the root
    let mut open: Vec<bool> = Vec::new();

    for (index, row) in tree.timeline().enumerate() {
        let mut prefix = String::new();
        if row.depth > 0 {
            open.truncate(row.depth - 1);
            for last in &open {
                prefix.push_str(if *last { "   " } else { "│  " });
            }
            prefix.push_str(if row.is_last { "└─ " } else { "├─ " });
            open.push(row.is_last);
        }

        let marker = if row.is_current { " *" } else { "" };
        let _ = writeln!(out, "{index:>3}  {prefix}{}{marker}", row.id.tail());
    }

    out
}

#[cfg(test)]
mod tests {
    use headsmith_types::{Preview, Snapshot};

    use super::*;

    fn snap(s: &str) -> Snapshot {
        Snapshot::from(s)
    }

    #[test]
    fn test_empty_tree_renders_nothing() {
        assert_eq!(render_timeline(&HistoryTree::new()), "");
    }

    #[test]
    fn test_branches_and_current_marker() {
        let mut tree = HistoryTree::with_root(snap("r"), Preview::from("p"));
        let r = tree.current_id().unwrap();
        let a = tree.record_checkpoint(snap("a"), Preview::from("p")).unwrap();
        tree.undo();
        let b = tree.record_checkpoint(snap("b"), Preview::from("p")).unwrap();
        let c = tree.record_checkpoint(snap("c"), Preview::from("p")).unwrap();

        let expected = format!(
            "  0  {}\n  1  ├─ {}\n  2  └─ {}\n  3     └─ {} *\n",
            r.tail(),
            a.tail(),
            b.tail(),
            c.tail()
        );
        assert_eq!(render_timeline(&tree), expected);
    }

    #[test]
    fn test_open_branch_draws_rail() {
        let mut tree = HistoryTree::with_root(snap("r"), Preview::from("p"));
        tree.record_checkpoint(snap("a"), Preview::from("p")).unwrap();
        tree.record_checkpoint(snap("a1"), Preview::from("p")).unwrap();
        tree.undo();
        tree.undo();
        tree.record_checkpoint(snap("b"), Preview::from("p")).unwrap();

        let rendered = render_timeline(&tree);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("  1  ├─ "));
        assert!(lines[2].starts_with("  2  │  └─ "));
        assert!(lines[3].starts_with("  3  └─ "));
        assert!(lines[3].ends_with(" *"));
    }
}
