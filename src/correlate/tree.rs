// Serializable test tree
// Concrete correlation target used by the CLI and tests. Editors bring
// their own node type; this one round-trips through JSON.

use super::{TestItem, TestOutcome};
use serde::{Deserialize, Serialize};

/// One node of a discovered test tree.
/// Ids follow the `kind:path` convention of the discovery side
/// (`group:`, `file:`, with `::`-joined segments for nested entries);
/// correlation never reads or rewrites them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub children: Vec<TreeNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<TestOutcome>,
}

impl TreeNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
            outcome: None,
        }
    }

    pub fn with_children(
        id: impl Into<String>,
        label: impl Into<String>,
        children: Vec<TreeNode>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children,
            outcome: None,
        }
    }
}

impl TestItem for TreeNode {
    fn label(&self) -> &str {
        &self.label
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Self] {
        &mut self.children
    }

    fn set_outcome(&mut self, outcome: TestOutcome) {
        self.outcome = Some(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_json_round_trip() {
        let tree = TreeNode::with_children(
            "group:src",
            "src",
            vec![TreeNode::new("file:src/a.spec.ts::works", "works")],
        );

        let json = serde_json::to_string(&tree).unwrap();
        let back: TreeNode = serde_json::from_str(&json).unwrap();
        assert_eq!(tree, back);
    }

    #[test]
    fn test_tree_deserializes_without_children_field() {
        let node: TreeNode =
            serde_json::from_str(r#"{"id":"file:a.spec.ts::t","label":"t"}"#).unwrap();
        assert!(node.children.is_empty());
        assert!(node.outcome.is_none());
    }

    #[test]
    fn test_set_outcome_does_not_touch_identity() {
        let mut node = TreeNode::new("file:a.spec.ts::t", "t");
        node.set_outcome(TestOutcome::Passed { duration_ms: None });
        assert_eq!(node.id, "file:a.spec.ts::t");
        assert_eq!(node.label, "t");
    }
}
