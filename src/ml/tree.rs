// ============================================================
// Layer 5 — Decision Tree
// ============================================================
// A fitted binary tree stored as a flat node array, the layout
// tree learners export in:
//
//   nodes[0] is the root
//   Split → go left when row[feature] <= threshold, else right
//   Leaf  → a payload vector
//
// What a leaf payload means depends on the model:
//   - random survival forest: survival probability per event time
//   - gradient boosting:      a single additive risk contribution
//
// JSON shape:
//   { "nodes": [
//       { "split": { "feature": 12, "threshold": 8000.0, "left": 1, "right": 2 } },
//       { "leaf": [0.95, 0.80, 0.61] },
//       { "leaf": [0.99, 0.97, 0.92] } ] }
//
// validate() must pass before leaf_for() is called; the model
// constructors in forest.rs and boosting.rs take care of that.

use serde::Deserialize;

use crate::domain::features::{FeatureRow, FEATURE_COLUMNS, NUM_FEATURES};
use crate::ml::error::ModelError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Split {
        feature:   usize,
        threshold: f64,
        left:      usize,
        right:     usize,
    },
    Leaf(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<Node>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Check structure and leaf payloads.
    ///
    /// Children must point strictly forward in the array, which rules
    /// out cycles and guarantees every walk ends at a leaf.
    /// `check_leaf` validates each leaf payload.
    pub fn validate(
        &self,
        tree: usize,
        check_leaf: impl Fn(&[f64]) -> Result<(), String>,
    ) -> Result<(), ModelError> {
        let malformed = |node: usize, reason: String| ModelError::MalformedTree { tree, node, reason };

        if self.nodes.is_empty() {
            return Err(malformed(0, "tree has no nodes".into()));
        }

        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split { feature, threshold, left, right } => {
                    if *feature >= NUM_FEATURES {
                        return Err(malformed(i, format!(
                            "feature index {feature} out of range (have {NUM_FEATURES} columns)"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(malformed(i, "threshold is not finite".into()));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(malformed(i, format!("invalid child index {child}")));
                        }
                    }
                }
                Node::Leaf(values) => {
                    check_leaf(values).map_err(|reason| malformed(i, reason))?;
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to the leaf that `row` falls into.
    pub fn leaf_for(&self, row: &FeatureRow) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Split { feature, threshold, left, right } => {
                    idx = if row.0[*feature] <= *threshold { *left } else { *right };
                }
                Node::Leaf(values) => return values,
            }
        }
    }
}

/// Ensure a model was fitted on exactly FEATURE_COLUMNS, in order.
pub fn check_feature_names(model: &str, names: &[String]) -> Result<(), ModelError> {
    let mismatch = |detail: String| ModelError::FeatureMismatch { model: model.to_string(), detail };

    if names.len() != NUM_FEATURES {
        return Err(mismatch(format!("expected {NUM_FEATURES} columns, found {}", names.len())));
    }
    for (i, (got, want)) in names.iter().zip(FEATURE_COLUMNS).enumerate() {
        if got != want {
            return Err(mismatch(format!("column {i} is '{got}', expected '{want}'")));
        }
    }
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn any_leaf(_: &[f64]) -> Result<(), String> {
        Ok(())
    }

    /// Splits on dist_to_5km_threshold_m (column 12) at 8000 m,
    /// then on danger_index (column 14) at 0.5.
    fn sample_tree() -> DecisionTree {
        DecisionTree::new(vec![
            Node::Split { feature: 12, threshold: 8_000.0, left: 1, right: 2 },
            Node::Split { feature: 14, threshold: 0.5, left: 3, right: 4 },
            Node::Leaf(vec![0.9]),
            Node::Leaf(vec![0.6]),
            Node::Leaf(vec![0.2]),
        ])
    }

    fn row_with(col: usize, v: f64, col2: usize, v2: f64) -> FeatureRow {
        let mut r = [0.0; NUM_FEATURES];
        r[col] = v;
        r[col2] = v2;
        FeatureRow(r)
    }

    #[test]
    fn test_routing_uses_less_or_equal() {
        let t = sample_tree();
        assert!(t.validate(0, any_leaf).is_ok());
        // Exactly on the threshold goes left
        assert_eq!(t.leaf_for(&row_with(12, 8_000.0, 14, 0.1)), &[0.6]);
        assert_eq!(t.leaf_for(&row_with(12, 8_000.0, 14, 0.9)), &[0.2]);
        assert_eq!(t.leaf_for(&row_with(12, 8_000.1, 14, 0.1)), &[0.9]);
    }

    #[test]
    fn test_backward_child_rejected() {
        let t = DecisionTree::new(vec![
            Node::Split { feature: 0, threshold: 1.0, left: 0, right: 1 },
            Node::Leaf(vec![0.5]),
        ]);
        let err = t.validate(3, any_leaf).unwrap_err();
        assert!(matches!(err, ModelError::MalformedTree { tree: 3, node: 0, .. }));
    }

    #[test]
    fn test_feature_out_of_range_rejected() {
        let t = DecisionTree::new(vec![
            Node::Split { feature: 16, threshold: 1.0, left: 1, right: 2 },
            Node::Leaf(vec![0.5]),
            Node::Leaf(vec![0.5]),
        ]);
        assert!(t.validate(0, any_leaf).is_err());
    }

    #[test]
    fn test_leaf_check_applied() {
        let t = sample_tree();
        let err = t.validate(1, |v| if v[0] > 0.5 { Err("too big".into()) } else { Ok(()) });
        assert!(matches!(err, Err(ModelError::MalformedTree { node: 2, .. })));
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{ "nodes": [
            { "split": { "feature": 0, "threshold": 10.0, "left": 1, "right": 2 } },
            { "leaf": [1.0] },
            { "leaf": [2.0] } ] }"#;
        let t: DecisionTree = serde_json::from_str(json).unwrap();
        assert_eq!(t.nodes.len(), 3);
        assert_eq!(t.nodes[2], Node::Leaf(vec![2.0]));
    }

    #[test]
    fn test_feature_name_check() {
        let good: Vec<String> = FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect();
        assert!(check_feature_names("rsf", &good).is_ok());

        let mut swapped = good.clone();
        swapped.swap(0, 1);
        assert!(check_feature_names("rsf", &swapped).is_err());
        assert!(check_feature_names("rsf", &good[..15]).is_err());
    }
}
