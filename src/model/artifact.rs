use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::PipelineError;

/// A trained gradient-boosted regression model, dumped to JSON by the
/// training pipeline. The artifact is the contract boundary: this crate
/// never trains, it only loads and evaluates.
///
/// Trees are array-encoded; split nodes reference children by index and the
/// loader enforces that child indices point strictly forward, so traversal
/// always terminates.
#[derive(Debug, Deserialize)]
pub struct ModelArtifact {
    feature_names: Vec<String>,
    base_score: f64,
    trees: Vec<Tree>,
}

#[derive(Debug, Deserialize)]
struct Tree {
    nodes: Vec<TreeNode>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

impl ModelArtifact {
    /// Loads and validates the artifact. Any failure here marks the
    /// prediction service unavailable for the life of the process.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let contents = fs::read_to_string(path)
            .map_err(|err| PipelineError::model_load(path, err.to_string()))?;
        let artifact: ModelArtifact = serde_json::from_str(&contents)
            .map_err(|err| PipelineError::model_load(path, format!("invalid JSON: {err}")))?;
        artifact
            .validate()
            .map_err(|reason| PipelineError::model_load(path, reason))?;
        Ok(artifact)
    }

    fn validate(&self) -> Result<(), String> {
        if self.feature_names.is_empty() {
            return Err("artifact declares no feature names".into());
        }
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(format!("tree {tree_idx} has no nodes"));
            }
            for (node_idx, node) in tree.nodes.iter().enumerate() {
                if let TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } = node
                {
                    if *feature >= self.feature_names.len() {
                        return Err(format!(
                            "tree {tree_idx} node {node_idx} references feature {feature}, \
                             but only {} features are declared",
                            self.feature_names.len()
                        ));
                    }
                    for child in [*left, *right] {
                        if child <= node_idx || child >= tree.nodes.len() {
                            return Err(format!(
                                "tree {tree_idx} node {node_idx} has out-of-order child {child}"
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// The ordered column names the model expects its input vector to use.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Evaluates the ensemble over a vector ordered as `feature_names()`.
    pub fn infer(&self, features: &[f64]) -> f64 {
        self.trees
            .iter()
            .fold(self.base_score, |acc, tree| acc + tree.score(features))
    }
}

impl Tree {
    fn score(&self, features: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    idx = if value < *threshold { *left } else { *right };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_artifact(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn stump_returns_leaf_plus_base_score() {
        let file = write_artifact(
            r#"{
                "feature_names": ["Iron_Feed"],
                "base_score": 1.0,
                "trees": [{"nodes": [{"value": 1.3}]}]
            }"#,
        );
        let artifact = ModelArtifact::load(file.path()).unwrap();
        assert_eq!(artifact.feature_names(), ["Iron_Feed"]);
        assert!((artifact.infer(&[55.0]) - 2.3).abs() < 1e-12);
    }

    #[test]
    fn split_routes_below_threshold_left() {
        let file = write_artifact(
            r#"{
                "feature_names": ["Iron_Feed", "Silica_Feed"],
                "base_score": 0.0,
                "trees": [{"nodes": [
                    {"feature": 1, "threshold": 20.0, "left": 1, "right": 2},
                    {"value": 1.5},
                    {"value": 4.0}
                ]}]
            }"#,
        );
        let artifact = ModelArtifact::load(file.path()).unwrap();
        assert_eq!(artifact.infer(&[55.0, 15.0]), 1.5);
        assert_eq!(artifact.infer(&[55.0, 30.0]), 4.0);
    }

    #[test]
    fn missing_file_is_a_model_load_error() {
        let err = ModelArtifact::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, PipelineError::ModelLoad { .. }));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let file = write_artifact("{ not json");
        assert!(matches!(
            ModelArtifact::load(file.path()),
            Err(PipelineError::ModelLoad { .. })
        ));
    }

    #[test]
    fn out_of_range_feature_index_is_rejected() {
        let file = write_artifact(
            r#"{
                "feature_names": ["Iron_Feed"],
                "base_score": 0.0,
                "trees": [{"nodes": [
                    {"feature": 3, "threshold": 1.0, "left": 1, "right": 2},
                    {"value": 0.0},
                    {"value": 1.0}
                ]}]
            }"#,
        );
        assert!(matches!(
            ModelArtifact::load(file.path()),
            Err(PipelineError::ModelLoad { .. })
        ));
    }

    #[test]
    fn backward_child_index_is_rejected() {
        let file = write_artifact(
            r#"{
                "feature_names": ["Iron_Feed"],
                "base_score": 0.0,
                "trees": [{"nodes": [
                    {"feature": 0, "threshold": 1.0, "left": 0, "right": 1},
                    {"value": 1.0}
                ]}]
            }"#,
        );
        assert!(matches!(
            ModelArtifact::load(file.path()),
            Err(PipelineError::ModelLoad { .. })
        ));
    }
}
