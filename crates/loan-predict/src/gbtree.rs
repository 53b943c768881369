//! Gradient-boosted tree ensembles stored in the XGBoost JSON model layout.
//!
//! Only the parts needed for binary classification are read:
//!
//! ```text
//! learner.feature_names                      optional column names
//! learner.learner_model_param.base_score     "5E-1" or "[5E-1]"
//! learner.objective.name                     binary:logistic | binary:logitraw | binary:hinge
//! learner.gradient_booster.model.trees[*]    left_children, right_children,
//!                                            split_indices, split_conditions,
//!                                            default_left
//! ```
//!
//! A node is a leaf when its left child is `-1`; its `split_conditions`
//! entry then holds the leaf value. Internal nodes send a row left when
//! `value < split_condition`, and missing values (`NaN`) follow `default_left`.
//! Features, thresholds and leaves are single precision, as in XGBoost's own
//! predictor, so a value that rounds onto a threshold goes right.

use std::path::Path;

use polars::prelude::DataFrame;
use serde::Deserialize;

use loan_common::polars::parse_f64;

use crate::classifier::Classifier;
use crate::error::{ModelLoadError, PredictError};
use crate::frame::feature_matrix;

#[derive(Debug, Deserialize)]
struct XgbDocument {
    learner: XgbLearner,
}

#[derive(Debug, Deserialize)]
struct XgbLearner {
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: XgbBooster,
    learner_model_param: XgbModelParam,
    objective: XgbObjective,
}

#[derive(Debug, Deserialize)]
struct XgbBooster {
    name: String,
    model: XgbTreeModel,
}

#[derive(Debug, Deserialize)]
struct XgbTreeModel {
    trees: Vec<XgbTree>,
}

#[derive(Debug, Deserialize)]
struct XgbTree {
    left_children: Vec<i64>,
    right_children: Vec<i64>,
    split_indices: Vec<i64>,
    split_conditions: Vec<f64>,
    default_left: Vec<Flag>,
}

/// `default_left` is written as 0/1 integers by some versions and booleans by others.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    fn is_set(self) -> bool {
        match self {
            Flag::Bool(b) => b,
            Flag::Int(v) => v != 0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct XgbModelParam {
    base_score: String,
    #[serde(default)]
    num_feature: Option<String>,
    #[serde(default)]
    num_class: Option<String>,
}

#[derive(Debug, Deserialize)]
struct XgbObjective {
    name: String,
}

/// Output transform implied by the training objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Margins are log-odds; `base_score` is a probability.
    Logistic,
    /// Margins are raw scores; `base_score` is already a margin.
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Node {
    left: i64,
    right: i64,
    feature: usize,
    /// Split threshold for internal nodes, leaf value for leaves.
    value: f32,
    default_left: bool,
}

impl Node {
    fn is_leaf(&self) -> bool {
        self.left < 0
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Children always follow their parent, so the walk ends at a leaf.
    fn leaf_value(&self, features: &[f64]) -> f32 {
        let mut idx = 0usize;
        loop {
            let node = &self.nodes[idx];
            if node.is_leaf() {
                return node.value;
            }
            let x = features.get(node.feature).copied().unwrap_or(f64::NAN);
            let go_left = if x.is_nan() {
                node.default_left
            } else {
                (x as f32) < node.value
            };
            let next = if go_left { node.left } else { node.right };
            idx = next as usize;
        }
    }
}

/// A binary tree-ensemble classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEnsemble {
    feature_names: Option<Vec<String>>,
    n_features: usize,
    trees: Vec<Tree>,
    base_margin: f64,
    objective: Objective,
}

impl TreeEnsemble {
    /// Parse and validate an XGBoost JSON model read from `path`.
    pub fn from_json(contents: &str, path: &Path) -> Result<Self, ModelLoadError> {
        let document: XgbDocument =
            serde_json::from_str(contents).map_err(|source| ModelLoadError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_document(document, path)
    }

    fn from_document(document: XgbDocument, path: &Path) -> Result<Self, ModelLoadError> {
        let learner = document.learner;
        let invalid = |message: String| ModelLoadError::InvalidModel {
            path: path.to_path_buf(),
            message,
        };
        let unsupported = |message: String| ModelLoadError::UnsupportedFormat {
            path: path.to_path_buf(),
            message,
        };

        if learner.gradient_booster.name != "gbtree" {
            return Err(unsupported(format!(
                "booster '{}' (only gbtree is supported)",
                learner.gradient_booster.name
            )));
        }
        let objective = match learner.objective.name.as_str() {
            "binary:logistic" => Objective::Logistic,
            "binary:logitraw" | "binary:hinge" => Objective::Raw,
            other => {
                return Err(unsupported(format!(
                    "objective '{other}' (expected a binary objective)"
                )));
            }
        };
        let num_class = learner
            .learner_model_param
            .num_class
            .as_deref()
            .and_then(parse_f64)
            .unwrap_or(0.0);
        if num_class > 1.0 {
            return Err(unsupported(format!("{num_class} classes (expected 2)")));
        }

        let base_score = parse_base_score(&learner.learner_model_param.base_score)
            .ok_or_else(|| {
                invalid(format!(
                    "base_score '{}' is not a number",
                    learner.learner_model_param.base_score
                ))
            })?;
        let base_margin = match objective {
            Objective::Logistic => {
                if !(base_score > 0.0 && base_score < 1.0) {
                    return Err(invalid(format!(
                        "base_score {base_score} must be a probability in (0, 1)"
                    )));
                }
                (base_score / (1.0 - base_score)).ln()
            }
            Objective::Raw => base_score,
        };

        let feature_names = if learner.feature_names.is_empty() {
            None
        } else {
            Some(learner.feature_names)
        };
        let declared = learner
            .learner_model_param
            .num_feature
            .as_deref()
            .and_then(parse_f64)
            .map(|n| n as usize);
        let n_features = match (&feature_names, declared) {
            (Some(names), Some(declared)) if names.len() != declared => {
                return Err(invalid(format!(
                    "{} feature names but num_feature is {declared}",
                    names.len()
                )));
            }
            (Some(names), _) => names.len(),
            (None, Some(declared)) => declared,
            (None, None) => return Err(invalid("num_feature is missing".to_string())),
        };

        let mut trees = Vec::with_capacity(learner.gradient_booster.model.trees.len());
        for (tree_idx, raw) in learner.gradient_booster.model.trees.into_iter().enumerate() {
            trees.push(build_tree(raw, n_features).map_err(|message| {
                invalid(format!("tree {tree_idx}: {message}"))
            })?);
        }
        if trees.is_empty() {
            return Err(invalid("model has no trees".to_string()));
        }

        Ok(Self {
            feature_names,
            n_features,
            trees,
            base_margin,
            objective,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Raw margin (sum of leaves plus base margin) for one feature vector.
    pub fn margin(&self, features: &[f64]) -> f64 {
        let margin = self
            .trees
            .iter()
            .fold(self.base_margin as f32, |acc, tree| {
                acc + tree.leaf_value(features)
            });
        f64::from(margin)
    }

    /// Probability of the positive class, for logistic objectives.
    pub fn probability(&self, features: &[f64]) -> Option<f64> {
        match self.objective {
            Objective::Logistic => Some(sigmoid(self.margin(features))),
            Objective::Raw => None,
        }
    }

    fn label(&self, features: &[f64]) -> i64 {
        // sigmoid(m) > 0.5 <=> m > 0, so both objectives threshold the margin.
        i64::from(self.margin(features) > 0.0)
    }
}

impl Classifier for TreeEnsemble {
    fn kind(&self) -> &'static str {
        "gbtree"
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, table: &DataFrame) -> Result<Vec<i64>, PredictError> {
        let rows = feature_matrix(table, self.feature_names(), self.n_features)?;
        Ok(rows.iter().map(|row| self.label(row)).collect())
    }
}

fn build_tree(raw: XgbTree, n_features: usize) -> Result<Tree, String> {
    let n = raw.left_children.len();
    if n == 0 {
        return Err("tree has no nodes".to_string());
    }
    if raw.right_children.len() != n
        || raw.split_indices.len() != n
        || raw.split_conditions.len() != n
        || raw.default_left.len() != n
    {
        return Err(format!("node arrays disagree on length (expected {n})"));
    }

    let mut nodes = Vec::with_capacity(n);
    for idx in 0..n {
        let left = raw.left_children[idx];
        let right = raw.right_children[idx];
        let value = raw.split_conditions[idx] as f32;
        if !value.is_finite() {
            return Err(format!("node {idx} has a non-finite split condition"));
        }
        let leaf = left < 0;
        if leaf != (right < 0) {
            return Err(format!("node {idx} has exactly one child"));
        }
        let feature = if leaf {
            0
        } else {
            for child in [left, right] {
                if child as usize >= n || child as usize <= idx {
                    return Err(format!("node {idx} has invalid child {child}"));
                }
            }
            let feature = raw.split_indices[idx];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!(
                    "node {idx} splits on feature {feature} (model has {n_features})"
                ));
            }
            feature as usize
        };
        nodes.push(Node {
            left,
            right,
            feature,
            value,
            default_left: raw.default_left[idx].is_set(),
        });
    }
    Ok(Tree { nodes })
}

/// `base_score` is a string, bracketed as a vector in newer releases.
fn parse_base_score(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().trim_start_matches('[').trim_end_matches(']');
    let first = trimmed.split(',').next()?;
    parse_f64(first)
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
