//! Category selection over a measurement tree.

use thiserror::Error;

use crate::data::{Measurement, MeasurementNode};

/// Error returned when a category path names a child that does not
/// exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category {segment:?} in path {path:?} (available: {available:?})")]
pub struct UnknownCategory {
    /// The full requested path.
    pub path: String,
    /// The path segment that failed to resolve.
    pub segment: String,
    /// Child categories that were available at the failing node.
    pub available: Vec<String>,
}

/// Resolve a `/`-separated category path from `root`.
///
/// Every segment must name a child category of the node reached so far;
/// the node behind the final segment is returned.
pub fn resolve_path<'a>(
    root: &'a MeasurementNode,
    path: &str,
) -> Result<&'a MeasurementNode, UnknownCategory> {
    let mut node = root;
    for segment in path.split('/') {
        node = node.categories.get(segment).ok_or_else(|| UnknownCategory {
            path: path.to_owned(),
            segment: segment.to_owned(),
            available: node.categories.keys().cloned().collect(),
        })?;
    }
    Ok(node)
}

/// Visit every measurement list in the subtree under `node`.
///
/// Child categories are visited before the node's own measurements,
/// depth first in category-name order.
pub fn visit_measurements<'a>(
    node: &'a MeasurementNode,
    visit: &mut impl FnMut(&'a [Measurement]),
) {
    for child in node.categories.values() {
        visit_measurements(child, visit);
    }
    visit(&node.measurements);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> MeasurementNode {
        serde_json::from_str(
            r#"{
                "categories": {
                    "alpha": {
                        "measurements": [{"name": "A", "startTime": 1.0, "responseEnd": 2.0}]
                    },
                    "beta": {
                        "categories": {
                            "cold": {
                                "measurements": [{"name": "C", "startTime": 5.0, "responseEnd": 9.0}]
                            }
                        },
                        "measurements": [{"name": "B", "startTime": 3.0, "responseEnd": 4.0}]
                    }
                },
                "measurements": [{"name": "R", "startTime": 0.0, "responseEnd": 1.0}]
            }"#,
        )
        .expect("fixture must decode")
    }

    #[test]
    fn resolves_nested_path() {
        let root = tree();
        let node = resolve_path(&root, "beta/cold").expect("path exists");
        assert_eq!(node.measurements[0].name, "C");
    }

    #[test]
    fn resolves_single_segment() {
        let root = tree();
        let node = resolve_path(&root, "alpha").expect("path exists");
        assert_eq!(node.measurements[0].name, "A");
    }

    #[test]
    fn unknown_segment_reports_context() {
        let root = tree();
        let err = resolve_path(&root, "beta/warm").unwrap_err();
        assert_eq!(err.path, "beta/warm");
        assert_eq!(err.segment, "warm");
        assert_eq!(err.available, vec!["cold".to_owned()]);
    }

    #[test]
    fn unknown_first_segment_lists_roots() {
        let root = tree();
        let err = resolve_path(&root, "gamma").unwrap_err();
        assert_eq!(err.segment, "gamma");
        assert_eq!(err.available, vec!["alpha".to_owned(), "beta".to_owned()]);
    }

    #[test]
    fn empty_path_is_an_unknown_segment() {
        let root = tree();
        let err = resolve_path(&root, "").unwrap_err();
        assert_eq!(err.segment, "");
    }

    #[test]
    fn visits_children_before_own_measurements() {
        let root = tree();
        let mut names = Vec::new();
        visit_measurements(&root, &mut |batch| {
            names.extend(batch.iter().map(|m| m.name.clone()));
        });
        // alpha's leaf, then beta's subtree (cold before beta's own), then
        // the root's own list.
        assert_eq!(names, vec!["A", "C", "B", "R"]);
    }

    #[test]
    fn visit_of_leaf_sees_one_batch() {
        let root = tree();
        let leaf = resolve_path(&root, "beta/cold").expect("path exists");
        let mut batches = 0;
        visit_measurements(leaf, &mut |_| batches += 1);
        assert_eq!(batches, 1);
    }
}
