//! Tree helpers over a flat list of categories.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use super::model::Category;

/// Collects `root` and every category below it.
///
/// The root comes first; the order of the remaining ids is breadth-first.
/// Ids absent from `categories` are still returned as the single root.
pub fn descendant_ids(root: Uuid, categories: &[Category]) -> Vec<Uuid> {
    let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for category in categories {
        if let Some(parent) = category.parent_id {
            children.entry(parent).or_default().push(category.id);
        }
    }

    let mut seen = HashSet::from([root]);
    let mut ordered = vec![root];
    let mut cursor = 0;
    while cursor < ordered.len() {
        let current = ordered[cursor];
        cursor += 1;
        if let Some(kids) = children.get(&current) {
            for kid in kids {
                if seen.insert(*kid) {
                    ordered.push(*kid);
                }
            }
        }
    }
    ordered
}
