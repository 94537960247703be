use std::collections::{HashMap, HashSet};

use crate::Tagpull;
use tagpull_core::{LabelSource, PointId};

impl Tagpull {
    /// Column label for `point`: explicit label, then description (when the
    /// source asks for it and one is known), then the point id.
    pub(crate) async fn resolve_label(
        &self,
        point: &PointId,
        explicit: Option<&str>,
        source: LabelSource,
    ) -> String {
        if let Some(label) = explicit {
            return label.to_string();
        }
        match source {
            LabelSource::Description => self
                .describe(point)
                .await
                .unwrap_or_else(|| point.to_string()),
            _ => point.to_string(),
        }
    }
}

/// Make labels unique, keeping the first occurrence of each as is.
///
/// Later duplicates get the smallest numeric suffix starting at 2 that does
/// not collide with any original label or any label already handed out.
#[must_use]
pub fn disambiguate_labels(labels: Vec<String>) -> Vec<String> {
    let originals: HashSet<String> = labels.iter().cloned().collect();
    let mut used: HashSet<String> = HashSet::with_capacity(labels.len());
    let mut next_suffix: HashMap<String, usize> = HashMap::new();

    labels
        .into_iter()
        .map(|label| {
            if used.insert(label.clone()) {
                return label;
            }
            let mut n = next_suffix.get(&label).copied().unwrap_or(2);
            let candidate = loop {
                let c = format!("{label}{n}");
                n += 1;
                if !originals.contains(&c) && !used.contains(&c) {
                    break c;
                }
            };
            next_suffix.insert(label, n);
            used.insert(candidate.clone());
            candidate
        })
        .collect()
}
