pub mod arena;
pub mod sentiment;

use std::collections::HashSet;

use serde_json::Value;

use self::arena::{RawTopic, Topic, TopicSet};
use crate::error::{CloudError, Result};
use crate::layout::buckets;
use crate::schema::Validation;

/// Build a TopicSet from validated raw records.
///
/// A record that passed the schema but still fails to decode (for example a
/// sentiment count that is not a number) is handled like a schema violation.
/// Duplicate ids keep the first occurrence.
pub fn build_topics(validation: Validation, ignore_bad: bool) -> Result<TopicSet> {
    let mut set = TopicSet::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (index, value) in validation.accepted.into_iter().zip(validation.valid) {
        let raw: RawTopic = match serde_json::from_value::<RawTopic>(value) {
            Ok(raw) => raw,
            Err(e) if ignore_bad => {
                tracing::warn!("Item {} does not decode ({}), ignoring", index, e);
                continue;
            }
            Err(e) => {
                tracing::debug!("Item {} failed to decode: {}", index, e);
                return Err(CloudError::SchemaViolation { index });
            }
        };

        if !seen.insert(raw.id.to_string()) {
            tracing::warn!("Item {} repeats id '{}', ignoring", index, raw.id);
            continue;
        }

        set.push(Topic::from(raw));
    }

    tracing::info!("Built topic set: {} topics", set.len());
    Ok(set)
}

/// Assign size class and sentiment category to every topic.
///
/// Returns how many topics changed size class, so the caller can tell
/// whether cached extents went stale.
pub fn annotate(set: &mut TopicSet, bucket_values: &[f64]) -> usize {
    let mut changed = 0;
    for topic in set.iter_mut() {
        let class = buckets::size_class(topic.volume, bucket_values) + 1;
        if topic.size_class != Some(class) {
            if topic.size_class.is_some() {
                topic.extent = None;
            }
            topic.size_class = Some(class);
            changed += 1;
        }
        topic.category = Some(sentiment::categorize_score(topic.sentiment_score));
    }
    changed
}

/// Extract the `topics` array from a data root.
pub fn topics_array(root: &Value) -> Result<&Vec<Value>> {
    root.get("topics")
        .and_then(Value::as_array)
        .ok_or_else(|| CloudError::SchemaRoot("expected root array named topics".into()))
}
