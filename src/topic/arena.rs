use compact_str::CompactString;
use serde::{Deserialize, Deserializer};

use super::sentiment::SentimentCategory;
use crate::layout::{Extent, Point};

/// Index into the topic arena. Uses u32, clouds never get near 4 billion words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TopicId(pub u32);

impl TopicId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Mention counts per sentiment. Missing or null counts are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct SentimentCounts {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub positive: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub neutral: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub negative: f64,
}

fn zero_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// A single word of the cloud.
///
/// The input fields are fixed at construction. The derived fields stay `None`
/// until the stage of the pipeline that owns them has run.
#[derive(Debug, Clone)]
pub struct Topic {
    pub id: CompactString,
    pub label: CompactString,
    /// Popularity; drives placement order and size class
    pub volume: f64,
    /// 0-100
    pub sentiment_score: f64,
    pub sentiment: SentimentCounts,
    /// 1-based size class, set once buckets are known
    pub size_class: Option<usize>,
    pub category: Option<SentimentCategory>,
    /// Measured by the surface, reused across layouts until invalidated
    pub extent: Option<Extent>,
    /// Top-left corner from the latest layout pass
    pub position: Option<Point>,
}

/// Wire shape of a topic record. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct RawTopic {
    pub id: CompactString,
    pub label: CompactString,
    pub volume: f64,
    #[serde(rename = "sentimentScore")]
    pub sentiment_score: f64,
    #[serde(default)]
    pub sentiment: SentimentCounts,
}

impl From<RawTopic> for Topic {
    fn from(raw: RawTopic) -> Self {
        Topic {
            id: raw.id,
            label: raw.label,
            volume: raw.volume,
            sentiment_score: raw.sentiment_score,
            sentiment: raw.sentiment,
            size_class: None,
            category: None,
            extent: None,
            position: None,
        }
    }
}

/// All topics of one cloud, stored in a flat arena.
#[derive(Debug, Default)]
pub struct TopicSet {
    pub topics: Vec<Topic>,
}

impl TopicSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a topic. Returns its ID.
    pub fn push(&mut self, topic: Topic) -> TopicId {
        let id = TopicId(self.topics.len() as u32);
        self.topics.push(topic);
        id
    }

    pub fn get(&self, id: TopicId) -> &Topic {
        &self.topics[id.index()]
    }

    pub fn get_mut(&mut self, id: TopicId) -> &mut Topic {
        &mut self.topics[id.index()]
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Look up a topic by its external id.
    pub fn find(&self, id: &str) -> Option<TopicId> {
        self.topics
            .iter()
            .position(|t| t.id == id)
            .map(|i| TopicId(i as u32))
    }

    pub fn iter(&self) -> impl Iterator<Item = (TopicId, &Topic)> {
        self.topics
            .iter()
            .enumerate()
            .map(|(i, t)| (TopicId(i as u32), t))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Topic> {
        self.topics.iter_mut()
    }

    /// IDs sorted by volume, most popular first.
    /// The sort is stable: equal volumes keep their input order.
    pub fn ids_by_volume(&self) -> Vec<TopicId> {
        let mut ids: Vec<TopicId> = (0..self.topics.len() as u32).map(TopicId).collect();
        ids.sort_by(|a, b| self.get(*b).volume.total_cmp(&self.get(*a).volume));
        ids
    }

    /// Volumes of every topic, in arena order (duplicates included).
    pub fn volumes(&self) -> Vec<f64> {
        self.topics.iter().map(|t| t.volume).collect()
    }
}
