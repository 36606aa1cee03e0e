//! Tab content contract
//!
//! The sequence never looks inside an item. It only needs:
//! - a stable identity, unique within one sequence
//! - how long the item stays on screen before the next one takes over

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;
use uuid::Uuid;

pub trait ProgressTabContent {
    type Id: Clone + Eq + Hash + Debug;

    fn id(&self) -> Self::Id;

    /// Display duration; must be positive
    fn total_time(&self) -> Duration;
}

/// A ready-made item: a titled slide with its own duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// Unique identifier
    #[serde(default = "new_story_id")]
    pub id: String,
    /// Caption shown by the presentation layer
    #[serde(default)]
    pub title: String,
    /// How long the story stays up, in fractional seconds on the wire
    #[serde(with = "seconds")]
    pub total_time: Duration,
}

impl Story {
    pub fn new(title: impl Into<String>, total_time: Duration) -> Self {
        Self {
            id: new_story_id(),
            title: title.into(),
            total_time,
        }
    }

    pub fn with_id(id: impl Into<String>, title: impl Into<String>, total_time: Duration) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            total_time,
        }
    }
}

impl ProgressTabContent for Story {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn total_time(&self) -> Duration {
        self.total_time
    }
}

fn new_story_id() -> String {
    Uuid::new_v4().to_string()
}

mod seconds {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(de::Error::custom)
    }
}
