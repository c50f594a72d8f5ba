use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::cluster::Cluster;
use crate::clustering::Clustering;
use crate::error::Result;
use crate::item::Item;
use crate::options::Format;

/// Serialized form of one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub items: Vec<Item>,
}

/// Serialized form of a whole clustering: its clusters in order.
///
/// The item union is derived on load and not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusteringRecord {
    pub clusters: Vec<ClusterRecord>,
}

/// What a persisted file may contain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PersistedClustering {
    /// A field dump written by [`Clustering::save`].
    Record(ClusteringRecord),
    /// A plain `label -> [items]` mapping, in document order.
    Mapping(LabeledItems),
}

/// `label -> [items]` entries in the order they appear in the document.
///
/// Earlier keys keep items shared with later ones, so the order is part of
/// the data and a sorted map would lose it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabeledItems(pub Vec<(String, Vec<Item>)>);

impl<'de> Deserialize<'de> for LabeledItems {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(LabeledItemsVisitor)
    }
}

struct LabeledItemsVisitor;

impl<'de> Visitor<'de> for LabeledItemsVisitor {
    type Value = LabeledItems;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a mapping of labels to item lists")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        // Keys go through `Item` so numeric YAML labels are accepted.
        while let Some((label, items)) = map.next_entry::<Item, Vec<Item>>()? {
            entries.push((label.as_str().to_string(), items));
        }
        Ok(LabeledItems(entries))
    }
}

impl PersistedClustering {
    /// Builds the in-memory clustering.
    ///
    /// Record dumps are trusted and loaded as-is unless `clean` is set, in
    /// which case items already seen in an earlier cluster are dropped.
    /// Mappings always go through [`Clustering::from_mapping`].
    pub fn into_clustering(self, clean: bool) -> Clustering {
        match self {
            PersistedClustering::Record(record) => {
                let mut clustering = Clustering::new();
                for ClusterRecord { label, items } in record.clusters {
                    let items = if clean { clustering.unseen(items) } else { items };
                    if clean && items.is_empty() {
                        continue;
                    }
                    clustering.add(Cluster::new(items, label));
                }
                clustering
            }
            PersistedClustering::Mapping(LabeledItems(entries)) => {
                Clustering::from_mapping(entries)
            }
        }
    }
}

impl From<&Clustering> for ClusteringRecord {
    fn from(clustering: &Clustering) -> Self {
        Self {
            clusters: clustering
                .clusters()
                .iter()
                .map(|c| ClusterRecord {
                    label: c.label().map(str::to_string),
                    items: c.items().to_vec(),
                })
                .collect(),
        }
    }
}

/// Serializes and deserializes persisted clusterings.
pub trait Codec {
    /// Encodes a clustering record to text.
    fn encode(&self, record: &ClusteringRecord) -> Result<String>;

    /// Decodes either a record dump or a plain mapping.
    fn decode(&self, data: &str) -> Result<PersistedClustering>;
}

/// YAML [`Codec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn encode(&self, record: &ClusteringRecord) -> Result<String> {
        Ok(serde_yaml::to_string(record)?)
    }

    fn decode(&self, data: &str) -> Result<PersistedClustering> {
        Ok(serde_yaml::from_str(data)?)
    }
}

/// JSON [`Codec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode(&self, record: &ClusteringRecord) -> Result<String> {
        Ok(serde_json::to_string_pretty(record)?)
    }

    fn decode(&self, data: &str) -> Result<PersistedClustering> {
        Ok(serde_json::from_str(data)?)
    }
}

/// Returns the codec for a persisted format, or `None` for [`Format::Text`].
pub fn codec_for(format: Format) -> Option<&'static dyn Codec> {
    match format {
        Format::Text => None,
        Format::Yaml => Some(&YamlCodec),
        Format::Json => Some(&JsonCodec),
    }
}
