use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use rand::Rng;
use tracing::debug;

use crate::cluster::Cluster;
use crate::error::{ClustervalError, Result};
use crate::item::Item;
use crate::options::{Format, LoadOptions};
use crate::persist::{self, ClusteringRecord};
use crate::score;
use crate::text;

/// A clustering over an arbitrary set of items.
///
/// Keeps its clusters in insertion order together with the union of their
/// items (in order of first appearance). The union is maintained on every
/// [`add`](Clustering::add).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clustering {
    clusters: Vec<Cluster>,
    items: Vec<Item>,
    seen: HashSet<Item>,
}

impl Clustering {
    /// Creates an empty clustering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a clustering from `label -> items` pairs, one cluster per key.
    ///
    /// Each key's items are filtered against the items of the keys before
    /// it, so iteration order decides which cluster keeps a shared item.
    /// Keys left with no items produce no cluster.
    pub fn from_mapping<I, K, V, T>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = T>,
        T: Into<Item>,
    {
        let mut clustering = Self::new();
        for (label, items) in mapping {
            let items = clustering.unseen(items.into_iter().map(Into::into));
            if items.is_empty() {
                continue;
            }
            clustering.add(Cluster::new(items, Some(label.into())));
        }
        clustering
    }

    /// Parses the line-oriented text format.
    ///
    /// With `clean`, items already present in an earlier line are dropped
    /// from each line so the result is a strict partition. Either way the
    /// item union holds each item once, and a line left without items
    /// produces no cluster.
    pub fn from_text(data: &str, clean: bool) -> Self {
        let mut clustering = Self::new();
        for line in text::parse(data) {
            let items = if clean {
                clustering.unseen(line.items)
            } else {
                line.items
            };
            if items.is_empty() {
                continue;
            }
            clustering.add(Cluster::new(items, Some(line.label)));
        }
        clustering
    }

    /// Loads a clustering from `path`.
    ///
    /// `.yaml`, `.yml` and `.json` files are read as persisted structures,
    /// anything else as the text format (see [`LoadOptions`]).
    pub fn load(path: impl AsRef<Path>, opts: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ClustervalError::FileNotFound(path.to_path_buf()),
            _ => ClustervalError::Io(e),
        })?;

        let format = opts.format_for(path);
        let clustering = match persist::codec_for(format) {
            Some(codec) => codec.decode(&data)?.into_clustering(opts.clean),
            None => Self::from_text(&data, opts.clean),
        };

        debug!(
            path = %path.display(),
            ?format,
            clusters = clustering.len(),
            items = clustering.items.len(),
            "loaded clustering"
        );
        Ok(clustering)
    }

    /// Writes the clustering to `path` in the format its extension names.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.save_as(path, Format::from_path(path))
    }

    /// Writes the clustering to `path` in the given format.
    pub fn save_as(&self, path: impl AsRef<Path>, format: Format) -> Result<()> {
        let data = match persist::codec_for(format) {
            Some(codec) => codec.encode(&ClusteringRecord::from(self))?,
            None => {
                let mut data = self.to_text();
                data.push('\n');
                data
            }
        };
        fs::write(path, data)?;
        Ok(())
    }

    /// Appends a cluster and extends the item union with its items.
    pub fn add(&mut self, cluster: Cluster) {
        for item in cluster.items() {
            if self.seen.insert(item.clone()) {
                self.items.push(item.clone());
            }
        }
        self.clusters.push(cluster);
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Returns the union of all cluster items in order of first appearance.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.seen.contains(item)
    }

    /// Returns the number of clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Filters out items already present in this clustering.
    pub(crate) fn unseen(&self, items: impl IntoIterator<Item = Item>) -> Vec<Item> {
        items.into_iter().filter(|i| !self.seen.contains(i)).collect()
    }

    /// Redistributes the same items at random into `target_size` clusters
    /// (default: the current cluster count).
    ///
    /// Every item of every cluster is assigned to a uniformly drawn slot.
    /// Afterwards, while a slot is empty and the largest slot holds at least
    /// two items, one item moves from the largest slot into an empty one.
    /// Empty slots produce no cluster, so the result has fewer clusters than
    /// requested only when there are fewer items than slots. The receiver is
    /// left untouched.
    pub fn randomize<R: Rng>(
        &self,
        target_size: Option<usize>,
        rng: &mut R,
    ) -> Result<Clustering> {
        let target = target_size.unwrap_or(self.clusters.len());
        let total: usize = self.clusters.iter().map(Cluster::len).sum();
        if target == 0 {
            if total == 0 {
                return Ok(Clustering::new());
            }
            return Err(ClustervalError::InvalidArgument(format!(
                "cannot distribute {total} items into 0 clusters"
            )));
        }

        let mut slots: Vec<Vec<Item>> = vec![Vec::new(); target];
        for item in self.clusters.iter().flat_map(|c| c.items()) {
            slots[rng.gen_range(0..target)].push(item.clone());
        }

        let mut moves = 0usize;
        while slots.iter().any(Vec::is_empty) {
            let (Some(largest), Some(smallest)) = (
                index_by_len(&slots, SlotPick::Largest),
                index_by_len(&slots, SlotPick::Smallest),
            ) else {
                break;
            };
            // Moving the last item of a slot would only relocate the gap.
            if slots[largest].len() < 2 {
                break;
            }
            if let Some(item) = slots[largest].pop() {
                slots[smallest].push(item);
                moves += 1;
            }
        }

        debug!(items = total, target, moves, "randomized clustering");

        let mut clustering = Clustering::new();
        for slot in slots.into_iter().filter(|s| !s.is_empty()) {
            clustering.add(Cluster::new(slot, None));
        }
        Ok(clustering)
    }

    /// Renders every cluster as a text-format line.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Scores this clustering as the candidate against `gold`.
    ///
    /// Same as [`score::f_score`]`(gold, self)`.
    pub fn f_score(&self, gold: &Clustering) -> f64 {
        score::f_score(gold, self)
    }
}

enum SlotPick {
    Largest,
    Smallest,
}

fn index_by_len(slots: &[Vec<Item>], pick: SlotPick) -> Option<usize> {
    let iter = slots.iter().enumerate();
    let found = match pick {
        SlotPick::Largest => iter.max_by_key(|(_, s)| s.len()),
        SlotPick::Smallest => iter.min_by_key(|(_, s)| s.len()),
    };
    found.map(|(i, _)| i)
}

impl fmt::Display for Clustering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cluster) in self.clusters.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{cluster}")?;
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for Clustering
where
    K: Into<String>,
    V: IntoIterator,
    V::Item: Into<Item>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_mapping(iter)
    }
}

impl Extend<Cluster> for Clustering {
    fn extend<I: IntoIterator<Item = Cluster>>(&mut self, iter: I) {
        for cluster in iter {
            self.add(cluster);
        }
    }
}
