//! Home listing: mature vs incubating worlds, and the tag cloud

use std::collections::HashMap;

use nullview_domain::{WorldListing, WorldStatus};

/// Tags shown in the cloud.
pub const TAG_CLOUD_SIZE: usize = 20;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPartition {
    pub mature: Vec<WorldListing>,
    pub incubating: Vec<WorldListing>,
}

/// Split listed worlds. Worlds that are neither mature nor actively
/// generating or running are left out.
pub fn partition_worlds(worlds: &[WorldListing]) -> ListingPartition {
    let mut partition = ListingPartition::default();
    for listing in worlds {
        if listing.is_mature() {
            partition.mature.push(listing.clone());
        } else if matches!(
            listing.world.status(),
            WorldStatus::Generating | WorldStatus::Running
        ) {
            partition.incubating.push(listing.clone());
        }
    }
    partition
}

/// `(tag, number of worlds carrying it)`, most common first.
pub fn tag_cloud(worlds: &[WorldListing]) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in worlds.iter().flat_map(|w| w.tags.iter()) {
        let count = counts.entry(tag.tag.as_str()).or_insert(0);
        if *count == 0 {
            order.push(tag.tag.clone());
        }
        *count += 1;
    }

    let mut cloud: Vec<(String, usize)> = order
        .into_iter()
        .map(|tag| {
            let count = counts.get(tag.as_str()).copied().unwrap_or(0);
            (tag, count)
        })
        .collect();
    // stable: equal counts keep first-seen order
    cloud.sort_by(|a, b| b.1.cmp(&a.1));
    cloud.truncate(TAG_CLOUD_SIZE);
    cloud
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::fixtures::world;
    use nullview_domain::WorldTag;

    fn listing(status: WorldStatus, conversations: u32, wiki: u32, tags: &[&str]) -> WorldListing {
        let mut listing = WorldListing::new(world(status));
        listing.conversation_count = Some(conversations);
        listing.wiki_page_count = Some(wiki);
        listing.tags = tags
            .iter()
            .map(|t| WorldTag {
                tag: t.to_string(),
                weight: 1.0,
            })
            .collect();
        listing
    }

    #[test]
    fn partitions_by_maturity_then_activity() {
        let worlds = vec![
            listing(WorldStatus::Paused, 7, 2, &[]),
            listing(WorldStatus::Running, 1, 0, &[]),
            listing(WorldStatus::Generating, 0, 0, &[]),
            listing(WorldStatus::Paused, 1, 0, &[]),
        ];
        let partition = partition_worlds(&worlds);
        assert_eq!(partition.mature.len(), 1);
        assert_eq!(partition.incubating.len(), 2);
    }

    #[test]
    fn cloud_counts_worlds_per_tag() {
        let worlds = vec![
            listing(WorldStatus::Running, 0, 0, &["sea", "salt"]),
            listing(WorldStatus::Running, 0, 0, &["salt"]),
            listing(WorldStatus::Running, 0, 0, &["war", "salt", "sea"]),
        ];
        assert_eq!(
            tag_cloud(&worlds),
            vec![
                ("salt".to_string(), 3),
                ("sea".to_string(), 2),
                ("war".to_string(), 1)
            ]
        );
    }
}
