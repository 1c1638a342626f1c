use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::category::Category;

/// Identifying data of a failure as it appears in the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEntry {
    pub sequence_number: u32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub category: Category,
    /// Failures in log order.
    pub entries: Vec<ExportEntry>,
}

impl CategoryGroup {
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// Grouped view over one run's classifications.
///
/// Holds every category, in taxonomy order, including the empty ones.
/// Groups only change through `push`, so `groups[category as usize]`
/// always lands on the right category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    total: usize,
    groups: Vec<CategoryGroup>,
}

impl Report {
    pub fn empty() -> Self {
        Self {
            total: 0,
            groups: Category::ALL
                .iter()
                .map(|&category| CategoryGroup {
                    category,
                    entries: Vec::new(),
                })
                .collect(),
        }
    }

    /// Appends a failure to its category, after any already recorded.
    pub fn push(&mut self, category: Category, entry: ExportEntry) {
        self.groups[category as usize].entries.push(entry);
        self.total += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn group(&self, category: Category) -> &CategoryGroup {
        &self.groups[category as usize]
    }

    pub fn count(&self, category: Category) -> usize {
        self.group(category).count()
    }

    pub fn percentage(&self, category: Category) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.count(category) as f64 / self.total as f64 * 100.0)
    }

    /// Non-empty groups, largest first. Equal counts keep taxonomy order.
    pub fn ranked(&self) -> Vec<&CategoryGroup> {
        let mut ranked: Vec<&CategoryGroup> =
            self.groups.iter().filter(|g| g.count() > 0).collect();
        // stable sort over taxonomy-ordered input
        ranked.sort_by(|a, b| b.count().cmp(&a.count()));
        ranked
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(group.category.name(), &group.entries)?;
        }
        map.end()
    }
}
