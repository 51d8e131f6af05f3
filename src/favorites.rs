use serde::Serialize;
use tracing::debug;

/// Outcome of a favorite toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteChange {
    Added,
    Removed,
}

/// Listing ids the user marked as favorite, kept in the order they were
/// added. Independent of filtering: a favorite stays tracked while its
/// listing is filtered out.
///
/// Equality is set equality; the insertion order only matters for [`ids`].
///
/// [`ids`]: FavoriteSet::ids
#[derive(Debug, Clone, Default)]
pub struct FavoriteSet {
    ids: Vec<i64>,
}

impl PartialEq for FavoriteSet {
    fn eq(&self, other: &Self) -> bool {
        self.ids.len() == other.ids.len() && self.ids.iter().all(|id| other.contains(*id))
    }
}

impl Eq for FavoriteSet {}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: i64) -> FavoriteChange {
        if let Some(pos) = self.ids.iter().position(|&fav| fav == id) {
            self.ids.remove(pos);
            debug!("Removed listing {} from favorites", id);
            FavoriteChange::Removed
        } else {
            self.ids.push(id);
            debug!("Added listing {} to favorites", id);
            FavoriteChange::Added
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
