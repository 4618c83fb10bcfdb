use std::borrow::Cow;

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::{MatchRecord, PlayerId};

type NameCounts = FxHashMap<PlayerId, FxHashMap<String, u64>>;

/// One display name per competitor, chosen by majority vote over all
/// observed matches on the target map.
///
/// No two competitors share a display name: collisions are resolved by
/// appending the identifier, as in `"name (123)"`.
#[derive(Debug, Clone, Default)]
pub struct CanonicalNames {
    inner: FxHashMap<PlayerId, String>,
}

impl CanonicalNames {
    /// Tallies `(id, name)` pairs over all records on `map` (compared
    /// case-insensitively) and picks the most frequent name for each id.
    /// Ties go to the lexicographically greatest name.
    ///
    /// A side only contributes if its id and name lists have the same
    /// length. Names are trimmed, and empty names are ignored.
    pub fn build(records: &[MatchRecord], map: &str) -> CanonicalNames {
        let map = map.to_lowercase();

        let counts = records
            .par_iter()
            .filter(|record| record.is_on_map(&map))
            .fold(NameCounts::default, |mut counts, record| {
                tally(&mut counts, record);
                counts
            })
            .reduce(NameCounts::default, merge_counts);

        let voted = counts
            .into_iter()
            .filter_map(|(id, names)| {
                names
                    .into_iter()
                    .max_by(|(left_name, left_count), (right_name, right_count)| {
                        left_count
                            .cmp(right_count)
                            .then_with(|| left_name.cmp(right_name))
                    })
                    .map(|(name, _)| (id, name))
            })
            .collect();

        CanonicalNames {
            inner: disambiguate(voted),
        }
    }

    /// Records a fallback name for a competitor that has no canonical name
    /// yet. Existing entries are never overridden. Returns whether a name
    /// was added.
    pub fn learn(&mut self, id: PlayerId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.inner.contains_key(&id) {
            return false;
        }

        let name = self.untaken(name.to_owned(), id);
        self.inner.insert(id, name);
        true
    }

    pub fn get(&self, id: PlayerId) -> Option<&str> {
        self.inner.get(&id).map(String::as_str)
    }

    /// The canonical name, or the identifier itself for competitors that
    /// never carried a name. If the identifier is already someone's name,
    /// it is suffixed like any other collision.
    pub fn display_name(&self, id: PlayerId) -> Cow<'_, str> {
        match self.inner.get(&id) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(self.untaken(id.to_string(), id)),
        }
    }

    fn untaken(&self, mut name: String, id: PlayerId) -> String {
        while self.inner.values().any(|taken| *taken == name) {
            name = format!("{name} ({id})");
        }
        name
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &str)> {
        self.inner.iter().map(|(&id, name)| (id, name.as_str()))
    }
}

fn tally(counts: &mut NameCounts, record: &MatchRecord) {
    for (ids, names) in record.sides() {
        if ids.len() != names.len() {
            continue;
        }
        for (&id, name) in ids.iter().zip(names) {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            *counts
                .entry(id)
                .or_default()
                .entry(name.to_owned())
                .or_default() += 1;
        }
    }
}

fn merge_counts(mut left: NameCounts, right: NameCounts) -> NameCounts {
    for (id, names) in right {
        let entry = left.entry(id).or_default();
        for (name, count) in names {
            *entry.entry(name).or_default() += count;
        }
    }
    left
}

/// Rewrites every group of ids sharing a name to `"name (id)"`, until all
/// names are distinct. Each rewrite makes the names of a group longer, so
/// this terminates.
fn disambiguate(mut names: FxHashMap<PlayerId, String>) -> FxHashMap<PlayerId, String> {
    loop {
        let mut groups: FxHashMap<&str, Vec<PlayerId>> = FxHashMap::default();
        for (&id, name) in &names {
            groups.entry(name.as_str()).or_default().push(id);
        }

        let mut rewrites = Vec::new();
        for (name, mut ids) in groups {
            if ids.len() <= 1 {
                continue;
            }
            ids.sort_unstable();
            for id in ids {
                rewrites.push((id, format!("{name} ({id})")));
            }
        }

        if rewrites.is_empty() {
            return names;
        }

        for (id, name) in rewrites {
            names.insert(id, name);
        }
    }
}
