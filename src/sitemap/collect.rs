//! Aggregation of input items into URL records and alternate groups.
//!
//! # Groups
//!
//! A group is the set of URLs that are translations of each other. Every
//! member must list every other member (and itself) as an hreflang
//! alternate, so groups grow transitively:
//!
//! ```text
//! a → {nl: b}      groups: [a, b]
//! b → {fr: c}      groups: [a, b, c]   (b already grouped, c joins)
//! d → {nl: b}      groups: [a, b, c, d] (alternate b already grouped)
//! ```
//!
//! Groups live in an arena (`Vec<Vec<RecordId>>`); each record stores the
//! index of its group, so appending a member is visible to all of them.
//!
//! A URL joins the group it is first assigned to and keeps it. Two groups
//! that were built independently are never merged: when an entry is already
//! grouped, its alternates are pulled into that group; otherwise the group of
//! the first already-grouped alternate is reused.

use rustc_hash::FxHashMap;

use crate::{
    debug,
    entry::{Entry, EntryInput},
    error::{Result, SitemapError},
    utils::lang,
};

/// Index of a record in [`Collected::records`].
pub type RecordId = usize;

/// Index of a group in [`Collected::groups`].
pub type GroupId = usize;

/// A merged URL record and the group it belongs to, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub entry: Entry,
    pub group: Option<GroupId>,
}

/// URL table and grouping table after all items have been folded in.
#[derive(Debug, Default)]
pub struct Collected {
    /// Records in first-seen order.
    pub records: Vec<Record>,
    /// Group arena; members in first-seen order.
    pub groups: Vec<Vec<RecordId>>,
    /// Whether any item declared `alternate`.
    pub i18n: bool,
    index: FxHashMap<String, RecordId>,
}

impl Collected {
    /// Fold `items` in order.
    pub fn from_items<'a, I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a EntryInput>,
    {
        let mut collected = Self::default();
        for (index, item) in items.into_iter().enumerate() {
            collected.push(index, item)?;
        }
        Ok(collected)
    }

    /// Fold one item; `index` is its position in the input.
    pub fn push(&mut self, index: usize, item: &EntryInput) -> Result<()> {
        let entry = item.normalize()?;
        let id = self.upsert(entry.clone());

        let Some(alternate) = &entry.alternate else {
            return Ok(());
        };

        self.i18n = true;

        if entry.lang.is_none() {
            return Err(SitemapError::MissingLanguage {
                entry: entry.url.clone(),
                index,
            });
        }

        let alternates = alternate
            .iter()
            .map(|(tag, alt)| {
                let mut alt = alt.normalize()?;
                if alt.lang.is_none() {
                    alt.lang = Some(lang::normalize(tag));
                }
                Ok(alt)
            })
            .collect::<Result<Vec<Entry>>>()?;

        let group = match self.records[id].group {
            Some(group) => group,
            None => self.find_group(&alternates),
        };
        self.join(id, group);

        for alt in alternates {
            let alt_id = match self.get(&alt.url) {
                Some(alt_id) => alt_id,
                None => {
                    let mut inherited = entry.clone();
                    inherited.url.clone_from(&alt.url);
                    inherited.merge(alt);
                    self.insert(inherited)
                }
            };
            self.join(alt_id, group);
        }

        Ok(())
    }

    /// Record id of a canonical URL.
    pub fn get(&self, url: &str) -> Option<RecordId> {
        self.index.get(url).copied()
    }

    /// Group of a canonical URL.
    pub fn group_of(&self, url: &str) -> Option<GroupId> {
        self.get(url).and_then(|id| self.records[id].group)
    }

    /// Members of the group `url` belongs to, as URLs.
    pub fn group_urls(&self, url: &str) -> Option<Vec<&str>> {
        let group = self.group_of(url)?;
        Some(
            self.groups[group]
                .iter()
                .map(|&id| self.records[id].entry.url.as_str())
                .collect(),
        )
    }

    /// Group of the first alternate that already has one, or a new group.
    fn find_group(&mut self, alternates: &[Entry]) -> GroupId {
        if let Some(group) = alternates.iter().find_map(|alt| self.group_of(&alt.url)) {
            debug!("group"; "reusing group {} via alternate", group);
            return group;
        }
        self.groups.push(Vec::new());
        let group = self.groups.len() - 1;
        debug!("group"; "created group {}", group);
        group
    }

    /// Assign `group` to a record without one, and add it as a member.
    fn join(&mut self, id: RecordId, group: GroupId) {
        let record = &mut self.records[id];
        if record.group.is_none() {
            record.group = Some(group);
        }
        let members = &mut self.groups[group];
        if !members.contains(&id) {
            members.push(id);
        }
    }

    fn upsert(&mut self, entry: Entry) -> RecordId {
        match self.get(&entry.url) {
            Some(id) => {
                self.records[id].entry.merge(entry);
                id
            }
            None => self.insert(entry),
        }
    }

    fn insert(&mut self, entry: Entry) -> RecordId {
        let id = self.records.len();
        self.index.insert(entry.url.clone(), id);
        self.records.push(Record { entry, group: None });
        id
    }
}
