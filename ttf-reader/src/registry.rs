//! Decoded tables, stored by tag

use alloc::collections::BTreeMap;

use types::Tag;

use crate::Table;

/// A store of decoded tables, at most one per tag.
#[derive(Clone, Debug, Default)]
pub struct TableRegistry {
    tables: BTreeMap<Tag, Table>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `table` under `tag`, replacing any previous table.
    pub fn put(&mut self, tag: Tag, table: Table) {
        if self.tables.insert(tag, table).is_some() {
            log::debug!("replaced existing '{tag}' table");
        }
    }

    pub fn get(&self, tag: Tag) -> Option<&Table> {
        self.tables.get(&tag)
    }

    pub fn remove(&mut self, tag: Tag) -> Option<Table> {
        self.tables.remove(&tag)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.tables.contains_key(&tag)
    }

    /// The tags of every stored table.
    ///
    /// The order is not related to the order of the table directory.
    pub fn keys(&self) -> impl Iterator<Item = Tag> + '_ {
        self.tables.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::cvt::Cvt;

    fn cvt(values: &[i16]) -> Table {
        Table::Cvt(Cvt::from_values(values.iter().copied().map(types::FWord::new).collect()))
    }

    #[test]
    fn put_overwrites() {
        let mut registry = TableRegistry::new();
        assert!(registry.is_empty());
        registry.put(Tag::new(b"cvt "), cvt(&[1, 2]));
        registry.put(Tag::new(b"cvt "), cvt(&[3]));
        assert_eq!(registry.len(), 1);
        let Some(Table::Cvt(table)) = registry.get(Tag::new(b"cvt ")) else {
            panic!("missing cvt");
        };
        assert_eq!(table.len(), 1);
        assert!(registry.get(Tag::new(b"glyf")).is_none());
        assert_eq!(registry.keys().collect::<Vec<_>>(), [Tag::new(b"cvt ")]);
        assert!(registry.remove(Tag::new(b"cvt ")).is_some());
        assert!(!registry.contains(Tag::new(b"cvt ")));
    }
}
