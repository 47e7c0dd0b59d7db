use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fmt::{self, Formatter};
use std::marker::PhantomData;

use crate::HashTable;

struct TableVisitor<V> {
    _marker: PhantomData<HashTable<V>>,
}

impl<V> Serialize for HashTable<V>
where
    V: Serialize,
{
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: Serializer,
    {
        serializer.collect_map(self)
    }
}

impl<'de, V> Deserialize<'de> for HashTable<V>
where
    V: Deserialize<'de> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TableVisitor::new())
    }
}

impl<V> TableVisitor<V> {
    pub(crate) fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<'de, V> Visitor<'de> for TableVisitor<V>
where
    V: Deserialize<'de> + Default,
{
    type Value = HashTable<V>;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "a map with string keys")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut table = HashTable::default();

        while let Some((key, value)) = access.next_entry::<String, V>()? {
            table
                .insert(&key, value)
                .map_err(<M::Error as de::Error>::custom)?;
        }

        Ok(table)
    }
}
