//! Outfit definitions.
//!
//! An outfit is a named, ordered set of pieces. Rows of the outfit table are
//! `id<TAB>name<TAB>piece, piece, ...`; every piece must resolve to a known
//! item when the table loads.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use statline_foundation::catalog::rows;
use statline_foundation::{Error, ItemCatalog, ItemId, OutfitId, Result};

static PIECE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").expect("piece separator pattern is valid"));

/// One catalogued outfit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutfitRecord {
    /// Outfit identity; always at least 1.
    pub id: OutfitId,
    /// Display name.
    pub name: String,
    /// Pieces in table order; never empty.
    pub pieces: Vec<ItemId>,
}

impl OutfitRecord {
    /// Returns true if `item` is one of the pieces.
    #[must_use]
    pub fn contains(&self, item: ItemId) -> bool {
        self.pieces.contains(&item)
    }
}

/// Read-only `outfit → definition` table.
#[derive(Clone, Debug, Default)]
pub struct OutfitRegistry {
    outfits: BTreeMap<OutfitId, OutfitRecord>,
}

impl OutfitRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads an outfit table, resolving piece names through `items`.
    ///
    /// # Errors
    ///
    /// Returns a load error for rows without exactly three fields, ids that
    /// are not positive integers, duplicate ids, empty piece lists, and
    /// pieces the catalog cannot resolve.
    pub fn load(table: &str, text: &str, items: &impl ItemCatalog) -> Result<Self> {
        let mut outfits = BTreeMap::new();

        for (line, fields) in rows(text) {
            let [id, name, pieces] = fields.as_slice() else {
                return Err(Error::load(table, line, "expected id, name, pieces"));
            };

            let id = match id.trim().parse::<i32>() {
                Ok(id) if id >= 1 => OutfitId(id),
                _ => return Err(Error::load(table, line, format!("invalid outfit id '{}'", id.trim()))),
            };
            if outfits.contains_key(&id) {
                return Err(Error::load(table, line, format!("duplicate {id}")));
            }

            let pieces = pieces.trim();
            if pieces.is_empty() {
                return Err(Error::load(table, line, format!("{id} has no pieces")));
            }
            let pieces = PIECE_SEPARATOR
                .split(pieces)
                .map(|piece| match piece {
                    "" => Err(Error::load(table, line, format!("{id} has an empty piece name"))),
                    piece => items
                        .item_id(piece)
                        .ok_or_else(|| Error::load(table, line, format!("unknown piece '{piece}'"))),
                })
                .collect::<Result<Vec<_>>>()?;

            outfits.insert(
                id,
                OutfitRecord {
                    id,
                    name: name.trim().to_string(),
                    pieces,
                },
            );
        }

        tracing::debug!(table, outfits = outfits.len(), "loaded outfit table");
        Ok(Self { outfits })
    }

    /// Adds an outfit definition, replacing any with the same id.
    pub fn insert(&mut self, record: OutfitRecord) {
        self.outfits.insert(record.id, record);
    }

    /// Returns an outfit. Custom ids never resolve.
    #[must_use]
    pub fn get(&self, id: OutfitId) -> Option<&OutfitRecord> {
        if id.is_custom() {
            return None;
        }
        self.outfits.get(&id)
    }

    /// Iterates outfits in id order.
    pub fn iter(&self) -> impl Iterator<Item = &OutfitRecord> {
        self.outfits.values()
    }

    /// Outfits that include `item` as a piece.
    pub fn containing(&self, item: ItemId) -> impl Iterator<Item = &OutfitRecord> {
        self.iter().filter(move |outfit| outfit.contains(item))
    }

    /// Returns the number of outfits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outfits.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outfits.is_empty()
    }
}
