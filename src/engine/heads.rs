//! Chunk head selection.
//!
//! The head of a chunk is its rightmost member. Indic chunk grammars are
//! head-final (the noun ends a noun group, the verb-auxiliary sequence ends a
//! verb group), so read order is enough here; no parsing decision is made.

use super::parser::ChunkRegistry;
use crate::TokenId;
use std::collections::HashMap;

/// Chunk name → id of its head token. Chunks without members are absent.
pub type HeadMap = HashMap<String, TokenId>;

/// Set `head` on every registered chunk with members and collect the heads.
pub fn resolve_heads(registry: &mut ChunkRegistry) -> HeadMap {
    let mut heads = HeadMap::with_capacity(registry.len());

    for (name, chunk) in registry.iter_mut() {
        chunk.head = chunk.members.last().copied();
        if let Some(head) = chunk.head {
            heads.insert(name.clone(), head);
        }
    }

    heads
}
