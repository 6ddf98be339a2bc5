//! Token-level dependency projection.
//!
//! Each token resolves on its own: if it declared `drel='label:Parent'` and
//! `Parent` has a head, the token attaches to that head with `label`.
//! Otherwise it becomes a root. A token does not inherit the drel of the chunk
//! it was read into.

use super::anomaly::Anomalies;
use super::heads::HeadMap;
use super::parser::ChunkRegistry;
use crate::{Chunk, FALLBACK_LABEL, ROOT_LABEL, Token};

/// Assign `head` and `deprel` to every token.
///
/// A target chunk headed by the token itself would be a self-loop; such
/// tokens become roots instead.
pub fn resolve_dependencies(tokens: &mut [Token], heads: &HeadMap) -> Anomalies {
    let mut anomalies = Anomalies::empty();

    for token in tokens.iter_mut() {
        let target = token.drel.as_ref().and_then(|drel| {
            let head = heads.get(&drel.parent).copied();
            if head.is_none() {
                trace!("deps", "token={} missing target chunk={}", token.id, drel.parent);
                anomalies |= Anomalies::MISSING_TARGET;
            }
            head.map(|head| (head, drel.label.clone().unwrap_or_else(|| FALLBACK_LABEL.to_string())))
        });

        match target {
            Some((head, _)) if head == token.id => {
                trace!("deps", "token={} heads its own target chunk", token.id);
                anomalies |= Anomalies::SELF_REFERENCE;
                attach_root(token);
            }
            Some((head, label)) => {
                token.head = head;
                token.deprel = label;
            }
            None => attach_root(token),
        }
    }

    if tokens.iter().filter(|t| t.is_root()).count() > 1 {
        anomalies |= Anomalies::MULTIPLE_ROOTS;
    }

    anomalies
}

/// Give each chunk head the chunk's own drel when it declared none.
///
/// Must run after [`resolve_heads`](super::resolve_heads). A token heading
/// several nested chunks takes the drel of the innermost one (fewest
/// members) that has a drel.
pub fn project_chunk_drels(tokens: &mut [Token], registry: &ChunkRegistry) {
    let mut chunks: Vec<&Chunk> = registry.values().filter(|c| c.head.is_some() && c.drel.is_some()).collect();
    chunks.sort_by(|a, b| (a.members.len(), &a.name).cmp(&(b.members.len(), &b.name)));

    for chunk in chunks {
        let Some(head) = chunk.head else { continue };
        let Some(token) = (head as usize).checked_sub(1).and_then(|idx| tokens.get_mut(idx)) else { continue };
        if token.drel.is_none() {
            trace!("deps", "token={} takes drel of chunk={}", token.id, chunk.name);
            token.drel = chunk.drel.clone();
        }
    }
}

fn attach_root(token: &mut Token) {
    token.head = 0;
    token.deprel = ROOT_LABEL.to_string();
}
