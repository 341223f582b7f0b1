use std::collections::BTreeSet;

use crate::core::types::DocId;
use crate::server::Server;

/// Removes documents whose word set exactly duplicates one already kept,
/// printing a notice per removed id. O(n) via a seen-set of word-sets, the
/// later draft of `RemoveDuplicates` rather than its earlier O(n^2) pairwise
/// comparison. Returns the removed ids in ascending order. Takes `&Server`
/// rather than `&mut Server`: every mutation the facade exposes is already
/// interior-mutable, so no exclusive borrow is needed here.
pub fn remove_duplicates(server: &Server) -> Vec<DocId> {
    let mut seen: BTreeSet<BTreeSet<String>> = BTreeSet::new();
    let mut duplicates = Vec::new();

    for id in server.document_ids() {
        let words: BTreeSet<String> = server.word_frequencies(id).into_keys().collect();
        if seen.contains(&words) {
            duplicates.push(id);
        } else {
            seen.insert(words);
        }
    }

    for &id in &duplicates {
        server.remove_document(id);
        println!("Found duplicate document id {id}");
    }

    duplicates
}
