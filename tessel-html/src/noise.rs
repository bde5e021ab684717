//! Removal of page chrome before flattening
use ego_tree::NodeId;
use scraper::{Html, node::Element};

use crate::options::FlattenOptions;

/// Detaches noise elements and their subtrees from the document.
///
/// Runs in order: elements by id, elements by class token, elements by tag name. Returns the
/// number of detached elements.
pub(crate) fn remove_noise(document: &mut Html, options: &FlattenOptions) -> usize {
    let by_id = detach_matching(document, |element| {
        element
            .id()
            .is_some_and(|id| options.noise_ids.iter().any(|noise| noise == id))
    });

    let by_class = detach_matching(document, |element| {
        element
            .classes()
            .any(|class| options.noise_classes.iter().any(|noise| noise == class))
    });

    let by_tag = detach_matching(document, |element| {
        options
            .noise_tags
            .iter()
            .any(|noise| noise.eq_ignore_ascii_case(element.name()))
    });

    by_id + by_class + by_tag
}

fn detach_matching(document: &mut Html, matches: impl Fn(&Element) -> bool) -> usize {
    let ids: Vec<NodeId> = document
        .tree
        .root()
        .descendants()
        .filter(|node| node.value().as_element().is_some_and(&matches))
        .map(|node| node.id())
        .collect();

    for id in &ids {
        if let Some(mut node) = document.tree.get_mut(*id) {
            node.detach();
        }
    }

    ids.len()
}
