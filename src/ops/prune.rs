use crate::model::record::Record;

/// Drop branches that hold no work items.
///
/// Children are pruned before their parent is tested, so a category whose
/// sub-categories all turn out empty is removed as well. Emptied `children`
/// collections are left empty, which serializes as absent.
pub fn prune_empty(forest: Vec<Record>) -> Vec<Record> {
    forest.into_iter().filter_map(prune_node).collect()
}

fn prune_node(mut node: Record) -> Option<Record> {
    node.children = prune_empty(std::mem::take(&mut node.children));
    if is_empty(&node) {
        None
    } else {
        Some(node)
    }
}

/// A node is empty unless it is a work item, has tasks filed under it, or
/// has a non-empty child.
pub fn is_empty(node: &Record) -> bool {
    if node.is_work_item() {
        return false;
    }
    if !node.tasks.is_empty() {
        return false;
    }
    node.children.iter().all(is_empty)
}
