use std::collections::HashMap;

use crate::model::record::{Record, Relation};

/// Error type for tree building
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("cyclic parent reference at record {0}")]
    Cycle(String),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    OnPath,
    Done,
}

/// Build a forest from flat records linked by `parent_id`.
///
/// Records whose parent is in the batch are appended to that parent's
/// `children`; every other record (no parent, empty or unknown parent id)
/// becomes a root. Input order is preserved among roots and among siblings.
pub fn build_forest(records: Vec<Record>) -> Result<Vec<Record>, TreeError> {
    let parents: Vec<Option<usize>> = {
        let index: HashMap<&str, usize> = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.as_str(), i))
            .collect();
        records
            .iter()
            .map(|r| r.parent_id.as_deref().and_then(|p| index.get(p).copied()))
            .collect()
    };

    check_acyclic(&records, &parents)?;

    let mut kids: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots = Vec::new();
    for (i, parent) in parents.iter().enumerate() {
        match parent {
            Some(p) => kids[*p].push(i),
            None => roots.push(i),
        }
    }

    let mut slots: Vec<Option<Record>> = records.into_iter().map(Some).collect();
    Ok(roots
        .into_iter()
        .map(|i| assemble(i, &kids, &mut slots))
        .collect())
}

fn check_acyclic(records: &[Record], parents: &[Option<usize>]) -> Result<(), TreeError> {
    let mut state = vec![Visit::Unseen; records.len()];
    let mut path = Vec::new();
    for start in 0..records.len() {
        let mut cur = Some(start);
        while let Some(i) = cur {
            match state[i] {
                Visit::Done => break,
                Visit::OnPath => return Err(TreeError::Cycle(records[i].id.clone())),
                Visit::Unseen => {
                    state[i] = Visit::OnPath;
                    path.push(i);
                    cur = parents[i];
                }
            }
        }
        for i in path.drain(..) {
            state[i] = Visit::Done;
        }
    }
    Ok(())
}

fn assemble(i: usize, kids: &[Vec<usize>], slots: &mut [Option<Record>]) -> Record {
    // Acyclic parent links reach each index exactly once
    let mut node = slots[i].take().unwrap_or_default();
    for &k in &kids[i] {
        let child = assemble(k, kids, slots);
        node.children.push(child);
    }
    node
}

/// File each task under the `tasks` of the category its `parent_id` names.
/// Tasks whose parent isn't one of `categories` are returned in input order.
pub fn file_tasks(categories: &mut [Record], tasks: Vec<Record>) -> Vec<Record> {
    let index: HashMap<String, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id.clone(), i))
        .collect();

    let mut unfiled = Vec::new();
    for task in tasks {
        match task.parent_id.as_deref().and_then(|p| index.get(p)) {
            Some(&i) => categories[i].tasks.push(task),
            None => unfiled.push(task),
        }
    }
    unfiled
}

/// Every node with its depth, in pre-order across all relations
pub fn pre_order(forest: &[Record]) -> Vec<(usize, &Record)> {
    fn walk<'a>(node: &'a Record, depth: usize, out: &mut Vec<(usize, &'a Record)>) {
        out.push((depth, node));
        for relation in Relation::ALL {
            for child in node.relation(relation) {
                walk(child, depth + 1, out);
            }
        }
    }

    let mut out = Vec::new();
    for node in forest {
        walk(node, 0, &mut out);
    }
    out
}
