use serde::Serialize;
use tracing::debug;

use crate::model::query::Query;
use crate::model::record::{Label, LabelMap, Record, RecordKind, index_labels};
use crate::ops::inherit::{Attribute, inherit};
use crate::ops::prune::prune_empty;
use crate::ops::tree::{TreeError, build_forest, file_tasks};

/// Id the service uses as the parent of inbox tasks
pub const INBOX_ID: &str = "unassigned";

/// The synthetic category that collects inbox tasks
pub fn inbox_category() -> Record {
    Record::new(INBOX_ID, "Inbox", RecordKind::Inbox)
}

/// The shaped result handed to renderers and the checklist serializer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Digest {
    pub items: Vec<Record>,
    pub labels: LabelMap,
}

/// Shape fetched records into a digest.
///
/// Work items in `tasks` are filed under their categories (the inbox
/// included), categories are built into a forest, and tasks with no known
/// category follow the category roots. Color inheritance and pruning run
/// when the query asks for them.
pub fn assemble(
    query: &Query,
    categories: Vec<Record>,
    tasks: Vec<Record>,
    labels: Vec<Label>,
) -> Result<Digest, TreeError> {
    let tasks: Vec<Record> = tasks.into_iter().filter(Record::is_work_item).collect();
    let task_count = tasks.len();

    let mut categories: Vec<Record> = std::iter::once(inbox_category())
        .chain(categories)
        .collect();
    let unfiled = file_tasks(&mut categories, tasks);

    let mut items = build_forest(categories)?;
    items.extend(unfiled);

    if query.inherit_color {
        items = inherit(items, &[Attribute::Color]);
    }
    if query.hide_empty {
        items = prune_empty(items);
    }

    let labels = if query.show_label {
        index_labels(labels)
    } else {
        LabelMap::new()
    };

    debug!(
        tasks = task_count,
        roots = items.len(),
        labels = labels.len(),
        "assembled digest"
    );
    Ok(Digest { items, labels })
}
