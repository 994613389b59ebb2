use crate::model::record::{Record, Relation};

/// Serialize a forest to checklist lines, one per node in pre-order.
/// Each nesting level indents by two spaces; relations are visited in
/// `Relation::ALL` order (children, tasks, subtasks).
pub fn serialize_checklist(forest: &[Record]) -> Vec<String> {
    let mut lines = Vec::new();
    for node in forest {
        serialize_node(node, 0, &mut lines);
    }
    lines
}

fn serialize_node(node: &Record, depth: usize, lines: &mut Vec<String>) {
    let decoration = node.kind.decoration().unwrap_or("");
    lines.push(format!(
        "{}- [ ] {}{}",
        "  ".repeat(depth),
        decoration,
        single_line(&node.title)
    ));

    for relation in Relation::ALL {
        for child in node.relation(relation) {
            serialize_node(child, depth + 1, lines);
        }
    }
}

/// Titles must not break the one-line-per-item layout
fn single_line(title: &str) -> String {
    title.lines().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::RecordKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inbox_with_task() {
        let mut inbox = Record::new("unassigned", "Inbox", RecordKind::Inbox);
        inbox.tasks.push(Record::task("t1", "Buy milk"));
        assert_eq!(
            serialize_checklist(&[inbox]),
            vec!["- [ ] 📥Inbox", "  - [ ] Buy milk"]
        );
    }

    #[test]
    fn test_relation_order_and_depth() {
        let mut task = Record::task("t1", "Write report");
        task.subtasks.push(Record::new("s1", "Outline", RecordKind::Task));

        let mut sub = Record::new("p1", "Launch", RecordKind::Project);
        sub.tasks.push(Record::task("t2", "Ship it"));

        let mut work = Record::category("c1", "Work");
        // Tasks are listed after sub-categories regardless of field order
        work.tasks.push(task);
        work.children.push(sub);

        let loose = Record::task("t3", "Loose end");

        assert_eq!(
            serialize_checklist(&[work, loose]),
            vec![
                "- [ ] 📁Work",
                "  - [ ] 🏳️Launch",
                "    - [ ] Ship it",
                "  - [ ] Write report",
                "    - [ ] Outline",
                "- [ ] Loose end",
            ]
        );
    }

    #[test]
    fn test_unknown_kind_has_no_decoration() {
        let rec = Record::new("x", "Habit", RecordKind::Other("habit".into()));
        assert_eq!(serialize_checklist(&[rec]), vec!["- [ ] Habit"]);
    }

    #[test]
    fn test_multiline_title_flattened() {
        let rec = Record::task("t", "first\nsecond");
        assert_eq!(serialize_checklist(&[rec]), vec!["- [ ] first second"]);
    }

    #[test]
    fn test_empty_forest() {
        assert!(serialize_checklist(&[]).is_empty());
    }
}
