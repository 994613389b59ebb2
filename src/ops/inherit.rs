use crate::model::record::{Record, Relation};

/// A display attribute that flows from a node to descendants lacking it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Color,
}

impl Attribute {
    /// The node's own value; empty strings count as unset
    fn get(self, record: &Record) -> Option<&str> {
        match self {
            Attribute::Color => record.color.as_deref().filter(|c| !c.is_empty()),
        }
    }

    fn set(self, record: &mut Record, value: &str) {
        match self {
            Attribute::Color => record.color = Some(value.to_string()),
        }
    }
}

/// Copy each attribute from parent to child, top-down through every
/// relation. A child's own value is never overwritten, so the nearest
/// ancestor with a value wins.
pub fn inherit(mut forest: Vec<Record>, attributes: &[Attribute]) -> Vec<Record> {
    for node in &mut forest {
        inherit_into(node, attributes);
    }
    forest
}

fn inherit_into(node: &mut Record, attributes: &[Attribute]) {
    let passed_down: Vec<(Attribute, String)> = attributes
        .iter()
        .filter_map(|a| a.get(node).map(|v| (*a, v.to_string())))
        .collect();

    for relation in Relation::ALL {
        for child in node.relation_mut(relation) {
            for (attr, value) in &passed_down {
                if attr.get(child).is_none() {
                    attr.set(child, value);
                }
            }
            inherit_into(child, attributes);
        }
    }
}
