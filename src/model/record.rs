use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// The `db` tag carried by genuine work items
pub const TASKS_DB: &str = "Tasks";

/// What a record represents, from its `type` field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RecordKind {
    Category,
    Project,
    Inbox,
    /// Records without a `type` (tasks and subtasks)
    #[default]
    Task,
    /// Any type string we don't know about
    Other(String),
}

impl RecordKind {
    pub fn from_type(s: &str) -> RecordKind {
        match s {
            "category" => RecordKind::Category,
            "project" => RecordKind::Project,
            "inbox" => RecordKind::Inbox,
            "task" => RecordKind::Task,
            other => RecordKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecordKind::Category => "category",
            RecordKind::Project => "project",
            RecordKind::Inbox => "inbox",
            RecordKind::Task => "task",
            RecordKind::Other(s) => s,
        }
    }

    /// Prefix symbol shown before the title. Tasks and unknown kinds have none.
    pub fn decoration(&self) -> Option<&'static str> {
        match self {
            RecordKind::Category => Some("📁"),
            RecordKind::Project => Some("🏳️"),
            RecordKind::Inbox => Some("📥"),
            RecordKind::Task | RecordKind::Other(_) => None,
        }
    }
}

impl Serialize for RecordKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(RecordKind::from_type(&s))
    }
}

/// The named child collections a node may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Sub-categories
    Children,
    /// Tasks filed directly under a category
    Tasks,
    /// Records filed under a task
    Subtasks,
}

impl Relation {
    /// Every relation, in traversal order
    pub const ALL: [Relation; 3] = [Relation::Children, Relation::Tasks, Relation::Subtasks];
}

/// A category, project, inbox or task from the remote service.
///
/// After tree building a record also carries its descendants under the
/// three relations. An empty relation is treated as absent and is left
/// out of serialized output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub label_ids: Vec<String>,
    /// Rich-text payload or encoded string; see `parse::note`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<Value>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: RecordKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub children: Vec<Record>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub tasks: Vec<Record>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "subtasks_from_payload"
    )]
    pub subtasks: Vec<Record>,
}

impl Record {
    /// Create a bare record with no parent and no children
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: RecordKind) -> Self {
        Record {
            id: id.into(),
            title: title.into(),
            kind,
            ..Record::default()
        }
    }

    /// A category-type record
    pub fn category(id: impl Into<String>, title: impl Into<String>) -> Self {
        Record::new(id, title, RecordKind::Category)
    }

    /// A work item, tagged with the tasks database
    pub fn task(id: impl Into<String>, title: impl Into<String>) -> Self {
        Record {
            db: Some(TASKS_DB.to_string()),
            ..Record::new(id, title, RecordKind::Task)
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Whether this record is a real task rather than an organizational container
    pub fn is_work_item(&self) -> bool {
        self.db.as_deref() == Some(TASKS_DB)
    }

    pub fn relation(&self, relation: Relation) -> &[Record] {
        match relation {
            Relation::Children => &self.children,
            Relation::Tasks => &self.tasks,
            Relation::Subtasks => &self.subtasks,
        }
    }

    pub fn relation_mut(&mut self, relation: Relation) -> &mut Vec<Record> {
        match relation {
            Relation::Children => &mut self.children,
            Relation::Tasks => &mut self.tasks,
            Relation::Subtasks => &mut self.subtasks,
        }
    }
}

/// A label referenced by id from `Record::label_ids`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Labels keyed by id, in the order the service returned them
pub type LabelMap = IndexMap<String, Label>;

/// Index a label list by id. Later duplicates replace earlier ones.
pub fn index_labels(labels: Vec<Label>) -> LabelMap {
    labels.into_iter().map(|l| (l.id.clone(), l)).collect()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The service sends subtasks either as a list or as an object keyed by id
#[derive(Deserialize)]
#[serde(untagged)]
enum SubtaskPayload {
    List(Vec<Record>),
    Map(IndexMap<String, Record>),
}

fn subtasks_from_payload<'de, D>(deserializer: D) -> Result<Vec<Record>, D::Error>
where
    D: Deserializer<'de>,
{
    let subtasks = match Option::<SubtaskPayload>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(SubtaskPayload::List(list)) => list,
        Some(SubtaskPayload::Map(map)) => map
            .into_iter()
            .map(|(key, mut sub)| {
                if sub.id.is_empty() {
                    sub.id = key;
                }
                sub
            })
            .collect(),
    };
    Ok(subtasks)
}
