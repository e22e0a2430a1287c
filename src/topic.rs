//! Public result model of the topic operations.
use crate::gateway::{BrokerNode, GatewayConfigEntry, TopicDescription, TopicPartitionInfo};

/// Reference to a broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    pub id: i32,
}

impl From<&BrokerNode> for Node {
    fn from(broker: &BrokerNode) -> Self {
        Self { id: broker.id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// The partition index
    pub partition: i32,

    pub leader: Node,

    pub replicas: Vec<Node>,

    /// In-sync replicas
    pub isr: Vec<Node>,
}

impl From<&TopicPartitionInfo> for Partition {
    fn from(info: &TopicPartitionInfo) -> Self {
        Self {
            partition: info.partition,
            leader: Node::from(&info.leader),
            replicas: info.replicas.iter().map(Node::from).collect(),
            isr: info.isr.iter().map(Node::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: Option<String>,
}

impl From<GatewayConfigEntry> for ConfigEntry {
    fn from(entry: GatewayConfigEntry) -> Self {
        Self {
            key: entry.name,
            value: entry.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
    pub is_internal: bool,
    pub partitions: Vec<Partition>,
    pub config: Vec<ConfigEntry>,
}

impl Topic {
    /// Builds a topic from its description. The configuration is attached by a later stage.
    pub(crate) fn from_description(description: &TopicDescription) -> Self {
        Self {
            name: description.name.clone(),
            is_internal: description.is_internal,
            partitions: description.partitions.iter().map(Partition::from).collect(),
            config: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopicConfigEntry {
    pub key: String,
    pub value: String,
}

impl NewTopicConfigEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Request to create a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopic {
    pub name: String,
    pub num_partitions: i32,
    pub replication_factor: i32,
    pub config: Vec<NewTopicConfigEntry>,
}

/// A list of topics.
///
/// The count is derived from the items and cannot be set independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicList {
    items: Vec<Topic>,
}

impl TopicList {
    /// Topics in listing order.
    pub fn items(&self) -> &[Topic] {
        &self.items
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Consumes the list, returning its topics.
    pub fn into_items(self) -> Vec<Topic> {
        self.items
    }
}

impl From<Vec<Topic>> for TopicList {
    fn from(items: Vec<Topic>) -> Self {
        Self { items }
    }
}
