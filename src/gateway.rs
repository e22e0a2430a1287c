//! Contract of the remote admin gateway the pipeline talks to.
//!
//! The gateway is an asynchronous Kafka admin client. This crate does not ship one; callers
//! bring their own implementation of [`AdminGateway`] and hand a fresh handle to every
//! [`TopicOperations`](crate::operations::TopicOperations) call.
use std::{
    collections::{BTreeMap, HashMap},
    future::Future,
};

use thiserror::Error;

pub use self::lease::GatewayLease;

mod lease;

type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure reported by any gateway call.
///
/// The underlying cause is kept as-is, so callers can [`downcast_ref`](Self::downcast_ref) to
/// the concrete error type of their gateway implementation.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct GatewayError(BoxedCause);

impl GatewayError {
    pub fn new<E>(cause: E) -> Self
    where
        E: Into<BoxedCause>,
    {
        Self(cause.into())
    }

    /// Returns the cause if it is of type `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        self.0.downcast_ref()
    }

    /// Consumes the error, returning the boxed cause.
    pub fn into_inner(self) -> BoxedCause {
        self.0
    }
}

/// A broker as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerNode {
    /// The broker ID
    pub id: i32,

    /// The broker hostname
    pub host: String,

    /// The broker port
    pub port: i32,

    /// Rack.
    pub rack: Option<String>,
}

/// Description of a single partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicPartitionInfo {
    /// The partition index
    pub partition: i32,

    /// The leader broker
    pub leader: BrokerNode,

    /// All brokers that host this partition
    pub replicas: Vec<BrokerNode>,

    /// The brokers that are in sync with the leader
    pub isr: Vec<BrokerNode>,
}

/// Description of a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicDescription {
    pub name: String,
    pub is_internal: bool,
    pub partitions: Vec<TopicPartitionInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigResourceType {
    Topic,
}

/// Identifies whose configuration a [`describe_configs`](AdminGateway::describe_configs) call
/// targets. Also used as the key of the returned map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigResource {
    pub resource_type: ConfigResourceType,
    pub name: String,
}

impl ConfigResource {
    pub fn topic(name: impl Into<String>) -> Self {
        Self {
            resource_type: ConfigResourceType::Topic,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfigEntry {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub entries: Vec<GatewayConfigEntry>,
}

/// Topic creation request as understood by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopicSpec {
    pub name: String,
    pub num_partitions: i32,
    pub replication_factor: i16,
    pub configs: BTreeMap<String, String>,
}

/// Asynchronous Kafka admin client.
///
/// A handle is owned by exactly one pipeline invocation and released through
/// [`close`](Self::close) once that invocation is done.
pub trait AdminGateway: Send + Sync {
    /// Names of all topics in the cluster, in enumeration order.
    ///
    /// Repeated names are only listed once by the operations.
    fn list_topic_names(&self) -> impl Future<Output = Result<Vec<String>, GatewayError>> + Send;

    fn describe_topics(
        &self,
        names: Vec<String>,
    ) -> impl Future<Output = Result<HashMap<String, TopicDescription>, GatewayError>> + Send;

    fn describe_configs(
        &self,
        resources: Vec<ConfigResource>,
    ) -> impl Future<Output = Result<HashMap<ConfigResource, Config>, GatewayError>> + Send;

    fn create_topics(
        &self,
        topics: Vec<NewTopicSpec>,
        timeout_ms: i32,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    fn delete_topics(
        &self,
        names: Vec<String>,
        timeout_ms: i32,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Best-effort release of the handle.
    fn close(&self);
}
