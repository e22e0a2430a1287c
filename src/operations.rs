//! Topic operations composed from one or more gateway calls.
//!
//! Every entry point takes ownership of a gateway handle and an [`Outcome`]. The stages of an
//! operation run strictly one after another; the first failure becomes the outcome and no later
//! stage runs. The handle is released exactly once, after the outcome has been written.
use std::{
    collections::{BTreeMap, HashSet},
    future::Future,
};

use tracing::{Instrument, Span, debug, error, info, info_span, warn};

use crate::{
    config::OperationsConfig,
    error::{Error, Result},
    filter::{FilteredNames, NamePattern, filter_names},
    gateway::{AdminGateway, Config, ConfigResource, GatewayLease, NewTopicSpec},
    outcome::{self, Outcome},
    topic::{ConfigEntry, NewTopic, Topic, TopicList},
};

/// Opens an operation span under `$parent`, or under the caller's current span if there is none.
macro_rules! operation_span {
    ($parent:expr, $name:literal, $($fields:tt)*) => {
        match $parent {
            Some(parent) => info_span!(parent: parent, $name, $($fields)*),
            None => info_span!($name, $($fields)*),
        }
    };
}

/// Builder for [`TopicOperations`].
#[derive(Debug, Default)]
pub struct TopicOperationsBuilder {
    config: OperationsConfig,
    parent: Option<Span>,
}

impl TopicOperationsBuilder {
    pub fn config(mut self, config: OperationsConfig) -> Self {
        self.config = config;
        self
    }

    /// Span all operation spans are nested under. Without one, operation spans nest under
    /// whatever span is current when the operation is started.
    pub fn parent_span(mut self, span: Span) -> Self {
        self.parent = Some(span);
        self
    }

    pub fn build(self) -> TopicOperations {
        TopicOperations {
            config: self.config,
            parent: self.parent,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TopicOperations {
    config: OperationsConfig,
    parent: Option<Span>,
}

impl Default for TopicOperations {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TopicOperations {
    pub fn builder() -> TopicOperationsBuilder {
        TopicOperationsBuilder::default()
    }

    pub fn config(&self) -> &OperationsConfig {
        &self.config
    }

    /// Create a topic and echo it back.
    ///
    /// The returned topic is built from `input`, not fetched from the cluster: it carries the
    /// requested name and config entries verbatim, duplicates included.
    ///
    /// The gateway is leased as soon as this is called, so it gets closed even if the returned
    /// future is never polled.
    pub fn create<G>(
        &self,
        gateway: G,
        outcome: Outcome<Topic>,
        input: NewTopic,
    ) -> impl Future<Output = ()> + Send
    where
        G: AdminGateway,
    {
        let gateway = GatewayLease::new(gateway);
        let span = operation_span!(
            self.parent.as_ref(),
            "create_topic",
            topic = input.name.as_str()
        );
        async move {
            settle(outcome, self.create_stages(&*gateway, input).await);
        }
        .instrument(span)
    }

    /// Describe a single topic, including its configuration.
    pub fn describe<G>(
        &self,
        gateway: G,
        outcome: Outcome<Topic>,
        name: &str,
    ) -> impl Future<Output = ()> + Send
    where
        G: AdminGateway,
    {
        let gateway = GatewayLease::new(gateway);
        let span = operation_span!(self.parent.as_ref(), "describe_topic", topic = name);
        async move {
            settle(outcome, self.describe_stages(&*gateway, name).await);
        }
        .instrument(span)
    }

    /// List all topics matching `pattern`, including partitions and configuration.
    pub fn list<G>(
        &self,
        gateway: G,
        outcome: Outcome<TopicList>,
        pattern: Option<&NamePattern>,
    ) -> impl Future<Output = ()> + Send
    where
        G: AdminGateway,
    {
        let gateway = GatewayLease::new(gateway);
        let span = operation_span!(
            self.parent.as_ref(),
            "list_topics",
            pattern = pattern.map(NamePattern::as_str)
        );
        async move {
            settle(outcome, self.list_stages(&*gateway, pattern).await);
        }
        .instrument(span)
    }

    /// Delete topics, returning the names that were requested.
    pub fn delete<G>(
        &self,
        gateway: G,
        outcome: Outcome<Vec<String>>,
        names: Vec<String>,
    ) -> impl Future<Output = ()> + Send
    where
        G: AdminGateway,
    {
        let gateway = GatewayLease::new(gateway);
        let span = operation_span!(self.parent.as_ref(), "delete_topics", topics = names.len());
        async move {
            settle(outcome, self.delete_stages(&*gateway, names).await);
        }
        .instrument(span)
    }

    /// Like [`create`](Self::create), but returns the outcome directly.
    pub fn create_topic<G>(
        &self,
        gateway: G,
        input: NewTopic,
    ) -> impl Future<Output = Result<Topic>> + Send
    where
        G: AdminGateway,
    {
        let (outcome, rx) = outcome::channel();
        let run = self.create(gateway, outcome, input);
        async move {
            run.await;
            rx.await
        }
    }

    /// Like [`describe`](Self::describe), but returns the outcome directly.
    pub fn describe_topic<G>(
        &self,
        gateway: G,
        name: &str,
    ) -> impl Future<Output = Result<Topic>> + Send
    where
        G: AdminGateway,
    {
        let (outcome, rx) = outcome::channel();
        let run = self.describe(gateway, outcome, name);
        async move {
            run.await;
            rx.await
        }
    }

    /// Like [`list`](Self::list), but returns the outcome directly.
    pub fn list_topics<G>(
        &self,
        gateway: G,
        pattern: Option<&NamePattern>,
    ) -> impl Future<Output = Result<TopicList>> + Send
    where
        G: AdminGateway,
    {
        let (outcome, rx) = outcome::channel();
        let run = self.list(gateway, outcome, pattern);
        async move {
            run.await;
            rx.await
        }
    }

    /// Like [`delete`](Self::delete), but returns the outcome directly.
    pub fn delete_topics<G>(
        &self,
        gateway: G,
        names: Vec<String>,
    ) -> impl Future<Output = Result<Vec<String>>> + Send
    where
        G: AdminGateway,
    {
        let (outcome, rx) = outcome::channel();
        let run = self.delete(gateway, outcome, names);
        async move {
            run.await;
            rx.await
        }
    }

    async fn create_stages<G>(&self, gateway: &G, input: NewTopic) -> Result<Topic>
    where
        G: AdminGateway,
    {
        let spec = new_topic_spec(&input)?;

        debug!(
            num_partitions = spec.num_partitions,
            replication_factor = spec.replication_factor,
            "creating topic",
        );
        gateway
            .create_topics(vec![spec], self.config.create_timeout_ms)
            .await?;

        Ok(Topic {
            name: input.name,
            is_internal: false,
            partitions: vec![],
            config: input
                .config
                .into_iter()
                .map(|entry| ConfigEntry {
                    key: entry.key,
                    value: Some(entry.value),
                })
                .collect(),
        })
    }

    async fn describe_stages<G>(&self, gateway: &G, name: &str) -> Result<Topic>
    where
        G: AdminGateway,
    {
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "Topic to describe has not been specified".to_owned(),
            ));
        }

        debug!("describing topic");
        let mut descriptions = gateway.describe_topics(vec![name.to_owned()]).await?;
        let description = descriptions
            .remove(name)
            .ok_or_else(|| Error::missing_description(name))?;
        let mut topic = Topic::from_description(&description);

        debug!("describing topic configuration");
        let resource = ConfigResource::topic(name);
        let mut configs = gateway.describe_configs(vec![resource.clone()]).await?;
        let config = configs
            .remove(&resource)
            .ok_or_else(|| Error::missing_config(name))?;
        topic.config = config_entries(config);

        Ok(topic)
    }

    async fn list_stages<G>(&self, gateway: &G, pattern: Option<&NamePattern>) -> Result<TopicList>
    where
        G: AdminGateway,
    {
        debug!("listing topic names");
        let mut seen = HashSet::new();
        let names: Vec<_> = gateway
            .list_topic_names()
            .await?
            .into_iter()
            .filter(|name| seen.insert(name.clone()))
            .collect();

        let FilteredNames { matched, failures } = filter_names(pattern, names);
        let mut failures = failures.into_iter();
        if let Some(e) = failures.next() {
            warn!(
                e=%e,
                evaluations = failures.len() + 1,
                "topic filter pattern failed",
            );
            return Err(e);
        }

        debug!(topics = matched.len(), "describing topics");
        let descriptions = gateway.describe_topics(matched.clone()).await?;
        let mut topics = matched
            .iter()
            .map(|name| {
                descriptions
                    .get(name)
                    .map(Topic::from_description)
                    .ok_or_else(|| Error::missing_description(name))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(topics = topics.len(), "describing topic configurations");
        let resources: Vec<_> = topics
            .iter()
            .map(|topic| ConfigResource::topic(topic.name.as_str()))
            .collect();
        let mut configs = gateway.describe_configs(resources.clone()).await?;
        for (topic, resource) in topics.iter_mut().zip(resources) {
            let config = configs
                .remove(&resource)
                .ok_or_else(|| Error::missing_config(&topic.name))?;
            topic.config = config_entries(config);
        }

        Ok(TopicList::from(topics))
    }

    async fn delete_stages<G>(&self, gateway: &G, names: Vec<String>) -> Result<Vec<String>>
    where
        G: AdminGateway,
    {
        if names.is_empty() {
            return Err(Error::InvalidInput(
                "No topics to delete have been specified".to_owned(),
            ));
        }

        debug!(topics = ?names, "deleting topics");
        gateway
            .delete_topics(names.clone(), self.config.delete_timeout_ms)
            .await?;

        Ok(names)
    }
}

/// Writes the operation result, logging its terminal state.
fn settle<T>(outcome: Outcome<T>, result: Result<T>) {
    match &result {
        Ok(_) => info!("topic operation completed"),
        Err(e) => error!(e=%e, "topic operation failed"),
    }
    outcome.settle(result);
}

/// Validates `input` and converts it into the gateway's creation request.
///
/// Config entries are folded into a map; for duplicate keys the last value wins.
fn new_topic_spec(input: &NewTopic) -> Result<NewTopicSpec> {
    if input.name.is_empty() {
        return Err(Error::InvalidInput(
            "Topic to create has not been specified".to_owned(),
        ));
    }

    if input.num_partitions < 1 {
        return Err(Error::InvalidInput(format!(
            "number of partitions must be positive, got {}",
            input.num_partitions
        )));
    }

    let replication_factor = i16::try_from(input.replication_factor)
        .ok()
        .filter(|rf| *rf >= 1)
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "replication factor must be in 1..={}, got {}",
                i16::MAX,
                input.replication_factor
            ))
        })?;

    let configs: BTreeMap<_, _> = input
        .config
        .iter()
        .map(|entry| (entry.key.clone(), entry.value.clone()))
        .collect();

    Ok(NewTopicSpec {
        name: input.name.clone(),
        num_partitions: input.num_partitions,
        replication_factor,
        configs,
    })
}

fn config_entries(config: Config) -> Vec<ConfigEntry> {
    config.entries.into_iter().map(ConfigEntry::from).collect()
}
