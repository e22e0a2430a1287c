/// Settings shared by all topic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationsConfig {
    /// Broker-side timeout for topic creation.
    pub create_timeout_ms: i32,

    /// Broker-side timeout for topic deletion.
    pub delete_timeout_ms: i32,
}

impl Default for OperationsConfig {
    fn default() -> Self {
        Self {
            create_timeout_ms: 5_000,
            delete_timeout_ms: 5_000,
        }
    }
}
