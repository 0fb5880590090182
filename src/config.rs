use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// How overlapping mutations are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationPolicy {
    /// At most one mutation in flight; later calls wait for the current one.
    #[default]
    SingleFlight,
    /// Mutations are sent as soon as they are issued and the last response
    /// to arrive becomes the held snapshot.
    Concurrent,
}

impl MutationPolicy {
    pub fn from_single_flight(single_flight: bool) -> Self {
        if single_flight {
            Self::SingleFlight
        } else {
            Self::Concurrent
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub mutation_policy: MutationPolicy,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            mutation_policy: MutationPolicy::default(),
            timeout: None,
        }
    }

    pub fn with_mutation_policy(mut self, policy: MutationPolicy) -> Self {
        self.mutation_policy = policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
