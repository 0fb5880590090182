use crate::api::{DATA_PATH, UPDATE_SAVINGS_PATH, endpoint_url};
use crate::config::{ClientConfig, MutationPolicy};
use crate::errors::SyncError;
use crate::models::{SavingsUpdate, Snapshot, Transaction, TransactionKind};
use crate::validation::check_transaction;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Owns the one held [`Snapshot`] and every request that can change it.
///
/// Each operation either replaces the held snapshot with the server's
/// response or leaves it untouched. Clones share the same snapshot.
#[derive(Clone)]
pub struct SyncClient {
    http: Client,
    base_url: String,
    snapshot: Arc<Mutex<Snapshot>>,
    mutation_gate: Option<Arc<Mutex<()>>>,
}

impl SyncClient {
    pub fn new(config: ClientConfig) -> Result<Self, SyncError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(SyncError::Setup)?;
        Ok(Self::with_http_client(config, http))
    }

    pub fn with_http_client(config: ClientConfig, http: Client) -> Self {
        let mutation_gate = match config.mutation_policy {
            MutationPolicy::SingleFlight => Some(Arc::new(Mutex::new(()))),
            MutationPolicy::Concurrent => None,
        };
        Self {
            http,
            base_url: config.base_url,
            snapshot: Arc::new(Mutex::new(Snapshot::default())),
            mutation_gate,
        }
    }

    /// Copy of the currently held snapshot.
    pub async fn snapshot(&self) -> Snapshot {
        self.snapshot.lock().await.clone()
    }

    pub async fn load(&self) -> Result<Snapshot, SyncError> {
        let url = endpoint_url(&self.base_url, DATA_PATH);
        match fetch_snapshot(&self.http, &url).await {
            Ok(snapshot) => Ok(self.replace(snapshot).await),
            Err(err) => {
                warn!("failed to load data from {url}: {err}");
                Err(SyncError::FetchFailed(err))
            }
        }
    }

    /// Sends a transaction. On success the server's response becomes the
    /// held snapshot; the client never appends it locally.
    ///
    /// A transaction that would not pass validation fails with
    /// [`SyncError::Invalid`] without any request being sent.
    pub async fn submit_transaction(
        &self,
        kind: TransactionKind,
        transaction: &Transaction,
    ) -> Result<Snapshot, SyncError> {
        check_transaction(transaction)?;
        self.submit(kind.endpoint(), transaction).await
    }

    pub async fn submit_savings(&self, amount: f64) -> Result<Snapshot, SyncError> {
        self.submit(UPDATE_SAVINGS_PATH, &SavingsUpdate { amount }).await
    }

    async fn submit<B>(&self, endpoint: &'static str, body: &B) -> Result<Snapshot, SyncError>
    where
        B: Serialize + ?Sized,
    {
        // Held until the response has replaced the snapshot.
        let _in_flight = match &self.mutation_gate {
            Some(gate) => Some(gate.lock().await),
            None => None,
        };

        let url = endpoint_url(&self.base_url, endpoint);
        match post_snapshot(&self.http, &url, body).await {
            Ok(snapshot) => Ok(self.replace(snapshot).await),
            Err(err) => {
                warn!("request to {url} failed: {err}");
                Err(SyncError::submit_failed(endpoint, err))
            }
        }
    }

    async fn replace(&self, snapshot: Snapshot) -> Snapshot {
        let mut held = self.snapshot.lock().await;
        *held = snapshot.clone();
        debug!(
            balance = snapshot.balance,
            savings = snapshot.savings,
            incomes = snapshot.incomes.len(),
            expenses = snapshot.expenses.len(),
            "replaced held snapshot"
        );
        snapshot
    }
}

async fn fetch_snapshot(http: &Client, url: &str) -> Result<Snapshot, reqwest::Error> {
    http.get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Snapshot>()
        .await
}

async fn post_snapshot<B>(http: &Client, url: &str, body: &B) -> Result<Snapshot, reqwest::Error>
where
    B: Serialize + ?Sized,
{
    http.post(url)
        .json(body)
        .send()
        .await?
        .error_for_status()?
        .json::<Snapshot>()
        .await
}
