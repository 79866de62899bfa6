use std::cell::RefCell;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use web_sys::RequestCredentials;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{FinancialSummary, NewPayment, NewTransaction, UpcomingPayment, User};

/// "Who am I" query. Any error means no usable session.
#[async_trait(?Send)]
pub trait SessionApi {
    async fn current_user(&self) -> Result<User, ApiError>;
}

#[async_trait(?Send)]
pub trait PaymentsApi {
    async fn list_payments(&self) -> Result<Vec<UpcomingPayment>, ApiError>;
    async fn delete_payment(&self, id: &str) -> Result<(), ApiError>;
    async fn create_payment(&self, payment: &NewPayment) -> Result<UpcomingPayment, ApiError>;
}

#[async_trait(?Send)]
pub trait TransactionsApi {
    async fn transaction_stats(&self) -> Result<FinancialSummary, ApiError>;
    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<(), ApiError>;
}

/// Holder of the aggregated income/expense snapshot. Refreshing is a side
/// effect; readers take a snapshot afterwards.
#[async_trait(?Send)]
pub trait BalanceStore {
    fn snapshot(&self) -> FinancialSummary;
    async fn fetch_transaction_stats(&self) -> Result<(), ApiError>;
}

#[derive(Deserialize)]
struct CurrentUserResponse {
    user: User,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Stateless HTTP client; the session travels in cookies.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    config: AppConfig,
}

impl ApiClient {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        Request::get(&self.config.endpoint(path)).credentials(RequestCredentials::Include)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        Request::post(&self.config.endpoint(path)).credentials(RequestCredentials::Include)
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        Request::delete(&self.config.endpoint(path)).credentials(RequestCredentials::Include)
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        ensure_ok(response).await
    }

    async fn send_json<B: serde::Serialize>(
        builder: RequestBuilder,
        body: &B,
    ) -> Result<Response, ApiError> {
        let request = builder
            .json(body)
            .map_err(|e| ApiError::Serialize(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        ensure_ok(response).await
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(http_error(response.status(), &body, &response.status_text()))
}

fn http_error(status: u16, body: &str, status_text: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| status_text.to_string());
    ApiError::Http { status, message }
}

#[async_trait(?Send)]
impl SessionApi for ApiClient {
    async fn current_user(&self) -> Result<User, ApiError> {
        let response = Self::send(self.get("/auth/current")).await?;
        let body: CurrentUserResponse = Self::read(response).await?;
        Ok(body.user)
    }
}

#[async_trait(?Send)]
impl PaymentsApi for ApiClient {
    async fn list_payments(&self) -> Result<Vec<UpcomingPayment>, ApiError> {
        let response = Self::send(self.get("/payments")).await?;
        Self::read(response).await
    }

    async fn delete_payment(&self, id: &str) -> Result<(), ApiError> {
        Self::send(self.delete(&format!("/payments/{}", id))).await?;
        Ok(())
    }

    async fn create_payment(&self, payment: &NewPayment) -> Result<UpcomingPayment, ApiError> {
        let response = Self::send_json(self.post("/payments"), payment).await?;
        Self::read(response).await
    }
}

#[async_trait(?Send)]
impl TransactionsApi for ApiClient {
    async fn transaction_stats(&self) -> Result<FinancialSummary, ApiError> {
        let response = Self::send(self.get("/transactions/stats")).await?;
        Self::read(response).await
    }

    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<(), ApiError> {
        Self::send_json(self.post("/transactions"), transaction).await?;
        Ok(())
    }
}

/// Balance store backed by the transaction stats endpoint. A failed
/// refresh keeps the previous snapshot.
pub struct RemoteBalanceStore<T> {
    source: T,
    snapshot: RefCell<FinancialSummary>,
}

impl<T: TransactionsApi> RemoteBalanceStore<T> {
    pub fn new(source: T) -> Self {
        Self {
            source,
            snapshot: RefCell::new(FinancialSummary::default()),
        }
    }
}

#[async_trait(?Send)]
impl<T: TransactionsApi> BalanceStore for RemoteBalanceStore<T> {
    fn snapshot(&self) -> FinancialSummary {
        self.snapshot.borrow().clone()
    }

    async fn fetch_transaction_stats(&self) -> Result<(), ApiError> {
        let summary = self.source.transaction_stats().await?;
        log::info!(
            "Transaction stats loaded: {} month(s)",
            summary.monthly_stats.len()
        );
        *self.snapshot.borrow_mut() = summary;
        Ok(())
    }
}
