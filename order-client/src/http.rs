//! HTTP-backed collaborators
//!
//! Implements the order, payment, and table-binding contracts over the
//! `{code, message, data}` JSON envelope with a bearer-token header.
//! Non-zero envelope codes are mapped back onto [`ErrorCode`]; HTTP 401
//! becomes `NotAuthenticated`; transport failures become
//! `NetworkError`.

use crate::collaborators::{OrderService, PaymentGateway, PaymentOutcome, PaymentRequest, TableService};
use crate::config::ClientConfig;
use crate::table::TableCode;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{BoundTable, OrderDraft, PersistedOrder};
use shared::{ApiResponse, AppError, AppResult};

/// HTTP client for the ordering backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    /// Create a backend from configuration
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .map_err(|err| AppError::internal(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let mut request = self.client.get(self.url(path));
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request
            .send()
            .await
            .map_err(|err| AppError::network(err.to_string()))?;
        Self::handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> AppResult<T> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request
            .send()
            .await
            .map_err(|err| AppError::network(err.to_string()))?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::not_authenticated());
        }
        if !status.is_success() {
            return Err(AppError::network(format!("request failed ({status})")));
        }

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|err| AppError::network(format!("invalid response body: {err}")))?;
        envelope.into_result()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderIdBody<'a> {
    order_id: &'a str,
}

#[async_trait]
impl OrderService for HttpBackend {
    async fn create_order(&self, draft: &OrderDraft) -> AppResult<PersistedOrder> {
        self.post("/orders/create", draft).await
    }

    async fn get_order(&self, order_id: &str) -> AppResult<PersistedOrder> {
        self.get(&format!("/orders/{order_id}")).await
    }

    async fn cancel_order(&self, order_id: &str) -> AppResult<PersistedOrder> {
        self.post("/orders/cancel", &OrderIdBody { order_id }).await
    }

    async fn complete_order(&self, order_id: &str) -> AppResult<PersistedOrder> {
        self.post("/orders/complete", &OrderIdBody { order_id }).await
    }
}

/// Gateway business result on the wire
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayResponse {
    success: bool,
    #[serde(default)]
    cancelled: bool,
    #[serde(default)]
    message: String,
}

#[async_trait]
impl PaymentGateway for HttpBackend {
    async fn pay(&self, request: &PaymentRequest) -> AppResult<PaymentOutcome> {
        let response: PayResponse = self.post("/payment/pay", request).await?;
        Ok(if response.success {
            PaymentOutcome::Paid
        } else if response.cancelled {
            PaymentOutcome::Cancelled
        } else {
            PaymentOutcome::Failed {
                message: response.message,
            }
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BindByIdBody<'a> {
    table_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BindByNumberBody<'a> {
    table_number: &'a str,
}

#[async_trait]
impl TableService for HttpBackend {
    async fn bind_table(&self, code: &TableCode) -> AppResult<BoundTable> {
        match code {
            TableCode::Id(table_id) => {
                self.post("/table/bind", &BindByIdBody { table_id }).await
            }
            TableCode::Number(table_number) => {
                self.post("/table/bind-by-number", &BindByNumberBody { table_number })
                    .await
            }
        }
    }
}
