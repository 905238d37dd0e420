use std::time::Duration;

use api_types::{
    UserId,
    transaction::{LabelUpdate, Transaction, TransactionId},
};
use reqwest::{Response, Url};
use serde::Deserialize;
use thiserror::Error;
use view::LabelService;

use crate::error::{AppError, Result};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("server unreachable: {0}")]
    Transport(reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    /// All transactions of `user`, in whatever order the service keeps them.
    pub async fn user_transactions(
        &self,
        user: UserId,
    ) -> std::result::Result<Vec<Transaction>, ClientError> {
        let endpoint = self.endpoint(&format!("users/{user}/transactions"))?;

        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res
                .json::<Vec<Transaction>>()
                .await
                .map_err(ClientError::Transport);
        }

        Err(error_for(res).await)
    }

    pub async fn update_label(
        &self,
        transaction_id: TransactionId,
        label: &str,
    ) -> std::result::Result<(), ClientError> {
        let endpoint = self.endpoint(&format!("transactions/{transaction_id}/label"))?;

        let payload = LabelUpdate {
            label: label.to_string(),
        };

        let res = self
            .http
            .put(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return Ok(());
        }

        Err(error_for(res).await)
    }
}

impl LabelService for Client {
    type Error = ClientError;

    async fn set_label(
        &self,
        transaction_id: TransactionId,
        label: &str,
    ) -> std::result::Result<(), ClientError> {
        self.update_label(transaction_id, label).await
    }
}

async fn error_for(res: Response) -> ClientError {
    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string());

    match status.as_u16() {
        401 => ClientError::Unauthorized,
        403 => ClientError::Forbidden,
        404 => ClientError::NotFound,
        409 => ClientError::Conflict(body),
        422 => ClientError::Validation(body),
        _ => ClientError::Server(body),
    }
}
