use crate::domain::ports::IdentityProvider;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::error;

/// Client for the account API of the identity provider. The API key comes
/// from configuration and is sent as a query parameter; account updates act
/// on the account identified by the caller's id token.
pub struct HttpIdentityProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpIdentityProvider {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    async fn post_account_call(
        &self,
        endpoint: &str,
        payload: &impl Serialize,
    ) -> Result<(), AppError> {
        let url = format!("{}/v1/accounts:{}?key={}", self.base_url, endpoint, self.api_key);

        let res = self.client.post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Identity provider connection error: {}", e);
                error!("{}", msg);
                AppError::Upstream(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Identity provider call failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::Upstream(msg));
        }

        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignUpPayload<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePayload<'a> {
    id_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    return_secure_token: bool,
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AppError> {
        let payload = SignUpPayload {
            email,
            password,
            return_secure_token: true,
        };

        self.post_account_call("signUp", &payload).await
    }

    async fn update_email(&self, id_token: &str, new_email: &str) -> Result<(), AppError> {
        let payload = UpdatePayload {
            id_token,
            email: Some(new_email),
            password: None,
            return_secure_token: false,
        };

        self.post_account_call("update", &payload).await
    }

    async fn update_password(&self, id_token: &str, new_password: &str) -> Result<(), AppError> {
        let payload = UpdatePayload {
            id_token,
            email: None,
            password: Some(new_password),
            return_secure_token: false,
        };

        self.post_account_call("update", &payload).await
    }
}
