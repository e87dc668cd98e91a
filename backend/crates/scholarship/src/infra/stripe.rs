//! Stripe Payment Gateway
//!
//! Creates payment intents through the REST API with a form-encoded POST.
//! No retries: a failed call is reported to the caller as a gateway error.

use serde::Deserialize;

use crate::domain::repository::{PaymentGateway, PaymentIntent};
use crate::domain::value_objects::MinorUnits;
use crate::error::{ScholarshipError, ScholarshipResult};

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    pub api_base: String,
}

impl StripeConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[derive(Clone)]
pub struct StripeGateway {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripeGateway {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn payment_intents_url(&self) -> String {
        format!(
            "{}/v1/payment_intents",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

#[derive(Deserialize)]
struct PaymentIntentResponse {
    id: String,
    client_secret: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(
        &self,
        amount: MinorUnits,
        currency: &str,
    ) -> ScholarshipResult<PaymentIntent> {
        let amount = amount.value().to_string();
        let form = [
            ("amount", amount.as_str()),
            ("currency", currency),
            ("payment_method_types[]", "card"),
        ];

        let response = self
            .http_client
            .post(self.payment_intents_url())
            .bearer_auth(&self.config.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| ScholarshipError::PaymentGateway(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| "no error detail".to_string());
            return Err(ScholarshipError::PaymentGateway(format!(
                "status {status}: {detail}"
            )));
        }

        let intent: PaymentIntentResponse = response
            .json()
            .await
            .map_err(|e| ScholarshipError::PaymentGateway(format!("unreadable response: {e}")))?;

        Ok(PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
        })
    }
}
