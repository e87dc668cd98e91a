//! Payments Use Case
//!
//! Payment intents are created at the processor; completed payments are
//! recorded by the client afterwards.

use std::sync::Arc;

use auth::domain::Email;
use chrono::Utc;
use kernel::id::{PaymentId, ScholarshipId};

use crate::application::config::ScholarshipConfig;
use crate::domain::entities::Payment;
use crate::domain::repository::{PaymentGateway, PaymentRepository};
use crate::domain::value_objects::Price;
use crate::error::{ScholarshipError, ScholarshipResult};

pub struct SavePaymentInput {
    /// Already checked against the caller's identity
    pub email: Email,
    pub scholarship_id: ScholarshipId,
    pub transaction_id: String,
    pub amount: f64,
}

pub struct PaymentsUseCase<P, G>
where
    P: PaymentRepository,
    G: PaymentGateway,
{
    payments: Arc<P>,
    gateway: Arc<G>,
    config: Arc<ScholarshipConfig>,
}

impl<P, G> PaymentsUseCase<P, G>
where
    P: PaymentRepository,
    G: PaymentGateway,
{
    pub fn new(payments: Arc<P>, gateway: Arc<G>, config: Arc<ScholarshipConfig>) -> Self {
        Self {
            payments,
            gateway,
            config,
        }
    }

    /// Returns the client secret of a new payment intent for `price`
    pub async fn create_intent(&self, price: Price) -> ScholarshipResult<String> {
        let amount = price.to_minor_units()?;
        let intent = self
            .gateway
            .create_payment_intent(amount, &self.config.currency)
            .await?;

        tracing::info!(
            intent_id = %intent.id,
            amount = amount.value(),
            currency = %self.config.currency,
            "Payment intent created"
        );

        Ok(intent.client_secret)
    }

    pub async fn save(&self, input: SavePaymentInput) -> ScholarshipResult<Payment> {
        if input.transaction_id.trim().is_empty() {
            return Err(ScholarshipError::malformed("transactionId is required"));
        }
        if !input.amount.is_finite() || input.amount < 0.0 {
            return Err(ScholarshipError::malformed("Invalid payment data"));
        }

        let payment = Payment {
            id: PaymentId::new(),
            email: input.email,
            scholarship_id: input.scholarship_id,
            transaction_id: input.transaction_id,
            amount: input.amount,
            date: Utc::now(),
        };
        self.payments.create(&payment).await?;

        tracing::info!(
            payment_id = %payment.id,
            scholarship_id = %payment.scholarship_id,
            "Payment recorded"
        );

        Ok(payment)
    }

    pub async fn history(&self, email: &Email) -> ScholarshipResult<Vec<Payment>> {
        self.payments.list_by_email(email).await
    }

    pub async fn check(
        &self,
        email: &Email,
        scholarship_id: &ScholarshipId,
    ) -> ScholarshipResult<Option<Payment>> {
        self.payments
            .find_by_email_and_scholarship(email, scholarship_id)
            .await
    }
}
