use super::payment::{Payment, PaymentId};
use crate::error::Result;
use async_trait::async_trait;

/// Keyed storage for payments.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Inserts or overwrites the payment under its id.
    async fn put(&self, payment: Payment) -> Result<()>;
    async fn get(&self, payment_id: &PaymentId) -> Result<Option<Payment>>;
    async fn list_all(&self) -> Result<Vec<Payment>>;
}

pub type PaymentStoreBox = Box<dyn PaymentStore>;
pub type PaymentStoreFactory = Box<dyn Fn() -> PaymentStoreBox + Send + Sync>;
