use crate::domain::payment::{Payment, PaymentId, PaymentRecord};
use crate::domain::ports::PaymentStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

type Records = BTreeMap<PaymentId, PaymentRecord>;

/// A flat JSON file holding every payment as `{ id: {amount, payment_method, status} }`.
///
/// Every `put` reads the whole file and rewrites it. A missing file is treated
/// as an empty store and is created on the first write. Writes through clones
/// of the same store are serialized; other processes are not coordinated.
#[derive(Clone)]
pub struct JsonFilePaymentStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonFilePaymentStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Records> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Records::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Records::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, records: &Records) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl PaymentStore for JsonFilePaymentStore {
    async fn put(&self, payment: Payment) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        records.insert(payment.id().clone(), PaymentRecord::from(&payment));
        self.save(&records).await
    }

    async fn get(&self, payment_id: &PaymentId) -> Result<Option<Payment>> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        Ok(records
            .remove(payment_id)
            .map(|record| Payment::from_record(payment_id.clone(), record)))
    }

    async fn list_all(&self) -> Result<Vec<Payment>> {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;
        Ok(records
            .into_iter()
            .map(|(id, record)| Payment::from_record(id, record))
            .collect())
    }
}
