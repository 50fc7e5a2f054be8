//! Order service seam and an in-memory implementation.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use shopfront_commerce::checkout::{CreatedOrder, OrderDraft};
use shopfront_commerce::OrderId;

use crate::error::OrderServiceError;

/// Result type for order service calls.
pub type ServiceResult<T> = Result<T, OrderServiceError>;

/// Creates orders from drafts.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Submit a draft and return the created order.
    async fn create_order(&self, draft: &OrderDraft) -> ServiceResult<CreatedOrder>;
}

#[derive(Debug, Default)]
struct Ledger {
    submissions: Vec<OrderDraft>,
    fail_next: Option<OrderServiceError>,
}

/// Order service that keeps every submission in memory.
///
/// Assigns generated ids and stamps the creation time. A failure can be
/// armed with [`InMemoryOrderService::fail_next`] to exercise the error path.
#[derive(Debug, Default)]
pub struct InMemoryOrderService {
    ledger: Mutex<Ledger>,
}

impl InMemoryOrderService {
    /// Create an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next submission fail with `error`.
    pub fn fail_next(&self, error: OrderServiceError) {
        self.ledger().fail_next = Some(error);
    }

    /// Every draft received, including failed ones.
    pub fn submissions(&self) -> Vec<OrderDraft> {
        self.ledger().submissions.clone()
    }

    /// Number of drafts received.
    pub fn submission_count(&self) -> usize {
        self.ledger().submissions.len()
    }

    fn ledger(&self) -> std::sync::MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl OrderService for InMemoryOrderService {
    async fn create_order(&self, draft: &OrderDraft) -> ServiceResult<CreatedOrder> {
        let mut ledger = self.ledger();
        ledger.submissions.push(draft.clone());

        if let Some(error) = ledger.fail_next.take() {
            return Err(error);
        }

        Ok(CreatedOrder {
            id: OrderId::generate(),
            total_price: Some(draft.total_price),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        })
    }
}
