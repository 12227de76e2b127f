use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::exchange::ExchangeClient;
use crate::core::session::{ExchangeOutcome, ExchangeRequest};

/// Outcomes are tagged with the id of the exchange that produced them.
pub type ExchangeEvent = (ExchangeOutcome, u64);

/// Runs exchanges off the UI loop and reports their outcomes over a channel.
#[derive(Clone)]
pub struct ExchangeService {
    client: Arc<dyn ExchangeClient>,
    tx: mpsc::UnboundedSender<ExchangeEvent>,
}

impl ExchangeService {
    pub fn new(
        client: Arc<dyn ExchangeClient>,
    ) -> (Self, mpsc::UnboundedReceiver<ExchangeEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { client, tx }, rx)
    }

    /// Spawn `request` on the current runtime. There is no way to abort it.
    pub fn spawn_exchange(&self, request: ExchangeRequest, exchange_id: u64) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = client
                .exchange(&request.instruction_prompt, &request.user_text)
                .await;
            let _ = tx.send((outcome, exchange_id));
        });
    }
}
