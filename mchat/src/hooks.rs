use mcommon::SessionId;

use crate::{ChatError, ExchangeIds, ExchangeReport};

/// Lifecycle callbacks for the exchange orchestrator.
pub trait ExchangeHooks: Send + Sync {
    fn on_submit_rejected(&self, _session: &SessionId, _error: &ChatError) {}

    fn on_exchange_start(&self, _session: &SessionId, _ids: ExchangeIds) {}

    fn on_exchange_settled(&self, _session: &SessionId, _report: &ExchangeReport) {}

    fn on_cleared(&self, _session: &SessionId, _removed: usize, _during_exchange: bool) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopExchangeHooks;

impl ExchangeHooks for NoopExchangeHooks {}
