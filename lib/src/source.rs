use time_series::StockSample;

use crate::{Symbol, TickerwatchResult};

/// Seam to the backend collaborator. The engine is generic over this so the
/// polling cycle runs identically against the HTTP client, the in-process
/// simulator, or a test stub.
#[allow(async_fn_in_trait)]
pub trait SampleSource {
  async fn stock_data(&self, symbol: Symbol) -> TickerwatchResult<Vec<StockSample>>;
}
