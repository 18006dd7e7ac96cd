use log::*;
use serde::de::DeserializeOwned;
use time_series::StockSample;
use url::Url;

use crate::errors::{BackendContentError, TickerwatchError, TickerwatchResult};
use crate::{SampleSource, StockRow, Symbol};

/// Endpoints exposed by the stock data backend.
#[derive(Debug, Clone)]
pub enum API {
    StockData(Symbol),
}

impl API {
    pub fn path(&self) -> String {
        match self {
            API::StockData(symbol) => format!("/api/stock_data/{}", symbol.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    pub client: reqwest::Client,
    pub base_url: Url,
}

impl Client {
    pub fn new(base_url: String) -> TickerwatchResult<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: Url::parse(&base_url)?,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: API) -> TickerwatchResult<T> {
        let url = self.base_url.join(&endpoint.path())?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let content = match serde_json::from_str::<BackendContentError>(&body) {
                Ok(mut content) => {
                    content.status = status.as_u16();
                    content
                }
                Err(_) => BackendContentError {
                    status: status.as_u16(),
                    error: body,
                },
            };
            return Err(TickerwatchError::Backend(content));
        }
        Ok(serde_json::from_str::<T>(&body)?)
    }
}

impl SampleSource for Client {
    async fn stock_data(&self, symbol: Symbol) -> TickerwatchResult<Vec<StockSample>> {
        let rows = self.get::<Vec<StockRow>>(API::StockData(symbol)).await?;
        rows.iter().map(StockRow::to_sample).collect()
    }
}

// ==========================================================================================
//                                 Client tests
// ==========================================================================================

#[test]
fn endpoint_paths_interpolate_the_symbol() {
    assert_eq!(API::StockData(Symbol::Aapl).path(), "/api/stock_data/AAPL");
    assert_eq!(API::StockData(Symbol::Nvda).path(), "/api/stock_data/NVDA");
}

#[test]
fn joins_endpoint_paths_onto_the_base_url() -> anyhow::Result<()> {
    let client = Client::new("http://localhost:5000".to_string())?;
    let url = client.base_url.join(&API::StockData(Symbol::Msft).path())?;
    assert_eq!(url.as_str(), "http://localhost:5000/api/stock_data/MSFT");
    Ok(())
}

#[test]
fn decodes_the_backend_error_payload() {
    let content: BackendContentError =
        serde_json::from_str(r#"{"error": "relation stock_data does not exist"}"#).unwrap();
    assert_eq!(content.status, 0);
    assert_eq!(content.error, "relation stock_data does not exist");
}
