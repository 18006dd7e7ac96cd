use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::errors::TickerwatchError;

/// The tickers the backend serves. The selector surface only ever offers
/// these, so everything downstream can treat the set as closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Symbol {
  Aapl,
  Msft,
  Googl,
  Amzn,
  Nvda,
}

impl Symbol {
  pub fn all() -> [Symbol; 5] {
    [
      Symbol::Aapl,
      Symbol::Msft,
      Symbol::Googl,
      Symbol::Amzn,
      Symbol::Nvda,
    ]
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Symbol::Aapl => "AAPL",
      Symbol::Msft => "MSFT",
      Symbol::Googl => "GOOGL",
      Symbol::Amzn => "AMZN",
      Symbol::Nvda => "NVDA",
    }
  }
}

impl fmt::Display for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Symbol {
  type Err = TickerwatchError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_uppercase().as_str() {
      "AAPL" => Ok(Symbol::Aapl),
      "MSFT" => Ok(Symbol::Msft),
      "GOOGL" => Ok(Symbol::Googl),
      "AMZN" => Ok(Symbol::Amzn),
      "NVDA" => Ok(Symbol::Nvda),
      other => Err(TickerwatchError::UnknownSymbol(other.to_string())),
    }
  }
}

// ==========================================================================================
//                                 Symbol tests
// ==========================================================================================

#[test]
fn parses_case_insensitively() {
  assert_eq!("nvda".parse::<Symbol>().unwrap(), Symbol::Nvda);
  assert_eq!(" AAPL ".parse::<Symbol>().unwrap(), Symbol::Aapl);
  assert!("TSLA".parse::<Symbol>().is_err());
}

#[test]
fn display_round_trips_for_every_symbol() {
  for symbol in Symbol::all() {
    assert_eq!(symbol.to_string().parse::<Symbol>().unwrap(), symbol);
  }
}

#[test]
fn serializes_as_the_ticker_string() {
  assert_eq!(serde_json::to_string(&Symbol::Googl).unwrap(), "\"GOOGL\"");
  assert_eq!(
    serde_json::from_str::<Symbol>("\"AMZN\"").unwrap(),
    Symbol::Amzn
  );
}
