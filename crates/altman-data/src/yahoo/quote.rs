//! Company-info record from the Yahoo Finance quote endpoint.

use crate::error::{DataError, Result};
use crate::statements::{CompanyInfo, InfoValue};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    quote_response: QuoteResponse,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    result: Vec<Map<String, Value>>,
    #[serde(default)]
    error: Option<Value>,
}

/// Parse a quote response into a flat company-info record.
///
/// Every scalar key of the first result is kept; nested objects and arrays
/// are dropped. An empty result means Yahoo does not know the symbol.
pub fn parse_company_info(body: &str, symbol: &str) -> Result<CompanyInfo> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if let Some(error) = envelope.quote_response.error.filter(|e| !e.is_null()) {
        return Err(DataError::YahooApi(error.to_string()));
    }

    let Some(first) = envelope.quote_response.result.into_iter().next() else {
        return Err(DataError::InvalidSymbol(symbol.to_string()));
    };

    let mut info = CompanyInfo::new();
    for (key, value) in first {
        let scalar = match value {
            Value::Number(n) => n.as_f64().map(InfoValue::Number),
            Value::String(s) => Some(InfoValue::Text(s)),
            Value::Bool(b) => Some(InfoValue::Flag(b)),
            _ => None,
        };
        if let Some(scalar) = scalar {
            info.insert(key, scalar);
        }
    }
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::info_keys;

    #[test]
    fn test_parse_company_info() {
        let body = r#"{"quoteResponse": {"result": [{
            "symbol": "ACME",
            "longName": "Acme Corporation",
            "exchange": "NYQ",
            "marketCap": 800,
            "regularMarketPrice": 12.5,
            "sharesOutstanding": 64,
            "tradeable": false,
            "corporateActions": []
        }], "error": null}}"#;

        let info = parse_company_info(body, "ACME").unwrap();
        assert_eq!(info.number(info_keys::MARKET_CAP), Some(800.0));
        assert_eq!(info.number(info_keys::REGULAR_MARKET_PRICE), Some(12.5));
        assert_eq!(info.text(info_keys::LONG_NAME), Some("Acme Corporation"));
        assert_eq!(info.get("tradeable"), Some(&InfoValue::Flag(false)));
        assert!(info.get("corporateActions").is_none());
    }

    #[test]
    fn test_unknown_symbol() {
        let body = r#"{"quoteResponse": {"result": [], "error": null}}"#;
        let result = parse_company_info(body, "NOPE");
        assert!(matches!(result, Err(DataError::InvalidSymbol(s)) if s == "NOPE"));
    }
}
