use serde::Deserialize;
use serde_json::Value;

/// Top-level shape of a BTCPay Server connection settings export.
/// The whole document is untrusted: unknown fields are ignored and
/// `configurations` may be absent entirely.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigExport {
    #[serde(default)]
    pub configurations: Vec<EndpointEntry>,
}

/// One endpoint advertised by the export.
///
/// `host`, `port` and `macaroon` stay as raw JSON values; exports in the
/// wild carry ports as numbers or strings, so they are validated downstream
/// rather than forced into a type here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointEntry {
    #[serde(rename = "type", default)]
    pub endpoint_type: String,
    #[serde(rename = "cryptoCode", default)]
    pub crypto_code: String,
    #[serde(default)]
    pub host: Value,
    #[serde(default)]
    pub port: Value,
    #[serde(default)]
    pub macaroon: Value,
}

impl EndpointEntry {
    /// The one endpoint kind this step can use.
    pub fn is_btc_grpc(&self) -> bool {
        self.endpoint_type == "grpc" && self.crypto_code == "BTC"
    }
}

/// The host/port/macaroon triple identifying a gRPC endpoint for the BTC
/// network. Computed during validation only; the wizard forwards the raw
/// pasted text, never this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    pub host: String,
    pub port: String,
    pub macaroon: String,
}
