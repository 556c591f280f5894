//! gRPC client for the chain node.

use std::time::Duration;

use thiserror::Error;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint, Identity};
use tracing::debug;

use crate::chainmeta::ChainMetaSnapshot;
use crate::config::{NodeConfig, TlsConfig};
use crate::proto::GetChainMetaRequest;
use crate::proto::chain_service_client::ChainServiceClient;

/// Errors from a single metadata fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection setup plus the round trip exceeded the deadline.
    #[error("connection to {endpoint} timed out after {timeout:?}")]
    Timeout { endpoint: String, timeout: Duration },

    /// The endpoint is unreachable, refused the connection, or is not a
    /// valid URI.
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },

    /// The node answered with an application-level error.
    #[error("node returned an error: {0}")]
    Rpc(#[from] tonic::Status),

    /// The response could not be interpreted as a chain-metadata snapshot.
    #[error("malformed response: {0}")]
    Malformed(&'static str),

    /// TLS material configured in the TLS block could not be read.
    #[error("failed to read TLS material from {path}: {source}")]
    TlsMaterial {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Client for fetching chain-metadata snapshots from one node.
///
/// Each [`fetch_chain_meta`](NodeClient::fetch_chain_meta) call opens its
/// own channel and releases it on every exit path, so concurrent scrapes
/// never share connection state.
#[derive(Debug, Clone)]
pub struct NodeClient {
    endpoint: String,
    timeout: Duration,
    tls: TlsConfig,
}

impl NodeClient {
    /// Create a client for the configured node.
    pub fn new(config: &NodeConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            tls: config.tls.clone(),
        }
    }

    /// The configured node endpoint (host:port).
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch one chain-metadata snapshot.
    ///
    /// One deadline bounds connection setup and the metadata round trip
    /// combined. On expiry the in-flight connection is aborted and the
    /// call fails with [`FetchError::Timeout`]. No retry is attempted;
    /// the next scrape is the retry.
    pub async fn fetch_chain_meta(&self) -> Result<ChainMetaSnapshot, FetchError> {
        match tokio::time::timeout(self.timeout, self.fetch_inner()).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                endpoint: self.endpoint.clone(),
                timeout: self.timeout,
            }),
        }
    }

    async fn fetch_inner(&self) -> Result<ChainMetaSnapshot, FetchError> {
        let channel = self.connect().await?;
        let mut client = ChainServiceClient::new(channel);

        let response = client.get_chain_meta(GetChainMetaRequest {}).await?;

        debug!(endpoint = %self.endpoint, "Fetched chain metadata");
        ChainMetaSnapshot::try_from(response.into_inner())
    }

    async fn connect(&self) -> Result<Channel, FetchError> {
        // The endpoint string alone never selects the transport; the TLS
        // flag does.
        let scheme = if self.tls.enabled { "https" } else { "http" };
        let uri = format!("{}://{}", scheme, self.endpoint);

        let connect_err = |source| FetchError::Connect {
            endpoint: self.endpoint.clone(),
            source,
        };

        let mut endpoint = Endpoint::from_shared(uri).map_err(connect_err)?;

        if self.tls.enabled {
            let mut tls_config = ClientTlsConfig::new().with_native_roots();

            if let Some(ref ca_cert_path) = self.tls.ca_cert {
                let ca_cert = read_pem(ca_cert_path).await?;
                tls_config = tls_config.ca_certificate(Certificate::from_pem(ca_cert));
            }

            if let (Some(cert_path), Some(key_path)) = (&self.tls.client_cert, &self.tls.client_key)
            {
                let cert = read_pem(cert_path).await?;
                let key = read_pem(key_path).await?;
                tls_config = tls_config.identity(Identity::from_pem(cert, key));
            }

            endpoint = endpoint.tls_config(tls_config).map_err(connect_err)?;
        }

        endpoint.connect().await.map_err(connect_err)
    }
}

async fn read_pem(path: &str) -> Result<Vec<u8>, FetchError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| FetchError::TlsMaterial {
            path: path.to_string(),
            source,
        })
}
