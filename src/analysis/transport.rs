//! Transport probing: connection, TLS capture, status, and final URL.
//!
//! For HTTPS targets the certificate chain is captured over a raw
//! `tokio-rustls` connection before the HTTP probe runs. The capture uses a
//! verifier that records the presented chain without rejecting it: chain
//! problems are scored by the certificate stage, not refused at the
//! transport layer.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::StatusCode;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, SignatureScheme};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use url::Url;

use crate::analysis::AnalysisContext;
use crate::config::{TCP_CONNECT_TIMEOUT_SECS, TLS_HANDSHAKE_TIMEOUT_SECS};
use crate::models::{Signal, StageResult, TerminalFailure, TransportResult};

/// Certificate verifier that accepts every chain.
///
/// The pipeline inspects and scores the presented certificates itself, so the
/// handshake must complete even for expired or otherwise invalid chains that
/// a verifying client would refuse. Never use this config for anything other
/// than chain capture.
#[derive(Debug)]
struct ChainCaptureVerifier;

impl ServerCertVerifier for ChainCaptureVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        rustls::crypto::ring::default_provider()
            .signature_verification_algorithms
            .supported_schemes()
    }
}

/// Connects to the target and captures the raw DER certificate chain.
///
/// Both the TCP connect and the TLS handshake are individually bounded by the
/// configured timeouts.
///
/// # Errors
///
/// Returns an error if the host is missing/invalid, the TCP connection fails
/// or times out, or the TLS handshake fails or times out.
async fn capture_certificate_chain(url: &Url) -> Result<Vec<Vec<u8>>> {
    let host = url
        .host_str()
        .ok_or_else(|| anyhow!("URL has no host component"))?
        .to_string();
    let port = url.port_or_known_default().unwrap_or(443);

    let server_name = ServerName::try_from(host.clone())
        .map_err(|e| anyhow!("Invalid server name {host}: {e}"))?;

    let sock = match tokio::time::timeout(
        Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
        TcpStream::connect((host.clone(), port)),
    )
    .await
    {
        Ok(Ok(sock)) => sock,
        Ok(Err(e)) => return Err(anyhow!("Failed to connect to {host}:{port}: {e}")),
        Err(_) => {
            return Err(anyhow!(
                "TCP connection timeout for {host}:{port} ({TCP_CONNECT_TIMEOUT_SECS}s)"
            ))
        }
    };

    let config = ClientConfig::builder()
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(ChainCaptureVerifier))
        .with_no_client_auth();
    let connector = TlsConnector::from(Arc::new(config));

    let tls_stream = match tokio::time::timeout(
        Duration::from_secs(TLS_HANDSHAKE_TIMEOUT_SECS),
        connector.connect(server_name, sock),
    )
    .await
    {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => return Err(anyhow!("TLS handshake failed for {host}: {e}")),
        Err(_) => {
            return Err(anyhow!(
                "TLS handshake timeout for {host} ({TLS_HANDSHAKE_TIMEOUT_SECS}s)"
            ))
        }
    };

    let chain = tls_stream
        .get_ref()
        .1
        .peer_certificates()
        .map(|certs| certs.iter().map(|c| c.as_ref().to_vec()).collect())
        .unwrap_or_default();

    Ok(chain)
}

/// Probes the target: TLS capture (HTTPS only), then the HTTP round trip.
///
/// Outcomes:
/// - Scheme is neither http nor https: terminal connection error.
/// - TLS capture failure: scored (`TlsHandshakeFailure`), never terminal; the
///   HTTP probe still runs.
/// - HTTP probe failure: terminal connection error, unless the TLS capture
///   already failed, in which case the failure is already scored and the
///   pipeline continues with no status code.
/// - On a completed round trip: raises `SchemeDowngrade` when https was
///   requested but plain http was served, and `NonOkStatus` for any status
///   other than 200.
pub async fn probe(url: &Url, requested: &str, ctx: &AnalysisContext) -> StageResult<TransportResult> {
    match url.scheme() {
        "http" | "https" => {}
        other => {
            log::debug!("No HTTP-capable transport for scheme {other}: {url}");
            return StageResult::Terminal(TerminalFailure::ConnectionError);
        }
    }

    let mut signals = Vec::new();
    let mut cert_chain = None;
    let mut tls_failed = false;

    if url.scheme() == "https" {
        match capture_certificate_chain(url).await {
            Ok(chain) => cert_chain = Some(chain),
            Err(e) => {
                log::debug!("TLS capture failed for {url}: {e:#}");
                signals.push(Signal::TlsHandshakeFailure);
                tls_failed = true;
            }
        }
    }

    let (status, final_url) = match ctx.probe_client.get(url.clone()).send().await {
        Ok(response) => (Some(response.status()), response.url().clone()),
        Err(e) if tls_failed => {
            // Already scored as a TLS failure; continue without a status code
            log::debug!("HTTP probe failed after TLS failure for {url}: {e}");
            (None, url.clone())
        }
        Err(e) => {
            log::debug!("HTTP probe failed for {url}: {e}");
            return StageResult::Terminal(TerminalFailure::ConnectionError);
        }
    };

    if requested.starts_with("https") && final_url.scheme() == "http" {
        signals.push(Signal::SchemeDowngrade);
    }

    if let Some(code) = status {
        if code != StatusCode::OK {
            signals.push(Signal::NonOkStatus);
        }
    }

    StageResult::Next {
        value: TransportResult {
            scheme: url.scheme().to_string(),
            status,
            final_url,
            cert_chain,
        },
        signals,
    }
}
