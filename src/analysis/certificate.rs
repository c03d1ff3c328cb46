//! Certificate chain inspection.
//!
//! Runs only when the transport stage captured a chain. The three failure
//! branches are mutually exclusive: they gate on chain state (empty, not
//! parseable, outside validity), so at most one signal fires per request.

use chrono::Utc;
use x509_parser::parse_x509_certificate;

use crate::models::{CertificateVerdict, Signal};

/// Inspects a captured DER certificate chain and returns a verdict.
///
/// Checks, in order: chain presence, X.509 shape of the leading certificate,
/// and temporal validity of its `not_before`/`not_after` window against the
/// current UTC time.
pub fn inspect(chain: &[Vec<u8>]) -> CertificateVerdict {
    let Some(leaf) = chain.first() else {
        return CertificateVerdict::Absent;
    };

    let cert = match parse_x509_certificate(leaf) {
        Ok((_, cert)) => cert,
        Err(e) => {
            log::debug!("Leading certificate is not X.509-shaped: {e}");
            return CertificateVerdict::NotX509;
        }
    };

    let now = Utc::now().timestamp();
    let validity = cert.validity();
    if now < validity.not_before.timestamp() || now > validity.not_after.timestamp() {
        return CertificateVerdict::OutsideValidity;
    }

    CertificateVerdict::Valid
}

/// Maps a verdict to its scored signal, if any.
pub fn verdict_signal(verdict: CertificateVerdict) -> Option<Signal> {
    match verdict {
        CertificateVerdict::Absent => Some(Signal::EmptyCertChain),
        CertificateVerdict::NotX509 => Some(Signal::MalformedCertificate),
        CertificateVerdict::OutsideValidity => Some(Signal::CertificateOutsideValidity),
        CertificateVerdict::Valid => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chain_is_absent() {
        assert_eq!(inspect(&[]), CertificateVerdict::Absent);
        assert_eq!(
            verdict_signal(CertificateVerdict::Absent),
            Some(Signal::EmptyCertChain)
        );
        assert_eq!(Signal::EmptyCertChain.weight(), 40);
    }

    #[test]
    fn test_garbage_leaf_is_not_x509() {
        let chain = vec![b"this is not DER at all".to_vec()];
        assert_eq!(inspect(&chain), CertificateVerdict::NotX509);
        assert_eq!(
            verdict_signal(CertificateVerdict::NotX509),
            Some(Signal::MalformedCertificate)
        );
    }

    #[test]
    fn test_valid_verdict_scores_nothing() {
        assert_eq!(verdict_signal(CertificateVerdict::Valid), None);
    }

    #[test]
    fn test_expired_verdict_weight() {
        assert_eq!(
            verdict_signal(CertificateVerdict::OutsideValidity)
                .map(Signal::weight),
            Some(30)
        );
    }
}
