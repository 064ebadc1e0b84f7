//! Auth counters.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Error;

#[derive(Default)]
pub struct Metrics {
    pub logins_succeeded: AtomicU64,
    pub logins_failed: AtomicU64,
    pub logins_throttled: AtomicU64,
    pub tokens_issued: AtomicU64,
    pub tokens_verified: AtomicU64,
    pub rejected_missing: AtomicU64,
    pub rejected_malformed: AtomicU64,
    pub rejected_signature: AtomicU64,
    pub rejected_algorithm: AtomicU64,
    pub rejected_expired: AtomicU64,
    pub rejected_decode: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_login(&self) {
        self.logins_succeeded.fetch_add(1, Ordering::Relaxed);
        self.tokens_issued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_login_failure(&self) {
        self.logins_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_throttled(&self) {
        self.logins_throttled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_verify(&self) {
        self.tokens_verified.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejection(&self, err: &Error) {
        let counter = match err {
            Error::MissingToken => &self.rejected_missing,
            Error::MalformedToken => &self.rejected_malformed,
            Error::InvalidSignature => &self.rejected_signature,
            Error::UnsupportedAlgorithm(_) => &self.rejected_algorithm,
            Error::TokenExpired => &self.rejected_expired,
            Error::Decode(_) => &self.rejected_decode,
            _ => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            logins_succeeded: self.logins_succeeded.load(Ordering::Relaxed),
            logins_failed: self.logins_failed.load(Ordering::Relaxed),
            logins_throttled: self.logins_throttled.load(Ordering::Relaxed),
            tokens_issued: self.tokens_issued.load(Ordering::Relaxed),
            tokens_verified: self.tokens_verified.load(Ordering::Relaxed),
            rejections: RejectionSnapshot {
                missing: self.rejected_missing.load(Ordering::Relaxed),
                malformed: self.rejected_malformed.load(Ordering::Relaxed),
                signature: self.rejected_signature.load(Ordering::Relaxed),
                algorithm: self.rejected_algorithm.load(Ordering::Relaxed),
                expired: self.rejected_expired.load(Ordering::Relaxed),
                decode: self.rejected_decode.load(Ordering::Relaxed),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub logins_succeeded: u64,
    pub logins_failed: u64,
    pub logins_throttled: u64,
    pub tokens_issued: u64,
    pub tokens_verified: u64,
    pub rejections: RejectionSnapshot,
}

#[derive(Debug, Serialize)]
pub struct RejectionSnapshot {
    pub missing: u64,
    pub malformed: u64,
    pub signature: u64,
    pub algorithm: u64,
    pub expired: u64,
    pub decode: u64,
}
