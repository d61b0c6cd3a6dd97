//! Simulated GHIN handicap lookup.
//!
//! There is no real GHIN API behind this: the handicap is derived from the digits
//! of the number so the same GHIN number always yields the same handicap.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::{Error, Result, profile::Handicap};

/// Numbers with fewer digits than this are rejected.
const MIN_DIGITS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct GhinRecord {
    pub handicap: Handicap,
    pub name: String,
}

#[async_trait]
pub trait HandicapLookup: Send + Sync {
    async fn lookup(&self, ghin_number: &str) -> Result<GhinRecord>;
}

/// Lookup that waits a fixed delay to feel like a network call.
#[derive(Debug, Clone)]
pub struct MockGhin {
    delay: Duration,
}

impl MockGhin {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl HandicapLookup for MockGhin {
    async fn lookup(&self, ghin_number: &str) -> Result<GhinRecord> {
        tokio::time::sleep(self.delay).await;
        let record = derive_record(ghin_number)?;
        debug!("GHIN {ghin_number} -> {}", record.handicap);
        Ok(record)
    }
}

/// Map a GHIN number onto a handicap between 0.0 and 35.9.
///
/// Non-digits are ignored and only the first five digits count.
pub fn derive_record(ghin_number: &str) -> Result<GhinRecord> {
    let digits: String = ghin_number.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < MIN_DIGITS {
        return Err(Error::InvalidGhin(ghin_number.to_string()));
    }

    let leading: u32 = digits
        .chars()
        .take(MIN_DIGITS)
        .collect::<String>()
        .parse()
        .map_err(|_| Error::InvalidGhin(ghin_number.to_string()))?;

    let raw = f64::from(leading % 360) / 10.0;
    let handicap = (raw * 10.0).round() / 10.0;

    Ok(GhinRecord {
        handicap: Handicap::new(handicap),
        name: format!("Golfer #{ghin_number}"),
    })
}
