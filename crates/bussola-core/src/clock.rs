//! Identity and time providers.
//!
//! Every mutation that needs "now" or a fresh id receives it through these
//! traits, so the state operations stay deterministic under test.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Source of the current instant and the user's calendar date.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in the application's local time zone.
    fn today(&self) -> NaiveDate;
}

/// Source of unique string identifiers.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

impl<T: IdGenerator + ?Sized> IdGenerator for Arc<T> {
    fn next_id(&self) -> String {
        (**self).next_id()
    }
}

/// Wall clock using the machine's local time zone for dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Manually driven clock. Dates are taken in UTC.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Clock pinned to noon UTC of the given date.
    pub fn at_date(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        Self::new(Utc.from_utc_datetime(&noon))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Length of the base-36 millisecond prefix of a timestamp id.
const TIMESTAMP_PREFIX_LEN: usize = 8;
const RANDOM_SUFFIX_LEN: usize = 9;

/// Ids shaped as `<base36 epoch millis><9 random base36 chars>`.
///
/// The prefix lets [`decode_id_timestamp`] recover a creation time from
/// documents that predate the explicit `createdAt` field on priorities.
#[derive(Debug, Default)]
pub struct TimestampIdGenerator<C: Clock = SystemClock> {
    clock: C,
}

impl TimestampIdGenerator<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> TimestampIdGenerator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for TimestampIdGenerator<C> {
    fn next_id(&self) -> String {
        let millis = self.clock.now().timestamp_millis().max(0) as u64;
        let random = uuid::Uuid::new_v4().as_u128();
        let mut suffix = encode_base36(random as u64);
        suffix.truncate(RANDOM_SUFFIX_LEN);
        while suffix.len() < RANDOM_SUFFIX_LEN {
            suffix.insert(0, '0');
        }
        format!("{}{}", encode_base36(millis), suffix)
    }
}

/// Deterministic ids `"<prefix>-1"`, `"<prefix>-2"`, ... for tests and replays.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}

pub fn encode_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Recover the creation instant encoded in a timestamp id.
///
/// Returns `None` for ids that are too short, contain non base-36 characters
/// in the prefix, or decode to an instant outside 2001..2100.
pub fn decode_id_timestamp(id: &str) -> Option<DateTime<Utc>> {
    let prefix = id.get(..TIMESTAMP_PREFIX_LEN)?;
    let millis = u64::from_str_radix(prefix, 36).ok()?;
    let millis = i64::try_from(millis).ok()?;
    let instant = DateTime::<Utc>::from_timestamp_millis(millis)?;
    let lower = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).single()?;
    let upper = Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).single()?;
    (lower..upper).contains(&instant).then_some(instant)
}
