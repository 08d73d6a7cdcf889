//! Ticket Identity Generation
//!
//! Produces the human-facing ticket identifier and a deterministic secondary
//! fingerprint for newly created requests.
//!
//! - `ticket_id` is "{floor}-{unit}-{YYYYMMDD}-{token}": readable, embeds
//!   location and date, unique-with-high-probability via the random token.
//! - `hash_id` is a deterministic fold of "{floor}#{unit}+{YYYYMMDD}"; same
//!   floor/unit/day always yields the same fingerprint. Not a secret and not
//!   collision-proof; it is a secondary reference only.
//!
//! Dates use the current UTC calendar day. The clock and the token source are
//! injectable so tests can assert exact identifier strings.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of the random token segment
const TOKEN_LEN: usize = 6;

/// URL-safe token alphabet (A-Za-z0-9_-)
const TOKEN_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Identity pair embedded into a persisted ticket record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketIdentity {
    #[serde(rename = "ticketId")]
    pub ticket_id: String,
    #[serde(rename = "hashId")]
    pub hash_id: String,
}

// ============================================================================
// Clock and Token Source
// ============================================================================

/// Source of the ticket date, as a compact YYYYMMDD string
pub trait Clock {
    fn date_stamp(&self) -> String;
}

/// UTC system clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn date_stamp(&self) -> String {
        Utc::now().format("%Y%m%d").to_string()
    }
}

/// Source of the short random token segment
pub trait TokenSource {
    fn short_token(&self) -> String;
}

/// Thread-local RNG over the URL-safe alphabet
pub struct RandomTokens;

impl TokenSource for RandomTokens {
    fn short_token(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..TOKEN_LEN)
            .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
            .collect()
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Ticket identity generator with injectable clock and token source
pub struct TicketIdGenerator<C: Clock, T: TokenSource> {
    clock: C,
    tokens: T,
}

impl TicketIdGenerator<SystemClock, RandomTokens> {
    pub fn new() -> Self {
        Self {
            clock: SystemClock,
            tokens: RandomTokens,
        }
    }
}

impl Default for TicketIdGenerator<SystemClock, RandomTokens> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, T: TokenSource> TicketIdGenerator<C, T> {
    pub fn with_parts(clock: C, tokens: T) -> Self {
        Self { clock, tokens }
    }

    /// Generate the identity pair for a ticket at the given location.
    ///
    /// Never fails; an empty unit still yields a well-formed (if less
    /// informative) identifier.
    pub fn generate(&self, floor: i32, unit: &str) -> TicketIdentity {
        let date_stamp = self.clock.date_stamp();
        let token = self.tokens.short_token();

        let ticket_id = format!("{}-{}-{}-{}", floor, unit, date_stamp, token);
        let hash_id = simple_hash(&format!("{}#{}+{}", floor, unit, date_stamp));

        TicketIdentity { ticket_id, hash_id }
    }
}

/// Generate a ticket identity with the system clock and a random token
pub fn generate_ticket_id(floor: i32, unit: &str) -> TicketIdentity {
    TicketIdGenerator::new().generate(floor, unit)
}

/// Fold a string into a short lowercase-hex fingerprint.
///
/// The recurrence is `h = (h << 5) - h + code_unit` over UTF-16 code units,
/// truncated to 32 signed bits at every step, then absolute value, lowercase
/// hex, zero-padded to at least 8 chars and cut at 12. The shift/subtract
/// form is load-bearing: `h * 31 + c` variants produce different values.
fn simple_hash(input: &str) -> String {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32);
    }
    let hex = format!("{:08x}", hash.unsigned_abs());
    hex.chars().take(12).collect()
}

// ============================================================================
// Tests
// ============================================================================
