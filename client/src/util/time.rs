//! Wall-clock access for the engine's millisecond timestamps.

/// Milliseconds since the epoch. Zero outside the browser.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn now_ms() -> u64 {
    #[cfg(feature = "csr")]
    {
        let now = js_sys::Date::now();
        if now.is_finite() && now > 0.0 {
            return now as u64;
        }
        0
    }
    #[cfg(not(feature = "csr"))]
    {
        0
    }
}

/// Parse an ISO-8601 timestamp to epoch milliseconds via `Date.parse`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_iso_ms(raw: &str) -> Option<u64> {
    #[cfg(feature = "csr")]
    {
        let parsed = js_sys::Date::parse(raw);
        if !parsed.is_finite() || parsed < 0.0 {
            return None;
        }
        Some(parsed as u64)
    }
    #[cfg(not(feature = "csr"))]
    {
        raw.parse().ok()
    }
}
