//! Fuzz target: start-token request-line parser.
//!
//! Drives arbitrary bytes through `parse_request_token` and asserts that it
//! never panics and that any extracted token respects the capacity bound and
//! is never empty.
//!
//! cargo fuzz run fuzz_start_token

#![no_main]

use libfuzzer_sys::fuzz_target;
use roomctl::adapters::net_start::parse_request_token;

fuzz_target!(|data: &[u8]| {
    if let Some(token) = parse_request_token(data) {
        assert!(!token.is_empty(), "empty tokens must be rejected");
        assert!(token.len() <= 32, "token exceeds its fixed capacity");
    }
});
