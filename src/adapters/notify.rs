//! Outbound show-control notifications — HTTP GET, fire-and-forget.
//!
//! The show server treats the request path as the event name and answers
//! with an empty body; nothing in the response matters to the game.  The
//! request is bounded by a short timeout so a dead server cannot stall the
//! poll loop for long.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: raw `esp_http_client` sys calls.
//! - **all other targets**: logged no-op for host tests.

use log::{info, warn};

use crate::app::ports::NotifierPort;

/// Request timeout — the show server is on the room LAN and answers fast or
/// not at all.
const REQUEST_TIMEOUT_MS: u16 = 1_000;

pub struct HttpNotifier {
    base_url: heapless::String<64>,
}

impl HttpNotifier {
    pub fn new(base_url: heapless::String<64>) -> Self {
        Self { base_url }
    }

    fn url_for(&self, path: &str) -> heapless::String<96> {
        let mut url = heapless::String::new();
        // base (≤64) + "/" + path (short constants) always fits in 96.
        let _ = url.push_str(&self.base_url);
        let _ = url.push('/');
        let _ = url.push_str(path);
        url
    }

    #[cfg(target_os = "espidf")]
    fn send(&mut self, url: &str) -> Result<(), i32> {
        use esp_idf_svc::sys::*;

        // esp_http_client wants a NUL-terminated URL.
        let mut url_c = [0u8; 100];
        let bytes = url.as_bytes();
        if bytes.len() >= url_c.len() {
            return Err(ESP_ERR_INVALID_ARG);
        }
        url_c[..bytes.len()].copy_from_slice(bytes);

        let config = esp_http_client_config_t {
            url: url_c.as_ptr().cast(),
            method: esp_http_client_method_t_HTTP_METHOD_GET,
            timeout_ms: i32::from(REQUEST_TIMEOUT_MS),
            ..Default::default()
        };

        // SAFETY: config outlives the client; init/perform/cleanup is the
        // documented esp_http_client call sequence.
        unsafe {
            let client = esp_http_client_init(&config);
            if client.is_null() {
                return Err(ESP_FAIL);
            }
            let ret = esp_http_client_perform(client);
            esp_http_client_cleanup(client);
            if ret == ESP_OK { Ok(()) } else { Err(ret) }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn send(&mut self, url: &str) -> Result<(), i32> {
        log::debug!("notify(sim): GET {}", url);
        Ok(())
    }
}

impl NotifierPort for HttpNotifier {
    fn notify(&mut self, path: &str) {
        let url = self.url_for(path);
        info!("notify: GET {}", url);
        // Outcome intentionally dropped — the caller's latch is already set
        // and game progress must not depend on delivery.
        if let Err(rc) = self.send(&url) {
            warn!("notify '{}' failed (rc={})", path, rc);
        }
    }
}
