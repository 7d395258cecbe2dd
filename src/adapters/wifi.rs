//! WiFi station bring-up for the room network.
//!
//! The controller joins a fixed infrastructure AP whose credentials come
//! from deployment config.  Connection is blocking with bounded retries —
//! nothing can be notified until the link is up, so there is no point
//! entering the game loop without it.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via
//!   `esp_idf_svc::wifi`.
//! - **all other targets**: the module compiles empty; host tests talk to
//!   mocks, not to a network.

#[cfg(target_os = "espidf")]
const MAX_CONNECT_ATTEMPTS: u8 = 5;
#[cfg(target_os = "espidf")]
const RETRY_DELAY_SECS: u64 = 3;

/// Join the room AP and block until the interface is up.
///
/// Returns the wifi handle, which must stay alive for the duration of the
/// game run.
#[cfg(target_os = "espidf")]
pub fn connect_sta(
    modem: esp_idf_hal::modem::Modem,
    ssid: &str,
    password: &str,
) -> anyhow::Result<esp_idf_svc::wifi::BlockingWifi<esp_idf_svc::wifi::EspWifi<'static>>> {
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_idf_svc::wifi::{
        AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi,
    };
    use log::{info, warn};

    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let mut wifi = BlockingWifi::wrap(EspWifi::new(modem, sysloop.clone(), Some(nvs))?, sysloop)?;

    let auth_method = if password.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::WPA2Personal
    };

    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid: ssid.try_into().map_err(|()| anyhow::anyhow!("SSID too long"))?,
        password: password
            .try_into()
            .map_err(|()| anyhow::anyhow!("password too long"))?,
        auth_method,
        ..Default::default()
    }))?;
    wifi.start()?;

    for attempt in 1..=MAX_CONNECT_ATTEMPTS {
        match wifi.connect().and_then(|()| wifi.wait_netif_up()) {
            Ok(()) => {
                info!("wifi: connected to '{}'", ssid);
                return Ok(wifi);
            }
            Err(e) => {
                warn!(
                    "wifi: attempt {}/{} failed: {}",
                    attempt, MAX_CONNECT_ATTEMPTS, e
                );
                std::thread::sleep(std::time::Duration::from_secs(RETRY_DELAY_SECS));
            }
        }
    }

    anyhow::bail!("wifi: giving up on '{}'", ssid)
}
