//! NVS (Non-Volatile Storage) adapter for deployment configuration.
//!
//! Implements [`ConfigPort`].  One room installation differs from another
//! only in its network-facing settings; those live in NVS so a venue can be
//! re-pointed without reflashing.
//!
//! Validation runs on both save and load — a bad blob written once must not
//! brick the room.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: raw `nvs_*` sys calls, atomic per commit.
//! - **all other targets**: in-memory map (tests).

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::GameConfig;

#[cfg(not(target_os = "espidf"))]
use std::cell::RefCell;
#[cfg(not(target_os = "espidf"))]
use std::collections::HashMap;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

const NAMESPACE: &str = "roomctl";
const CONFIG_KEY: &str = "gamecfg";

/// Stored blobs are tiny; this bound exists to reject garbage lengths.
const MAX_BLOB_SIZE: usize = 512;

pub struct NvsAdapter {
    #[cfg(not(target_os = "espidf"))]
    store: RefCell<HashMap<String, Vec<u8>>>,
}

impl NvsAdapter {
    /// Create the adapter and initialise NVS flash.
    ///
    /// On first boot or after a version mismatch the NVS partition is erased
    /// and re-initialised automatically.
    pub fn new() -> Result<Self, ConfigError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase are called from the
            // single main-task context before any concurrent NVS access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                log::warn!("NVS: erasing and re-initialising flash partition");
                if unsafe { nvs_flash_erase() } != ESP_OK {
                    return Err(ConfigError::IoError);
                }
                if unsafe { nvs_flash_init() } != ESP_OK {
                    return Err(ConfigError::IoError);
                }
            } else if ret != ESP_OK {
                return Err(ConfigError::IoError);
            }
            info!("NvsAdapter: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsAdapter: simulation backend");

        Ok(Self {
            #[cfg(not(target_os = "espidf"))]
            store: RefCell::new(HashMap::new()),
        })
    }

    // ── Blob access ───────────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn read_blob(&self) -> Result<Vec<u8>, ConfigError> {
        Self::with_nvs_handle(false, |handle| {
            let mut key_c = [0u8; 16];
            key_c[..CONFIG_KEY.len()].copy_from_slice(CONFIG_KEY.as_bytes());

            let mut len: usize = 0;
            // SAFETY: handle is open for the closure's duration; a null data
            // pointer asks NVS for the stored length.
            let ret = unsafe {
                nvs_get_blob(
                    handle,
                    key_c.as_ptr().cast(),
                    core::ptr::null_mut(),
                    &mut len,
                )
            };
            if ret == ESP_ERR_NVS_NOT_FOUND {
                return Err(ConfigError::NotFound);
            }
            if ret != ESP_OK || len == 0 || len > MAX_BLOB_SIZE {
                return Err(ConfigError::Corrupted);
            }

            let mut buf = vec![0u8; len];
            // SAFETY: buf is len bytes, matching what NVS reported.
            let ret = unsafe {
                nvs_get_blob(
                    handle,
                    key_c.as_ptr().cast(),
                    buf.as_mut_ptr().cast(),
                    &mut len,
                )
            };
            if ret != ESP_OK {
                return Err(ConfigError::IoError);
            }
            Ok(buf)
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_blob(&self) -> Result<Vec<u8>, ConfigError> {
        self.store
            .borrow()
            .get(CONFIG_KEY)
            .cloned()
            .ok_or(ConfigError::NotFound)
    }

    #[cfg(target_os = "espidf")]
    fn write_blob(&self, data: &[u8]) -> Result<(), ConfigError> {
        Self::with_nvs_handle(true, |handle| {
            let mut key_c = [0u8; 16];
            key_c[..CONFIG_KEY.len()].copy_from_slice(CONFIG_KEY.as_bytes());

            // SAFETY: data outlives the call; commit makes the write atomic.
            let ret =
                unsafe { nvs_set_blob(handle, key_c.as_ptr().cast(), data.as_ptr().cast(), data.len()) };
            if ret != ESP_OK {
                return Err(ConfigError::IoError);
            }
            if unsafe { nvs_commit(handle) } != ESP_OK {
                return Err(ConfigError::IoError);
            }
            Ok(())
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_blob(&self, data: &[u8]) -> Result<(), ConfigError> {
        self.store
            .borrow_mut()
            .insert(CONFIG_KEY.to_string(), data.to_vec());
        Ok(())
    }

    /// Open the namespace, run a closure with the handle, then close.
    #[cfg(target_os = "espidf")]
    fn with_nvs_handle<T>(
        write: bool,
        f: impl FnOnce(nvs_handle_t) -> Result<T, ConfigError>,
    ) -> Result<T, ConfigError> {
        let mut ns_c = [0u8; 16];
        ns_c[..NAMESPACE.len()].copy_from_slice(NAMESPACE.as_bytes());

        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        let mut handle: nvs_handle_t = 0;
        // SAFETY: ns_c is NUL-terminated by construction (NAMESPACE < 16).
        let ret = unsafe { nvs_open(ns_c.as_ptr().cast(), mode, &mut handle) };
        if ret == ESP_ERR_NVS_NOT_FOUND {
            return Err(ConfigError::NotFound);
        }
        if ret != ESP_OK {
            return Err(ConfigError::IoError);
        }

        let result = f(handle);
        // SAFETY: handle came from the successful nvs_open above.
        unsafe { nvs_close(handle) };
        result
    }
}

impl ConfigPort for NvsAdapter {
    fn load(&self) -> Result<GameConfig, ConfigError> {
        let bytes = self.read_blob()?;
        let config: GameConfig =
            postcard::from_bytes(&bytes).map_err(|_| ConfigError::Corrupted)?;
        config.validate().map_err(ConfigError::ValidationFailed)?;
        Ok(config)
    }

    fn save(&self, config: &GameConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::ValidationFailed)?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        self.write_blob(&bytes)?;
        info!("config persisted ({} bytes)", bytes.len());
        Ok(())
    }
}
