//! Persisted gauge settings: the last active screen.
//!
//! One byte in a wear-leveled key-value map over the last two flash
//! sectors, so writing on every mode change does not chew through a single
//! flash cell. Persistence is best-effort: a failed read falls back to the
//! default screen, a failed write keeps the previous one for next boot.

use defmt::warn;
use embassy_rp::Peri;
use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, ERASE_SIZE, Flash};
use embassy_rp::peripherals::FLASH;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

/// Total flash fitted on the Pico board.
const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Two sectors at the top of flash for the settings map.
const SETTINGS_SIZE: usize = 2 * ERASE_SIZE;

const SETTINGS_RANGE: core::ops::Range<u32> = (FLASH_SIZE - SETTINGS_SIZE) as u32..FLASH_SIZE as u32;

/// Map key of the last active mode ordinal.
const KEY_MODE: u8 = 0;

pub struct Settings<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> Settings<'d> {
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }

    /// Last persisted mode ordinal, or `None` on a fresh or unreadable store.
    pub async fn load_mode(&mut self) -> Option<u8> {
        let mut buffer = [0u8; 32];
        match map::fetch_item::<u8, &[u8], _>(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut buffer,
            &KEY_MODE,
        )
        .await
        {
            Ok(Some(data)) => data.first().copied(),
            Ok(None) => None,
            Err(_) => {
                warn!("settings: fetch failed, starting from the default screen");
                None
            }
        }
    }

    /// Persist the active mode ordinal.
    pub async fn store_mode(&mut self, ordinal: u8) {
        let mut buffer = [0u8; 32];
        let value: &[u8] = &[ordinal];
        if map::store_item(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut buffer,
            &KEY_MODE,
            &value,
        )
        .await
        .is_err()
        {
            warn!("settings: store failed, mode will not survive power-off");
        }
    }
}
