use std::collections::HashMap;

use crate::data::ApiError;
use crate::domain::{Instrument, InstrumentKey};
use crate::models::{CatalogStore, FavoriteAck};

#[cfg(debug_assertions)]
use crate::config::DF;

use super::messages::{ApiRequest, Generation};

/// Unsettled toggles for one instrument. The newest one owns the displayed value; older ones
/// can still move `baseline`, the last membership the server confirmed.
#[derive(Debug, Clone)]
struct PendingToggle {
    latest: Generation,
    baseline: bool,
    in_flight: HashMap<Generation, bool>,
    // Some(true) once the newest toggle was confirmed, Some(false) once it was rolled back.
    latest_outcome: Option<bool>,
}

/// What a settled toggle response did to the favorites set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// Accepted; membership is now this confirmed value.
    Confirmed(bool),
    /// Refused or failed; membership restored to this pre-toggle value.
    RolledBack(bool),
    /// A newer toggle for the same instrument owns the displayed value.
    Superseded,
}

/// Optimistic favorite toggling. The local write lands before the request is even built; the
/// response either confirms it or puts back exactly what was there before.
#[derive(Debug, Default)]
pub struct FavoriteCoordinator {
    pending: HashMap<InstrumentKey, PendingToggle>,
    last_generation: Generation,
}

impl FavoriteCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership locally and return the confirming request for the transport.
    /// A toggle issued while another is in flight for the same instrument takes over its slot.
    pub fn toggle(&mut self, store: &mut CatalogStore, instrument: &Instrument) -> ApiRequest {
        let key = instrument.key();
        let current = store.is_favorite(&key);
        let optimistic = !current;
        store.set_favorite(&key, optimistic);

        self.last_generation += 1;
        let generation = self.last_generation;
        let slot = self.pending.entry(key).or_insert_with(|| PendingToggle {
            latest: generation,
            baseline: current,
            in_flight: HashMap::new(),
            latest_outcome: None,
        });
        let stacked = !slot.in_flight.is_empty();
        slot.latest = generation;
        slot.latest_outcome = None;
        slot.in_flight.insert(generation, optimistic);

        #[cfg(debug_assertions)]
        if DF.log_favorites {
            log::info!(
                "FAV: {} -> {} (gen {}{})",
                instrument,
                optimistic,
                generation,
                if stacked { ", supersedes pending" } else { "" }
            );
        }
        #[cfg(not(debug_assertions))]
        let _ = stacked;

        ApiRequest::ToggleFavorite {
            instrument: instrument.clone(),
            generation,
        }
    }

    pub fn settle(
        &mut self,
        store: &mut CatalogStore,
        key: &InstrumentKey,
        generation: Generation,
        result: Result<FavoriteAck, ApiError>,
    ) -> Settlement {
        let Some(slot) = self.pending.get_mut(key) else {
            return Settlement::Superseded;
        };
        let Some(guess) = slot.in_flight.remove(&generation) else {
            return Settlement::Superseded;
        };

        let outcome = if generation == slot.latest {
            match result {
                Ok(ack) => {
                    let confirmed = ack.favorite.unwrap_or(guess);
                    #[cfg(debug_assertions)]
                    if DF.log_favorites && confirmed != guess {
                        log::warn!("FAV: server disagreed for {}, reconciled to {}", key, confirmed);
                    }
                    slot.baseline = confirmed;
                    slot.latest_outcome = Some(true);
                    store.set_favorite(key, confirmed);
                    Settlement::Confirmed(confirmed)
                }
                Err(e) => {
                    log::warn!("Favorite toggle for {} failed ({}); rolling back", key, e);
                    slot.latest_outcome = Some(false);
                    store.set_favorite(key, slot.baseline);
                    Settlement::RolledBack(slot.baseline)
                }
            }
        } else {
            match result {
                // A confirmed newest toggle outranks any older confirmation.
                Ok(ack) if slot.latest_outcome != Some(true) => {
                    slot.baseline = ack.favorite.unwrap_or(guess);
                    if slot.latest_outcome == Some(false) {
                        store.set_favorite(key, slot.baseline);
                        Settlement::Confirmed(slot.baseline)
                    } else {
                        Settlement::Superseded
                    }
                }
                _ => {
                    #[cfg(debug_assertions)]
                    if DF.log_favorites {
                        log::info!("FAV: dropping stale response for {} (gen {})", key, generation);
                    }
                    Settlement::Superseded
                }
            }
        };

        if slot.in_flight.is_empty() {
            self.pending.remove(key);
        }
        outcome
    }

    pub fn is_pending(&self, key: &InstrumentKey) -> bool {
        self.pending
            .get(key)
            .is_some_and(|slot| slot.latest_outcome.is_none())
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
