use std::collections::VecDeque;

use uuid::Uuid;

use crate::config::TIMING;
use crate::domain::Instrument;
use crate::models::{SignalReport, StreamMessage, Tone};

#[cfg(debug_assertions)]
use crate::config::DF;

use super::messages::DeskTimer;
use super::scheduler::{Scheduler, TimerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One pushed signal, visible until dismissed or until its lifetime runs out.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSignalEntry {
    pub id: EntryId,
    pub instrument: Instrument,
    pub report: SignalReport,
    pub created_at_ms: i64,
    expiry: TimerId,
}

impl LiveSignalEntry {
    pub fn score(&self) -> u8 {
        self.report.score()
    }

    pub fn tone(&self) -> Tone {
        self.report.tone()
    }

    pub fn verdict(&self) -> &str {
        self.report.verdict()
    }

    pub fn expires_at_ms(&self) -> i64 {
        self.created_at_ms + TIMING.live_entry_lifetime_ms
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub received: u64,
    pub control: u64,
    pub malformed: u64,
    pub stream_errors: u64,
}

/// Newest-first list of live entries. Each entry owns exactly one expiry timer; whichever of
/// dismissal, expiry or eviction happens first removes the entry and the timer together.
#[derive(Debug, Default)]
pub struct LiveFeed {
    entries: VecDeque<LiveSignalEntry>,
    stats: FeedStats,
}

impl LiveFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one raw stream payload and insert it. Control and malformed messages are dropped.
    pub fn ingest(
        &mut self,
        raw: &str,
        now_ms: i64,
        scheduler: &mut Scheduler<DeskTimer>,
    ) -> Option<EntryId> {
        self.stats.received += 1;
        match StreamMessage::parse(raw) {
            StreamMessage::Signal(report) => {
                let instrument = report.instrument()?;
                Some(self.insert(instrument, report, now_ms, scheduler))
            }
            StreamMessage::Control => {
                self.stats.control += 1;
                None
            }
            StreamMessage::Malformed(e) => {
                self.stats.malformed += 1;
                log::debug!("Dropping malformed stream message ({}): {}", e, raw);
                None
            }
        }
    }

    pub fn insert(
        &mut self,
        instrument: Instrument,
        report: SignalReport,
        now_ms: i64,
        scheduler: &mut Scheduler<DeskTimer>,
    ) -> EntryId {
        let id = EntryId::new();
        let expiry = scheduler.schedule(
            now_ms + TIMING.live_entry_lifetime_ms,
            DeskTimer::ExpireEntry(id),
        );

        #[cfg(debug_assertions)]
        if DF.log_live_feed {
            log::info!("FEED: + {} {} ({})", instrument, report.verdict(), id);
        }

        self.entries.push_front(LiveSignalEntry {
            id,
            instrument,
            report,
            created_at_ms: now_ms,
            expiry,
        });

        while self.entries.len() > TIMING.live_feed_capacity {
            if let Some(oldest) = self.entries.pop_back() {
                scheduler.cancel(oldest.expiry);
            }
        }
        id
    }

    /// User dismissal. Unknown (already gone) ids are a no-op.
    pub fn dismiss(&mut self, id: EntryId, scheduler: &mut Scheduler<DeskTimer>) -> bool {
        match self.remove(id) {
            Some(entry) => {
                scheduler.cancel(entry.expiry);
                true
            }
            None => false,
        }
    }

    /// Expiry timer fired. The timer is already out of the queue.
    pub fn expire(&mut self, id: EntryId) -> bool {
        let removed = self.remove(id).is_some();
        #[cfg(debug_assertions)]
        if DF.log_live_feed && removed {
            log::info!("FEED: expired {}", id);
        }
        removed
    }

    pub fn record_stream_error(&mut self, error: &str) {
        self.stats.stream_errors += 1;
        log::warn!("Live stream error: {}", error);
    }

    pub fn get(&self, id: EntryId) -> Option<&LiveSignalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> impl Iterator<Item = &LiveSignalEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> FeedStats {
        self.stats
    }

    fn remove(&mut self, id: EntryId) -> Option<LiveSignalEntry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        self.entries.remove(idx)
    }
}
