//! Play sessions and the progress callback handed to mini-games.
//!
//! A game receives a [`ProgressReporter`] and calls it with a raw progress
//! value whenever it likes. Under a policy that settles on finish, the
//! latest clamped value becomes the session's score when the host hands the
//! session back to [`Zoo::finish_game`]. A policy that settles on start has
//! already paid by the time the game sees its reporter.
//!
//! [`Zoo::finish_game`]: crate::zoo::Zoo::finish_game

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;
use zoo_core::ledger::RewardReceipt;
use zoo_core::reward::PerformanceScore;
use zoo_core::types::AnimalId;

use crate::events::{EventLog, SessionEvent};
use crate::games::GameKind;

/// Progress callback a mini-game calls with values in `[0, 100]`.
pub type ProgressReporter = Box<dyn FnMut(f64) + Send>;

#[derive(Debug, Default)]
struct Progress {
    latest: Option<PerformanceScore>,
    reports: u32,
    closed: bool,
}

/// One open mini-game for one animal.
///
/// Consumed by [`Zoo::finish_game`](crate::zoo::Zoo::finish_game), so each
/// session pays out at most once.
#[derive(Debug)]
pub struct PlaySession {
    id: u64,
    owner: u64,
    animal: AnimalId,
    game: GameKind,
    prepaid: Option<RewardReceipt>,
    progress: Arc<Mutex<Progress>>,
    events: EventLog,
}

impl PlaySession {
    pub(crate) fn new(id: u64, owner: u64, animal: AnimalId, game: GameKind, events: EventLog) -> Self {
        Self {
            id,
            owner,
            animal,
            game,
            prepaid: None,
            progress: Arc::new(Mutex::new(Progress::default())),
            events,
        }
    }

    pub(crate) fn with_prepaid(mut self, receipt: RewardReceipt) -> Self {
        self.prepaid = Some(receipt);
        self
    }

    /// Token of the zoo that opened this session.
    pub(crate) fn owner(&self) -> u64 {
        self.owner
    }

    /// The reward already paid when the game opened, if the policy settles
    /// on start.
    #[must_use]
    pub fn prepaid(&self) -> Option<&RewardReceipt> {
        self.prepaid.as_ref()
    }

    /// Session number, unique per zoo.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The animal being played with.
    #[must_use]
    pub fn animal(&self) -> AnimalId {
        self.animal
    }

    /// The game being played.
    #[must_use]
    pub fn game(&self) -> GameKind {
        self.game
    }

    /// Record a progress report. Returns the clamped score.
    pub fn report(&self, raw: f64) -> PerformanceScore {
        record(&self.progress, &self.events, self.id, raw)
    }

    /// A boxed callback that reports into this session. It may outlive the
    /// session; reports after the session is finished are ignored.
    #[must_use]
    pub fn reporter(&self) -> ProgressReporter {
        let progress = Arc::clone(&self.progress);
        let events = self.events.clone();
        let id = self.id;
        Box::new(move |raw| {
            record(&progress, &events, id, raw);
        })
    }

    /// Latest reported score, if any.
    #[must_use]
    pub fn latest(&self) -> Option<PerformanceScore> {
        self.progress.lock().latest
    }

    /// Number of reports received.
    #[must_use]
    pub fn reports(&self) -> u32 {
        self.progress.lock().reports
    }

    /// The score to settle with: the latest report, or zero.
    #[must_use]
    pub fn final_score(&self) -> PerformanceScore {
        self.latest().unwrap_or_default()
    }

    /// Stop accepting reports and return the final score.
    pub(crate) fn close(&self) -> PerformanceScore {
        let mut p = self.progress.lock();
        p.closed = true;
        p.latest.unwrap_or_default()
    }
}

fn record(progress: &Mutex<Progress>, events: &EventLog, session: u64, raw: f64) -> PerformanceScore {
    let score = PerformanceScore::new(raw);
    {
        let mut p = progress.lock();
        if p.closed {
            return p.latest.unwrap_or_default();
        }
        p.latest = Some(score);
        p.reports += 1;
    }
    trace!(session, score = score.value(), "Progress reported");
    events.push(SessionEvent::Progress { session, score });
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> (PlaySession, EventLog) {
        let log = EventLog::default();
        (PlaySession::new(1, 1, AnimalId(1), GameKind::Facts, log.clone()), log)
    }

    #[test]
    fn silent_game_scores_zero() {
        let (s, _) = session();
        assert_eq!(s.latest(), None);
        assert_eq!(s.final_score().value(), 0.0);
    }

    #[test]
    fn latest_report_wins_and_is_clamped() {
        let (s, log) = session();
        s.report(40.0);
        assert_eq!(s.report(140.0).value(), 100.0);
        s.report(f64::NAN);
        assert_eq!(s.final_score().value(), 0.0);
        assert_eq!(s.reports(), 3);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn reporter_feeds_the_session_from_another_thread() {
        let (s, _) = session();
        let mut report = s.reporter();
        std::thread::spawn(move || {
            report(25.0);
            report(75.0);
        })
        .join()
        .expect("game thread");
        assert_eq!(s.final_score().value(), 75.0);
        assert_eq!(s.reports(), 2);
    }

    #[test]
    fn closed_session_ignores_late_reports() {
        let (s, log) = session();
        let mut report = s.reporter();
        report(60.0);
        assert_eq!(s.close().value(), 60.0);
        report(90.0);
        assert_eq!(s.final_score().value(), 60.0);
        assert_eq!(log.len(), 1);
    }
}
