use crate::data::ApiError;
use crate::domain::ScannerCategory;
use crate::models::ScannerState;

use super::messages::{ApiRequest, Generation};

/// Server-side scanner switches. Local flips are optimistic; every server map that is still
/// current replaces local state wholesale.
#[derive(Debug, Default)]
pub struct ScannerCoordinator {
    state: ScannerState,
    generation: Generation,
    // Map to restore if the current toggle fails.
    rollback: Option<ScannerState>,
}

impl ScannerCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        self.rollback.is_some()
    }

    pub fn toggle(&mut self, category: ScannerCategory) -> ApiRequest {
        // Keep the oldest confirmed map when toggles stack up.
        if self.rollback.is_none() {
            self.rollback = Some(self.state.clone());
        }
        self.state = self.state.toggled(category);
        self.generation += 1;
        ApiRequest::ToggleScanner {
            category,
            generation: self.generation,
        }
    }

    /// Startup status fetch. Ignored while a toggle is outstanding, since the toggle response
    /// will carry a fresher map.
    pub fn apply_status(&mut self, result: Result<ScannerState, ApiError>) {
        match result {
            Ok(state) if self.rollback.is_none() => self.state = state,
            Ok(_) => {}
            Err(e) => log::warn!("Scanner status unavailable: {}", e),
        }
    }

    /// Returns false when the response belongs to a superseded toggle.
    pub fn settle(&mut self, generation: Generation, result: Result<ScannerState, ApiError>) -> bool {
        if generation != self.generation {
            return false;
        }
        let rollback = self.rollback.take();
        match result {
            Ok(state) => self.state = state,
            Err(e) => {
                log::warn!("Scanner toggle failed ({}); restoring previous state", e);
                if let Some(previous) = rollback {
                    self.state = previous;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gen_of(req: ApiRequest) -> Generation {
        match req {
            ApiRequest::ToggleScanner { generation, .. } => generation,
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn server_map_is_authoritative() {
        let mut scanner = ScannerCoordinator::new();
        let g = gen_of(scanner.toggle(ScannerCategory::Forex));
        assert!(scanner.state().is_enabled(ScannerCategory::Forex));

        let server = ScannerState::from_json(r#"{"forex": false, "crypto": true}"#).unwrap();
        assert!(scanner.settle(g, Ok(server.clone())));
        assert_eq!(scanner.state(), &server);
        assert!(!scanner.is_pending());
    }

    #[test]
    fn failure_restores_the_map_before_the_first_unsettled_toggle() {
        let mut scanner = ScannerCoordinator::new();
        scanner.apply_status(Ok(ScannerState::from_json(r#"{"crypto": true}"#).unwrap()));

        let g1 = gen_of(scanner.toggle(ScannerCategory::Crypto));
        let g2 = gen_of(scanner.toggle(ScannerCategory::Forex));
        assert!(!scanner.settle(g1, Err(ApiError::Transport("x".into()))));
        assert!(scanner.settle(g2, Err(ApiError::Transport("x".into()))));

        assert!(scanner.state().is_enabled(ScannerCategory::Crypto));
        assert!(!scanner.state().is_enabled(ScannerCategory::Forex));
    }

    #[test]
    fn status_does_not_clobber_a_pending_toggle() {
        let mut scanner = ScannerCoordinator::new();
        scanner.toggle(ScannerCategory::Watchlist);
        scanner.apply_status(Ok(ScannerState::default()));
        assert!(scanner.state().is_enabled(ScannerCategory::Watchlist));
    }
}
