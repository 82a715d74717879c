/// Current query filters: camera and local wall-clock time window.
///
/// `start_time`/`end_time` are minute-precision `YYYY-MM-DDTHH:mm` strings
/// in the session's reference timezone. No ordering or format validation
/// happens client-side; whatever the user typed is passed through verbatim
/// and the backend is responsible for rejecting nonsense.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// `None` means "all cameras".
    pub camera_id: Option<u32>,
    pub start_time: String,
    pub end_time: String,
}

/// Partial update to [`FilterState`]: present fields overwrite, absent
/// fields keep their prior value.
#[derive(Debug, Clone, Default)]
pub struct FilterUpdate {
    pub camera_id: Option<Option<u32>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl FilterUpdate {
    pub fn camera(camera_id: Option<u32>) -> Self {
        Self { camera_id: Some(camera_id), ..Self::default() }
    }

    pub fn start(start_time: impl Into<String>) -> Self {
        Self { start_time: Some(start_time.into()), ..Self::default() }
    }

    pub fn end(end_time: impl Into<String>) -> Self {
        Self { end_time: Some(end_time.into()), ..Self::default() }
    }
}

/// Canonical holder of the current [`FilterState`].
///
/// Every update bumps a revision counter so views keeping a local editing
/// draft can detect external changes and re-sync without diffing fields.
#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    state: FilterState,
    revision: u64,
}

impl FilterStore {
    pub fn new(state: FilterState) -> Self {
        Self { state, revision: 0 }
    }

    /// Shallow-merge `update` into the current state and return the result.
    pub fn update(&mut self, update: FilterUpdate) -> &FilterState {
        if let Some(camera_id) = update.camera_id {
            self.state.camera_id = camera_id;
        }
        if let Some(start_time) = update.start_time {
            self.state.start_time = start_time;
        }
        if let Some(end_time) = update.end_time {
            self.state.end_time = end_time;
        }
        self.revision += 1;
        &self.state
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Snapshot the current state by value (dispatch reads a copy so an
    /// in-flight request never races with later edits).
    pub fn snapshot(&self) -> FilterState {
        self.state.clone()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> FilterStore {
        FilterStore::new(FilterState {
            camera_id: None,
            start_time: "2024-01-01T09:00".to_string(),
            end_time: "2024-01-01T10:00".to_string(),
        })
    }

    #[test]
    fn test_partial_merge_keeps_untouched_fields() {
        let mut store = seeded_store();
        let state = store.update(FilterUpdate::camera(Some(2)));

        assert_eq!(state.camera_id, Some(2));
        assert_eq!(state.start_time, "2024-01-01T09:00");
        assert_eq!(state.end_time, "2024-01-01T10:00");
    }

    #[test]
    fn test_camera_can_be_cleared_back_to_all() {
        let mut store = seeded_store();
        store.update(FilterUpdate::camera(Some(3)));
        let state = store.update(FilterUpdate::camera(None));
        assert_eq!(state.camera_id, None);
    }

    #[test]
    fn test_no_validation_of_time_ordering() {
        // start after end is accepted verbatim; the backend validates
        let mut store = seeded_store();
        store.update(FilterUpdate::start("2024-01-02T10:00"));
        let state = store.state();
        assert!(state.start_time > state.end_time);
    }

    #[test]
    fn test_revision_bumps_on_every_update() {
        let mut store = seeded_store();
        assert_eq!(store.revision(), 0);
        store.update(FilterUpdate::start("x"));
        store.update(FilterUpdate::end("y"));
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut store = seeded_store();
        let snapshot = store.snapshot();
        store.update(FilterUpdate::camera(Some(1)));
        assert_eq!(snapshot.camera_id, None);
    }
}
