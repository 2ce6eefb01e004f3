//! Save pipeline state machine
//!
//! `Idle -> Preparing -> Uploading -> Idle`. Rasterizing finishes before
//! the upload starts, and the save control is only enabled while idle.
//! [`SavePipeline::finish`] is the single exit for both outcomes and
//! always lands back in `Idle`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    /// Rasterizing the grid to PNG
    Preparing,
    /// Waiting on the image host
    Uploading,
}

#[derive(Debug, Default)]
pub struct SavePipeline {
    state: SaveState,
}

impl SavePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    /// Whether the save control should accept a press
    pub fn can_start(&self) -> bool {
        self.state == SaveState::Idle
    }

    /// Start a save. Returns `false` if one is already running.
    pub fn begin(&mut self) -> bool {
        if !self.can_start() {
            return false;
        }
        self.state = SaveState::Preparing;
        true
    }

    /// PNG bytes are ready; move on to uploading.
    /// Returns `false` if no save was being prepared.
    pub fn exported(&mut self) -> bool {
        if self.state != SaveState::Preparing {
            return false;
        }
        self.state = SaveState::Uploading;
        true
    }

    /// End the save with either outcome and hand the outcome back.
    pub fn finish<T, E>(&mut self, outcome: Result<T, E>) -> Result<T, E> {
        self.state = SaveState::Idle;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut save = SavePipeline::new();
        assert!(save.begin());
        assert_eq!(save.state(), SaveState::Preparing);
        assert!(save.exported());
        assert_eq!(save.state(), SaveState::Uploading);
        assert_eq!(save.finish::<_, String>(Ok(1)), Ok(1));
        assert!(save.can_start());
    }

    #[test]
    fn test_no_second_save_while_running() {
        let mut save = SavePipeline::new();
        assert!(save.begin());
        assert!(!save.begin());
        save.exported();
        assert!(!save.begin());
    }

    #[test]
    fn test_error_still_returns_to_idle() {
        let mut save = SavePipeline::new();
        save.begin();
        assert!(save.finish::<(), _>(Err("rasterize failed")).is_err());
        assert_eq!(save.state(), SaveState::Idle);

        save.begin();
        save.exported();
        assert!(save.finish::<(), _>(Err("upload failed")).is_err());
        assert_eq!(save.state(), SaveState::Idle);
    }

    #[test]
    fn test_export_out_of_order_is_ignored() {
        let mut save = SavePipeline::new();
        assert!(!save.exported());
        assert_eq!(save.state(), SaveState::Idle);
    }
}
