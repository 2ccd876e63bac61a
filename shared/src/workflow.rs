//! Client-side upload workflow state machine.
//!
//! The machine owns the selected candidate and the last outcome; it performs
//! no I/O itself. The frontend drives it: `select` on file choice,
//! `begin_submit` before the network call, then `complete`/`fail` with the
//! outcome. Responses that arrive after the machine has left `Submitting`
//! (teardown, clear) are ignored.

use thiserror::Error;

use crate::types::PredictionResponse;

/// Default upload ceiling, matching the backend's request size limit.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Metadata the validation rules need from a pending file. The frontend's
/// candidate wraps a browser `File`; tests use a plain stub.
pub trait CandidateInfo {
    fn media_type(&self) -> &str;
    fn byte_size(&self) -> u64;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Selected,
    Submitting,
    Succeeded,
    Failed,
}

/// Why a file selection was rejected. The machine stays in its current
/// phase; the caller surfaces the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("Please select an image file")]
    NotAnImage,
    #[error("File size must be less than {} MB", max / (1024 * 1024))]
    TooLarge { size: u64, max: u64 },
    #[error("An upload is already in progress")]
    UploadInFlight,
}

pub struct UploadWorkflow<C> {
    phase: UploadPhase,
    candidate: Option<C>,
    result: Option<PredictionResponse>,
    error: Option<String>,
    max_bytes: u64,
}

impl<C: CandidateInfo> UploadWorkflow<C> {
    pub fn new(max_bytes: u64) -> Self {
        Self {
            phase: UploadPhase::Idle,
            candidate: None,
            result: None,
            error: None,
            max_bytes,
        }
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn candidate(&self) -> Option<&C> {
        self.candidate.as_ref()
    }

    pub fn result(&self) -> Option<&PredictionResponse> {
        self.result.as_ref()
    }

    /// Message from the last failed submission, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Accept a new candidate, replacing any previous selection. Rejected
    /// candidates leave the machine (and any prior candidate) untouched.
    pub fn select(&mut self, candidate: C) -> Result<(), SelectError> {
        if self.phase == UploadPhase::Submitting {
            return Err(SelectError::UploadInFlight);
        }
        if !candidate.media_type().starts_with("image/") {
            return Err(SelectError::NotAnImage);
        }
        let size = candidate.byte_size();
        if size > self.max_bytes {
            return Err(SelectError::TooLarge {
                size,
                max: self.max_bytes,
            });
        }

        self.candidate = Some(candidate);
        self.result = None;
        self.error = None;
        self.phase = UploadPhase::Selected;
        Ok(())
    }

    /// Drop the candidate and any outcome, returning to `Idle`. No-op while
    /// a submission is in flight.
    pub fn clear(&mut self) {
        if self.phase == UploadPhase::Submitting {
            return;
        }
        self.candidate = None;
        self.result = None;
        self.error = None;
        self.phase = UploadPhase::Idle;
    }

    /// Move to `Submitting` and hand the caller the candidate to upload.
    /// Valid from `Selected`, or from `Failed` to retry the preserved
    /// candidate. Returns `None` (and changes nothing) otherwise — in
    /// particular a second call while already `Submitting` is a no-op, so a
    /// double-click never issues two requests.
    pub fn begin_submit(&mut self) -> Option<&C> {
        match self.phase {
            UploadPhase::Selected | UploadPhase::Failed if self.candidate.is_some() => {
                self.phase = UploadPhase::Submitting;
                self.error = None;
                self.candidate.as_ref()
            }
            _ => None,
        }
    }

    /// Record a successful upload: the candidate is consumed and the result
    /// stored. Ignored unless a submission is in flight.
    pub fn complete(&mut self, result: PredictionResponse) {
        if self.phase != UploadPhase::Submitting {
            return;
        }
        self.candidate = None;
        self.result = Some(result);
        self.error = None;
        self.phase = UploadPhase::Succeeded;
    }

    /// Record a failed upload. The candidate is preserved so the user can
    /// retry without re-selecting. Ignored unless a submission is in flight.
    pub fn fail(&mut self, message: String) {
        if self.phase != UploadPhase::Submitting {
            return;
        }
        self.error = Some(if message.is_empty() {
            "Upload failed. Please try again.".to_string()
        } else {
            message
        });
        self.phase = UploadPhase::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub {
        media_type: &'static str,
        byte_size: u64,
    }

    impl CandidateInfo for Stub {
        fn media_type(&self) -> &str {
            self.media_type
        }
        fn byte_size(&self) -> u64 {
            self.byte_size
        }
    }

    fn jpeg(bytes: u64) -> Stub {
        Stub {
            media_type: "image/jpeg",
            byte_size: bytes,
        }
    }

    fn workflow() -> UploadWorkflow<Stub> {
        UploadWorkflow::new(DEFAULT_MAX_UPLOAD_BYTES)
    }

    fn result() -> PredictionResponse {
        serde_json::from_str(r#"{"message": "ok", "predictions": []}"#).unwrap()
    }

    #[test]
    fn select_rejects_non_image_and_keeps_state() {
        let mut wf = workflow();
        let err = wf
            .select(Stub {
                media_type: "application/pdf",
                byte_size: 100,
            })
            .unwrap_err();
        assert_eq!(err, SelectError::NotAnImage);
        assert_eq!(wf.phase(), UploadPhase::Idle);
        assert!(wf.candidate().is_none());

        // A rejected file must not displace an accepted one.
        wf.select(jpeg(2 * 1024 * 1024)).unwrap();
        let err = wf
            .select(Stub {
                media_type: "text/plain",
                byte_size: 10,
            })
            .unwrap_err();
        assert_eq!(err, SelectError::NotAnImage);
        assert_eq!(wf.phase(), UploadPhase::Selected);
        assert_eq!(wf.candidate().unwrap().byte_size, 2 * 1024 * 1024);
    }

    #[test]
    fn select_rejects_oversize_with_size_specific_message() {
        let mut wf = workflow();
        let err = wf.select(jpeg(DEFAULT_MAX_UPLOAD_BYTES + 1)).unwrap_err();
        assert!(matches!(err, SelectError::TooLarge { .. }));
        assert_eq!(err.to_string(), "File size must be less than 16 MB");
        assert_eq!(wf.phase(), UploadPhase::Idle);

        // Exactly at the ceiling is fine.
        wf.select(jpeg(DEFAULT_MAX_UPLOAD_BYTES)).unwrap();
        assert_eq!(wf.phase(), UploadPhase::Selected);
    }

    #[test]
    fn submit_is_guarded_against_reentrancy() {
        let mut wf = workflow();
        wf.select(jpeg(1024)).unwrap();
        assert!(wf.begin_submit().is_some());
        assert_eq!(wf.phase(), UploadPhase::Submitting);

        // Second submit while in flight is a no-op.
        assert!(wf.begin_submit().is_none());
        assert_eq!(wf.phase(), UploadPhase::Submitting);

        // So is selecting or clearing mid-flight.
        assert_eq!(wf.select(jpeg(1)).unwrap_err(), SelectError::UploadInFlight);
        wf.clear();
        assert_eq!(wf.phase(), UploadPhase::Submitting);
        assert!(wf.candidate().is_some());
    }

    #[test]
    fn submit_requires_a_selection() {
        let mut wf = workflow();
        assert!(wf.begin_submit().is_none());
        assert_eq!(wf.phase(), UploadPhase::Idle);
    }

    #[test]
    fn success_consumes_candidate_and_stores_result() {
        let mut wf = workflow();
        wf.select(jpeg(1024)).unwrap();
        wf.begin_submit().unwrap();
        wf.complete(result());

        assert_eq!(wf.phase(), UploadPhase::Succeeded);
        assert!(wf.candidate().is_none());
        assert!(wf.result().is_some());
        assert!(wf.error().is_none());
    }

    #[test]
    fn failure_preserves_candidate_and_surfaces_message() {
        let mut wf = workflow();
        wf.select(jpeg(1024)).unwrap();
        wf.begin_submit().unwrap();
        wf.fail("Server error: 503".to_string());

        assert_eq!(wf.phase(), UploadPhase::Failed);
        assert!(wf.candidate().is_some());
        assert_eq!(wf.error(), Some("Server error: 503"));

        // Retry re-submits the preserved candidate.
        assert!(wf.begin_submit().is_some());
        assert_eq!(wf.phase(), UploadPhase::Submitting);
        wf.complete(result());
        assert_eq!(wf.phase(), UploadPhase::Succeeded);
    }

    #[test]
    fn failure_message_is_never_empty() {
        let mut wf = workflow();
        wf.select(jpeg(1024)).unwrap();
        wf.begin_submit().unwrap();
        wf.fail(String::new());
        assert!(!wf.error().unwrap().is_empty());
    }

    #[test]
    fn late_responses_are_ignored_outside_submitting() {
        let mut wf = workflow();
        wf.complete(result());
        assert_eq!(wf.phase(), UploadPhase::Idle);
        assert!(wf.result().is_none());

        wf.fail("late".to_string());
        assert_eq!(wf.phase(), UploadPhase::Idle);
        assert!(wf.error().is_none());
    }

    #[test]
    fn clear_returns_to_idle_from_terminal_states() {
        let mut wf = workflow();
        wf.select(jpeg(1024)).unwrap();
        wf.clear();
        assert_eq!(wf.phase(), UploadPhase::Idle);
        assert!(wf.candidate().is_none());

        wf.select(jpeg(1024)).unwrap();
        wf.begin_submit().unwrap();
        wf.fail("nope".to_string());
        wf.clear();
        assert_eq!(wf.phase(), UploadPhase::Idle);
        assert!(wf.error().is_none());

        wf.select(jpeg(1024)).unwrap();
        wf.begin_submit().unwrap();
        wf.complete(result());
        wf.clear();
        assert_eq!(wf.phase(), UploadPhase::Idle);
        assert!(wf.result().is_none());
    }

    #[test]
    fn new_selection_replaces_previous_result() {
        let mut wf = workflow();
        wf.select(jpeg(1024)).unwrap();
        wf.begin_submit().unwrap();
        wf.complete(result());

        wf.select(jpeg(2048)).unwrap();
        assert_eq!(wf.phase(), UploadPhase::Selected);
        assert!(wf.result().is_none());
        assert_eq!(wf.candidate().unwrap().byte_size, 2048);
    }
}
