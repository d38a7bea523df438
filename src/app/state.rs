use std::path::PathBuf;

use crate::upload::UploadResult;
use crate::utils::file_size::FileSizeUtils;
use crate::utils::paths::last_segment;

/// Workflow stage the session is in. Drives which sections are visible
/// and which actions are reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Selected,
    Uploading,
    Success,
    Error,
}

impl Default for SessionPhase {
    fn default() -> Self {
        Self::Idle
    }
}

/// File chosen by the user. The bytes are only read at submit time.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub name: String,
    pub size_bytes: u64,
    pub path: PathBuf,
}

/// Everything that can change the session, funneled through [`SessionState::apply`].
#[derive(Debug)]
pub enum SessionEvent {
    FileAccepted(CandidateFile),
    UploadStarted,
    UploadSucceeded { generation: u64, result: UploadResult },
    UploadFailed { generation: u64, message: String },
    /// Client-side failures: validation, missing candidate, missing folder token.
    LocalError(String),
    ResetRequested,
}

/// Single source of truth for the upload workflow.
#[derive(Debug, Default)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub candidate: Option<CandidateFile>,
    pub result: Option<UploadResult>,
    pub folder_token: Option<String>,
    pub error_message: Option<String>,
    /// Bumped on every upload start and reset. Worker results carry the
    /// generation they were dispatched under and are dropped on mismatch.
    pub generation: u64,
}

impl SessionState {
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::FileAccepted(candidate) => {
                if self.phase == SessionPhase::Uploading {
                    return;
                }
                self.phase = SessionPhase::Selected;
                self.candidate = Some(candidate);
                self.error_message = None;
            }
            SessionEvent::UploadStarted => {
                if self.phase != SessionPhase::Selected || self.candidate.is_none() {
                    return;
                }
                self.generation += 1;
                self.phase = SessionPhase::Uploading;
                self.error_message = None;
            }
            SessionEvent::UploadSucceeded { generation, result } => {
                if self.phase != SessionPhase::Uploading || generation != self.generation {
                    return;
                }
                self.phase = SessionPhase::Success;
                self.folder_token = Some(last_segment(&result.output_dir).to_string());
                self.result = Some(result);
            }
            SessionEvent::UploadFailed { generation, message } => {
                if self.phase != SessionPhase::Uploading || generation != self.generation {
                    return;
                }
                self.phase = SessionPhase::Error;
                self.error_message = Some(message);
            }
            SessionEvent::LocalError(message) => {
                self.phase = SessionPhase::Error;
                self.error_message = Some(message);
            }
            SessionEvent::ResetRequested => {
                let generation = self.generation;
                *self = SessionState::default();
                self.generation = generation + 1;
            }
        }
    }

    pub fn shows_file_info(&self) -> bool {
        self.candidate.is_some()
    }

    pub fn shows_progress(&self) -> bool {
        self.phase == SessionPhase::Uploading
    }

    pub fn shows_results(&self) -> bool {
        self.result.is_some()
            && self.phase != SessionPhase::Uploading
            && self.phase != SessionPhase::Error
    }

    pub fn shows_error(&self) -> bool {
        self.phase == SessionPhase::Error
    }

    pub fn can_submit(&self) -> bool {
        self.phase == SessionPhase::Selected
    }

    pub fn file_label(&self) -> Option<String> {
        self.candidate
            .as_ref()
            .map(|c| format!("Arquivo: {}", c.name))
    }

    pub fn size_label(&self) -> Option<String> {
        self.candidate
            .as_ref()
            .map(|c| format!("Tamanho: {}", FileSizeUtils::format_mb(c.size_bytes)))
    }

    pub fn frame_count_label(&self) -> Option<String> {
        self.result
            .as_ref()
            .map(|r| format!("{} frames extraídos com sucesso", r.total_frames))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::FrameDescriptor;

    fn candidate(name: &str, size_bytes: u64) -> CandidateFile {
        CandidateFile {
            name: name.to_string(),
            size_bytes,
            path: PathBuf::from(name),
        }
    }

    fn sample_result(output_dir: &str) -> UploadResult {
        UploadResult {
            total_frames: 3,
            frames: (0..3)
                .map(|i| FrameDescriptor {
                    name: format!("frame_{}.png", i),
                    path: format!("session1/frame_{}.png", i),
                })
                .collect(),
            output_dir: output_dir.to_string(),
        }
    }

    fn uploading_state() -> SessionState {
        let mut state = SessionState::default();
        state.apply(SessionEvent::FileAccepted(candidate("cat.gif", 2_097_152)));
        state.apply(SessionEvent::UploadStarted);
        state
    }

    #[test]
    fn starts_idle_with_nothing_visible() {
        let state = SessionState::default();
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(!state.shows_file_info());
        assert!(!state.shows_progress());
        assert!(!state.shows_results());
        assert!(!state.shows_error());
        assert!(!state.can_submit());
    }

    #[test]
    fn accepting_a_file_selects_it_and_derives_display_fields() {
        let mut state = SessionState::default();
        state.apply(SessionEvent::FileAccepted(candidate("cat.gif", 2_097_152)));

        assert_eq!(state.phase, SessionPhase::Selected);
        assert!(state.shows_file_info());
        assert!(state.can_submit());
        assert_eq!(state.file_label(), Some("Arquivo: cat.gif".to_string()));
        assert_eq!(state.size_label(), Some("Tamanho: 2.00 MB".to_string()));
    }

    #[test]
    fn a_new_selection_replaces_the_previous_one() {
        let mut state = SessionState::default();
        state.apply(SessionEvent::FileAccepted(candidate("first.gif", 100)));
        state.apply(SessionEvent::FileAccepted(candidate("second.gif", 200)));

        assert_eq!(state.candidate.as_ref().unwrap().name, "second.gif");
    }

    #[test]
    fn selection_is_ignored_while_uploading() {
        let mut state = uploading_state();
        state.apply(SessionEvent::FileAccepted(candidate("late.gif", 1)));

        assert_eq!(state.phase, SessionPhase::Uploading);
        assert_eq!(state.candidate.as_ref().unwrap().name, "cat.gif");
    }

    #[test]
    fn selecting_again_after_an_error_clears_it() {
        let mut state = SessionState::default();
        state.apply(SessionEvent::LocalError("Por favor, selecione um arquivo GIF válido".into()));
        assert!(state.shows_error());

        state.apply(SessionEvent::FileAccepted(candidate("cat.gif", 1)));
        assert!(!state.shows_error());
        assert_eq!(state.error_message, None);
        assert_eq!(state.phase, SessionPhase::Selected);
    }

    #[test]
    fn upload_only_starts_from_selected() {
        let mut state = SessionState::default();
        state.apply(SessionEvent::UploadStarted);
        assert_eq!(state.phase, SessionPhase::Idle);
        assert_eq!(state.generation, 0);

        state.apply(SessionEvent::FileAccepted(candidate("cat.gif", 1)));
        state.apply(SessionEvent::UploadStarted);
        assert_eq!(state.phase, SessionPhase::Uploading);
        assert_eq!(state.generation, 1);
        assert!(state.shows_progress());
        assert!(!state.can_submit());
    }

    #[test]
    fn success_stores_result_and_extracts_folder_token() {
        let mut state = uploading_state();
        let generation = state.generation;
        state.apply(SessionEvent::UploadSucceeded {
            generation,
            result: sample_result("uploads/session1"),
        });

        assert_eq!(state.phase, SessionPhase::Success);
        assert!(state.shows_results());
        assert!(!state.shows_progress());
        assert_eq!(state.folder_token, Some("session1".to_string()));
        assert_eq!(state.result.as_ref().unwrap().frames.len(), 3);
        assert_eq!(
            state.frame_count_label(),
            Some("3 frames extraídos com sucesso".to_string())
        );
    }

    #[test]
    fn folder_token_handles_backslash_paths() {
        let mut state = uploading_state();
        let generation = state.generation;
        state.apply(SessionEvent::UploadSucceeded {
            generation,
            result: sample_result("out\\session42"),
        });

        assert_eq!(state.folder_token, Some("session42".to_string()));
    }

    #[test]
    fn failure_surfaces_the_server_message() {
        let mut state = uploading_state();
        let generation = state.generation;
        state.apply(SessionEvent::UploadFailed {
            generation,
            message: "decode failed".to_string(),
        });

        assert_eq!(state.phase, SessionPhase::Error);
        assert!(state.shows_error());
        assert!(state.error_message.as_ref().unwrap().contains("decode failed"));
        // candidate survives a failed attempt so the user can retry
        assert!(state.shows_file_info());
    }

    #[test]
    fn stale_generation_results_are_dropped() {
        let mut state = uploading_state();
        let stale = state.generation;
        state.apply(SessionEvent::ResetRequested);

        state.apply(SessionEvent::UploadSucceeded {
            generation: stale,
            result: sample_result("uploads/session1"),
        });
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(state.result.is_none());

        state.apply(SessionEvent::UploadFailed {
            generation: stale,
            message: "too late".to_string(),
        });
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn mismatched_generation_is_dropped_even_while_uploading() {
        let mut state = uploading_state();
        state.apply(SessionEvent::UploadSucceeded {
            generation: 0,
            result: sample_result("uploads/session1"),
        });

        assert_eq!(state.phase, SessionPhase::Uploading);
        assert!(state.result.is_none());
    }

    #[test]
    fn reset_returns_to_idle_from_any_phase() {
        let mut state = uploading_state();
        let generation = state.generation;
        state.apply(SessionEvent::UploadSucceeded {
            generation,
            result: sample_result("uploads/session1"),
        });

        state.apply(SessionEvent::ResetRequested);
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(state.candidate.is_none());
        assert!(state.result.is_none());
        assert!(state.folder_token.is_none());
        assert!(state.error_message.is_none());
        assert!(!state.shows_file_info());
        assert!(!state.shows_progress());
        assert!(!state.shows_results());
        assert!(!state.shows_error());
        assert_eq!(state.generation, generation + 1);
    }

    #[test]
    fn results_stay_visible_when_a_new_file_is_selected() {
        let mut state = uploading_state();
        let generation = state.generation;
        state.apply(SessionEvent::UploadSucceeded {
            generation,
            result: sample_result("uploads/session1"),
        });

        state.apply(SessionEvent::FileAccepted(candidate("next.gif", 1)));
        assert_eq!(state.phase, SessionPhase::Selected);
        assert!(state.shows_results());
        assert!(state.can_submit());
    }
}
