use super::domain::ValidationReport;

/// Client-observed lifecycle of one inquiry submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Transition guard for the submit lifecycle.
///
/// `Idle -> Submitting -> {Succeeded, Failed}`; the only exits from the
/// terminal states lead back to `Idle` (reset after success, retry after
/// failure). A submit is admitted only from `Idle` with a clean report, which
/// is what keeps a form instance to a single in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmissionFlow {
    state: SubmissionState,
}

impl Default for SubmissionState {
    fn default() -> Self {
        SubmissionState::Idle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("a submission is only allowed from the idle state")]
    NotIdle,
    #[error("the current field values still have validation errors")]
    ValidationPending,
    #[error("no submission is in flight")]
    NotSubmitting,
    #[error("the flow is not in a terminal state")]
    NotTerminal,
}

impl SubmissionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn can_submit(&self, report: &ValidationReport) -> bool {
        self.state == SubmissionState::Idle && report.is_valid()
    }

    /// Enter `Submitting`. Allowed only from `Idle` with an empty report.
    pub fn begin(&mut self, report: &ValidationReport) -> Result<(), FlowError> {
        if self.state != SubmissionState::Idle {
            return Err(FlowError::NotIdle);
        }
        if !report.is_valid() {
            return Err(FlowError::ValidationPending);
        }
        self.state = SubmissionState::Submitting;
        Ok(())
    }

    pub fn succeed(&mut self) -> Result<(), FlowError> {
        if self.state != SubmissionState::Submitting {
            return Err(FlowError::NotSubmitting);
        }
        self.state = SubmissionState::Succeeded;
        Ok(())
    }

    pub fn fail(&mut self) -> Result<(), FlowError> {
        if self.state != SubmissionState::Submitting {
            return Err(FlowError::NotSubmitting);
        }
        self.state = SubmissionState::Failed;
        Ok(())
    }

    /// Return to `Idle` from either terminal state.
    pub fn reset(&mut self) -> Result<(), FlowError> {
        match self.state {
            SubmissionState::Succeeded | SubmissionState::Failed => {
                self.state = SubmissionState::Idle;
                Ok(())
            }
            _ => Err(FlowError::NotTerminal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inquiry::domain::{InquiryField, IssueKind};

    fn clean_report() -> ValidationReport {
        ValidationReport::default()
    }

    fn dirty_report() -> ValidationReport {
        let mut report = ValidationReport::default();
        report.flag(
            InquiryField::Email,
            IssueKind::Required,
            "Email is required".to_string(),
        );
        report
    }

    #[test]
    fn happy_path_round_trip() {
        let mut flow = SubmissionFlow::new();
        assert_eq!(flow.state(), SubmissionState::Idle);
        flow.begin(&clean_report()).expect("idle admits submit");
        assert_eq!(flow.state(), SubmissionState::Submitting);
        flow.succeed().expect("in-flight can succeed");
        flow.reset().expect("success resets");
        assert_eq!(flow.state(), SubmissionState::Idle);
    }

    #[test]
    fn failure_allows_retry() {
        let mut flow = SubmissionFlow::new();
        flow.begin(&clean_report()).expect("first submit");
        flow.fail().expect("in-flight can fail");
        assert_eq!(flow.state(), SubmissionState::Failed);
        flow.reset().expect("failure resets");
        flow.begin(&clean_report()).expect("retry after reset");
    }

    #[test]
    fn validation_errors_block_submission() {
        let mut flow = SubmissionFlow::new();
        assert!(!flow.can_submit(&dirty_report()));
        assert_eq!(flow.begin(&dirty_report()), Err(FlowError::ValidationPending));
        assert_eq!(flow.state(), SubmissionState::Idle);
    }

    #[test]
    fn double_submit_is_rejected() {
        let mut flow = SubmissionFlow::new();
        flow.begin(&clean_report()).expect("first submit");
        assert_eq!(flow.begin(&clean_report()), Err(FlowError::NotIdle));
    }

    #[test]
    fn terminal_transitions_are_exclusive() {
        let mut flow = SubmissionFlow::new();
        assert_eq!(flow.succeed(), Err(FlowError::NotSubmitting));
        assert_eq!(flow.reset(), Err(FlowError::NotTerminal));
        flow.begin(&clean_report()).expect("submit");
        flow.succeed().expect("success");
        assert_eq!(flow.fail(), Err(FlowError::NotSubmitting));
    }
}
