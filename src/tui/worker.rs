//! Background submission worker.
//!
//! The scoring exchange blocks until the service responds, so it runs on a
//! dedicated thread and reports back over a channel. The submit control is
//! disabled while a worker is pending, so at most one exchange is in flight.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::domain::{AssessmentRequest, RiskAssessment};
use crate::ports::RiskScorer;

/// Progress updates from the submission worker.
#[derive(Debug, Clone)]
pub enum SubmitProgress {
    /// Request handed to the transport
    Sending,
    /// Exchange succeeded with a scored assessment
    Complete(RiskAssessment),
    /// Exchange failed (transport, status, or malformed response)
    Failed(String),
}

/// Handle to a running submission worker.
pub struct SubmitWorkerHandle {
    /// Receiver for progress updates
    pub progress_rx: Receiver<SubmitProgress>,
    /// Thread handle (for joining)
    _handle: JoinHandle<()>,
}

impl SubmitWorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<SubmitProgress> {
        self.progress_rx.try_recv().ok()
    }
}

/// Worker that submits an assessment in the background.
pub struct SubmitWorker;

impl SubmitWorker {
    /// Spawn a background submission.
    ///
    /// Returns a handle to receive progress updates.
    pub fn spawn<S>(scorer: Arc<S>, request: AssessmentRequest) -> SubmitWorkerHandle
    where
        S: RiskScorer + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run_submission(scorer, request, tx);
        });

        SubmitWorkerHandle {
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn run_submission<S>(scorer: Arc<S>, request: AssessmentRequest, tx: Sender<SubmitProgress>)
    where
        S: RiskScorer + 'static,
    {
        let _ = tx.send(SubmitProgress::Sending);

        match scorer.assess(&request) {
            Ok(assessment) => {
                let _ = tx.send(SubmitProgress::Complete(assessment));
            }
            Err(e) => {
                tracing::warn!("Assessment submission failed: {}", e);
                let _ = tx.send(SubmitProgress::Failed(e.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FormData, FormPatch, Gender, PhysicalActivity, RiskLevel};
    use std::time::Duration;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct StubError(String);

    struct StubScorer {
        response: Result<RiskAssessment, String>,
    }

    impl RiskScorer for StubScorer {
        type Error = StubError;

        fn assess(&self, _request: &AssessmentRequest) -> Result<RiskAssessment, StubError> {
            self.response.clone().map_err(StubError)
        }
    }

    fn sample_request() -> AssessmentRequest {
        let mut form = FormData::default();
        form.apply(FormPatch::Age("45".to_string()));
        form.apply(FormPatch::Gender(Gender::Male));
        form.apply(FormPatch::SystolicBp("130".to_string()));
        form.apply(FormPatch::TotalCholesterol("200".to_string()));
        form.apply(FormPatch::HdlCholesterol("50".to_string()));
        form.apply(FormPatch::Bmi("24.5".to_string()));
        form.apply(FormPatch::PhysicalActivity(PhysicalActivity::Moderate));
        form.to_request().expect("valid form")
    }

    fn sample_assessment() -> RiskAssessment {
        RiskAssessment {
            risk_percentage: 8.2,
            risk_level: RiskLevel::Borderline,
            risk_category: "Borderline Risk".to_string(),
            recommendations: vec!["Maintain healthy diet".to_string()],
            assessment_id: None,
        }
    }

    #[test]
    fn test_worker_reports_completion() {
        let scorer = Arc::new(StubScorer {
            response: Ok(sample_assessment()),
        });
        let handle = SubmitWorker::spawn(scorer, sample_request());

        let first = handle
            .progress_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("progress");
        assert!(matches!(first, SubmitProgress::Sending));

        let second = handle
            .progress_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("progress");
        match second {
            SubmitProgress::Complete(assessment) => {
                assert_eq!(assessment.risk_level, RiskLevel::Borderline);
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn test_worker_reports_failure_once() {
        let scorer = Arc::new(StubScorer {
            response: Err("service unavailable".to_string()),
        });
        let handle = SubmitWorker::spawn(scorer, sample_request());

        let mut failures = 0;
        while let Ok(progress) = handle.progress_rx.recv_timeout(Duration::from_secs(1)) {
            if let SubmitProgress::Failed(message) = progress {
                assert_eq!(message, "service unavailable");
                failures += 1;
            }
        }
        assert_eq!(failures, 1);
    }
}
