//! Headless dashboard: the intake form's submit path, the displayed report
//! and the in-memory history of generated reports.
//!
//! Only one generation may be outstanding at a time. The `Submitting` phase
//! is the guard, and the lock is never held while the model call runs.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use psychlab_bedrock::client::ReportModel;
use psychlab_bedrock::error::ReportError;
use psychlab_bedrock::generate::{GenerationSettings, generate_report};
use psychlab_core::models::assessment_tool::AssessmentTool;
use psychlab_core::models::patient::PatientProfile;
use psychlab_core::models::report::LabReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Submitting,
    ShowingReport,
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("a report is already being generated")]
    GenerationInProgress,

    #[error("report not found: {0}")]
    ReportNotFound(Uuid),

    #[error("the dashboard was cleared before the report completed")]
    Abandoned,

    #[error(transparent)]
    Generation(#[from] ReportError),
}

/// Reject a profile without a name or age. Values are checked, not altered.
pub fn validate_profile(patient: &PatientProfile) -> Result<(), DashboardError> {
    if patient.name.trim().is_empty() {
        return Err(DashboardError::MissingField("name"));
    }
    if patient.age.trim().is_empty() {
        return Err(DashboardError::MissingField("age"));
    }
    Ok(())
}

struct Inner {
    phase: Phase,
    current: Option<LabReport>,
    /// Most recent first.
    history: Vec<LabReport>,
    /// Bumped by `clear`; a completion from an older epoch is discarded.
    epoch: u64,
}

impl Inner {
    fn settled_phase(&self) -> Phase {
        if self.current.is_some() {
            Phase::ShowingReport
        } else {
            Phase::Idle
        }
    }
}

pub struct Dashboard {
    inner: Mutex<Inner>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                phase: Phase::Idle,
                current: None,
                history: Vec::new(),
                epoch: 0,
            }),
        }
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    pub fn current(&self) -> Option<LabReport> {
        self.lock().current.clone()
    }

    pub fn history(&self) -> Vec<LabReport> {
        self.lock().history.clone()
    }

    pub fn find(&self, id: Uuid) -> Option<LabReport> {
        self.lock().history.iter().find(|r| r.id == id).cloned()
    }

    /// Validate, call the pipeline once, and record the result.
    ///
    /// The patient is moved in, so the stored report is a snapshot of
    /// exactly what was submitted.
    pub async fn generate(
        &self,
        model: &dyn ReportModel,
        settings: &GenerationSettings,
        patient: PatientProfile,
        tool: AssessmentTool,
    ) -> Result<LabReport, DashboardError> {
        validate_profile(&patient)?;

        let pending = self.begin()?;
        let result = generate_report(model, settings, &patient, tool).await?;
        let report = LabReport::new(patient, tool, result);
        pending.complete(&report)?;

        info!(report_id = %report.id, tool = %tool, "report added to history");
        Ok(report)
    }

    fn begin(&self) -> Result<Pending<'_>, DashboardError> {
        let mut inner = self.lock();
        if inner.phase == Phase::Submitting {
            return Err(DashboardError::GenerationInProgress);
        }
        inner.phase = Phase::Submitting;
        Ok(Pending {
            dashboard: self,
            epoch: inner.epoch,
            done: false,
        })
    }

    /// Reinstate a history entry as the displayed report. History is unchanged.
    pub fn select(&self, id: Uuid) -> Result<LabReport, DashboardError> {
        let mut inner = self.lock();
        let report = inner
            .history
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(DashboardError::ReportNotFound(id))?;
        inner.current = Some(report.clone());
        if inner.phase != Phase::Submitting {
            inner.phase = Phase::ShowingReport;
        }
        Ok(report)
    }

    /// Clear the displayed report. History is kept.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.current = None;
        if inner.phase != Phase::Submitting {
            inner.phase = Phase::Idle;
        }
    }

    /// Drop everything, including history. An outstanding generation will
    /// have its result discarded.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.current = None;
        inner.history.clear();
        inner.phase = Phase::Idle;
        inner.epoch += 1;
    }
}

/// Marks the single outstanding generation. Dropping it without completing
/// (failure, or the caller abandoning the future) releases the dashboard.
struct Pending<'a> {
    dashboard: &'a Dashboard,
    epoch: u64,
    done: bool,
}

impl Pending<'_> {
    fn complete(mut self, report: &LabReport) -> Result<(), DashboardError> {
        self.done = true;
        let mut inner = self.dashboard.lock();
        if inner.epoch != self.epoch {
            warn!(report_id = %report.id, "discarding report for a cleared dashboard");
            return Err(DashboardError::Abandoned);
        }
        inner.history.insert(0, report.clone());
        inner.current = Some(report.clone());
        inner.phase = Phase::ShowingReport;
        Ok(())
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        let mut inner = self.dashboard.lock();
        if inner.epoch == self.epoch {
            inner.phase = inner.settled_phase();
        }
    }
}
