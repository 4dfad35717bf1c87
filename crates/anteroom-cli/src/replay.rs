//! Feeding trace records through a coordinator.

use std::io::Write;

use anteroom_client::{AdmissionConfig, Coordinator, CoordinatorError, DerivedView, SessionGateway};
use anteroom_proto::SessionRecord;
use serde::Serialize;

use crate::ReplayError;

/// One line of the replay report: the view after a record was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// 0-based record index.
    pub step: usize,
    /// Record kind, as in [`SessionRecord::kind`].
    pub record: &'static str,
    /// Waiting overlay visible.
    pub show_waiting_overlay: bool,
    /// Waiting overlay text.
    pub waiting_message: String,
    /// Moderator's pending list visible.
    pub show_new_user_overlay: bool,
    /// Ids of the participants in the pending list.
    pub pending: Vec<String>,
    /// Ids reported as new arrivals by this record.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arrived: Vec<String>,
    /// Recoverable failure of the record's gateway command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepReport {
    fn new(step: usize, record: &'static str, view: DerivedView) -> Self {
        Self {
            step,
            record,
            show_waiting_overlay: view.show_waiting_overlay,
            waiting_message: view.waiting_message,
            show_new_user_overlay: view.show_new_user_overlay,
            pending: view.pending_participants.into_iter().map(|p| p.id.to_string()).collect(),
            arrived: Vec::new(),
            error: None,
        }
    }
}

/// Totals for a finished replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Records applied.
    pub steps: usize,
    /// Records whose gateway command failed recoverably.
    pub failures: usize,
    /// Local participant admitted at the end of the trace.
    pub admitted: bool,
}

/// Drives a [`Coordinator`] from recorded session steps.
#[derive(Debug)]
pub struct Replayer<G: SessionGateway> {
    coordinator: Coordinator<G>,
    steps: usize,
    failures: usize,
}

impl<G: SessionGateway> Replayer<G> {
    /// Replayer over a fresh coordinator.
    pub fn new(gateway: G, config: AdmissionConfig) -> Self {
        Self { coordinator: Coordinator::new(gateway, config), steps: 0, failures: 0 }
    }

    /// The coordinator being driven.
    pub fn coordinator(&self) -> &Coordinator<G> {
        &self.coordinator
    }

    /// Apply one record and report the resulting view.
    ///
    /// Recoverable gateway failures are logged and noted in the report.
    /// Fatal ones abort the replay.
    pub fn apply(&mut self, record: SessionRecord) -> Result<StepReport, ReplayError> {
        let step = self.steps;
        let kind = record.kind();
        self.steps += 1;
        tracing::debug!(step, record = kind, "applying record");

        let outcome = match record {
            SessionRecord::Start => self.coordinator.start(),
            SessionRecord::Roster { participants } => {
                self.coordinator.on_roster_snapshot(participants);
                Ok(())
            },
            SessionRecord::Accepted { accepted } => {
                self.coordinator.on_accepted_changed(accepted);
                Ok(())
            },
            SessionRecord::Accept { id } => self.coordinator.accept(id),
            SessionRecord::Reject { id } => self.coordinator.reject(id),
            SessionRecord::Teardown => self.coordinator.teardown(),
        };

        let error = self.recover(step, outcome)?;

        let mut report = StepReport::new(step, kind, self.coordinator.derived_view());
        report.arrived =
            self.coordinator.take_arrivals().into_iter().map(|id| id.to_string()).collect();
        report.error = error;
        Ok(report)
    }

    /// Apply every record, writing one JSON report line per record to `out`.
    pub fn run<W: Write>(
        &mut self,
        records: impl IntoIterator<Item = SessionRecord>,
        out: &mut W,
    ) -> Result<ReplaySummary, ReplayError> {
        for record in records {
            let report = self.apply(record)?;
            serde_json::to_writer(&mut *out, &report).map_err(std::io::Error::from)?;
            writeln!(out)?;
        }
        out.flush()?;

        let summary = ReplaySummary {
            steps: self.steps,
            failures: self.failures,
            admitted: self.coordinator.state().is_local_admitted(),
        };
        tracing::info!(
            steps = summary.steps,
            failures = summary.failures,
            admitted = summary.admitted,
            "replay finished"
        );
        Ok(summary)
    }

    fn recover(
        &mut self,
        step: usize,
        outcome: Result<(), CoordinatorError>,
    ) -> Result<Option<String>, ReplayError> {
        match outcome {
            Ok(()) => Ok(None),
            Err(e) if e.is_fatal() => {
                tracing::error!(step, "fatal coordinator error: {}", e);
                Err(e.into())
            },
            Err(e) => {
                tracing::warn!(step, "record failed: {}", e);
                self.failures += 1;
                Ok(Some(e.to_string()))
            },
        }
    }
}
