//! Lockstep simulation of the model world and a real coordinator.

use anteroom_client::{AdmissionConfig, Coordinator, DerivedView};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    model::{ModelWorld, Operation, Slot, Step},
    recording_gateway::RecordingGateway,
};

/// First point where the real coordinator disagreed with the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    /// Index of the offending operation.
    pub index: usize,
    /// The operation itself.
    pub operation: Operation,
    /// View the model expected.
    pub expected: DerivedView,
    /// View the coordinator produced.
    pub actual: DerivedView,
}

/// Model world and real coordinator driven in lockstep.
#[derive(Debug)]
pub struct Simulation {
    model: ModelWorld,
    coordinator: Coordinator<RecordingGateway>,
    steps: usize,
}

impl Simulation {
    /// New simulation with default admission config.
    pub fn new(num_slots: u8) -> Self {
        Self::with_config(num_slots, AdmissionConfig::default())
    }

    /// New simulation where both sides use `config`.
    pub fn with_config(num_slots: u8, config: AdmissionConfig) -> Self {
        Self {
            model: ModelWorld::with_config(num_slots, config.clone()),
            coordinator: Coordinator::new(RecordingGateway::new(), config),
            steps: 0,
        }
    }

    /// The reference model.
    pub fn model(&self) -> &ModelWorld {
        &self.model
    }

    /// The coordinator under test.
    pub fn coordinator(&self) -> &Coordinator<RecordingGateway> {
        &self.coordinator
    }

    /// Apply one operation to both sides and compare views.
    pub fn step(&mut self, operation: Operation) -> Result<(), Box<Divergence>> {
        let index = self.steps;
        self.steps += 1;

        match self.model.apply(&operation) {
            Step::Roster { previous, next } => self.coordinator.on_roster_changed(previous, next),
            Step::Accepted(accepted) => self.coordinator.on_accepted_changed(accepted),
            // Default config forwards every intent; the gateway never fails here.
            Step::Accept(id) => {
                let _ = self.coordinator.accept(id);
            },
            Step::Reject(id) => {
                let _ = self.coordinator.reject(id);
            },
            Step::Nothing => {},
        }

        let expected = self.model.expected_view();
        let actual = self.coordinator.derived_view();
        if expected == actual {
            Ok(())
        } else {
            Err(Box::new(Divergence { index, operation, expected, actual }))
        }
    }

    /// Apply every operation, stopping at the first divergence.
    pub fn run(&mut self, operations: &[Operation]) -> Result<(), Box<Divergence>> {
        operations.iter().try_for_each(|op| self.step(*op))
    }

    /// Whether the gateway saw exactly the calls the model expected.
    pub fn gateway_matches(&self) -> bool {
        self.coordinator.gateway().calls() == self.model.expected_calls()
    }
}

/// Seeded operation sequence over `num_slots` slots.
///
/// Deliveries are weighted up so snapshots actually reach the coordinator.
pub fn random_operations(seed: u64, len: usize, num_slots: u8) -> Vec<Operation> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let slots = num_slots.max(2);

    (0..len)
        .map(|_| {
            let slot: Slot = rng.gen_range(0..slots);
            match rng.gen_range(0..16u8) {
                0..=2 => Operation::Join { slot, moderator: rng.gen_bool(0.2) },
                3 => Operation::Leave { slot },
                4 => Operation::SetLocalRole { moderator: rng.gen_bool(0.5) },
                5 => Operation::AssignLocalId,
                6 | 7 => Operation::Grant { slot },
                8..=10 => Operation::DeliverRoster,
                11 | 12 => Operation::DeliverAccepted,
                13 | 14 => Operation::Accept { slot },
                _ => Operation::Reject { slot },
            }
        })
        .collect()
}
