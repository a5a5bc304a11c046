//! Scripted in-memory manager used by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use pkg_nsx::{ApiError, TraceflowApi};
use pkg_types::logical_port::LogicalPort;
use pkg_types::traceflow::{Observation, OperationState, TraceJob, TraceflowRequest};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Calls {
    pub list_logical_ports: u32,
    pub create_traceflow: u32,
    pub get_traceflow: u32,
    pub list_observations: u32,
}

pub struct ScriptedApi {
    pub ports: Vec<LogicalPort>,
    pub initial_state: OperationState,
    pub observations: Vec<Observation>,
    states: Mutex<VecDeque<OperationState>>,
    submitted: Mutex<Vec<TraceflowRequest>>,
    calls: Mutex<Calls>,
}

impl ScriptedApi {
    /// Status fetches answer `states` in order, then keep repeating the last.
    pub fn with_states(states: &[OperationState]) -> Self {
        Self {
            ports: vec![],
            initial_state: OperationState::InProgress,
            observations: vec![],
            states: Mutex::new(states.iter().cloned().collect()),
            submitted: Mutex::new(vec![]),
            calls: Mutex::new(Calls::default()),
        }
    }

    pub fn calls(&self) -> Calls {
        *self.calls.lock().unwrap()
    }

    pub fn submitted(&self) -> Vec<TraceflowRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl TraceflowApi for ScriptedApi {
    async fn list_logical_ports(&self) -> Result<Vec<LogicalPort>, ApiError> {
        self.calls.lock().unwrap().list_logical_ports += 1;
        Ok(self.ports.clone())
    }

    async fn create_traceflow(&self, request: &TraceflowRequest) -> Result<TraceJob, ApiError> {
        self.calls.lock().unwrap().create_traceflow += 1;
        self.submitted.lock().unwrap().push(request.clone());
        Ok(TraceJob {
            id: "tf-1".to_string(),
            operation_state: self.initial_state.clone(),
            observations: vec![],
        })
    }

    async fn get_traceflow(&self, id: &str) -> Result<TraceJob, ApiError> {
        self.calls.lock().unwrap().get_traceflow += 1;
        let mut states = self.states.lock().unwrap();
        let state = if states.len() > 1 {
            states.pop_front().unwrap_or_default()
        } else {
            states.front().cloned().unwrap_or(OperationState::Finished)
        };
        Ok(TraceJob {
            id: id.to_string(),
            operation_state: state,
            observations: vec![],
        })
    }

    async fn list_observations(&self, _id: &str) -> Result<Vec<Observation>, ApiError> {
        self.calls.lock().unwrap().list_observations += 1;
        Ok(self.observations.clone())
    }
}
