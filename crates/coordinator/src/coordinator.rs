use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use nebula_core::id::{GraphId, RunId, WorkflowId};
use nebula_core::name::GraphName;
use nebula_engine::EngineOptions;
use nebula_eventbus::{Broker, Event, Subscriber, synthesize_terminal_event};
use nebula_execution::RunStatus;
use nebula_graph::Graph;
use nebula_ports::{ExecutionLogRepo, GraphRepo, RunDetail, RunRepo};
use nebula_registry::{PredicateRegistry, ToolRegistry};
use nebula_state::WorkflowState;
use serde_json::{Map, Value};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::CoordinatorConfig;
use crate::error::CoordinatorError;
use crate::options::RunOptions;

/// Mediates between external callers, the engine, the repository, and the
/// broker. Holds no process-wide singletons — every collaborator is an
/// explicit dependency supplied at construction, per `spec.md` §9's
/// "global registry/global app state → explicit context" design note.
pub struct RunCoordinator {
    graphs: Arc<dyn GraphRepo>,
    runs: Arc<dyn RunRepo>,
    logs: Arc<dyn ExecutionLogRepo>,
    broker: Arc<Broker>,
    tools: Arc<ToolRegistry>,
    predicates: Arc<PredicateRegistry>,
    config: CoordinatorConfig,
    semaphore: Arc<Semaphore>,
    cancellations: Arc<DashMap<RunId, CancellationToken>>,
}

impl RunCoordinator {
    #[must_use]
    pub fn new(
        graphs: Arc<dyn GraphRepo>,
        runs: Arc<dyn RunRepo>,
        logs: Arc<dyn ExecutionLogRepo>,
        broker: Arc<Broker>,
        tools: Arc<ToolRegistry>,
        predicates: Arc<PredicateRegistry>,
        config: CoordinatorConfig,
    ) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(config.max_concurrent_runs)),
            graphs,
            runs,
            logs,
            broker,
            tools,
            predicates,
            config,
            cancellations: Arc::new(DashMap::new()),
        }
    }

    /// Resolves `graph_name`, allocates a run, persists its `pending` row,
    /// and schedules execution as a background task. Returns the `run_id`
    /// synchronously, before execution begins — per `spec.md` §4.6 steps 1-4.
    pub async fn start_run(
        &self,
        graph_name: &GraphName,
        initial_data: Map<String, Value>,
        run_config: Map<String, Value>,
        options: RunOptions,
    ) -> Result<RunId, CoordinatorError> {
        let record = self
            .graphs
            .get_by_name(graph_name)
            .await?
            .ok_or_else(|| CoordinatorError::GraphNotFound(graph_name.clone()))?;

        // Resolving tool/predicate names happens before any Run row is
        // created: an unknown name fails the request outright, per
        // spec.md §4.6 step 2 and §7's `ToolNotFound` propagation.
        let graph = Graph::build(&record.definition, &self.tools, &self.predicates)?;

        let run = self
            .runs
            .create(record.id, Some(Value::Object(initial_data.clone())))
            .await?;
        let run_id = run.run_id;

        let cancellation = CancellationToken::new();
        self.cancellations.insert(run_id, cancellation.clone());

        let engine_options = EngineOptions {
            max_iterations: options.max_iterations.unwrap_or(self.config.default_max_iterations),
            timeout: options.timeout.or(self.config.default_run_timeout),
        };

        let task = RunTask {
            run_id,
            workflow_id: WorkflowId::v4(),
            graph_id: record.id,
            graph: Arc::new(graph),
            data: initial_data,
            config_data: run_config,
            options: engine_options,
            cancellation,
            runs: Arc::clone(&self.runs),
            logs: Arc::clone(&self.logs),
            broker: Arc::clone(&self.broker),
            semaphore: Arc::clone(&self.semaphore),
            cancellations: Arc::clone(&self.cancellations),
        };
        tokio::spawn(task.run());

        Ok(run_id)
    }

    /// Requests cancellation of an in-flight run. The engine observes this
    /// at its next loop-head check, not preemptively; a node already running
    /// completes normally. No-op target (already terminal or unknown) is
    /// reported as [`CoordinatorError::RunNotFound`].
    pub fn cancel(&self, run_id: RunId) -> Result<(), CoordinatorError> {
        match self.cancellations.get(&run_id) {
            Some(token) => {
                token.cancel();
                Ok(())
            }
            None => Err(CoordinatorError::RunNotFound(run_id.to_string())),
        }
    }

    /// Fetches the persisted `Run` row plus its ordered `ExecutionLog`
    /// entries — the shape a state-query endpoint would serve directly.
    pub async fn status(&self, run_id: RunId) -> Result<RunDetail, CoordinatorError> {
        self.runs
            .get_by_run_id(run_id)
            .await?
            .ok_or_else(|| CoordinatorError::RunNotFound(run_id.to_string()))
    }

    /// Subscribes to `run_id`'s event stream. If the run has already
    /// reached a terminal status, returns a single synthesized terminal
    /// event instead of a live subscription, per `spec.md` §4.7 and
    /// Scenario F.
    pub async fn subscribe(&self, run_id: RunId) -> Result<RunEventStream, CoordinatorError> {
        let detail = self
            .runs
            .get_by_run_id(run_id)
            .await?
            .ok_or_else(|| CoordinatorError::RunNotFound(run_id.to_string()))?;

        if let Some(event) = synthesize_terminal_event(&detail.run) {
            return Ok(RunEventStream::Replayed(Some(event)));
        }
        Ok(RunEventStream::Live(self.broker.subscribe(run_id)))
    }
}

/// A subscription returned by [`RunCoordinator::subscribe`]: either a live
/// broker stream, or a single already-closed synthesized event for a
/// late-joining subscriber of a run that finished before they connected.
pub enum RunEventStream {
    Live(Subscriber),
    Replayed(Option<Event>),
}

impl RunEventStream {
    /// Yields the next event, or `None` at end-of-stream. A `Replayed`
    /// stream yields its one event then `None` forever after.
    pub async fn recv(&mut self) -> Option<Event> {
        match self {
            Self::Live(subscriber) => subscriber.recv().await.map(|delivery| delivery.event),
            Self::Replayed(event) => event.take(),
        }
    }
}

/// Owns everything needed to drive one run to a terminal status in the
/// background, independent of the `RunCoordinator` that scheduled it.
struct RunTask {
    run_id: RunId,
    workflow_id: WorkflowId,
    graph_id: GraphId,
    graph: Arc<Graph>,
    data: Map<String, Value>,
    config_data: Map<String, Value>,
    options: EngineOptions,
    cancellation: CancellationToken,
    runs: Arc<dyn RunRepo>,
    logs: Arc<dyn ExecutionLogRepo>,
    broker: Arc<Broker>,
    semaphore: Arc<Semaphore>,
    cancellations: Arc<DashMap<RunId, CancellationToken>>,
}

impl RunTask {
    #[tracing::instrument(skip(self), fields(run_id = %self.run_id, graph_id = %self.graph_id))]
    async fn run(self) {
        // Bounds concurrently-*executing* runs; a run accepted past the
        // concurrency limit waits here in `pending` rather than being
        // rejected.
        let Ok(_permit) = self.semaphore.acquire().await else {
            warn!("coordinator semaphore closed; abandoning scheduled run");
            self.cancellations.remove(&self.run_id);
            return;
        };

        if let Err(err) = self
            .runs
            .update_status(self.run_id, RunStatus::Running, Some(Utc::now()), None)
            .await
        {
            warn!(%err, "failed to persist running transition");
            self.cancellations.remove(&self.run_id);
            return;
        }
        self.broker.publish(
            self.run_id,
            Event::StatusUpdate {
                run_id: self.run_id,
                status: RunStatus::Running,
                current_node: Some(self.graph.entry_point.clone()),
            },
        );

        let state = WorkflowState::new(self.workflow_id, self.run_id, self.data.clone())
            .with_config(self.config_data.clone());

        let outcome = nebula_engine::execute(
            &self.graph,
            state,
            &self.options,
            &self.cancellation,
            self.logs.as_ref(),
            &self.broker,
        )
        .await;

        match outcome {
            Ok(outcome) => {
                let final_state = serde_json::to_value(&outcome.state).unwrap_or(Value::Null);
                if let Err(err) = self
                    .runs
                    .update_status(self.run_id, outcome.status, None, Some(Utc::now()))
                    .await
                {
                    warn!(%err, "failed to persist terminal status");
                }
                if let Err(err) = self
                    .runs
                    .update_final_state(
                        self.run_id,
                        final_state.clone(),
                        outcome.total_iterations,
                        outcome.total_duration_ms,
                        outcome.error_message.clone(),
                    )
                    .await
                {
                    warn!(%err, "failed to persist final state");
                }
                info!(status = %outcome.status, iterations = outcome.total_iterations, "run reached terminal status");
                self.broker.publish(
                    self.run_id,
                    Event::WorkflowCompleted {
                        run_id: self.run_id,
                        status: outcome.status,
                        final_state: Some(final_state),
                        total_duration_ms: outcome.total_duration_ms,
                        total_iterations: outcome.total_iterations,
                        error_message: outcome.error_message,
                    },
                );
            }
            Err(err) => {
                // A repository write inside the engine loop failed and
                // persisted retry did not recover it; per spec.md §7 the
                // run is marked failed with an error message describing
                // the persistence failure rather than the node error.
                let message = format!("persistence failure: {err}");
                warn!(%message, "run aborted by engine-level error");
                let _ = self
                    .runs
                    .update_status(self.run_id, RunStatus::Failed, None, Some(Utc::now()))
                    .await;
                let _ = self
                    .runs
                    .update_final_state(self.run_id, Value::Null, 0, 0, Some(message.clone()))
                    .await;
                self.broker.publish(
                    self.run_id,
                    Event::WorkflowCompleted {
                        run_id: self.run_id,
                        status: RunStatus::Failed,
                        final_state: None,
                        total_duration_ms: 0,
                        total_iterations: 0,
                        error_message: Some(message),
                    },
                );
            }
        }

        self.broker.close(self.run_id);
        self.cancellations.remove(&self.run_id);
    }
}
