use std::time::Instant;

use nebula_eventbus::{Broker, Event};
use nebula_execution::{ExecutionLog, NodeExecutionStatus, RunStatus};
use nebula_graph::{Graph, NodeOutcome};
use nebula_ports::ExecutionLogRepo;
use nebula_state::WorkflowState;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::options::EngineOptions;
use crate::outcome::ExecutionOutcome;

/// Executes a validated graph against an initial state.
///
/// Assumes `graph` already passed [`nebula_graph::GraphDef::validate`] and
/// was built through [`Graph::build`] — node and edge lookups here never
/// need to handle "unknown name" since the graph guarantees it.
///
/// Each iteration: checks the three loop-head bounds (max iterations,
/// cancellation, timeout), executes the current node, appends its
/// `ExecutionLog` row, publishes the corresponding broker event, then
/// resolves the next node. The log row is always written before the event
/// is published, in the same await point, so a subscriber observing
/// `NodeCompleted` is guaranteed a subsequent repository read sees the row.
#[tracing::instrument(skip(graph, state, cancellation, log_repo, broker), fields(run_id = %state.run_id))]
pub async fn execute(
    graph: &Graph,
    mut state: WorkflowState,
    options: &EngineOptions,
    cancellation: &CancellationToken,
    log_repo: &dyn ExecutionLogRepo,
    broker: &Broker,
) -> Result<ExecutionOutcome, EngineError> {
    let run_id = state.run_id;
    let mut current = Some(graph.entry_point.clone());
    let mut iterations: u64 = 0;
    let started = Instant::now();

    while let Some(node_name) = current {
        if iterations >= options.max_iterations {
            warn!(iterations, max = options.max_iterations, "max iterations exceeded");
            return Ok(terminal(
                state,
                RunStatus::Failed,
                iterations,
                started,
                Some(format!("max iterations ({}) exceeded", options.max_iterations)),
            ));
        }

        if cancellation.is_cancelled() {
            debug!(iterations, "cancellation observed at loop head");
            return Ok(terminal(state, RunStatus::Cancelled, iterations, started, Some("cancelled".into())));
        }

        if let Some(timeout) = options.timeout {
            if started.elapsed() > timeout {
                warn!(iterations, "run exceeded its wall-clock timeout");
                return Ok(terminal(state, RunStatus::Failed, iterations, started, Some("timeout".into())));
            }
        }

        // `graph.nodes` is guaranteed to contain every name the edge
        // resolver can produce, since `GraphDef::validate` rejects edges
        // referencing unknown nodes before `Graph::build` ever runs.
        let node = graph
            .nodes
            .get(&node_name)
            .expect("edge resolver only names nodes present in the validated graph");

        log_repo
            .append(ExecutionLog::started(run_id, node_name.clone(), iterations))
            .await?;
        broker.publish(
            run_id,
            Event::StatusUpdate {
                run_id,
                status: RunStatus::Running,
                current_node: Some(node_name.clone()),
            },
        );
        debug!(node = %node_name, iterations, "node started");

        match node.execute(state).await {
            NodeOutcome::Completed { state: next_state, duration_ms } => {
                state = next_state.with_iteration(iterations);
                log_repo
                    .append(ExecutionLog::completed(run_id, node_name.clone(), iterations, duration_ms))
                    .await?;
                broker.publish(
                    run_id,
                    Event::NodeCompleted {
                        run_id,
                        node_name: node_name.clone(),
                        duration_ms,
                        iteration: iterations,
                        node_status: NodeExecutionStatus::Completed,
                    },
                );
                info!(node = %node_name, iterations, duration_ms, "node completed");
            }
            NodeOutcome::Failed { state: failed_state, message, duration_ms } => {
                log_repo
                    .append(ExecutionLog::failed(
                        run_id,
                        node_name.clone(),
                        iterations,
                        duration_ms,
                        message.clone(),
                    ))
                    .await?;
                broker.publish(
                    run_id,
                    Event::NodeCompleted {
                        run_id,
                        node_name: node_name.clone(),
                        duration_ms,
                        iteration: iterations,
                        node_status: NodeExecutionStatus::Failed,
                    },
                );
                warn!(node = %node_name, iterations, %message, "node failed");
                return Ok(terminal(
                    failed_state,
                    RunStatus::Failed,
                    iterations + 1,
                    started,
                    Some(format!("node `{node_name}` failed: {message}")),
                ));
            }
        }

        match graph.edges.next(&node_name, &state).await {
            Ok(next) => current = next,
            Err(err) => {
                warn!(%err, "edge condition failed, aborting run");
                return Ok(terminal(state, RunStatus::Failed, iterations + 1, started, Some(err.to_string())));
            }
        }
        iterations += 1;
    }

    info!(iterations, "run reached a terminal node");
    Ok(terminal(state, RunStatus::Completed, iterations, started, None))
}

fn terminal(
    state: WorkflowState,
    status: RunStatus,
    total_iterations: u64,
    started: Instant,
    error_message: Option<String>,
) -> ExecutionOutcome {
    let total_duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    ExecutionOutcome {
        state,
        status,
        total_iterations,
        total_duration_ms,
        error_message,
    }
}
