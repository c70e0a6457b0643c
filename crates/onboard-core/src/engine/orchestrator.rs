//! Orquestador de ejecución de comandos.
//!
//! Despacha por host, sobre un pool acotado, los comandos que el transform
//! dejó en la bolsa de datos de cada host. No inspecciona la salida: cada
//! outcome se entrega a los processors en cuanto se completa.
//!
//! Semántica de fallos:
//! - host sin comandos resueltos → outcome fallido de `DISPATCH_TASK`, sin
//!   ejecutar nada; el resto de hosts sigue.
//! - error o timeout de un comando → outcome fallido de ese comando; el host
//!   continúa con el siguiente.
//! - fallo de infraestructura (inventario, plugin de conexión, worker
//!   caído) → la corrida entera devuelve error y se loguea una vez.
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use uuid::Uuid;

use super::builder::OrchestratorBuilder;
use super::config::OrchestratorConfig;
use crate::constants::DISPATCH_TASK;
use crate::errors::OnboardError;
use crate::execution::{CommandExecutor, ExecutionError};
use crate::inventory::{HostDescriptor, HostTransform, InventorySource};
use crate::logging::RunLogger;
use crate::model::{CompiledResult, JobKind, TaskOutcome};
use crate::processor::{ResultAggregator, ResultProcessor};

pub struct Orchestrator<S>
    where S: InventorySource
{
    pub(super) executor: Arc<dyn CommandExecutor>,
    pub(super) inventory: S,
    pub(super) transform: Arc<dyn HostTransform>,
    pub(super) processors: Vec<Arc<dyn ResultProcessor>>,
    pub(super) logger: Arc<dyn RunLogger>,
    pub(super) config: OrchestratorConfig,
}

impl<S> Orchestrator<S>
    where S: InventorySource
{
    /// Fuente de inventario y transform se inyectan aquí; no hay registro
    /// global de plugins.
    pub fn builder<T>(executor: Arc<dyn CommandExecutor>, inventory: S, transform: T) -> OrchestratorBuilder<S>
        where T: HostTransform + 'static
    {
        OrchestratorBuilder::new(executor, inventory, Arc::new(transform))
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Carga el inventario y ejecuta el job sobre todos sus hosts.
    pub async fn run(&self, job: JobKind) -> Result<CompiledResult, OnboardError> {
        let hosts = match self.inventory.load() {
            Ok(hosts) => hosts,
            Err(err) => {
                let err = match err {
                    OnboardError::InfrastructureFailure(_) => err,
                    other => OnboardError::InfrastructureFailure(other.to_string()),
                };
                self.logger.error(&format!("{job} run aborted: {err}"));
                return Err(err);
            }
        };
        self.run_hosts(hosts, job).await
    }

    /// Ejecuta el job sobre una lista explícita de hosts.
    pub async fn run_hosts(&self, mut hosts: Vec<HostDescriptor>, job: JobKind) -> Result<CompiledResult, OnboardError> {
        let run_id = Uuid::new_v4();
        for host in hosts.iter_mut() {
            self.transform.transform(host, job);
        }
        log::debug!("run {run_id}: dispatching {job} to {} hosts", hosts.len());

        let aggregator = Arc::new(ResultAggregator::new(self.logger.clone()));
        let mut processors: Vec<Arc<dyn ResultProcessor>> = Vec::with_capacity(self.processors.len() + 1);
        processors.push(aggregator.clone());
        processors.extend(self.processors.iter().cloned());
        let processors: Arc<[Arc<dyn ResultProcessor>]> = processors.into();

        let semaphore = Arc::new(Semaphore::new(self.config.worker_permits()));
        let mut workers: JoinSet<Result<(), OnboardError>> = JoinSet::new();
        for host in hosts {
            workers.spawn(run_host(host,
                                   self.executor.clone(),
                                   processors.clone(),
                                   semaphore.clone(),
                                   self.config));
        }

        while let Some(joined) = workers.join_next().await {
            let fatal = match joined {
                Ok(Ok(())) => continue,
                Ok(Err(err)) => err,
                Err(join_err) => OnboardError::InfrastructureFailure(format!("host worker crashed: {join_err}")),
            };
            workers.abort_all();
            self.logger.error(&format!("run {run_id} ({job}) aborted: {fatal}"));
            return Err(fatal);
        }

        Ok(aggregator.compile(run_id, job))
    }
}

/// Worker de un host: comandos en secuencia, outcomes entregados en orden.
async fn run_host(host: HostDescriptor,
                  executor: Arc<dyn CommandExecutor>,
                  processors: Arc<[Arc<dyn ResultProcessor>]>,
                  semaphore: Arc<Semaphore>,
                  config: OrchestratorConfig)
                  -> Result<(), OnboardError> {
    let _permit = semaphore.acquire_owned()
                           .await
                           .map_err(|e| OnboardError::Internal(format!("worker pool closed: {e}")))?;
    for p in processors.iter() {
        p.on_host_start(&host);
    }

    let Some(commands) = host.data().commands.clone() else {
        let reason = match host.platform() {
            None => format!("{} has no platform set", host.address()),
            Some(platform) => format!("{} has an unsupported platform set: {platform}", host.address()),
        };
        let outcome = TaskOutcome::failure(DISPATCH_TASK, None, OnboardError::UnsupportedPlatform(reason), Utc::now());
        for p in processors.iter() {
            p.on_task_complete(&host, DISPATCH_TASK, &outcome);
            p.on_host_complete(&host);
        }
        return Ok(());
    };

    let timeout_ms = config.command_timeout.as_millis() as u64;
    for command in commands.iter() {
        let started_at = Utc::now();
        let hint = Some(command.parser_hint);
        let timed_out = || OnboardError::CommandTimeout { command: command.command.clone(),
                                                          timeout_ms };
        let outcome = match tokio::time::timeout(config.command_timeout,
                                                 executor.execute(&host, command, config.command_timeout)).await
        {
            Ok(Ok(rows)) => TaskOutcome::success(&command.command, hint, rows, started_at),
            Ok(Err(ExecutionError::Timeout)) | Err(_) => TaskOutcome::failure(&command.command, hint, timed_out(), started_at),
            Ok(Err(ExecutionError::Command(msg))) => {
                TaskOutcome::failure(&command.command, hint, OnboardError::CommandFailed(msg), started_at)
            }
            Ok(Err(ExecutionError::Infrastructure(msg))) => {
                return Err(OnboardError::InfrastructureFailure(format!("{}: {msg}", host.address())));
            }
        };
        for p in processors.iter() {
            p.on_task_complete(&host, &command.command, &outcome);
        }
    }

    for p in processors.iter() {
        p.on_host_complete(&host);
    }
    Ok(())
}
