/*!
 * Isolated render workers.
 *
 * A render job runs the whole pipeline (load, converge, cut and join) in a child
 * process (`vidsum render ...`). The parent only observes the exit status, so a
 * crash inside the child can never leave the caller with a partial result.
 * A semaphore bounds how many children run at once.
 */

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info, warn};
use tokio::process::Command;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::errors::WorkerError;

// @struct: Everything a child process needs to render one summary
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    pub video: PathBuf,
    pub subtitles: PathBuf,
    pub output: PathBuf,
    pub target_duration: f64,
    pub language: String,
    /// Config file the child should load, if not its default
    pub config_path: Option<PathBuf>,
}

impl RenderJob {
    // @returns: Command line for the hidden `render` subcommand
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "render".to_string(),
            self.video.to_string_lossy().into_owned(),
            "--subtitles".to_string(),
            self.subtitles.to_string_lossy().into_owned(),
            "--output".to_string(),
            self.output.to_string_lossy().into_owned(),
            "--duration".to_string(),
            self.target_duration.to_string(),
            "--language".to_string(),
            self.language.clone(),
        ];

        if let Some(config_path) = &self.config_path {
            args.push("--config-path".to_string());
            args.push(config_path.to_string_lossy().into_owned());
        }

        args
    }
}

/// How a render job ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The child exited successfully and wrote `output`
    Completed { output: PathBuf },
    /// The child exited unsuccessfully; `None` when killed by a signal
    Failed { exit_code: Option<i32> },
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Completed { .. })
    }
}

/// Completion signal for a submitted job
pub struct JobHandle {
    id: usize,
    job: RenderJob,
    task: JoinHandle<Result<JobOutcome, WorkerError>>,
}

impl JobHandle {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn job(&self) -> &RenderJob {
        &self.job
    }

    /// Wait for the child process to exit
    pub async fn wait(self) -> Result<JobOutcome, WorkerError> {
        self.task
            .await
            .map_err(|e| WorkerError::Join(e.to_string()))?
    }
}

/// Runs render jobs as child processes, at most `max_workers` at a time
pub struct WorkerPool {
    program: PathBuf,
    base_args: Vec<String>,
    semaphore: Arc<Semaphore>,
    next_id: AtomicUsize,
}

impl WorkerPool {
    /// Pool that re-executes the current binary
    pub fn new(max_workers: usize) -> Result<Self, WorkerError> {
        let program = std::env::current_exe().map_err(WorkerError::Spawn)?;
        Ok(Self::with_program(program, Vec::new(), max_workers))
    }

    /// Pool running `program base_args... job_args...` for every job
    pub fn with_program<P: Into<PathBuf>>(program: P, base_args: Vec<String>, max_workers: usize) -> Self {
        WorkerPool {
            program: program.into(),
            base_args,
            semaphore: Arc::new(Semaphore::new(max_workers.max(1))),
            next_id: AtomicUsize::new(1),
        }
    }

    /// Queue a job; it starts once a worker slot is free
    pub fn submit(&self, job: RenderJob) -> JobHandle {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let semaphore = self.semaphore.clone();
        let mut command = Command::new(&self.program);
        command
            .args(&self.base_args)
            .args(job.to_args())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = job.output.clone();
        let task = tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| WorkerError::Join(e.to_string()))?;

            debug!("Starting render worker {} for {:?}", id, output);
            let status = command.status().await.map_err(WorkerError::Spawn)?;

            if status.success() {
                info!("Render worker {} finished: {:?}", id, output);
                Ok(JobOutcome::Completed { output })
            } else {
                warn!("Render worker {} failed with {}", id, status);
                Ok(JobOutcome::Failed {
                    exit_code: status.code(),
                })
            }
        });

        JobHandle { id, job, task }
    }

    /// Submit every job and wait for all of them, in submission order
    pub async fn run_all(&self, jobs: Vec<RenderJob>) -> Vec<(RenderJob, Result<JobOutcome, WorkerError>)> {
        let handles: Vec<JobHandle> = jobs.into_iter().map(|job| self.submit(job)).collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            let job = handle.job().clone();
            results.push((job, handle.wait().await));
        }
        results
    }

    pub fn available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }
}
