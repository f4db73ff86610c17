/*!
 * Tests for isolated render workers
 */

use std::path::PathBuf;
use vidsum::errors::WorkerError;
use vidsum::worker::{JobOutcome, RenderJob, WorkerPool};

fn job(name: &str) -> RenderJob {
    RenderJob {
        video: PathBuf::from(format!("/videos/{}.mp4", name)),
        subtitles: PathBuf::from(format!("/videos/{}.srt", name)),
        output: PathBuf::from(format!("/videos/{}_1.mp4", name)),
        target_duration: 45.5,
        language: "english".to_string(),
        config_path: None,
    }
}

/// Test the child command line
#[test]
fn test_to_args_withoutConfigPath_shouldBuildRenderCommand() {
    let args = job("talk").to_args();
    assert_eq!(args, vec![
        "render", "/videos/talk.mp4",
        "--subtitles", "/videos/talk.srt",
        "--output", "/videos/talk_1.mp4",
        "--duration", "45.5",
        "--language", "english",
    ]);
}

/// Test that the config path is forwarded
#[test]
fn test_to_args_withConfigPath_shouldAppendIt() {
    let mut job = job("talk");
    job.config_path = Some(PathBuf::from("/etc/vidsum.json"));
    let args = job.to_args();
    assert_eq!(&args[args.len() - 2..], &["--config-path", "/etc/vidsum.json"]);
}

/// Test a successful child
#[cfg(unix)]
#[tokio::test]
async fn test_submit_withSucceedingProgram_shouldComplete() {
    let pool = WorkerPool::with_program("true", Vec::new(), 1);
    let handle = pool.submit(job("ok"));
    assert_eq!(handle.id(), 1);

    let outcome = handle.wait().await.unwrap();
    assert_eq!(outcome, JobOutcome::Completed { output: PathBuf::from("/videos/ok_1.mp4") });
    assert!(outcome.is_success());
}

/// Test that the exit code is reported
#[cfg(unix)]
#[tokio::test]
async fn test_submit_withFailingProgram_shouldReportExitCode() {
    let pool = WorkerPool::with_program("sh", vec!["-c".to_string(), "exit 3".to_string()], 1);
    let outcome = pool.submit(job("bad")).wait().await.unwrap();
    assert_eq!(outcome, JobOutcome::Failed { exit_code: Some(3) });
    assert!(!outcome.is_success());
}

/// Test a program that cannot be started
#[tokio::test]
async fn test_submit_withMissingProgram_shouldReturnSpawnError() {
    let pool = WorkerPool::with_program("/nonexistent/vidsum-worker", Vec::new(), 1);
    let result = pool.submit(job("missing")).wait().await;
    assert!(matches!(result, Err(WorkerError::Spawn(_))));
}

/// Test running several jobs through a bounded pool
#[cfg(unix)]
#[tokio::test]
async fn test_run_all_withMixedJobs_shouldKeepSubmissionOrder() {
    // the script fails for the job whose video path contains "bad"
    let script = "case \"$2\" in *bad*) exit 1;; *) exit 0;; esac".to_string();
    let pool = WorkerPool::with_program("sh", vec!["-c".to_string(), script, "sh".to_string()], 2);
    assert_eq!(pool.available_slots(), 2);

    let results = pool.run_all(vec![job("a"), job("bad"), job("c")]).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].0.video, PathBuf::from("/videos/a.mp4"));
    assert!(results[0].1.as_ref().unwrap().is_success());
    assert_eq!(results[1].1.as_ref().unwrap(), &JobOutcome::Failed { exit_code: Some(1) });
    assert!(results[2].1.as_ref().unwrap().is_success());
    assert_eq!(pool.available_slots(), 2);
}
