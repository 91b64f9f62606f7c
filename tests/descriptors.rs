//! Counts the pipes open in this process around pipeline runs. Kept in its
//! own test binary so no concurrent test can open pipes in between.

#![cfg(target_os = "linux")]

use std::fs;

use pish::cmd::{execute::Completion, execution_plan::ExecutionPlan};

fn open_pipes() -> usize {
    fs::read_dir("/proc/self/fd")
        .unwrap()
        .filter_map(Result::ok)
        .filter_map(|entry| fs::read_link(entry.path()).ok())
        .filter(|target| target.to_string_lossy().starts_with("pipe:"))
        .count()
}

async fn run(line: &str) -> Completion {
    line.parse::<ExecutionPlan>().unwrap().execute().await.unwrap()
}

#[tokio::test]
async fn no_pipe_outlives_its_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.txt");

    // let the runtime set up whatever it needs for child processes first
    run("true").await;
    let baseline = open_pipes();

    for stages in 1..=5 {
        let line = format!(
            "echo hello{} > {}",
            " | cat".repeat(stages - 1),
            output.display()
        );

        let Completion::Pipeline(report) = run(&line).await else {
            panic!("expected a pipeline for {line}");
        };

        assert_eq!(report.pipes, stages - 1, "{line}");
        assert_eq!(report.spawned, stages, "{line}");
        assert_eq!(fs::read_to_string(&output).unwrap(), "hello\n");
        assert_eq!(open_pipes(), baseline, "{line}");
    }

    // a stage that never starts must not strand its pipe ends either
    run("pish-definitely-not-a-command | cat | pish-definitely-not-a-command").await;
    assert_eq!(open_pipes(), baseline);

    // background pipelines hand every end to their children
    run("sleep 1 | cat &").await;
    assert_eq!(open_pipes(), baseline);
}
