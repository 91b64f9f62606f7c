//! `cd` mutates the process-wide working directory, so everything touching it
//! lives in this one test binary and runs in a single test.

use std::{env, fs, path::PathBuf};

use pish::{
    builtins::BuiltinError,
    cmd::{
        execute::{Completion, ExecError},
        execution_plan::ExecutionPlan,
    },
};

fn canonical_cwd() -> PathBuf {
    env::current_dir().unwrap().canonicalize().unwrap()
}

async fn run(line: &str) -> Result<Completion, ExecError> {
    line.parse::<ExecutionPlan>().unwrap().execute().await
}

#[tokio::test]
async fn cd_builtin() {
    let home = tempfile::tempdir().unwrap();
    let elsewhere = tempfile::tempdir().unwrap();
    fs::create_dir(elsewhere.path().join("nested")).unwrap();

    // no argument goes home, in-process
    env::set_var("HOME", home.path());
    let completion = run("cd").await.unwrap();
    assert!(matches!(completion, Completion::Builtin(status) if status.success()));
    assert_eq!(canonical_cwd(), home.path().canonicalize().unwrap());

    // absolute path
    let completion = run(&format!("cd {}", elsewhere.path().display()))
        .await
        .unwrap();
    assert!(matches!(completion, Completion::Builtin(_)));
    assert_eq!(canonical_cwd(), elsewhere.path().canonicalize().unwrap());

    // relative path resolves against the new cwd
    run("cd nested").await.unwrap();
    assert_eq!(
        canonical_cwd(),
        elsewhere.path().join("nested").canonicalize().unwrap()
    );

    // a bad path is reported and leaves the cwd alone
    let before = canonical_cwd();
    let err = run("cd /pish/does/not/exist").await.unwrap_err();
    assert!(matches!(
        err,
        ExecError::Builtin(BuiltinError::ChangeDir { .. })
    ));
    assert_eq!(canonical_cwd(), before);

    // cd next to a pipe never runs
    let err = run("cd .. | cat").await.unwrap_err();
    assert!(matches!(err, ExecError::BuiltinInPipeline { name: "cd" }));
    assert_eq!(canonical_cwd(), before);

    // no HOME to fall back on
    env::remove_var("HOME");
    let err = run("cd").await.unwrap_err();
    assert!(matches!(err, ExecError::Builtin(BuiltinError::NoHome)));
    assert_eq!(canonical_cwd(), before);

    // leave the temp dirs before they are removed
    env::set_current_dir(env::temp_dir()).unwrap();
}
