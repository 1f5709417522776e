//! Locating and running the external tool.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{PluginError, Result};
use crate::invocation::InvocationSpec;

/// Output of one finished tool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl InvocationResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Spawns the tool and waits for it.
pub trait ToolRunner {
    fn run(&self, executable: &Path, spec: &InvocationSpec) -> Result<InvocationResult>;
}

/// Runs the tool as a child process of this one.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    /// When set, the child gets exactly these variables and nothing inherited.
    pub environment: Option<BTreeMap<String, String>>,
    pub cwd: Option<PathBuf>,
}

impl ToolRunner for SystemRunner {
    fn run(&self, executable: &Path, spec: &InvocationSpec) -> Result<InvocationResult> {
        let mut cmd = Command::new(executable);
        cmd.args(spec.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(env) = &self.environment {
            cmd.env_clear().envs(env);
        }
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        tracing::debug!(
            "running {} {}",
            executable.display(),
            spec.arguments().join(" ")
        );

        // Blocks until the child exits; both pipes are drained concurrently.
        let output = cmd.output().map_err(|source| PluginError::Spawn {
            executable: executable.to_path_buf(),
            source,
        })?;

        Ok(InvocationResult {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Print captured output: stdout to stdout, stderr to stderr, empty streams skipped.
pub fn relay_output(result: &InvocationResult) {
    if !result.stdout.is_empty() {
        print!("{}", with_newline(&result.stdout));
    }
    if !result.stderr.is_empty() {
        eprint!("{}", with_newline(&result.stderr));
    }
}

fn with_newline(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}

/// Find the tool executable.
///
/// An explicit path must exist. Otherwise `name` is looked up on `PATH`;
/// only files the current user can execute count.
pub fn locate_tool(name: &str, explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(PluginError::ToolNotFound {
                name: name.to_string(),
                searched: Some(path.to_path_buf()),
            })
        };
    }

    which::which(name).map_err(|e| {
        tracing::debug!("PATH lookup for {name} failed: {e}");
        PluginError::ToolNotFound {
            name: name.to_string(),
            searched: None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_locate_explicit_path() {
        let dir = TempDir::new().unwrap();
        let tool = dir.path().join("swift-format");
        fs::write(&tool, "").unwrap();

        assert_eq!(locate_tool("swift-format", Some(tool.as_path())).unwrap(), tool);
    }

    #[test]
    fn test_locate_explicit_path_missing() {
        let dir = TempDir::new().unwrap();
        let tool = dir.path().join("swift-format");

        let err = locate_tool("swift-format", Some(tool.as_path())).unwrap_err();
        assert!(matches!(
            err,
            PluginError::ToolNotFound { searched: Some(ref p), .. } if *p == tool
        ));
    }

    #[test]
    fn test_locate_unknown_tool_on_path() {
        let err = locate_tool("swift-format-that-does-not-exist-anywhere", None).unwrap_err();
        assert!(matches!(err, PluginError::ToolNotFound { searched: None, .. }));
    }

    #[test]
    fn test_invocation_result_success() {
        let ok = InvocationResult {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        };
        let failed = InvocationResult {
            exit_code: Some(2),
            ..ok.clone()
        };
        let killed = InvocationResult {
            exit_code: None,
            ..ok.clone()
        };

        assert!(ok.success());
        assert!(!failed.success());
        assert!(!killed.success());
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use crate::invocation::{InvocationOptions, Mode};
        use std::os::unix::fs::PermissionsExt;

        fn script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("fake-swift-format");
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn lint_spec(files: &[PathBuf]) -> InvocationSpec {
            InvocationSpec::build(Mode::Lint, files, None, &InvocationOptions::default())
                .unwrap()
        }

        #[test]
        fn test_system_runner_captures_streams_and_status() {
            let dir = TempDir::new().unwrap();
            let tool = script(dir.path(), "echo \"args: $*\"\necho oops >&2\nexit 2");

            let result = SystemRunner::default()
                .run(&tool, &lint_spec(&[PathBuf::from("/p/a.swift")]))
                .unwrap();

            assert_eq!(result.exit_code, Some(2));
            assert_eq!(result.stdout, "args: lint --parallel /p/a.swift\n");
            assert_eq!(result.stderr, "oops\n");
        }

        #[test]
        fn test_system_runner_environment_override() {
            let dir = TempDir::new().unwrap();
            let tool = script(dir.path(), "echo \"[${HOME:-unset}]\"");

            let runner = SystemRunner {
                environment: Some(BTreeMap::new()),
                cwd: None,
            };
            let result = runner
                .run(&tool, &lint_spec(&[PathBuf::from("a.swift")]))
                .unwrap();

            assert!(result.success());
            assert_eq!(result.stdout, "[unset]\n");
        }

        #[test]
        fn test_system_runner_working_directory() {
            let dir = TempDir::new().unwrap();
            let package = dir.path().join("Package");
            fs::create_dir(&package).unwrap();
            let tool = script(dir.path(), "pwd");

            let runner = SystemRunner {
                environment: None,
                cwd: Some(package.clone()),
            };
            let result = runner
                .run(&tool, &lint_spec(&[PathBuf::from("a.swift")]))
                .unwrap();

            let reported = PathBuf::from(result.stdout.trim_end());
            assert_eq!(
                reported.canonicalize().unwrap(),
                package.canonicalize().unwrap()
            );
        }

        #[test]
        fn test_system_runner_spawn_failure() {
            let dir = TempDir::new().unwrap();
            let missing = dir.path().join("missing-tool");

            let err = SystemRunner::default()
                .run(&missing, &lint_spec(&[PathBuf::from("a.swift")]))
                .unwrap_err();

            assert!(matches!(err, PluginError::Spawn { .. }));
        }
    }
}
