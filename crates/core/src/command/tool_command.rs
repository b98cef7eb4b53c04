use crate::{
    error::{Error, Result},
    types::Tool,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

/// A fully assembled child-process command line
#[derive(Debug, Clone)]
pub struct ToolCommand {
    pub tool: Tool,
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

/// Captured output of a finished invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl InvocationResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

impl ToolCommand {
    pub fn new(tool: Tool, program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            tool,
            program: program.into(),
            args,
            working_dir: None,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Arguments handed to the tool itself, after its entry point
    pub fn tool_args(&self) -> &[String] {
        let entry = self.tool.entry_point();
        match self.args.iter().position(|a| a == entry) {
            Some(idx) => &self.args[idx + 1..],
            None => &self.args,
        }
    }

    pub fn to_shell_command(&self) -> String {
        let mut cmd = quote(&self.program.display().to_string());
        for arg in &self.args {
            cmd.push(' ');
            cmd.push_str(&quote(arg));
        }
        cmd
    }

    /// Run the command to completion, capturing stdout and stderr.
    ///
    /// Both pipes are drained on their own threads so a child filling one of
    /// them cannot block while the other is being read.
    pub fn execute(&self) -> Result<InvocationResult> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        tracing::debug!("Executing command line:");
        tracing::debug!("{}", self.to_shell_command());

        let mut child = cmd.spawn().map_err(|source| Error::LaunchError {
            tool: self.tool.to_string(),
            source,
        })?;

        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = child.wait()?;
        let stdout = join(stdout)?;
        let stderr = join(stderr)?;

        let exit_code = status.code().unwrap_or_else(|| {
            tracing::warn!("{} was terminated by a signal", self.tool);
            -1
        });
        tracing::debug!("Exit code: {}", exit_code);

        Ok(InvocationResult {
            stdout,
            stderr,
            exit_code,
        })
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<std::io::Result<String>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    })
}

fn join(handle: Option<thread::JoinHandle<std::io::Result<String>>>) -> Result<String> {
    match handle {
        Some(handle) => handle
            .join()
            .map_err(|_| Error::Other("Output reader thread panicked".to_string()))?
            .map_err(Error::from),
        None => Ok(String::new()),
    }
}

fn quote(arg: &str) -> String {
    const SPECIAL: [char; 18] = [
        ' ', '\t', '\n', '"', '\'', '\\', ';', '&', '|', '$', '*', '?', '<', '>', '(', ')', '`', '#',
    ];
    if arg.is_empty() || arg.contains(SPECIAL) {
        format!("'{}'", arg.replace('\'', r"'\''"))
    } else {
        arg.to_string()
    }
}

/// Locate the `java` launcher: explicit path, then `$JAVA_HOME/bin`, then `PATH`
pub fn resolve_java(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let launcher = if cfg!(windows) { "java.exe" } else { "java" };
    match std::env::var_os("JAVA_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home).join("bin").join(launcher),
        _ => PathBuf::from(launcher),
    }
}
