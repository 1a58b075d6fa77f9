//! Invocations of the external `xrandr` tool

use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

/// Error type for the xrandr module
#[derive(Error, Debug)]
pub enum XrandrError {
    #[error("Failed to run `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` failed with {status}")]
    Failed { program: String, status: ExitStatus },
    #[error("`{program}` printed invalid UTF-8")]
    Utf8 {
        program: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl XrandrError {
    /// The exit code to mirror when a command failed, `1` if there is none
    pub fn exit_code(&self) -> i32 {
        match self {
            XrandrError::Failed { status, .. } => status.code().unwrap_or(1),
            _ => 1,
        }
    }
}

type Result<T = ()> = std::result::Result<T, XrandrError>;

/// Runs a display tool that understands xrandr's report format and arguments
#[derive(Debug, Clone)]
pub struct Xrandr {
    program: String,
}

impl Default for Xrandr {
    fn default() -> Self {
        Self::new("xrandr")
    }
}

impl Xrandr {
    /// Creates a runner for the given executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The executable that is run
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Runs the tool without arguments and returns its report
    ///
    /// The tool's diagnostics go straight to our stderr.
    pub fn query(&self) -> Result<String> {
        log::debug!("Running `{}`", self.program);

        let output = Command::new(&self.program)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| XrandrError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(XrandrError::Failed {
                program: self.program.clone(),
                status: output.status,
            });
        }

        String::from_utf8(output.stdout).map_err(|source| XrandrError::Utf8 {
            program: self.program.clone(),
            source,
        })
    }

    /// Runs the tool with `args` and waits for it to exit
    ///
    /// A non-zero exit is not an error here; the caller decides what to do with the status.
    pub fn apply<S: AsRef<str>>(&self, args: &[S]) -> Result<ExitStatus> {
        log::debug!("Running `{}` with {} arguments", self.program, args.len());

        let status = Command::new(&self.program)
            .args(args.iter().map(AsRef::<str>::as_ref))
            .status()
            .map_err(|source| XrandrError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        log::debug!("`{}` exited with {}", self.program, status);
        Ok(status)
    }
}
