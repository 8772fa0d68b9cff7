use async_trait::async_trait;
use bytes::Bytes;
use tokio::process::Command;
use tracing::{debug, info};

use super::{PdfError, PdfRenderer};

const INPUT_NAME: &str = "resume.html";
const OUTPUT_NAME: &str = "resume.pdf";

/// Runs `<program> [args..] <input.html> <output.pdf>` inside a scratch directory.
#[derive(Debug, Clone)]
pub struct CommandPdfRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandPdfRenderer {
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_args(program, Vec::<String>::new())
    }

    pub fn with_args<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits a command line such as `weasyprint --presentational-hints` on whitespace.
    pub fn from_command_line(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next()?;
        Some(Self::with_args(program, parts))
    }
}

#[async_trait]
impl PdfRenderer for CommandPdfRenderer {
    async fn render(&self, html: &str) -> Result<Bytes, PdfError> {
        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join(INPUT_NAME);
        let output = workdir.path().join(OUTPUT_NAME);
        tokio::fs::write(&input, html).await?;

        debug!(program = %self.program, "spawning PDF renderer");
        let result = Command::new(&self.program)
            .args(&self.args)
            .arg(&input)
            .arg(&output)
            .output()
            .await
            .map_err(|source| PdfError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !result.status.success() {
            return Err(PdfError::Command {
                program: self.program.clone(),
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        let pdf = tokio::fs::read(&output).await?;
        if pdf.is_empty() {
            return Err(PdfError::Empty);
        }

        info!("{} rendered {} bytes", self.program, pdf.len());
        Ok(Bytes::from(pdf))
    }

    fn name(&self) -> &'static str {
        "command"
    }
}
