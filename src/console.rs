//! Console interaction: progress lines, prompts, and the end-of-run summary.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::models::RunReport;
use crate::observer::RunObserver;

const RULE: &str = "==================================================";

/// Prints one progress line per document and one note per image decision.
pub struct ConsoleObserver<W: Write> {
    out: W,
}

impl<W: Write> ConsoleObserver<W> {
    /// Write progress to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        let _ = writeln!(self.out, "{text}");
    }
}

impl<W: Write> RunObserver for ConsoleObserver<W> {
    fn document_started(&mut self, relative: &Path) {
        self.line(format_args!("processing: {}", relative.display()));
    }

    fn image_copied(&mut self, file_name: &str) {
        self.line(format_args!("  copied image: {file_name}"));
    }

    fn image_reused(&mut self, file_name: &str) {
        self.line(format_args!("  image content already present, using: {file_name}"));
    }

    fn image_missing(&mut self, source: &str) {
        self.line(format_args!("  warning: image file not found: {source}"));
    }

    fn document_updated(&mut self, _relative: &Path, backup: &Path) {
        let name = backup
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.line(format_args!("  updated file, backup created: {name}"));
    }

    fn document_failed(&mut self, _relative: &Path, message: &str) {
        self.line(format_args!("  error while processing file: {message}"));
    }
}

/// Banner printed before asking for confirmation.
pub fn render_banner(root: &Path) -> String {
    format!(
        "Markdown image localizer\n{RULE}\nworking directory: {}\n",
        root.display()
    )
}

/// Ask a yes/no question; only `y` or `Y` counts as yes.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<bool> {
    write!(output, "{question} (y/n): ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Block until the user presses Enter (or input ends).
pub fn wait_for_enter<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<()> {
    write!(output, "\npress Enter to exit...")?;
    output.flush()?;
    let mut discard = String::new();
    input.read_line(&mut discard)?;
    Ok(())
}

/// Human readable summary of a finished run.
pub fn render_summary(report: &RunReport, backup_extension: &str) -> String {
    let mut text = format!(
        "\n{RULE}\ndone. statistics:\n\
         documents scanned: {}\n\
         documents updated: {}\n\
         images copied: {}\n",
        report.documents_scanned, report.documents_updated, report.images_copied
    );
    if report.images_reused > 0 {
        text.push_str(&format!("duplicate references reused: {}\n", report.images_reused));
    }

    if !report.updated_files.is_empty() {
        text.push_str("\nupdated files:\n");
        for file in &report.updated_files {
            text.push_str(&format!("  - {}\n", file.display()));
        }
    }

    if !report.missing_images.is_empty() {
        text.push_str("\nimage files not found:\n");
        for image in &report.missing_images {
            text.push_str(&format!("  - {image}\n"));
        }
    }

    if !report.failed_documents.is_empty() {
        text.push_str("\nfiles that could not be processed:\n");
        for failed in &report.failed_documents {
            text.push_str(&format!("  - {}: {}\n", failed.path.display(), failed.message));
        }
    }

    text.push_str(&format!(
        "\nnote: original files were backed up as .{backup_extension} siblings\n\
         to restore one, delete the rewritten file and remove the .{backup_extension} extension from its backup"
    ));
    text
}
