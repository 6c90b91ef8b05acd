use std::io::Write;

use libpyblame_core::{BlameError, BlameReport, OutputFormat};

/// Serialize the report to `out` in the configured format
pub fn write_report<W: Write>(
    out: &mut W,
    report: &BlameReport,
    format: OutputFormat,
) -> Result<(), BlameError> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_writer(&mut *out, report)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Print an error and its suggestions to stderr
pub fn output_error(err: &BlameError, format: OutputFormat) {
    let stderr = std::io::stderr();
    let _ = write_error(&mut stderr.lock(), err, format);
}

/// Write an error in the report's format: a JSON envelope carrying the
/// error code, or `error:` plus suggestions for human readers
pub fn write_error<W: Write>(
    out: &mut W,
    err: &BlameError,
    format: OutputFormat,
) -> std::io::Result<()> {
    let suggestions = err.suggestions();
    match format {
        OutputFormat::Json => {
            let mut error = serde_json::json!({
                "code": err.error_code(),
                "message": err.to_string(),
            });
            if !suggestions.is_empty() {
                error["details"] = serde_json::json!({ "suggestions": suggestions });
            }
            let response = serde_json::json!({ "ok": false, "error": error });
            serde_json::to_writer_pretty(&mut *out, &response)?;
            writeln!(out)
        }
        OutputFormat::Yaml => {
            writeln!(out, "error: {}", err)?;
            if !suggestions.is_empty() {
                writeln!(out)?;
                writeln!(out, "Suggestions:")?;
                for suggestion in suggestions {
                    writeln!(out, "  - {}", suggestion)?;
                }
            }
            Ok(())
        }
    }
}
