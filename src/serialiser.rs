use crate::analysis::Analysis;

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Where the analysis of `input` is exported: `<input>.analysis.json`.
pub fn analysis_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let mut path = input.as_ref().as_os_str().to_owned();
    path.push(".analysis.json");
    PathBuf::from(path)
}

pub fn serialise<P: AsRef<Path>>(analysis: &Analysis, output: P) -> Result<()> {
    let file = std::fs::File::create(output).context("Failed to create file!")?;
    let mut writer = BufWriter::new(file);
    write_analysis(&mut writer, analysis).context("Failed to write to output file.")?;
    writer.flush().context("Failed to write to output file.")?;
    Ok(())
}

fn write_analysis<W: Write>(buf: &mut W, analysis: &Analysis) -> Result<()> {
    serde_json::to_writer_pretty(&mut *buf, analysis)?;
    writeln!(buf)?;
    Ok(())
}
