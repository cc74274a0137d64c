use super::batch::Table;
use super::error::Result;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delim {
    #[default]
    Csv,
    Tsv,
}

impl Delim {
    pub fn sep(self) -> char {
        match self {
            Self::Csv => ',',
            Self::Tsv => '\t',
        }
    }
}

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single delimited row to any writer.
pub fn write_row<W, I, S>(w: &mut W, row: I, sep: char) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first {
            write!(w, "{sep}")?;
        } else {
            first = false;
        }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    writeln!(w)
}

/// Header plus one line per row.
pub fn write_table_to<W: Write>(w: &mut W, table: &Table, delim: Delim) -> io::Result<()> {
    let sep = delim.sep();
    write_row(w, table.columns(), sep)?;
    for row in table.rows() {
        write_row(w, row.cells(), sep)?;
    }
    Ok(())
}

/// Replace `path` with the rendered table. The file is written beside the
/// target and renamed into place, so readers never see a partial file.
pub fn write_table(path: &Path, table: &Table, delim: Delim) -> Result<()> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        fs::create_dir_all(parent)?;
    }
    let tmp_name = format!(
        ".{}.tmp.{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("tournaments"),
        std::process::id()
    );
    let tmp = match parent {
        Some(parent) => parent.join(tmp_name),
        None => tmp_name.into(),
    };

    let written = (|| -> io::Result<()> {
        let mut out = BufWriter::new(File::create(&tmp)?);
        write_table_to(&mut out, table, delim)?;
        out.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        fs::rename(&tmp, path)
    })();
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    info!(path = %path.display(), rows = table.len(), "wrote table");
    Ok(())
}
