use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::TableError;

fn is_gzip(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "gz")
}

/// Open a table source, gunzipping `.gz` files on the fly
pub(crate) fn open(path: &Path) -> Result<Box<dyn Read>, TableError> {
    let file = File::open(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    Ok(if is_gzip(path) {
        Box::new(GzDecoder::new(reader))
    } else {
        Box::new(reader)
    })
}

/// Table destination; must be closed with [`TableWriter::finish`]
pub(crate) enum TableWriter {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl TableWriter {
    /// Flush everything, writing the gzip trailer for compressed tables
    pub(crate) fn finish(self) -> io::Result<()> {
        match self {
            TableWriter::Plain(mut w) => w.flush(),
            TableWriter::Gzip(enc) => enc.finish()?.flush(),
        }
    }
}

impl Write for TableWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            TableWriter::Plain(w) => w.write(buf),
            TableWriter::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            TableWriter::Plain(w) => w.flush(),
            TableWriter::Gzip(w) => w.flush(),
        }
    }
}

/// Create a table destination, gzipping when the path ends in `.gz`
pub(crate) fn create(path: &Path) -> Result<TableWriter, TableError> {
    let file = File::create(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let writer = BufWriter::new(file);

    Ok(if is_gzip(path) {
        TableWriter::Gzip(GzEncoder::new(writer, Compression::default()))
    } else {
        TableWriter::Plain(writer)
    })
}

/// Map a csv error onto the table error kinds, keeping I/O failures distinct
pub(crate) fn csv_error(path: &Path, err: csv::Error) -> TableError {
    let line = err.position().map(|p| p.line());
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => TableError::Io {
            path: path.to_path_buf(),
            source,
        },
        _ => TableError::format(path, line, message),
    }
}
