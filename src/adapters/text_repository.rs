//! Plain-text implementation of the model repository.
//!
//! One line per known state: `<state> <q_0> <q_1> ... <q_{A-1}>`, tokens
//! separated by whitespace. Values are written with Rust's shortest
//! round-trip float formatting, so a save followed by a load reproduces
//! the table exactly.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    Result,
    error::Error,
    identifiers::StateId,
    ports::ModelRepository,
    q_learning::ValueTable,
};

/// Flat text model files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextModelRepository;

impl TextModelRepository {
    pub fn new() -> Self {
        Self
    }

    /// Parse model rows from any reader.
    pub fn read_table<R: BufRead>(reader: R, width: usize) -> Result<ValueTable> {
        let mut table = ValueTable::new(width);
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| Error::Io {
                operation: "read model line".to_string(),
                source,
            })?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            let malformed = || Error::MalformedModelRow {
                line: index + 1,
                expected: width + 1,
                got: tokens.len(),
            };
            if tokens.len() != width + 1 {
                return Err(malformed());
            }
            let state: StateId = tokens[0].parse().map_err(|_| malformed())?;
            let row = tokens[1..]
                .iter()
                .map(|token| token.parse::<f64>())
                .collect::<std::result::Result<Vec<f64>, _>>()
                .map_err(|_| malformed())?;
            table.insert_row(state, row)?;
        }
        Ok(table)
    }

    /// Write model rows, in ascending state order, to any writer.
    pub fn write_table<W: Write>(table: &ValueTable, writer: &mut W) -> std::io::Result<()> {
        for (state, row) in table.iter() {
            write!(writer, "{state}")?;
            for value in row {
                write!(writer, " {value}")?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

impl ModelRepository for TextModelRepository {
    fn save(&self, table: &ValueTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::ModelSave {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        Self::write_table(table, &mut writer)
            .and_then(|_| writer.flush())
            .map_err(|source| Error::ModelSave {
                path: path.to_path_buf(),
                source,
            })
    }

    fn load(&self, path: &Path, width: usize) -> Result<ValueTable> {
        let file = File::open(path).map_err(|err| Error::ModelLoad {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Self::read_table(BufReader::new(file), width).map_err(|err| Error::ModelLoad {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }
}
