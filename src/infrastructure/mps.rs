// Free-format MPS reader and writer for the flattened model

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::path::Path;

use tracing::info;

use crate::domain::{
    CompletedOptimizationModel, MpsError, Result, Scalar, SolverError, VariableKind,
};
use crate::solver::flat_model::{Column, FlatModel, Row};

const OBJECTIVE_ROW: &str = "OBJ";

/// Model serialized as free-format MPS text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInMpsFormat(String);

impl ModelInMpsFormat {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn from_model<S: Scalar, C: Scalar>(model: &CompletedOptimizationModel<S, C>) -> Result<Self> {
        let (flat, _) = FlatModel::from_completed(model)?;
        Ok(Self(write_mps(&flat)?))
    }

    pub fn from_flat(model: &FlatModel) -> Result<Self> {
        Ok(Self(write_mps(model)?))
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        std::fs::read_to_string(path)
            .map(Self)
            .map_err(|source| SolverError::Import {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, &self.0).map_err(|source| SolverError::Export {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "exported model");
        Ok(())
    }

    pub fn parse(&self) -> std::result::Result<FlatModel, MpsError> {
        parse_mps(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn check_name(name: &str) -> std::result::Result<(), MpsError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(MpsError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Writes `model` as free MPS. Every bound is written explicitly.
///
/// Row names must be distinct from each other, and column names likewise.
pub fn write_mps(model: &FlatModel) -> std::result::Result<String, MpsError> {
    let mut column_names = HashSet::with_capacity(model.columns.len());
    for column in &model.columns {
        check_name(&column.name)?;
        if !column_names.insert(column.name.as_str()) {
            return Err(MpsError::DuplicateName {
                name: column.name.clone(),
            });
        }
    }
    let mut row_names = HashSet::with_capacity(model.rows.len());
    for row in &model.rows {
        check_name(&row.name)?;
        if !row_names.insert(row.name.as_str()) {
            return Err(MpsError::DuplicateName {
                name: row.name.clone(),
            });
        }
    }
    if model.rows.iter().any(|r| r.name == OBJECTIVE_ROW) {
        return Err(MpsError::InvalidName {
            name: OBJECTIVE_ROW.to_string(),
        });
    }
    let model_name = if model.name.is_empty() {
        "model"
    } else {
        model.name.as_str()
    };
    check_name(model_name)?;

    let mut out = String::new();
    let _ = writeln!(out, "NAME {model_name}");
    if model.maximize {
        let _ = writeln!(out, "OBJSENSE\n    MAX");
    }

    let _ = writeln!(out, "ROWS");
    let _ = writeln!(out, " N  {OBJECTIVE_ROW}");
    for row in &model.rows {
        let kind = match (row.lower.is_finite(), row.upper.is_finite()) {
            _ if row.lower == row.upper => "E",
            (false, false) => "N",
            (false, true) => "L",
            (true, _) => "G",
        };
        let _ = writeln!(out, " {kind}  {}", row.name);
    }

    // column-major view of the coefficients
    let mut entries: Vec<Vec<(&str, f64)>> = vec![Vec::new(); model.columns.len()];
    for (column, coefficient) in model.objective_coefficients().into_iter().enumerate() {
        if coefficient != 0.0 {
            entries[column].push((OBJECTIVE_ROW, coefficient));
        }
    }
    for row in &model.rows {
        for &(column, coefficient) in &row.terms {
            entries[column].push((row.name.as_str(), coefficient));
        }
    }

    let _ = writeln!(out, "COLUMNS");
    let mut in_integer_block = false;
    let mut marker = 0;
    for (column, column_entries) in model.columns.iter().zip(&entries) {
        let integral = column.kind.is_integral();
        if integral != in_integer_block {
            let tag = if integral { "'INTORG'" } else { "'INTEND'" };
            let _ = writeln!(out, "    MARKER{marker}  'MARKER'  {tag}");
            marker += 1;
            in_integer_block = integral;
        }
        if column_entries.is_empty() {
            let _ = writeln!(out, "    {}  {OBJECTIVE_ROW}  0", column.name);
        }
        for (row, coefficient) in column_entries {
            let _ = writeln!(out, "    {}  {row}  {coefficient}", column.name);
        }
    }
    if in_integer_block {
        let _ = writeln!(out, "    MARKER{marker}  'MARKER'  'INTEND'");
    }

    let _ = writeln!(out, "RHS");
    if model.offset != 0.0 {
        let _ = writeln!(out, "    RHS  {OBJECTIVE_ROW}  {}", -model.offset);
    }
    let mut ranges = Vec::new();
    for row in &model.rows {
        let rhs = match (row.lower.is_finite(), row.upper.is_finite()) {
            _ if row.lower == row.upper => row.lower,
            (false, false) => continue,
            (false, true) => row.upper,
            (true, upper_finite) => {
                if upper_finite {
                    ranges.push((row.name.as_str(), row.upper - row.lower));
                }
                row.lower
            }
        };
        if rhs != 0.0 {
            let _ = writeln!(out, "    RHS  {}  {rhs}", row.name);
        }
    }

    if !ranges.is_empty() {
        let _ = writeln!(out, "RANGES");
        for (name, range) in ranges {
            let _ = writeln!(out, "    RNG  {name}  {range}");
        }
    }

    let _ = writeln!(out, "BOUNDS");
    for column in &model.columns {
        let name = &column.name;
        if column.kind == VariableKind::Binary && column.lower == 0.0 && column.upper == 1.0 {
            let _ = writeln!(out, " BV BND  {name}");
        } else if column.lower == column.upper {
            let _ = writeln!(out, " FX BND  {name}  {}", column.lower);
        } else if !column.lower.is_finite() && !column.upper.is_finite() {
            let _ = writeln!(out, " FR BND  {name}");
        } else {
            if column.lower.is_finite() {
                let _ = writeln!(out, " LO BND  {name}  {}", column.lower);
            } else {
                let _ = writeln!(out, " MI BND  {name}");
            }
            if column.upper.is_finite() {
                let _ = writeln!(out, " UP BND  {name}  {}", column.upper);
            } else {
                let _ = writeln!(out, " PL BND  {name}");
            }
        }
    }
    let _ = writeln!(out, "ENDATA");
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Start,
    Rows,
    Columns,
    Rhs,
    Ranges,
    Bounds,
    ObjSense,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Free,
    Less,
    Greater,
    Equal,
}

struct RowDraft {
    name: String,
    kind: RowKind,
    terms: Vec<(usize, f64)>,
    rhs: f64,
    range: Option<f64>,
}

impl RowDraft {
    fn bounds(&self) -> (f64, f64) {
        let rhs = self.rhs;
        match (self.kind, self.range) {
            (RowKind::Free, _) => (f64::NEG_INFINITY, f64::INFINITY),
            (RowKind::Less, None) => (f64::NEG_INFINITY, rhs),
            (RowKind::Greater, None) => (rhs, f64::INFINITY),
            (RowKind::Equal, None) => (rhs, rhs),
            (RowKind::Less, Some(r)) => (rhs - r.abs(), rhs),
            (RowKind::Greater, Some(r)) => (rhs, rhs + r.abs()),
            (RowKind::Equal, Some(r)) if r < 0.0 => (rhs + r, rhs),
            (RowKind::Equal, Some(r)) => (rhs, rhs + r),
        }
    }
}

/// Line-oriented MPS reader
struct MpsReader {
    section: Section,
    name: String,
    maximize: bool,
    objective_row: Option<String>,
    rows: Vec<RowDraft>,
    row_index: HashMap<String, usize>,
    columns: Vec<Column>,
    column_index: HashMap<String, usize>,
    objective: Vec<(usize, f64)>,
    offset: f64,
    integer_block: bool,
}

/// Parses free-format MPS text
pub fn parse_mps(text: &str) -> std::result::Result<FlatModel, MpsError> {
    let mut reader = MpsReader {
        section: Section::Start,
        name: "model".to_string(),
        maximize: false,
        objective_row: None,
        rows: Vec::new(),
        row_index: HashMap::new(),
        columns: Vec::new(),
        column_index: HashMap::new(),
        objective: Vec::new(),
        offset: 0.0,
        integer_block: false,
    };
    for (i, line) in text.lines().enumerate() {
        reader.read_line(i + 1, line)?;
        if reader.section == Section::End {
            break;
        }
    }
    reader.finish()
}

impl MpsReader {
    fn read_line(&mut self, line: usize, text: &str) -> std::result::Result<(), MpsError> {
        let trimmed = text.trim_end();
        if trimmed.trim_start().is_empty() || trimmed.starts_with('*') {
            return Ok(());
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if !trimmed.starts_with(char::is_whitespace) {
            return self.read_header(line, &fields);
        }
        match self.section {
            Section::Rows => self.read_row(line, &fields),
            Section::Columns => self.read_column(line, &fields),
            Section::Rhs => self.read_rhs(line, &fields),
            Section::Ranges => self.read_range(line, &fields),
            Section::Bounds => self.read_bound(line, &fields),
            Section::ObjSense => {
                self.read_sense(fields[0]);
                Ok(())
            }
            Section::Start | Section::End => Err(MpsError::UnexpectedSection {
                line,
                section: fields[0].to_string(),
            }),
        }
    }

    fn read_header(&mut self, line: usize, fields: &[&str]) -> std::result::Result<(), MpsError> {
        self.section = match fields[0].to_ascii_uppercase().as_str() {
            "NAME" => {
                if let Some(name) = fields.get(1) {
                    self.name = name.to_string();
                }
                Section::Start
            }
            "OBJSENSE" => {
                if let Some(sense) = fields.get(1) {
                    self.read_sense(sense);
                }
                Section::ObjSense
            }
            "ROWS" => Section::Rows,
            "COLUMNS" => Section::Columns,
            "RHS" => Section::Rhs,
            "RANGES" => Section::Ranges,
            "BOUNDS" => Section::Bounds,
            "ENDATA" => Section::End,
            other => {
                return Err(MpsError::UnexpectedSection {
                    line,
                    section: other.to_string(),
                })
            }
        };
        Ok(())
    }

    fn read_sense(&mut self, sense: &str) {
        self.maximize = sense.to_ascii_uppercase().starts_with("MAX");
    }

    fn read_row(&mut self, line: usize, fields: &[&str]) -> std::result::Result<(), MpsError> {
        let (kind, name) = match fields {
            [kind, name, ..] => (*kind, *name),
            _ => {
                return Err(MpsError::MissingField {
                    line,
                    section: "ROWS",
                })
            }
        };
        if self.is_objective(name) || self.row_index.contains_key(name) {
            return Err(MpsError::DuplicateRow {
                line,
                name: name.to_string(),
            });
        }
        let kind = match kind.to_ascii_uppercase().as_str() {
            "N" if self.objective_row.is_none() => {
                self.objective_row = Some(name.to_string());
                return Ok(());
            }
            "N" => RowKind::Free,
            "L" => RowKind::Less,
            "G" => RowKind::Greater,
            "E" => RowKind::Equal,
            other => {
                return Err(MpsError::UnknownRowType {
                    line,
                    kind: other.to_string(),
                })
            }
        };
        self.row_index.insert(name.to_string(), self.rows.len());
        self.rows.push(RowDraft {
            name: name.to_string(),
            kind,
            terms: Vec::new(),
            rhs: 0.0,
            range: None,
        });
        Ok(())
    }

    fn read_column(&mut self, line: usize, fields: &[&str]) -> std::result::Result<(), MpsError> {
        if fields.len() >= 3 && fields[1] == "'MARKER'" {
            match fields[2] {
                "'INTORG'" => self.integer_block = true,
                "'INTEND'" => self.integer_block = false,
                _ => {}
            }
            return Ok(());
        }
        if fields.len() < 3 || fields.len() % 2 == 0 {
            return Err(MpsError::MissingField {
                line,
                section: "COLUMNS",
            });
        }
        let column = match self.column_index.get(fields[0]) {
            Some(&index) => index,
            None => {
                let index = self.columns.len();
                self.columns.push(Column {
                    name: fields[0].to_string(),
                    lower: 0.0,
                    upper: f64::INFINITY,
                    kind: if self.integer_block {
                        VariableKind::Integer
                    } else {
                        VariableKind::Continuous
                    },
                });
                self.column_index.insert(fields[0].to_string(), index);
                index
            }
        };
        for pair in fields[1..].chunks(2) {
            let value = number(line, pair[1])?;
            if self.is_objective(pair[0]) {
                self.objective.push((column, value));
            } else {
                let row = self.row(line, pair[0])?;
                self.rows[row].terms.push((column, value));
            }
        }
        Ok(())
    }

    /// Pairs of (row, value), after an optional set name
    fn row_pairs<'a>(
        line: usize,
        fields: &'a [&'a str],
        section: &'static str,
    ) -> std::result::Result<&'a [&'a str], MpsError> {
        let pairs = if fields.len() % 2 == 1 {
            &fields[1..]
        } else {
            fields
        };
        if pairs.is_empty() {
            return Err(MpsError::MissingField { line, section });
        }
        Ok(pairs)
    }

    fn read_rhs(&mut self, line: usize, fields: &[&str]) -> std::result::Result<(), MpsError> {
        for pair in Self::row_pairs(line, fields, "RHS")?.chunks(2) {
            let value = number(line, pair[1])?;
            if self.is_objective(pair[0]) {
                self.offset = -value;
            } else {
                let row = self.row(line, pair[0])?;
                self.rows[row].rhs = value;
            }
        }
        Ok(())
    }

    fn read_range(&mut self, line: usize, fields: &[&str]) -> std::result::Result<(), MpsError> {
        for pair in Self::row_pairs(line, fields, "RANGES")?.chunks(2) {
            let value = number(line, pair[1])?;
            let row = self.row(line, pair[0])?;
            self.rows[row].range = Some(value);
        }
        Ok(())
    }

    fn read_bound(&mut self, line: usize, fields: &[&str]) -> std::result::Result<(), MpsError> {
        let missing = MpsError::MissingField {
            line,
            section: "BOUNDS",
        };
        let kind = fields.first().ok_or(missing.clone())?.to_ascii_uppercase();
        let takes_value = matches!(kind.as_str(), "UP" | "LO" | "FX" | "LI" | "UI");
        let (column_name, value) = if takes_value {
            if fields.len() < 3 {
                return Err(missing);
            }
            let n = fields.len();
            (fields[n - 2], Some(number(line, fields[n - 1])?))
        } else {
            match fields {
                [_, set_or_column, rest @ ..] => match rest.first() {
                    Some(column) if self.column_index.contains_key(*column) => (*column, None),
                    _ => (*set_or_column, None),
                },
                _ => return Err(missing),
            }
        };
        let index = *self
            .column_index
            .get(column_name)
            .ok_or_else(|| MpsError::UnknownColumn {
                line,
                name: column_name.to_string(),
            })?;
        let column = &mut self.columns[index];
        let value = value.unwrap_or_default();
        // a negative upper bound on a column still at the default lower bound frees it below
        let frees_lower = value < 0.0 && column.lower == 0.0;
        match kind.as_str() {
            "UP" => {
                column.upper = value;
                if frees_lower {
                    column.lower = f64::NEG_INFINITY;
                }
            }
            "LO" => column.lower = value,
            "FX" => {
                column.lower = value;
                column.upper = value;
            }
            "LI" => {
                column.lower = value;
                column.kind = VariableKind::Integer;
            }
            "UI" => {
                column.upper = value;
                if frees_lower {
                    column.lower = f64::NEG_INFINITY;
                }
                column.kind = VariableKind::Integer;
            }
            "FR" => {
                column.lower = f64::NEG_INFINITY;
                column.upper = f64::INFINITY;
            }
            "MI" => column.lower = f64::NEG_INFINITY,
            "PL" => column.upper = f64::INFINITY,
            "BV" => {
                column.lower = 0.0;
                column.upper = 1.0;
                column.kind = VariableKind::Binary;
            }
            other => {
                return Err(MpsError::UnknownBoundType {
                    line,
                    kind: other.to_string(),
                })
            }
        }
        Ok(())
    }

    fn is_objective(&self, row: &str) -> bool {
        self.objective_row.as_deref() == Some(row)
    }

    fn row(&self, line: usize, name: &str) -> std::result::Result<usize, MpsError> {
        self.row_index
            .get(name)
            .copied()
            .ok_or_else(|| MpsError::UnknownRow {
                line,
                name: name.to_string(),
            })
    }

    fn finish(self) -> std::result::Result<FlatModel, MpsError> {
        if self.objective_row.is_none() {
            return Err(MpsError::MissingObjectiveRow);
        }
        let rows = self
            .rows
            .iter()
            .map(|draft| {
                let (lower, upper) = draft.bounds();
                Row {
                    name: draft.name.clone(),
                    terms: draft.terms.clone(),
                    lower,
                    upper,
                }
            })
            .collect();
        Ok(FlatModel {
            name: self.name,
            columns: self.columns,
            rows,
            objective: self.objective,
            offset: self.offset,
            maximize: self.maximize,
        })
    }
}

fn number(line: usize, text: &str) -> std::result::Result<f64, MpsError> {
    text.parse::<f64>().map_err(|_| MpsError::InvalidNumber {
        line,
        value: text.to_string(),
    })
}
