use crate::constants::{MISSING_CATEGORY, MISSING_MARKERS};

// ============================================================================
// COLUMN KIND
// ============================================================================

/// Statistical type of a column, decided once before any scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every present cell parses as a float (vacuously true for all-missing columns)
    Numeric,
    /// At least one present cell is not a number
    Categorical,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// COLUMN
// ============================================================================

/// A named, ordered sequence of cells. `None` is a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    cells: Vec<Option<String>>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Build from raw text values, mapping missing markers ("", "NA", ...) to `None`
    pub fn from_values<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cells = values.into_iter().map(|v| parse_cell(v.as_ref())).collect();
        Self::new(name, cells)
    }

    /// Build a fully numeric column
    pub fn from_numbers(name: impl Into<String>, values: &[f64]) -> Self {
        let cells = values.iter().map(|v| Some(v.to_string())).collect();
        Self::new(name, cells)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[Option<String>] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Capability check: numeric iff every present cell parses as a float
    pub fn kind(&self) -> ColumnKind {
        let all_numeric = self
            .cells
            .iter()
            .flatten()
            .all(|cell| parse_number(cell).is_some());

        if all_numeric {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }

    /// Present cells parsed as floats. Unparseable and NaN cells are dropped,
    /// so callers should check `kind()` first.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.cells
            .iter()
            .flatten()
            .filter_map(|cell| parse_number(cell))
            .collect()
    }

    /// Cell values as categories, missing cells mapped to the sentinel category
    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.cells
            .iter()
            .map(|cell| cell.as_deref().unwrap_or(MISSING_CATEGORY))
    }

    /// Cell at `row` as a float, if present and numeric
    pub fn number_at(&self, row: usize) -> Option<f64> {
        self.cells
            .get(row)
            .and_then(|c| c.as_deref())
            .and_then(parse_number)
    }
}

/// Map a raw CSV field to a cell
pub fn parse_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if MISSING_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(raw.to_string())
    }
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}
