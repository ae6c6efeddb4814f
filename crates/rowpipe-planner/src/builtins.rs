//! Built-in computed columns available to pipeline files.
//!
//! Each builder returns a `RowCompute` whose closure only reads the row it is
//! given.

use rowpipe_core::types::{Cell, CellType, Row};
use rowpipe_core::Error;
use rowpipe_operators::{OpError, RowCompute};

use crate::error::PlanError;

/// A constant cell appended to every row.
pub fn constant(value: &str, cell_type: CellType) -> Result<RowCompute, PlanError> {
    let cell = Cell::new(cell_type, value.len(), value);
    // Reject typed constants that could never be read back.
    if cell_type != CellType::None && cell_type != CellType::String {
        cell.sort_key()?;
    }
    let label = format!("constant {}:{}", cell_type.as_str(), value);
    Ok(RowCompute::new(move |_: &Row| Ok(cell.clone())).labeled(label))
}

/// Join the text of `columns` with `separator` into a string cell.
pub fn concat(columns: Vec<usize>, separator: String) -> RowCompute {
    let label = format!("concat {:?}", columns);
    RowCompute::new(move |row: &Row| {
        let parts = columns
            .iter()
            .map(|&i| row.cell(i).map(Cell::val))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Cell::string(parts.join(separator.as_str())))
    })
    .labeled(label)
}

/// Numeric sum of `columns`: an int when every input is an integer, a float
/// otherwise. Untyped cells are read as numbers; anything else is an error.
pub fn sum(columns: Vec<usize>) -> RowCompute {
    let label = format!("sum {:?}", columns);
    RowCompute::new(move |row: &Row| {
        let mut int_total: i64 = 0;
        let mut float_total: f64 = 0.0;
        let mut all_int = true;
        for &i in &columns {
            match read_number(row.cell(i)?)? {
                Number::Int(v) => {
                    float_total += v as f64;
                    if all_int {
                        int_total = int_total.checked_add(v).ok_or_else(|| {
                            OpError::Exec(format!("integer overflow summing {:?}", columns))
                        })?;
                    }
                }
                Number::Float(v) => {
                    all_int = false;
                    float_total += v;
                }
            }
        }
        Ok(if all_int {
            Cell::int(int_total)
        } else {
            Cell::float(float_total)
        })
    })
    .labeled(label)
}

enum Number {
    Int(i64),
    Float(f64),
}

fn read_number(cell: &Cell) -> Result<Number, OpError> {
    let text = cell.val().trim();
    let parsed = match cell.cell_type() {
        CellType::Int => text.parse::<i64>().ok().map(Number::Int),
        CellType::Float => text.parse::<f64>().ok().map(Number::Float),
        CellType::None => text
            .parse::<i64>()
            .map(Number::Int)
            .ok()
            .or_else(|| text.parse::<f64>().ok().map(Number::Float)),
        CellType::String | CellType::Bool => None,
    };
    parsed.ok_or_else(|| {
        Error::TypeMismatch(format!(
            "cannot sum {} value '{}'",
            cell.cell_type().as_str(),
            cell.val()
        ))
        .into()
    })
}
