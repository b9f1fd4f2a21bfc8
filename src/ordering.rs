use crate::error::{ConvertError, Result};
use crate::format::ComplexNumberType;
use crate::point::{MatrixOrder, Point};
use crate::record::RecordAssembler;
use core::fmt;
use serde::Serialize;
use simple_error::{bail, SimpleError};
use std::str::FromStr;

/// Number of complete records sampled when detecting the order.
pub const SAMPLE_RECORDS: usize = 6;

/// Requested matrix order: a fixed layout, or detection from the data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum OrderMode {
    #[default]
    Column,
    Row,
    Auto,
}

impl OrderMode {
    /// The layout when one is fixed by the caller.
    pub fn fixed(&self) -> Option<MatrixOrder> {
        match self {
            OrderMode::Column => Some(MatrixOrder::ColumnMajor),
            OrderMode::Row => Some(MatrixOrder::RowMajor),
            OrderMode::Auto => None,
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            OrderMode::Column => "col",
            OrderMode::Row => "row",
            OrderMode::Auto => "auto",
        }
    }
}

impl From<MatrixOrder> for OrderMode {
    fn from(order: MatrixOrder) -> Self {
        match order {
            MatrixOrder::ColumnMajor => OrderMode::Column,
            MatrixOrder::RowMajor => OrderMode::Row,
        }
    }
}

impl FromStr for OrderMode {
    type Err = SimpleError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(OrderMode::Auto),
            _ => match MatrixOrder::from_str(s) {
                Ok(order) => Ok(order.into()),
                Err(_) => bail!("string not a valid ordering"),
            },
        }
    }
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Sum over i < j of |Sij - Sji|, treating each entry as a point in the plane.
/// Zero for a reciprocal network.
pub fn asymmetry(pt: &Point) -> f64 {
    let n = pt.nports();
    let mut sum = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            sum += (pt[(i, j)] - pt[(j, i)]).norm();
        }
    }
    sum
}

/// Aggregate asymmetry of each candidate layout over the sampled records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct OrderScores {
    pub column: f64,
    pub row: f64,
    pub samples: usize,
}

impl OrderScores {
    /// Layout with the lower score; a tie goes to column-major.
    pub fn choice(&self) -> MatrixOrder {
        if self.column <= self.row {
            MatrixOrder::ColumnMajor
        } else {
            MatrixOrder::RowMajor
        }
    }
}

/// Score both layouts over the first [`SAMPLE_RECORDS`] complete records.
///
/// Short records are skipped here; they are reported when the data is
/// converted. Fails with [`ConvertError::IncompleteForDetection`] when no
/// record is long enough to sample.
pub fn detect_order(asm: &RecordAssembler, format: ComplexNumberType) -> Result<OrderScores> {
    let expected = asm.expected();
    let nports = asm.nports();
    let mut scores = OrderScores::default();

    for rec in asm
        .records()
        .filter(|rec| rec.is_complete(expected))
        .take(SAMPLE_RECORDS)
    {
        let col = Point::from_record(&rec, nports, format, MatrixOrder::ColumnMajor)?;
        let row = Point::from_record(&rec, nports, format, MatrixOrder::RowMajor)?;
        scores.column += asymmetry(&col);
        scores.row += asymmetry(&row);
        scores.samples += 1;
    }

    if scores.samples == 0 {
        return Err(ConvertError::IncompleteForDetection { expected });
    }
    tracing::debug!(
        column = scores.column,
        row = scores.row,
        samples = scores.samples,
        "ordering scores"
    );
    Ok(scores)
}

/// Layout to convert with. Detection runs only for [`OrderMode::Auto`].
pub fn resolve(
    mode: OrderMode,
    asm: &RecordAssembler,
    format: ComplexNumberType,
) -> Result<(MatrixOrder, Option<OrderScores>)> {
    match mode.fixed() {
        Some(order) => Ok((order, None)),
        None => {
            let scores = detect_order(asm, format)?;
            Ok((scores.choice(), Some(scores)))
        }
    }
}
