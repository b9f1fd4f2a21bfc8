use crate::error::{ConvertError, Result};
use crate::format::ComplexNumberType;
use crate::record::Record;
use core::fmt;
use ndarray::Array2;
use num_complex::Complex64;
use serde::Serialize;
use simple_error::{bail, SimpleError};
use std::ops::Index;
use std::str::FromStr;

/// Order in which the N² entries of a matrix are laid out on a data line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum MatrixOrder {
    /// Down each column, then across: S11, S21, ..., SN1, S12, ...
    #[default]
    ColumnMajor,
    /// Across each row, then down: S11, S12, ..., S1N, S21, ...
    RowMajor,
}

impl MatrixOrder {
    /// (row, col) of the `k`-th entry of an `nports`-port matrix.
    pub fn position(&self, k: usize, nports: usize) -> (usize, usize) {
        match self {
            MatrixOrder::ColumnMajor => (k % nports, k / nports),
            MatrixOrder::RowMajor => (k / nports, k % nports),
        }
    }

    /// Every (row, col) of an `nports`-port matrix in this order.
    pub fn indices(self, nports: usize) -> impl Iterator<Item = (usize, usize)> {
        (0..nports * nports).map(move |k| self.position(k, nports))
    }

    pub fn to_str(&self) -> &str {
        match self {
            MatrixOrder::ColumnMajor => "col",
            MatrixOrder::RowMajor => "row",
        }
    }
}

impl FromStr for MatrixOrder {
    type Err = SimpleError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "col" | "column" | "column-major" => Ok(MatrixOrder::ColumnMajor),
            "row" | "row-major" => Ok(MatrixOrder::RowMajor),
            _ => bail!("string not a valid matrix order"),
        }
    }
}

impl fmt::Display for MatrixOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Network parameters at one frequency, indexed `[(row, col)]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Point(Array2<Complex64>);

impl Point {
    pub fn new(data: Array2<Complex64>) -> Self {
        Point(data)
    }

    pub fn zeros(nports: usize) -> Self {
        Point(Array2::zeros((nports, nports)))
    }

    /// Build the matrix from the first 2·N² values of a record.
    ///
    /// Each consecutive pair of values is read in `format` and assigned to
    /// the next entry in `order`. Values past 2·N² are ignored.
    pub fn from_record(
        rec: &Record,
        nports: usize,
        format: ComplexNumberType,
        order: MatrixOrder,
    ) -> Result<Point> {
        let expected = 2 * nports * nports;
        if !rec.is_complete(expected) {
            return Err(ConvertError::IncompleteRecord {
                freq: rec.freq().to_string(),
                expected,
                found: rec.len(),
            });
        }

        let mut out = Point::zeros(nports);
        for (k, pair) in rec.values()[..expected].chunks_exact(2).enumerate() {
            let (row, col) = order.position(k, nports);
            out.0[[row, col]] = format.parse(parse_value(pair[0])?, parse_value(pair[1])?);
        }
        Ok(out)
    }

    pub fn nports(&self) -> usize {
        self.0.nrows()
    }

    pub fn t(&self) -> Self {
        Point(self.0.t().to_owned())
    }

    /// Entries in `order`.
    pub fn flatten(&self, order: MatrixOrder) -> impl Iterator<Item = Complex64> + '_ {
        order
            .indices(self.nports())
            .map(move |(row, col)| self.0[[row, col]])
    }

    /// Two-port view between 1-indexed ports `port_a` and `port_b`.
    ///
    /// With a = port_a - 1 and b = port_b - 1 the result holds
    /// S11 = S[a][a], S21 = S[b][a], S12 = S[a][b], S22 = S[b][b],
    /// so S21 is transmission from port_a to port_b.
    pub fn two_port(&self, port_a: usize, port_b: usize) -> Result<Point> {
        check_ports(self.nports(), &[port_a, port_b])?;
        let ports = [port_a - 1, port_b - 1];
        Ok(Point(Array2::from_shape_fn((2, 2), |(i, j)| {
            self.0[[ports[i], ports[j]]]
        })))
    }
}

impl Index<(usize, usize)> for Point {
    type Output = Complex64;

    fn index(&self, index: (usize, usize)) -> &Complex64 {
        &self.0[[index.0, index.1]]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|c| format!("{:>12.6} {:>+12.6}j", c.re, c.im))
                .collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}

/// Every port must lie in `1..=nports`.
pub fn check_ports(nports: usize, ports: &[usize]) -> Result<()> {
    match ports.iter().find(|&&port| port == 0 || port > nports) {
        Some(&port) => Err(ConvertError::PortOutOfRange { port, nports }),
        None => Ok(()),
    }
}

fn parse_value(token: &str) -> Result<f64> {
    token.parse().map_err(|_| ConvertError::InvalidNumber {
        token: token.to_string(),
    })
}
