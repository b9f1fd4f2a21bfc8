use crate::error::{ConvertError, Result};
use crate::file::TwoPortWriter;
use crate::format::ComplexNumberType;
use crate::options::OptionsHeader;
use crate::ordering::{self, asymmetry, OrderMode, OrderScores};
use crate::point::{check_ports, MatrixOrder, Point};
use crate::record::RecordAssembler;
use serde::Serialize;

const NPORT_COMMENT: &str = "! Converted by rfconvert (column-major ordering default)";
const TWO_PORT_COMMENT: &str = "! Converted by rfconvert (2-port representation)";

/// Options for [`convert_nport_to_two_port`].
///
/// ## Example
/// ```
/// use rfconvert::prelude::*;
///
/// let opts = NPortOptions::new()
///     .ordering(OrderMode::Auto)
///     .format(ComplexNumberType::MagAng)
///     .diagnostics(true);
/// assert_eq!(opts.get_ordering(), OrderMode::Auto);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NPortOptions {
    ordering: OrderMode,
    format: Option<ComplexNumberType>,
    diagnostics: bool,
}

impl NPortOptions {
    pub fn new() -> Self {
        NPortOptions::default()
    }

    /// Matrix layout of the input, column-major unless set.
    pub fn ordering(mut self, ordering: OrderMode) -> Self {
        self.ordering = ordering;
        self
    }

    /// Read the data in `format` regardless of the option line.
    pub fn format(mut self, format: ComplexNumberType) -> Self {
        self.format = Some(format);
        self
    }

    /// Also return both candidate matrices for the first complete record.
    pub fn diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn get_ordering(&self) -> OrderMode {
        self.ordering
    }

    pub fn get_format(&self) -> Option<ComplexNumberType> {
        self.format
    }

    pub fn get_diagnostics(&self) -> bool {
        self.diagnostics
    }
}

/// Options for [`convert_two_port_representation`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TwoPortOptions {
    format: Option<ComplexNumberType>,
    target: ComplexNumberType,
}

impl Default for TwoPortOptions {
    fn default() -> Self {
        TwoPortOptions {
            format: None,
            target: ComplexNumberType::Db,
        }
    }
}

impl TwoPortOptions {
    pub fn new() -> Self {
        TwoPortOptions::default()
    }

    /// Input representation; `None` takes it from the option line.
    pub fn format(mut self, format: Option<ComplexNumberType>) -> Self {
        self.format = format;
        self
    }

    /// Output representation, dB/angle unless set.
    pub fn target(mut self, target: ComplexNumberType) -> Self {
        self.target = target;
        self
    }

    pub fn get_format(&self) -> Option<ComplexNumberType> {
        self.format
    }

    pub fn get_target(&self) -> ComplexNumberType {
        self.target
    }
}

/// Both readings of one record, for checking a layout by eye.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostics {
    pub freq: String,
    pub column_major: Point,
    pub row_major: Point,
    pub column_asymmetry: f64,
    pub row_asymmetry: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NPortConversion {
    #[serde(skip)]
    pub text: String,
    pub preview: String,
    pub points: usize,
    pub order: MatrixOrder,
    pub requested: OrderMode,
    pub format: ComplexNumberType,
    pub header: Option<OptionsHeader>,
    pub scores: Option<OrderScores>,
    #[serde(skip)]
    pub diagnostics: Option<Diagnostics>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TwoPortConversion {
    #[serde(skip)]
    pub text: String,
    pub points: usize,
    pub format: ComplexNumberType,
    pub target: ComplexNumberType,
    pub header: Option<OptionsHeader>,
}

/// Extract the 2-port between `port_a` and `port_b` (1-indexed) from an
/// `nports`-port Touchstone file.
///
/// The result is always written as RI with six fractional digits, whatever
/// the input representation. Any short record fails the whole conversion.
pub fn convert_nport_to_two_port(
    text: &str,
    nports: usize,
    port_a: usize,
    port_b: usize,
    opts: &NPortOptions,
) -> Result<NPortConversion> {
    if text.trim().is_empty() {
        return Err(ConvertError::InputMissing);
    }
    // 2·N² values per record
    let fits = nports
        .checked_mul(nports)
        .and_then(|n| n.checked_mul(2))
        .is_some();
    if nports == 0 || !fits {
        return Err(ConvertError::InvalidPortCount { nports });
    }
    check_ports(nports, &[port_a, port_b])?;

    let asm = RecordAssembler::new(text, nports);
    let meta = asm.metadata();
    let header = meta.options.clone().unwrap_or_default();
    let format = opts.format.unwrap_or(header.format());

    if asm.records().next().is_none() {
        return Err(ConvertError::NoDataFound);
    }
    let (order, scores) = ordering::resolve(opts.ordering, &asm, format)?;

    let mut writer = TwoPortWriter::new(
        &meta.comments,
        NPORT_COMMENT,
        &header,
        ComplexNumberType::ReIm,
    );
    for rec in asm.complete_records() {
        let rec = rec?;
        let pt = Point::from_record(&rec, nports, format, order)?;
        writer.push(rec.freq(), &pt.two_port(port_a, port_b)?);
    }
    let points = writer.points();

    let diagnostics = if opts.diagnostics {
        diagnose(&asm, format)?
    } else {
        None
    };

    let preview = format!(
        "Ordering chosen: {} (requested: {}) - format: {} - points: {}",
        order, opts.ordering, format, points
    );
    tracing::debug!(%preview, nports, port_a, port_b, "converted n-port file");

    Ok(NPortConversion {
        text: writer.finish(),
        preview,
        points,
        order,
        requested: opts.ordering,
        format,
        header: meta.options,
        scores,
        diagnostics,
    })
}

/// Rewrite a 2-port Touchstone file in another representation.
///
/// A 2-port data line has a single layout (S11, S21, S12, S22), so no
/// ordering choice is involved.
pub fn convert_two_port_representation(
    text: &str,
    opts: &TwoPortOptions,
) -> Result<TwoPortConversion> {
    if text.trim().is_empty() {
        return Err(ConvertError::InputMissing);
    }

    let asm = RecordAssembler::new(text, 2);
    let meta = asm.metadata();
    let header = meta.options.clone().unwrap_or_default();
    let format = opts.format.unwrap_or(header.format());

    let mut writer = TwoPortWriter::new(&meta.comments, TWO_PORT_COMMENT, &header, opts.target);
    for rec in asm.complete_records() {
        let rec = rec?;
        let pt = Point::from_record(&rec, 2, format, MatrixOrder::ColumnMajor)?;
        writer.push(rec.freq(), &pt);
    }
    let points = writer.points();
    if points == 0 {
        return Err(ConvertError::NoDataFound);
    }
    tracing::debug!(points, %format, target = %opts.target, "converted 2-port file");

    Ok(TwoPortConversion {
        text: writer.finish(),
        points,
        format,
        target: opts.target,
        header: meta.options,
    })
}

fn diagnose(asm: &RecordAssembler, format: ComplexNumberType) -> Result<Option<Diagnostics>> {
    let expected = asm.expected();
    let Some(rec) = asm.records().find(|rec| rec.is_complete(expected)) else {
        return Ok(None);
    };
    let column_major = Point::from_record(&rec, asm.nports(), format, MatrixOrder::ColumnMajor)?;
    let row_major = Point::from_record(&rec, asm.nports(), format, MatrixOrder::RowMajor)?;
    Ok(Some(Diagnostics {
        freq: rec.freq().to_string(),
        column_asymmetry: asymmetry(&column_major),
        row_asymmetry: asymmetry(&row_major),
        column_major,
        row_major,
    }))
}
