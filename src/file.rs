use crate::format::ComplexNumberType;
use crate::options::OptionsHeader;
use crate::parameter::RFParameter;
use crate::point::{MatrixOrder, Point};

// entry names of a 2-port in data-line order
const TWO_PORT_ENTRIES: [&str; 4] = ["11", "21", "12", "22"];

/// Comment line naming the columns of a 2-port file written in `format`.
pub fn columns_line(parameter: RFParameter, format: ComplexNumberType) -> String {
    let mut line = String::from("! Columns: freq");
    for ij in TWO_PORT_ENTRIES {
        let p = parameter.to_str();
        let names = match format {
            ComplexNumberType::ReIm => format!(" Re({p}{ij}) Im({p}{ij})"),
            ComplexNumberType::MagAng => format!(" |{p}{ij}| {p}{ij}deg"),
            ComplexNumberType::Db => format!(" {p}{ij}(dB) {p}{ij}deg"),
        };
        line.push_str(&names);
    }
    line
}

/// Builds the text of a 2-port Touchstone file one frequency point at a time.
///
/// The preamble is written up front: the input's comment lines (or
/// `default_comment` when there are none), an option line in the target
/// representation, and a column description. Every data line then carries
/// the frequency token exactly as it was read.
pub struct TwoPortWriter {
    out: String,
    format: ComplexNumberType,
    points: usize,
}

impl TwoPortWriter {
    pub fn new(
        comments: &[&str],
        default_comment: &str,
        header: &OptionsHeader,
        format: ComplexNumberType,
    ) -> Self {
        let mut writer = TwoPortWriter {
            out: String::new(),
            format,
            points: 0,
        };
        if comments.is_empty() {
            writer.line(default_comment);
        } else {
            for comment in comments {
                writer.line(comment);
            }
        }
        writer.line(&header.option_line(format));
        writer.line(&columns_line(header.parameter(), format));
        writer
    }

    /// Append one data line with the entries of `pt` in column-major order,
    /// which for a 2-port is S11, S21, S12, S22.
    pub fn push(&mut self, freq: &str, pt: &Point) {
        let mut line = String::from(freq);
        for c in pt.flatten(MatrixOrder::ColumnMajor) {
            for field in self.format.format(c) {
                line.push(' ');
                line.push_str(&field);
            }
        }
        self.line(&line);
        self.points += 1;
    }

    pub fn points(&self) -> usize {
        self.points
    }

    pub fn format(&self) -> ComplexNumberType {
        self.format
    }

    /// Lines joined by `\n`, without a trailing newline.
    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, line: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push_str(line);
    }
}
