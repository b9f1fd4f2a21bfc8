use crate::format::ComplexNumberType;
use crate::frequency::FrequencyUnit;
use crate::parameter::RFParameter;
use serde::Serialize;
use std::str::FromStr;

pub const DEFAULT_IMPEDANCE: &str = "50";

/// Contents of a Touchstone option line (`# GHz S MA R 50`).
///
/// The reference impedance is kept as the text found in the file so it can
/// be echoed without reformatting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OptionsHeader {
    freq_unit: FrequencyUnit,
    parameter: RFParameter,
    format: ComplexNumberType,
    impedance: String,
}

impl Default for OptionsHeader {
    fn default() -> Self {
        OptionsHeader {
            freq_unit: FrequencyUnit::default(),
            parameter: RFParameter::default(),
            format: ComplexNumberType::default(),
            impedance: DEFAULT_IMPEDANCE.to_string(),
        }
    }
}

impl OptionsHeader {
    /// Parse an option line, leading `#` included.
    ///
    /// Matching is case-insensitive and never fails: unrecognized tokens are
    /// skipped and any field not named on the line keeps its default.
    pub fn parse(line: &str) -> OptionsHeader {
        let mut out = OptionsHeader::default();
        let body = line.trim_start().strip_prefix('#').unwrap_or(line);
        let mut tokens = body.split_whitespace().peekable();

        // position 0 names the unit; anything else there is treated as a flag
        if let Some(first) = tokens.peek() {
            if let Ok(unit) = FrequencyUnit::from_str(first) {
                out.freq_unit = unit;
                tokens.next();
            }
        }

        while let Some(token) = tokens.next() {
            if let Ok(param) = RFParameter::from_str(token) {
                out.parameter = param;
            } else if let Ok(format) = ComplexNumberType::from_str(token) {
                out.format = format;
            } else if token.eq_ignore_ascii_case("r") {
                if let Some(imp) = tokens.next() {
                    out.impedance = imp.to_string();
                }
            } else {
                tracing::trace!(token, "ignoring option token");
            }
        }

        out
    }

    pub fn freq_unit(&self) -> FrequencyUnit {
        self.freq_unit
    }

    pub fn parameter(&self) -> RFParameter {
        self.parameter
    }

    pub fn format(&self) -> ComplexNumberType {
        self.format
    }

    pub fn impedance(&self) -> &str {
        &self.impedance
    }

    /// Option line for output written in `format`, carrying this header's
    /// unit, parameter and reference impedance.
    pub fn option_line(&self, format: ComplexNumberType) -> String {
        format!(
            "# {} {} {} R {}",
            self.freq_unit, self.parameter, format, self.impedance
        )
    }
}
