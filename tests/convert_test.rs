use float_cmp::{approx_eq, F64Margin};
use num_complex::{c64, Complex64};
use rfconvert::ordering::detect_order;
use rfconvert::prelude::*;
use std::fs;

const MARGIN: F64Margin = F64Margin {
    epsilon: 1e-9,
    ulps: 4,
};

fn read(filename: &str) -> String {
    fs::read_to_string(filename).unwrap()
}

fn data_lines(text: &str) -> Vec<&str> {
    text.lines()
        .filter(|line| !line.starts_with('!') && !line.starts_with('#'))
        .collect()
}

// Sij = Sji for every pair, written column-major
fn reciprocal_text(nports: usize, records: usize) -> String {
    let mut text = String::from("# GHz S RI R 50\n");
    for f in 0..records {
        let mut line = format!("{}", f + 1);
        for (row, col) in MatrixOrder::ColumnMajor.indices(nports) {
            let (i, j) = (row.min(col), row.max(col));
            let v = (i * nports + j + 1) as f64 / 10.0 + f as f64;
            line.push_str(&format!(" {} {}", v, -v / 2.0));
        }
        text.push_str(&line);
        text.push('\n');
    }
    text
}

#[test]
fn test_extract_three_port() {
    let text = read("./data/test.s3p");
    let out = convert_nport_to_two_port(&text, 3, 1, 3, &NPortOptions::new()).unwrap();
    assert_eq!(out.points, 2);
    assert_eq!(out.format, ComplexNumberType::ReIm);

    let lines: Vec<&str> = out.text.lines().collect();
    assert_eq!(lines[0], "! 3-port coupler fixture");
    assert_eq!(lines[1], "! Z0 = 50 ohm");
    assert_eq!(lines[2], "# GHz S RI R 50");
    assert!(lines[3].starts_with("! Columns: freq Re(S11) Im(S11) Re(S21)"));
    assert_eq!(
        lines[4],
        "1.0 0.100000 0.010000 0.300000 0.030000 0.300000 0.030000 0.600000 0.060000"
    );
    assert_eq!(
        lines[5],
        "2.0 -0.100000 -0.100000 0.000000 0.700000 0.000000 0.700000 -0.300000 -0.300000"
    );
    assert_eq!(lines.len(), 6);
}

#[test]
fn test_extract_port_pair_positions() {
    let text = read("./data/test.s3p");
    let asm = RecordAssembler::new(&text, 3);
    let rec = asm.records().next().unwrap();
    let full = Point::from_record(&rec, 3, ComplexNumberType::ReIm, MatrixOrder::ColumnMajor)
        .unwrap();
    let sub = full.two_port(1, 3).unwrap();
    assert_eq!(sub[(0, 0)], full[(0, 0)]);
    assert_eq!(sub[(1, 0)], full[(2, 0)]);
    assert_eq!(sub[(0, 1)], full[(0, 2)]);
    assert_eq!(sub[(1, 1)], full[(2, 2)]);
    assert_eq!(full[(1, 2)], c64(0.5, 0.05));
}

#[test]
fn test_reciprocal_network_detects_column_major() {
    let text = reciprocal_text(4, 8);
    let asm = RecordAssembler::new(&text, 4);
    let scores = detect_order(&asm, ComplexNumberType::ReIm).unwrap();
    assert_eq!(scores.samples, 6);
    assert!(scores.column <= scores.row);
    assert_eq!(scores.column, 0.0);
    assert_eq!(scores.choice(), MatrixOrder::ColumnMajor);

    let opts = NPortOptions::new().ordering(OrderMode::Auto);
    let out = convert_nport_to_two_port(&text, 4, 2, 4, &opts).unwrap();
    assert_eq!(out.order, MatrixOrder::ColumnMajor);
    assert_eq!(out.points, 8);
    assert_eq!(
        out.preview,
        "Ordering chosen: col (requested: auto) - format: RI - points: 8"
    );
}

#[test]
fn test_row_major_swaps_off_diagonal() {
    let rec = Record::new("1", vec!["0.1", "0", "0.2", "0", "0.3", "0", "0.4", "0"]);
    let col = Point::from_record(&rec, 2, ComplexNumberType::ReIm, MatrixOrder::ColumnMajor)
        .unwrap();
    let row = Point::from_record(&rec, 2, ComplexNumberType::ReIm, MatrixOrder::RowMajor).unwrap();
    assert_eq!(col[(1, 0)], c64(0.2, 0.0));
    assert_eq!(col[(0, 1)], c64(0.3, 0.0));
    assert_eq!(row[(1, 0)], c64(0.3, 0.0));
    assert_eq!(row[(0, 1)], c64(0.2, 0.0));
    assert_eq!(row, col.t());
}

#[test]
fn test_row_major_extract() {
    let text = "# GHz S RI R 50\n1 1 0 2 0 3 0 4 0\n";
    let col = convert_nport_to_two_port(text, 2, 1, 2, &NPortOptions::new()).unwrap();
    let row = convert_nport_to_two_port(
        text,
        2,
        1,
        2,
        &NPortOptions::new().ordering(OrderMode::Row),
    )
    .unwrap();
    assert_eq!(
        data_lines(&col.text),
        vec!["1 1.000000 0.000000 2.000000 0.000000 3.000000 0.000000 4.000000 0.000000"]
    );
    assert_eq!(
        data_lines(&row.text),
        vec!["1 1.000000 0.000000 3.000000 0.000000 2.000000 0.000000 4.000000 0.000000"]
    );
    assert_eq!(row.order, MatrixOrder::RowMajor);
    assert!(row.scores.is_none());
}

#[test]
fn test_ri_ma_round_trip() {
    let c = Complex64::new(1.0, -1.0);
    let (mag, ang) = ComplexNumberType::MagAng.split(c);
    assert!((mag - 1.4142136).abs() < 1e-7);
    assert!(approx_eq!(f64, ang, -45.0, MARGIN));
    let back = ComplexNumberType::MagAng.parse(mag, ang);
    assert!((back.re - 1.0).abs() < 1e-9);
    assert!((back.im + 1.0).abs() < 1e-9);
}

#[test]
fn test_db_floor() {
    let (db, _) = ComplexNumberType::Db.split(Complex64::new(0.0, 0.0));
    assert_eq!(db, DB_FLOOR);
    assert_eq!(db, -300.0);
}

#[test]
fn test_continuation_requires_indent() {
    let text = read("./data/test_short.s2p");
    let asm = RecordAssembler::new(&text, 2);
    let records: Vec<Record> = asm.records().collect();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].freq(), "1.0");
    assert_eq!(records[0].len(), 8);
    assert_eq!(records[1].freq(), "2.0");
    assert_eq!(records[1].len(), 4);
    assert_eq!(records[2].freq(), "0.5");

    let err = convert_nport_to_two_port(&text, 2, 1, 2, &NPortOptions::new()).unwrap_err();
    assert_eq!(
        err,
        ConvertError::IncompleteRecord {
            freq: "2.0".to_string(),
            expected: 8,
            found: 4,
        }
    );
}

#[test]
fn test_six_of_eight_values() {
    let text = "# GHz S RI R 50\n1.5 1 2 3 4 5 6\n";
    let err = convert_two_port_representation(text, &TwoPortOptions::new()).unwrap_err();
    assert_eq!(
        err,
        ConvertError::IncompleteRecord {
            freq: "1.5".to_string(),
            expected: 8,
            found: 6,
        }
    );
    assert_eq!(
        err.to_string(),
        "frequency line 1.5 is incomplete: expected 8 values, found 6"
    );
}

#[test]
fn test_retarget_ma_to_db() {
    let text = read("./data/test_ma.s2p");
    let out = convert_two_port_representation(&text, &TwoPortOptions::new()).unwrap();
    assert_eq!(out.points, 2);
    assert_eq!(out.format, ComplexNumberType::MagAng);
    assert_eq!(out.target, ComplexNumberType::Db);
    let header = out.header.unwrap();
    assert_eq!(header.freq_unit(), FrequencyUnit::MHz);

    let lines: Vec<&str> = out.text.lines().collect();
    assert_eq!(lines[0], "! amplifier fixture");
    assert_eq!(lines[1], "# MHz S DB R 50");
    assert_eq!(
        lines[3],
        "100 -6.020600 -45.000000 6.020600 90.000000 -20.000000 0.000000 -6.020600 180.000000"
    );
    let fields: Vec<&str> = lines[4].split_whitespace().collect();
    assert_eq!(fields[0], "200");
    assert_eq!(&fields[3..5], &["-300.000000", "0.000000"]);
    assert_eq!(&fields[5..7], &["-40.000000", "-90.000000"]);
    assert_eq!(fields[7], "-1.938200");
}

#[test]
fn test_retarget_ma_to_ri() {
    let text = read("./data/test_ma.s2p");
    let opts = TwoPortOptions::new().target(ComplexNumberType::ReIm);
    let out = convert_two_port_representation(&text, &opts).unwrap();
    let lines = data_lines(&out.text);
    assert!(lines[0].starts_with("100 0.353553 -0.353553 0.000000 2.000000 0.100000 0.000000"));
    assert!(lines[1].starts_with("200 1.000000 0.000000 0.000000 0.000000"));
    assert!(out.text.contains("# MHz S RI R 50"));
}

#[test]
fn test_extract_reads_db_input() {
    let text = "# Hz S DB R 50\n1 0 0 -20 90 -20 90 -6 0\n";
    let out = convert_nport_to_two_port(text, 2, 1, 2, &NPortOptions::new()).unwrap();
    assert_eq!(out.format, ComplexNumberType::Db);
    assert_eq!(
        data_lines(&out.text),
        vec!["1 1.000000 0.000000 0.000000 0.100000 0.000000 0.100000 0.501187 0.000000"]
    );
    assert!(out.text.contains("# Hz S RI R 50"));
}

#[test]
fn test_summary_json() {
    let text = read("./data/test.s3p");
    let out = convert_nport_to_two_port(&text, 3, 2, 3, &NPortOptions::new()).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["points"], 2);
    assert_eq!(json["order"], "ColumnMajor");
    assert_eq!(json["format"], "ReIm");
    assert!(json.get("text").is_none());
}

#[test]
fn test_retarget_huge_magnitude() {
    let text = "# Hz S RI R 50\n1 1e200 0 0 0 0 0 1e200 0\n";
    let out = convert_two_port_representation(text, &TwoPortOptions::new()).unwrap();
    assert_eq!(
        data_lines(&out.text),
        vec!["1 4000.000000 0.000000 -300.000000 0.000000 -300.000000 0.000000 4000.000000 0.000000"]
    );
}

#[test]
fn test_prelude_leaves_std_result() {
    let parsed: Result<OrderMode, _> = "auto".parse::<OrderMode>();
    assert_eq!(parsed.unwrap(), OrderMode::Auto);
    let failed: Result<NPortConversion, ConvertError> =
        convert_nport_to_two_port("", 2, 1, 2, &NPortOptions::new());
    assert_eq!(failed.unwrap_err(), ConvertError::InputMissing);
}
