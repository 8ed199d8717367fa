//! Fixture builders for the integration tests
//!
//! Writes reduced NSFG dictionaries and gzip-compressed fixed-width data files
//! into a temporary directory laid out like the real survey release.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use nsfg_reader::SurveyConfig;
use tempfile::TempDir;

pub const RESP_DCT: &str = r#"infile dictionary {
    _column(1)      str12        caseid  %12s  "RESPONDENT ID NUMBER"
    _column(13)     byte        rscrinf  %1f  "WHETHER R IS SCREENER INFORMANT"
    _column(14)     byte        pregnum  %2f  "CC-3 TOTAL NUMBER OF PREGNANCIES"
}
"#;

pub const PREG_DCT: &str = r#"infile dictionary {
    _column(1)      str12        caseid  %12s  "RESPONDENT ID NUMBER"
    _column(13)     byte       pregordr  %2f  "PREGNANCY ORDER (NUMBER)"
    _column(15)     byte        outcome  %1f  "PREGNANCY OUTCOME"
    _column(16)     byte    birthwgt_lb  %2f  "BD-3 BIRTHWEIGHT IN POUNDS - 1ST BABY"
    _column(18)     byte    birthwgt_oz  %2f  "BD-3 BIRTHWEIGHT IN OUNCES - 1ST BABY"
    _column(20)     int         agepreg  %4f  "AGE AT PREGNANCY OUTCOME"
}
"#;

/// Respondent row: identifier and stated count (`None` leaves the field blank)
#[derive(Debug, Clone, Copy)]
pub struct Resp(pub i64, pub Option<i64>);

/// Pregnancy row: identifier, order, outcome, pounds, ounces, age in centiyears
#[derive(Debug, Clone, Copy)]
pub struct Preg(pub i64, pub i64, pub i64, pub i64, pub i64, pub i64);

impl Preg {
    /// A live birth with an ordinary weight
    pub fn live(caseid: i64, order: i64) -> Self {
        Self(caseid, order, 1, 7, 8, 2575)
    }
}

fn resp_line(r: &Resp) -> String {
    let pregnum = r.1.map_or_else(|| "  ".to_string(), |n| format!("{n:>2}"));
    format!("{:>12}1{}", r.0, pregnum)
}

fn preg_line(p: &Preg) -> String {
    format!("{:>12}{:>2}{:>1}{:>2}{:>2}{:>4}", p.0, p.1, p.2, p.3, p.4, p.5)
}

pub fn write_gz(path: &Path, lines: &[String]) {
    let file = File::create(path).expect("create data file");
    let mut encoder = GzEncoder::new(file, Compression::default());
    for line in lines {
        writeln!(encoder, "{line}").expect("write data line");
    }
    encoder.finish().expect("finish gzip stream");
}

/// Write both tables with the default NSFG file names; returns the directory
pub fn write_survey(resp: &[Resp], preg: &[Preg]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(dir.path().join("2002FemResp.dct"), RESP_DCT).expect("write resp dct");
    std::fs::write(dir.path().join("2002FemPreg.dct"), PREG_DCT).expect("write preg dct");

    let resp_lines: Vec<String> = resp.iter().map(resp_line).collect();
    write_gz(&dir.path().join("2002FemResp.dat.gz"), &resp_lines);

    let preg_lines: Vec<String> = preg.iter().map(preg_line).collect();
    write_gz(&dir.path().join("2002FemPreg.dat.gz"), &preg_lines);

    dir
}

pub fn config_for(dir: &TempDir) -> SurveyConfig {
    SurveyConfig::with_data_dir(dir.path())
}
