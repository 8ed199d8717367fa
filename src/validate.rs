//! Cross-check of stated pregnancy counts against pregnancy records

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::SurveyConfig;
use crate::error::Result;
use crate::index::PregnancyIndex;
use crate::loader::{PREGNUM, read_fem_preg, read_fem_resp};
use crate::models::{PregnancyRecord, RespondentRecord};
use crate::stats::ValueCounts;

/// How a respondent whose stated count is missing is judged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingCountPolicy {
    /// Not checked
    Skip,
    /// Always a mismatch; a missing count never equals a record count
    #[default]
    Mismatch,
    /// Matches only when the respondent has no pregnancy records
    Zero,
}

/// A respondent whose stated count disagrees with their pregnancy records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PregnumMismatch {
    pub caseid: i64,
    pub stated: Option<i64>,
    pub actual: usize,
}

fn check(
    respondent: &RespondentRecord,
    index: &PregnancyIndex,
    policy: MissingCountPolicy,
) -> Option<PregnumMismatch> {
    let actual = index.count(respondent.caseid);
    let matches = match respondent.pregnum {
        Some(stated) => usize::try_from(stated).is_ok_and(|s| s == actual),
        None => match policy {
            MissingCountPolicy::Skip => true,
            MissingCountPolicy::Mismatch => false,
            MissingCountPolicy::Zero => actual == 0,
        },
    };

    (!matches).then_some(PregnumMismatch {
        caseid: respondent.caseid,
        stated: respondent.pregnum,
        actual,
    })
}

/// True when every respondent's stated count equals their number of pregnancy
/// records. Stops at the first mismatch.
#[must_use]
pub fn validate_pregnum(
    respondents: &[RespondentRecord],
    index: &PregnancyIndex,
    policy: MissingCountPolicy,
) -> bool {
    match respondents.iter().find_map(|r| check(r, index, policy)) {
        Some(mismatch) => {
            debug!(
                "First pregnum mismatch: caseid {} states {:?}, has {} records",
                mismatch.caseid, mismatch.stated, mismatch.actual
            );
            false
        }
        None => true,
    }
}

/// Every mismatching respondent, in respondent order
#[must_use]
pub fn find_pregnum_mismatches(
    respondents: &[RespondentRecord],
    index: &PregnancyIndex,
    policy: MissingCountPolicy,
) -> Vec<PregnumMismatch> {
    respondents
        .iter()
        .filter_map(|r| check(r, index, policy))
        .collect()
}

/// Outcome of a full validation run over the survey files
#[derive(Debug, Clone)]
pub struct PregnumValidation {
    pub valid: bool,
    pub distribution: ValueCounts,
    pub mismatches: Vec<PregnumMismatch>,
}

/// Label of the final stdout line
pub const RESULT_LABEL: &str =
    "Female respondent number of pregnancy is equal to pregnancy responses:";

impl PregnumValidation {
    /// Stdout text: the `pregnum` distribution, then the result line
    #[must_use]
    pub fn report(&self) -> String {
        format!("{}\n{} {}", self.distribution, RESULT_LABEL, self.valid)
    }
}

/// Load both tables from `config` and validate stated pregnancy counts
pub fn validate_pregnum_from_config(config: &SurveyConfig) -> Result<PregnumValidation> {
    let resp = read_fem_resp(config)?;
    let preg = read_fem_preg(config)?;

    let distribution = ValueCounts::from_batch(resp.batch(), PREGNUM)?;

    let respondents = RespondentRecord::from_batch(resp.batch())?;
    let pregnancies = PregnancyRecord::from_batch(preg.batch())?;
    let index = PregnancyIndex::build(&pregnancies);
    info!(
        "Indexed {} pregnancies for {} of {} respondents",
        index.num_rows(),
        index.num_respondents(),
        respondents.len()
    );

    let valid = validate_pregnum(&respondents, &index, config.missing_pregnum);
    let mismatches = if valid {
        Vec::new()
    } else {
        let mismatches = find_pregnum_mismatches(&respondents, &index, config.missing_pregnum);
        warn!("{} respondents disagree with the pregnancy file", mismatches.len());
        mismatches
    };

    Ok(PregnumValidation {
        valid,
        distribution,
        mismatches,
    })
}
