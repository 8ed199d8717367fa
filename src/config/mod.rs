//! Configuration for locating and validating the survey files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::error::util::safe_read_to_string;
use crate::reader::Compression;
use crate::validate::MissingCountPolicy;

/// Configuration for the survey loader and validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// Directory holding the dictionary and data files
    pub data_dir: PathBuf,
    /// Female respondent dictionary file name
    pub resp_dct: String,
    /// Female respondent data file name
    pub resp_dat: String,
    /// Pregnancy dictionary file name
    pub preg_dct: String,
    /// Pregnancy data file name
    pub preg_dat: String,
    /// Compression of the data files
    pub compression: Compression,
    /// How a missing stated pregnancy count is compared
    pub missing_pregnum: MissingCountPolicy,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            resp_dct: "2002FemResp.dct".to_string(),
            resp_dat: "2002FemResp.dat.gz".to_string(),
            preg_dct: "2002FemPreg.dct".to_string(),
            preg_dat: "2002FemPreg.dat.gz".to_string(),
            compression: Compression::Infer,
            missing_pregnum: MissingCountPolicy::default(),
        }
    }
}

impl SurveyConfig {
    /// Config rooted at `data_dir` with the default file names
    #[must_use]
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Load a JSON config; absent keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "reading survey configuration")?;
        Ok(serde_json::from_str(&content)?)
    }

    #[must_use]
    pub fn resp_dct_path(&self) -> PathBuf {
        self.data_dir.join(&self.resp_dct)
    }

    #[must_use]
    pub fn resp_dat_path(&self) -> PathBuf {
        self.data_dir.join(&self.resp_dat)
    }

    #[must_use]
    pub fn preg_dct_path(&self) -> PathBuf {
        self.data_dir.join(&self.preg_dct)
    }

    #[must_use]
    pub fn preg_dat_path(&self) -> PathBuf {
        self.data_dir.join(&self.preg_dat)
    }
}
