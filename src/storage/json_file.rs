//! JSON files under a data directory.
//!
//! `team.json` holds `{ "team": [...] }`, `surveys.json` holds
//! `{ "responses": [...] }`. Survey records are kept as raw JSON so a
//! malformed record is skipped on read but survives every rewrite.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::{RosterSource, SurveyStore};
use crate::error::StoreError;
use crate::models::{Participant, SurveyResponse};

const TEAM_FILE: &str = "team.json";
const SURVEY_FILE: &str = "surveys.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct TeamFile {
    #[serde(default)]
    team: Vec<Participant>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SurveyFile {
    #[serde(default)]
    responses: Vec<Value>,
}

/// File-backed roster and survey store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn team_path(&self) -> PathBuf {
        self.data_dir.join(TEAM_FILE)
    }

    pub fn survey_path(&self) -> PathBuf {
        self.data_dir.join(SURVEY_FILE)
    }

    fn read_survey_file(&self, path: &Path) -> Result<SurveyFile, StoreError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} not found, no responses yet", path.display());
                return Ok(SurveyFile::default());
            }
            Err(e) => {
                return Err(StoreError::ResponseFetchFailure {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                })
            }
        };

        serde_json::from_str(&content).map_err(|e| StoreError::ResponseFetchFailure {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }

    fn write_survey_file(&self, path: &Path, file: &SurveyFile) -> Result<(), StoreError> {
        let write_failure = |source: Box<dyn std::error::Error + Send + Sync>| {
            StoreError::WriteFailure {
                path: path.to_path_buf(),
                source,
            }
        };

        fs::create_dir_all(&self.data_dir).map_err(|e| write_failure(Box::new(e)))?;
        let content =
            serde_json::to_string_pretty(file).map_err(|e| write_failure(Box::new(e)))?;
        replace_file(&self.data_dir, path, content.as_bytes())
            .map_err(|e| write_failure(Box::new(e)))
    }
}

impl RosterSource for JsonFileStore {
    fn fetch_roster(&self) -> Result<Vec<Participant>, StoreError> {
        let path = self.team_path();
        let content = fs::read_to_string(&path).map_err(|e| StoreError::RosterUnavailable {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;

        let team: TeamFile =
            serde_json::from_str(&content).map_err(|e| StoreError::RosterUnavailable {
                reason: format!("cannot parse {}: {}", path.display(), e),
            })?;

        Ok(team.team)
    }
}

impl SurveyStore for JsonFileStore {
    fn fetch_responses(&self) -> Result<Vec<SurveyResponse>, StoreError> {
        let path = self.survey_path();
        let file = self.read_survey_file(&path)?;
        let total = file.responses.len();

        let responses: Vec<SurveyResponse> = file
            .responses
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(response) => Some(response),
                Err(e) => {
                    warn!("Skipping response #{} in {}: {}", index + 1, path.display(), e);
                    None
                }
            })
            .collect();

        debug!(
            "Read {} of {} responses from {}",
            responses.len(),
            total,
            path.display()
        );
        Ok(responses)
    }

    fn append_response(&self, response: &SurveyResponse) -> Result<(), StoreError> {
        let path = self.survey_path();
        let write_failure = |source: Box<dyn std::error::Error + Send + Sync>| {
            StoreError::WriteFailure {
                path: path.clone(),
                source,
            }
        };

        // An unreadable file must not be overwritten with a single response.
        let mut file = self
            .read_survey_file(&path)
            .map_err(|e| write_failure(Box::new(e)))?;
        let record = serde_json::to_value(response).map_err(|e| write_failure(Box::new(e)))?;
        file.responses.push(record);

        self.write_survey_file(&path, &file)?;

        info!("Saved response from {} for {}", response.name, response.week_ending);
        Ok(())
    }

    fn replace_responses(&self, responses: &[SurveyResponse]) -> Result<(), StoreError> {
        let path = self.survey_path();
        let records = responses
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::WriteFailure {
                path: path.clone(),
                source: Box::new(e),
            })?;

        self.write_survey_file(&path, &SurveyFile { responses: records })?;
        info!("Replaced survey data with {} responses", responses.len());
        Ok(())
    }
}

/// Writes `contents` to a temporary file in `dir`, then renames it over
/// `path`. The previous file stays intact until the rename succeeds.
fn replace_file(dir: &Path, path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
