use regex::Regex;

pub const MR_ENCLAVE_PLACEHOLDER: &str = "<mr_enclave>";
pub const MR_SIGNER_PLACEHOLDER: &str = "<mr_signer>";
pub const ISV_PROD_ID_PLACEHOLDER: &str = "<isv_prod_id>";
pub const ISV_SVN_PLACEHOLDER: &str = "<isv_svn>";

/// Enclave measurement fields scraped from a curation build log.
///
/// Fields the log does not contain keep their placeholder tokens, so the
/// emitted verifier command stays copy-paste-editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurements {
    pub mr_enclave: String,
    pub mr_signer: String,
    pub isv_prod_id: String,
    pub isv_svn: String,
}

impl Default for Measurements {
    fn default() -> Self {
        Self {
            mr_enclave: MR_ENCLAVE_PLACEHOLDER.to_string(),
            mr_signer: MR_SIGNER_PLACEHOLDER.to_string(),
            isv_prod_id: ISV_PROD_ID_PLACEHOLDER.to_string(),
            isv_svn: ISV_SVN_PLACEHOLDER.to_string(),
        }
    }
}

impl Measurements {
    /// Scrape measurements out of the signing tool's output; first match wins.
    pub fn from_log(contents: &str) -> Self {
        let mut measurements = Self::default();
        if let Some(value) = first_capture(contents, r#"mr_enclave = "(.*)""#) {
            measurements.mr_enclave = value;
        }
        if let Some(value) = first_capture(contents, r#"mr_signer = "(.*)""#) {
            measurements.mr_signer = value;
        }
        if let Some(value) = first_capture(contents, r"isv_prod_id = (.*)") {
            measurements.isv_prod_id = value;
        }
        if let Some(value) = first_capture(contents, r"isv_svn = (.*)") {
            measurements.isv_svn = value;
        }
        measurements
    }
}

fn first_capture(text: &str, pattern: &str) -> Option<String> {
    if let Ok(re) = Regex::new(pattern) {
        return re.captures(text).map(|c| c[1].trim().to_string());
    }
    None
}
