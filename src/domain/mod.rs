mod error;
mod params;
mod scrape;
mod validation;

pub use error::AppError;
pub use params::{
    AttestationMode, BuildType, CurationParameters, Distro, cmd_json, parse_env_vars,
    serialize_env_vars,
};
pub use scrape::Measurements;
pub use validation::{Rule, ValidationError, validate};
