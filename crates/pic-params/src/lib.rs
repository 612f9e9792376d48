//! pic-params: simulation parameter files and their validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_params};

pub type ParamsResult<T> = Result<T, ParamsError>;

#[derive(thiserror::Error, Debug)]
pub enum ParamsError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> ParamsResult<SimParams> {
    let params: SimParams = serde_yaml::from_str(content)?;
    validate_params(&params)?;
    Ok(params)
}

pub fn load_yaml(path: &std::path::Path) -> ParamsResult<SimParams> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, params: &SimParams) -> ParamsResult<()> {
    validate_params(params)?;
    let content = serde_yaml::to_string(params)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ParamsResult<SimParams> {
    let content = std::fs::read_to_string(path)?;
    let params: SimParams = serde_json::from_str(&content)?;
    validate_params(&params)?;
    Ok(params)
}

pub fn save_json(path: &std::path::Path, params: &SimParams) -> ParamsResult<()> {
    validate_params(params)?;
    let content = serde_json::to_string_pretty(params)?;
    std::fs::write(path, content)?;
    Ok(())
}
