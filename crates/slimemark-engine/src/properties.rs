//! Loading and saving [`DocumentProperties`] from YAML front matter.

use std::path::Path;

use crate::io::{self, IoError};
use crate::models::DocumentProperties;
use crate::parsing::front_matter;

#[derive(Debug, thiserror::Error)]
pub enum PropertiesError {
    #[error("Failed to serialize document properties: {0}")]
    Serialize(#[from] serde_yaml::Error),
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Reads the properties from the front matter at the start of `text`.
///
/// Returns `None` when there is no front matter or it does not deserialize.
pub fn load(text: &str) -> Option<DocumentProperties> {
    let yaml = front_matter::extract(text)?;
    match serde_yaml::from_str::<DocumentProperties>(yaml) {
        Ok(props) => Some(props),
        Err(e) => {
            log::debug!("Ignoring malformed front matter: {e}");
            None
        }
    }
}

/// Serializes the properties as YAML with camelCase keys.
pub fn serialize(props: &DocumentProperties) -> Result<String, PropertiesError> {
    Ok(serde_yaml::to_string(props)?)
}

/// The properties wrapped in an HTML comment, for embedding in output.
pub fn comment(props: &DocumentProperties) -> Result<String, PropertiesError> {
    Ok(format!("<!-- \n{}\n-->", serialize(props)?))
}

pub fn save_to_file(path: &Path, props: &DocumentProperties) -> Result<(), PropertiesError> {
    let yaml = serialize(props)?;
    io::write_file(path, &yaml)?;
    log::info!("Saved document properties to {}", path.display());
    Ok(())
}
