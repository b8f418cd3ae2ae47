#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("No input given and stdin is empty")]
    EmptyInput,

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}
