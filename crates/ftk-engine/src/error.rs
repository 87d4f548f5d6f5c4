use ftk_remote::RemoteError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Page '{0}' doesn't exist")]
    PageNotFound(String),

    #[error("Component '{0}' doesn't exist")]
    ComponentNotFound(String),

    #[error("No SVG export found for '{0}'")]
    MissingExport(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
