//! Error types

use thiserror::Error;

/// Rejected widget configuration. The widget is not created.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("empty item list")]
    EmptyItemList,
    #[error("duplicate id {0} in item list")]
    DuplicateId(i64),
    #[error("invalid initial selection: no item with id {0}")]
    InvalidInitialSelection(i64),
    #[error("invalid mount selector {0:?}")]
    InvalidMountSelector(String),
    #[error("generated markup is missing {0}")]
    MalformedMarkup(&'static str),
    #[error("failed to parse select options: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failure of a single add/delete call. The widget is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("option id {0} is already in use")]
    DuplicateId(i64),
    #[error("the option list cannot become empty")]
    EmptyList,
    #[error("no option with id {0}")]
    NotFound(i64),
    #[error("the select has been deleted")]
    Destroyed,
}
