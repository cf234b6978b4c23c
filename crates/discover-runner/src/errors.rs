use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Year is required")]
    MissingYear,

    #[error("invalid url format")]
    InvalidUrl(#[from] discover_model::ModelError),

    #[error("{0}")]
    ChangeLog(String),

    #[error("no captures of {url} for year {year}")]
    NoCaptures { url: String, year: String },
}
