use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AggregatorError {
    #[error("The entrant roster is empty; nothing to aggregate")]
    EmptyRoster,

    #[error("No recorded gameweeks for entrant '{0}'")]
    EmptyHistory(String),
}
