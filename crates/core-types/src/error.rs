use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Todo title must not be empty or whitespace-only")]
    EmptyTitle,

    #[error("Todo title exceeds the maximum length of {max} characters (got {got})")]
    TitleTooLong { max: usize, got: usize },
}
