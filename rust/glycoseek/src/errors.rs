use crate::models::{
    IonParsingError,
    IonSeries,
};
use std::path::PathBuf;

/// Errors raised when a candidate (or a fragment it emits) has a shape
/// that cannot be scored without producing a misleading number.
#[derive(Debug)]
pub enum DataProcessingError {
    InvalidCandidateSize {
        size: usize,
        context: String,
    },
    FragmentPositionOutOfRange {
        fragment: String,
        series: IonSeries,
        position: usize,
        size: usize,
        context: String,
    },
    UnexpectedFragmentKind {
        fragment: String,
        expected: &'static str,
        context: String,
    },
    DuplicatePeakIndex {
        index: u32,
        context: String,
    },
}

#[derive(Debug)]
pub enum InputReadingError {
    JobParsingError {
        source: serde_json::Error,
        context: &'static str,
    },
    FileReadingError {
        source: std::io::Error,
        context: &'static str,
        path: PathBuf,
    },
}

impl DataProcessingError {
    pub fn append_to_context(mut self, context: &str) -> Self {
        match &mut self {
            DataProcessingError::InvalidCandidateSize {
                context: owned_context,
                ..
            } => {
                owned_context.push_str(context);
            }
            DataProcessingError::FragmentPositionOutOfRange {
                context: owned_context,
                ..
            } => {
                owned_context.push_str(context);
            }
            DataProcessingError::UnexpectedFragmentKind {
                context: owned_context,
                ..
            } => {
                owned_context.push_str(context);
            }
            DataProcessingError::DuplicatePeakIndex {
                context: owned_context,
                ..
            } => {
                owned_context.push_str(context);
            }
        }
        self
    }
}

impl std::fmt::Display for DataProcessingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug)]
pub enum GlycoSeekError {
    ParseError {
        msg: String,
    },
    IonParsingError(IonParsingError),
    DataProcessingError(DataProcessingError),
    InputReadingError(InputReadingError),
}

impl std::fmt::Display for GlycoSeekError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for GlycoSeekError {}

pub type Result<T> = std::result::Result<T, GlycoSeekError>;

impl From<serde_json::Error> for GlycoSeekError {
    fn from(val: serde_json::Error) -> Self {
        GlycoSeekError::ParseError {
            msg: val.to_string(),
        }
    }
}

impl From<IonParsingError> for GlycoSeekError {
    fn from(x: IonParsingError) -> Self {
        Self::IonParsingError(x)
    }
}

impl From<DataProcessingError> for GlycoSeekError {
    fn from(x: DataProcessingError) -> Self {
        Self::DataProcessingError(x)
    }
}

impl From<InputReadingError> for GlycoSeekError {
    fn from(x: InputReadingError) -> Self {
        Self::InputReadingError(x)
    }
}
