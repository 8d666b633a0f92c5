use glycoseek::errors::InputReadingError;

#[derive(Debug)]
pub enum CliError {
    Config {
        source: String,
    },
    ParseError {
        msg: String,
    },
    Io {
        source: String,
        path: Option<String>,
    },
    DataReading {
        source: String,
    },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Config { source } => write!(f, "Error interpreting the config: {}", source),
            CliError::ParseError { msg } => write!(f, "Error parsing config: {}", msg),
            CliError::Io { source, path } => {
                if let Some(path) = path {
                    write!(f, "Error accessing file {}: {}", path, source)
                } else {
                    write!(f, "Error accessing file: {}", source)
                }
            }
            CliError::DataReading { source } => write!(f, "Error reading data: {}", source),
        }
    }
}

impl From<InputReadingError> for CliError {
    fn from(e: InputReadingError) -> Self {
        match e {
            InputReadingError::FileReadingError {
                source,
                context,
                path,
            } => CliError::Io {
                source: format!("{}: {}", context, source),
                path: Some(path.to_string_lossy().to_string()),
            },
            InputReadingError::JobParsingError { source, context } => CliError::DataReading {
                source: format!("{}: {}", context, source),
            },
        }
    }
}
