use crate::errors::InputReadingError;
use crate::models::{
    PeakSet,
    TheoreticalGlycopeptide,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::io::{
    BufRead,
    BufReader,
    Read,
};
use std::path::{
    Path,
    PathBuf,
};
use tracing::{
    debug,
    info,
};

/// One observed spectrum and the candidate it should be scored against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringTask {
    pub id: String,
    pub peaks: PeakSet,
    pub candidate: TheoreticalGlycopeptide,
}

impl ScoringTask {
    pub fn into_parts(self) -> (String, (PeakSet, TheoreticalGlycopeptide)) {
        (self.id, (self.peaks, self.candidate))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobFormat {
    Json,
    JsonZstd,
    NdJson,
    NdJsonZstd,
    MessagePack,
    MessagePackZstd,
}

const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

impl JobFormat {
    pub fn detect_from_path(path: &Path) -> Result<Self, InputReadingError> {
        let path_str = path.to_string_lossy().to_lowercase();

        if path_str.ends_with(".msgpack.zst") {
            Ok(JobFormat::MessagePackZstd)
        } else if path_str.ends_with(".msgpack") {
            Ok(JobFormat::MessagePack)
        } else if path_str.ends_with(".ndjson.zst") {
            Ok(JobFormat::NdJsonZstd)
        } else if path_str.ends_with(".ndjson") {
            Ok(JobFormat::NdJson)
        } else if path_str.ends_with(".json.zst") {
            Ok(JobFormat::JsonZstd)
        } else if path_str.ends_with(".json") {
            Ok(JobFormat::Json)
        } else {
            Self::detect_from_content(path)
        }
    }

    /// Sniffs the leading bytes, looking inside zstd frames for the
    /// compressed payload's own layout.
    fn detect_from_content(path: &Path) -> Result<Self, InputReadingError> {
        let read_err = |e: std::io::Error| InputReadingError::FileReadingError {
            source: e,
            context: "Error reading file for format detection",
            path: PathBuf::from(path),
        };
        let file =
            std::fs::File::open(path).map_err(|e| InputReadingError::FileReadingError {
                source: e,
                context: "Error opening file for format detection",
                path: PathBuf::from(path),
            })?;

        let mut reader = BufReader::new(file);
        let mut buffer = [0u8; 64];
        let bytes_read = read_prefix(&mut reader, &mut buffer).map_err(read_err)?;
        if bytes_read < 4 || buffer[0..4] != ZSTD_MAGIC {
            return Ok(Self::from_leading_bytes(&buffer[..bytes_read]));
        }

        let file = std::fs::File::open(path).map_err(read_err)?;
        let mut decoder = zstd::Decoder::new(file).map_err(read_err)?;
        let bytes_read = read_prefix(&mut decoder, &mut buffer).map_err(read_err)?;
        let out = match Self::from_leading_bytes(&buffer[..bytes_read]) {
            JobFormat::Json => JobFormat::JsonZstd,
            JobFormat::NdJson => JobFormat::NdJsonZstd,
            _ => JobFormat::MessagePackZstd,
        };
        Ok(out)
    }

    fn from_leading_bytes(buffer: &[u8]) -> Self {
        let first = buffer.iter().copied().find(|b| !b.is_ascii_whitespace());
        match first {
            Some(b'[') => JobFormat::Json,
            Some(b'{') | None => JobFormat::NdJson,
            Some(_) => JobFormat::MessagePack,
        }
    }
}

/// Fills as much of `buffer` as the reader allows.
fn read_prefix<R: Read>(reader: &mut R, buffer: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

/// All the tasks of one input file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringJob {
    pub tasks: Vec<ScoringTask>,
}

impl ScoringJob {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn from_file(path: &Path) -> Result<Self, InputReadingError> {
        let format = JobFormat::detect_from_path(path)?;
        info!("Reading scoring job from {:?} as {:?}", path, format);

        let file = std::fs::File::open(path).map_err(|e| InputReadingError::FileReadingError {
            source: e,
            context: "Error opening scoring job",
            path: PathBuf::from(path),
        })?;
        let zstd_err = |e: std::io::Error| InputReadingError::FileReadingError {
            source: e,
            context: "Error creating ZSTD decoder",
            path: PathBuf::from(path),
        };

        let out = match format {
            JobFormat::Json => Self::from_reader(BufReader::new(file)),
            JobFormat::JsonZstd => {
                let decoder = zstd::Decoder::new(file).map_err(zstd_err)?;
                Self::from_reader(BufReader::new(decoder))
            }
            JobFormat::NdJson => Self::from_ndjson(BufReader::new(file)),
            JobFormat::NdJsonZstd => {
                let decoder = zstd::Decoder::new(file).map_err(zstd_err)?;
                Self::from_ndjson(BufReader::new(decoder))
            }
            JobFormat::MessagePack => Self::from_msgpack(BufReader::new(file)),
            JobFormat::MessagePackZstd => {
                let decoder = zstd::Decoder::new(file).map_err(zstd_err)?;
                Self::from_msgpack(decoder)
            }
        }?;
        debug!("Read {} scoring tasks from {:?}", out.len(), path);
        Ok(out)
    }

    /// Parses a JSON array of tasks.
    pub fn from_json(content: &str) -> Result<Self, InputReadingError> {
        serde_json::from_str(content).map_err(|e| InputReadingError::JobParsingError {
            source: e,
            context: "Error parsing JSON scoring job",
        })
    }

    fn from_reader<R: Read>(reader: R) -> Result<Self, InputReadingError> {
        serde_json::from_reader(reader).map_err(|e| InputReadingError::JobParsingError {
            source: e,
            context: "Error parsing JSON scoring job",
        })
    }

    /// One task per line, blank lines are skipped.
    pub fn from_ndjson<R: BufRead>(reader: R) -> Result<Self, InputReadingError> {
        let mut tasks = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| InputReadingError::FileReadingError {
                source: e,
                context: "Error reading line",
                path: PathBuf::new(),
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let task: ScoringTask =
                serde_json::from_str(&line).map_err(|e| InputReadingError::JobParsingError {
                    source: e,
                    context: "Error parsing NDJSON line",
                })?;
            tasks.push(task);
        }
        Ok(Self { tasks })
    }

    /// A stream of MessagePack encoded tasks, one after the other.
    fn from_msgpack<R: Read>(reader: R) -> Result<Self, InputReadingError> {
        let tasks = MessagePackReader::new(reader).collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tasks })
    }
}

struct MessagePackReader<R: Read> {
    deserializer: rmp_serde::Deserializer<rmp_serde::decode::ReadReader<R>>,
}

impl<R: Read> MessagePackReader<R> {
    fn new(reader: R) -> Self {
        Self {
            deserializer: rmp_serde::Deserializer::new(reader),
        }
    }
}

impl<R: Read> Iterator for MessagePackReader<R> {
    type Item = Result<ScoringTask, InputReadingError>;

    fn next(&mut self) -> Option<Self::Item> {
        match ScoringTask::deserialize(&mut self.deserializer) {
            Ok(task) => Some(Ok(task)),
            Err(rmp_serde::decode::Error::InvalidMarkerRead(ref io_err))
                if io_err.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                None
            }
            Err(rmp_serde::decode::Error::InvalidDataRead(ref io_err))
                if io_err.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                None
            }
            Err(e) => Some(Err(InputReadingError::JobParsingError {
                source: serde_json::Error::io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    e,
                )),
                context: "Error decoding MessagePack scoring task",
            })),
        }
    }
}
