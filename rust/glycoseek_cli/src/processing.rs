use super::config::{
    OutputConfig,
    OutputFormat,
};
use crate::errors::CliError;
use glycoseek::scoring::GlycopeptideMatch;
use glycoseek::{
    GlycopeptideScorer,
    PeakSet,
    ScoringJob,
    TheoreticalGlycopeptide,
};
use indicatif::{
    ProgressIterator,
    ProgressStyle,
};
use serde::Serialize;
use std::fs::File;
use std::io::{
    BufWriter,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};
use std::time::Instant;
use tracing::{
    debug,
    info,
    warn,
};

/// One output row, flat so it can be written as csv as well.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRecord {
    pub id: String,
    pub sequence: String,
    pub score: f64,
    pub peptide_score: f64,
    pub glycan_score: f64,
    pub signature_score: f64,
    pub glycan_coverage: f64,
    pub hyperscore: f64,
    pub n_fragment_matches: usize,
    pub n_term_glycosylated: usize,
    pub c_term_glycosylated: usize,
}

impl ScoreRecord {
    fn new(id: &str, candidate: &TheoreticalGlycopeptide, result: &GlycopeptideMatch) -> Self {
        let scores = &result.scores;
        Self {
            id: id.to_string(),
            sequence: candidate.sequence.clone(),
            score: scores.score,
            peptide_score: scores.peptide_score,
            glycan_score: scores.glycan_score,
            signature_score: scores.signature_score,
            glycan_coverage: scores.glycan_coverage,
            hyperscore: scores.hyperscore,
            n_fragment_matches: scores.n_fragment_matches,
            n_term_glycosylated: scores.n_term_glycosylated,
            c_term_glycosylated: scores.c_term_glycosylated,
        }
    }
}

enum ResultWriter {
    NdJson(BufWriter<File>),
    Csv(csv::Writer<File>),
}

impl ResultWriter {
    fn new(path: &Path, format: OutputFormat) -> Result<Self, CliError> {
        let io_err = |e: String| CliError::Io {
            source: e,
            path: Some(path.to_string_lossy().to_string()),
        };
        match format {
            OutputFormat::NdJson => {
                let file = File::create(path).map_err(|e| io_err(e.to_string()))?;
                Ok(ResultWriter::NdJson(BufWriter::new(file)))
            }
            OutputFormat::Csv => {
                let writer = csv::Writer::from_path(path).map_err(|e| io_err(e.to_string()))?;
                Ok(ResultWriter::Csv(writer))
            }
        }
    }

    fn add(&mut self, record: &ScoreRecord) -> Result<(), String> {
        match self {
            ResultWriter::NdJson(w) => {
                serde_json::to_writer(&mut *w, record).map_err(|e| e.to_string())?;
                w.write_all(b"\n").map_err(|e| e.to_string())
            }
            ResultWriter::Csv(w) => w.serialize(record).map_err(|e| e.to_string()),
        }
    }

    fn close(self) -> Result<(), String> {
        match self {
            ResultWriter::NdJson(mut w) => w.flush().map_err(|e| e.to_string()),
            ResultWriter::Csv(mut w) => w.flush().map_err(|e| e.to_string()),
        }
    }
}

pub fn main_loop(
    job: ScoringJob,
    scorer: &GlycopeptideScorer,
    chunk_size: usize,
    output: &OutputConfig,
) -> std::result::Result<(), CliError> {
    let mut chunk_num = 0;
    let mut nqueried = 0;
    let mut nwritten = 0;
    let mut nskipped = 0;
    let start = Instant::now();

    let out_path = output.directory.join(output.format.file_name());
    let mut writer = ResultWriter::new(&out_path, output.format)?;
    let write_err = |e: String| CliError::Io {
        source: e,
        path: Some(out_path.to_string_lossy().to_string()),
    };

    let mut ids = Vec::with_capacity(job.len());
    let mut pairs: Vec<(PeakSet, TheoreticalGlycopeptide)> = Vec::with_capacity(job.len());
    for task in job.tasks.into_iter() {
        if let Err(e) = task.candidate.validate() {
            warn!("Skipping task {}: {}", task.id, e);
            nskipped += 1;
            continue;
        }
        let (id, pair) = task.into_parts();
        ids.push(id);
        pairs.push(pair);
    }

    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
    )
    .map_err(|e| CliError::Config {
        source: e.to_string(),
    })?;

    for (chunk_ids, chunk) in ids
        .chunks(chunk_size)
        .zip(pairs.chunks(chunk_size))
        .progress_with_style(style)
    {
        nqueried += chunk.len();
        // Parallelism happens inside score_batch
        let (results, metrics) = scorer.score_batch(chunk);
        debug!("Chunk {} metrics: {:?}", chunk_num, metrics);
        nskipped += metrics.num_failed;

        let mut records: Vec<ScoreRecord> = results
            .iter()
            .zip(chunk_ids.iter().zip(chunk.iter()))
            .filter_map(|(result, (id, (_, candidate)))| {
                result.as_ref().map(|r| ScoreRecord::new(id, candidate, r))
            })
            .collect();
        records.sort_unstable_by(|x, y| x.score.total_cmp(&y.score));
        if let Some(first) = records.first() {
            debug!("Worst score in chunk: {:#?}", first);
        }
        if let Some(last) = records.last() {
            debug!("Best score in chunk: {:#?}", last);
        }

        for record in records.iter() {
            writer.add(record).map_err(write_err)?;
        }
        nwritten += records.len();
        chunk_num += 1;
    }

    writer.close().map_err(write_err)?;
    info!(
        "Processed {} pairs, wrote {} results, skipped {}",
        nqueried, nwritten, nskipped
    );
    info!(
        "Finished processing {} chunks in {:?}",
        chunk_num,
        start.elapsed()
    );
    Ok(())
}

pub fn process_job(
    path: PathBuf,
    scorer: &GlycopeptideScorer,
    chunk_size: usize,
    output: &OutputConfig,
) -> std::result::Result<(), CliError> {
    info!("Loading scoring job from {:?}", path);
    let st = Instant::now();
    let job = ScoringJob::from_file(&path)?;
    info!(
        "Loading job of length {} took: {:?} for {}",
        job.len(),
        st.elapsed(),
        path.display()
    );

    main_loop(job, scorer, chunk_size, output)
}
