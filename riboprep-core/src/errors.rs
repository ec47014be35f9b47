use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CountsError {
    #[error("Can't read file: {0}")]
    FileRead(String),

    #[error(
        "Found {found} count file(s) matching '{pattern}'; at least {required} are required (2 replicates x 2 conditions x 2 assay types)"
    )]
    TooFewCountFiles {
        pattern: String,
        found: usize,
        required: usize,
    },

    #[error("Count file has no header line: {path}")]
    MissingHeader { path: PathBuf },

    #[error("Missing required column '{column}' in count file: {path}")]
    MissingColumn { column: &'static str, path: PathBuf },

    #[error("Expected exactly one sample column in count file {path}, found {found}")]
    SampleColumnCount { path: PathBuf, found: usize },

    #[error("Line {line} of {path} has {found} fields, expected {expected}")]
    MalformedRow {
        path: PathBuf,
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error("Can't parse read count '{value}' at line {line} of {path}")]
    InvalidCount {
        path: PathBuf,
        line: usize,
        value: String,
    },

    #[error("Duplicate gene identifier '{gene_id}' in count file: {path}")]
    DuplicateGeneId { path: PathBuf, gene_id: String },

    #[error("No gene identifiers are shared by all count files")]
    NoCommonGenes,

    #[error(
        "Sample '{sample}' matches neither the treated marker '{treated}' nor the control marker '{control}'"
    )]
    UnclassifiedCondition {
        sample: String,
        treated: String,
        control: String,
    },

    #[error("Sample '{sample}' contains neither an 'RNA' nor an 'RPF' marker")]
    UnclassifiedAssay { sample: String },

    #[error(
        "The number of samples for each condition must be equal: found {treated} treated and {control} control"
    )]
    UnbalancedConditions { treated: usize, control: usize },

    #[error(
        "Each sample needs a count file from both assays: found {rna} RNA-Seq and {ribo} Ribo-Seq"
    )]
    UnbalancedAssays { rna: usize, ribo: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for riboprep-core operations.
pub type Result<T> = std::result::Result<T, CountsError>;
