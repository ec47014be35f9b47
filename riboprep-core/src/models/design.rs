use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{CountsError, Result};

/// Substring marking RNA sequencing samples.
pub const RNA_MARKER: &str = "RNA";

/// Substring marking ribosome protected fragment samples.
pub const RIBO_MARKER: &str = "RPF";

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AssayType {
    RnaSeq,
    RiboSeq,
}

impl AssayType {
    ///
    /// Classify a sample name by assay marker. The RNA test runs first, so
    /// a name carrying both markers classifies as RNA-Seq.
    ///
    pub fn classify(sample: &str) -> Result<Self> {
        if sample.contains(RNA_MARKER) {
            Ok(AssayType::RnaSeq)
        } else if sample.contains(RIBO_MARKER) {
            Ok(AssayType::RiboSeq)
        } else {
            Err(CountsError::UnclassifiedAssay {
                sample: sample.to_string(),
            })
        }
    }
}

impl Display for AssayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssayType::RnaSeq => write!(f, "RNA-Seq"),
            AssayType::RiboSeq => write!(f, "Ribo-Seq"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Condition {
    Treated,
    Control,
}

impl Condition {
    ///
    /// Classify a sample name by condition marker. The treated test runs
    /// first, so a name carrying both markers classifies as treated.
    ///
    /// # Arguments:
    /// - sample: the bare sample name.
    /// - treated_token: substring marking treated samples.
    /// - control_token: substring marking control samples.
    ///
    pub fn classify(sample: &str, treated_token: &str, control_token: &str) -> Result<Self> {
        if sample.contains(treated_token) {
            Ok(Condition::Treated)
        } else if sample.contains(control_token) {
            Ok(Condition::Control)
        } else {
            Err(CountsError::UnclassifiedCondition {
                sample: sample.to_string(),
                treated: treated_token.to_string(),
                control: control_token.to_string(),
            })
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Treated => write!(f, "treated"),
            Condition::Control => write!(f, "control"),
        }
    }
}

/// One row of the experimental design table.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleRecord {
    pub sample: String,
    pub assay_type: AssayType,
    pub condition: Condition,
}

///
/// ExperimentalDesign struct, the per-sample assay type and condition
/// assignments in count matrix column order.
///
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExperimentalDesign {
    records: Vec<SampleRecord>,
}

impl ExperimentalDesign {
    ///
    /// Classify every sample name, in order. Fails on the first name that
    /// matches neither marker of either axis; a sample is never silently
    /// dropped, so the design rows always line up with the matrix columns.
    ///
    pub fn from_sample_names<S: AsRef<str>>(
        samples: &[S],
        treated_token: &str,
        control_token: &str,
    ) -> Result<Self> {
        let mut records: Vec<SampleRecord> = Vec::with_capacity(samples.len());

        for sample in samples {
            let sample = sample.as_ref();
            records.push(SampleRecord {
                sample: sample.to_string(),
                assay_type: AssayType::classify(sample)?,
                condition: Condition::classify(sample, treated_token, control_token)?,
            });
        }

        Ok(ExperimentalDesign { records })
    }

    ///
    /// Check the paired-cohort invariant: every treated sample has a
    /// control partner, and every RNA-Seq sample has a Ribo-Seq partner.
    ///
    pub fn validate_balance(&self) -> Result<()> {
        let treated = self
            .records
            .iter()
            .filter(|record| record.condition == Condition::Treated)
            .count();
        let control = self.records.len() - treated;

        if treated != control {
            return Err(CountsError::UnbalancedConditions { treated, control });
        }

        let rna = self
            .records
            .iter()
            .filter(|record| record.assay_type == AssayType::RnaSeq)
            .count();
        let ribo = self.records.len() - rna;

        if rna != ribo {
            return Err(CountsError::UnbalancedAssays { rna, ribo });
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    ///
    /// Write the design as a comma-separated file with the header
    /// `Samples,Data_Type,Conditions`, one row per sample in matrix
    /// column order.
    ///
    /// # Arguments:
    /// - path: destination path for the design file.
    ///
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "Samples,Data_Type,Conditions")?;

        for record in &self.records {
            writeln!(
                writer,
                "{},{},{}",
                record.sample, record.assay_type, record.condition
            )?;
        }

        writer.flush()?;

        Ok(())
    }
}
