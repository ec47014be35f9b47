use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use riboprep_core::errors::CountsError;
use riboprep_core::models::{CountMatrix, CountTable, ExperimentalDesign};

use crate::consts::{DESIGN_FILE_NAME, MATRIX_FILE_NAME};
use crate::files::CountFileGlob;

///
/// Merges a cohort of featureCounts output files into a single read count
/// matrix and derives the experimental design from the sample names:
///
/// | Samples             | Data_Type | Conditions |
/// |---------------------|-----------|------------|
/// | condition1_RNA_rep1 | RNA-Seq   | treated    |
/// | condition1_RPF_rep1 | Ribo-Seq  | treated    |
/// | condition2_RNA_rep1 | RNA-Seq   | control    |
/// | condition2_RPF_rep1 | Ribo-Seq  | control    |
///
/// Each file is folded into the accumulated matrix with an inner join on
/// the gene identifier, so only genes quantified in every sample survive.
/// Classification and the paired-cohort checks run before anything is
/// written; a failing cohort leaves no partial output pair behind.
///
/// # Arguments:
/// - files: discovered count files, in column order
/// - treated_token: substring marking treated samples
/// - control_token: substring marking control samples
/// - output: path to the output folder where both files should go
///
pub fn merge_count_files(
    files: &mut CountFileGlob,
    treated_token: &str,
    control_token: &str,
    output: &Path,
) -> Result<()> {
    let total_files = files.len();

    let pb = ProgressBar::new(total_files as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files ({eta})")?
            .progress_chars("##-"),
    );

    let mut matrix: Option<CountMatrix> = None;

    for file in files {
        let table = CountTable::from_file(&file)
            .with_context(|| format!("There was an error reading count file: {:?}", file))?;

        matrix = Some(match matrix {
            Some(matrix) => matrix.inner_join(table),
            None => CountMatrix::from(table),
        });

        pb.inc(1);
    }

    pb.finish_and_clear();

    let matrix = match matrix {
        Some(matrix) if !matrix.is_empty() => matrix,
        _ => return Err(CountsError::NoCommonGenes.into()),
    };

    let design =
        ExperimentalDesign::from_sample_names(matrix.sample_names(), treated_token, control_token)?;
    design.validate_balance()?;

    fs::create_dir_all(output).with_context(|| {
        format!(
            "There was an error creating the output directory: {:?}",
            output
        )
    })?;

    design.write_to_file(&output.join(DESIGN_FILE_NAME))?;
    matrix.write_to_file(&output.join(MATRIX_FILE_NAME))?;

    Ok(())
}
