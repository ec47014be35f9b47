use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rstest::*;
use tempfile::TempDir;

use riboprep_core::errors::CountsError;
use riboprep_merge::consts::{DESIGN_FILE_NAME, MATRIX_FILE_NAME};
use riboprep_merge::{CountFileGlob, merge_count_files};

#[fixture]
fn path_to_counts() -> &'static str {
    "tests/data/counts"
}

#[fixture]
fn path_to_incomplete_counts() -> &'static str {
    "tests/data/counts_incomplete"
}

#[fixture]
fn path_to_unbalanced_counts() -> &'static str {
    "tests/data/counts_unbalanced"
}

#[fixture]
fn path_to_disjoint_counts() -> &'static str {
    "tests/data/counts_disjoint"
}

#[rstest]
fn test_minimum_file_gate(path_to_incomplete_counts: &str) {
    let result = CountFileGlob::new(Path::new(path_to_incomplete_counts));

    let err = result.err().unwrap();
    let err = err.downcast_ref::<CountsError>().unwrap();

    assert!(matches!(
        err,
        CountsError::TooFewCountFiles {
            found: 3,
            required: 8,
            ..
        }
    ));
}

#[rstest]
fn test_full_cohort_passes_the_gate(path_to_counts: &str) {
    let files = CountFileGlob::new(Path::new(path_to_counts)).unwrap();

    assert_eq!(files.len(), 8);
}

#[rstest]
fn test_discovery_is_sorted(path_to_counts: &str) {
    let files: Vec<PathBuf> = CountFileGlob::new(Path::new(path_to_counts))
        .unwrap()
        .collect();

    let mut sorted = files.clone();
    sorted.sort();

    assert_eq!(files, sorted);
}

#[rstest]
fn test_merge_end_to_end(path_to_counts: &str) {
    let output = TempDir::new().unwrap();
    let mut files = CountFileGlob::new(Path::new(path_to_counts)).unwrap();

    merge_count_files(&mut files, "condition1", "condition2", output.path()).unwrap();

    let matrix = fs::read_to_string(output.path().join(MATRIX_FILE_NAME)).unwrap();
    let lines: Vec<&str> = matrix.lines().collect();

    // header plus one row per gene shared by all 8 files
    assert_eq!(lines.len(), 6);

    let header: Vec<&str> = lines[0].split('\t').collect();
    assert_eq!(header.len(), 9);
    assert_eq!(header[0], "Geneid");
    assert_eq!(header[1], "condition1_RNA_rep1");
    assert_eq!(header[8], "condition2_RPF_rep2");
    assert_eq!(header.iter().any(|name| name.contains("_Aligned")), false);

    assert_eq!(lines[1], "ENSG00000000001\t100\t200\t300\t400\t500\t600\t700\t800");
    assert_eq!(lines[5], "ENSG00000000005\t140\t240\t340\t440\t540\t640\t740\t840");

    let design = fs::read_to_string(output.path().join(DESIGN_FILE_NAME)).unwrap();
    let rows: Vec<&str> = design.lines().collect();

    assert_eq!(rows.len(), 9);
    assert_eq!(rows[0], "Samples,Data_Type,Conditions");
    assert_eq!(rows[1], "condition1_RNA_rep1,RNA-Seq,treated");
    assert_eq!(rows[8], "condition2_RPF_rep2,Ribo-Seq,control");

    let treated = rows
        .iter()
        .skip(1)
        .filter(|row| row.ends_with(",treated"))
        .count();
    let control = rows
        .iter()
        .skip(1)
        .filter(|row| row.ends_with(",control"))
        .count();
    assert_eq!((treated, control), (4, 4));

    let rna = rows
        .iter()
        .skip(1)
        .filter(|row| row.contains(",RNA-Seq,"))
        .count();
    let ribo = rows
        .iter()
        .skip(1)
        .filter(|row| row.contains(",Ribo-Seq,"))
        .count();
    assert_eq!((rna, ribo), (4, 4));
}

#[rstest]
fn test_merge_is_idempotent(path_to_counts: &str) {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    let mut files = CountFileGlob::new(Path::new(path_to_counts)).unwrap();
    merge_count_files(&mut files, "condition1", "condition2", first.path()).unwrap();

    let mut files = CountFileGlob::new(Path::new(path_to_counts)).unwrap();
    merge_count_files(&mut files, "condition1", "condition2", second.path()).unwrap();

    assert_eq!(
        fs::read(first.path().join(MATRIX_FILE_NAME)).unwrap(),
        fs::read(second.path().join(MATRIX_FILE_NAME)).unwrap()
    );
    assert_eq!(
        fs::read(first.path().join(DESIGN_FILE_NAME)).unwrap(),
        fs::read(second.path().join(DESIGN_FILE_NAME)).unwrap()
    );
}

#[rstest]
fn test_unbalanced_cohort_fails_before_writing(path_to_unbalanced_counts: &str) {
    let output = TempDir::new().unwrap();
    let mut files = CountFileGlob::new(Path::new(path_to_unbalanced_counts)).unwrap();

    let result = merge_count_files(&mut files, "condition1", "condition2", output.path());

    let err = result.err().unwrap();
    let err = err.downcast_ref::<CountsError>().unwrap();
    assert!(matches!(
        err,
        CountsError::UnbalancedConditions {
            treated: 5,
            control: 3,
        }
    ));

    assert_eq!(output.path().join(DESIGN_FILE_NAME).exists(), false);
    assert_eq!(output.path().join(MATRIX_FILE_NAME).exists(), false);
}

#[rstest]
fn test_disjoint_gene_sets_fail_before_writing(path_to_disjoint_counts: &str) {
    let output = TempDir::new().unwrap();
    let mut files = CountFileGlob::new(Path::new(path_to_disjoint_counts)).unwrap();

    let result = merge_count_files(&mut files, "condition1", "condition2", output.path());

    let err = result.err().unwrap();
    let err = err.downcast_ref::<CountsError>().unwrap();
    assert!(matches!(err, CountsError::NoCommonGenes));

    assert_eq!(output.path().join(DESIGN_FILE_NAME).exists(), false);
    assert_eq!(output.path().join(MATRIX_FILE_NAME).exists(), false);
}

#[rstest]
fn test_merge_respects_custom_tokens(path_to_counts: &str) {
    let output = TempDir::new().unwrap();
    let mut files = CountFileGlob::new(Path::new(path_to_counts)).unwrap();

    // swapping the tokens flips every condition assignment
    merge_count_files(&mut files, "condition2", "condition1", output.path()).unwrap();

    let design = fs::read_to_string(output.path().join(DESIGN_FILE_NAME)).unwrap();
    let rows: Vec<&str> = design.lines().collect();

    assert_eq!(rows[1], "condition1_RNA_rep1,RNA-Seq,control");
    assert_eq!(rows[8], "condition2_RPF_rep2,Ribo-Seq,treated");
}
