pub const MERGE_CMD: &str = "merge";

/// Naming patterns the counting tool uses for its per-sample output files.
pub const COUNT_FILE_PATTERN: &str = "counts*.txt";
pub const COUNT_FILE_PATTERN_GZ: &str = "counts*.txt.gz";

/// 2 replicates x 2 conditions x 2 assay types.
pub const MIN_COUNT_FILES: usize = 8;

pub const DEFAULT_TREATED_TOKEN: &str = "condition1";
pub const DEFAULT_CONTROL_TOKEN: &str = "condition2";
pub const DEFAULT_OUT: &str = ".";

pub const DESIGN_FILE_NAME: &str = "experimental_design.csv";
pub const MATRIX_FILE_NAME: &str = "raw_read_count.txt";
