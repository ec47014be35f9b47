use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{CountsError, Result};
use crate::utils::get_dynamic_reader;

/// Name of the gene identifier column in featureCounts output.
pub const GENE_ID_COLUMN: &str = "Geneid";

/// Annotation columns emitted by featureCounts that carry no count data.
pub const METADATA_COLUMNS: [&str; 5] = ["Chr", "Start", "End", "Strand", "Length"];

/// Suffix the alignment pipeline leaves on the sample column header.
pub const ALIGNMENT_SUFFIX: &str = "_Aligned.sortedByCoord.out.bam";

///
/// CountTable struct, the representation of a single featureCounts
/// output file: one sample column of read counts keyed by gene identifier.
///
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CountTable {
    pub sample: String,
    gene_ids: Vec<String>,
    counts: HashMap<String, u32>,
}

impl CountTable {
    ///
    /// Parse a [CountTable] from a featureCounts output file.
    ///
    /// The first line of the file is the featureCounts invocation comment
    /// and is skipped. The second line is the header; it must contain the
    /// gene identifier column, the five annotation columns, and exactly one
    /// sample column. The annotation columns are dropped and the alignment
    /// suffix is stripped from the sample column header.
    ///
    /// # Arguments:
    /// - path: path to the count file on disk, plain or gzip'd.
    ///
    pub fn from_file(path: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(path)?;
        let mut lines = reader.lines();

        // first line is the featureCounts provenance comment
        if lines.next().transpose()?.is_none() {
            return Err(CountsError::MissingHeader {
                path: path.to_path_buf(),
            });
        }

        let header = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(CountsError::MissingHeader {
                    path: path.to_path_buf(),
                });
            }
        };

        let columns: Vec<&str> = header.split('\t').collect();

        let key_index = columns
            .iter()
            .position(|column| *column == GENE_ID_COLUMN)
            .ok_or_else(|| CountsError::MissingColumn {
                column: GENE_ID_COLUMN,
                path: path.to_path_buf(),
            })?;

        for metadata_column in METADATA_COLUMNS {
            if !columns.contains(&metadata_column) {
                return Err(CountsError::MissingColumn {
                    column: metadata_column,
                    path: path.to_path_buf(),
                });
            }
        }

        let sample_columns: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(index, column)| {
                *index != key_index && !METADATA_COLUMNS.contains(*column)
            })
            .map(|(index, _)| index)
            .collect();

        if sample_columns.len() != 1 {
            return Err(CountsError::SampleColumnCount {
                path: path.to_path_buf(),
                found: sample_columns.len(),
            });
        }

        let sample_index = sample_columns[0];
        let sample = columns[sample_index].replace(ALIGNMENT_SUFFIX, "");
        let expected = columns.len();

        let mut gene_ids: Vec<String> = Vec::new();
        let mut counts: HashMap<String, u32> = HashMap::new();

        for (index, line) in lines.enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            // data rows start after the comment and header lines
            let line_number = index + 3;

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != expected {
                return Err(CountsError::MalformedRow {
                    path: path.to_path_buf(),
                    line: line_number,
                    found: fields.len(),
                    expected,
                });
            }

            let gene_id = fields[key_index].to_string();
            let count: u32 =
                fields[sample_index]
                    .parse()
                    .map_err(|_| CountsError::InvalidCount {
                        path: path.to_path_buf(),
                        line: line_number,
                        value: fields[sample_index].to_string(),
                    })?;

            if counts.insert(gene_id.clone(), count).is_some() {
                return Err(CountsError::DuplicateGeneId {
                    path: path.to_path_buf(),
                    gene_id,
                });
            }

            gene_ids.push(gene_id);
        }

        Ok(CountTable {
            sample,
            gene_ids,
            counts,
        })
    }

    pub fn len(&self) -> usize {
        self.gene_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gene_ids.is_empty()
    }

    pub fn gene_ids(&self) -> &[String] {
        &self.gene_ids
    }

    pub fn get(&self, gene_id: &str) -> Option<u32> {
        self.counts.get(gene_id).copied()
    }
}

///
/// CountMatrix struct, the merged read count matrix: one row per gene
/// identifier shared by every folded-in [CountTable], one column per sample.
///
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CountMatrix {
    samples: Vec<String>,
    gene_ids: Vec<String>,
    rows: Vec<Vec<u32>>,
}

impl From<CountTable> for CountMatrix {
    fn from(table: CountTable) -> Self {
        let rows = table
            .gene_ids
            .iter()
            .map(|gene_id| vec![table.counts[gene_id]])
            .collect();

        CountMatrix {
            samples: vec![table.sample],
            gene_ids: table.gene_ids,
            rows,
        }
    }
}

impl CountMatrix {
    ///
    /// Fold another [CountTable] into the matrix with an inner join on the
    /// gene identifier: only identifiers present on both sides survive, in
    /// the matrix's existing row order, and the table's counts become the
    /// rightmost column.
    ///
    pub fn inner_join(self, table: CountTable) -> Self {
        let CountMatrix {
            mut samples,
            gene_ids,
            rows,
        } = self;

        let mut joined_ids: Vec<String> = Vec::with_capacity(gene_ids.len());
        let mut joined_rows: Vec<Vec<u32>> = Vec::with_capacity(rows.len());

        for (gene_id, mut row) in gene_ids.into_iter().zip(rows) {
            if let Some(count) = table.counts.get(&gene_id) {
                row.push(*count);
                joined_ids.push(gene_id);
                joined_rows.push(row);
            }
        }

        samples.push(table.sample);

        CountMatrix {
            samples,
            gene_ids: joined_ids,
            rows: joined_rows,
        }
    }

    pub fn n_genes(&self) -> usize {
        self.gene_ids.len()
    }

    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gene_ids.is_empty()
    }

    pub fn sample_names(&self) -> &[String] {
        &self.samples
    }

    pub fn gene_ids(&self) -> &[String] {
        &self.gene_ids
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&u32> {
        self.rows.get(row).and_then(|counts| counts.get(col))
    }

    ///
    /// Write the matrix as a tab-separated file: gene identifier column
    /// first, then one column per sample in fold order, no index column.
    ///
    /// # Arguments:
    /// - path: destination path for the matrix file.
    ///
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{}\t{}", GENE_ID_COLUMN, self.samples.join("\t"))?;

        for (gene_id, row) in self.gene_ids.iter().zip(self.rows.iter()) {
            let counts = row
                .iter()
                .map(|count| count.to_string())
                .collect::<Vec<String>>()
                .join("\t");
            writeln!(writer, "{gene_id}\t{counts}")?;
        }

        writer.flush()?;

        Ok(())
    }
}
