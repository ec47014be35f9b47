use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;

use riboprep_merge::consts::*;
use riboprep_merge::{CountFileGlob, merge_count_files};

pub fn run_merge(matches: &ArgMatches) -> Result<()> {
    let counts = matches
        .get_one::<String>("counts")
        .expect("A path to a directory of count files is required.");

    let default_treated = DEFAULT_TREATED_TOKEN.to_string();
    let treated = matches
        .get_one::<String>("treated")
        .unwrap_or(&default_treated);

    let default_control = DEFAULT_CONTROL_TOKEN.to_string();
    let control = matches
        .get_one::<String>("control")
        .unwrap_or(&default_control);

    let default_out = DEFAULT_OUT.to_string();
    let output = matches.get_one::<String>("output").unwrap_or(&default_out);

    let mut files = CountFileGlob::new(Path::new(counts))?;
    let output = Path::new(output);

    merge_count_files(&mut files, treated, control, output)?;

    println!("Wrote {}", output.join(DESIGN_FILE_NAME).display());
    println!("Wrote {}", output.join(MATRIX_FILE_NAME).display());
    println!("Done!");

    Ok(())
}
