use clap::{Arg, Command, arg};

pub use riboprep_merge::consts::*;

pub fn create_merge_cli() -> Command {
    Command::new(MERGE_CMD)
        .about("Merge featureCounts output files into a count matrix and an experimental design table.")
        .arg(Arg::new("counts"))
        .arg(arg!(--treated <treated>))
        .arg(arg!(--control <control>))
        .arg(arg!(--output <output>))
}
