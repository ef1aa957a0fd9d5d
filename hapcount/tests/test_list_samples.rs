mod common;

use std::path::{Path, PathBuf};

use hapcount::subcommands::list_samples::{self, get_sample_names};

use crate::common::{TEST_SAMPLES, TEST_VCF};

#[test]
#[cfg(feature = "clap")]
fn samples() {
    let cmd = hapcount::clap::SubCommand::Samples {
        file: PathBuf::from(TEST_VCF),
        log_and_verbosity: crate::common::silent_verbosity(),
    };
    hapcount::clap::run_cmd(cmd).unwrap();
}

#[test]
fn sample_names_subcommand() {
    let ids = get_sample_names(Path::new(TEST_VCF)).unwrap();
    assert_eq!(vec!["NA18505", "NA18507"], ids);

    let ids = get_sample_names(Path::new(TEST_SAMPLES)).unwrap();
    assert_eq!(vec!["NA18505", "NA18507"], ids);

    let res = list_samples::run(PathBuf::from(TEST_SAMPLES));
    assert!(res.is_ok());

    let res = get_sample_names(Path::new("tests/data/read_counts.bedgraph"));
    assert!(res.is_err());
}
