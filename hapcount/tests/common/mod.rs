#![allow(dead_code)]
use std::path::PathBuf;

use hapcount::args::{ExtractArgs, HomozygousPolicy};

pub const TEST_VCF: &str = "tests/data/test.vcf";
pub const TEST_SAMPLES: &str = "tests/data/samples.txt";
pub const TEST_CHROMS: &str = "tests/data/chromInfo.txt";
pub const TEST_REGIONS: &str = "tests/data/regions.txt";
pub const REF_COUNTS: &str = "tests/data/ref_as_counts.bedgraph";
pub const ALT_COUNTS: &str = "tests/data/alt_as_counts.bedgraph";
pub const OTHER_COUNTS: &str = "tests/data/other_as_counts.bedgraph";
pub const READ_COUNTS: &str = "tests/data/read_counts.bedgraph";
pub const OUTDIR: &str = "tests/results";
pub const INDIVIDUAL: &str = "18507";

pub fn output_path(name: &str) -> PathBuf {
    std::fs::create_dir_all(OUTDIR).unwrap();
    PathBuf::from(OUTDIR).join(name)
}

pub fn extract_args(policy: HomozygousPolicy, output: &str) -> ExtractArgs {
    ExtractArgs {
        input_file: PathBuf::from(TEST_REGIONS),
        chrom: PathBuf::from(TEST_CHROMS),
        samples: Some(PathBuf::from(TEST_SAMPLES)),
        individual: String::from(INDIVIDUAL),
        genotypes: PathBuf::from(TEST_VCF),
        ref_as_counts: PathBuf::from(REF_COUNTS),
        alt_as_counts: PathBuf::from(ALT_COUNTS),
        other_as_counts: PathBuf::from(OTHER_COUNTS),
        read_counts: PathBuf::from(READ_COUNTS),
        homozygous_as_counts: policy,
        target_region_size: None,
        seed: Some(2024),
        output: Some(output_path(output)),
    }
}

#[cfg(feature = "clap")]
pub fn silent_verbosity() -> hapcount::clap::LogAndVerbosity {
    hapcount::clap::LogAndVerbosity {
        verbosity: 1,
        log_file: None,
        silent: false,
    }
}

/// Output rows split into columns, header excluded
pub fn read_rows(output: &str) -> Vec<Vec<String>> {
    let res = std::fs::read_to_string(PathBuf::from(OUTDIR).join(output)).unwrap();
    res.lines()
        .skip(1)
        .map(|l| l.split(' ').map(String::from).collect())
        .collect()
}
