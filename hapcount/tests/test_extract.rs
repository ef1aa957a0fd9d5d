mod common;

use std::path::PathBuf;

use hapcount::args::HomozygousPolicy;
use hapcount::subcommands::extract;

use crate::common::{extract_args, read_rows, OUTDIR};

const REF_HAP: usize = 12;
const ALT_HAP: usize = 13;

#[test]
fn extract_zero() {
    let args = extract_args(HomozygousPolicy::Zero, "extract_zero.txt");
    extract::run(args).unwrap();

    let res = std::fs::read_to_string("tests/results/extract_zero.txt").unwrap();
    insta::assert_snapshot!("extract_zero", res);
}

#[test]
fn extract_target_region_size() {
    let mut args = extract_args(HomozygousPolicy::Zero, "extract_target_size.txt");
    args.target_region_size = Some(20);
    extract::run(args).unwrap();

    let res = std::fs::read_to_string("tests/results/extract_target_size.txt").unwrap();
    insta::assert_snapshot!("extract_target_size", res);
}

#[test]
fn extract_gzipped_input_and_vcf_samples() {
    let mut args = extract_args(HomozygousPolicy::Zero, "extract_vcf_samples.txt");
    args.input_file = PathBuf::from("tests/data/regions.txt.gz");
    args.chrom = PathBuf::from("tests/data/chromInfo.txt.gz");
    args.samples = None;
    args.individual = String::from("NA18507");
    extract::run(args).unwrap();

    let mut args = extract_args(HomozygousPolicy::Zero, "extract_sample_list.txt");
    extract::run(args.clone()).unwrap();

    let a = read_rows("extract_vcf_samples.txt");
    let b = read_rows("extract_sample_list.txt");
    assert_eq!(5, a.len());
    assert_eq!(a, b);

    args.individual = String::from("19238");
    args.output = Some(PathBuf::from(OUTDIR).join("extract_unknown_individual.txt"));
    let res = extract::run(args);
    assert!(res.is_err());
}

#[test]
fn extract_rand_hap() {
    let zero = {
        extract::run(extract_args(HomozygousPolicy::Zero, "extract_zero_ref.txt")).unwrap();
        read_rows("extract_zero_ref.txt")
    };

    extract::run(extract_args(HomozygousPolicy::RandHap, "extract_rand_hap.txt")).unwrap();
    let rows = read_rows("extract_rand_hap.txt");

    // The test SNP of the first row is a phased heterozygote, no randomness involved
    assert_eq!(zero[0], rows[0]);

    // rs320 and rs420 sit on opposite haplotypes, so a single coin flip swaps both
    let counts = (rows[1][REF_HAP].as_str(), rows[1][ALT_HAP].as_str());
    assert!(counts == ("3;6", "10;1") || counts == ("10;1", "3;6"), "{counts:?}");
    assert_eq!("0;3", rows[1][14]);

    extract::run(extract_args(HomozygousPolicy::RandHap, "extract_rand_hap_again.txt")).unwrap();
    assert_eq!(rows, read_rows("extract_rand_hap_again.txt"));
}

#[test]
fn extract_rand_allele() {
    extract::run(extract_args(HomozygousPolicy::RandAllele, "extract_rand_allele.txt")).unwrap();
    let rows = read_rows("extract_rand_allele.txt");

    let ref_hap: Vec<&str> = rows[1][REF_HAP].split(';').collect();
    let alt_hap: Vec<&str> = rows[1][ALT_HAP].split(';').collect();

    assert!(matches!((ref_hap[0], alt_hap[0]), ("10", "3") | ("3", "10")));
    assert!(matches!((ref_hap[1], alt_hap[1]), ("6", "1") | ("1", "6")));
}

#[test]
fn extract_coordinate_error() {
    let mut args = extract_args(HomozygousPolicy::Zero, "extract_bad_regions.txt");
    args.input_file = PathBuf::from("tests/data/bad_regions.txt");

    let err = extract::run(args).unwrap_err();
    assert!(err.chain().any(|e| e.to_string().starts_with("Coordinate error")), "{err:?}");
}

#[test]
#[cfg(feature = "clap")]
fn extract_subcommand() {
    let cmd = hapcount::clap::SubCommand::Extract {
        args: extract_args(HomozygousPolicy::Zero, "extract_subcommand.txt"),
        log_and_verbosity: crate::common::silent_verbosity(),
    };
    hapcount::clap::run_cmd(cmd).unwrap();

    let rows = read_rows("extract_subcommand.txt");
    assert_eq!(5, rows.len());
    assert!(rows.iter().all(|r| r.len() == 17));
}
