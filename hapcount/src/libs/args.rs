// HAPCOUNT - Haplotype-resolved allele-specific read counts
// Copyright (C) 2024  Osma S. Rautila
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct ExtractArgs {
    /// Whitespace delimited file (may be gzipped) with the test SNP and target region(s) on each line
    pub input_file: PathBuf,

    /// Chromosome names and lengths (tab separated, may be gzipped), e.g. a UCSC chromInfo.txt.gz
    #[cfg_attr(feature = "clap", arg(long, value_name = "CHROM_TXT_FILE"))]
    pub chrom: PathBuf,

    /// Ordered list of genotyped individuals (first column). Defaults to the sample order of the genotypes file
    #[cfg_attr(feature = "clap", arg(long, value_name = "SAMPLES_TXT_FILE"))]
    pub samples: Option<PathBuf>,

    /// Individual whose phase determines which SNPs are heterozygous, e.g. 18505
    #[cfg_attr(feature = "clap", arg(long))]
    pub individual: String,

    /// Phased VCF/BCF with SNP alleles, GT haplotypes and GP genotype probabilities
    #[cfg_attr(feature = "clap", arg(long, value_name = "VCF_FILE"))]
    pub genotypes: PathBuf,

    /// bedGraph of reads matching the reference allele at each SNP
    #[cfg_attr(feature = "clap", arg(long, value_name = "REF_AS_COUNT_BEDGRAPH"))]
    pub ref_as_counts: PathBuf,

    /// bedGraph of reads matching the alternate allele at each SNP
    #[cfg_attr(feature = "clap", arg(long, value_name = "ALT_AS_COUNT_BEDGRAPH"))]
    pub alt_as_counts: PathBuf,

    /// bedGraph of reads matching neither the reference nor the alternate allele at each SNP
    #[cfg_attr(feature = "clap", arg(long, value_name = "OTHER_AS_COUNT_BEDGRAPH"))]
    pub other_as_counts: PathBuf,

    /// bedGraph of all reads, stored at the left-most position of the mapped read
    #[cfg_attr(feature = "clap", arg(long, value_name = "READ_COUNT_BEDGRAPH"))]
    pub read_counts: PathBuf,

    /// How to report AS counts at linked het SNPs when the test SNP is homozygous or unphased
    #[cfg_attr(feature = "clap", arg(long, value_enum, default_value_t = HomozygousPolicy::Zero))]
    pub homozygous_as_counts: HomozygousPolicy,

    /// Override the target region size given in the input file
    #[cfg_attr(feature = "clap", arg(long, value_parser = clap::value_parser!(u64).range(1..)))]
    pub target_region_size: Option<u64>,

    /// Seed for the random haplotype and allele choices
    #[cfg_attr(feature = "clap", arg(long))]
    pub seed: Option<u64>,

    /// Output file, defaults to stdout
    #[cfg_attr(feature = "clap", arg(short = 'o', long))]
    pub output: Option<PathBuf>,
}

/// Counts reported at linked heterozygous SNPs when the test SNP cannot be used for phasing
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum HomozygousPolicy {
    #[default]
    /// Set the allele-specific counts to 0
    #[cfg_attr(feature = "clap", value(name = "zero"))]
    Zero,
    /// Randomly choose one of the haplotypes to be the reference
    #[cfg_attr(feature = "clap", value(name = "rand_hap"))]
    RandHap,
    /// Randomly choose the reference allele at each SNP
    #[cfg_attr(feature = "clap", value(name = "rand_allele"))]
    RandAllele,
}

impl FromStr for HomozygousPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero" => Ok(Self::Zero),
            "rand_hap" => Ok(Self::RandHap),
            "rand_allele" => Ok(Self::RandAllele),
            _ => Err(Error::UnknownPolicy {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for HomozygousPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Self::Zero => write!(f, "zero"),
            Self::RandHap => write!(f, "rand_hap"),
            Self::RandAllele => write!(f, "rand_allele"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        for policy in [HomozygousPolicy::Zero, HomozygousPolicy::RandHap, HomozygousPolicy::RandAllele] {
            assert_eq!(policy, policy.to_string().parse().unwrap());
        }

        let res = "rand".parse::<HomozygousPolicy>();
        assert!(matches!(res, Err(Error::UnknownPolicy { .. })));
    }
}
