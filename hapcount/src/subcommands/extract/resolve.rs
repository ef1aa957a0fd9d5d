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

use std::path::Path;

use color_eyre::{eyre::eyre, Result};

use crate::error::Error;
use crate::io::read_sample_ids;
use crate::structs::{HapAllele, Region, Snp};
use crate::traits::RegionIndex;
use crate::utils::find_individual_index;

/// All SNPs in the target region(s) for one individual, in interval then position order.
/// SNPs in overlapping sub-intervals are returned once per sub-interval.
pub fn find_snps_in_regions<I: RegionIndex>(
    index: &I,
    regions: &[Region],
    individual: usize,
) -> Result<Vec<Snp>, Error> {
    let contig = match regions.first() {
        Some(region) => &region.contig,
        None => return Err(Error::coordinate("expected at least one coordinate, got 0")),
    };

    if regions.iter().any(|r| &r.contig != contig) {
        return Err(Error::coordinate("only regions on same chromosome are supported"));
    }

    let n_samples = index.n_samples();
    if individual >= n_samples {
        return Err(Error::IndividualOutOfRange {
            index: individual,
            n_samples,
        });
    }

    let mut snps = vec![];

    for region in regions {
        for row in index.fetch(region) {
            let geno_probs = [
                row.geno_probs[individual * 3],
                row.geno_probs[individual * 3 + 1],
                row.geno_probs[individual * 3 + 2],
            ];
            let haplotypes = [
                HapAllele::from(row.haplotypes[individual * 2]),
                HapAllele::from(row.haplotypes[individual * 2 + 1]),
            ];

            snps.push(Snp::new(
                contig,
                row.pos,
                row.name,
                row.ref_allele,
                row.alt_allele,
                geno_probs,
                haplotypes,
            ));
        }
    }

    Ok(snps)
}

/// The SNP at the test position, if the index has one
pub fn find_test_snp<I: RegionIndex>(
    index: &I,
    contig: &str,
    pos: u64,
    individual: usize,
) -> Result<Option<Snp>, Error> {
    let region = Region::point(contig, pos)?;
    let snps = find_snps_in_regions(index, &[region], individual)?;
    Ok(snps.into_iter().next())
}

pub fn find_heterozygous_snps(snps: Vec<Snp>) -> Vec<Snp> {
    snps.into_iter().filter(Snp::is_heterozygous).collect()
}

/// 0-based index of the individual in a sample list, ids are compared without the `NA` prefix
pub fn lookup_individual_index(path: &Path, individual: &str) -> Result<usize> {
    tracing::info!("Reading list of individuals from {path:?}");
    let samples = read_sample_ids(path)?;

    find_individual_index(&samples, individual).ok_or_else(|| {
        eyre!(Error::IndividualNotFound {
            individual: individual.to_string(),
            source_name: path.display().to_string(),
        })
    })
}

#[cfg(test)]
#[rustfmt::skip]
mod tests {
    use super::*;
    use crate::snp_table::{SnpRow, SnpTable};

    fn row(pos: u64, geno_probs: Vec<f32>, haplotypes: Vec<i8>) -> SnpRow {
        SnpRow {
            contig: "chr1".to_string(),
            pos,
            name: format!("rs{pos}"),
            ref_allele: "A".to_string(),
            alt_allele: "G".to_string(),
            geno_probs,
            haplotypes,
        }
    }

    fn table() -> SnpTable {
        let samples = vec!["NA18505".to_string(), "NA18507".to_string()];
        let rows = vec![
            row(10, vec![1.0, 0.0, 0.0, 0.1, 0.7, 0.2], vec![0, 0, 0, 1]),
            row(20, vec![0.0, 1.0, 0.0, 0.0, 0.0, 1.0], vec![1, 0, 1, 1]),
            row(30, vec![0.0, 0.9, 0.1, 0.2, 0.8, 0.0], vec![0, 1, 1, 0]),
            row(40, vec![0.0, 1.0, 0.0, 0.0, 1.0, 0.0], vec![0, 1, -1, -1]),
        ];
        SnpTable::from_rows(samples, rows).unwrap()
    }

    #[test]
    fn test_individual_columns() {
        let table = table();
        let regions = vec![Region::new("chr1", 1, 100).unwrap()];

        let snps = find_snps_in_regions(&table, &regions, 1).unwrap();
        assert_eq!(vec![10, 20, 30, 40], snps.iter().map(|s| s.pos).collect::<Vec<_>>());
        assert_eq!(0.7, snps[0].het_prob);
        assert!((snps[0].dosage - 1.1).abs() < 1e-6);
        assert_eq!([HapAllele::Ref, HapAllele::Alt], snps[0].haplotypes);
        assert_eq!([HapAllele::Alt, HapAllele::Ref], snps[2].haplotypes);
        assert_eq!([HapAllele::Undefined, HapAllele::Undefined], snps[3].haplotypes);

        let snps = find_snps_in_regions(&table, &regions, 0).unwrap();
        assert_eq!([HapAllele::Alt, HapAllele::Ref], snps[1].haplotypes);
        assert_eq!(1.0, snps[1].het_prob);
    }

    #[test]
    fn test_interval_order_and_overlaps() {
        let table = table();
        let regions = vec![
            Region::new("chr1", 25, 45).unwrap(),
            Region::new("chr1", 5, 32).unwrap(),
        ];

        let snps = find_snps_in_regions(&table, &regions, 1).unwrap();
        assert_eq!(vec![30, 40, 10, 20, 30], snps.iter().map(|s| s.pos).collect::<Vec<_>>());
    }

    #[test]
    fn test_region_errors() {
        let table = table();
        assert!(matches!(find_snps_in_regions(&table, &[], 0), Err(Error::Coordinate { .. })));

        let regions = vec![Region::new("chr1", 1, 10).unwrap(), Region::new("chr2", 1, 10).unwrap()];
        assert!(matches!(find_snps_in_regions(&table, &regions, 0), Err(Error::Coordinate { .. })));

        let regions = vec![Region::new("chr1", 1, 10).unwrap()];
        assert!(matches!(find_snps_in_regions(&table, &regions, 2), Err(Error::IndividualOutOfRange { .. })));
    }

    #[test]
    fn test_heterozygous_snps() {
        let table = table();
        let regions = vec![Region::new("chr1", 1, 100).unwrap()];

        let snps = find_snps_in_regions(&table, &regions, 1).unwrap();
        let het = find_heterozygous_snps(snps);
        assert_eq!(vec![10, 30], het.iter().map(|s| s.pos).collect::<Vec<_>>());

        let snps = find_snps_in_regions(&table, &regions, 0).unwrap();
        let het = find_heterozygous_snps(snps);
        assert_eq!(vec![20, 30, 40], het.iter().map(|s| s.pos).collect::<Vec<_>>());
    }

    #[test]
    fn test_find_test_snp() {
        let table = table();
        let snp = find_test_snp(&table, "chr1", 20, 0).unwrap().unwrap();
        assert_eq!("rs20", snp.name);
        assert_eq!("1|0", snp.haplotype_string());

        assert_eq!(None, find_test_snp(&table, "chr1", 21, 0).unwrap());
        assert_eq!(None, find_test_snp(&table, "chrX", 20, 0).unwrap());
    }
}
