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

use itertools::Itertools;

use crate::structs::{HapCounts, Region, Snp};

pub const NA: &str = "NA";

pub const HEADER: [&str; 17] = [
    "CHROM",
    "TEST.SNP.POS",
    "TEST.SNP.ID",
    "TEST.SNP.REF.ALLELE",
    "TEST.SNP.ALT.ALLELE",
    "TEST.SNP.GENOTYPE",
    "TEST.SNP.HAPLOTYPE",
    "REGION.START",
    "REGION.END",
    "REGION.SNP.POS",
    "REGION.SNP.HET.PROB",
    "REGION.SNP.LINKAGE.PROB",
    "REGION.SNP.REF.HAP.COUNT",
    "REGION.SNP.ALT.HAP.COUNT",
    "REGION.SNP.OTHER.HAP.COUNT",
    "REGION.READ.COUNT",
    "GENOMEWIDE.READ.COUNT",
];

/// Row for a line without a usable test SNP: the chromosome followed by `NA` in every column
pub fn skip_row(contig: &str) -> Vec<String> {
    let mut row = Vec::with_capacity(HEADER.len());
    row.push(contig.to_string());
    row.resize(HEADER.len(), NA.to_string());
    row
}

/// Row for a test SNP position that is not in the genotype table
pub fn missing_test_snp_row(
    contig: &str,
    pos: u64,
    regions: &[Region],
    region_read_count: u64,
    genome_wide_read_count: u64,
) -> Vec<String> {
    let mut row = vec![contig.to_string(), pos.to_string()];
    row.extend(std::iter::repeat(NA.to_string()).take(5));
    row.extend(region_columns(regions));
    row.extend(std::iter::repeat(NA.to_string()).take(6));
    row.push(region_read_count.to_string());
    row.push(genome_wide_read_count.to_string());
    row
}

pub fn test_snp_row(
    test_snp: &Snp,
    regions: &[Region],
    linked_snps: &[Snp],
    region_read_count: u64,
    genome_wide_read_count: u64,
) -> Vec<String> {
    let mut row = vec![
        test_snp.contig.clone(),
        test_snp.pos.to_string(),
        test_snp.name.clone(),
        test_snp.ref_allele.clone(),
        test_snp.alt_allele.clone(),
        format!("{:.2}", test_snp.dosage),
        test_snp.haplotype_string(),
    ];
    row.extend(region_columns(regions));

    if linked_snps.is_empty() {
        row.extend(std::iter::repeat(NA.to_string()).take(6));
    } else {
        row.push(linked_snps.iter().map(|s| s.pos).join(";"));
        row.push(linked_snps.iter().map(|s| format!("{:.2}", s.het_prob)).join(";"));
        row.push(linked_snps.iter().map(|s| format!("{:.2}", s.linkage_prob)).join(";"));
        row.push(count_column(linked_snps, |c| c.ref_hap));
        row.push(count_column(linked_snps, |c| c.alt_hap));
        row.push(count_column(linked_snps, |c| c.other));
    }

    row.push(region_read_count.to_string());
    row.push(genome_wide_read_count.to_string());
    row
}

fn region_columns(regions: &[Region]) -> [String; 2] {
    [
        regions.iter().map(|r| r.start).join(";"),
        regions.iter().map(|r| r.end).join(";"),
    ]
}

fn count_column(snps: &[Snp], field: impl Fn(&HapCounts) -> u64) -> String {
    snps.iter()
        .map(|s| match &s.counts {
            Some(counts) => field(counts).to_string(),
            None => NA.to_string(),
        })
        .join(";")
}

#[cfg(test)]
#[rustfmt::skip]
mod tests {
    use super::*;
    use crate::structs::HapAllele::{Alt, Ref};

    fn regions() -> Vec<Region> {
        vec![Region::new("chr1", 101, 200).unwrap(), Region::new("chr1", 301, 350).unwrap()]
    }

    #[test]
    fn test_skip_row() {
        let row = skip_row("chr5");
        assert_eq!(HEADER.len(), row.len());
        assert_eq!("chr5", row[0]);
        assert!(row[1..].iter().all(|v| v == NA));
    }

    #[test]
    fn test_missing_test_snp_row() {
        let row = missing_test_snp_row("chr1", 999, &regions(), 12, 300);
        assert_eq!(HEADER.len(), row.len());
        assert_eq!("chr1 999 NA NA NA NA NA 101;301 200;350 NA NA NA NA NA NA 12 300", row.join(" "));
    }

    #[test]
    fn test_snp_row() {
        let test = Snp::new("chr1", 150, "rs150", "C", "T", [0.0, 0.25, 0.75], [Alt, Ref]);
        let mut linked = vec![
            Snp::new("chr1", 110, "rs110", "A", "G", [0.02, 0.95, 0.03], [Ref, Alt]),
            Snp::new("chr1", 320, "rs320", "G", "T", [0.0, 0.904, 0.096], [Alt, Ref]),
        ];
        linked[0].counts = Some(HapCounts { ref_hap: 2, alt_hap: 7, other: 1 });

        let row = super::test_snp_row(&test, &regions(), &linked, 100, 300);
        assert_eq!(HEADER.len(), row.len());
        assert_eq!(
            "chr1 150 rs150 C T 1.75 1|0 101;301 200;350 110;320 0.95;0.90 1.00;1.00 2;NA 7;NA 1;NA 100 300",
            row.join(" ")
        );

        let row = super::test_snp_row(&test, &regions(), &[], 100, 300);
        assert_eq!(HEADER.len(), row.len());
        assert_eq!(
            "chr1 150 rs150 C T 1.75 1|0 101;301 200;350 NA NA NA NA NA NA 100 300",
            row.join(" ")
        );
    }
}
