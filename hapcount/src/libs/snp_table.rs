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

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use ndarray::Array2;
use rust_htslib::bcf::record::GenotypeAllele;
use rust_htslib::bcf::{Read, Reader};

use crate::error::Error;
use crate::structs::{Region, HAP_UNDEF};
use crate::traits::{IndexedSnp, RegionIndex};

/// One SNP with the genotype probabilities and haplotypes of all samples
#[derive(Debug, Clone, PartialEq)]
pub struct SnpRow {
    pub contig: String,
    pub pos: u64,
    pub name: String,
    pub ref_allele: String,
    pub alt_allele: String,
    /// 3 values per sample
    pub geno_probs: Vec<f32>,
    /// 2 values per sample, 0, 1 or `HAP_UNDEF`
    pub haplotypes: Vec<i8>,
}

#[derive(Debug, Clone)]
struct SnpInfo {
    pos: u64,
    name: String,
    ref_allele: String,
    alt_allele: String,
}

#[derive(Debug, Clone)]
struct ContigSnps {
    index: BTreeMap<u64, usize>,
    info: Vec<SnpInfo>,
    geno_probs: Array2<f32>,
    haplotypes: Array2<i8>,
}

/// SNP positions, alleles, genotype probabilities and haplotypes per contig
#[derive(Debug, Clone, Default)]
pub struct SnpTable {
    samples: Vec<String>,
    contigs: HashMap<String, ContigSnps>,
}

#[derive(Debug, Default)]
struct ContigBuilder {
    index: BTreeMap<u64, usize>,
    info: Vec<SnpInfo>,
    geno_probs: Vec<f32>,
    haplotypes: Vec<i8>,
    prev_pos: u64,
}

struct SnpTableBuilder {
    samples: Vec<String>,
    contigs: HashMap<String, ContigBuilder>,
}

impl SnpTableBuilder {
    fn new(samples: Vec<String>) -> Self {
        Self {
            samples,
            contigs: HashMap::new(),
        }
    }

    fn push(&mut self, row: SnpRow) -> Result<(), Error> {
        let n_samples = self.samples.len();

        if row.geno_probs.len() != n_samples * 3 || row.haplotypes.len() != n_samples * 2 {
            return Err(Error::ShapeError(ndarray::ShapeError::from_kind(
                ndarray::ErrorKind::IncompatibleShape,
            )));
        }

        let contig = self.contigs.entry(row.contig.clone()).or_default();

        // Check that the current is larger than or equals the previous position
        if row.pos < contig.prev_pos {
            return Err(Error::Order {
                prev_pos: contig.prev_pos,
                pos: row.pos,
                contig: row.contig,
            });
        }
        contig.prev_pos = row.pos;

        if contig.index.contains_key(&row.pos) {
            tracing::warn!(
                "Duplicate SNP at {}:{}. Not adding the duplicate",
                row.contig,
                row.pos
            );
            return Ok(());
        }

        contig.index.insert(row.pos, contig.info.len());
        contig.info.push(SnpInfo {
            pos: row.pos,
            name: row.name,
            ref_allele: row.ref_allele,
            alt_allele: row.alt_allele,
        });
        contig.geno_probs.extend(row.geno_probs);
        contig.haplotypes.extend(row.haplotypes);

        Ok(())
    }

    fn finish(self) -> Result<SnpTable, Error> {
        let n_samples = self.samples.len();

        let contigs = self
            .contigs
            .into_iter()
            .map(|(name, c)| -> Result<(String, ContigSnps), Error> {
                let n = c.info.len();
                let contig = ContigSnps {
                    index: c.index,
                    info: c.info,
                    geno_probs: Array2::from_shape_vec((n, n_samples * 3), c.geno_probs)?,
                    haplotypes: Array2::from_shape_vec((n, n_samples * 2), c.haplotypes)?,
                };
                Ok((name, contig))
            })
            .collect::<Result<HashMap<_, _>, Error>>()?;

        Ok(SnpTable {
            samples: self.samples,
            contigs,
        })
    }
}

impl SnpTable {
    pub fn from_rows<I>(samples: Vec<String>, rows: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = SnpRow>,
    {
        let mut builder = SnpTableBuilder::new(samples);
        for row in rows {
            builder.push(row)?;
        }
        builder.finish()
    }

    /// Read biallelic SNVs from a VCF/BCF. Haplotypes come from the GT field and
    /// genotype probabilities from the GP field, or from GT hard calls when GP is not available.
    pub fn from_vcf(path: &Path) -> Result<Self, Error> {
        tracing::info!("Reading SNPs, genotype probabilities and haplotypes from {path:?}");

        let mut reader = Reader::from_path(path)?;
        let header = reader.header().clone();

        let samples = header
            .samples()
            .into_iter()
            .map(|s| String::from_utf8_lossy(s).to_string())
            .collect::<Vec<String>>();
        let n_samples = samples.len();

        let mut builder = SnpTableBuilder::new(samples);
        let (mut n_indels, mut n_no_gp) = (0, 0);

        for record in reader.records() {
            let record = record?;

            let rid = record
                .rid()
                .ok_or_else(|| Error::coordinate("VCF record has no contig"))?;
            let contig = std::str::from_utf8(header.rid2name(rid)?)?.to_string();

            // HTSlib is 0-based so add 1
            let pos = (record.pos() + 1) as u64;

            let alleles = record.alleles();
            if alleles.len() != 2 {
                return Err(Error::Normalize { contig, pos });
            }

            if alleles[0].len() != 1 || alleles[1].len() != 1 {
                tracing::debug!("Only SNVs wanted, disregarding {contig}:{pos}");
                n_indels += 1;
                continue;
            }

            let ref_allele = String::from_utf8_lossy(alleles[0]).to_string();
            let alt_allele = String::from_utf8_lossy(alleles[1]).to_string();
            let name = String::from_utf8_lossy(&record.id()).to_string();

            let genotypes = record.genotypes()?;
            let gp = record.format(b"GP").float().ok();

            if gp.is_none() {
                n_no_gp += 1;
            }

            let mut geno_probs = Vec::with_capacity(n_samples * 3);
            let mut haplotypes = Vec::with_capacity(n_samples * 2);

            for i in 0..n_samples {
                let gt = genotypes.get(i);

                let probs = gp
                    .as_ref()
                    .and_then(|gp| parse_genotype_probs(gp[i]))
                    .unwrap_or_else(|| hard_call_probs(&gt));

                geno_probs.extend(probs);
                haplotypes.extend(haplotype_pair(&gt));
            }

            builder.push(SnpRow {
                contig,
                pos,
                name,
                ref_allele,
                alt_allele,
                geno_probs,
                haplotypes,
            })?;
        }

        if n_indels > 0 {
            tracing::info!("Skipped {n_indels} records which are not SNVs");
        }
        if n_no_gp > 0 {
            tracing::info!("{n_no_gp} records have no GP field, genotype probabilities derived from GT");
        }

        let table = builder.finish()?;
        tracing::info!(
            "Read {} SNPs for {} samples on {} contigs",
            table.n_snps(),
            table.samples.len(),
            table.contigs.len()
        );

        Ok(table)
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn n_snps(&self) -> usize {
        self.contigs.values().map(|c| c.info.len()).sum()
    }
}

impl RegionIndex for SnpTable {
    fn n_samples(&self) -> usize {
        self.samples.len()
    }

    fn fetch(&self, region: &Region) -> Vec<IndexedSnp<'_>> {
        let Some(contig) = self.contigs.get(&region.contig) else {
            return vec![];
        };

        contig
            .index
            .range(region.start..=region.end)
            .map(|(_, &row)| {
                let info = &contig.info[row];
                IndexedSnp {
                    pos: info.pos,
                    name: &info.name,
                    ref_allele: &info.ref_allele,
                    alt_allele: &info.alt_allele,
                    geno_probs: contig.geno_probs.row(row),
                    haplotypes: contig.haplotypes.row(row),
                }
            })
            .collect()
    }
}

fn allele_to_hap(allele: &GenotypeAllele) -> i8 {
    match allele.index() {
        Some(0) => 0,
        Some(1) => 1,
        _ => HAP_UNDEF,
    }
}

/// The phase is stored on the second allele, e.g. 0|1 is [Unphased(0), Phased(1)].
/// Homozygous genotypes need no phase, unphased heterozygotes and missing alleles are undefined.
fn haplotype_pair(gt: &[GenotypeAllele]) -> [i8; 2] {
    match gt {
        [first, second @ GenotypeAllele::Phased(_)] => [allele_to_hap(first), allele_to_hap(second)],
        [first, second] if first.index().is_some() && first.index() == second.index() => {
            let hap = allele_to_hap(first);
            [hap, hap]
        }
        _ => [HAP_UNDEF, HAP_UNDEF],
    }
}

fn parse_genotype_probs(values: &[f32]) -> Option<[f32; 3]> {
    match values {
        [hom_ref, het, hom_alt, ..] if [hom_ref, het, hom_alt].iter().all(|v| v.is_finite()) => {
            Some([*hom_ref, *het, *hom_alt])
        }
        _ => None,
    }
}

fn hard_call_probs(gt: &[GenotypeAllele]) -> [f32; 3] {
    let indexes: Option<Vec<u32>> = gt.iter().map(|a| a.index()).collect();

    match indexes.as_deref() {
        Some([a, b]) => match a + b {
            0 => [1.0, 0.0, 0.0],
            1 => [0.0, 1.0, 0.0],
            2 => [0.0, 0.0, 1.0],
            _ => [0.0; 3],
        },
        _ => [0.0; 3],
    }
}

#[cfg(test)]
#[rustfmt::skip]
mod tests {
    use super::*;

    use GenotypeAllele::{Phased, PhasedMissing, Unphased, UnphasedMissing};

    fn row(contig: &str, pos: u64, haplotypes: Vec<i8>) -> SnpRow {
        SnpRow {
            contig: contig.to_string(),
            pos,
            name: format!("rs{pos}"),
            ref_allele: "A".to_string(),
            alt_allele: "G".to_string(),
            geno_probs: vec![0.0, 1.0, 0.0, 1.0, 0.0, 0.0],
            haplotypes,
        }
    }

    #[test]
    fn test_haplotype_pair() {
        assert_eq!([0, 1], haplotype_pair(&[Unphased(0), Phased(1)]));
        assert_eq!([1, 0], haplotype_pair(&[Unphased(1), Phased(0)]));
        assert_eq!([1, 1], haplotype_pair(&[Unphased(1), Unphased(1)]));
        assert_eq!([HAP_UNDEF, HAP_UNDEF], haplotype_pair(&[Unphased(0), Unphased(1)]));
        assert_eq!([HAP_UNDEF, HAP_UNDEF], haplotype_pair(&[UnphasedMissing, UnphasedMissing]));
        assert_eq!([HAP_UNDEF, HAP_UNDEF], haplotype_pair(&[Unphased(0), PhasedMissing]));
        assert_eq!([HAP_UNDEF, HAP_UNDEF], haplotype_pair(&[Unphased(1)]));
    }

    #[test]
    fn test_genotype_probs() {
        assert_eq!(Some([0.1, 0.8, 0.1]), parse_genotype_probs(&[0.1, 0.8, 0.1]));
        assert_eq!(None, parse_genotype_probs(&[0.1, 0.8]));
        assert_eq!(None, parse_genotype_probs(&[f32::NAN, 0.8, 0.1]));

        assert_eq!([1.0, 0.0, 0.0], hard_call_probs(&[Unphased(0), Phased(0)]));
        assert_eq!([0.0, 1.0, 0.0], hard_call_probs(&[Unphased(1), Unphased(0)]));
        assert_eq!([0.0, 0.0, 1.0], hard_call_probs(&[Unphased(1), Phased(1)]));
        assert_eq!([0.0; 3], hard_call_probs(&[UnphasedMissing, PhasedMissing]));
    }

    #[test]
    fn test_fetch_region() {
        let samples = vec!["S1".to_string(), "S2".to_string()];
        let rows = vec![
            row("chr1", 10, vec![0, 1, 0, 0]),
            row("chr1", 20, vec![1, 0, 0, 0]),
            row("chr1", 30, vec![1, 1, 0, 1]),
            row("chr2", 20, vec![0, 0, 1, 1]),
        ];
        let table = SnpTable::from_rows(samples, rows).unwrap();
        assert_eq!(4, table.n_snps());
        assert_eq!(2, table.n_samples());

        let snps = table.fetch(&Region::new("chr1", 15, 30).unwrap());
        assert_eq!(vec![20, 30], snps.iter().map(|s| s.pos).collect::<Vec<_>>());
        assert_eq!("rs20", snps[0].name);
        assert_eq!(vec![1, 0, 0, 0], snps[0].haplotypes.to_vec());
        assert_eq!(6, snps[0].geno_probs.len());

        assert!(table.fetch(&Region::new("chr1", 31, 100).unwrap()).is_empty());
        assert!(table.fetch(&Region::new("chrX", 1, 100).unwrap()).is_empty());
    }

    #[test]
    fn test_rows_are_validated() {
        let samples = vec!["S1".to_string(), "S2".to_string()];

        let rows = vec![row("chr1", 20, vec![0, 1, 0, 0]), row("chr1", 10, vec![0, 1, 0, 0])];
        assert!(matches!(SnpTable::from_rows(samples.clone(), rows), Err(Error::Order { .. })));

        let rows = vec![row("chr1", 20, vec![0, 1])];
        assert!(SnpTable::from_rows(samples.clone(), rows).is_err());

        let rows = vec![row("chr1", 20, vec![0, 1, 0, 0]), row("chr1", 20, vec![1, 1, 1, 1])];
        let table = SnpTable::from_rows(samples, rows).unwrap();
        assert_eq!(1, table.n_snps());
    }
}
