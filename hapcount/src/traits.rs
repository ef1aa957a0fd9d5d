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

use ndarray::{Array1, ArrayView1};

use crate::structs::Region;

/// A SNP row of the genotype table with the values of every sample
#[derive(Debug, Clone)]
pub struct IndexedSnp<'a> {
    pub pos: u64,
    pub name: &'a str,
    pub ref_allele: &'a str,
    pub alt_allele: &'a str,
    /// Three genotype probabilities per sample: P(hom ref), P(het), P(hom alt)
    pub geno_probs: ArrayView1<'a, f32>,
    /// Two haplotype alleles per sample
    pub haplotypes: ArrayView1<'a, i8>,
}

/// Lookup of the SNPs overlapping a genomic interval
pub trait RegionIndex {
    fn n_samples(&self) -> usize;

    /// SNP rows within the region in position order
    fn fetch(&self, region: &Region) -> Vec<IndexedSnp<'_>>;
}

/// Per-position read counts along the genome
pub trait CountTrack {
    /// Dense counts for every position of the region, `region.len()` values
    fn counts(&self, region: &Region) -> Array1<u64>;

    /// Sum of all counts on a contig
    fn contig_total(&self, contig: &str) -> u64;
}
