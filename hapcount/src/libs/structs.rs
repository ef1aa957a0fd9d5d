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

use std::fmt;

use indexmap::IndexMap;

use crate::error::Error;

/// Haplotype value for an undefined allele in the haplotype table
pub const HAP_UNDEF: i8 = -1;

/// Linkage probability reported for every linked SNP.
/// A placeholder, there is no linkage disequilibrium model behind it.
pub const LINKAGE_PROB_PLACEHOLDER: f32 = 1.0;

/// A 1-based, inclusive genomic interval
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region {
    pub contig: String,
    pub start: u64,
    pub end: u64,
}

impl Region {
    pub fn new(contig: &str, start: u64, end: u64) -> Result<Self, Error> {
        if start < 1 {
            return Err(Error::coordinate(format!(
                "start position must be at least 1, got {contig}:{start}-{end}"
            )));
        }
        if start > end {
            return Err(Error::coordinate(format!(
                "start is larger than end in {contig}:{start}-{end}"
            )));
        }

        Ok(Self {
            contig: contig.to_string(),
            start,
            end,
        })
    }

    /// A single position, e.g. the location of a test SNP
    pub fn point(contig: &str, pos: u64) -> Result<Self, Error> {
        Self::new(contig, pos, pos)
    }

    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, pos: u64) -> bool {
        pos >= self.start && pos <= self.end
    }

    /// Offset of `pos` into arrays fetched for this region
    pub fn offset(&self, pos: u64) -> Option<usize> {
        self.contains(pos).then(|| (pos - self.start) as usize)
    }

    /// Recenter the region around its midpoint to exactly `size` bp, clamped to `[1, contig_len]`.
    /// A region that already has the wanted size is only clamped.
    /// `None` if the recentered region starts past the end of the contig.
    pub fn with_target_size(self, size: u64, contig_len: u64) -> Option<Self> {
        if size == self.len() {
            return self.clamp_to(contig_len);
        }

        let mid = (self.start + self.end) / 2;
        let start = (mid + 1).saturating_sub(size / 2).max(1);
        let end = (mid + size - size / 2).min(contig_len);

        (start <= end).then_some(Self {
            contig: self.contig,
            start,
            end,
        })
    }

    /// Cut the end at `contig_len`, `None` if the region starts past the end of the contig
    pub fn clamp_to(self, contig_len: u64) -> Option<Self> {
        (self.start <= contig_len).then(|| Self {
            end: self.end.min(contig_len),
            ..self
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}-{}", self.contig, self.start, self.end)
    }
}

/// The allele carried by one haplotype copy at a SNP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HapAllele {
    Ref,
    Alt,
    Undefined,
}

impl From<i8> for HapAllele {
    fn from(value: i8) -> Self {
        match value {
            0 => Self::Ref,
            1 => Self::Alt,
            _ => Self::Undefined,
        }
    }
}

impl From<HapAllele> for i8 {
    fn from(allele: HapAllele) -> Self {
        match allele {
            HapAllele::Ref => 0,
            HapAllele::Alt => 1,
            HapAllele::Undefined => HAP_UNDEF,
        }
    }
}

impl fmt::Display for HapAllele {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ref => write!(f, "0"),
            Self::Alt => write!(f, "1"),
            Self::Undefined => write!(f, "."),
        }
    }
}

/// Reads assigned to the haplotypes of a linked SNP
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HapCounts {
    pub ref_hap: u64,
    pub alt_hap: u64,
    pub other: u64,
}

/// A SNP with the genotype and phase of one individual
#[derive(Debug, Clone, PartialEq)]
pub struct Snp {
    pub contig: String,
    pub pos: u64,
    pub name: String,
    pub ref_allele: String,
    pub alt_allele: String,
    pub het_prob: f32,
    /// Expected alternate allele count: 0*P(hom ref) + 1*P(het) + 2*P(hom alt)
    pub dosage: f32,
    pub haplotypes: [HapAllele; 2],
    pub linkage_prob: f32,
    /// Set by the phasing step, `None` until then
    pub counts: Option<HapCounts>,
}

impl Snp {
    pub fn new(
        contig: &str,
        pos: u64,
        name: &str,
        ref_allele: &str,
        alt_allele: &str,
        geno_probs: [f32; 3],
        haplotypes: [HapAllele; 2],
    ) -> Self {
        Self {
            contig: contig.to_string(),
            pos,
            name: name.to_string(),
            ref_allele: ref_allele.to_string(),
            alt_allele: alt_allele.to_string(),
            het_prob: geno_probs[1],
            dosage: geno_probs[1] + 2.0 * geno_probs[2],
            haplotypes,
            linkage_prob: LINKAGE_PROB_PLACEHOLDER,
            counts: None,
        }
    }

    pub fn is_heterozygous(&self) -> bool {
        self.haplotypes[0] != self.haplotypes[1]
    }

    /// Heterozygous with both haplotype alleles known
    pub fn is_phased_heterozygote(&self) -> bool {
        self.is_heterozygous() && !self.haplotypes.contains(&HapAllele::Undefined)
    }

    pub fn haplotype_string(&self) -> String {
        format!("{}|{}", self.haplotypes[0], self.haplotypes[1])
    }
}

/// Chromosome lengths in the order of the chromosome table
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChromTable {
    lengths: IndexMap<String, u64>,
}

impl ChromTable {
    pub fn insert(&mut self, contig: &str, length: u64) {
        self.lengths.insert(contig.to_string(), length);
    }

    pub fn length(&self, contig: &str) -> Option<u64> {
        self.lengths.get(contig).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.lengths.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for ChromTable {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self {
            lengths: iter.into_iter().map(|(c, l)| (c.into(), l)).collect(),
        }
    }
}
