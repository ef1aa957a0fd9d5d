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

use ndarray::Array1;
use rand::Rng;

use crate::args::HomozygousPolicy;
use crate::error::Error;
use crate::structs::{HapAllele, HapCounts, Region, Snp};
use crate::traits::CountTrack;

/// Raw ref, alt and other allele counts over one sub-interval of a target region
#[derive(Debug, Clone, PartialEq)]
pub struct RawCounts {
    pub region: Region,
    pub ref_counts: Array1<u64>,
    pub alt_counts: Array1<u64>,
    pub other_counts: Array1<u64>,
}

impl RawCounts {
    pub fn fetch<C: CountTrack>(region: &Region, ref_track: &C, alt_track: &C, other_track: &C) -> Self {
        Self {
            region: region.clone(),
            ref_counts: ref_track.counts(region),
            alt_counts: alt_track.counts(region),
            other_counts: other_track.counts(region),
        }
    }

    /// (ref, alt, other) at a position inside the sub-interval
    pub fn at(&self, pos: u64) -> Option<(u64, u64, u64)> {
        let offset = self.region.offset(pos)?;
        Some((
            *self.ref_counts.get(offset)?,
            *self.alt_counts.get(offset)?,
            *self.other_counts.get(offset)?,
        ))
    }
}

/// Which haplotype copy the reference allele of the test SNP sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseReference {
    /// Index of the "reference" haplotype, from the test SNP or a coin flip
    Haplotype(usize),
    /// Report zero ref and alt haplotype counts
    Zero,
    /// Flip a coin for every linked SNP
    RandomAllele,
}

impl PhaseReference {
    /// Uses the test SNP when it is a phased heterozygote and otherwise falls back to `policy`.
    /// Consumes one draw from `rng` only for `rand_hap`.
    pub fn determine<R: Rng>(test_snp: Option<&Snp>, policy: HomozygousPolicy, rng: &mut R) -> Self {
        if let Some(snp) = test_snp.filter(|s| s.is_phased_heterozygote()) {
            let ref_idx = match snp.haplotypes[0] {
                HapAllele::Ref => 0,
                _ => 1,
            };
            return Self::Haplotype(ref_idx);
        }

        match policy {
            HomozygousPolicy::Zero => Self::Zero,
            HomozygousPolicy::RandHap => Self::Haplotype(if rng.gen_bool(0.5) { 0 } else { 1 }),
            HomozygousPolicy::RandAllele => Self::RandomAllele,
        }
    }
}

/// Split the raw allele counts of each linked heterozygous SNP into reference and
/// alternate haplotype counts relative to the phase of the test SNP.
///
/// A SNP gets its counts from the first sub-interval containing it. SNPs outside
/// every sub-interval are left without counts.
pub fn assign_haplotype_counts<R: Rng>(
    test_snp: Option<&Snp>,
    linked_snps: &mut [Snp],
    raw_counts: &[RawCounts],
    policy: HomozygousPolicy,
    rng: &mut R,
) -> Result<(), Error> {
    let phase = PhaseReference::determine(test_snp, policy, rng);

    for snp in linked_snps.iter_mut() {
        let Some((ref_count, alt_count, other)) = raw_counts.iter().find_map(|r| r.at(snp.pos)) else {
            tracing::debug!("No count interval contains linked SNP {}:{}", snp.contig, snp.pos);
            continue;
        };

        let (ref_hap, alt_hap) = match phase {
            PhaseReference::Haplotype(ref_idx) => match snp.haplotypes[ref_idx] {
                HapAllele::Ref => (ref_count, alt_count),
                HapAllele::Alt => (alt_count, ref_count),
                HapAllele::Undefined => {
                    return Err(Error::UndefinedHaplotype {
                        contig: snp.contig.clone(),
                        pos: snp.pos,
                    })
                }
            },
            PhaseReference::Zero => (0, 0),
            PhaseReference::RandomAllele if rng.gen_bool(0.5) => (ref_count, alt_count),
            PhaseReference::RandomAllele => (alt_count, ref_count),
        };

        snp.counts = Some(HapCounts {
            ref_hap,
            alt_hap,
            other,
        });
    }

    Ok(())
}
