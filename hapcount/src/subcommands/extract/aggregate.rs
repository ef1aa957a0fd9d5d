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

use crate::structs::{ChromTable, Region};
use crate::traits::CountTrack;

/// Total reads over every sub-interval of a target region. Overlapping sub-intervals are counted twice.
pub fn sum_read_counts<C: CountTrack>(track: &C, regions: &[Region]) -> u64 {
    regions.iter().map(|r| track.counts(r).sum()).sum()
}

/// Total reads over all chromosomes of the chromosome table
pub fn genome_wide_read_count<C: CountTrack>(track: &C, chroms: &ChromTable) -> u64 {
    chroms.names().map(|c| track.contig_total(c)).sum()
}
