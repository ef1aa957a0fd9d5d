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

use std::num::ParseIntError;

/// Prefix of Coriell sample identifiers which is not used in the individual ids, e.g. NA18505
pub const SAMPLE_PREFIX: &str = "NA";

pub fn normalize_sample_id(id: &str) -> &str {
    id.strip_prefix(SAMPLE_PREFIX).unwrap_or(id)
}

/// Index of an individual in a list of sample ids, compared without the `NA` prefix
pub fn find_individual_index(samples: &[String], individual: &str) -> Option<usize> {
    let individual = normalize_sample_id(individual);

    samples
        .iter()
        .position(|s| normalize_sample_id(s) == individual)
}

// Coordinates are in the format [pos1];[pos2];...
pub fn parse_position_list(field: &str) -> Result<Vec<u64>, ParseIntError> {
    field.split(';').map(|v| v.trim().parse::<u64>()).collect()
}
