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

use crate::error::Error;
use crate::structs::Region;
use crate::utils::parse_position_list;

/// Marker for a line without a test SNP
pub const SKIP_MARKER: &str = "NA";

const MIN_FIELDS: usize = 9;

/// A test SNP and the target region(s) as read from one input line
#[derive(Debug, Clone, PartialEq)]
pub struct TestLine {
    pub contig: String,
    pub pos: u64,
    pub name: String,
    pub ref_allele: String,
    pub alt_allele: String,
    pub starts: Vec<u64>,
    pub ends: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputLine {
    /// The test SNP field is the skip marker
    Skip { contig: String },
    Malformed { contig: String, reason: String },
    Test(TestLine),
}

/// Fields: chrom, test SNP pos, name, ref, alt, two unused fields, `;` joined starts, `;` joined ends.
/// Returns `None` for empty and `#` comment lines.
pub fn parse_line(line: &str) -> Option<InputLine> {
    let line = line.trim_end();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    let contig = fields[0].to_string();

    if fields.get(1) == Some(&SKIP_MARKER) {
        return Some(InputLine::Skip { contig });
    }

    if fields.len() < MIN_FIELDS {
        let reason = format!("expected at least {MIN_FIELDS} fields, got {}", fields.len());
        return Some(InputLine::Malformed { contig, reason });
    }

    let pos = match fields[1].parse::<u64>() {
        Ok(pos) => pos,
        Err(e) => {
            let reason = format!("invalid test SNP position {:?}: {e}", fields[1]);
            return Some(InputLine::Malformed { contig, reason });
        }
    };

    let (starts, ends) = match (parse_position_list(fields[7]), parse_position_list(fields[8])) {
        (Ok(starts), Ok(ends)) => (starts, ends),
        (Err(e), _) | (_, Err(e)) => {
            let reason = format!("invalid region coordinates {:?} {:?}: {e}", fields[7], fields[8]);
            return Some(InputLine::Malformed { contig, reason });
        }
    };

    Some(InputLine::Test(TestLine {
        contig,
        pos,
        name: fields[2].to_string(),
        ref_allele: fields[3].to_string(),
        alt_allele: fields[4].to_string(),
        starts,
        ends,
    }))
}

impl TestLine {
    /// Pair up the start and end coordinates, optionally recentering each
    /// sub-interval to `target_size`. Ends are clamped to `contig_len`.
    /// `Ok(None)` if a sub-interval starts past the end of the contig.
    pub fn target_regions(&self, target_size: Option<u64>, contig_len: u64) -> Result<Option<Vec<Region>>, Error> {
        if self.starts.len() != self.ends.len() {
            return Err(Error::coordinate(format!(
                "number of start ({}) and end ({}) positions do not match",
                self.starts.len(),
                self.ends.len()
            )));
        }

        let mut regions = Vec::with_capacity(self.starts.len());

        for (&start, &end) in self.starts.iter().zip(self.ends.iter()) {
            let region = Region::new(&self.contig, start, end)?;
            let region = match target_size {
                Some(size) => region.with_target_size(size, contig_len),
                None => region.clamp_to(contig_len),
            };

            match region {
                Some(region) => regions.push(region),
                None => return Ok(None),
            }
        }

        Ok(Some(regions))
    }
}
