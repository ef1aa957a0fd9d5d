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

use std::collections::HashMap;
use std::path::Path;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use ndarray::Array1;

use crate::error::Error;
use crate::io::{get_input, get_tsv_reader};
use crate::structs::Region;
use crate::traits::CountTrack;

/// 0-based, half-open interval sharing a count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Interval {
    start: u64,
    end: u64,
    count: u64,
}

/// Read counts per position stored as sorted, non-overlapping bedGraph intervals
#[derive(Debug, Clone, Default)]
pub struct BedGraphTrack {
    contigs: HashMap<String, Vec<Interval>>,
    totals: HashMap<String, u64>,
}

impl BedGraphTrack {
    /// Read a bedGraph (`chrom start end count`), optionally compressed.
    /// `#`, `track` and `browser` lines are skipped.
    pub fn from_path(path: &Path) -> Result<Self> {
        tracing::info!("Reading read counts from {path:?}");

        let input = get_input(Some(path.to_path_buf()))?;
        let mut rdr = get_tsv_reader(input, false);

        let mut track = Self::default();

        for (i, record) in rdr.records().enumerate() {
            let record = record?;

            let contig = match record.get(0) {
                Some(c) if c.starts_with("track") || c.starts_with("browser") => continue,
                Some(c) => c,
                None => continue,
            };

            let fields = (record.get(1), record.get(2), record.get(3));
            let (Some(start), Some(end), Some(count)) = fields else {
                return Err(eyre!("Expected 4 columns on line {} of bedGraph {path:?}", i + 1));
            };

            let parse = |v: &str| {
                v.trim()
                    .parse::<u64>()
                    .wrap_err(eyre!("Invalid value {v:?} on line {} of bedGraph {path:?}", i + 1))
            };

            track.push(contig, parse(start)?, parse(end)?, parse(count)?)
                .map_err(|(prev_pos, pos)| {
                    eyre!(Error::Sort {
                        prev_pos,
                        pos,
                        contig: contig.to_string(),
                        path: path.to_path_buf(),
                    })
                })?;
        }

        tracing::debug!(
            "Read {} count intervals on {} contigs",
            track.contigs.values().map(Vec::len).sum::<usize>(),
            track.contigs.len()
        );

        Ok(track)
    }

    /// Counts at 1-based positions. Counts at the same position are added up.
    #[cfg(test)]
    pub(crate) fn from_positions<S, I>(counts: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, u64, u64)>,
    {
        let mut by_contig: HashMap<String, Vec<(u64, u64)>> = HashMap::new();
        for (contig, pos, count) in counts {
            by_contig.entry(contig.into()).or_default().push((pos, count));
        }

        let mut track = Self::default();

        for (contig, mut positions) in by_contig {
            positions.sort_unstable();

            let mut merged: Vec<(u64, u64)> = vec![];
            for (pos, count) in positions {
                match merged.last_mut() {
                    Some((prev, total)) if *prev == pos => *total += count,
                    _ => merged.push((pos, count)),
                }
            }

            for (pos, count) in merged {
                track.push(&contig, pos.saturating_sub(1), pos, count).unwrap();
            }
        }

        track
    }

    /// On failure returns the end of the previous interval and the offending start
    fn push(&mut self, contig: &str, start: u64, end: u64, count: u64) -> Result<(), (u64, u64)> {
        if end <= start || count == 0 {
            return Ok(());
        }

        let intervals = self.contigs.entry(contig.to_string()).or_default();

        if let Some(prev) = intervals.last() {
            if start < prev.end {
                return Err((prev.end, start));
            }
        }

        intervals.push(Interval { start, end, count });
        *self.totals.entry(contig.to_string()).or_default() += (end - start) * count;

        Ok(())
    }
}

impl CountTrack for BedGraphTrack {
    fn counts(&self, region: &Region) -> Array1<u64> {
        let mut counts = Array1::zeros(region.len() as usize);

        let Some(intervals) = self.contigs.get(&region.contig) else {
            return counts;
        };

        // Region is 1-based and inclusive, intervals are 0-based and half-open
        let (start, end) = (region.start - 1, region.end);

        let first = intervals.partition_point(|iv| iv.end <= start);

        for iv in intervals[first..].iter().take_while(|iv| iv.start < end) {
            for p in iv.start.max(start)..iv.end.min(end) {
                counts[(p - start) as usize] += iv.count;
            }
        }

        counts
    }

    fn contig_total(&self, contig: &str) -> u64 {
        self.totals.get(contig).copied().unwrap_or(0)
    }
}
