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

use std::io::{self, BufRead, BufReader};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::args::{ExtractArgs, HomozygousPolicy};
use crate::count_track::BedGraphTrack;
use crate::error::Error;
use crate::io::{get_input, get_output, get_space_writer, read_chrom_table};
use crate::snp_table::SnpTable;
use crate::structs::{ChromTable, Region};
use crate::traits::{CountTrack, RegionIndex};
use crate::utils::find_individual_index;

pub mod aggregate;
pub mod input;
pub mod output;
pub mod phase;
pub mod resolve;

use aggregate::{genome_wide_read_count, sum_read_counts};
use input::{parse_line, InputLine, TestLine};
use phase::{assign_haplotype_counts, RawCounts};
use resolve::{find_heterozygous_snps, find_snps_in_regions, find_test_snp};

const PROGRESS_INTERVAL: usize = 1000;

/// The genotype table and read count tracks, opened once and held for the whole run
#[derive(Debug, Clone)]
pub struct TrackSet<I, C> {
    pub index: I,
    pub ref_counts: C,
    pub alt_counts: C,
    pub other_counts: C,
    pub read_counts: C,
}

impl TrackSet<SnpTable, BedGraphTrack> {
    pub fn open(args: &ExtractArgs) -> Result<Self> {
        let index = SnpTable::from_vcf(&args.genotypes)
            .wrap_err(format!("Failed to read genotypes from {:?}", args.genotypes))?;

        Ok(Self {
            index,
            ref_counts: BedGraphTrack::from_path(&args.ref_as_counts)?,
            alt_counts: BedGraphTrack::from_path(&args.alt_as_counts)?,
            other_counts: BedGraphTrack::from_path(&args.other_as_counts)?,
            read_counts: BedGraphTrack::from_path(&args.read_counts)?,
        })
    }
}

impl<I: RegionIndex, C: CountTrack> TrackSet<I, C> {
    pub fn raw_counts(&self, regions: &[Region]) -> Vec<RawCounts> {
        regions
            .iter()
            .map(|r| RawCounts::fetch(r, &self.ref_counts, &self.alt_counts, &self.other_counts))
            .collect()
    }
}

/// Turns input lines into output rows for one individual
#[derive(Debug)]
pub struct Extractor<I, C, R> {
    tracks: TrackSet<I, C>,
    chroms: ChromTable,
    individual: usize,
    policy: HomozygousPolicy,
    target_region_size: Option<u64>,
    genome_wide_read_count: u64,
    rng: R,
}

impl<I: RegionIndex, C: CountTrack, R: Rng> Extractor<I, C, R> {
    pub fn new(
        tracks: TrackSet<I, C>,
        chroms: ChromTable,
        individual: usize,
        policy: HomozygousPolicy,
        target_region_size: Option<u64>,
        rng: R,
    ) -> Result<Self, Error> {
        let n_samples = tracks.index.n_samples();
        if individual >= n_samples {
            return Err(Error::IndividualOutOfRange {
                index: individual,
                n_samples,
            });
        }

        let genome_wide_read_count = genome_wide_read_count(&tracks.read_counts, &chroms);
        tracing::info!("Genome-wide read count: {genome_wide_read_count}");

        Ok(Self {
            tracks,
            chroms,
            individual,
            policy,
            target_region_size,
            genome_wide_read_count,
            rng,
        })
    }

    /// `None` for lines that produce no output row, i.e. empty and comment lines
    pub fn process_line(&mut self, line: &str) -> Result<Option<Vec<String>>, Error> {
        let row = match parse_line(line) {
            None => return Ok(None),
            Some(InputLine::Skip { contig }) => output::skip_row(&contig),
            Some(InputLine::Malformed { contig, reason }) => {
                tracing::warn!("Skipping malformed input line ({reason}): {line:?}");
                output::skip_row(&contig)
            }
            Some(InputLine::Test(test_line)) => self.process_test_line(&test_line)?,
        };
        Ok(Some(row))
    }

    fn process_test_line(&mut self, line: &TestLine) -> Result<Vec<String>, Error> {
        let Some(contig_len) = self.chroms.length(&line.contig) else {
            tracing::warn!("{}", Error::UnknownChromosome { contig: line.contig.clone() });
            return Ok(output::skip_row(&line.contig));
        };

        let Some(regions) = line.target_regions(self.target_region_size, contig_len)? else {
            tracing::warn!(
                "Skipping a target region past the end of {} (length {contig_len}): {}:{}",
                line.contig,
                line.contig,
                line.pos
            );
            return Ok(output::skip_row(&line.contig));
        };
        let region_read_count = sum_read_counts(&self.tracks.read_counts, &regions);

        let index = &self.tracks.index;
        let Some(test_snp) = find_test_snp(index, &line.contig, line.pos, self.individual)? else {
            tracing::warn!("Could not find test SNP at position {}:{}", line.contig, line.pos);
            return Ok(output::missing_test_snp_row(
                &line.contig,
                line.pos,
                &regions,
                region_read_count,
                self.genome_wide_read_count,
            ));
        };

        let region_snps = find_snps_in_regions(index, &regions, self.individual)?;
        let mut het_snps = find_heterozygous_snps(region_snps);

        let raw_counts = self.tracks.raw_counts(&regions);
        assign_haplotype_counts(Some(&test_snp), &mut het_snps, &raw_counts, self.policy, &mut self.rng)?;

        Ok(output::test_snp_row(
            &test_snp,
            &regions,
            &het_snps,
            region_read_count,
            self.genome_wide_read_count,
        ))
    }

    /// Write the header and one row per input line
    pub fn write_table<Rd: BufRead, W: io::Write>(&mut self, input: Rd, output: W) -> Result<()> {
        let mut wtr = get_space_writer(output);
        wtr.write_record(output::HEADER)?;

        for (i, line) in input.lines().enumerate() {
            if (i + 1) % PROGRESS_INTERVAL == 0 {
                tracing::debug!("Processed {} input lines", i + 1);
            }

            let line = line?;
            if let Some(row) = self.process_line(&line).wrap_err(format!("Failed at input line {}", i + 1))? {
                wtr.write_record(&row)?;
            }
        }

        wtr.flush()?;
        Ok(())
    }
}

#[doc(hidden)]
pub fn run(args: ExtractArgs) -> Result<()> {
    tracing::info!("Individual: {}, homozygous test SNPs as counts: {}", args.individual, args.homozygous_as_counts);
    if let Some(size) = args.target_region_size {
        tracing::info!("Setting target region size to {size}");
    }

    // Fail on an unknown individual before reading any tracks
    let listed_index = match &args.samples {
        Some(path) => Some(resolve::lookup_individual_index(path, &args.individual)?),
        None => None,
    };

    let chroms = read_chrom_table(&args.chrom)?;
    let tracks = TrackSet::open(&args)?;

    let individual = match listed_index {
        Some(idx) => idx,
        None => find_individual_index(tracks.index.samples(), &args.individual).ok_or_else(|| {
            eyre!(Error::IndividualNotFound {
                individual: args.individual.clone(),
                source_name: args.genotypes.display().to_string(),
            })
        })?,
    };
    tracing::info!("Individual {} has index {individual}", args.individual);

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut extractor = Extractor::new(
        tracks,
        chroms,
        individual,
        args.homozygous_as_counts,
        args.target_region_size,
        rng,
    )?;

    let input = BufReader::new(get_input(Some(args.input_file.clone()))?);
    let output = get_output(args.output.clone())?;
    extractor.write_table(input, output)?;

    tracing::info!("Finished extracting haplotype read counts from {:?}", args.input_file);
    Ok(())
}
