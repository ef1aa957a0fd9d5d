#![allow(
    clippy::too_many_arguments,
    clippy::new_without_default,
    clippy::uninlined_format_args,
    clippy::missing_errors_doc,
    clippy::too_many_lines,
    clippy::must_use_candidate,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::match_bool,
    clippy::single_match_else,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::float_cmp,
    clippy::needless_pass_by_value
)]

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

//! HAPCOUNT - Haplotype-resolved allele-specific read counts
//!
//! Builds per-individual, per-region haplotype count tables for the combined haplotype test.
//! Allele-specific read counts observed at linked heterozygous SNPs are assigned to the
//! "reference" or "alternate" haplotype of a test SNP using the phase of the individual.
//!
//! ## Running HAPCOUNT
//!
//! ```bash
//! hapcount extract regions.txt.gz \
//!     --chrom chromInfo.txt.gz \
//!     --samples samples.txt \
//!     --individual 18505 \
//!     --genotypes phased.vcf.gz \
//!     --ref-as-counts ref.bedgraph.gz \
//!     --alt-as-counts alt.bedgraph.gz \
//!     --other-as-counts other.bedgraph.gz \
//!     --read-counts read_starts.bedgraph.gz \
//!     --homozygous-as-counts rand_hap > haplotype_counts.txt
//! ```

pub mod libs;
pub use libs::{args, count_track, error, io, snp_table, structs, utils};

#[cfg(feature = "clap")]
pub use libs::clap;

/// Interfaces to the genotype and read count tracks
pub mod traits;

/// HAPCOUNT commands
pub mod subcommands;
