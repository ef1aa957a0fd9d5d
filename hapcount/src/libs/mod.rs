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

/// Input args
pub mod args;

/// Errors
pub mod error;

/// IO functions
pub mod io;

/// Regions, SNPs and haplotype alleles
pub mod structs;

#[doc(hidden)]
pub mod utils;

/// SNP table read from a phased VCF
pub mod snp_table;

/// bedGraph read count tracks
pub mod count_track;

/// Clap API for HAPCOUNT
#[cfg(feature = "clap")]
pub mod clap;
