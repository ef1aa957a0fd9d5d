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

use std::path::PathBuf;

use thiserror::Error as ThisError;

#[rustfmt::skip]
#[derive(ThisError, Debug)]
pub enum Error {
    #[error("Coordinate error: {reason}")]
    Coordinate { reason: String },

    #[error("Individual {individual} is not in the samples list {source_name}")]
    IndividualNotFound { individual: String, source_name: String },

    #[error("Individual index {index} is out of range, the genotype table has {n_samples} samples")]
    IndividualOutOfRange { index: usize, n_samples: usize },

    #[error("Expected the haplotype to be defined at heterozygous SNP {contig}:{pos}")]
    UndefinedHaplotype { contig: String, pos: u64 },

    #[error("Unknown homozygous_as_counts option {value}, expected one of zero, rand_hap, rand_allele")]
    UnknownPolicy { value: String },

    #[error("Chromosome {contig} is not in the chromosome table")]
    UnknownChromosome { contig: String },

    #[error("At pos {contig}:{pos} allele count != 2. Normalize alleles using bcftools norm")]
    Normalize { contig: String, pos: u64 },

    #[error("The VCF file is not sorted: {prev_pos} > {pos} at {contig}")]
    Order { prev_pos: u64, pos: u64, contig: String },

    #[error("The file is not sorted or has overlapping intervals: {prev_pos} > {pos} at {contig}, file: {path:?}")]
    Sort { prev_pos: u64, pos: u64, contig: String, path: PathBuf },

    #[error("Failed to open file: {path:?}")]
    Io { path: PathBuf },

    #[error("Invalid UTF-8 in input: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Htslib error: {0}")]
    HtsLib(#[from] rust_htslib::errors::Error),

    #[error("Something failed in reading variants from VCF {0}")]
    ShapeError(#[from] ndarray::ShapeError),

    #[error("File contains zero rows: {path}")]
    EmptyFile { path: PathBuf },

    #[error("File type: {ext} is not supported")]
    FileNotSupported { ext: String },

    #[error("No file type extension in path: {path}")]
    NoFileType { path: PathBuf },
}

impl Error {
    pub fn coordinate(reason: impl Into<String>) -> Self {
        Self::Coordinate {
            reason: reason.into(),
        }
    }
}
