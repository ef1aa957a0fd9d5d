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

use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, OptionExt, WrapErr};
use color_eyre::Result;
use csv::{QuoteStyle, Reader, ReaderBuilder, Writer, WriterBuilder};

use crate::error::Error;
use crate::structs::ChromTable;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    VCF,
    List,
}

impl FileType {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension: &str = path
            .extension()
            .and_then(OsStr::to_str)
            .ok_or_eyre(Error::NoFileType {
                path: path.to_path_buf(),
            })?;

        let ext = match extension {
            "gz" | "bgz" => return_double_extension_filetype(path, extension)?,
            _ => extension.to_string(),
        };

        Ok(match ext.as_str() {
            "vcf.gz" | "vcf.bgz" | "vcf" | "bcf" => Self::VCF,
            "txt" | "ids" | "list" | "samples" | "tsv" => Self::List,
            _ => return Err(eyre!(Error::FileNotSupported { ext })),
        })
    }
}

pub fn return_double_extension_filetype(path: &Path, e1: &str) -> Result<String> {
    let stem = path
        .file_stem()
        .and_then(OsStr::to_str)
        .ok_or_eyre(Error::NoFileType {
            path: path.to_path_buf(),
        })?;

    let e2 = Path::new(&stem)
        .extension()
        .and_then(OsStr::to_str)
        .ok_or_eyre(Error::FileNotSupported {
            ext: format!("{path:?}"),
        })?;

    Ok(format!("{e2}.{e1}"))
}

pub fn read_lines<P>(filename: P) -> Result<io::Lines<io::BufReader<File>>>
where
    P: AsRef<Path> + Into<PathBuf>,
{
    let file = File::open(&filename).wrap_err(Error::Io {
        path: filename.into(),
    })?;

    Ok(io::BufReader::new(file).lines())
}

/// Sample identifiers from the first whitespace separated column, empty lines are skipped
pub fn read_sample_ids(path: &Path) -> Result<Vec<String>> {
    let mut samples = vec![];

    for line in read_lines(path)? {
        let line = line?;
        if let Some(id) = line.split_whitespace().next() {
            samples.push(id.to_string());
        }
    }

    Ok(samples)
}

/// Chromosome names and lengths, e.g. a UCSC chromInfo.txt(.gz). Extra columns are ignored.
pub fn read_chrom_table(path: &Path) -> Result<ChromTable> {
    let input = get_input(Some(path.to_path_buf()))?;
    let mut rdr = get_tsv_reader(input, false);

    let mut table = ChromTable::default();

    for record in rdr.records() {
        let record = record?;

        let (contig, length) = match (record.get(0), record.get(1)) {
            (Some(contig), Some(length)) => (contig, length),
            _ => return Err(eyre!("Expected a chromosome name and length on each row of {path:?}")),
        };

        let length = length
            .trim()
            .parse::<u64>()
            .wrap_err(eyre!("Invalid length {length:?} for chromosome {contig} in {path:?}"))?;

        table.insert(contig, length);
    }

    if table.is_empty() {
        return Err(eyre!(Error::EmptyFile {
            path: path.to_path_buf()
        }));
    }

    Ok(table)
}

pub fn get_tsv_reader<R: io::Read>(input: R, has_headers: bool) -> Reader<R> {
    ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_headers)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(input)
}

/// Space delimited output rows, nothing is quoted
pub fn get_space_writer<W: io::Write>(output: W) -> Writer<W> {
    WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .double_quote(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(output)
}

pub fn get_input(filename: Option<PathBuf>) -> Result<Box<dyn io::Read>> {
    let input: Box<dyn io::Read> = match filename {
        Some(name) => match name.to_str() {
            Some("-") => Box::new(io::stdin()),
            Some(name) => {
                let (reader, _format) = niffler::from_path(name)
                    .map_err(|err| eyre!("failed to open \"{name}\": {err}"))?;
                reader
            }
            None => return Err(eyre!("Unknown I/O error")),
        },
        None => Box::new(io::stdin()),
    };
    Ok(input)
}

pub fn get_output(filename: Option<PathBuf>) -> Result<Box<dyn io::Write>> {
    let output: Box<dyn io::Write> = match filename {
        Some(name) => match name.to_str() {
            Some("-") => Box::new(io::stdout()),
            Some(path) => Box::new(
                File::options()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(path)
                    .wrap_err(Error::Io {
                        path: PathBuf::from(path),
                    })?,
            ),
            None => return Err(eyre!("Output path {name:?} is not valid UTF-8")),
        },
        None => Box::new(io::stdout()),
    };
    Ok(output)
}
