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

use std::path::{Path, PathBuf};

use color_eyre::{eyre::WrapErr, Result};
use rust_htslib::bcf::{Read, Reader};

use crate::io::{read_sample_ids, FileType};

/// Sample identifiers in individual index order
pub fn get_sample_names(path: &Path) -> Result<Vec<String>> {
    let ids = match FileType::from_path(path)? {
        FileType::VCF => {
            let bcf = Reader::from_path(path).wrap_err(format!("Error opening {path:?}"))?;
            let mut ids = vec![];
            for sample in bcf.header().samples() {
                let id = std::str::from_utf8(sample)?;
                ids.push(id.to_string());
            }
            ids
        }
        FileType::List => read_sample_ids(path)?,
    };
    Ok(ids)
}

#[doc(hidden)]
pub fn run(path: PathBuf) -> Result<()> {
    let ids = get_sample_names(&path)?;
    tracing::info!("Found {} samples in {path:?}", ids.len());
    for (idx, id) in ids.iter().enumerate() {
        println!("{idx}\t{id}");
    }
    Ok(())
}
