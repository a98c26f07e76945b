//! File I/O for saving and loading puzzle solutions.
//!
//! Binary format for `solutions.bin`:
//! - u32 (little endian): solution count
//! - repeat per solution: 20 bytes, the piece symbol of each cell in order
//!
//! `solutions.txt` holds the same solutions as pyramid diagrams.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::grid::{format_pyramid, Solution};
use crate::lattice::CELL_COUNT;
use crate::pieces::piece_by_symbol;

pub const SOLUTIONS_BIN: &str = "solutions.bin";
pub const SOLUTIONS_TXT: &str = "solutions.txt";

/// Formats solutions as the numbered report printed by the solver.
pub fn format_report(solutions: &[Solution]) -> String {
    let mut output = String::new();
    for (i, solution) in solutions.iter().enumerate() {
        output.push_str(&format!("Solution #{i}:\n"));
        output.push_str(&format_pyramid(solution));
        output.push('\n');
    }
    output.push_str(&format!("{} solutions found.\n", solutions.len()));
    output
}

/// Saves solutions to both binary and text files inside `dir`.
pub fn save(dir: &Path, solutions: &[Solution]) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::io("create directory", dir, e))?;
    save_text(dir, solutions)?;
    save_binary(dir, solutions)?;
    info!("saved {} solutions to {}", solutions.len(), dir.display());
    Ok(())
}

/// Saves solutions in human-readable text format.
fn save_text(dir: &Path, solutions: &[Solution]) -> Result<()> {
    let path = dir.join(SOLUTIONS_TXT);
    fs::write(&path, format_report(solutions)).map_err(|e| Error::io("write", &path, e))
}

/// Saves solutions in compact binary format for fast loading.
fn save_binary(dir: &Path, solutions: &[Solution]) -> Result<()> {
    let path = dir.join(SOLUTIONS_BIN);
    let file = File::create(&path).map_err(|e| Error::io("create", &path, e))?;
    let mut writer = BufWriter::new(file);

    let write_all = |writer: &mut BufWriter<File>| -> std::io::Result<()> {
        writer.write_all(&(solutions.len() as u32).to_le_bytes())?;
        for solution in solutions {
            writer.write_all(solution)?;
        }
        writer.flush()
    };
    write_all(&mut writer).map_err(|e| Error::io("write", &path, e))
}

/// Opens the binary file and reads its header.
///
/// Returns `None` if the file does not exist.
fn open_binary(dir: &Path) -> Result<Option<(File, usize)>> {
    let path = dir.join(SOLUTIONS_BIN);
    let mut file = match File::open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io("open", &path, e)),
    };

    let mut u32_buffer = [0u8; 4];
    file.read_exact(&mut u32_buffer).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => Error::Truncated {
            path: path.clone(),
            expected: 0,
            read: 0,
        },
        _ => Error::io("read", &path, e),
    })?;

    Ok(Some((file, u32::from_le_bytes(u32_buffer) as usize)))
}

/// Loads all solutions from the binary file.
///
/// Returns `Ok(None)` if nothing has been saved in `dir` yet.
pub fn load_all(dir: &Path) -> Result<Option<Vec<Solution>>> {
    let path = dir.join(SOLUTIONS_BIN);
    let Some((mut file, solution_count)) = open_binary(dir)? else {
        return Ok(None);
    };

    let mut solutions = Vec::with_capacity(solution_count.min(1 << 16));
    for index in 0..solution_count {
        let mut solution = [0u8; CELL_COUNT];
        file.read_exact(&mut solution).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => Error::Truncated {
                path: path.clone(),
                expected: solution_count,
                read: index,
            },
            _ => Error::io("read", &path, e),
        })?;

        if let Some(&byte) = solution.iter().find(|&&byte| piece_by_symbol(byte).is_none()) {
            return Err(Error::UnknownSymbol {
                path,
                solution: index,
                byte,
            });
        }
        solutions.push(solution);
    }

    Ok(Some(solutions))
}

/// Returns the number of saved solutions without loading them all.
pub fn count(dir: &Path) -> Result<Option<usize>> {
    Ok(open_binary(dir)?.map(|(_, solution_count)| solution_count))
}
