//! Matrix writer.
//!
//! Emits a PHYLIP-format lower-triangular-symmetric distance matrix:
//! a genome-count header line, then one row per genome with a fixed-width
//! short name and one 15-fractional-digit field per column.

use std::fs::File;
use std::io::{self, Write};

/// Write one PHYLIP matrix file. `short_names` and `matrix` must have the
/// same length; `matrix` must be square.
pub fn write_matrix(path: &str, short_names: &[String], matrix: &[Vec<f64>]) -> io::Result<()> {
    let mut out = File::create(path)?;
    writeln!(out, "{}", short_names.len())?;

    for (name, row) in short_names.iter().zip(matrix.iter()) {
        write!(out, "{name:<10}")?;
        for value in row {
            write!(out, " {value:.15}")?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Build the output filename for one metric:
/// `{prefix}.{set|vec}.{metric}.lvl{NNN}.phy`.
pub fn matrix_filename(prefix: &str, kind: &str, metric: &str, level: u32) -> String {
    format!("{prefix}.{kind}.{metric}.lvl{level:03}.phy")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};

    #[test]
    fn test_matrix_filename_format() {
        assert_eq!(matrix_filename("gc", "set", "jaccard", 4), "gc.set.jaccard.lvl004.phy");
        assert_eq!(matrix_filename("gc", "vec", "jc", 12), "gc.vec.jc.lvl012.phy");
    }

    #[test]
    fn test_write_matrix_pads_names_and_fixes_fractional_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.phy");

        let names = vec!["genomeA   ".to_string(), "genomeB   ".to_string()];
        let matrix = vec![vec![0.0, 0.25], vec![0.25, 0.0]];
        write_matrix(path.to_str().unwrap(), &names, &matrix).unwrap();

        let file = File::open(&path).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();

        assert_eq!(lines.len(), 3); // N+1 lines
        assert_eq!(lines[0], "2");
        assert!(lines[1].starts_with("genomeA   "));
        assert!(lines[2].starts_with("genomeB   "));

        for line in &lines[1..] {
            for field in line[10..].split_whitespace() {
                let fractional = field.split('.').nth(1).unwrap();
                assert_eq!(fractional.len(), 15);
            }
        }
    }

    #[test]
    fn test_write_matrix_handles_nan_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nan.phy");

        let names = vec!["a         ".to_string()];
        let matrix = vec![vec![f64::NAN]];
        write_matrix(path.to_str().unwrap(), &names, &matrix).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("NaN"));
    }
}
