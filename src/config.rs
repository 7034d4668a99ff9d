/**
 * File: /src/config.rs
 * Created Date: Tuesday, March 11th 2025
 * Author: Zihan
 * -----
 * Last Modified: Tuesday, 11th March 2025 10:31:08 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */
use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::error::DetectorError;
use crate::weighting::Weighting;

pub struct Config {
    // path to the edge list file
    input:     String,
    // column weighting policy
    weighting: Weighting,
    // how many blocks to extract
    blocks:    usize,
    // stem for the .rows/.cols output files
    output:    String,
}

impl Config {
    /// constructor
    ///
    /// # Examples
    /// ```bash
    /// $ cargo run -- data/edges.txt log 1 output/amazon
    /// ```
    pub fn new(
        mut args: impl Iterator<Item = String>,
    ) -> Result<Config, Box<dyn std::error::Error>> {
        // read args
        // args:
        // 0: program name
        // 1: edge list path
        // 2: weighting (unweighted | sqrt | log)
        // 3: number of blocks
        // 4: output stem
        args.next();
        let input = args.next().ok_or("missing edge list path")?;
        let weighting = args
            .next()
            .ok_or("missing weighting (unweighted | sqrt | log)")?
            .parse::<Weighting>()?;
        let blocks = args.next().ok_or("missing number of blocks")?.parse::<usize>()?;
        let output = args.next().ok_or("missing output stem")?;

        Ok(Config {
            input,
            weighting,
            blocks,
            output,
        })
    }

    pub fn get_input(&self) -> &str {
        &self.input
    }

    pub fn get_weighting(&self) -> Weighting {
        self.weighting
    }

    pub fn get_blocks(&self) -> usize {
        self.blocks
    }

    pub fn get_output(&self) -> &str {
        &self.output
    }
}

/// Read an edge list file: one `row col` pair of integer indices per line,
/// whitespace separated, extra columns ignored. Negative indices are
/// rejected before they can reach the matrix.
pub fn load_edges(path: &str) -> Result<Vec<(usize, usize)>, Box<dyn std::error::Error>> {
    let reader = BufReader::new(File::open(path)?);
    let mut edges = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let mut toks = line.split_whitespace();
        let (row, col) = match (toks.next(), toks.next()) {
            (Some(r), Some(c)) => (r.parse::<i64>()?, c.parse::<i64>()?),
            (None, _) => continue, // blank line
            _ => {
                return Err(Box::new(DetectorError::InvalidInput(format!(
                    "line {}: expected two indices",
                    lineno + 1
                ))))
            }
        };
        if row < 0 || col < 0 {
            return Err(Box::new(DetectorError::InvalidInput(format!(
                "line {}: negative index ({}, {})",
                lineno + 1,
                row,
                col
            ))));
        }
        edges.push((row as usize, col as usize));
    }
    Ok(edges)
}

// cargo run -- data/edges.txt log 1 output/amazon
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_new_config() {
        let args = vec![
            "target/debug/fast_fraudar".to_string(),
            "data/edges.txt".to_string(),
            "log".to_string(),
            "3".to_string(),
            "output/amazon".to_string(),
        ];
        let config = Config::new(args.into_iter()).unwrap();
        assert_eq!(config.get_input(), "data/edges.txt");
        assert_eq!(config.get_weighting(), Weighting::InverseLog);
        assert_eq!(config.get_blocks(), 3);
        assert_eq!(config.get_output(), "output/amazon");
    }

    #[test]
    fn test_new_config_rejects_bad_weighting() {
        let args = vec![
            "prog".to_string(),
            "edges.txt".to_string(),
            "pagerank".to_string(),
            "1".to_string(),
            "out".to_string(),
        ];
        assert!(Config::new(args.into_iter()).is_err());
    }

    #[test]
    fn test_load_edges() {
        let path = std::env::temp_dir().join("fast_fraudar_edges_ok.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "0 1").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "2\t3 extra-token").unwrap();
        drop(file);

        let edges = load_edges(path.to_str().unwrap()).unwrap();
        assert_eq!(edges, vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn test_load_edges_rejects_negative_index() {
        let path = std::env::temp_dir().join("fast_fraudar_edges_neg.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "0 -1").unwrap();
        drop(file);

        assert!(load_edges(path.to_str().unwrap()).is_err());
    }
}
