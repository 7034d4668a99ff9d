/*
 * File: /main.rs
 * Created Date: Tuesday, March 4th 2025
 * Author: Zihan
 * -----
 * Last Modified: Sunday, 6th April 2025 6:03:27 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */

use std::env;
use std::error::Error;
use std::fs;
use std::process;

use chrono::Local;
use log::{info, LevelFilter};

use fast_fraudar::config::{load_edges, Config};
use fast_fraudar::{Detector, SparseMatrix};

fn timestamp() -> String {
    // Get the current time
    Local::now().format("%H:%M:%S").to_string()
}

fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let edges = load_edges(config.get_input())?;
    info!(
        "[{}] loaded {} edges from {}",
        timestamp(),
        edges.len(),
        config.get_input()
    );

    let matrix = SparseMatrix::from_edges(&edges)?;
    info!(
        "[{}] matrix is {}x{} with {} entries",
        timestamp(),
        matrix.nrows(),
        matrix.ncols(),
        matrix.nnz()
    );

    let detector = Detector::builder()
        .with_weighting(config.get_weighting())
        .num_blocks(config.get_blocks())
        .build();
    let result = detector.detect(&matrix)?;
    info!("[{}] {}", timestamp(), result.summary());

    for (idx, block) in result.blocks.iter().enumerate() {
        let rows: Vec<String> = block.row_indices.iter().map(|r| r.to_string()).collect();
        let cols: Vec<String> = block.col_indices.iter().map(|c| c.to_string()).collect();
        fs::write(
            format!("{}.block{}.rows", config.get_output(), idx),
            rows.join("\n"),
        )?;
        fs::write(
            format!("{}.block{}.cols", config.get_output(), idx),
            cols.join("\n"),
        )?;
        println!(
            "block {}: {} rows, {} cols, score {:.4}",
            idx,
            block.row_indices.len(),
            block.col_indices.len(),
            block.ave_score
        );
    }
    Ok(())
}

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .expect("Failed to initialize logger");

    let config = match Config::new(env::args()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("usage: fast_fraudar <edge list> <unweighted|sqrt|log> <blocks> <output stem>");
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    if let Err(err) = run(config) {
        eprintln!("{}", err);
        process::exit(1);
    }
}
