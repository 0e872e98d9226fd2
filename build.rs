//! Build script embedding the per-length dictionaries and clue lists
//!
//! `data/dictionary{N}.txt` holds one word per line and `data/clues{N}.txt`
//! holds `word|clue` lines. Each becomes a const slice in `OUT_DIR`.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

const LENGTHS: [usize; 3] = [5, 6, 7];

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));

    for length in LENGTHS {
        let dictionary = format!("data/dictionary{length}.txt");
        let clues = format!("data/clues{length}.txt");

        let mut src = header(
            &format!("Valid {length}-letter guess words"),
            &format!("DICTIONARY{length}: &[&str]"),
        );
        for word in data_lines(&dictionary) {
            let _ = writeln!(src, "    {word:?},");
        }
        src.push_str("];\n");
        emit(&out_dir.join(format!("dictionary{length}.rs")), &src);

        let mut src = header(
            &format!("Puzzle words of length {length} paired with their clues"),
            &format!("CLUES{length}: &[(&str, &str)]"),
        );
        for line in data_lines(&clues) {
            let Some((word, clue)) = line.split_once('|') else {
                panic!("{clues}: expected `word|clue`, got {line:?}");
            };
            let _ = writeln!(src, "    ({:?}, {:?}),", word.trim(), clue.trim());
        }
        src.push_str("];\n");
        emit(&out_dir.join(format!("clues{length}.rs")), &src);

        println!("cargo:rerun-if-changed={dictionary}");
        println!("cargo:rerun-if-changed={clues}");
    }
}

/// Non-empty trimmed lines of a data file
fn data_lines(path: &str) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read {path}: {e}"))
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn header(doc: &str, declaration: &str) -> String {
    format!("// @generated by build.rs\n\n/// {doc}\npub const {declaration} = &[\n")
}

fn emit(path: &Path, src: &str) {
    fs::write(path, src).unwrap_or_else(|e| panic!("cannot write {}: {e}", path.display()));
}
