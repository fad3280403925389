use std::path::Path;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub(crate) enum FileFormat {
    /// A DIMACS CNF instance with a `p cnf` header.
    CnfDimacsPLine,
    /// A non-consecutive sudoku puzzle.
    Puzzle,
    /// A directory in which every `.txt` file is a puzzle.
    PuzzleDirectory,
}

impl FileFormat {
    pub(crate) fn of(path: &Path) -> Option<FileFormat> {
        if path.is_dir() {
            return Some(FileFormat::PuzzleDirectory);
        }

        match path.extension().and_then(|extension| extension.to_str()) {
            Some("cnf") => Some(FileFormat::CnfDimacsPLine),
            Some("txt" | "sudoku") => Some(FileFormat::Puzzle),
            _ => None,
        }
    }
}
