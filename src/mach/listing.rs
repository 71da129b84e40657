use super::val::latin1_string;
use crate::lang::{Error, Line, LineKey};
use std::collections::BTreeMap;
use std::path::Path;

/// End of file marker written by old editors.
const CTRL_Z: char = '\u{1a}';

/// ## Program source
///
/// Physical lines keyed by line number. A line with no number of its
/// own continues the numbered line above it.

#[derive(Debug, Default)]
pub struct Listing {
    source: BTreeMap<LineKey, Entry>,
}

#[derive(Debug)]
pub struct Entry {
    pub source_line: usize,
    pub line: Line,
}

impl Listing {
    pub fn new() -> Listing {
        Listing::default()
    }

    /// Source files are read one byte per character.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let bytes = std::fs::read(path)?;
        self.load_str(&latin1_string(&bytes));
        Ok(())
    }

    /// Later lines replace earlier ones with the same key. Loading stops
    /// at a Ctrl-Z.
    pub fn load_str(&mut self, text: &str) {
        let mut key = LineKey::default();
        for (index, physical) in text.lines().enumerate() {
            if physical.starts_with(CTRL_Z) {
                break;
            }
            let line = Line::from_str(physical);
            key = match line.number() {
                Some(number) => LineKey::head(number),
                None => LineKey::new(key.number, key.sub.saturating_add(1)),
            };
            self.source.insert(
                key,
                Entry {
                    source_line: index + 1,
                    line,
                },
            );
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = (&LineKey, &Entry)> {
        self.source.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuation_keys() {
        let mut listing = Listing::new();
        listing.load_str("10 FOR I=1 TO 2\r\n  PRINT I\n  NEXT I\n20 END\n");
        let keys: Vec<String> = listing.lines().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["10.0", "10.1", "10.2", "20.0"]);
        let lines: Vec<usize> = listing.lines().map(|(_, e)| e.source_line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_stops_at_ctrl_z() {
        let mut listing = Listing::new();
        listing.load_str("10 PRINT 1\n\u{1a}\n20 PRINT 2\n");
        assert_eq!(listing.lines().count(), 1);
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prog.bas");
        std::fs::write(&path, b"10 PRINT \"\xe9\"\n").unwrap();
        let mut listing = Listing::new();
        listing.load_file(&path).unwrap();
        assert_eq!(listing.lines().count(), 1);
        assert!(listing.load_file(dir.path().join("missing.bas")).is_err());
    }
}
