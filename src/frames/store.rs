//! Frame sequence store and the one-shot background loader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use super::codec::EncodedFrame;

/// Ordered frame sequence, immutable after load.
#[derive(Debug, Default)]
pub struct FrameStore {
    frames: Vec<EncodedFrame>,
}

impl FrameStore {
    /// Empty store: nothing loaded yet, or the load failed
    pub fn empty() -> Self {
        Self { frames: Vec::new() }
    }

    /// Parse a frame-sequence document (JSON array of arrays of
    /// alternating value/count integers).
    ///
    /// Frames whose runs do not cover `expected_cells` cells are kept
    /// (decoding is total either way) but counted in a single warning,
    /// so bad input shows up at load time rather than per tick.
    pub fn from_json(reader: impl Read, expected_cells: usize) -> Result<Self, String> {
        let frames: Vec<EncodedFrame> =
            serde_json::from_reader(reader).map_err(|e| format!("bad frame document: {}", e))?;

        let malformed = frames
            .iter()
            .filter(|frame| frame.cell_total() != expected_cells)
            .count();
        if malformed > 0 {
            log::warn!(
                "{} of {} frames do not cover {} cells",
                malformed,
                frames.len(),
                expected_cells
            );
        }

        Ok(Self { frames })
    }

    /// Load a frame-sequence document from disk
    pub fn load(path: &Path, expected_cells: usize) -> Result<Self, String> {
        let file =
            File::open(path).map_err(|e| format!("cannot open {}: {}", path.display(), e))?;
        Self::from_json(BufReader::new(file), expected_cells)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&EncodedFrame> {
        self.frames.get(index)
    }
}

/// Spawn the one-shot loader thread.
///
/// The thread parses the document, sends a single result, and exits;
/// poll the receiver with `try_recv` from the event loop. The send is
/// allowed to fail if the receiver was dropped during shutdown.
pub fn spawn_loader_thread(
    path: PathBuf,
    expected_cells: usize,
) -> mpsc::Receiver<Result<FrameStore, String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(FrameStore::load(&path, expected_cells));
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_parses_frames() {
        let doc = "[[0, 3, 1, 1], [1, 4]]";
        let store = FrameStore::from_json(doc.as_bytes(), 4).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0), Some(&EncodedFrame(vec![0, 3, 1, 1])));
        assert_eq!(store.get(1), Some(&EncodedFrame(vec![1, 4])));
        assert_eq!(store.get(2), None);
    }

    #[test]
    fn test_from_json_rejects_bad_document() {
        let err = FrameStore::from_json("not json".as_bytes(), 4).unwrap_err();
        assert!(err.contains("bad frame document"));
    }

    #[test]
    fn test_from_json_keeps_malformed_frames() {
        // Wrong coverage is warned about, not rejected
        let store = FrameStore::from_json("[[1, 2]]".as_bytes(), 4).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_store() {
        let store = FrameStore::empty();
        assert!(store.is_empty());
        assert_eq!(store.get(0), None);
    }

    #[test]
    fn test_loader_thread_reports_missing_file() {
        let rx = spawn_loader_thread(PathBuf::from("/nonexistent/frames.json"), 4);
        let result = rx.recv().unwrap();
        assert!(result.is_err());
    }
}
