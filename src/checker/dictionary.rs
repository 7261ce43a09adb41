use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::mem;
use std::path::Path;

use crate::checker::Result;

/// How `import_file` arranges an incoming word list into a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStrategy {
    /// Insert words in input order; tree shape (and depth) follows the input.
    Sequential,
    /// Sort the distinct words and root each sub-range at its midpoint,
    /// producing a complete tree of minimal depth.
    Balanced,
}

/// The tightest stored words bounding a missed lookup.
///
/// An absent bound is the empty string, so callers can tell "no bound on
/// this side" apart from a lookup that succeeded (which returns no pair at
/// all).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborPair {
    /// Greatest stored word less than the query, or `""` if none.
    pub predecessor: String,
    /// Least stored word greater than the query, or `""` if none.
    pub successor: String,
}

#[derive(Debug)]
struct TreeNode {
    word: String,
    left: Option<Box<TreeNode>>,
    right: Option<Box<TreeNode>>,
}

impl TreeNode {
    fn new(word: String) -> Box<Self> {
        Box::new(TreeNode {
            word,
            left: None,
            right: None,
        })
    }
}

/// Word store backed by a binary search tree over case-folded words.
///
/// The on-disk format is one word per line in pre-order. Replaying those
/// lines through sequential insertion rebuilds the exact tree shape, so
/// `load` after `save` round-trips shape, not just the word set.
#[derive(Debug, Default)]
pub struct Dictionary {
    root: Option<Box<TreeNode>>,
    len: usize,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a word. Comparison is case-insensitive ASCII; a duplicate
    /// (any case) or a word that is empty after trimming is a no-op.
    pub fn add(&mut self, word: &str) {
        let word = normalize(word);
        if word.is_empty() {
            return;
        }

        let mut cur = &mut self.root;
        while let Some(node) = cur {
            match word.as_str().cmp(node.word.as_str()) {
                Ordering::Equal => return,
                Ordering::Less => cur = &mut node.left,
                Ordering::Greater => cur = &mut node.right,
            }
        }
        *cur = Some(TreeNode::new(word));
        self.len += 1;
    }

    /// Look up a word, case-insensitively.
    ///
    /// Returns `None` when the word is stored (correctly spelled). On a
    /// miss, returns the bounding neighbors gathered along the search path:
    /// the last node the descent turned right at is the predecessor, the
    /// last it turned left at is the successor. O(depth).
    pub fn find(&self, word: &str) -> Option<NeighborPair> {
        let word = normalize(word);

        let mut predecessor = "";
        let mut successor = "";
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match word.as_str().cmp(node.word.as_str()) {
                Ordering::Equal => return None,
                Ordering::Less => {
                    successor = node.word.as_str();
                    cur = node.left.as_deref();
                }
                Ordering::Greater => {
                    predecessor = node.word.as_str();
                    cur = node.right.as_deref();
                }
            }
        }

        Some(NeighborPair {
            predecessor: predecessor.to_string(),
            successor: successor.to_string(),
        })
    }

    /// Whether a word is stored, case-insensitively.
    pub fn contains(&self, word: &str) -> bool {
        self.find(word).is_none()
    }

    /// Import a one-word-per-line list with the given strategy.
    ///
    /// `Sequential` replays `add` in input order. `Balanced` rebuilds the
    /// tree from the sorted distinct words (existing entries included), so
    /// its depth is the minimal ⌈log2(n+1)⌉. Blank lines are skipped.
    pub fn import_file(&mut self, path: &Path, strategy: ImportStrategy) -> Result<()> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        match strategy {
            ImportStrategy::Sequential => {
                for line in reader.lines() {
                    self.add(&line?);
                }
            }
            ImportStrategy::Balanced => {
                let mut words = self.all_words();
                for line in reader.lines() {
                    let word = normalize(&line?);
                    if !word.is_empty() {
                        words.push(word);
                    }
                }
                words.sort();
                words.dedup();
                self.len = words.len();
                self.root = build_balanced(&mut words);
            }
        }

        Ok(())
    }

    /// Write one word per line in pre-order, each line newline-terminated.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        write_preorder(&self.root, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Reload a file produced by `save`, reconstructing the same tree shape.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.import_file(path, ImportStrategy::Sequential)
    }

    /// All stored words in sorted order.
    pub fn all_words(&self) -> Vec<String> {
        let mut words = Vec::with_capacity(self.len);
        collect_in_order(&self.root, &mut words);
        words
    }

    /// Height of the tree in nodes; an empty dictionary has depth 0.
    pub fn depth(&self) -> usize {
        subtree_depth(&self.root)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

fn normalize(word: &str) -> String {
    word.trim().to_ascii_lowercase()
}

fn write_preorder(node: &Option<Box<TreeNode>>, out: &mut impl Write) -> std::io::Result<()> {
    if let Some(node) = node {
        writeln!(out, "{}", node.word)?;
        write_preorder(&node.left, out)?;
        write_preorder(&node.right, out)?;
    }
    Ok(())
}

fn collect_in_order(node: &Option<Box<TreeNode>>, out: &mut Vec<String>) {
    if let Some(node) = node {
        collect_in_order(&node.left, out);
        out.push(node.word.clone());
        collect_in_order(&node.right, out);
    }
}

fn subtree_depth(node: &Option<Box<TreeNode>>) -> usize {
    match node {
        None => 0,
        Some(node) => 1 + subtree_depth(&node.left).max(subtree_depth(&node.right)),
    }
}

/// `words` must be sorted and deduplicated. The midpoint split keeps the
/// depth at ⌈log2(n+1)⌉ for every n.
fn build_balanced(words: &mut [String]) -> Option<Box<TreeNode>> {
    if words.is_empty() {
        return None;
    }

    let mid = words.len() / 2;
    let (left, rest) = words.split_at_mut(mid);
    let (word, right) = rest.split_first_mut()?;

    Some(Box::new(TreeNode {
        word: mem::take(word),
        left: build_balanced(left),
        right: build_balanced(right),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::CheckError;
    use std::fs;
    use tempfile::tempdir;

    // Insertion order from the reference word set; "bull" repeats on purpose.
    const WORDS: [&str; 8] = [
        "bull", "are", "genetic", "cotton", "dolly", "florida", "each", "bull",
    ];

    fn sample_dictionary() -> Dictionary {
        let mut dictionary = Dictionary::new();
        for word in WORDS {
            dictionary.add(word);
        }
        dictionary
    }

    #[test]
    fn add_is_case_insensitive_and_ignores_duplicates() {
        let mut dictionary = Dictionary::new();
        dictionary.add("Cotton");
        dictionary.add("cotton");
        dictionary.add("  COTTON  ");

        assert_eq!(dictionary.len(), 1);
        assert!(dictionary.contains("cotton"));
        assert!(dictionary.contains("CoTtOn"));
    }

    #[test]
    fn find_returns_none_for_known_words() {
        let dictionary = sample_dictionary();
        assert_eq!(dictionary.find("cotton"), None);
        assert_eq!(dictionary.find("CottoN"), None);
        assert_eq!(dictionary.find("florida"), None);
    }

    #[test]
    fn find_reports_bounding_neighbors() {
        let dictionary = sample_dictionary();

        let bounds = dictionary.find("Cotto").unwrap();
        assert_eq!(bounds.predecessor, "bull");
        assert_eq!(bounds.successor, "cotton");

        let bounds = dictionary.find("fox").unwrap();
        assert_eq!(bounds.predecessor, "florida");
        assert_eq!(bounds.successor, "genetic");
    }

    #[test]
    fn missing_bounds_are_empty_strings() {
        let dictionary = sample_dictionary();

        let below = dictionary.find("aardvark").unwrap();
        assert_eq!(below.predecessor, "");
        assert_eq!(below.successor, "are");

        let above = dictionary.find("zebra").unwrap();
        assert_eq!(above.predecessor, "genetic");
        assert_eq!(above.successor, "");
    }

    #[test]
    fn save_writes_preorder_one_word_per_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test_save.pre");

        let dictionary = sample_dictionary();
        dictionary.save(&path).unwrap();

        let saved = fs::read_to_string(&path).unwrap();
        // The duplicate collapses; pre-order of this sequentially built tree
        // is exactly the insertion order.
        assert_eq!(saved, "bull\nare\ngenetic\ncotton\ndolly\nflorida\neach\n");
    }

    #[test]
    fn load_reproduces_saved_tree_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("round_trip.pre");

        let original = sample_dictionary();
        original.save(&path).unwrap();

        let mut reloaded = Dictionary::new();
        reloaded.load(&path).unwrap();

        assert_eq!(reloaded.len(), original.len());
        assert_eq!(reloaded.depth(), original.depth());
        assert_eq!(reloaded.all_words(), original.all_words());

        // Shape equality: re-saving emits the identical byte sequence.
        let resaved = dir.path().join("round_trip_again.pre");
        reloaded.save(&resaved).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            fs::read_to_string(&resaved).unwrap()
        );
    }

    #[test]
    fn load_rebuilds_the_tree_described_by_preorder_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dict.pre");
        fs::write(&path, "mite\nlife\nbull\ncotton\njust\nzebra\n").unwrap();

        let mut dictionary = Dictionary::new();
        dictionary.load(&path).unwrap();

        // mite > life > bull > cotton > just is the deepest path.
        assert_eq!(dictionary.depth(), 5);
        assert_eq!(dictionary.find("just"), None);

        let bounds = dictionary.find("mit").unwrap();
        assert_eq!(bounds.predecessor, "life");
        assert_eq!(bounds.successor, "mite");
    }

    #[test]
    fn sequential_import_follows_input_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sorted.txt");
        fs::write(&path, "apple\nbanana\ncherry\ndate\nelderberry\n").unwrap();

        let mut dictionary = Dictionary::new();
        dictionary
            .import_file(&path, ImportStrategy::Sequential)
            .unwrap();

        // Sorted input degenerates to a right spine.
        assert_eq!(dictionary.len(), 5);
        assert_eq!(dictionary.depth(), 5);
    }

    #[test]
    fn balanced_import_meets_depth_ceiling() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");

        let words: Vec<String> = (0..100).map(|n| format!("word{:03}", n)).collect();
        fs::write(&path, words.join("\n")).unwrap();

        let mut dictionary = Dictionary::new();
        dictionary
            .import_file(&path, ImportStrategy::Balanced)
            .unwrap();

        assert_eq!(dictionary.len(), 100);
        // ceil(log2(101)) = 7
        assert_eq!(dictionary.depth(), 7);
        assert!(dictionary.contains("word042"));
    }

    #[test]
    fn balanced_import_keeps_existing_words() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "beta\ngamma\n").unwrap();

        let mut dictionary = Dictionary::new();
        dictionary.add("alpha");
        dictionary
            .import_file(&path, ImportStrategy::Balanced)
            .unwrap();

        assert_eq!(dictionary.all_words(), vec!["alpha", "beta", "gamma"]);
        assert_eq!(dictionary.depth(), 2);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gaps.txt");
        fs::write(&path, "alpha\n\n   \nbeta\n").unwrap();

        let mut dictionary = Dictionary::new();
        dictionary
            .import_file(&path, ImportStrategy::Sequential)
            .unwrap();

        assert_eq!(dictionary.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut dictionary = Dictionary::new();
        let err = dictionary
            .load(Path::new("no_such_dictionary.pre"))
            .unwrap_err();
        assert!(matches!(err, CheckError::Io(_)));
    }

    #[test]
    fn empty_dictionary_reports_empty_bounds() {
        let dictionary = Dictionary::new();
        assert_eq!(dictionary.depth(), 0);
        assert!(dictionary.is_empty());

        let bounds = dictionary.find("anything").unwrap();
        assert_eq!(bounds.predecessor, "");
        assert_eq!(bounds.successor, "");
    }
}
