//! Keyword index: prefix tree for single-pass multi-keyword scanning
//!
//! Built once per keyword set and read-only during scanning, so a shared
//! reference can be scanned from many threads without synchronization.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    /// Index into `terms` when this node ends a keyword.
    terminal: Option<usize>,
}

pub struct KeywordTrie {
    root: TrieNode,
    terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub term: String,
    pub count: usize,
    pub positions: Vec<usize>,
}

impl KeywordTrie {
    pub fn new() -> Self {
        Self {
            root: TrieNode::default(),
            terms: Vec::new(),
        }
    }

    /// Build a trie from a keyword set. Terms of 2 characters or fewer are
    /// skipped: they match everywhere and only add noise.
    pub fn build<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for keyword in keywords {
            trie.insert(keyword.as_ref());
        }
        trie
    }

    pub fn insert(&mut self, term: &str) {
        let lowered = term.to_lowercase();
        if lowered.chars().count() <= 2 {
            return;
        }

        let mut node = &mut self.root;
        for ch in lowered.chars() {
            node = node.children.entry(ch).or_default();
        }

        if node.terminal.is_none() {
            node.terminal = Some(self.terms.len());
            self.terms.push(lowered);
        }
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Scan a document in a single pass, walking the trie from every start
    /// position. Extension stops at the FIRST terminal reached: when one
    /// keyword is a prefix of another ("lead" vs "leadership"), the shorter
    /// terminal wins. This trades precision for recall; changing it to
    /// longest-match requires retuning the scoring weights.
    pub fn scan(&self, text: &str) -> Vec<KeywordMatch> {
        let chars: Vec<char> = text.to_lowercase().chars().collect();
        let mut hits: HashMap<usize, Vec<usize>> = HashMap::new();

        for start in 0..chars.len() {
            let mut node = &self.root;
            let mut pos = start;

            while pos < chars.len() {
                match node.children.get(&chars[pos]) {
                    Some(child) => {
                        node = child;
                        pos += 1;
                        if let Some(term_id) = node.terminal {
                            hits.entry(term_id).or_default().push(start);
                            break;
                        }
                    }
                    None => break,
                }
            }
        }

        let mut matches: Vec<KeywordMatch> = hits
            .into_iter()
            .map(|(term_id, positions)| KeywordMatch {
                term: self.terms[term_id].clone(),
                count: positions.len(),
                positions,
            })
            .collect();
        matches.sort_by(|a, b| a.term.cmp(&b.term));
        matches
    }

    /// Total number of keyword occurrences in the document.
    pub fn match_count(&self, text: &str) -> usize {
        self.scan(text).iter().map(|m| m.count).sum()
    }
}

impl Default for KeywordTrie {
    fn default() -> Self {
        Self::new()
    }
}
