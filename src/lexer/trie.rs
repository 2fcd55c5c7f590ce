//! Prefix trie over reserved spellings, walked by the lexer one character at
//! a time while it scans an identifier.

use lazy_static::lazy_static;
use std::collections::HashMap;

use super::tokens::TokenKind;

lazy_static! {
    pub static ref RESERVED_TRIE: TrieNode = TrieNode::from_catalog();
}

#[derive(Debug, Default)]
pub struct TrieNode {
    children: HashMap<char, TrieNode>,
    kind: Option<TokenKind>,
}

impl TrieNode {
    /// Builds the trie from every reserved kind with a word spelling.
    pub fn from_catalog() -> Self {
        let mut root = TrieNode::default();
        for kind in TokenKind::ALL {
            let spelling = kind.spelling();
            if kind.is_reserved() && !spelling.is_empty() {
                root.insert(spelling, *kind);
            }
        }
        root
    }

    pub fn insert(&mut self, word: &str, kind: TokenKind) {
        let mut node = self;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.kind = Some(kind);
    }

    pub fn step(&self, ch: char) -> Option<&TrieNode> {
        self.children.get(&ch)
    }

    pub fn kind(&self) -> Option<TokenKind> {
        self.kind
    }

    pub fn lookup(&self, word: &str) -> Option<TokenKind> {
        word.chars()
            .try_fold(self, |node, ch| node.step(ch))
            .and_then(TrieNode::kind)
    }
}
