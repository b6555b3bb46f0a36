//! Entity taxonomy: a category tree whose nodes are matched against phrases.

use regex::{Regex, RegexBuilder};

use crate::error::{ConfigurationError, Result};
use crate::records::TaxonomyRow;

const ROOT_LABEL: &str = "root";

#[derive(Debug, Clone)]
pub struct TaxonomyNode {
    label: String,
    /// Set for `category:pattern` labels; matched at a word boundary
    pattern: Option<Regex>,
    children: Vec<TaxonomyNode>,
}

impl TaxonomyNode {
    /// Parse a label; `category:pattern` labels get a compiled pattern.
    pub fn new(label: &str) -> Result<Self> {
        let (label, pattern) = match label.split_once(':') {
            Some((category, pattern)) => {
                let regex = RegexBuilder::new(&format!(r"\b(?:{})", pattern))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| ConfigurationError::InvalidPattern {
                        pattern: pattern.to_string(),
                        source: e,
                    })?;
                (category, Some(regex))
            }
            None => (label, None),
        };
        Ok(TaxonomyNode {
            label: label.to_string(),
            pattern,
            children: Vec::new(),
        })
    }

    /// Labels from this node down to the deepest match, or `None`.
    ///
    /// A pattern node matches when its pattern occurs in `text`; it then
    /// extends the path with its first matching child, if any. When none of
    /// its children match, the path stops at the pattern node. A plain node
    /// only passes matches through: it matches when one of its children does.
    fn resolve(&self, text: &str) -> Option<Vec<String>> {
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(text) {
                return None;
            }
        }

        let below = self.children.iter().find_map(|child| child.resolve(text));
        if below.is_none() && self.pattern.is_none() {
            return None;
        }

        let mut path = vec![self.label.clone()];
        path.extend(below.unwrap_or_default());
        Some(path)
    }
}

/// The taxonomy under a synthetic root.
#[derive(Debug, Clone)]
pub struct EntityTaxonomy {
    root: TaxonomyNode,
}

impl Default for EntityTaxonomy {
    fn default() -> Self {
        EntityTaxonomy {
            root: TaxonomyNode {
                label: ROOT_LABEL.to_string(),
                pattern: None,
                children: Vec::new(),
            },
        }
    }
}

impl EntityTaxonomy {
    pub fn new() -> Self {
        EntityTaxonomy::default()
    }

    /// Build the tree from rows in pre-order. A row at depth `d` becomes a
    /// child of the last row seen at depth `d - 1` (depth 0 hangs off the root).
    pub fn from_rows(rows: &[TaxonomyRow]) -> Result<Self> {
        let mut taxonomy = EntityTaxonomy::new();
        for (i, row) in rows.iter().enumerate() {
            if row.label.trim().is_empty() {
                continue;
            }
            let node = TaxonomyNode::new(row.label.trim())?;
            let mut parent = &mut taxonomy.root;
            for _ in 0..row.depth {
                parent = parent
                    .children
                    .last_mut()
                    .ok_or(ConfigurationError::TaxonomyDepth {
                        row: i + 1,
                        depth: row.depth,
                    })?;
            }
            parent.children.push(node);
        }
        Ok(taxonomy)
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Category path for a single text, root excluded; empty if nothing matches.
    pub fn path_for(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        match self.root.resolve(&lowered) {
            Some(mut path) => {
                path.remove(0);
                path
            }
            None => Vec::new(),
        }
    }

    /// Resolve `form` alone, then the phrase `premods form postmods`.
    pub fn resolve_path<S: AsRef<str>>(&self, form: &str, premods: &[S], postmods: &[S]) -> Vec<String> {
        let path = self.path_for(form);
        if !path.is_empty() {
            return path;
        }

        let phrase: Vec<&str> = premods
            .iter()
            .map(|s| s.as_ref())
            .chain(std::iter::once(form))
            .chain(postmods.iter().map(|s| s.as_ref()))
            .collect();
        self.path_for(&phrase.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> EntityTaxonomy {
        EntityTaxonomy::from_rows(&[
            TaxonomyRow::new(0, "living"),
            TaxonomyRow::new(1, "animal:animal|perro|gato"),
            TaxonomyRow::new(2, "dog:perro"),
            TaxonomyRow::new(2, "cat:gato"),
            TaxonomyRow::new(1, "person:hombre|mujer"),
            TaxonomyRow::new(0, "place:ciudad|pueblo"),
        ])
        .unwrap()
    }

    #[test]
    fn test_second_child_is_tried() {
        let t = taxonomy();
        assert_eq!(t.path_for("gato"), vec!["living", "animal", "cat"]);
        assert_eq!(t.path_for("perro"), vec!["living", "animal", "dog"]);
    }

    #[test]
    fn test_match_without_child_match() {
        let t = taxonomy();
        assert_eq!(t.path_for("animal"), vec!["living", "animal"]);
        assert_eq!(t.path_for("ciudad"), vec!["place"]);
    }

    #[test]
    fn test_no_match() {
        let t = taxonomy();
        assert!(t.path_for("mesa").is_empty());
    }

    #[test]
    fn test_word_boundary_at_start() {
        let t = taxonomy();
        assert!(t.path_for("superhombre").is_empty());
        assert_eq!(t.path_for("hombres"), vec!["living", "person"]);
    }

    #[test]
    fn test_case_insensitive() {
        let t = taxonomy();
        assert_eq!(t.path_for("La Ciudad"), vec!["place"]);
    }

    #[test]
    fn test_phrase_fallback() {
        let t = taxonomy();
        let empty: [&str; 0] = [];
        assert_eq!(t.resolve_path("grande", &["la"], &["ciudad"]), vec!["place"]);
        assert_eq!(t.resolve_path("gato", &empty, &empty), vec!["living", "animal", "cat"]);
        assert!(t.resolve_path("mesa", &["la"], &["roja"]).is_empty());
    }

    #[test]
    fn test_orphan_row_is_rejected() {
        let err = EntityTaxonomy::from_rows(&[TaxonomyRow::new(1, "x:y")]).unwrap_err();
        assert!(matches!(err, ConfigurationError::TaxonomyDepth { row: 1, depth: 1 }));
    }
}
