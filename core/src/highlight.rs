use std::collections::BTreeSet;

/// Whitespace-separated group identifiers from a `data-group` attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupTags(BTreeSet<String>);

impl GroupTags {
    pub fn parse(raw: &str) -> Self {
        Self(raw.split_whitespace().map(str::to_string).collect())
    }

    pub fn single(tag: &str) -> Self {
        Self::parse(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn intersects(&self, other: &GroupTags) -> bool {
        if self.0.len() <= other.0.len() {
            self.0.iter().any(|tag| other.0.contains(tag))
        } else {
            other.0.iter().any(|tag| self.0.contains(tag))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Indices of the candidates sharing at least one tag with `hovered`.
pub fn highlight_targets<'a, I>(hovered: &GroupTags, candidates: I) -> Vec<usize>
where
    I: IntoIterator<Item = &'a GroupTags>,
{
    if hovered.is_empty() {
        return Vec::new();
    }
    candidates
        .into_iter()
        .enumerate()
        .filter_map(|(index, tags)| hovered.intersects(tags).then_some(index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_drops_empty_tags() {
        let tags = GroupTags::parse("  p2   verbA ");
        assert!(tags.contains("p2"));
        assert!(tags.contains("verbA"));
        assert_eq!(tags.iter().count(), 2);
        assert!(GroupTags::parse("   ").is_empty());
    }

    #[test]
    fn membership_is_exact_not_substring() {
        let hovered = GroupTags::parse("p2 verbA");
        let candidates = [
            GroupTags::parse("p2"),
            GroupTags::parse("p22"),
            GroupTags::parse("verbA p3"),
            GroupTags::parse("verb"),
            GroupTags::parse("p1 p3"),
            GroupTags::parse(""),
        ];
        assert_eq!(highlight_targets(&hovered, candidates.iter()), vec![0, 2]);
    }

    #[test]
    fn empty_hover_matches_nothing() {
        let candidates = [GroupTags::parse("p1")];
        assert!(highlight_targets(&GroupTags::default(), candidates.iter()).is_empty());
    }
}
