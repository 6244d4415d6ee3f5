use crate::{Error, Result};

/// A licence tree node: children first, then metadata entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub children: Vec<Node>,
    pub metadata: Vec<usize>,
}

impl Node {
    pub fn parse(input: &str) -> Result<Node> {
        let nums = input.split_whitespace().map(str::parse).collect::<Result<Vec<usize>, _>>()?;
        let mut nums = nums.into_iter();
        let root = Node::read(&mut nums)?;
        if nums.next().is_some() {return Err(Error::parse("licence tree", "trailing numbers"))}
        Ok(root)
    }

    fn read(nums: &mut impl Iterator<Item = usize>) -> Result<Node> {
        let mut next = || nums.next().ok_or_else(|| Error::parse("licence tree", "truncated input"));
        let (children, metas) = (next()?, next()?);
        let children = (0 .. children).map(|_| Node::read(nums)).collect::<Result<_>>()?;
        let metadata = (0 .. metas).map(|_| nums.next().ok_or_else(|| Error::parse("licence tree", "truncated input"))).collect::<Result<_>>()?;
        Ok(Node {children, metadata})
    }

    pub fn metadata_sum(&self) -> usize {
        self.metadata.iter().sum::<usize>() + self.children.iter().map(Node::metadata_sum).sum::<usize>()
    }

    /// Metadata sum for a leaf, otherwise the values of the children the
    /// metadata entries point at (1-based, out of range counts as zero).
    pub fn value(&self) -> usize {
        if self.children.is_empty() {return self.metadata.iter().sum()}
        self.metadata.iter()
            .filter_map(|&m| m.checked_sub(1).and_then(|ix| self.children.get(ix)))
            .map(Node::value)
            .sum()
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let root = Node::parse(input)?;
    Ok(if part == 1 {root.metadata_sum()} else {root.value()}.to_string())
}
