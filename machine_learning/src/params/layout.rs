use std::ops::Range;

/// Maps a flat parameter buffer into named tensors.
///
/// Tensors are laid out contiguously in declaration order, so the ranges never overlap and
/// together cover `[0, size)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamLayout {
    tensors: Vec<(&'static str, Range<usize>)>,
}

impl ParamLayout {
    /// Creates a new `ParamLayout`.
    ///
    /// # Arguments
    /// * `tensors` - The name and length of each tensor, in buffer order.
    ///
    /// # Returns
    /// A new `ParamLayout` instance.
    pub fn new<I>(tensors: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, usize)>,
    {
        let mut offset = 0;
        let tensors = tensors
            .into_iter()
            .map(|(name, len)| {
                let range = offset..offset + len;
                offset += len;
                (name, range)
            })
            .collect();

        Self { tensors }
    }

    /// Returns the total amount of scalar parameters.
    pub fn size(&self) -> usize {
        self.tensors.last().map(|(_, r)| r.end).unwrap_or(0)
    }

    /// Returns the range a named tensor occupies in the flat buffer, if present.
    pub fn range(&self, name: &str) -> Option<Range<usize>> {
        self.tensors
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, r)| r.clone())
    }

    /// Iterates the tensors as `(name, range)` pairs, in buffer order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Range<usize>)> + '_ {
        self.tensors.iter().map(|(n, r)| (*n, r.clone()))
    }

    pub fn len(&self) -> usize {
        self.tensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tensors.is_empty()
    }
}
