/// Ordered, append-only sequence of pipeline items
///
/// Producers append while processing; every call to [`read`](Self::read)
/// starts a fresh pass over the same backing items, so any number of
/// consumers can iterate (or replay) independently.
#[derive(Debug, Clone)]
pub struct Stream<T> {
    name: String,
    items: Vec<T>,
}

impl<T> Stream<T> {
    /// Create an empty named stream
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// The label this stream was created with (usually the source name)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append one item at the end
    pub fn append(&mut self, item: T) {
        self.items.push(item);
    }

    /// A fresh iteration over the items, in append order
    pub fn read(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the stream, yielding the backing items
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<'a, T> IntoIterator for &'a Stream<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.read()
    }
}

impl<T> IntoIterator for Stream<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
