use std::{fmt, iter, mem, slice};

/// A single parameter, consisting of a key and a value.
#[derive(PartialEq, Eq, Ord, PartialOrd, Default, Clone)]
struct Param {
    key: String,
    value: String,
}

/// An ordered map of parameters, used for both path parameters and the
/// parsed query string.
///
/// Keys are unique: inserting an existing key replaces its value in place.
///
/// ```rust
/// # use radix_router::{Method, Router};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut router = Router::new();
/// router.get("/users/:id", |_| Ok(()))?;
///
/// let (_, request) = router.lookup(Method::Get, "/users/1?tab=posts")?;
///
/// // Iterate through the keys and values.
/// for (key, value) in request.params().iter() {
///     println!("key: {}, value: {}", key, value);
/// }
///
/// // Get a specific value by name.
/// assert_eq!(request.params().get("id"), Some("1"));
/// assert_eq!(request.query().get("tab"), Some("posts"));
/// # Ok(())
/// # }
/// ```
#[derive(PartialEq, Eq, Clone)]
pub struct Params {
    kind: ParamsKind,
}

// Most routes have a small number of dynamic parameters, so we can avoid
// heap allocations in the common case.
const SMALL: usize = 3;

#[derive(PartialEq, Eq, Clone)]
enum ParamsKind {
    Small([Param; SMALL], usize),
    Large(Vec<Param>),
}

impl Params {
    pub(crate) fn new() -> Self {
        Self {
            kind: ParamsKind::Small(Default::default(), 0),
        }
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        match self.kind {
            ParamsKind::Small(_, len) => len,
            ParamsKind::Large(ref vec) => vec.len(),
        }
    }

    /// Returns `true` if there are no parameters in the list.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_slice(&self) -> &[Param] {
        match &self.kind {
            ParamsKind::Small(arr, len) => &arr[..*len],
            ParamsKind::Large(vec) => vec,
        }
    }

    fn as_mut_slice(&mut self) -> &mut [Param] {
        match &mut self.kind {
            ParamsKind::Small(arr, len) => &mut arr[..*len],
            ParamsKind::Large(vec) => vec,
        }
    }

    /// Returns the value registered under the given key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        let key = key.as_ref();
        self.as_slice()
            .iter()
            .find(|param| param.key == key)
            .map(|param| param.value.as_str())
    }

    /// Returns `true` if the key is present.
    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.get(key).is_some()
    }

    /// Returns an iterator over the parameters in insertion order.
    pub fn iter(&self) -> ParamsIter<'_> {
        ParamsIter {
            inner: self.as_slice().iter(),
        }
    }

    /// Inserts a key value pair, replacing the value of an existing key.
    pub(crate) fn insert(&mut self, key: String, value: String) {
        #[cold]
        fn drain_to_vec<T: Default>(len: usize, elem: T, arr: &mut [T; SMALL]) -> Vec<T> {
            let mut vec = Vec::with_capacity(len + 1);
            vec.extend(arr.iter_mut().map(mem::take));
            vec.push(elem);
            vec
        }

        if let Some(param) = self.as_mut_slice().iter_mut().find(|p| p.key == key) {
            param.value = value;
            return;
        }

        let param = Param { key, value };
        match &mut self.kind {
            ParamsKind::Small(arr, len) => {
                if *len == SMALL {
                    self.kind = ParamsKind::Large(drain_to_vec(*len, param, arr));
                    return;
                }

                arr[*len] = param;
                *len += 1;
            }
            ParamsKind::Large(vec) => vec.push(param),
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'ps> IntoIterator for &'ps Params {
    type Item = (&'ps str, &'ps str);
    type IntoIter = ParamsIter<'ps>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the keys and values of a [`Params`] map.
pub struct ParamsIter<'ps> {
    inner: slice::Iter<'ps, Param>,
}

impl<'ps> Iterator for ParamsIter<'ps> {
    type Item = (&'ps str, &'ps str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|p| (p.key.as_str(), p.value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ParamsIter<'_> {}

impl iter::FusedIterator for ParamsIter<'_> {}
