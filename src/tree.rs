use crate::error::{InsertError, MatchError};
use crate::method::{Method, MethodMap};
use crate::params::Params;
use crate::path::{normalize, segments, split_query};
use crate::query::parse_query;
use crate::request::HttpRequest;

use std::fmt;

/// A segment of a route pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Segment<'a> {
    Static(&'a str),
    Wildcard(&'a str),
}

/// Validates a pattern and splits it into segments without touching the tree.
fn parse_pattern(pattern: &str) -> Result<Vec<Segment<'_>>, InsertError> {
    if !pattern.starts_with('/') {
        return Err(InsertError::invalid(pattern, "must begin with '/'"));
    }

    let (path, _) = split_query(pattern);

    // skipping empty segments yields the segments of the normalized path
    segments(path)
        .map(|segment| match segment.strip_prefix(':') {
            Some("") => Err(InsertError::invalid(pattern, "parameters must be named")),
            Some(name) => Ok(Segment::Wildcard(name)),
            None => Ok(Segment::Static(segment)),
        })
        .collect()
}

/// Returns the length in bytes of the common prefix of `a` and `b`.
fn common_prefix(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum()
}

/// A node in the radix tree.
///
/// Static edges carry the `/` that precedes their segment, so the labels of a
/// node's static children either continue the current segment or start the
/// next one, never both with the same character.
pub struct Node<T> {
    prefix: String,
    handlers: MethodMap<T>,
    // first character of each static child's prefix
    indices: Vec<char>,
    children: Vec<Node<T>>,
    wildcard: Option<Box<Node<T>>>,
    wildcard_name: Option<String>,
    // a complete segment ends here
    boundary: bool,
}

/// The result of a lookup.
///
/// The request is always built, even when no value matched, and carries
/// the parameters captured before matching stopped.
#[derive(Debug)]
pub struct Lookup<'n, T> {
    /// The value registered for the method, if any.
    pub value: Option<&'n T>,
    /// The request built from the path, query and captured parameters.
    pub request: HttpRequest,
}

impl<'n, T> Lookup<'n, T> {
    /// Returns `true` if a value was found.
    pub fn is_match(&self) -> bool {
        self.value.is_some()
    }

    /// Converts the lookup into a `Result`.
    pub fn into_result(self) -> Result<(&'n T, HttpRequest), MatchError> {
        match self.value {
            Some(value) => Ok((value, self.request)),
            None => Err(MatchError::NotFound),
        }
    }
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Node {
            prefix: String::new(),
            handlers: MethodMap::new(),
            indices: Vec::new(),
            children: Vec::new(),
            wildcard: None,
            wildcard_name: None,
            boundary: true,
        }
    }
}

impl<T> Node<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    fn leaf(prefix: &str) -> Self {
        Node {
            prefix: prefix.to_owned(),
            boundary: false,
            ..Node::default()
        }
    }

    /// Registers `value` for `method` under the route pattern.
    ///
    /// Anything from the first `?` on is ignored and the pattern is normalized
    /// before insertion. Registering the same pattern and method twice replaces
    /// the earlier value. On error the tree is left untouched.
    pub fn insert(&mut self, method: Method, pattern: &str, value: T) -> Result<(), InsertError> {
        let parsed = parse_pattern(pattern)?;
        self.check_wildcards(&parsed)?;

        let mut current = self;
        for segment in parsed {
            current = match segment {
                Segment::Wildcard(name) => current.wildcard_child(name),
                Segment::Static(text) => {
                    let node = current.insert_static(&format!("/{}", text));
                    node.boundary = true;
                    node
                }
            };
        }

        current.handlers.insert(method, value);
        Ok(())
    }

    /// Walks the existing tree along the pattern and rejects a wildcard whose
    /// name differs from the one already registered at the same position.
    fn check_wildcards(&self, parsed: &[Segment<'_>]) -> Result<(), InsertError> {
        let mut current = self;
        let mut route = String::new();

        for segment in parsed {
            match *segment {
                Segment::Wildcard(name) => {
                    let Some(child) = current.wildcard.as_deref() else {
                        return Ok(());
                    };
                    let existing = child.wildcard_name.as_deref().unwrap_or_default();

                    route.push_str("/:");
                    route.push_str(existing);

                    if existing != name {
                        return Err(InsertError::Conflict { with: route });
                    }
                    current = child;
                }
                Segment::Static(text) => {
                    let label = format!("/{}", text);
                    match current.walk_static(&label) {
                        Some(node) => current = node,
                        None => return Ok(()),
                    }
                    route.push_str(&label);
                }
            }
        }

        Ok(())
    }

    fn wildcard_child(&mut self, name: &str) -> &mut Node<T> {
        self.wildcard.get_or_insert_with(|| {
            Box::new(Node {
                prefix: format!(":{}", name),
                wildcard_name: Some(name.to_owned()),
                ..Node::default()
            })
        })
    }

    /// Inserts a static label below this node, splitting children on partial
    /// matches, and returns the node where the label ends.
    fn insert_static(&mut self, label: &str) -> &mut Node<T> {
        let mut current = self;
        let mut rest = label;

        loop {
            let Some(first) = rest.chars().next() else {
                return current;
            };

            let Some(i) = current.indices.iter().position(|&c| c == first) else {
                // no child shares a prefix, create a new one for the rest
                current.indices.push(first);
                current.children.push(Node::leaf(rest));
                let last = current.children.len() - 1;
                return &mut current.children[last];
            };

            let common = common_prefix(&current.children[i].prefix, rest);
            if common < current.children[i].prefix.len() {
                current.children[i].split(common);
            }

            rest = &rest[common..];
            current = &mut current.children[i];
        }
    }

    /// Splits this node at `at`, keeping the shared prefix here and moving
    /// everything else into a single child holding the suffix.
    fn split(&mut self, at: usize) {
        let suffix = self.prefix.split_off(at);
        let first = suffix.chars().next().unwrap_or_default();

        let child = Node {
            prefix: suffix,
            handlers: std::mem::take(&mut self.handlers),
            indices: std::mem::take(&mut self.indices),
            children: std::mem::take(&mut self.children),
            wildcard: self.wildcard.take(),
            wildcard_name: None,
            boundary: self.boundary,
        };

        self.indices = vec![first];
        self.children = vec![child];
        self.boundary = false;
    }

    /// Follows static edges until `label` is fully consumed.
    fn walk_static(&self, label: &str) -> Option<&Node<T>> {
        let mut current = self;
        let mut rest = label;

        while let Some(first) = rest.chars().next() {
            let i = current.indices.iter().position(|&c| c == first)?;
            let child = &current.children[i];
            rest = rest.strip_prefix(child.prefix.as_str())?;
            current = child;
        }

        Some(current)
    }

    /// Resolves a normalized path to a node, capturing wildcard segments.
    fn locate(&self, normalized: &str, params: &mut Params) -> Option<&Node<T>> {
        let mut current = self;

        for segment in segments(normalized) {
            let label = format!("/{}", segment);

            current = match current.walk_static(&label) {
                Some(node) if node.boundary => node,
                _ => {
                    let child = current.wildcard.as_deref()?;
                    if let Some(name) = &child.wildcard_name {
                        params.insert(name.clone(), segment.to_owned());
                    }
                    child
                }
            };
        }

        Some(current)
    }

    /// Looks up the value registered for `method` at `raw_path`.
    ///
    /// The query string is parsed and the path normalized. Static segments are
    /// preferred over wildcards at every position, without backtracking.
    pub fn at(&self, method: Method, raw_path: &str) -> Lookup<'_, T> {
        let (path, query) = split_query(raw_path);
        let path = normalize(path);
        let query = query.map(parse_query).unwrap_or_default();

        let mut params = Params::new();
        let value = self
            .locate(&path, &mut params)
            .and_then(|node| node.handlers.get(method));

        Lookup {
            value,
            request: HttpRequest::new(path, method, params, query),
        }
    }

    /// Returns the methods registered on the route `raw_path` resolves to.
    pub fn allowed(&self, raw_path: &str) -> Vec<Method> {
        let (path, _) = split_query(raw_path);
        let mut params = Params::new();

        self.locate(&normalize(path), &mut params)
            .map(|node| node.handlers.methods().collect())
            .unwrap_or_default()
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("prefix", &self.prefix)
            .field("handlers", &self.handlers)
            .field("boundary", &self.boundary)
            .field("children", &self.children)
            .field("wildcard", &self.wildcard)
            .finish()
    }
}
