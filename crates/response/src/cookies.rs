//! Ordered collection of cookies attached to a response.
//!
//! Cookies are rendered into `Set-Cookie` header values in the order they
//! were added. Nothing is deduplicated: two cookies sharing a name but scoped
//! to different paths are both legitimate.

use cookie::Cookie;
use std::slice;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cookies {
    inner: Vec<Cookie<'static>>,
}

impl Cookies {
    pub fn new<I>(cookies: I) -> Self
    where
        I: IntoIterator<Item = Cookie<'static>>,
    {
        Self { inner: cookies.into_iter().collect() }
    }

    pub fn add(&mut self, cookie: Cookie<'static>) {
        self.inner.push(cookie);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Cookie<'static>> {
        self.inner.iter()
    }
}

impl FromIterator<Cookie<'static>> for Cookies {
    fn from_iter<T: IntoIterator<Item = Cookie<'static>>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl Extend<Cookie<'static>> for Cookies {
    fn extend<T: IntoIterator<Item = Cookie<'static>>>(&mut self, iter: T) {
        self.inner.extend(iter);
    }
}

impl IntoIterator for Cookies {
    type Item = Cookie<'static>;
    type IntoIter = std::vec::IntoIter<Cookie<'static>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a Cookies {
    type Item = &'a Cookie<'static>;
    type IntoIter = slice::Iter<'a, Cookie<'static>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
