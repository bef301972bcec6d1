use crate::site::SiteId;

/// Insertion-ordered container holding one value per site.
///
/// Lookup is a linear scan over a short, densely packed list. Site counts
/// are small (a handful of parallel channels), so scanning beats hashing
/// overhead for the access patterns this layer sees.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSite<T> {
	entries: Vec<(SiteId, T)>,
}

impl<T> MultiSite<T> {
	/// Creates an empty container.
	pub const fn new() -> Self {
		Self { entries: Vec::new() }
	}

	/// Sets the value for a site, overwriting any previous value in place.
	pub fn set(&mut self, site: SiteId, value: T) {
		match self.entries.iter_mut().find(|(s, _)| *s == site) {
			Some((_, slot)) => *slot = value,
			None => self.entries.push((site, value)),
		}
	}

	/// Returns the value for a site, if one was set.
	pub fn get(&self, site: SiteId) -> Option<&T> {
		self.entries.iter().find(|(s, _)| *s == site).map(|(_, v)| v)
	}

	/// Returns true if the site has a value.
	pub fn contains(&self, site: SiteId) -> bool {
		self.entries.iter().any(|(s, _)| *s == site)
	}

	/// Iterates (site, value) pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (SiteId, &T)> {
		self.entries.iter().map(|(s, v)| (*s, v))
	}

	/// Iterates the sites with a value, in insertion order.
	pub fn sites(&self) -> impl Iterator<Item = SiteId> + '_ {
		self.entries.iter().map(|(s, _)| *s)
	}

	/// Number of sites with a value.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if no site has a value.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<T> Default for MultiSite<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> FromIterator<(SiteId, T)> for MultiSite<T> {
	fn from_iter<I: IntoIterator<Item = (SiteId, T)>>(iter: I) -> Self {
		let mut out = Self::new();
		for (site, value) in iter {
			out.set(site, value);
		}
		out
	}
}

impl<T: std::fmt::Display> std::fmt::Display for MultiSite<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut first = true;
		for (site, value) in self.iter() {
			if !first {
				write!(f, " ")?;
			}
			write!(f, "{site}:{value}")?;
			first = false;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn set_then_get() {
		let mut ms = MultiSite::new();
		ms.set(SiteId(0), 1.5);
		ms.set(SiteId(3), 2.5);
		assert_eq!(ms.get(SiteId(0)), Some(&1.5));
		assert_eq!(ms.get(SiteId(3)), Some(&2.5));
		assert_eq!(ms.get(SiteId(1)), None);
	}

	#[test]
	fn set_overwrites_in_place() {
		let mut ms = MultiSite::new();
		ms.set(SiteId(2), "a");
		ms.set(SiteId(2), "b");
		assert_eq!(ms.len(), 1);
		assert_eq!(ms.get(SiteId(2)), Some(&"b"));
	}

	#[test]
	fn iteration_follows_insertion_order() {
		let ms: MultiSite<i64> = [(SiteId(5), 50), (SiteId(1), 10), (SiteId(3), 30)].into_iter().collect();
		let sites: Vec<SiteId> = ms.sites().collect();
		assert_eq!(sites, vec![SiteId(5), SiteId(1), SiteId(3)]);
	}

	#[test]
	fn display_lists_site_value_pairs() {
		let ms: MultiSite<i64> = [(SiteId(0), 7), (SiteId(1), 9)].into_iter().collect();
		assert_eq!(ms.to_string(), "0:7 1:9");
	}
}
