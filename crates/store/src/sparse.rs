use std::fmt::Write as _;

use sitelink_primitives::{ExecutionContext, MultiSite, SiteId, padded_hex};

use crate::error::StoreError;
use crate::payload::Payload;

/// Default payload word width in bits, for dump formatting.
const DEFAULT_BITS_PER_ELEMENT: usize = 34;

/// One site's aligned column pair.
///
/// `addrs.len() == data.len()` holds across every mutation; index i of one
/// column corresponds to index i of the other.
struct Lane<P> {
	addrs: Vec<i64>,
	data: Vec<P>,
}

impl<P: Payload> Lane<P> {
	fn new() -> Self {
		Self { addrs: Vec::new(), data: Vec::new() }
	}

	/// Position of `addr` in this lane, by linear scan.
	fn find(&self, addr: i64) -> Option<usize> {
		self.addrs.iter().position(|&a| a == addr)
	}

	/// Overwrites in place when the address exists, otherwise appends one
	/// element to both columns. No over-allocation beyond `Vec` growth.
	fn set(&mut self, addr: i64, payload: P) {
		match self.find(addr) {
			Some(i) => self.data[i] = payload,
			None => {
				self.addrs.push(addr);
				self.data.push(payload);
			}
		}
	}

	/// Reorders both columns into ascending address order via a stable
	/// index permutation.
	fn sort(&mut self) {
		let mut order: Vec<usize> = (0..self.addrs.len()).collect();
		order.sort_by_key(|&i| self.addrs[i]);
		self.addrs = order.iter().map(|&i| self.addrs[i]).collect();
		self.data = order.iter().map(|&i| self.data[i]).collect();
	}
}

/// Sparse per-site (address, payload) store.
///
/// Key-value pairs per data point, kept in first-write order until
/// [`SparseStore::sort`]. Addresses are unique within a site; a set address
/// can be overwritten but never unset short of [`SparseStore::clear`].
pub struct SparseStore<P> {
	sites: Vec<SiteId>,
	lanes: Vec<Lane<P>>,
	any_set: bool,
	/// Width in bits of one payload word. Dump formatting only.
	pub bits_per_element: usize,
}

impl<P: Payload> SparseStore<P> {
	/// Creates an empty store over the given active sites.
	pub fn new(sites: impl IntoIterator<Item = SiteId>) -> Self {
		let sites: Vec<SiteId> = sites.into_iter().collect();
		let lanes = sites.iter().map(|_| Lane::new()).collect();
		Self {
			sites,
			lanes,
			any_set: false,
			bits_per_element: DEFAULT_BITS_PER_ELEMENT,
		}
	}

	/// Creates an empty store over the context's active sites.
	pub fn for_context(ctx: &impl ExecutionContext) -> Self {
		Self::new(ctx.active_sites())
	}

	/// Active sites in configuration order, plus any admitted on first write.
	pub fn active_sites(&self) -> &[SiteId] {
		&self.sites
	}

	/// Returns true until the first set operation, and again after [`Self::clear`].
	pub fn is_empty(&self) -> bool {
		!self.any_set
	}

	/// Drops all data on all sites.
	pub fn clear(&mut self) {
		for lane in &mut self.lanes {
			*lane = Lane::new();
		}
		self.any_set = false;
	}

	fn lane(&self, site: SiteId) -> Option<&Lane<P>> {
		self.sites.iter().position(|&s| s == site).map(|i| &self.lanes[i])
	}

	/// Lane for `site`, admitting an unknown site with an empty lane.
	fn lane_mut(&mut self, site: SiteId) -> &mut Lane<P> {
		let i = match self.sites.iter().position(|&s| s == site) {
			Some(i) => i,
			None => {
				self.sites.push(site);
				self.lanes.push(Lane::new());
				self.lanes.len() - 1
			}
		};
		&mut self.lanes[i]
	}

	/// Sets the payload for one address on one site.
	pub fn set_on_site(&mut self, site: SiteId, addr: i64, payload: P) {
		self.lane_mut(site).set(addr, payload);
		self.any_set = true;
	}

	/// Sets the same payload for one address on every active site.
	pub fn set_all(&mut self, addr: i64, payload: P) {
		for lane in &mut self.lanes {
			lane.set(addr, payload);
		}
		if !self.lanes.is_empty() {
			self.any_set = true;
		}
	}

	/// Returns true if the address is set on the given site.
	pub fn is_set(&self, site: SiteId, addr: i64) -> bool {
		self.lane(site).is_some_and(|lane| lane.find(addr).is_some())
	}

	/// Returns true if the address is set on at least one active site.
	pub fn is_set_any_site(&self, addr: i64) -> bool {
		self.sites.iter().any(|&site| self.is_set(site, addr))
	}

	/// Payload for one address on one site, `None` when unset.
	pub fn get(&self, site: SiteId, addr: i64) -> Option<P> {
		let lane = self.lane(site)?;
		lane.find(addr).map(|i| lane.data[i])
	}

	/// Payload for one address on one site, failing hard when unset.
	pub fn get_or_err(&self, site: SiteId, addr: i64) -> Result<P, StoreError> {
		self.get(site, addr).ok_or(StoreError::NotSet { site, addr })
	}

	/// Per-site payloads for one address, with [`Payload::MISSING`] filled
	/// in for sites where the address is unset.
	pub fn get_multi(&self, addr: i64) -> MultiSite<P> {
		self.sites
			.iter()
			.map(|&site| (site, self.get(site, addr).unwrap_or(P::MISSING)))
			.collect()
	}

	/// Per-site payloads for one address, failing hard on the first site
	/// where the address is unset.
	pub fn try_get_multi(&self, addr: i64) -> Result<MultiSite<P>, StoreError> {
		self.sites
			.iter()
			.map(|&site| Ok((site, self.get_or_err(site, addr)?)))
			.collect()
	}

	/// Per-site presence flags for one address.
	pub fn sites_with(&self, addr: i64) -> MultiSite<bool> {
		self.sites.iter().map(|&site| (site, self.is_set(site, addr))).collect()
	}

	/// Returns true iff every active site agrees on the address: all unset,
	/// or all set with word-identical payloads. Short-circuits on the first
	/// mismatch in presence or content.
	pub fn all_sites_identical(&self, addr: i64) -> bool {
		let mut seen: Option<P> = None;
		let mut missing = false;
		for lane in &self.lanes {
			match lane.find(addr) {
				Some(i) => {
					if missing {
						return false;
					}
					let payload = lane.data[i];
					match seen {
						Some(first) if first != payload => return false,
						Some(_) => {}
						None => seen = Some(payload),
					}
				}
				None => {
					if seen.is_some() {
						return false;
					}
					missing = true;
				}
			}
		}
		true
	}

	/// The payload shared by all active sites for one address.
	///
	/// Never silently picks one site's value: fails with
	/// [`StoreError::Inconsistent`] when sites disagree, and with
	/// [`StoreError::NotSet`] when no site has the address.
	pub fn get_common(&self, addr: i64) -> Result<P, StoreError> {
		if !self.all_sites_identical(addr) {
			return Err(StoreError::Inconsistent { addr });
		}
		for lane in &self.lanes {
			if let Some(pos) = lane.find(addr) {
				return Ok(lane.data[pos]);
			}
		}
		Err(StoreError::NotSet {
			site: self.sites.first().copied().unwrap_or(SiteId(0)),
			addr,
		})
	}

	/// Sorts each site's columns into ascending address order.
	pub fn sort(&mut self) {
		for lane in &mut self.lanes {
			lane.sort();
		}
	}

	/// Union of addresses set on any active site, deduplicated, in
	/// descending order. The descending order is an existing contract.
	pub fn unique_addresses(&self) -> Vec<i64> {
		let mut out: Vec<i64> = Vec::new();
		for lane in &self.lanes {
			for &addr in &lane.addrs {
				if !out.contains(&addr) {
					out.push(addr);
				}
			}
		}
		out.sort_unstable();
		out.reverse();
		out
	}

	/// Renders all set data for all sites, sorted by address.
	///
	/// One line per (address, payload word): decimal address, a tab, then
	/// the word as a fixed-width hex string of `bits_per_element / 4`
	/// digits, most-significant nibble first.
	pub fn dump(&mut self) -> String {
		self.sort();
		let digits = self.bits_per_element / 4;
		let mut out = String::new();
		let _ = writeln!(out, "{:?}", self.unique_addresses());
		for (site, lane) in self.sites.iter().zip(&self.lanes) {
			let _ = writeln!(out, "Site: {site}");
			for (addr, payload) in lane.addrs.iter().zip(&lane.data) {
				for &word in payload.words() {
					let _ = writeln!(out, "{addr}\t{}", padded_hex(word, digits));
				}
			}
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::payload::{WidePayload, Word};

	fn two_site_store<P: Payload>() -> SparseStore<P> {
		SparseStore::new([SiteId(0), SiteId(1)])
	}

	#[test]
	fn set_then_get_roundtrip() {
		let mut store = two_site_store::<Word>();
		store.set_on_site(SiteId(0), 10, 0x55);
		assert!(store.is_set(SiteId(0), 10));
		assert_eq!(store.get(SiteId(0), 10), Some(0x55));
		assert_eq!(store.get(SiteId(1), 10), None);
	}

	#[test]
	fn set_is_idempotent_and_alignment_holds() {
		let mut store = two_site_store::<Word>();
		store.set_on_site(SiteId(0), 10, 1);
		store.set_on_site(SiteId(0), 10, 1);
		store.set_on_site(SiteId(0), 12, 2);
		// two distinct addresses only; the repeat did not grow the columns
		assert_eq!(store.unique_addresses(), vec![12, 10]);
		assert_eq!(store.get(SiteId(0), 10), Some(1));
	}

	#[test]
	fn overwrite_replaces_payload_in_place() {
		let mut store = two_site_store::<Word>();
		store.set_on_site(SiteId(1), 10, 5);
		store.set_on_site(SiteId(1), 10, 9);
		assert_eq!(store.get(SiteId(1), 10), Some(9));
		assert_eq!(store.unique_addresses(), vec![10]);
	}

	#[test]
	fn set_all_reaches_every_active_site() {
		let mut store = two_site_store::<Word>();
		store.set_all(60, 60);
		assert!(store.is_set(SiteId(0), 60));
		assert!(store.is_set(SiteId(1), 60));
		assert!(store.all_sites_identical(60));
	}

	#[test]
	fn missing_read_is_caller_selectable() {
		let store = two_site_store::<Word>();
		assert_eq!(store.get(SiteId(0), 99), None);
		assert_eq!(
			store.get_or_err(SiteId(0), 99),
			Err(StoreError::NotSet { site: SiteId(0), addr: 99 })
		);
	}

	#[test]
	fn not_set_error_renders_site_and_hex_addr() {
		let err = StoreError::NotSet { site: SiteId(1), addr: 255 };
		assert_eq!(err.to_string(), "no data set on site 1 at addr 0xFF");
	}

	#[test]
	fn get_multi_fills_sentinel_for_unset_sites() {
		let mut store = two_site_store::<WidePayload>();
		store.set_on_site(SiteId(0), 10, [1, 2, 3, 4]);
		let multi = store.get_multi(10);
		assert_eq!(multi.get(SiteId(0)), Some(&[1, 2, 3, 4]));
		assert_eq!(multi.get(SiteId(1)), Some(&WidePayload::MISSING));
		assert!(store.try_get_multi(10).is_err());
	}

	#[test]
	fn identical_when_all_sites_match() {
		let mut store = two_site_store::<WidePayload>();
		store.set_on_site(SiteId(0), 10, [1, 2, 3, 4]);
		store.set_on_site(SiteId(1), 10, [1, 2, 3, 4]);
		assert!(store.all_sites_identical(10));
		assert_eq!(store.get_common(10), Ok([1, 2, 3, 4]));
	}

	#[test]
	fn not_identical_when_presence_differs() {
		let mut store = two_site_store::<Word>();
		store.set_on_site(SiteId(0), 10, 7);
		assert!(!store.all_sites_identical(10));
		assert_eq!(store.get_common(10), Err(StoreError::Inconsistent { addr: 10 }));
	}

	#[test]
	fn not_identical_when_payload_differs() {
		let mut store = two_site_store::<WidePayload>();
		store.set_on_site(SiteId(0), 10, [1, 2, 3, 4]);
		store.set_on_site(SiteId(1), 10, [1, 2, 3, 5]);
		assert!(!store.all_sites_identical(10));
	}

	#[test]
	fn identical_when_no_site_has_the_address() {
		let store = two_site_store::<Word>();
		assert!(store.all_sites_identical(42));
		assert_eq!(
			store.get_common(42),
			Err(StoreError::NotSet { site: SiteId(0), addr: 42 })
		);
	}

	#[test]
	fn unique_addresses_descending_union() {
		let mut store = two_site_store::<Word>();
		store.set_on_site(SiteId(0), 100, 1);
		store.set_on_site(SiteId(0), 300, 1);
		store.set_on_site(SiteId(1), 200, 1);
		store.set_on_site(SiteId(1), 300, 1);
		assert_eq!(store.unique_addresses(), vec![300, 200, 100]);
	}

	#[test]
	fn sort_orders_columns_and_keeps_pairs_aligned() {
		let mut store = two_site_store::<Word>();
		store.set_on_site(SiteId(0), 300, 3);
		store.set_on_site(SiteId(0), 100, 1);
		store.set_on_site(SiteId(0), 200, 2);
		store.sort();
		assert_eq!(store.get(SiteId(0), 100), Some(1));
		assert_eq!(store.get(SiteId(0), 200), Some(2));
		assert_eq!(store.get(SiteId(0), 300), Some(3));
		let dump = store.dump();
		let site0: Vec<&str> = dump.lines().skip_while(|l| *l != "Site: 0").skip(1).take(3).collect();
		assert_eq!(site0, vec!["100\t00000001", "200\t00000002", "300\t00000003"]);
	}

	#[test]
	fn dump_renders_one_line_per_payload_word() {
		let mut store = SparseStore::<WidePayload>::new([SiteId(0)]);
		store.set_on_site(SiteId(0), 10, [0x55, 0x66, 0x77, -1]);
		let dump = store.dump();
		let lines: Vec<&str> = dump.lines().collect();
		assert_eq!(lines[0], "[10]");
		assert_eq!(lines[1], "Site: 0");
		assert_eq!(lines[2], "10\t00000055");
		assert_eq!(lines[3], "10\t00000066");
		assert_eq!(lines[4], "10\t00000077");
		// 34-bit elements dump as 8 hex digits, low 32 bits of the word
		assert_eq!(lines[5], "10\tFFFFFFFF");
	}

	#[test]
	fn sites_with_reports_presence_per_site() {
		let mut store = two_site_store::<Word>();
		store.set_on_site(SiteId(1), 10, 11);
		let present = store.sites_with(10);
		assert_eq!(present.get(SiteId(0)), Some(&false));
		assert_eq!(present.get(SiteId(1)), Some(&true));
		assert!(store.is_set_any_site(10));
		assert!(!store.is_set_any_site(11));
	}

	#[test]
	fn clear_drops_all_sites() {
		let mut store = two_site_store::<Word>();
		assert!(store.is_empty());
		store.set_all(10, 1);
		assert!(!store.is_empty());
		store.clear();
		assert!(store.is_empty());
		assert!(!store.is_set_any_site(10));
		assert_eq!(store.unique_addresses(), Vec::<i64>::new());
	}

	#[test]
	fn unknown_site_is_admitted_on_first_write() {
		let mut store = two_site_store::<Word>();
		store.set_on_site(SiteId(4), 100, 44);
		assert!(store.is_set(SiteId(4), 100));
		assert_eq!(store.active_sites(), &[SiteId(0), SiteId(1), SiteId(4)]);
	}
}
