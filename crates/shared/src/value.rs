use std::collections::HashMap;

use sitelink_primitives::{BitSeq, MultiSite};

/// The kind tag of a shared variable's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
	/// Per-site floating point value.
	Double,
	/// Per-site string value.
	Str,
	/// Per-site boolean value.
	Bool,
	/// Per-site 64-bit integer value.
	Long,
	/// Per-site integer array value.
	LongArray,
	/// Per-site bit sequence value.
	BitSeq,
	/// Keyed map of per-site floating point values.
	MapDouble,
}

impl VarKind {
	/// Stable lower-case label for diagnostics.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Double => "double",
			Self::Str => "string",
			Self::Bool => "boolean",
			Self::Long => "long",
			Self::LongArray => "long-array",
			Self::BitSeq => "bit-sequence",
			Self::MapDouble => "map-double",
		}
	}
}

impl std::fmt::Display for VarKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A shared variable's value: a closed union over the supported kinds.
///
/// Every kind wraps a per-site container; `MapDouble` keys a family of
/// per-site doubles by name.
#[derive(Debug, Clone, PartialEq)]
pub enum VarValue {
	/// Per-site floating point value.
	Double(MultiSite<f64>),
	/// Per-site string value.
	Str(MultiSite<String>),
	/// Per-site boolean value.
	Bool(MultiSite<bool>),
	/// Per-site 64-bit integer value.
	Long(MultiSite<i64>),
	/// Per-site integer array value.
	LongArray(MultiSite<Vec<i64>>),
	/// Per-site bit sequence value.
	BitSeq(MultiSite<BitSeq>),
	/// Keyed map of per-site floating point values.
	MapDouble(HashMap<String, MultiSite<f64>>),
}

impl VarValue {
	/// The kind tag of this value.
	pub const fn kind(&self) -> VarKind {
		match self {
			Self::Double(_) => VarKind::Double,
			Self::Str(_) => VarKind::Str,
			Self::Bool(_) => VarKind::Bool,
			Self::Long(_) => VarKind::Long,
			Self::LongArray(_) => VarKind::LongArray,
			Self::BitSeq(_) => VarKind::BitSeq,
			Self::MapDouble(_) => VarKind::MapDouble,
		}
	}
}

impl From<MultiSite<f64>> for VarValue {
	fn from(v: MultiSite<f64>) -> Self {
		Self::Double(v)
	}
}

impl From<MultiSite<String>> for VarValue {
	fn from(v: MultiSite<String>) -> Self {
		Self::Str(v)
	}
}

impl From<MultiSite<bool>> for VarValue {
	fn from(v: MultiSite<bool>) -> Self {
		Self::Bool(v)
	}
}

impl From<MultiSite<i64>> for VarValue {
	fn from(v: MultiSite<i64>) -> Self {
		Self::Long(v)
	}
}

impl From<MultiSite<Vec<i64>>> for VarValue {
	fn from(v: MultiSite<Vec<i64>>) -> Self {
		Self::LongArray(v)
	}
}

impl From<MultiSite<BitSeq>> for VarValue {
	fn from(v: MultiSite<BitSeq>) -> Self {
		Self::BitSeq(v)
	}
}

impl From<HashMap<String, MultiSite<f64>>> for VarValue {
	fn from(v: HashMap<String, MultiSite<f64>>) -> Self {
		Self::MapDouble(v)
	}
}

impl std::fmt::Display for VarValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Double(v) => write!(f, "{v}"),
			Self::Str(v) => write!(f, "{v}"),
			Self::Bool(v) => write!(f, "{v}"),
			Self::Long(v) => write!(f, "{v}"),
			Self::LongArray(v) => {
				let mut first = true;
				for (site, arr) in v.iter() {
					if !first {
						write!(f, " ")?;
					}
					write!(f, "{site}:{arr:?}")?;
					first = false;
				}
				Ok(())
			}
			Self::BitSeq(v) => write!(f, "{v}"),
			Self::MapDouble(map) => {
				let mut names: Vec<&String> = map.keys().collect();
				names.sort();
				let mut first = true;
				for name in names {
					if !first {
						write!(f, " ** ")?;
					}
					write!(f, "[{name}] {}", map[name])?;
					first = false;
				}
				Ok(())
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use sitelink_primitives::SiteId;

	use super::*;

	#[test]
	fn kind_tags_match_variants() {
		let v: VarValue = MultiSite::<f64>::new().into();
		assert_eq!(v.kind(), VarKind::Double);
		let v: VarValue = HashMap::<String, MultiSite<f64>>::new().into();
		assert_eq!(v.kind(), VarKind::MapDouble);
	}

	#[test]
	fn map_double_display_is_name_sorted() {
		let per_site: MultiSite<f64> = [(SiteId(0), 1.0)].into_iter().collect();
		let mut map = HashMap::new();
		map.insert("b".to_string(), per_site.clone());
		map.insert("a".to_string(), per_site);
		let v = VarValue::MapDouble(map);
		assert_eq!(v.to_string(), "[a] 0:1 ** [b] 0:1");
	}
}
