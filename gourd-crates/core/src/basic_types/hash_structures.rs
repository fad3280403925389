//! `HashMap`/`HashSet` with the FNV hasher. The keys hashed by the solver are small integers, for
//! which FNV is considerably faster than the default SipHash.
use std::hash::BuildHasherDefault;

use fnv::FnvHasher;

pub(crate) type HashMap<K, V> = std::collections::HashMap<K, V, BuildHasherDefault<FnvHasher>>;
pub(crate) type HashSet<K> = std::collections::HashSet<K, BuildHasherDefault<FnvHasher>>;
