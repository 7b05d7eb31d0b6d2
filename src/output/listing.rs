//! Interface listing (`-L`).

use crate::error::Result;
use crate::processing::binding_record;
use crate::system::InterfaceSource;
use itertools::Itertools;

/// One line per interface with an IPv4 address, sorted by name:
/// `name<TAB>ip<TAB>network<TAB>prefix`.
pub fn list_interfaces<S: InterfaceSource>(source: &S) -> Result<String> {
    let mut out = String::new();
    let interfaces = source.list_interfaces()?;

    for binding in interfaces.iter().sorted_by(|a, b| a.name.cmp(&b.name)) {
        match binding_record(binding) {
            Ok(r) => out.push_str(&format!("{}\t{}\t{}\t{}\n", r.name, r.ip, r.network, r.prefix)),
            Err(e) => log::debug!("not listing {}: {e}", binding.name),
        }
    }
    Ok(out)
}
