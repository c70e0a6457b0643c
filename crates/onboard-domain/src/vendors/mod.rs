//! Normalizadores por familia y utilidades compartidas entre ellos.
mod ios;
mod junos;
mod nxos;

pub use ios::IosNormalizer;
pub use junos::JunosNormalizer;
pub use nxos::{InventoryPidHook, NxosNormalizer};

use indexmap::IndexMap;
use onboard_core::RawRow;

use crate::facts::{InterfaceFacts, InterfaceMode};
use crate::interfaces::{infer_type, normalize_interface_name, normalize_switchport_mode, TypeRule};
use crate::normalizer::CommandRows;

/// Filas de un comando; vacío si falló o no se ejecutó.
pub(crate) fn rows<'a>(raw: &'a CommandRows, command: &str) -> &'a [RawRow] {
    raw.get(command).map(Vec::as_slice).unwrap_or(&[])
}

pub(crate) fn first_row<'a>(raw: &'a CommandRows, command: &str) -> Option<&'a RawRow> {
    rows(raw, command).first()
}

/// Valor no vacío, recortado.
pub(crate) fn clean(value: Option<&String>) -> Option<String> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Serial de una fila de `show version`: lista o campo `serial_number`.
pub(crate) fn serial_of(row: &RawRow) -> Option<String> {
    row.first_serial()
       .map(str::to_string)
       .or_else(|| clean(row.serial_number.as_ref()))
}

pub(crate) fn link_up(row: &RawRow) -> bool {
    row.link_status.as_deref().is_some_and(|s| s.trim().eq_ignore_ascii_case("up"))
}

/// Inventario de interfaces de `show interface(s)` con nombres canónicos. Si
/// un nombre se repite, se queda la primera fila.
pub(crate) fn collect_interfaces(rows: &[RawRow], rules: &[TypeRule], expand_names: bool) -> IndexMap<String, InterfaceFacts> {
    let mut interfaces = IndexMap::new();
    for row in rows {
        let Some(raw_name) = clean(row.interface.as_ref()) else {
            continue;
        };
        let name = if expand_names { normalize_interface_name(&raw_name) } else { raw_name };
        let kind = infer_type(rules, row, &name);
        interfaces.entry(name)
                  .or_insert_with(|| InterfaceFacts { mtu: clean(row.mtu.as_ref()),
                                                      kind,
                                                      media_type: clean(row.media_type.as_ref()),
                                                      hardware_type: clean(row.hardware_type.as_ref()),
                                                      description: clean(row.description.as_ref()),
                                                      mac_address: clean(row.mac_address.as_ref()),
                                                      enabled: link_up(row),
                                                      mode: None,
                                                      access_vlan: None });
    }
    interfaces
}

/// Aplica `show interface(s) switchport` sobre un inventario ya construido.
/// Las filas de interfaces desconocidas se ignoran.
pub(crate) fn apply_switchport(interfaces: &mut IndexMap<String, InterfaceFacts>, rows: &[RawRow]) {
    for row in rows {
        let Some(name) = clean(row.interface.as_ref()) else {
            continue;
        };
        let Some(facts) = interfaces.get_mut(&normalize_interface_name(&name)) else {
            continue;
        };
        let mode = row.admin_mode
                      .as_deref()
                      .or(row.mode.as_deref())
                      .and_then(normalize_switchport_mode);
        facts.mode = mode;
        facts.access_vlan = match mode {
            Some(InterfaceMode::Access) => clean(row.access_vlan.as_ref()),
            _ => None,
        };
    }
}

/// Primera fila cuyo campo de dirección coincide exactamente con la del host.
pub(crate) fn find_by_address<'a, F>(rows: &'a [RawRow], host_address: &str, address_of: F) -> Option<&'a RawRow>
    where F: Fn(&RawRow) -> Option<&str>
{
    rows.iter()
        .find(|&row| address_of(row).map(str::trim) == Some(host_address))
}
