//! Detección de plataforma a partir de la salida de la sonda de descubrimiento.
use onboard_core::RawRow;

/// Marcador textual → clave de plataforma, en orden de prioridad. IOS-XE va
/// antes que IOS porque su banner también contiene "Cisco IOS".
const DETECTION_RULES: &[(&str, &str)] = &[("ios-xe", "cisco_xe"),
                                           ("ios xe", "cisco_xe"),
                                           ("cisco ios software", "cisco_ios"),
                                           ("cisco internetwork operating system", "cisco_ios"),
                                           ("nx-os", "cisco_nxos"),
                                           ("cisco nexus", "cisco_nxos"),
                                           ("junos", "juniper_junos")];

/// Devuelve la plataforma que reconoce en la salida de `show version`, o
/// `None` si no reconoce ninguna.
pub fn detect_platform(rows: &[RawRow]) -> Option<&'static str> {
    let text = rows.iter()
                   .filter_map(|r| r.output.as_deref())
                   .collect::<Vec<_>>()
                   .join("\n")
                   .to_ascii_lowercase();
    if text.is_empty() {
        return None;
    }
    DETECTION_RULES.iter()
                   .find(|(marker, _)| text.contains(marker))
                   .map(|(_, platform)| *platform)
}
