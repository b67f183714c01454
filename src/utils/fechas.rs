//! Display formatting for API date strings.
//!
//! The API sends ISO 8601 (`2024-03-05` or `2024-03-05T14:30:00.000Z`);
//! the UI shows Argentine-style `d/m/yyyy` without zero padding.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

fn parsear(fecha: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(fecha) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(fecha, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    let solo_fecha = fecha.get(..10)?;
    NaiveDate::parse_from_str(solo_fecha, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `"2024-03-05"` → `"5/3/2024"`. Unparseable input comes back unchanged.
pub fn formatear_fecha(fecha: &str) -> String {
    match parsear(fecha) {
        Some(dt) => dt.format("%-d/%-m/%Y").to_string(),
        None => fecha.to_string(),
    }
}

/// `"2024-03-05T09:05:00Z"` → `"5/3/2024 09:05"`.
pub fn formatear_fecha_hora(fecha: &str) -> String {
    match parsear(fecha) {
        Some(dt) => format!(
            "{} {:02}:{:02}",
            dt.format("%-d/%-m/%Y"),
            dt.hour(),
            dt.minute()
        ),
        None => fecha.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fecha_sin_cero_a_la_izquierda() {
        assert_eq!(formatear_fecha("2024-03-05"), "5/3/2024");
        assert_eq!(formatear_fecha("2024-12-25"), "25/12/2024");
    }

    #[test]
    fn fecha_con_hora_iso() {
        assert_eq!(formatear_fecha("2024-03-05T14:30:00.000Z"), "5/3/2024");
        assert_eq!(formatear_fecha_hora("2024-03-05T09:05:00.000Z"), "5/3/2024 09:05");
        assert_eq!(formatear_fecha_hora("2024-03-05T14:30:00"), "5/3/2024 14:30");
    }

    #[test]
    fn entrada_invalida_se_devuelve_igual() {
        assert_eq!(formatear_fecha("sin fecha"), "sin fecha");
        assert_eq!(formatear_fecha_hora(""), "");
    }
}
