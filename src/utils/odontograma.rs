//! FDI tooth-numbering helpers
//!
//! Quadrant constants follow the FDI two-digit notation. Quadrants on the
//! patient's right run distal-to-mesial so that concatenating right + left
//! reads left-to-right on screen.

/// Permanent dentition, patient's upper right (18..11)
pub const Q1_PERMANENTE: [u8; 8] = [18, 17, 16, 15, 14, 13, 12, 11];
/// Permanent dentition, patient's upper left (21..28)
pub const Q2_PERMANENTE: [u8; 8] = [21, 22, 23, 24, 25, 26, 27, 28];
/// Permanent dentition, patient's lower left (31..38)
pub const Q3_PERMANENTE: [u8; 8] = [31, 32, 33, 34, 35, 36, 37, 38];
/// Permanent dentition, patient's lower right (48..41)
pub const Q4_PERMANENTE: [u8; 8] = [48, 47, 46, 45, 44, 43, 42, 41];

/// Temporary dentition, upper right
pub const Q5_TEMPORAL: [u8; 5] = [55, 54, 53, 52, 51];
/// Temporary dentition, upper left
pub const Q6_TEMPORAL: [u8; 5] = [61, 62, 63, 64, 65];
/// Temporary dentition, lower left
pub const Q7_TEMPORAL: [u8; 5] = [71, 72, 73, 74, 75];
/// Temporary dentition, lower right
pub const Q8_TEMPORAL: [u8; 5] = [85, 84, 83, 82, 81];

/// Generates an ordered, evenly distributed FDI number list for a tooth count.
///
/// 52 or more teeth selects the full mixed dentition, 32 or more the four
/// permanent quadrants. Smaller counts sample `cantidad / 4` teeth per
/// permanent quadrant at evenly spaced positions.
pub fn numeros_desde_cantidad(cantidad: usize) -> Vec<u8> {
    if cantidad >= 52 {
        return [
            &Q1_PERMANENTE[..],
            &Q2_PERMANENTE[..],
            &Q3_PERMANENTE[..],
            &Q4_PERMANENTE[..],
            &Q5_TEMPORAL[..],
            &Q6_TEMPORAL[..],
            &Q7_TEMPORAL[..],
            &Q8_TEMPORAL[..],
        ]
        .concat();
    }
    if cantidad >= 32 {
        return [
            &Q1_PERMANENTE[..],
            &Q2_PERMANENTE[..],
            &Q3_PERMANENTE[..],
            &Q4_PERMANENTE[..],
        ]
        .concat();
    }
    let por_cuadrante = cantidad / 4;
    [
        &Q1_PERMANENTE[..],
        &Q2_PERMANENTE[..],
        &Q3_PERMANENTE[..],
        &Q4_PERMANENTE[..],
    ]
    .iter()
    .flat_map(|q| tomar(q, por_cuadrante))
    .collect()
}

/// Picks `n` teeth from a quadrant at evenly spaced positions.
fn tomar(cuadrante: &[u8], n: usize) -> Vec<u8> {
    if n >= cuadrante.len() {
        return cuadrante.to_vec();
    }
    let paso = cuadrante.len() as f64 / (n as f64 + 1.0);
    (0..n)
        .map(|i| {
            let idx = ((i + 1) as f64 * paso).floor() as usize - 1;
            cuadrante[idx]
        })
        .collect()
}

/// One display row of the odontogram: left and right half-arches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilaOdonto {
    pub label: &'static str,
    pub izq: Vec<u8>,
    pub der: Vec<u8>,
}

/// Splits a tooth-number list into display rows by arch and dentition.
///
/// An empty or unrecognized list falls back to the standard 32-tooth layout.
pub fn organizar_en_cuadrantes(numeros: &[u8]) -> Vec<FilaOdonto> {
    let tiene_permanente = numeros.iter().any(|n| (11..=48).contains(n));
    let tiene_temporal = numeros.iter().any(|n| (51..=85).contains(n));

    let presentes = |q: &[u8]| -> Vec<u8> {
        q.iter().copied().filter(|n| numeros.contains(n)).collect()
    };

    let mut filas = Vec::new();

    if tiene_permanente {
        filas.push(FilaOdonto {
            label: "Dentición permanente superior",
            izq: presentes(&Q2_PERMANENTE),
            der: presentes(&Q1_PERMANENTE),
        });
    }

    if tiene_temporal {
        let temporal_sup = FilaOdonto {
            label: "Dentición temporal (superior)",
            izq: presentes(&Q6_TEMPORAL),
            der: presentes(&Q5_TEMPORAL),
        };
        let temporal_inf = FilaOdonto {
            label: "Dentición temporal (inferior)",
            izq: presentes(&Q7_TEMPORAL),
            der: presentes(&Q8_TEMPORAL),
        };
        if !temporal_sup.izq.is_empty() || !temporal_sup.der.is_empty() {
            filas.push(temporal_sup);
        }
        if !temporal_inf.izq.is_empty() || !temporal_inf.der.is_empty() {
            filas.push(temporal_inf);
        }
    }

    if tiene_permanente {
        filas.push(FilaOdonto {
            label: "Dentición permanente inferior",
            izq: presentes(&Q3_PERMANENTE),
            der: presentes(&Q4_PERMANENTE),
        });
    }

    if filas.is_empty() {
        return vec![
            FilaOdonto {
                label: "Dentición permanente superior",
                izq: Q2_PERMANENTE.to_vec(),
                der: Q1_PERMANENTE.to_vec(),
            },
            FilaOdonto {
                label: "Dentición permanente inferior",
                izq: Q3_PERMANENTE.to_vec(),
                der: Q4_PERMANENTE.to_vec(),
            },
        ];
    }
    filas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cantidad_32_es_denticion_permanente_completa() {
        let numeros = numeros_desde_cantidad(32);
        assert_eq!(numeros.len(), 32);
        let mut esperados: Vec<u8> = (11..=18).collect();
        esperados.extend(21..=28);
        esperados.extend(31..=38);
        esperados.extend(41..=48);
        let mut ordenados = numeros.clone();
        ordenados.sort_unstable();
        assert_eq!(ordenados, esperados);
        // first quadrant comes out distal-first
        assert_eq!(&numeros[..8], &Q1_PERMANENTE);
    }

    #[test]
    fn cantidad_52_incluye_denticion_temporal() {
        let numeros = numeros_desde_cantidad(52);
        assert_eq!(numeros.len(), 52);
        assert!(numeros.contains(&55));
        assert!(numeros.contains(&81));
        // permanent quadrants first, temporary after
        assert_eq!(&numeros[..8], &Q1_PERMANENTE);
        assert_eq!(&numeros[32..37], &Q5_TEMPORAL);
    }

    #[test]
    fn cantidad_16_muestrea_cuatro_por_cuadrante() {
        let numeros = numeros_desde_cantidad(16);
        assert_eq!(numeros.len(), 16);
        assert_eq!(&numeros[..4], &[18, 16, 15, 13]);
        assert_eq!(&numeros[4..8], &[21, 23, 24, 26]);
    }

    #[test]
    fn cantidad_8_muestrea_dos_por_cuadrante() {
        let numeros = numeros_desde_cantidad(8);
        assert_eq!(numeros, vec![17, 14, 22, 25, 32, 35, 47, 44]);
    }

    #[test]
    fn cantidad_mayor_a_52_devuelve_todo() {
        assert_eq!(numeros_desde_cantidad(60).len(), 52);
    }

    #[test]
    fn organizar_lista_vacia_usa_layout_estandar() {
        let filas = organizar_en_cuadrantes(&[]);
        assert_eq!(filas.len(), 2);
        assert_eq!(filas[0].izq, Q2_PERMANENTE.to_vec());
        assert_eq!(filas[1].der, Q4_PERMANENTE.to_vec());
    }

    #[test]
    fn organizar_mixta_intercala_temporales() {
        let mut numeros = numeros_desde_cantidad(32);
        numeros.extend_from_slice(&Q5_TEMPORAL);
        let filas = organizar_en_cuadrantes(&numeros);
        assert_eq!(filas.len(), 3);
        assert_eq!(filas[1].label, "Dentición temporal (superior)");
        assert!(filas[1].izq.is_empty());
        assert_eq!(filas[1].der, Q5_TEMPORAL.to_vec());
    }
}
