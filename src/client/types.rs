//! Domain types for the Dentissta REST API.
//!
//! The backend sends camelCase JSON; structs rename at the field level
//! only where the Rust name differs. List endpoints omit the nested
//! collections that the detail endpoints include, so those collections
//! default to empty.

use serde::{Deserialize, Serialize};

/// Logged-in administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub nombre: String,
    pub email: String,
}

/// `/auth/login` response; the token field is snake_case on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub admin: Admin,
}

/// `/auth/me` response.
#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub id: String,
    pub email: String,
    pub nombre: String,
}

/// Patient as referenced from citas and dashboards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PacienteRef {
    pub id: String,
    pub nombre: String,
    pub apellido: String,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub dni: Option<String>,
    #[serde(default)]
    pub obra_social: Option<ObraSocialRef>,
}

impl PacienteRef {
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObraSocialRef {
    #[serde(default)]
    pub id: Option<String>,
    pub nombre: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConteoPaciente {
    #[serde(default)]
    pub citas: u32,
    #[serde(default)]
    pub odontogramas: u32,
}

/// Full patient record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paciente {
    pub id: String,
    pub nombre: String,
    pub apellido: String,
    pub dni: String,
    #[serde(default)]
    pub fecha_nacimiento: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub nota: Option<String>,
    #[serde(default)]
    pub alergias: Option<String>,
    #[serde(default)]
    pub obra_social: Option<ObraSocialRef>,
    #[serde(default)]
    pub obra_social_id: Option<String>,
    #[serde(default, rename = "_count")]
    pub conteo: Option<ConteoPaciente>,
}

impl Paciente {
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObraSocial {
    pub id: String,
    pub nombre: String,
    #[serde(default)]
    pub codigo: Option<String>,
    #[serde(default, rename = "_count")]
    pub conteo: Option<ConteoObraSocial>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConteoObraSocial {
    #[serde(default)]
    pub pacientes: u32,
}

/// Appointment. `fecha` is an ISO date, the horas are `HH:MM`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cita {
    pub id: String,
    pub fecha: String,
    pub hora_inicio: String,
    pub hora_fin: String,
    #[serde(default)]
    pub motivo: Option<String>,
    pub estado: String,
    pub paciente: PacienteRef,
    #[serde(default)]
    pub odontogramas: Vec<Odontograma>,
    #[serde(default)]
    pub notas_clinicas: Vec<Nota>,
    #[serde(default)]
    pub imagenes: Vec<Imagen>,
    #[serde(default)]
    pub registro_prestacion: Option<RegistroPrestacion>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConteoOdontograma {
    #[serde(default)]
    pub dientes: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Odontograma {
    pub id: String,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub paciente: Option<PacienteRef>,
    #[serde(default)]
    pub numeros_dientes: Option<Vec<u8>>,
    #[serde(default)]
    pub observaciones: Option<String>,
    #[serde(default)]
    pub dientes: Vec<Diente>,
    #[serde(default, rename = "_count")]
    pub conteo: Option<ConteoOdontograma>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diente {
    pub id: String,
    pub numero_diente: u8,
    pub estado: String,
    #[serde(default)]
    pub observaciones: Option<String>,
}

/// Clinical note.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Nota {
    pub id: String,
    pub titulo: String,
    pub descripcion: String,
    pub fecha: String,
    pub profesional: String,
}

/// Clinical image. `url` is relative to the API origin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Imagen {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub fecha: String,
    pub tipo: String,
}

/// One entry of the merged per-patient timeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventoHistorial {
    pub tipo: String,
    pub fecha: String,
    pub id: String,
    pub titulo: String,
    #[serde(default)]
    pub detalle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrestacionItem {
    pub id: String,
    pub numero_diente: u8,
    #[serde(default)]
    pub cara: Option<String>,
    pub codigo: String,
    #[serde(default)]
    pub fecha_realizacion: Option<String>,
    pub cantidad: u32,
    pub conformidad_paciente: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistroPrestacion {
    pub id: String,
    #[serde(default)]
    pub observaciones: Option<String>,
    #[serde(default)]
    pub cantidad_dientes_existente: Option<u32>,
    pub protesis_fija: bool,
    pub protesis_removible: bool,
    pub coronas: bool,
    pub consentimiento_informado: bool,
    #[serde(default)]
    pub items: Vec<PrestacionItem>,
}

/// Clinical-history document for one cita; `datos` is free-form JSON the
/// form deep-merges over its default structure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoriaClinica {
    pub id: String,
    pub datos: serde_json::Value,
    #[serde(default)]
    pub cita: Option<CitaResumen>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitaResumen {
    pub id: String,
    pub fecha: String,
    #[serde(default)]
    pub hora_inicio: Option<String>,
    #[serde(default)]
    pub motivo: Option<String>,
}

/// Configurable tooth-estado palette entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EstadoDiente {
    pub id: String,
    pub clave: String,
    pub nombre: String,
    pub color: String,
    pub orden: i32,
    #[serde(default)]
    pub simbolo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Alerta {
    pub tipo: String,
    pub mensaje: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CitaPorDia {
    pub fecha: String,
    pub total: u32,
    #[serde(default)]
    pub atendidos: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CitasMes {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub pendientes: u32,
    #[serde(default)]
    pub confirmadas: u32,
    #[serde(default)]
    pub atendidas: u32,
    #[serde(default)]
    pub canceladas: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(default)]
    pub citas_del_dia: Vec<Cita>,
    #[serde(default)]
    pub proxima_cita: Option<Cita>,
    #[serde(default)]
    pub pacientes_recientes: Vec<PacienteRef>,
    #[serde(default)]
    pub total_pacientes: u32,
    #[serde(default)]
    pub alertas: Vec<Alerta>,
    #[serde(default)]
    pub citas_por_dia: Vec<CitaPorDia>,
    #[serde(default)]
    pub citas_este_mes: Option<CitasMes>,
}
